//! Agent conversation types

use serde::{Deserialize, Serialize};

/// Who authored a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    UserMessage,
    AssistantMessage,
}

/// A single message in an agent's conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub text: String,
}

/// Full conversation history of one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<ConversationMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_type_uses_snake_case_tags() {
        let json = r#"{"id": "m1", "type": "assistant_message", "text": "done"}"#;
        let message: ConversationMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.message_type, MessageType::AssistantMessage);

        let round = serde_json::to_value(&message).unwrap();
        assert_eq!(round["type"], "assistant_message");
    }
}
