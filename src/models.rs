use serde::{Deserialize, Serialize};

/// Speaker of a chat message. Unknown roles are rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage::new(Role::Assistant, "hi");
        let value = serde_json::to_value(&msg).expect("message should serialize");
        assert_eq!(value, json!({"role": "assistant", "content": "hi"}));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result: Result<ChatMessage, _> =
            serde_json::from_value(json!({"role": "tool", "content": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn missing_content_is_rejected() {
        let result: Result<ChatMessage, _> = serde_json::from_value(json!({"role": "user"}));
        assert!(result.is_err());
    }
}
