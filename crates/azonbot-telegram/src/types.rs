//! Telegram Bot API wire types — only the fields this bot reads.

use serde::Deserialize;

/// Standard Bot API envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// One getUpdates entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Incoming>,
}

/// An incoming message. Non-text updates carry `text: None` and are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Incoming {
    pub chat: Chat,
    pub from: Option<BotUser>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_deserialization() {
        let json = r#"{
            "update_id": 7,
            "message": {
                "message_id": 1,
                "chat": {"id": 99, "type": "private"},
                "from": {"id": 99, "is_bot": false, "first_name": "Aziz"},
                "text": "/start"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 7);
        let msg = update.message.unwrap();
        assert_eq!(msg.chat.id, 99);
        assert_eq!(msg.text.as_deref(), Some("/start"));
    }

    #[test]
    fn test_non_text_update() {
        let json = r#"{"update_id": 8, "message": {"chat": {"id": 5}, "date": 0}}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert!(update.message.unwrap().text.is_none());
    }
}
