//! Wire types for the chat API.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Author of a history item.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Short label shown next to a message.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "AI",
        }
    }
}

/// One chat message as returned by `/api/chat/history`.
///
/// Negative ids mark optimistic entries that the server has not confirmed yet.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HistoryItem {
    pub id: i64,
    pub role: Role,
    pub text: String,
    pub ts: String,
}

impl HistoryItem {
    pub fn new(id: i64, role: Role, text: impl Into<String>, ts: impl Into<String>) -> Self {
        Self {
            id,
            role,
            text: text.into(),
            ts: ts.into(),
        }
    }

    /// Whether this entry only exists locally.
    pub fn is_optimistic(&self) -> bool {
        self.id < 0
    }

    /// Time of day for display. Falls back to the raw string when the server
    /// sends something unexpected.
    pub fn display_time(&self) -> String {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.ts) {
            return dt.with_timezone(&Local).format("%H:%M:%S").to_string();
        }
        // Naive timestamps (no offset) are shown as-is.
        if let Ok(naive) = NaiveDateTime::parse_from_str(&self.ts, "%Y-%m-%dT%H:%M:%S%.f") {
            return naive.format("%H:%M:%S").to_string();
        }
        self.ts.clone()
    }
}

#[derive(Serialize, Debug)]
pub struct AskRequest<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct AskResponse {
    pub reply: String,
    #[serde(default)]
    pub tokens_input: Option<u32>,
    #[serde(default)]
    pub tokens_output: Option<u32>,
}

#[derive(Serialize, Debug)]
pub struct UpdateMessageRequest<'a> {
    pub text: &'a str,
}

/// Result of editing a user message and regenerating the reply after it.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EditRegenResponse {
    pub updated: HistoryItem,
    pub assistant: HistoryItem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_item_deserializes_server_shape() {
        let json = r#"[{"id":3,"role":"assistant","text":"hi","ts":"2025-01-02T03:04:05.123456"}]"#;
        let items: Vec<HistoryItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].role, Role::Assistant);
        assert!(!items[0].is_optimistic());
        assert_eq!(items[0].display_time(), "03:04:05");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let json = r#"{"id":1,"role":"system","text":"x","ts":"now"}"#;
        assert!(serde_json::from_str::<HistoryItem>(json).is_err());
    }

    #[test]
    fn test_display_time_falls_back_to_raw() {
        let item = HistoryItem::new(-5, Role::User, "x", "yesterday-ish");
        assert!(item.is_optimistic());
        assert_eq!(item.display_time(), "yesterday-ish");
    }

    #[test]
    fn test_ask_request_omits_missing_system() {
        let body = serde_json::to_string(&AskRequest { message: "hi", system: None }).unwrap();
        assert_eq!(body, r#"{"message":"hi"}"#);
    }

    #[test]
    fn test_ask_response_token_counts_optional() {
        let resp: AskResponse = serde_json::from_str(r#"{"reply":"ok"}"#).unwrap();
        assert_eq!(resp.reply, "ok");
        assert_eq!(resp.tokens_input, None);
    }
}
