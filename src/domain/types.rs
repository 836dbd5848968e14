//! # Domain Types
//!
//! Common data structures used across the application logic.

use serde::{Deserialize, Serialize};

/// Activity kind used for the secondary notification emitted after a tweet.
pub const TWEETED_ACTIVITY: &str = "activity.events.twitter";

/// Attachment colours.
pub mod palette {
    pub const POSITIVE: &str = "#19A15F";
    pub const NORMAL: &str = "#5596E6";
}

/// A configurable mapping from an activity kind to a tweet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventRule {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub enabled: bool,
}

impl EventRule {
    pub fn new(kind: &str, title: &str, message: &str) -> Self {
        Self {
            kind: kind.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            enabled: false,
        }
    }
}

/// A titled, coloured block rendered by the chat adapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub title: String,
    pub text: String,
    pub color: String,
}

/// Internal signal that a platform lifecycle event happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityNotification {
    #[serde(default, alias = "activity_id")]
    pub activity_kind: Option<String>,
    /// Originating response context, passed through untouched.
    #[serde(default, alias = "robot_res")]
    pub context: serde_json::Value,
}

impl ActivityNotification {
    pub fn new(kind: &str, context: serde_json::Value) -> Self {
        Self {
            activity_kind: Some(kind.to_string()),
            context,
        }
    }
}

/// A natural-language command already resolved to an intent id by a classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntentRequest {
    pub intent: String,
    pub room: String,
    pub sender: String,
}

/// One line of the inbound feed. Anything that is not an intent is an activity.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FeedItem {
    Intent(IntentRequest),
    Activity(ActivityNotification),
}

/// Message handed to the external tweeter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostRequest {
    pub context: serde_json::Value,
    pub username: Option<String>,
    pub tweet: String,
}

/// Credential pair for one posting account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountCredentials {
    pub access_token: String,
    pub access_token_secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_accepts_legacy_field_names() {
        let raw = r#"{"activity_id": "activity.app.crash", "robot_res": "crash message"}"#;
        let activity: ActivityNotification = serde_json::from_str(raw).unwrap();
        assert_eq!(activity.activity_kind.as_deref(), Some("activity.app.crash"));
        assert_eq!(activity.context, serde_json::json!("crash message"));
    }

    #[test]
    fn test_activity_without_kind_still_parses() {
        let raw = r#"{"no_activity_id": "test", "robot_res": "crash message 1"}"#;
        let activity: ActivityNotification = serde_json::from_str(raw).unwrap();
        assert!(activity.activity_kind.is_none());
    }

    #[test]
    fn test_rule_serializes_type_field() {
        let rule = EventRule::new("activity.app.scale", "App Scale", "scaling");
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["type"], "activity.app.scale");
        assert_eq!(value["enabled"], false);
    }
}
