//! # Domain Traits
//!
//! Abstract interfaces for core system components (Chat, Brain, Tweeter).
//! Allows for pluggable implementations in the Infrastructure layer.

use crate::domain::types::{Attachment, PostRequest};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Abstract interface for a Chat Provider (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a list of attachments as a single reply
    async fn send_attachments(&self, attachments: &[Attachment]) -> Result<(), String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// Key-value persistence ("brain"). Values are opaque JSON.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value) -> anyhow::Result<()>;
}

pub type SharedBrain = Arc<dyn ConfigStore>;

/// Transport that publishes post-requests. Delivery is best effort.
#[async_trait]
pub trait TweetPoster: Send + Sync {
    async fn post(&self, request: &PostRequest) -> Result<(), String>;
}
