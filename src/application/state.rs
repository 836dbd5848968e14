//! # Bot State
//!
//! Defines the state of the twitter monitoring plugin (`BotState`): the event catalog,
//! the monitoring flag and the pending multi-turn conversations.
//! Catalog, flag and selected account are loaded from and saved to the brain.

use crate::application::catalog::EventCatalog;
use crate::application::monitoring::MonitoringFlag;
use crate::domain::config::AppConfig;
use crate::domain::traits::ConfigStore;
use crate::domain::types::EventRule;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;

pub const BRAIN_TWITTER_USERNAME: &str = "bm.twitter.username";
pub const BRAIN_TWITTER_EVENTS: &str = "bm.twitter.events";
pub const BRAIN_TWITTER_MONITORING: &str = "bm.twitter.monitoring";

/// What a suspended command is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationStep {
    /// Enable monitoring: pick one of these accounts by number.
    AwaitingAccount { accounts: Vec<String> },
    /// Edit tweets: pick the event to change.
    AwaitingTweetChoice,
    /// Edit tweets: the new text for the event at `index`.
    AwaitingTweetText { index: usize },
    /// Edit events: `enable 1 2` / `disable 3`.
    AwaitingEventToggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConversation {
    pub step: ConversationStep,
    pub started_at: DateTime<Utc>,
}

impl PendingConversation {
    pub fn new(step: ConversationStep) -> Self {
        Self {
            step,
            started_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now - self.started_at > timeout
    }
}

/// Conversations are per user per room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    pub room_id: String,
    pub sender: String,
}

impl ConversationKey {
    pub fn new(room_id: &str, sender: &str) -> Self {
        Self {
            room_id: room_id.to_string(),
            sender: sender.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct BotState {
    pub catalog: EventCatalog,
    pub monitoring: MonitoringFlag,
    pub conversations: HashMap<ConversationKey, PendingConversation>,
}

impl BotState {
    /// Builds the state from the brain. A configured monitoring override wins over the brain.
    pub fn load(config: &AppConfig, brain: &dyn ConfigStore) -> Self {
        let mut catalog = EventCatalog::default();
        if let Some(value) = brain.get(BRAIN_TWITTER_EVENTS) {
            match serde_json::from_value::<Vec<EventRule>>(value) {
                Ok(rules) => {
                    if !catalog.restore(rules) {
                        tracing::warn!("Persisted event catalog has a different size; using defaults.");
                    }
                }
                Err(e) => tracing::warn!("Ignoring unreadable persisted event catalog: {}", e),
            }
        }

        let stored = brain
            .get(BRAIN_TWITTER_MONITORING)
            .and_then(|v| v.as_str().map(str::to_string));
        let raw = config.twitter.monitoring_enabled.clone().or(stored);
        let monitoring = MonitoringFlag::parse(raw.as_deref());

        Self {
            catalog,
            monitoring,
            conversations: HashMap::new(),
        }
    }

    pub fn save_catalog(&self, brain: &dyn ConfigStore) -> Result<()> {
        brain.set(
            BRAIN_TWITTER_EVENTS,
            serde_json::to_value(self.catalog.list_all())?,
        )
    }

    pub fn save_monitoring(&self, brain: &dyn ConfigStore) -> Result<()> {
        match self.monitoring.as_stored() {
            Some(raw) => brain.set(BRAIN_TWITTER_MONITORING, Value::from(raw)),
            None => Ok(()),
        }
    }

    pub fn begin(&mut self, key: ConversationKey, step: ConversationStep) {
        self.conversations.insert(key, PendingConversation::new(step));
    }

    /// Ends the conversation `pending` was read from. False when it already ended
    /// or was replaced by a newer one in the meantime.
    pub fn finish(&mut self, key: &ConversationKey, pending: &PendingConversation) -> bool {
        match self.conversations.get(key) {
            Some(current) if current.started_at == pending.started_at => {
                self.conversations.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Removes and returns every conversation older than `timeout`.
    pub fn take_expired(
        &mut self,
        now: DateTime<Utc>,
        timeout: Duration,
    ) -> Vec<(ConversationKey, PendingConversation)> {
        let expired: Vec<ConversationKey> = self
            .conversations
            .iter()
            .filter(|(_, c)| c.is_expired(now, timeout))
            .map(|(k, _)| k.clone())
            .collect();

        expired
            .into_iter()
            .filter_map(|k| self.conversations.remove(&k).map(|c| (k, c)))
            .collect()
    }
}

pub fn selected_username(brain: &dyn ConfigStore) -> Option<String> {
    brain
        .get(BRAIN_TWITTER_USERNAME)
        .and_then(|v| v.as_str().map(str::to_string))
}

pub fn set_selected_username(brain: &dyn ConfigStore, username: &str) -> Result<()> {
    brain.set(BRAIN_TWITTER_USERNAME, Value::from(username))
}
