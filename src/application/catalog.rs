//! # Event Catalog
//!
//! The ordered table of events the bot can tweet about.
//! Entries are addressed by 1-based position in every user-facing operation,
//! so the table never grows or shrinks after construction.

use crate::domain::error::MonitorError;
use crate::domain::types::{Attachment, EventRule, palette};
use crate::strings::events;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCatalog {
    rules: Vec<EventRule>,
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::new(vec![
            EventRule::new("activity.app.scale", events::SCALE_TITLE, events::SCALE_MESSAGE),
            EventRule::new("activity.app.crash", events::CRASH_TITLE, events::CRASH_MESSAGE),
            EventRule::new(
                "activity.github.deploy",
                events::DEPLOY_TITLE,
                events::DEPLOY_MESSAGE,
            ),
        ])
    }
}

impl EventCatalog {
    pub fn new(rules: Vec<EventRule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn list_all(&self) -> &[EventRule] {
        &self.rules
    }

    pub fn list_enabled(&self) -> Vec<EventRule> {
        self.rules.iter().filter(|r| r.enabled).cloned().collect()
    }

    /// Replaces the tweet of the rule at `index` (1-based).
    pub fn set_message(&mut self, index: usize, text: &str) -> Result<(), MonitorError> {
        let len = self.rules.len();
        let rule = index
            .checked_sub(1)
            .and_then(|i| self.rules.get_mut(i))
            .ok_or(MonitorError::IndexOutOfRange { index, len })?;
        rule.message = text.to_string();
        Ok(())
    }

    /// Sets `enabled` on every in-range index. Out-of-range indices are ignored.
    pub fn set_enabled(&mut self, indices: &[usize], enabled: bool) {
        for &index in indices {
            if index >= 1 && index <= self.rules.len() {
                self.rules[index - 1].enabled = enabled;
            }
        }
    }

    /// Human readable list of titles: "A", "A and B", "A, B and C".
    pub fn describe_indices(&self, indices: &[usize]) -> String {
        let titles: Vec<&str> = indices
            .iter()
            .filter_map(|&i| i.checked_sub(1).and_then(|i| self.rules.get(i)))
            .map(|r| r.title.as_str())
            .collect();

        match titles.split_last() {
            None => String::new(),
            Some((last, [])) => last.to_string(),
            Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        }
    }

    /// First enabled rule whose kind equals `kind`.
    pub fn first_enabled_match(&self, kind: &str) -> Option<&EventRule> {
        self.rules.iter().find(|r| r.enabled && r.kind == kind)
    }

    /// Prompt body listing every rule as "\n1. `Title`: message".
    pub fn numbered_listing(&self) -> String {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, r)| format!("\n{}. `{}`: {}", i + 1, r.title, r.message))
            .collect()
    }

    /// Replaces the rules with a persisted copy when it has the same shape.
    /// Returns false (and keeps the current rules) otherwise.
    pub fn restore(&mut self, rules: Vec<EventRule>) -> bool {
        if rules.len() != self.rules.len() {
            return false;
        }
        self.rules = rules;
        true
    }
}

pub fn attachments(rules: &[EventRule]) -> Vec<Attachment> {
    rules
        .iter()
        .map(|r| Attachment {
            title: r.title.clone(),
            text: r.message.clone(),
            color: if r.enabled {
                palette::POSITIVE.to_string()
            } else {
                palette::NORMAL.to_string()
            },
        })
        .collect()
}
