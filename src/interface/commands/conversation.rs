//! # Conversation Handler
//!
//! Handles replies to suspended commands (account choice, tweet edit, event toggle).
//! Managed by `BotState`'s pending conversations, keyed by room and sender.

use crate::application::parsing::{parse_numbered_choice, parse_toggle_request, strip_mention};
use crate::application::state::{BotState, ConversationKey, ConversationStep, PendingConversation};
use crate::domain::config::AppConfig;
use crate::domain::error::MonitorError;
use crate::domain::traits::{ChatProvider, ConfigStore};
use crate::interface::commands::{monitoring, say};
use crate::strings::messages;
use anyhow::Result;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

const CANCEL_WORDS: [&str; 4] = ["exit", "cancel", ".cancel", "quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No conversation with this sender; route the message normally.
    NotInConversation,
    /// The pending conversation had timed out or already ended; the message was not consumed.
    Expired,
    Handled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    Cancelled,
    Expired,
}

/// Configured conversation timeout, saturating at the largest representable duration.
pub fn timeout(config: &AppConfig) -> Duration {
    i64::try_from(config.conversation.timeout_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

pub async fn handle_step(
    config: &AppConfig,
    state: &Arc<Mutex<BotState>>,
    brain: &dyn ConfigStore,
    chat: &impl ChatProvider,
    sender: &str,
    message: &str,
) -> Result<StepOutcome> {
    let key = ConversationKey::new(&chat.room_id(), sender);
    let input = strip_mention(message, &config.system.bot_name);

    let pending = {
        let mut guard = state.lock().await;
        let Some(pending) = guard.conversations.get(&key).cloned() else {
            return Ok(StepOutcome::NotInConversation);
        };
        if pending.is_expired(Utc::now(), timeout(config)) {
            guard.conversations.remove(&key);
            drop(guard);
            notify_aborted(chat, &pending.step, AbortReason::Expired).await?;
            return Ok(StepOutcome::Expired);
        }
        if CANCEL_WORDS.iter().any(|w| input.eq_ignore_ascii_case(w)) {
            guard.conversations.remove(&key);
            drop(guard);
            notify_aborted(chat, &pending.step, AbortReason::Cancelled).await?;
            return Ok(StepOutcome::Handled);
        }
        pending
    };

    advance(state, brain, chat, &key, sender, &pending, input).await
}

/// Applies `input` to the step read in `pending`. Nothing is committed when the
/// conversation ended (or was replaced) while the reply was being handled.
async fn advance(
    state: &Arc<Mutex<BotState>>,
    brain: &dyn ConfigStore,
    chat: &impl ChatProvider,
    key: &ConversationKey,
    sender: &str,
    pending: &PendingConversation,
    input: &str,
) -> Result<StepOutcome> {
    match &pending.step {
        ConversationStep::AwaitingAccount { accounts } => {
            let Some(choice) = parse_numbered_choice(input, accounts.len()) else {
                say(chat, &messages::numbered_choice_retry(accounts.len())).await?;
                return Ok(StepOutcome::Handled);
            };
            if !state.lock().await.finish(key, pending) {
                return Ok(StepOutcome::Expired);
            }
            let username = &accounts[choice - 1];
            tracing::info!("Twitter account {} selected by {}.", username, sender);
            monitoring::complete_enable(state, brain, chat, username).await?;
        }
        ConversationStep::AwaitingTweetChoice => {
            let max = state.lock().await.catalog.len();
            let Some(choice) = parse_numbered_choice(input, max) else {
                say(chat, &messages::numbered_choice_retry(max)).await?;
                return Ok(StepOutcome::Handled);
            };
            {
                let mut guard = state.lock().await;
                if !guard.finish(key, pending) {
                    return Ok(StepOutcome::Expired);
                }
                if let Some(rule) = guard.catalog.list_all().get(choice - 1) {
                    tracing::info!("Edit message for {}.", rule.title);
                }
                guard.conversations.insert(
                    key.clone(),
                    PendingConversation::new(ConversationStep::AwaitingTweetText { index: choice }),
                );
            }
            say(chat, messages::MESSAGE_PROMPT).await?;
        }
        ConversationStep::AwaitingTweetText { index } => {
            let index = *index;
            if input.is_empty() {
                say(chat, messages::MESSAGE_PROMPT).await?;
                return Ok(StepOutcome::Handled);
            }
            let result = {
                let mut guard = state.lock().await;
                if !guard.finish(key, pending) {
                    return Ok(StepOutcome::Expired);
                }
                let result = guard.catalog.set_message(index, input);
                if result.is_ok() {
                    tracing::info!("New message for event {} will be {}.", index, input);
                    if let Err(e) = guard.save_catalog(brain) {
                        tracing::error!("Failed to persist event catalog: {}", e);
                    }
                }
                result
            };
            match result {
                Ok(()) => say(chat, &messages::message_new(input)).await?,
                Err(e) => {
                    tracing::error!("Could not update tweet: {}", e);
                    say(chat, messages::CONVERSATION_CANCELLED).await?;
                }
            }
        }
        ConversationStep::AwaitingEventToggle => {
            let max = state.lock().await.catalog.len();
            let Some(request) = parse_toggle_request(input, max) else {
                say(chat, messages::EDIT_EVENTS_RETRY).await?;
                return Ok(StepOutcome::Handled);
            };
            let reply = {
                let mut guard = state.lock().await;
                if !guard.finish(key, pending) {
                    return Ok(StepOutcome::Expired);
                }
                if request.indices.is_empty() {
                    messages::NO_VALID_EVENTS.to_string()
                } else {
                    let list = guard.catalog.describe_indices(&request.indices);
                    guard.catalog.set_enabled(&request.indices, request.enable);
                    if let Err(e) = guard.save_catalog(brain) {
                        tracing::error!("Failed to persist event catalog: {}", e);
                    }
                    if request.enable {
                        messages::events_enabled(&list)
                    } else {
                        messages::events_disabled(&list)
                    }
                }
            };
            say(chat, &reply).await?;
        }
    }

    Ok(StepOutcome::Handled)
}

/// Tells the user that the suspended command ended without effect.
pub async fn notify_aborted(
    chat: &impl ChatProvider,
    step: &ConversationStep,
    reason: AbortReason,
) -> Result<()> {
    match step {
        ConversationStep::AwaitingAccount { .. } => {
            tracing::error!(
                "An error occurred enabling twitter monitoring: {} ({:?})",
                MonitorError::AccountSelectionAborted,
                reason
            );
            say(chat, messages::SET_USERNAME_FAILURE).await
        }
        _ => match reason {
            AbortReason::Cancelled => say(chat, messages::CONVERSATION_CANCELLED).await,
            AbortReason::Expired => say(chat, messages::CONVERSATION_EXPIRED).await,
        },
    }
}
