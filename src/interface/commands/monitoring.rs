//! # Monitoring Commands
//!
//! Handles `twitter monitoring enable` and `twitter monitoring disable`.
//! Enabling picks the posting account first and only then flips the flag.

use crate::application::accounts::{AccountSelection, numbered_names, parse_accounts, plan_selection};
use crate::application::catalog::attachments;
use crate::application::monitoring::MonitoringFlag;
use crate::application::state::{BotState, ConversationKey, ConversationStep, set_selected_username};
use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, ConfigStore};
use crate::interface::commands::say;
use crate::strings::messages;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_enable(
    config: &AppConfig,
    state: &Arc<Mutex<BotState>>,
    brain: &dyn ConfigStore,
    chat: &impl ChatProvider,
    sender: &str,
) -> Result<()> {
    tracing::info!("Enabling twitter monitoring...");

    if state.lock().await.monitoring.is_already_enabled() {
        return say(chat, messages::MONITORING_ALREADY).await;
    }

    let selection = parse_accounts(config.twitter.accounts.as_deref())
        .and_then(|accounts| plan_selection(&accounts));

    match selection {
        Ok(AccountSelection::Automatic(username)) => {
            complete_enable(state, brain, chat, &username).await
        }
        Ok(AccountSelection::Prompt(accounts)) => {
            let prompt = format!("{}{}", messages::SET_USERNAME_PROMPT, numbered_names(&accounts));
            state.lock().await.begin(
                ConversationKey::new(&chat.room_id(), sender),
                ConversationStep::AwaitingAccount { accounts },
            );
            say(chat, &prompt).await
        }
        Err(e) => {
            tracing::error!("An error occurred enabling twitter monitoring: {}", e);
            say(chat, messages::SET_USERNAME_FAILURE).await
        }
    }
}

/// Commits the chosen account and turns monitoring on.
pub async fn complete_enable(
    state: &Arc<Mutex<BotState>>,
    brain: &dyn ConfigStore,
    chat: &impl ChatProvider,
    username: &str,
) -> Result<()> {
    if let Err(e) = set_selected_username(brain, username) {
        tracing::error!("An error occurred enabling twitter monitoring: {}", e);
        return say(chat, messages::SET_USERNAME_FAILURE).await;
    }

    let enabled_rules = {
        let mut guard = state.lock().await;
        guard.monitoring = MonitoringFlag::Enabled;
        if let Err(e) = guard.save_monitoring(brain) {
            tracing::error!("Failed to persist monitoring flag: {}", e);
        }
        guard.catalog.list_enabled()
    };
    tracing::info!("Twitter monitoring enabled for account {}.", username);

    say(chat, &messages::monitoring_confirmation(username)).await?;
    say(
        chat,
        &messages::edit_tweet_instructions(messages::EDIT_TWEETS_COMMAND),
    )
    .await?;
    say(
        chat,
        &messages::edit_event_instructions(messages::EDIT_EVENTS_COMMAND),
    )
    .await?;
    chat.send_attachments(&attachments(&enabled_rules))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

pub async fn handle_disable(
    state: &Arc<Mutex<BotState>>,
    brain: &dyn ConfigStore,
    chat: &impl ChatProvider,
) -> Result<()> {
    tracing::info!("Disable twitter monitoring...");

    {
        let mut guard = state.lock().await;
        if guard.monitoring.is_already_disabled() {
            drop(guard);
            return say(chat, messages::MONITORING_NOTHING).await;
        }
        guard.monitoring = MonitoringFlag::Disabled;
        if let Err(e) = guard.save_monitoring(brain) {
            tracing::error!("Failed to persist monitoring flag: {}", e);
        }
    }

    say(chat, messages::MONITORING_DISABLED).await
}
