//! # Event Commands
//!
//! Handles `twitter monitoring edit events`: shows the catalog and waits
//! for an `enable 1,2` / `disable 3` reply.

use crate::application::state::{BotState, ConversationKey, ConversationStep};
use crate::domain::traits::ChatProvider;
use crate::interface::commands::say;
use crate::strings::messages;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_edit_events(
    state: &Arc<Mutex<BotState>>,
    chat: &impl ChatProvider,
    sender: &str,
) -> Result<()> {
    tracing::info!("Listing twitter events...");

    let prompt = {
        let mut guard = state.lock().await;
        guard.begin(
            ConversationKey::new(&chat.room_id(), sender),
            ConversationStep::AwaitingEventToggle,
        );
        format!(
            "{}{}",
            messages::edit_events_prompt(messages::EDIT_EVENTS_EXAMPLE),
            guard.catalog.numbered_listing()
        )
    };

    say(chat, &prompt).await
}
