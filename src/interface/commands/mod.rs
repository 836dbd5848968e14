//! # Command Handlers
//!
//! Contains specific handler functions for each supported command
//! (help, enable/disable monitoring, edit/list tweets, edit events)
//! and the follow-up steps of multi-turn conversations.
//! These handlers are invoked by the Router.

pub mod conversation;
pub mod events;
pub mod help;
pub mod monitoring;
pub mod tweets;

use crate::domain::traits::ChatProvider;
use anyhow::Result;

/// Sends a plain reply, lifting the transport error.
pub(crate) async fn say(chat: &impl ChatProvider, text: &str) -> Result<()> {
    chat.send_message(text)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}
