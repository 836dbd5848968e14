//! # Tweet Commands
//!
//! Handles `twitter monitoring edit tweets` and `twitter monitoring list tweets`.
//! Editing only opens the conversation; the follow-up replies are handled in `conversation`.

use crate::application::catalog::attachments;
use crate::application::state::{BotState, ConversationKey, ConversationStep};
use crate::domain::traits::ChatProvider;
use crate::interface::commands::say;
use crate::strings::messages;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_edit_tweets(
    state: &Arc<Mutex<BotState>>,
    chat: &impl ChatProvider,
    sender: &str,
) -> Result<()> {
    tracing::info!("Edit a tweet...");

    let listing = {
        let mut guard = state.lock().await;
        guard.begin(
            ConversationKey::new(&chat.room_id(), sender),
            ConversationStep::AwaitingTweetChoice,
        );
        guard.catalog.numbered_listing()
    };

    say(chat, messages::EDIT_TWEETS_PROMPT).await?;
    say(chat, &listing).await
}

pub async fn handle_list_tweets(state: &Arc<Mutex<BotState>>, chat: &impl ChatProvider) -> Result<()> {
    tracing::info!("Listing tweets...");
    let items = attachments(state.lock().await.catalog.list_all());
    chat.send_attachments(&items)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::events;
    use crate::testing::MockChat;

    #[tokio::test]
    async fn test_edit_tweets_prompts_with_listing() {
        let state = Arc::new(Mutex::new(BotState::default()));
        let chat = MockChat::new("!room");

        handle_edit_tweets(&state, &chat, "@mimiron").await.unwrap();

        let replies = chat.messages();
        assert_eq!(replies[0], messages::EDIT_TWEETS_PROMPT);
        assert_eq!(
            replies[1],
            format!(
                "\n1. `App Scale`: {}\n2. `App Downtime`: {}\n3. `GitHub Deploy`: {}",
                events::SCALE_MESSAGE,
                events::CRASH_MESSAGE,
                events::DEPLOY_MESSAGE
            )
        );
        let guard = state.lock().await;
        let pending = guard
            .conversations
            .get(&ConversationKey::new("!room", "@mimiron"))
            .unwrap();
        assert_eq!(pending.step, ConversationStep::AwaitingTweetChoice);
    }

    #[tokio::test]
    async fn test_list_tweets_shows_whole_catalog() {
        let state = Arc::new(Mutex::new(BotState::default()));
        state.lock().await.catalog.set_message(1, "Our bot rocks!").unwrap();
        let chat = MockChat::new("!room");

        handle_list_tweets(&state, &chat).await.unwrap();

        let shown = chat.last_attachments().unwrap();
        assert_eq!(shown.len(), 3);
        assert_eq!(shown[0].text, "Our bot rocks!");
        assert_eq!(shown[0].title, events::SCALE_TITLE);
        assert_eq!(shown[1].text, events::CRASH_MESSAGE);
        assert_eq!(shown[2].title, events::DEPLOY_TITLE);
    }
}
