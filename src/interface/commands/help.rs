//! # Help Command
//!
//! Handles `twitter monitoring help`.
//! Displays the command list to the user.

use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use anyhow::Result;

pub async fn handle_help(config: &AppConfig, chat: &impl ChatProvider) -> Result<()> {
    tracing::info!("Listing help twitter...");
    chat.send_message(&crate::strings::help::main(&config.system.bot_name))
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockChat;

    #[tokio::test]
    async fn test_help_lists_every_command() {
        let config = AppConfig::for_tests("{}");
        let chat = MockChat::new("!room");
        handle_help(&config, &chat).await.unwrap();

        let expected = format!(
            "\nhubot twitter monitoring enable - {}\n\
             hubot twitter monitoring disable - {}\n\
             hubot twitter monitoring edit tweets - {}\n\
             hubot twitter monitoring list tweets - {}\n\
             hubot twitter monitoring edit events - {}\n",
            crate::strings::help::ENABLE,
            crate::strings::help::DISABLE,
            crate::strings::help::EDIT_TWEETS,
            crate::strings::help::LIST_TWEETS,
            crate::strings::help::EDIT_EVENTS,
        );
        assert_eq!(chat.messages(), vec![expected]);
    }
}
