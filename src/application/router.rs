//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! Commands must be addressed to the bot (`@hubot twitter monitoring ...`) and are
//! recognised by regular expression right after the mention, or arrive as
//! natural-language intent ids from a classifier. Messages that are not commands
//! are offered to the sender's suspended command, if any.

use anyhow::Result;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tokio::sync::Mutex;

use crate::application::parsing::addressed_remainder;
use crate::application::state::{BotState, ConversationKey};
use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, SharedBrain};
use crate::interface::commands;
use crate::interface::commands::conversation::StepOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Enable,
    Disable,
    EditTweets,
    ListTweets,
    EditEvents,
}

static COMMANDS: LazyLock<Vec<(Regex, Command)>> = LazyLock::new(|| {
    [
        (r"(?i)^twitter\s+monitoring\s+help", Command::Help),
        (r"(?i)^twitter\s+monitoring\s+(enable|start)", Command::Enable),
        (r"(?i)^twitter\s+monitoring\s+(disable|stop)", Command::Disable),
        (r"(?i)^twitter\s+monitoring\s+(edit|change)\s*(tweets)", Command::EditTweets),
        (r"(?i)^twitter\s+monitoring\s+(list|show)\s*(tweets)", Command::ListTweets),
        (r"(?i)^twitter\s+monitoring\s+(edit|update)\s*(events)", Command::EditEvents),
    ]
    .into_iter()
    .map(|(pattern, command)| (Regex::new(pattern).unwrap(), command))
    .collect()
});

impl Command {
    /// Intent id shared by the regex and natural-language entry points.
    pub fn id(&self) -> &'static str {
        match self {
            Command::Help => "twitter.monitoring.help",
            Command::Enable => "twitter.monitoring.enable",
            Command::Disable => "twitter.monitoring.disable",
            Command::EditTweets => "twitter.tweet.edit",
            Command::ListTweets => "twitter.tweet.list",
            Command::EditEvents => "twitter.event.list",
        }
    }

    pub fn from_intent(id: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .map(|(_, command)| *command)
            .find(|command| command.id() == id)
    }

    /// First command whose pattern starts `text` (the message with the mention removed).
    pub fn parse(text: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|(regex, _)| regex.is_match(text))
            .map(|(_, command)| *command)
    }
}

pub struct CommandRouter {
    config: AppConfig,
    state: Arc<Mutex<BotState>>,
    brain: SharedBrain,
}

impl CommandRouter {
    pub fn new(config: AppConfig, state: Arc<Mutex<BotState>>, brain: SharedBrain) -> Self {
        Self {
            config,
            state,
            brain,
        }
    }

    pub async fn route<C>(&self, chat: &C, message: &str, sender: &str) -> Result<()>
    where
        C: ChatProvider,
    {
        let msg = message.trim();
        tracing::debug!("Router received '{}' from '{}'", msg, sender);

        let command =
            addressed_remainder(msg, &self.config.system.bot_name).and_then(Command::parse);
        match command {
            Some(command) => {
                tracing::debug!("{}", crate::strings::logs::regex_match(command.id()));
                self.drop_pending(chat, sender, command).await;
                self.execute(command, chat, sender).await
            }
            None => {
                let outcome = commands::conversation::handle_step(
                    &self.config,
                    &self.state,
                    self.brain.as_ref(),
                    chat,
                    sender,
                    msg,
                )
                .await?;
                if outcome == StepOutcome::NotInConversation {
                    tracing::trace!("Ignoring message without command from {}", sender);
                }
                Ok(())
            }
        }
    }

    /// Entry point for a natural-language classifier that already resolved the intent.
    pub async fn route_intent<C>(&self, chat: &C, intent_id: &str, sender: &str) -> Result<()>
    where
        C: ChatProvider,
    {
        let Some(command) = Command::from_intent(intent_id) else {
            tracing::warn!("Unknown intent '{}'", intent_id);
            return Ok(());
        };
        tracing::debug!("{}", crate::strings::logs::intent_match(command.id()));
        self.drop_pending(chat, sender, command).await;
        self.execute(command, chat, sender).await
    }

    /// A new command replaces whatever this sender was in the middle of.
    async fn drop_pending<C>(&self, chat: &C, sender: &str, command: Command)
    where
        C: ChatProvider,
    {
        let key = ConversationKey::new(&chat.room_id(), sender);
        if self.state.lock().await.conversations.remove(&key).is_some() {
            tracing::info!("Dropping pending conversation of {} for {}", sender, command.id());
        }
    }

    async fn execute<C>(&self, command: Command, chat: &C, sender: &str) -> Result<()>
    where
        C: ChatProvider,
    {
        let brain = self.brain.as_ref();
        match command {
            Command::Help => commands::help::handle_help(&self.config, chat).await,
            Command::Enable => {
                commands::monitoring::handle_enable(&self.config, &self.state, brain, chat, sender)
                    .await
            }
            Command::Disable => commands::monitoring::handle_disable(&self.state, brain, chat).await,
            Command::EditTweets => commands::tweets::handle_edit_tweets(&self.state, chat, sender).await,
            Command::ListTweets => commands::tweets::handle_list_tweets(&self.state, chat).await,
            Command::EditEvents => commands::events::handle_edit_events(&self.state, chat, sender).await,
        }
    }
}
