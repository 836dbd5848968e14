//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes confirmations, prompts and failure notices.

pub const EDIT_TWEETS_COMMAND: &str = "twitter monitoring edit tweets";
pub const EDIT_EVENTS_COMMAND: &str = "twitter monitoring edit events";

pub const MONITORING_ALREADY: &str = "Twitter monitoring is already enabled.";
pub const MONITORING_NOTHING: &str =
    "Twitter monitoring is not enabled, so there is nothing to disable.";
pub const MONITORING_DISABLED: &str =
    "Twitter monitoring is disabled. No more tweets will be posted.";

pub fn monitoring_confirmation(username: &str) -> String {
    format!("Twitter monitoring is enabled. Tweets will be posted as @{username}.")
}

pub fn edit_tweet_instructions(command: &str) -> String {
    format!("To change what will be tweeted for an event, say `{command}`.")
}

pub fn edit_event_instructions(command: &str) -> String {
    format!("To choose which events will be tweeted, say `{command}`.")
}

pub const SET_USERNAME_PROMPT: &str =
    "Which Twitter account should post the tweets? Respond with the number.";
pub const SET_USERNAME_FAILURE: &str =
    "Unable to set the Twitter account. Twitter monitoring was not enabled.";

pub const EDIT_TWEETS_PROMPT: &str =
    "Which tweet would you like to change? Respond with the number.";
pub const MESSAGE_PROMPT: &str = "What should the new tweet say?";

pub fn message_new(message: &str) -> String {
    format!("Got it. The new tweet will be: {message}")
}

pub fn edit_events_prompt(example: &str) -> String {
    format!("Which events should be tweeted? Respond with something like {example}.")
}

pub const EDIT_EVENTS_EXAMPLE: &str = "'enable 1,2,3' or 'disable 1 2'";

pub fn events_enabled(list: &str) -> String {
    format!("Tweets are now enabled for {list}.")
}

pub fn events_disabled(list: &str) -> String {
    format!("Tweets are now disabled for {list}.")
}

pub const NO_VALID_EVENTS: &str = "None of those numbers match an event. Nothing was changed.";

pub fn numbered_choice_retry(max: usize) -> String {
    format!("Please respond with a number between 1 and {max}, or `exit` to stop.")
}

pub const EDIT_EVENTS_RETRY: &str =
    "Please respond with `enable` or `disable` followed by event numbers, or `exit` to stop.";

pub const CONVERSATION_CANCELLED: &str = "Okay, I stopped. Nothing was changed.";
pub const CONVERSATION_EXPIRED: &str = "I didn't hear back in time. Nothing was changed.";
