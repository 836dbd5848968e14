//! # Help Text
//!
//! Help message for the twitter monitoring commands.
//! Displayed to the user via `twitter monitoring help`.

pub const ENABLE: &str = "Enables the ability to post tweets.";
pub const DISABLE: &str = "Disables the ability to post tweets.";
pub const EDIT_TWEETS: &str =
    "Allows user to edit what the bot will post based on action received.";
pub const LIST_TWEETS: &str = "Shows the list of events the bot can react to, and the message posted for each.";
pub const EDIT_EVENTS: &str = "Allows user to edit which events the bot will post about.";

/// Command list prefixed with the bot's name, one per line.
pub fn main(bot_name: &str) -> String {
    let entries = [
        ("twitter monitoring enable", ENABLE),
        ("twitter monitoring disable", DISABLE),
        ("twitter monitoring edit tweets", EDIT_TWEETS),
        ("twitter monitoring list tweets", LIST_TWEETS),
        ("twitter monitoring edit events", EDIT_EVENTS),
    ];
    let mut help = String::from("\n");
    for (command, description) in entries {
        help.push_str(&format!("{bot_name} {command} - {description}\n"));
    }
    help
}
