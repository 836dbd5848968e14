//! # Log Strings
//!
//! Templates for tracing output that is shared between modules.

pub fn regex_match(id: &str) -> String {
    format!("{id} Reg Ex match.")
}

pub fn intent_match(id: &str) -> String {
    format!("{id} Natural Language match.")
}

pub fn tweeting(message: &str, username: &str) -> String {
    format!("tweeting event message {message} for user {username}.")
}

pub const MISSING_ACTIVITY_KIND: &str = "Activity ID was not supplied in bot activity payload.";

pub fn post_failed(err: &str) -> String {
    format!("Failed to hand tweet to the tweeter: {err}")
}

pub fn conversation_expired(room: &str, sender: &str) -> String {
    format!("Conversation with {sender} in {room} expired.")
}
