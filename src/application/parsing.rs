//! # Parsing Utils
//!
//! Utilities for parsing user replies: bulk index lists, numbered choices,
//! the `enable 1,2` / `disable 3` toggle syntax, and bot mentions.

use crate::domain::error::MonitorError;
use regex::Regex;
use std::sync::LazyLock;

static EDIT_EVENTS_REPLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(enable|disable)\s*((\d+,?\s*)+)").unwrap());

static INDEX_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,]+").unwrap());

/// Parses a single token as an index in `[min, max]`.
pub fn parse_index_token(token: &str, min: usize, max: usize) -> Result<usize, MonitorError> {
    let index: usize = token
        .trim()
        .parse()
        .map_err(|_| MonitorError::MalformedIndexToken(token.to_string()))?;
    if index < min || index > max {
        return Err(MonitorError::IndexOutOfRange { index, len: max });
    }
    Ok(index)
}

/// Splits on whitespace or commas and keeps the tokens that are valid indices.
/// Bad tokens are dropped; duplicates keep their first position.
pub fn parse_index_list(input: &str, min: usize, max: usize) -> Vec<usize> {
    let mut indices = Vec::new();
    for token in INDEX_SEPARATOR.split(input).filter(|t| !t.is_empty()) {
        match parse_index_token(token, min, max) {
            Ok(index) if !indices.contains(&index) => indices.push(index),
            Ok(_) => {}
            Err(e) => tracing::debug!("Dropping index token '{}': {}", token, e),
        }
    }
    indices
}

/// A reply that must be exactly one number in `[1, max]`.
pub fn parse_numbered_choice(input: &str, max: usize) -> Option<usize> {
    parse_index_token(input, 1, max).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRequest {
    pub enable: bool,
    pub indices: Vec<usize>,
}

/// Parses `enable 1, 15` / `disable 1 2` replies. `None` if the reply does not match.
pub fn parse_toggle_request(input: &str, max: usize) -> Option<ToggleRequest> {
    let caps = EDIT_EVENTS_REPLY.captures(input)?;
    let enable = caps.get(1)?.as_str().eq_ignore_ascii_case("enable");
    let indices = parse_index_list(caps.get(2)?.as_str(), 1, max);
    Some(ToggleRequest { enable, indices })
}

/// The text after a leading mention of the bot (`@hubot`, `hubot:`), or `None`
/// when the message is not addressed to the bot.
pub fn addressed_remainder<'a>(input: &'a str, bot_name: &str) -> Option<&'a str> {
    let trimmed = input.trim();
    let without_at = trimmed.strip_prefix('@').unwrap_or(trimmed);
    let prefix = without_at.get(..bot_name.len())?;
    if !prefix.eq_ignore_ascii_case(bot_name) {
        return None;
    }
    let rest = &without_at[bot_name.len()..];
    if rest.is_empty() || rest.starts_with([':', ',', ' ']) {
        Some(rest.trim_start_matches([':', ',']).trim())
    } else {
        None
    }
}

/// Removes a leading mention of the bot from a reply, if there is one.
pub fn strip_mention<'a>(input: &'a str, bot_name: &str) -> &'a str {
    addressed_remainder(input, bot_name).unwrap_or_else(|| input.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_token_errors() {
        assert_eq!(parse_index_token("2", 1, 3), Ok(2));
        assert_eq!(
            parse_index_token("x", 1, 3),
            Err(MonitorError::MalformedIndexToken("x".to_string()))
        );
        assert_eq!(
            parse_index_token("15", 1, 3),
            Err(MonitorError::IndexOutOfRange { index: 15, len: 3 })
        );
    }

    #[test]
    fn test_parse_index_list_is_lenient() {
        assert_eq!(parse_index_list("1, 15", 1, 3), vec![1]);
        assert_eq!(parse_index_list("1 2 3", 1, 3), vec![1, 2, 3]);
        assert_eq!(parse_index_list("3,1,,abc 0", 1, 3), vec![3, 1]);
        assert_eq!(parse_index_list("2 2 1", 1, 3), vec![2, 1]);
        assert!(parse_index_list("  ", 1, 3).is_empty());
    }

    #[test]
    fn test_parse_numbered_choice() {
        assert_eq!(parse_numbered_choice(" 2 ", 2), Some(2));
        assert_eq!(parse_numbered_choice("3", 2), None);
        assert_eq!(parse_numbered_choice("two", 2), None);
    }

    #[test]
    fn test_parse_toggle_request() {
        assert_eq!(
            parse_toggle_request("enable 1, 15", 3),
            Some(ToggleRequest { enable: true, indices: vec![1] })
        );
        assert_eq!(
            parse_toggle_request("Disable 1 2", 3),
            Some(ToggleRequest { enable: false, indices: vec![1, 2] })
        );
        assert_eq!(parse_toggle_request("enable all", 3), None);
        assert_eq!(
            parse_toggle_request("enable 9", 3),
            Some(ToggleRequest { enable: true, indices: vec![] })
        );
    }

    #[test]
    fn test_strip_mention() {
        assert_eq!(strip_mention("@hubot 2", "hubot"), "2");
        assert_eq!(strip_mention("hubot: enable 1", "hubot"), "enable 1");
        assert_eq!(strip_mention("  Our bot rocks!", "hubot"), "Our bot rocks!");
        assert_eq!(strip_mention("hubots unite", "hubot"), "hubots unite");
    }

    #[test]
    fn test_addressed_remainder() {
        assert_eq!(
            addressed_remainder("@hubot twitter monitoring stop", "hubot"),
            Some("twitter monitoring stop")
        );
        assert_eq!(addressed_remainder("Hubot, help", "hubot"), Some("help"));
        assert_eq!(addressed_remainder("twitter monitoring stop", "hubot"), None);
        assert_eq!(addressed_remainder("ask hubot: twitter monitoring stop", "hubot"), None);
        assert_eq!(addressed_remainder("hubots unite", "hubot"), None);
    }
}
