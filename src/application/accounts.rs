//! # Twitter Accounts
//!
//! Parses the accounts descriptor (a JSON object of account name to credentials)
//! and decides whether the user has to be asked which account to post from.

use crate::domain::error::MonitorError;
use crate::domain::types::AccountCredentials;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub credentials: AccountCredentials,
}

/// Accounts in the order they appear in the descriptor.
pub fn parse_accounts(descriptor: Option<&str>) -> Result<Vec<Account>, MonitorError> {
    let raw = descriptor.ok_or(MonitorError::NoAccounts)?;
    let map: Map<String, Value> =
        serde_json::from_str(raw).map_err(|e| MonitorError::InvalidAccounts(e.to_string()))?;

    map.into_iter()
        .map(|(name, value)| {
            let credentials: AccountCredentials = serde_json::from_value(value)
                .map_err(|e| MonitorError::InvalidAccounts(format!("{name}: {e}")))?;
            if credentials.access_token.is_empty() || credentials.access_token_secret.is_empty() {
                return Err(MonitorError::InvalidAccounts(format!("{name}: empty credentials")));
            }
            Ok(Account { name, credentials })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSelection {
    /// Exactly one account; no need to ask.
    Automatic(String),
    /// The user must pick one of these names by number.
    Prompt(Vec<String>),
}

pub fn plan_selection(accounts: &[Account]) -> Result<AccountSelection, MonitorError> {
    match accounts {
        [] => Err(MonitorError::NoAccounts),
        [only] => Ok(AccountSelection::Automatic(only.name.clone())),
        many => Ok(AccountSelection::Prompt(
            many.iter().map(|a| a.name.clone()).collect(),
        )),
    }
}

/// "\n1. name" per account, appended to the selection prompt.
pub fn numbered_names(names: &[String]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("\n{}. {}", i + 1, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &str = r#"{"hubot": {"access_token": "foo", "access_token_secret": "bar"}, "bluebot": {"access_token": "foo", "access_token_secret": "bar"}}"#;

    #[test]
    fn test_accounts_keep_descriptor_order() {
        let accounts = parse_accounts(Some(TWO)).unwrap();
        let names: Vec<&str> = accounts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["hubot", "bluebot"]);
        assert_eq!(accounts[0].credentials.access_token, "foo");
    }

    #[test]
    fn test_single_account_is_automatic() {
        let accounts = parse_accounts(Some(
            r#"{"hubot": {"access_token": "foo", "access_token_secret": "bar"}}"#,
        ))
        .unwrap();
        assert_eq!(
            plan_selection(&accounts),
            Ok(AccountSelection::Automatic("hubot".to_string()))
        );
    }

    #[test]
    fn test_multiple_accounts_prompt() {
        let accounts = parse_accounts(Some(TWO)).unwrap();
        let selection = plan_selection(&accounts).unwrap();
        let AccountSelection::Prompt(names) = selection else {
            panic!("expected a prompt");
        };
        assert_eq!(numbered_names(&names), "\n1. hubot\n2. bluebot");
    }

    #[test]
    fn test_missing_or_bad_descriptor() {
        assert_eq!(parse_accounts(None), Err(MonitorError::NoAccounts));
        assert!(matches!(
            parse_accounts(Some("not json")),
            Err(MonitorError::InvalidAccounts(_))
        ));
        assert!(matches!(
            parse_accounts(Some(r#"{"hubot": {"access_token": "foo"}}"#)),
            Err(MonitorError::InvalidAccounts(_))
        ));
        assert!(matches!(
            parse_accounts(Some(r#"{"hubot": {"access_token": "", "access_token_secret": "bar"}}"#)),
            Err(MonitorError::InvalidAccounts(_))
        ));
        assert_eq!(plan_selection(&[]), Err(MonitorError::NoAccounts));
    }
}
