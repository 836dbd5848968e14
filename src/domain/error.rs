//! # Domain Errors
//!
//! Failure kinds of the monitoring engine. Handlers turn these into chat replies;
//! only `MissingActivityKind` stays internal.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MonitorError {
    #[error("index {index} is outside 1..={len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("'{0}' is not a number")]
    MalformedIndexToken(String),

    #[error("account selection was aborted")]
    AccountSelectionAborted,

    #[error("activity notification has no activity kind")]
    MissingActivityKind,

    #[error("no twitter accounts are configured")]
    NoAccounts,

    #[error("twitter accounts descriptor is invalid: {0}")]
    InvalidAccounts(String),
}
