//! # Application Layer
//!
//! Contains the core business logic and orchestration of the bot.
//! This includes the event catalog, the monitoring toggle, command routing,
//! activity dispatch and state management.

pub mod accounts;
pub mod catalog;
pub mod dispatcher;
pub mod events;
pub mod monitoring;
pub mod parsing;
pub mod router;
pub mod state;
