//! # Interface Layer
//!
//! User-facing entry points: command handlers invoked by the router.

pub mod commands;
