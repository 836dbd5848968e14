//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (e.g., ChatProvider, ConfigStore, TweetPoster).

pub mod activity;
pub mod brain;
pub mod matrix;
pub mod tweeter;
