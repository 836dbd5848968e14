//! # Event Strings
//!
//! Default titles and tweets for the event catalog.

pub const SCALE_TITLE: &str = "App Scale";
pub const SCALE_MESSAGE: &str = "Our app just scaled up to keep up with demand!";

pub const CRASH_TITLE: &str = "App Downtime";
pub const CRASH_MESSAGE: &str =
    "We are experiencing some downtime. Our team is on it and we will be back shortly.";

pub const DEPLOY_TITLE: &str = "GitHub Deploy";
pub const DEPLOY_MESSAGE: &str = "A new version of our app was just deployed from GitHub!";
