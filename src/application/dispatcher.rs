//! # Activity Dispatcher
//!
//! Turns activity notifications into post-requests.
//! The decision (`plan`) is a pure function of the bot state; `dispatch` performs
//! the side effects: handing the tweet to the poster and announcing it on the bus.

use crate::application::events::EventBus;
use crate::application::state::{BotState, selected_username};
use crate::domain::error::MonitorError;
use crate::domain::traits::{SharedBrain, TweetPoster};
use crate::domain::types::{ActivityNotification, PostRequest, TWEETED_ACTIVITY};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPlan {
    pub post: PostRequest,
    /// Secondary "a tweet went out" notification, absent for the marker kind itself.
    pub follow_up: Option<ActivityNotification>,
}

pub struct ActivityDispatcher {
    state: Arc<Mutex<BotState>>,
    brain: SharedBrain,
    poster: Arc<dyn TweetPoster>,
    bus: EventBus,
}

impl ActivityDispatcher {
    pub fn new(
        state: Arc<Mutex<BotState>>,
        brain: SharedBrain,
        poster: Arc<dyn TweetPoster>,
        bus: EventBus,
    ) -> Self {
        Self {
            state,
            brain,
            poster,
            bus,
        }
    }

    /// Decides what, if anything, to tweet for `activity`.
    pub fn plan(
        state: &BotState,
        username: Option<String>,
        activity: &ActivityNotification,
    ) -> Result<Option<DispatchPlan>, MonitorError> {
        if !state.monitoring.allows_dispatch() {
            return Ok(None);
        }

        let kind = activity
            .activity_kind
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(MonitorError::MissingActivityKind)?;

        let Some(rule) = state.catalog.first_enabled_match(kind) else {
            return Ok(None);
        };

        let follow_up = (kind != TWEETED_ACTIVITY)
            .then(|| ActivityNotification::new(TWEETED_ACTIVITY, activity.context.clone()));

        Ok(Some(DispatchPlan {
            post: PostRequest {
                context: activity.context.clone(),
                username,
                tweet: rule.message.clone(),
            },
            follow_up,
        }))
    }

    /// Handles one notification. Returns the post-request that was emitted, if any.
    pub async fn dispatch(&self, activity: &ActivityNotification) -> Option<PostRequest> {
        let username = selected_username(self.brain.as_ref());
        let plan = {
            let guard = self.state.lock().await;
            Self::plan(&guard, username, activity)
        };

        let plan = match plan {
            Ok(Some(plan)) => plan,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("{} ({})", crate::strings::logs::MISSING_ACTIVITY_KIND, e);
                return None;
            }
        };

        tracing::debug!(
            "{}",
            crate::strings::logs::tweeting(
                &plan.post.tweet,
                plan.post.username.as_deref().unwrap_or("<unset>")
            )
        );
        if let Err(e) = self.poster.post(&plan.post).await {
            tracing::error!("{}", crate::strings::logs::post_failed(&e));
        }

        if let Some(follow_up) = plan.follow_up {
            self.bus.publish(follow_up);
        }
        Some(plan.post)
    }

    /// Consumes the bus until it closes, in arrival order.
    pub async fn run(self, receiver: broadcast::Receiver<ActivityNotification>) {
        let mut stream = BroadcastStream::new(receiver);
        while let Some(item) = stream.next().await {
            match item {
                Ok(activity) => {
                    self.dispatch(&activity).await;
                }
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!("Dispatcher lagged; {} activity notifications dropped.", skipped);
                }
            }
        }
        tracing::info!("Activity bus closed; dispatcher stopping.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::monitoring::MonitoringFlag;
    use crate::application::state::set_selected_username;
    use crate::infrastructure::brain::JsonBrain;
    use crate::testing::RecordingPoster;
    use serde_json::json;
    use tempfile::TempDir;

    fn enabled_state() -> BotState {
        let mut state = BotState::default();
        state.catalog.set_enabled(&[1, 2, 3], true);
        state
    }

    #[test]
    fn test_plan_matches_enabled_rule() {
        let state = enabled_state();
        let activity = ActivityNotification::new("activity.app.crash", json!("crash message 2"));
        let plan = ActivityDispatcher::plan(&state, Some("hubot".to_string()), &activity)
            .unwrap()
            .unwrap();
        assert_eq!(plan.post.tweet, crate::strings::events::CRASH_MESSAGE);
        assert_eq!(plan.post.username.as_deref(), Some("hubot"));
        assert_eq!(plan.post.context, json!("crash message 2"));
        assert_eq!(
            plan.follow_up,
            Some(ActivityNotification::new(TWEETED_ACTIVITY, json!("crash message 2")))
        );
    }

    #[test]
    fn test_plan_drops_when_disabled_or_unmatched() {
        let mut state = enabled_state();
        let unmatched = ActivityNotification::new("activity.new", json!(null));
        assert_eq!(ActivityDispatcher::plan(&state, None, &unmatched), Ok(None));

        state.monitoring = MonitoringFlag::Disabled;
        let crash = ActivityNotification::new("activity.app.crash", json!(null));
        assert_eq!(ActivityDispatcher::plan(&state, None, &crash), Ok(None));
    }

    #[test]
    fn test_plan_skips_disabled_rule() {
        let state = BotState::default();
        let crash = ActivityNotification::new("activity.app.crash", json!(null));
        assert_eq!(ActivityDispatcher::plan(&state, None, &crash), Ok(None));
    }

    #[test]
    fn test_plan_requires_kind() {
        let state = enabled_state();
        let missing = ActivityNotification {
            activity_kind: None,
            context: json!("crash message 1"),
        };
        assert_eq!(
            ActivityDispatcher::plan(&state, None, &missing),
            Err(MonitorError::MissingActivityKind)
        );
        let empty = ActivityNotification::new("", json!(null));
        assert_eq!(
            ActivityDispatcher::plan(&state, None, &empty),
            Err(MonitorError::MissingActivityKind)
        );
    }

    #[test]
    fn test_marker_kind_has_no_follow_up() {
        let mut state = BotState::default();
        state.catalog = crate::application::catalog::EventCatalog::new(vec![
            crate::domain::types::EventRule::new(TWEETED_ACTIVITY, "Tweeted", "M"),
        ]);
        state.catalog.set_enabled(&[1], true);
        let activity = ActivityNotification::new(TWEETED_ACTIVITY, json!(null));
        let plan = ActivityDispatcher::plan(&state, None, &activity).unwrap().unwrap();
        assert_eq!(plan.post.tweet, "M");
        assert!(plan.follow_up.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_posts_once_and_announces() {
        let dir = TempDir::new().unwrap();
        let brain: SharedBrain = Arc::new(JsonBrain::open(dir.path().join("brain.json")).unwrap());
        set_selected_username(brain.as_ref(), "hubot").unwrap();

        let poster = Arc::new(RecordingPoster::default());
        let bus = EventBus::new();
        let mut observer = bus.subscribe();
        let state = Arc::new(Mutex::new(enabled_state()));
        let dispatcher = ActivityDispatcher::new(state.clone(), brain, poster.clone(), bus);

        dispatcher
            .dispatch(&ActivityNotification::new("activity.app.crash", json!("crash message 0")))
            .await;
        dispatcher
            .dispatch(&ActivityNotification::new("activity.new", json!("new activity")))
            .await;

        let posted = poster.posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].tweet, crate::strings::events::CRASH_MESSAGE);
        assert_eq!(posted[0].username.as_deref(), Some("hubot"));

        let announced = observer.try_recv().unwrap();
        assert_eq!(announced.activity_kind.as_deref(), Some(TWEETED_ACTIVITY));
        assert_eq!(announced.context, json!("crash message 0"));
        assert!(observer.try_recv().is_err());

        state.lock().await.monitoring = MonitoringFlag::Disabled;
        let dropped = dispatcher
            .dispatch(&ActivityNotification::new("activity.app.crash", json!(null)))
            .await;
        assert!(dropped.is_none());
        assert_eq!(poster.posted().len(), 1);
    }

    #[tokio::test]
    async fn test_poster_failure_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let brain: SharedBrain = Arc::new(JsonBrain::open(dir.path().join("brain.json")).unwrap());
        let poster = Arc::new(RecordingPoster::failing());
        let dispatcher = ActivityDispatcher::new(
            Arc::new(Mutex::new(enabled_state())),
            brain,
            poster.clone(),
            EventBus::new(),
        );
        let post = dispatcher
            .dispatch(&ActivityNotification::new("activity.app.scale", json!(null)))
            .await;
        assert!(post.is_some());
        assert_eq!(poster.posted().len(), 1);
    }
}
