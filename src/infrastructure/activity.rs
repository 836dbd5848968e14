//! # Activity Feed
//!
//! Reads the inbound feed as newline-delimited JSON. Activity notifications are
//! published on the bus; resolved intents are forwarded to the router.
//! Lines that do not parse are logged and skipped.

use crate::application::events::EventBus;
use crate::domain::types::{FeedItem, IntentRequest};
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedSender;

/// Parses one line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<Result<FeedItem, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// Consumes `reader` until EOF. Returns the number of activities published.
pub async fn pump<R>(reader: R, bus: EventBus, intents: UnboundedSender<IntentRequest>) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut published = 0;
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Some(Ok(FeedItem::Activity(activity))) => {
                tracing::debug!("Activity received: {:?}", activity.activity_kind);
                bus.publish(activity);
                published += 1;
            }
            Some(Ok(FeedItem::Intent(request))) => {
                tracing::debug!("Intent received: {} from {}", request.intent, request.sender);
                if intents.send(request).is_err() {
                    tracing::warn!("Intent router is gone; dropping intent.");
                }
            }
            Some(Err(e)) => tracing::warn!("Skipping malformed feed line: {}", e),
            None => {}
        }
    }
    Ok(published)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_pump_publishes_valid_lines() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let (tx, _intents) = mpsc::unbounded_channel();
        let input = b"{\"activity_id\": \"activity.app.scale\", \"robot_res\": \"scale message\"}\n\nnot json\n{\"activity_kind\": \"activity.app.crash\"}\n";

        let published = pump(&input[..], bus, tx).await.unwrap();

        assert_eq!(published, 2);
        let first = rx.recv().await.unwrap();
        assert_eq!(first.activity_kind.as_deref(), Some("activity.app.scale"));
        assert_eq!(first.context, serde_json::json!("scale message"));
        let second = rx.recv().await.unwrap();
        assert_eq!(second.activity_kind.as_deref(), Some("activity.app.crash"));
        assert!(second.context.is_null());
    }

    #[tokio::test]
    async fn test_pump_forwards_intents() {
        let bus = EventBus::new();
        let mut activities = bus.subscribe();
        let (tx, mut intents) = mpsc::unbounded_channel();
        let input = b"{\"intent\": \"twitter.monitoring.disable\", \"room\": \"!room:example.org\", \"sender\": \"@mimiron:example.org\"}\n";

        let published = pump(&input[..], bus, tx).await.unwrap();

        assert_eq!(published, 0);
        assert!(activities.try_recv().is_err());
        let request = intents.recv().await.unwrap();
        assert_eq!(request.intent, "twitter.monitoring.disable");
        assert_eq!(request.room, "!room:example.org");
        assert_eq!(request.sender, "@mimiron:example.org");
    }
}
