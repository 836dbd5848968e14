//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the `matrix_sdk`.
//! This module acts as the bridge between the generic `ChatProvider` interface used by the bot's core logic
//! and the specific implementation details of the Matrix SDK.

use crate::domain::traits::ChatProvider;
use crate::domain::types::{Attachment, palette};
use async_trait::async_trait;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

/// Markdown rendering of attachments; Matrix has no native equivalent.
pub fn render_attachments(attachments: &[Attachment]) -> String {
    attachments
        .iter()
        .map(|a| {
            let marker = if a.color == palette::POSITIVE { "🟢" } else { "🔵" };
            format!("{} **{}**\n> {}", marker, a.title, a.text)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn send_attachments(&self, attachments: &[Attachment]) -> Result<(), String> {
        if attachments.is_empty() {
            return Ok(());
        }
        self.send_message(&render_attachments(attachments))
            .await
            .map(|_| ())
    }
}
