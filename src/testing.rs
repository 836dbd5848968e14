//! # Test Doubles
//!
//! In-memory chat provider and poster used by the unit tests.

use crate::domain::traits::{ChatProvider, TweetPoster};
use crate::domain::types::{Attachment, PostRequest};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Message(String),
    Attachments(Vec<Attachment>),
}

#[derive(Clone)]
pub struct MockChat {
    room: String,
    sent: Arc<Mutex<Vec<Sent>>>,
}

impl MockChat {
    pub fn new(room: &str) -> Self {
        Self {
            room: room.to_string(),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Message(m) => Some(m),
                Sent::Attachments(_) => None,
            })
            .collect()
    }

    pub fn last_message(&self) -> Option<String> {
        self.messages().pop()
    }

    pub fn last_attachments(&self) -> Option<Vec<Attachment>> {
        self.sent().into_iter().rev().find_map(|s| match s {
            Sent::Attachments(a) => Some(a),
            Sent::Message(_) => None,
        })
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl ChatProvider for MockChat {
    async fn send_message(&self, content: &str) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(Sent::Message(content.to_string()));
        Ok(format!("$event{}", sent.len()))
    }

    async fn send_attachments(&self, attachments: &[Attachment]) -> Result<(), String> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Attachments(attachments.to_vec()));
        Ok(())
    }

    fn room_id(&self) -> String {
        self.room.clone()
    }
}

#[derive(Default)]
pub struct RecordingPoster {
    posted: Mutex<Vec<PostRequest>>,
    fail: bool,
}

impl RecordingPoster {
    pub fn failing() -> Self {
        Self {
            posted: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn posted(&self) -> Vec<PostRequest> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TweetPoster for RecordingPoster {
    async fn post(&self, request: &PostRequest) -> Result<(), String> {
        self.posted.lock().unwrap().push(request.clone());
        if self.fail {
            return Err("tweeter unavailable".to_string());
        }
        Ok(())
    }
}
