//! # Tweeter Transport
//!
//! Hands post-requests to the external tweeter service.
//! `WebhookPoster` POSTs the request as JSON; `LogPoster` only logs it and is used
//! when no endpoint is configured.

use crate::domain::config::TweeterConfig;
use crate::domain::traits::TweetPoster;
use crate::domain::types::PostRequest;
use async_trait::async_trait;
use std::sync::Arc;

pub struct WebhookPoster {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl WebhookPoster {
    pub fn new(endpoint: String, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            token,
        }
    }
}

#[async_trait]
impl TweetPoster for WebhookPoster {
    async fn post(&self, request: &PostRequest) -> Result<(), String> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        let resp = builder.send().await.map_err(|e| e.to_string())?;
        if !resp.status().is_success() {
            return Err(format!("tweeter responded with {}", resp.status()));
        }
        tracing::info!(
            "Tweet handed to tweeter for {}",
            request.username.as_deref().unwrap_or("<unset>")
        );
        Ok(())
    }
}

pub struct LogPoster;

#[async_trait]
impl TweetPoster for LogPoster {
    async fn post(&self, request: &PostRequest) -> Result<(), String> {
        tracing::info!(
            "[tweet] @{}: {}",
            request.username.as_deref().unwrap_or("<unset>"),
            request.tweet
        );
        Ok(())
    }
}

pub fn from_config(config: &TweeterConfig) -> Arc<dyn TweetPoster> {
    match &config.endpoint {
        Some(endpoint) => Arc::new(WebhookPoster::new(endpoint.clone(), config.token.clone())),
        None => {
            tracing::warn!("No tweeter endpoint configured; tweets will only be logged.");
            Arc::new(LogPoster)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_log_poster_accepts_everything() {
        let request = PostRequest {
            context: json!(null),
            username: None,
            tweet: "hello".to_string(),
        };
        assert!(LogPoster.post(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_webhook_poster_reports_connection_errors() {
        let poster = WebhookPoster::new("http://127.0.0.1:9/tweet".to_string(), None);
        let request = PostRequest {
            context: json!({"room": "!room"}),
            username: Some("hubot".to_string()),
            tweet: "hello".to_string(),
        };
        assert!(poster.post(&request).await.is_err());
    }
}
