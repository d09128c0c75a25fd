//! Best-effort broadcast of fresh match results to live observers.
//!
//! A failed or slow broadcast is logged and dropped; it never fails or stalls
//! the match request.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::matching::models::{MatchCriteria, MatchResult};

/// Payload published for each completed match request.
#[derive(Debug, Clone, Serialize)]
pub struct MatchEvent<'a> {
    pub matches: &'a [MatchResult],
    pub criteria: &'a MatchCriteria,
}

#[async_trait]
pub trait MatchSink: Send + Sync {
    async fn publish(&self, event: &MatchEvent<'_>) -> Result<()>;
}

/// Used when broadcasting is disabled.
pub struct NoopMatchSink;

#[async_trait]
impl MatchSink for NoopMatchSink {
    async fn publish(&self, _event: &MatchEvent<'_>) -> Result<()> {
        Ok(())
    }
}

/// Publishes events as JSON on a Redis pub/sub channel.
///
/// The connection is opened on first publish rather than at startup, so an
/// unreachable Redis never blocks boot. Once open, `ConnectionManager`
/// reconnects on its own.
pub struct RedisMatchSink {
    client: redis::Client,
    channel: String,
    connection: OnceCell<ConnectionManager>,
}

impl RedisMatchSink {
    pub fn new(client: redis::Client, channel: impl Into<String>) -> Self {
        Self {
            client,
            channel: channel.into(),
            connection: OnceCell::new(),
        }
    }

    async fn connection(&self) -> redis::RedisResult<ConnectionManager> {
        self.connection
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await
            .cloned()
    }
}

#[async_trait]
impl MatchSink for RedisMatchSink {
    async fn publish(&self, event: &MatchEvent<'_>) -> Result<()> {
        let payload = serde_json::to_string(event)?;
        let mut conn = self.connection().await?;
        let receivers: i64 = conn.publish(&self.channel, payload).await?;
        debug!(
            "Published {} matches on '{}' to {receivers} subscribers",
            event.matches.len(),
            self.channel
        );
        Ok(())
    }
}

/// Publishes `event`, logging instead of propagating any failure. Gives up
/// after `timeout`.
pub async fn broadcast_best_effort(sink: &dyn MatchSink, event: &MatchEvent<'_>, timeout: Duration) {
    match tokio::time::timeout(timeout, sink.publish(event)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("Match broadcast skipped: {e:#}"),
        Err(_) => warn!("Match broadcast skipped: no response within {timeout:?}"),
    }
}
