//! Chat source replaying a recorded log file.

use crate::lines::parse_line;
use async_trait::async_trait;
use nael_core::{error::NaelError, message::HostEvent, traits::ChatSource};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Feeds every line of a file through the line protocol, optionally paced.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    path: PathBuf,
    delay: Duration,
}

impl ReplaySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delay: Duration::ZERO,
        }
    }

    /// Wait `delay` between events, to watch hints appear in real time.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl ChatSource for ReplaySource {
    fn name(&self) -> &str {
        "replay"
    }

    async fn start(&self) -> Result<mpsc::Receiver<HostEvent>, NaelError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            NaelError::Channel(format!("failed to read {}: {e}", self.path.display()))
        })?;
        let events: Vec<HostEvent> = content.lines().filter_map(parse_line).collect();
        info!(
            "replay: {} events from {}",
            events.len(),
            self.path.display()
        );

        let (tx, rx) = mpsc::channel(64);
        let delay = self.delay;
        tokio::spawn(async move {
            for event in events {
                if tx.send(event).await.is_err() {
                    debug!("replay: receiver dropped, stopping");
                    break;
                }
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        });

        Ok(rx)
    }
}
