//! Chat source reading the line protocol from standard input.

use crate::lines::parse_line;
use async_trait::async_trait;
use nael_core::{error::NaelError, message::HostEvent, traits::ChatSource};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Reads events from stdin until EOF.
#[derive(Debug, Default)]
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChatSource for StdinSource {
    fn name(&self) -> &str {
        "stdin"
    }

    async fn start(&self) -> Result<mpsc::Receiver<HostEvent>, NaelError> {
        let (tx, rx) = mpsc::channel(64);

        info!("stdin source listening...");

        tokio::spawn(forward_lines(BufReader::new(tokio::io::stdin()), tx));

        Ok(rx)
    }
}

/// Parse every line of `reader` and send the events on `tx`, until EOF, a
/// read error, or the receiver going away.
async fn forward_lines<R>(reader: R, tx: mpsc::Sender<HostEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let Some(event) = parse_line(&line) else {
                    continue;
                };
                if tx.send(event).await.is_err() {
                    debug!("stdin: receiver dropped, stopping");
                    break;
                }
            }
            Ok(None) => {
                info!("stdin: end of input");
                break;
            }
            Err(e) => {
                error!("stdin read error: {e}");
                break;
            }
        }
    }
}
