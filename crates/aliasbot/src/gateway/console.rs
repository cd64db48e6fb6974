use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio::sync::Mutex;

use super::Gateway;
use crate::error::{CoreError, CoreResult};
use crate::types::IncomingMessage;

/// Line-oriented gateway for local use: every non-empty input line is one
/// chat message from `user_id`.
pub struct ConsoleGateway<R, W> {
    lines: Mutex<Lines<R>>,
    writer: Mutex<W>,
    user_id: u64,
}

impl<R, W> ConsoleGateway<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W, user_id: u64) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
            writer: Mutex::new(writer),
            user_id,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<R, W> Gateway for ConsoleGateway<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn next_message(&mut self) -> CoreResult<Option<IncomingMessage>> {
        loop {
            let line = self
                .lines
                .get_mut()
                .next_line()
                .await
                .map_err(|error| CoreError::Gateway(format!("failed to read input: {error}")))?;

            match line {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return Ok(Some(IncomingMessage::from_user(line, self.user_id))),
            }
        }
    }

    async fn send_text(&self, text: &str) -> CoreResult<()> {
        let mut writer = self.writer.lock().await;
        let output = format!("{text}\n\n");
        writer
            .write_all(output.as_bytes())
            .await
            .map_err(|error| CoreError::Gateway(format!("failed to write reply: {error}")))?;
        writer
            .flush()
            .await
            .map_err(|error| CoreError::Gateway(format!("failed to flush reply: {error}")))
    }
}
