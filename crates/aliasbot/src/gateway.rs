//! Messaging gateways: where chat messages come from and replies go to.

pub mod console;
pub mod memory;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::IncomingMessage;

pub use console::ConsoleGateway;
pub use memory::MemoryGateway;

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Next incoming message, or `None` once the source is exhausted.
    async fn next_message(&mut self) -> CoreResult<Option<IncomingMessage>>;

    /// Send a reply to where the last message came from.
    async fn send_text(&self, text: &str) -> CoreResult<()>;
}
