use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::Gateway;
use crate::error::{CoreError, CoreResult};
use crate::types::IncomingMessage;

/// Scripted gateway: replays queued messages and records replies.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    incoming: VecDeque<IncomingMessage>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl MemoryGateway {
    pub fn new(incoming: impl IntoIterator<Item = IncomingMessage>) -> Self {
        Self {
            incoming: incoming.into_iter().collect(),
            sent: Arc::default(),
        }
    }

    pub fn push(&mut self, message: IncomingMessage) {
        self.incoming.push_back(message);
    }

    /// Handle that stays readable after the gateway is moved into a run loop.
    pub fn sent_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.sent)
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn next_message(&mut self) -> CoreResult<Option<IncomingMessage>> {
        Ok(self.incoming.pop_front())
    }

    async fn send_text(&self, text: &str) -> CoreResult<()> {
        self.sent
            .lock()
            .map_err(|_| CoreError::Gateway("sent message log poisoned".to_string()))?
            .push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_and_records_replies() {
        let mut gateway = MemoryGateway::new([IncomingMessage::from_user("one", 1)]);
        gateway.push(IncomingMessage::from_bot("two", 2));

        let first = gateway.next_message().await.expect("next").expect("message");
        assert_eq!(first.text, "one");
        let second = gateway.next_message().await.expect("next").expect("message");
        assert!(second.is_bot);
        assert!(gateway.next_message().await.expect("next").is_none());

        gateway.send_text("reply").await.expect("send");
        assert_eq!(gateway.sent(), vec!["reply"]);
        assert_eq!(gateway.sent_handle().lock().expect("lock").len(), 1);
    }
}
