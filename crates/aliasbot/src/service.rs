use command_parser::{CommandParser, ParseOutcome};

use crate::config::BotSettings;
use crate::error::{CoreError, CoreResult};
use tracing::Level;
use crate::gateway::Gateway;
use crate::routing::{AliasLimits, CommandRouter};
use crate::storage::SharedAliasStore;
use crate::types::IncomingMessage;

const FAILURE_REPLY: &str =
    "Something went wrong while handling that command. Please try again later.";

/// The alias bot: parses each message, answers commands, and replays stored
/// aliases when a message matches a key.
pub struct AliasBot {
    parser: CommandParser,
    router: CommandRouter,
    trigger_aliases: bool,
}

impl AliasBot {
    pub fn new(parser: CommandParser, router: CommandRouter, trigger_aliases: bool) -> Self {
        Self {
            parser,
            router,
            trigger_aliases,
        }
    }

    pub fn from_settings(settings: &BotSettings, store: SharedAliasStore) -> Self {
        Self::new(
            CommandParser::new(settings.prefix.as_str()),
            CommandRouter::new(store, AliasLimits::from(settings)),
            settings.trigger_aliases,
        )
    }

    /// Reply for one message, or `None` to stay silent.
    pub async fn handle(&self, message: &IncomingMessage) -> CoreResult<Option<String>> {
        if message.is_bot {
            return Ok(None);
        }

        match self.parser.parse(&message.text) {
            ParseOutcome::NoMatch => self.replay_alias(&message.text).await,
            ParseOutcome::ParseError { message: reply, kind } => {
                tracing::debug!(%kind, "rejected malformed command");
                Ok(Some(reply))
            }
            ParseOutcome::Parsed(command) => {
                tracing::debug!(
                    sub_command = %command.sub_command,
                    args = command.args.len(),
                    "parsed command"
                );
                let reply = self.router.route(&command, message.author_id).await?;
                Ok(Some(reply))
            }
        }
    }

    async fn replay_alias(&self, text: &str) -> CoreResult<Option<String>> {
        if !self.trigger_aliases {
            return Ok(None);
        }
        let alias = self.router.store().get_and_increment_usage(text).await?;
        Ok(alias.map(|alias| alias.message))
    }

    /// Serve `gateway` until it runs out of messages.
    ///
    /// A failure while handling one message is logged and answered with a
    /// generic reply; gateway failures end the loop.
    pub async fn run(&self, gateway: &mut dyn Gateway) -> CoreResult<()> {
        while let Some(message) = gateway.next_message().await? {
            let reply = match self.handle(&message).await {
                Ok(reply) => reply,
                Err(error) => {
                    log_failure(&error);
                    Some(FAILURE_REPLY.to_string())
                }
            };

            if let Some(reply) = reply {
                gateway.send_text(&reply).await?;
            }
        }

        tracing::info!("gateway closed, stopping");
        Ok(())
    }
}

/// Store failures are expected operational noise; anything else is a bug.
fn failure_level(error: &CoreError) -> Level {
    match error {
        CoreError::Storage(_) => Level::WARN,
        _ => Level::ERROR,
    }
}

fn log_failure(error: &CoreError) {
    if failure_level(error) == Level::WARN {
        tracing::warn!("store failure while handling message: {error}");
    } else {
        tracing::error!("failed to handle message: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryGateway;
    use crate::storage::{AliasStore, MemoryAliasStore};
    use crate::types::MessageAlias;
    use async_trait::async_trait;
    use std::sync::Arc;

    fn bot() -> (AliasBot, Arc<MemoryAliasStore>) {
        let store = Arc::new(MemoryAliasStore::new());
        let bot = AliasBot::from_settings(&BotSettings::default(), store.clone());
        (bot, store)
    }

    async fn handle(bot: &AliasBot, text: &str) -> Option<String> {
        bot.handle(&IncomingMessage::from_user(text, 1))
            .await
            .expect("handle")
    }

    #[tokio::test]
    async fn ignores_bots_entirely() {
        let (bot, store) = bot();
        store
            .save(MessageAlias::new("ping", "pong", 1))
            .await
            .expect("save");

        for text in ["g!alias help", "g!alias make broken", "ping"] {
            let reply = bot
                .handle(&IncomingMessage::from_bot(text, 2))
                .await
                .expect("handle");
            assert!(reply.is_none(), "bot message {text:?} got a reply");
        }
        let alias = store.get("ping").await.expect("get").expect("alias");
        assert_eq!(alias.usage_count, 0);
    }

    #[tokio::test]
    async fn plain_chat_is_silent() {
        let (bot, _) = bot();
        assert!(handle(&bot, "good morning").await.is_none());
    }

    #[tokio::test]
    async fn parse_error_is_replied_verbatim() {
        let (bot, _) = bot();
        let input = r#"g!alias make key "value""#;
        let expected = command_parser::parse(input)
            .error_message()
            .expect("error")
            .to_string();
        assert_eq!(handle(&bot, input).await, Some(expected));
    }

    #[tokio::test]
    async fn make_then_trigger() {
        let (bot, store) = bot();
        let created = handle(&bot, r#"g!alias make "ping" "pong""#).await;
        assert_eq!(created.as_deref(), Some("Created alias \"ping\"."));

        assert_eq!(handle(&bot, "ping").await.as_deref(), Some("pong"));
        assert_eq!(handle(&bot, "ping").await.as_deref(), Some("pong"));
        assert!(handle(&bot, "ping!").await.is_none());

        let alias = store.get("ping").await.expect("get").expect("alias");
        assert_eq!(alias.usage_count, 2);
        assert_eq!(alias.creator_id, 1);
    }

    #[tokio::test]
    async fn trigger_can_be_disabled() {
        let store = Arc::new(MemoryAliasStore::new());
        let settings = BotSettings {
            trigger_aliases: false,
            ..BotSettings::default()
        };
        let bot = AliasBot::from_settings(&settings, store.clone());
        store
            .save(MessageAlias::new("ping", "pong", 1))
            .await
            .expect("save");
        assert!(handle(&bot, "ping").await.is_none());
    }

    #[tokio::test]
    async fn bare_prefix_shows_help() {
        let (bot, _) = bot();
        let reply = handle(&bot, "g!alias").await.expect("reply");
        assert!(reply.contains("= subcommands ="));
    }

    #[tokio::test]
    async fn run_answers_until_gateway_ends() {
        let (bot, _) = bot();
        let mut gateway = MemoryGateway::new([
            IncomingMessage::from_user(r#"g!alias make "hi" "hello there""#, 5),
            IncomingMessage::from_user("just chatting", 5),
            IncomingMessage::from_bot("hi", 6),
            IncomingMessage::from_user("hi", 5),
            IncomingMessage::from_user(r#"g!alias delete "hi"#, 5),
        ]);

        bot.run(&mut gateway).await.expect("run");

        let sent = gateway.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0], "Created alias \"hi\".");
        assert_eq!(sent[1], "hello there");
        assert!(sent[2].contains("Unexpected end of text"));
    }

    struct BrokenStore;

    #[async_trait]
    impl AliasStore for BrokenStore {
        async fn save(&self, _alias: MessageAlias) -> CoreResult<()> {
            Err(CoreError::Storage("disk full".to_string()))
        }
        async fn insert_if_absent(&self, _alias: MessageAlias) -> CoreResult<bool> {
            Err(CoreError::Storage("disk full".to_string()))
        }
        async fn get(&self, _key: &str) -> CoreResult<Option<MessageAlias>> {
            Ok(None)
        }
        async fn get_and_increment_usage(&self, _key: &str) -> CoreResult<Option<MessageAlias>> {
            Err(CoreError::Storage("offline".to_string()))
        }
        async fn delete(&self, _key: &str) -> CoreResult<bool> {
            Ok(false)
        }
        async fn list(&self, _offset: usize, _limit: usize) -> CoreResult<Vec<MessageAlias>> {
            Ok(Vec::new())
        }
        async fn len(&self) -> CoreResult<usize> {
            Ok(0)
        }
        async fn top_by_usage(&self, _n: usize) -> CoreResult<Vec<MessageAlias>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn store_failures_surface_as_errors() {
        let bot = AliasBot::from_settings(&BotSettings::default(), Arc::new(BrokenStore));
        let err = bot
            .handle(&IncomingMessage::from_user(r#"g!alias make "k" "v""#, 1))
            .await
            .expect_err("store failure");
        assert!(matches!(err, CoreError::Storage(ref msg) if msg == "disk full"));
    }

    #[tokio::test]
    async fn run_keeps_going_after_store_failure() {
        let bot = AliasBot::from_settings(&BotSettings::default(), Arc::new(BrokenStore));
        let mut gateway = MemoryGateway::new([
            IncomingMessage::from_user("anything", 1),
            IncomingMessage::from_user("g!alias status", 1),
        ]);

        bot.run(&mut gateway).await.expect("run");

        let sent = gateway.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], FAILURE_REPLY);
        assert_eq!(sent[1], "```\nRegistered aliases: 0\n```");
    }

    #[test]
    fn store_failures_log_below_internal_faults() {
        assert_eq!(
            failure_level(&CoreError::Storage("disk full".to_string())),
            Level::WARN
        );
        assert_eq!(
            failure_level(&CoreError::Internal("bug".to_string())),
            Level::ERROR
        );
        assert_eq!(
            failure_level(&CoreError::Gateway("closed".to_string())),
            Level::ERROR
        );
    }
}
