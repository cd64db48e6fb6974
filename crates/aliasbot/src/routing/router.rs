use command_parser::ParsedCommand;

use super::help::{help_text, usage_text};
use super::Subcommand;
use crate::config::BotSettings;
use crate::error::CoreResult;
use crate::storage::SharedAliasStore;
use crate::types::MessageAlias;

/// Size limits and page sizes applied by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasLimits {
    pub key_length: usize,
    pub message_length: usize,
    pub list_page_size: usize,
    pub ranking_size: usize,
}

impl Default for AliasLimits {
    fn default() -> Self {
        Self::from(&BotSettings::default())
    }
}

impl From<&BotSettings> for AliasLimits {
    fn from(settings: &BotSettings) -> Self {
        Self {
            key_length: settings.key_length_limit,
            message_length: settings.message_length_limit,
            list_page_size: settings.list_page_size,
            ranking_size: settings.ranking_size,
        }
    }
}

/// Turns parsed commands into store actions and a reply.
pub struct CommandRouter {
    store: SharedAliasStore,
    limits: AliasLimits,
}

impl CommandRouter {
    pub fn new(store: SharedAliasStore, limits: AliasLimits) -> Self {
        Self { store, limits }
    }

    pub fn store(&self) -> &SharedAliasStore {
        &self.store
    }

    /// Route a parsed command.
    ///
    /// Unknown and empty subcommands get the help text. User mistakes are
    /// answered in the reply; only store failures surface as errors.
    pub async fn route(&self, command: &ParsedCommand, author_id: u64) -> CoreResult<String> {
        let subcommand = Subcommand::from_name(&command.sub_command);
        let args = &command.args;

        if !subcommand.accepts(args.len()) {
            return Ok(usage_text(&command.prefix, subcommand));
        }

        match subcommand {
            Subcommand::Help | Subcommand::Unknown => Ok(help_text(&command.prefix)),
            Subcommand::Make => self.make(&args[0], &args[1], author_id).await,
            Subcommand::Delete => self.delete(&args[0]).await,
            Subcommand::List => match args.first() {
                None => self.list(1).await,
                Some(raw) => match parse_page(raw) {
                    Some(page) => self.list(page).await,
                    None => Ok(usage_text(&command.prefix, subcommand)),
                },
            },
            Subcommand::Status => self.status().await,
            Subcommand::Ranking => self.usage_ranking().await,
        }
    }

    async fn make(&self, key: &str, message: &str, author_id: u64) -> CoreResult<String> {
        let key = key.trim();
        let message = message.trim();
        let mut error_msgs = vec![];

        if key.is_empty() {
            error_msgs.push("The key is blank.".to_string());
        }
        if message.is_empty() {
            error_msgs.push("The message is blank.".to_string());
        }

        let key_len = key.chars().count();
        let message_len = message.chars().count();
        let limits = self.limits;

        if key_len > limits.key_length {
            error_msgs.push(format!(
                "The key is too long ({key_len} characters). Keep it to {} or fewer.",
                limits.key_length
            ));
        }
        if message_len > limits.message_length {
            error_msgs.push(format!(
                "The message is too long ({message_len} characters). Keep it to {} or fewer.",
                limits.message_length
            ));
        }

        if !error_msgs.is_empty() {
            return Ok(error_msgs.join("\n"));
        }

        let created = self
            .store
            .insert_if_absent(MessageAlias::new(key, message, author_id))
            .await?;
        if !created {
            return Ok(format!(
                "An alias for \"{key}\" already exists. Delete it first to replace it."
            ));
        }
        tracing::info!(key, author_id, "alias created");

        Ok(format!("Created alias \"{key}\"."))
    }

    async fn delete(&self, key: &str) -> CoreResult<String> {
        let key = key.trim();
        if self.store.delete(key).await? {
            tracing::info!(key, "alias deleted");
            Ok(format!("Deleted alias \"{key}\"."))
        } else {
            Ok(format!("There is no alias for \"{key}\"."))
        }
    }

    async fn list(&self, page: usize) -> CoreResult<String> {
        let page_size = self.limits.list_page_size;
        let total = self.store.len().await?;
        if total == 0 {
            return Ok("No aliases are registered yet.".to_string());
        }

        let pages = total.div_ceil(page_size);
        let offset = (page - 1).saturating_mul(page_size);
        let aliases = self.store.list(offset, page_size).await?;
        if aliases.is_empty() {
            return Ok(format!("Page {page} is empty. There are {pages} page(s)."));
        }

        let mut result = vec!["```".to_string()];
        for (i, alias) in aliases.iter().enumerate() {
            result.push(format!(
                "#{:03} \"{}\" -> {}",
                offset + i + 1,
                alias.key,
                preview(&alias.message)
            ));
        }
        result.push(format!("page {page}/{pages} ({total} aliases)"));
        result.push("```".to_string());
        Ok(result.join("\n"))
    }

    async fn status(&self) -> CoreResult<String> {
        let len = self.store.len().await?;
        Ok(format!("```\nRegistered aliases: {len}\n```"))
    }

    async fn usage_ranking(&self) -> CoreResult<String> {
        let ranking = self.store.top_by_usage(self.limits.ranking_size).await?;
        if ranking.is_empty() {
            return Ok("No aliases are registered yet.".to_string());
        }

        let mut result = vec!["```".to_string()];
        for (i, alias) in ranking.into_iter().enumerate() {
            result.push(format!(
                "#{:02} used {:3} times \"{}\"",
                i + 1,
                alias.usage_count,
                alias.key
            ));
        }
        result.push("```".to_string());
        Ok(result.join("\n"))
    }
}

/// 1-based page number.
fn parse_page(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|page| *page > 0)
}

/// First line of a message, shortened for listings.
fn preview(message: &str) -> String {
    const PREVIEW_CHARS: usize = 40;
    let first_line = message.lines().next().unwrap_or_default();
    let mut preview: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if first_line.chars().count() > PREVIEW_CHARS || message.lines().nth(1).is_some() {
        preview.push_str("...");
    }
    preview
}
