use std::env;
use std::path::PathBuf;

use command_parser::DEFAULT_PREFIX;

use crate::error::{CoreError, CoreResult};

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_KEY_LENGTH_LIMIT: usize = 100;
const DEFAULT_MESSAGE_LENGTH_LIMIT: usize = 2000;
const DEFAULT_LIST_PAGE_SIZE: usize = 10;
const DEFAULT_RANKING_SIZE: usize = 20;

/// Which alias store backs the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    File,
}

impl StoreKind {
    fn parse(value: &str) -> CoreResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            other => Err(CoreError::InvalidInput(format!(
                "unknown store kind {other:?} (expected \"memory\" or \"file\")"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotSettings {
    pub prefix: String,
    pub store: StoreKind,
    pub data_dir: PathBuf,
    pub key_length_limit: usize,
    pub message_length_limit: usize,
    pub list_page_size: usize,
    pub ranking_size: usize,
    pub trigger_aliases: bool,
    pub user_id: u64,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            store: StoreKind::Memory,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            key_length_limit: DEFAULT_KEY_LENGTH_LIMIT,
            message_length_limit: DEFAULT_MESSAGE_LENGTH_LIMIT,
            list_page_size: DEFAULT_LIST_PAGE_SIZE,
            ranking_size: DEFAULT_RANKING_SIZE,
            trigger_aliases: true,
            user_id: 0,
        }
    }
}

impl BotSettings {
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from any variable source. Values that fail to parse
    /// fall back to their defaults; the result is validated.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CoreResult<Self> {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let number = |name: &str, default: usize| {
            non_empty(name)
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(default)
        };

        let prefix = non_empty("ALIASBOT_PREFIX")
            .map(|value| value.trim().to_string())
            .unwrap_or(defaults.prefix);
        let store = match non_empty("ALIASBOT_STORE") {
            Some(value) => StoreKind::parse(&value)?,
            None => defaults.store,
        };
        let data_dir = non_empty("ALIASBOT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let trigger_aliases = non_empty("ALIASBOT_TRIGGER_ALIASES")
            .and_then(|value| parse_bool(&value))
            .unwrap_or(defaults.trigger_aliases);
        let user_id = non_empty("ALIASBOT_USER_ID")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(defaults.user_id);

        let settings = Self {
            prefix,
            store,
            data_dir,
            key_length_limit: number("ALIASBOT_KEY_LENGTH_LIMIT", defaults.key_length_limit),
            message_length_limit: number(
                "ALIASBOT_MESSAGE_LENGTH_LIMIT",
                defaults.message_length_limit,
            ),
            list_page_size: number("ALIASBOT_LIST_PAGE_SIZE", defaults.list_page_size),
            ranking_size: number("ALIASBOT_RANKING_SIZE", defaults.ranking_size),
            trigger_aliases,
            user_id,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.prefix.is_empty() || self.prefix.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidInput(format!(
                "command prefix {:?} must be a single non-empty word",
                self.prefix
            )));
        }
        let limits = [
            ("key length limit", self.key_length_limit),
            ("message length limit", self.message_length_limit),
            ("list page size", self.list_page_size),
            ("ranking size", self.ranking_size),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(CoreError::InvalidInput(format!("{name} must be positive")));
            }
        }
        Ok(())
    }

    pub fn alias_file(&self) -> PathBuf {
        self.data_dir.join("aliases.json")
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
