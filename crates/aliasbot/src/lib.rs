pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub mod gateway;
pub mod routing;
pub mod service;
pub mod storage;

pub use crate::config::{BotSettings, StoreKind};
pub use crate::error::{CoreError, CoreResult};
pub use crate::service::AliasBot;
pub use crate::types::{IncomingMessage, MessageAlias};
