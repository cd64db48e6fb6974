//! Maps parsed commands to alias actions and reply text.

pub mod help;
pub mod router;
pub mod subcommand;

pub use router::{AliasLimits, CommandRouter};
pub use subcommand::Subcommand;
