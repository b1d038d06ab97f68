//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`], which also loads and validates configuration once
//! for every command that needs it.

pub mod completions;
pub mod dispatcher;
pub mod export;
pub mod store;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
