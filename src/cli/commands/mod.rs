//! CLI command implementations

pub mod add;
pub mod completions;
pub mod config;
pub mod edit;
pub mod import;
pub mod list;
pub mod rm;
pub mod show;
pub mod total;
