//! CLI subcommands.

pub mod build;
pub mod deploy;
pub mod dev;
pub mod framework;
pub mod generate;
pub mod serve;
