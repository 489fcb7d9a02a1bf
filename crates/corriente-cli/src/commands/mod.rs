//! CLI subcommands.

pub mod common;
pub mod devices;
pub mod passthrough;
pub mod tone;
