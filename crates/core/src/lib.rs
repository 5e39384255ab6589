//! Shared foundations for pbxfix
//!
//! This crate provides the pieces every other pbxfix crate needs:
//! - Error taxonomy and CLI exit codes
//! - Configuration loading (TOML file + built-in defaults)

pub mod config;
pub mod error;
