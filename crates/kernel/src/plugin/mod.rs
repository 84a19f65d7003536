//! Plugin set resolution for the shell.
//!
//! This module handles:
//! - Parsing manifest-declared plugins from `.info.toml` files
//! - Parsing the shell manifest that fixes registration order
//! - Resolving that order to built-in and manifest plugins

mod error;
mod info_parser;
mod manifest;

pub use error::PluginError;
pub use info_parser::{KNOWN_CATEGORIES, ManifestPlugin, PluginInfo};
pub use manifest::ShellManifest;
