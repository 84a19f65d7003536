//! Plugin loading error types with clear, actionable messages.
//!
//! All errors include the plugin name and relevant context to help
//! developers quickly identify and fix issues.

use thiserror::Error;

/// Errors that can occur while resolving the shell's plugin set.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Plugin directory is missing the .info.toml manifest file.
    #[error("plugin '{plugin}': no .info.toml manifest found in {path}")]
    MissingManifest { plugin: String, path: String },

    /// Multiple .info.toml files found in plugin directory.
    #[error("plugin directory '{path}': multiple .info.toml files found, expected exactly one")]
    MultipleManifests { path: String },

    /// The .info.toml file could not be read or parsed.
    #[error("plugin '{plugin}': failed to parse manifest: {details}")]
    InvalidManifest { plugin: String, details: String },

    /// Manifest declares a category the shell does not know.
    #[error("plugin '{plugin}': unknown category '{category}'. Valid categories: {valid}")]
    UnknownCategory {
        plugin: String,
        category: String,
        valid: String,
    },

    /// Manifest id differs from the name the shell registered it under.
    #[error("plugin '{plugin}': manifest declares id '{declared}'")]
    IdMismatch { plugin: String, declared: String },

    /// The shell manifest lists a plugin that is neither built in nor on disk.
    #[error("plugin '{plugin}': not built in and no directory at {path}")]
    UnknownPlugin { plugin: String, path: String },
}

impl PluginError {
    /// Create a missing manifest error.
    pub fn missing_manifest(path: impl Into<String>) -> Self {
        let path = path.into();
        let plugin = std::path::Path::new(&path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self::MissingManifest { plugin, path }
    }

    /// Create an unknown category error.
    pub fn unknown_category(
        plugin: impl Into<String>,
        category: impl Into<String>,
        valid: &[&str],
    ) -> Self {
        Self::UnknownCategory {
            plugin: plugin.into(),
            category: category.into(),
            valid: valid.join(", "),
        }
    }

    /// Create an invalid manifest error.
    pub fn invalid_manifest(plugin: impl Into<String>, details: impl ToString) -> Self {
        Self::InvalidManifest {
            plugin: plugin.into(),
            details: details.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_manifest_derives_plugin_from_path() {
        let err = PluginError::missing_manifest("/srv/plugins/telemetry");
        let msg = err.to_string();
        assert!(msg.contains("plugin 'telemetry'"));
        assert!(msg.contains("/srv/plugins/telemetry"));
    }

    #[test]
    fn unknown_category_lists_valid_options() {
        let err = PluginError::unknown_category("x", "audio", &["input", "output", "mca"]);
        let msg = err.to_string();
        assert!(msg.contains("audio"));
        assert!(msg.contains("input, output, mca"));
    }
}
