//! Registry error types.
//!
//! Every error names the contribution and the plugin(s) it came from, so the
//! shell can disable the offending plugin without re-running with tracing.

use std::fmt;

use thiserror::Error;

/// Owner recorded for the shell-provided root sentinel in error reports.
pub const SHELL_OWNER: &str = "<shell>";

/// Which enumeration call of a plugin failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Routes,
    Menus,
    /// The whole enumeration of a plugin (timeouts, worker failures).
    All,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Routes => write!(f, "routes"),
            Self::Menus => write!(f, "menus"),
            Self::All => write!(f, "contributions"),
        }
    }
}

/// Errors that fail an aggregation run.
///
/// Aggregation is fail-fast: the first error encountered is returned and no
/// partial tree is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two or more contributions share a name.
    #[error("duplicate contribution name '{name}' from plugins: {}", .plugins.join(", "))]
    DuplicateName { name: String, plugins: Vec<String> },

    /// A contribution names a parent that no plugin defines.
    #[error("plugin '{plugin}': '{name}' declares parent '{parent}' which is never defined")]
    UnresolvedParent {
        name: String,
        parent: String,
        plugin: String,
    },

    /// Parent links loop without reaching the root.
    #[error("parent cycle detected: {} (plugins: {})", .names.join(" -> "), .plugins.join(", "))]
    Cycle {
        names: Vec<String>,
        plugins: Vec<String>,
    },

    /// A required field is missing or invalid.
    #[error("plugin '{plugin}': contribution '{name}' has invalid '{field}': {reason}")]
    MalformedContribution {
        plugin: String,
        name: String,
        field: &'static str,
        reason: String,
    },

    /// A plugin failed to produce its contribution sequence.
    #[error("plugin '{plugin}': failed to enumerate {capability}: {cause}")]
    PluginEnumeration {
        plugin: String,
        capability: Capability,
        cause: String,
    },

    /// The same plugin id appears twice in the registration list.
    #[error("plugin '{plugin}' is registered more than once")]
    DuplicatePlugin { plugin: String },

    /// A contribution name lies outside its plugin's declared namespace.
    #[error("plugin '{plugin}': '{name}' is outside the plugin namespace '{namespace}'")]
    NamespaceViolation {
        plugin: String,
        name: String,
        namespace: String,
    },
}

/// Discriminant of [`RegistryError`] for matching without field access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DuplicateName,
    UnresolvedParent,
    Cycle,
    MalformedContribution,
    PluginEnumeration,
    DuplicatePlugin,
    NamespaceViolation,
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateName { .. } => ErrorKind::DuplicateName,
            Self::UnresolvedParent { .. } => ErrorKind::UnresolvedParent,
            Self::Cycle { .. } => ErrorKind::Cycle,
            Self::MalformedContribution { .. } => ErrorKind::MalformedContribution,
            Self::PluginEnumeration { .. } => ErrorKind::PluginEnumeration,
            Self::DuplicatePlugin { .. } => ErrorKind::DuplicatePlugin,
            Self::NamespaceViolation { .. } => ErrorKind::NamespaceViolation,
        }
    }

    /// Plugins implicated by this error, in the order they were registered.
    pub fn plugins(&self) -> Vec<&str> {
        match self {
            Self::DuplicateName { plugins, .. } | Self::Cycle { plugins, .. } => {
                plugins.iter().map(String::as_str).collect()
            }
            Self::UnresolvedParent { plugin, .. }
            | Self::MalformedContribution { plugin, .. }
            | Self::PluginEnumeration { plugin, .. }
            | Self::DuplicatePlugin { plugin }
            | Self::NamespaceViolation { plugin, .. } => vec![plugin.as_str()],
        }
    }

    pub(crate) fn malformed(
        plugin: &str,
        name: &str,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedContribution {
            plugin: plugin.to_string(),
            name: name.to_string(),
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn enumeration(
        plugin: &str,
        capability: Capability,
        cause: impl Into<String>,
    ) -> Self {
        Self::PluginEnumeration {
            plugin: plugin.to_string(),
            capability,
            cause: cause.into(),
        }
    }
}
