//! Registry configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use hexi_sdk::DEFAULT_ROOT_NAME;

use crate::route::RootSentinel;

/// How contribution names are checked against their plugin's namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamespacePolicy {
    /// No check.
    Off,
    /// Log names outside the plugin namespace.
    #[default]
    Warn,
    /// Fail aggregation on names outside the plugin namespace.
    Enforce,
}

impl FromStr for NamespacePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "warn" => Ok(Self::Warn),
            "enforce" => Ok(Self::Enforce),
            other => bail!("unknown namespace policy '{other}', expected off, warn or enforce"),
        }
    }
}

impl fmt::Display for NamespacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Warn => write!(f, "warn"),
            Self::Enforce => write!(f, "enforce"),
        }
    }
}

/// Registry configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Root sentinel all plugin routes attach beneath (default: hexiLayoutPage at "/").
    pub root: RootSentinel,

    /// Upper bound for one plugin's enumeration in concurrent runs (default: 5s).
    pub plugin_timeout: Duration,

    /// Namespace check applied to contribution names (default: warn).
    pub namespace_policy: NamespacePolicy,

    /// Plugin ids skipped during aggregation (from DISABLED_PLUGINS).
    pub disabled_plugins: Vec<String>,

    /// Directory holding manifest-declared plugins (default: ./plugins).
    pub plugins_dir: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root: RootSentinel::default(),
            plugin_timeout: Duration::from_millis(5000),
            namespace_policy: NamespacePolicy::default(),
            disabled_plugins: Vec::new(),
            plugins_dir: PathBuf::from("./plugins"),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let root_name = lookup("HEXI_ROOT_ROUTE").unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string());
        if root_name.trim().is_empty() {
            bail!("HEXI_ROOT_ROUTE must not be empty");
        }

        let root_path = lookup("HEXI_ROOT_PATH").unwrap_or_else(|| "/".to_string());
        if !root_path.starts_with('/') {
            bail!("HEXI_ROOT_PATH must start with '/', got '{root_path}'");
        }

        let timeout_ms: u64 = lookup("HEXI_PLUGIN_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".to_string())
            .parse()
            .context("HEXI_PLUGIN_TIMEOUT_MS must be a valid u64")?;

        let namespace_policy = match lookup("HEXI_NAMESPACE_POLICY") {
            Some(value) => value
                .parse::<NamespacePolicy>()
                .context("HEXI_NAMESPACE_POLICY is invalid")?,
            None => NamespacePolicy::default(),
        };

        let disabled_plugins = lookup("DISABLED_PLUGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let plugins_dir = lookup("HEXI_PLUGINS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./plugins"));

        Ok(Self {
            root: RootSentinel::new(root_name, root_path),
            plugin_timeout: Duration::from_millis(timeout_ms),
            namespace_policy,
            disabled_plugins,
            plugins_dir,
        })
    }

    pub fn is_disabled(&self, plugin: &str) -> bool {
        self.disabled_plugins.iter().any(|p| p == plugin)
    }
}
