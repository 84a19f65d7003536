//! Shell manifest - the explicit, ordered list of plugins to compose.
//!
//! Registration order is an input to aggregation, never derived from load
//! order, so the shell declares it:
//!
//! ```toml
//! root = "hexiLayoutPage"
//! plugins = ["input_manager", "output_manager", "mca_manager", "telemetry"]
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use hexi_sdk::ContributionSource;
use serde::Deserialize;
use tracing::{debug, info};

use super::error::PluginError;
use super::info_parser::ManifestPlugin;
use crate::route::RootSentinel;

/// Parsed `shell.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShellManifest {
    /// Root sentinel name; falls back to the configured root when absent.
    #[serde(default)]
    pub root: Option<String>,

    /// Root sentinel path; "/" when absent.
    #[serde(default)]
    pub root_path: Option<String>,

    /// Plugin ids in registration order.
    #[serde(default)]
    pub plugins: Vec<String>,
}

impl ShellManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read shell manifest: {}", path.display()))?;
        Self::parse_str(&content)
            .with_context(|| format!("failed to parse shell manifest at {}", path.display()))
    }

    pub fn parse_str(content: &str) -> Result<Self> {
        let manifest: ShellManifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Apply the same root checks as `HEXI_ROOT_ROUTE` and `HEXI_ROOT_PATH`.
    pub fn validate(&self) -> Result<()> {
        if self.root.as_deref().is_some_and(|root| root.trim().is_empty()) {
            bail!("root must not be empty");
        }
        if let Some(path) = self.root_path.as_deref().filter(|p| !p.starts_with('/')) {
            bail!("root_path must start with '/', got '{path}'");
        }
        Ok(())
    }

    /// The root sentinel this manifest selects, given the configured default.
    pub fn root_sentinel(&self, configured: &RootSentinel) -> RootSentinel {
        RootSentinel::new(
            self.root.clone().unwrap_or_else(|| configured.name.clone()),
            self.root_path
                .clone()
                .unwrap_or_else(|| configured.path.clone()),
        )
    }

    /// Resolve plugin ids to contribution sources, preserving manifest order.
    ///
    /// Ids matching a built-in plugin resolve to it; any other id is loaded
    /// from `{plugins_dir}/{id}/`.
    pub fn resolve(
        &self,
        plugins_dir: &Path,
        builtins: &[Arc<dyn ContributionSource>],
    ) -> Result<Vec<Arc<dyn ContributionSource>>, PluginError> {
        let mut resolved = Vec::with_capacity(self.plugins.len());

        for id in &self.plugins {
            if let Some(builtin) = builtins.iter().find(|p| p.id() == id) {
                debug!(plugin = %id, "resolved built-in plugin");
                resolved.push(Arc::clone(builtin));
                continue;
            }

            let dir = plugins_dir.join(id);
            if !dir.is_dir() {
                return Err(PluginError::UnknownPlugin {
                    plugin: id.clone(),
                    path: dir.display().to_string(),
                });
            }

            let plugin = ManifestPlugin::load(&dir)?;
            if plugin.info().id != *id {
                return Err(PluginError::IdMismatch {
                    plugin: id.clone(),
                    declared: plugin.info().id.clone(),
                });
            }
            debug!(plugin = %id, dir = %dir.display(), "loaded manifest plugin");
            resolved.push(Arc::new(plugin) as Arc<dyn ContributionSource>);
        }

        info!(count = resolved.len(), "resolved plugin set");
        Ok(resolved)
    }
}
