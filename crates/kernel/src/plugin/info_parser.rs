//! Parser for plugin `.info.toml` manifest files.
//!
//! A manifest-declared plugin needs no Rust code: its `{id}.info.toml`
//! carries identity plus the routes and menu entries it contributes.
//!
//! ```toml
//! id = "telemetry"
//! category = "output"
//! namespace = "hexiTelemetry"
//!
//! [[routes]]
//! name = "hexiTelemetryConfig"
//! parent = "hexiLayoutPage"
//! path = "/core/telemetry/config"
//! component = "./Config/index.vue"
//! meta = { title = "Telemetry" }
//!
//! [[menus]]
//! name = "hexiTelemetryConfig"
//! index = "/core/telemetry/config"
//! title = "Telemetry"
//! ```

use std::path::{Path, PathBuf};

use hexi_sdk::{ContributionError, ContributionSource, MenuContribution, RouteContribution};
use serde::Deserialize;

use super::error::PluginError;

/// Plugin categories the shell groups plugins into.
pub const KNOWN_CATEGORIES: &[&str] = &["input", "output", "mca"];

/// Plugin metadata and contributions parsed from `.info.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginInfo {
    /// Plugin id (must match the directory name).
    pub id: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// One of [`KNOWN_CATEGORIES`].
    #[serde(default)]
    pub category: Option<String>,

    /// Name prefix the plugin claims for its contributions.
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub routes: Vec<RouteContribution>,

    #[serde(default)]
    pub menus: Vec<MenuContribution>,
}

impl PluginInfo {
    /// Parse a plugin info file from the given path.
    pub fn parse(path: &Path) -> Result<Self, PluginError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PluginError::invalid_manifest(path.display().to_string(), e))?;

        Self::parse_str(&content, path)
    }

    /// Parse plugin info from a TOML string.
    pub fn parse_str(content: &str, path: &Path) -> Result<Self, PluginError> {
        let info: PluginInfo = toml::from_str(content)
            .map_err(|e| PluginError::invalid_manifest(path.display().to_string(), e))?;

        info.validate(path)?;
        Ok(info)
    }

    fn validate(&self, path: &Path) -> Result<(), PluginError> {
        if self.id.trim().is_empty() {
            return Err(PluginError::invalid_manifest(
                path.display().to_string(),
                "missing valid 'id' property",
            ));
        }

        if let Some(category) = &self.category
            && !KNOWN_CATEGORIES.contains(&category.as_str())
        {
            return Err(PluginError::unknown_category(
                &self.id,
                category,
                KNOWN_CATEGORIES,
            ));
        }

        if self.namespace.as_deref().is_some_and(|ns| ns.trim().is_empty()) {
            return Err(PluginError::invalid_manifest(
                &self.id,
                "'namespace' must not be empty when present",
            ));
        }

        Ok(())
    }
}

/// A plugin whose contributions come from its `.info.toml`.
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    info: PluginInfo,
    dir: PathBuf,
}

impl ManifestPlugin {
    /// Load the plugin in `plugin_dir`, which must hold exactly one `.info.toml`.
    pub fn load(plugin_dir: &Path) -> Result<Self, PluginError> {
        let entries = std::fs::read_dir(plugin_dir)
            .map_err(|_| PluginError::missing_manifest(plugin_dir.display().to_string()))?;

        let info_files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(".info.toml"))
            })
            .collect();

        let info_path = match info_files.as_slice() {
            [] => return Err(PluginError::missing_manifest(plugin_dir.display().to_string())),
            [single] => single,
            _ => {
                return Err(PluginError::MultipleManifests {
                    path: plugin_dir.display().to_string(),
                });
            }
        };

        let info = PluginInfo::parse(info_path)?;
        Ok(Self {
            info,
            dir: plugin_dir.to_path_buf(),
        })
    }

    pub fn from_info(info: PluginInfo, dir: impl Into<PathBuf>) -> Self {
        Self {
            info,
            dir: dir.into(),
        }
    }

    pub fn info(&self) -> &PluginInfo {
        &self.info
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ContributionSource for ManifestPlugin {
    fn id(&self) -> &str {
        &self.info.id
    }

    fn category(&self) -> Option<&str> {
        self.info.category.as_deref()
    }

    fn namespace(&self) -> Option<&str> {
        self.info.namespace.as_deref()
    }

    fn contribute_routes(&self) -> Result<Vec<RouteContribution>, ContributionError> {
        Ok(self.info.routes.clone())
    }

    fn contribute_menus(&self) -> Result<Vec<MenuContribution>, ContributionError> {
        Ok(self.info.menus.clone())
    }
}
