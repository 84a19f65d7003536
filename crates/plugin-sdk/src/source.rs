//! The capability a plugin implements to contribute navigation.

use thiserror::Error;

use crate::types::{MenuContribution, RouteContribution};

/// Error a plugin reports when it cannot produce its contributions.
#[derive(Debug, Error)]
pub enum ContributionError {
    /// Free-form failure reported by the plugin.
    #[error("{0}")]
    Message(String),
}

impl ContributionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// A plugin that contributes routes and sidebar menu entries to the shell.
///
/// Both enumeration methods must be idempotent and side-effect free: the shell
/// may call them again whenever it recomposes the plugin set.
pub trait ContributionSource: Send + Sync {
    /// Stable plugin identity, used to tag every contribution and error.
    fn id(&self) -> &str;

    /// Plugin category (e.g., "input", "output", "mca").
    fn category(&self) -> Option<&str> {
        None
    }

    /// Name prefix this plugin claims for its own contributions.
    fn namespace(&self) -> Option<&str> {
        None
    }

    /// Enumerate this plugin's route definitions.
    fn contribute_routes(&self) -> Result<Vec<RouteContribution>, ContributionError>;

    /// Enumerate this plugin's sidebar menu entries.
    fn contribute_menus(&self) -> Result<Vec<MenuContribution>, ContributionError>;
}
