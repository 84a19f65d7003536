//! Contribution records exchanged between plugins and the shell.
//!
//! Plugins build these records when the shell enumerates them. The registry
//! never interprets `component` or `meta`; it carries them through to the
//! route tree unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A route definition contributed by a plugin.
///
/// `parent` names another route (possibly from another plugin) or the root
/// sentinel. `None` attaches the route directly beneath the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteContribution {
    /// Registry-wide unique route name.
    pub name: String,

    /// Name of the parent route, or `None` for the root.
    #[serde(default)]
    pub parent: Option<String>,

    /// URL path served by this route (e.g., "/core/inputManager/config").
    pub path: String,

    /// Opaque component reference handed to the router.
    #[serde(default)]
    pub component: serde_json::Value,

    /// Route metadata. `title` is read by the shell for breadcrumbs.
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
}

impl RouteContribution {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            path: path.into(),
            component: serde_json::Value::Null,
            meta: BTreeMap::new(),
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn component(mut self, component: impl Into<serde_json::Value>) -> Self {
        self.component = component.into();
        self
    }

    /// Set `meta.title`.
    pub fn title(self, title: impl Into<String>) -> Self {
        self.meta_value("title", title.into())
    }

    pub fn meta_value(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

/// A sidebar menu entry contributed by a plugin.
///
/// `index` is the link key the sidebar uses; by convention it mirrors the
/// path of the route the entry opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuContribution {
    /// Unique among menu entries. May repeat a route name.
    pub name: String,

    /// Sort and link key, shaped like a route path.
    pub index: String,

    /// Label shown in the sidebar.
    pub title: String,

    /// Parent menu entry for nested menus. `None` means top level.
    #[serde(default)]
    pub parent: Option<String>,
}

impl MenuContribution {
    pub fn new(
        name: impl Into<String>,
        index: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            index: index.into(),
            title: title.into(),
            parent: None,
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}
