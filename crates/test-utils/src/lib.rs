//! Hexi test utilities.
//!
//! Fixtures for registry testing: contribution shorthands and scripted
//! plugins that succeed, fail, panic or stall on demand.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use hexi_sdk::{ContributionError, ContributionSource, MenuContribution, RouteContribution};

/// A route whose path is derived from its dotted name ("a.b" -> "/a/b").
pub fn route(name: &str, parent: &str) -> RouteContribution {
    RouteContribution::new(name, format!("/{}", name.replace('.', "/")))
        .parent(parent)
        .component(serde_json::json!({ "view": name }))
        .title(name)
}

/// A top-level menu entry pointing at `index`.
pub fn menu(name: &str, index: &str, title: &str) -> MenuContribution {
    MenuContribution::new(name, index, title)
}

/// A plugin returning fixed contributions.
#[derive(Debug, Clone, Default)]
pub struct StaticPlugin {
    id: String,
    namespace: Option<String>,
    routes: Vec<RouteContribution>,
    menus: Vec<MenuContribution>,
    calls: Arc<AtomicUsize>,
}

impl StaticPlugin {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn route(mut self, route: RouteContribution) -> Self {
        self.routes.push(route);
        self
    }

    pub fn menu(mut self, menu: MenuContribution) -> Self {
        self.menus.push(menu);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Number of enumeration calls made so far (routes and menus combined).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wrap as a shared contribution source.
    pub fn shared(self) -> Arc<dyn ContributionSource> {
        Arc::new(self)
    }
}

impl ContributionSource for StaticPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn contribute_routes(&self) -> Result<Vec<RouteContribution>, ContributionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.routes.clone())
    }

    fn contribute_menus(&self) -> Result<Vec<MenuContribution>, ContributionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.menus.clone())
    }
}

/// How a [`ScriptedPlugin`] misbehaves.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Route enumeration returns an error with this message.
    FailRoutes(String),
    /// Menu enumeration returns an error with this message.
    FailMenus(String),
    /// Route enumeration panics with this message.
    PanicRoutes(String),
    /// Both enumerations sleep this long before delegating.
    Stall(Duration),
}

/// A plugin that wraps a [`StaticPlugin`] and misbehaves as scripted.
#[derive(Debug, Clone)]
pub struct ScriptedPlugin {
    inner: StaticPlugin,
    behavior: Behavior,
}

impl ScriptedPlugin {
    pub fn new(inner: StaticPlugin, behavior: Behavior) -> Self {
        Self { inner, behavior }
    }

    pub fn failing(id: &str, message: &str) -> Self {
        Self::new(StaticPlugin::new(id), Behavior::FailRoutes(message.to_string()))
    }

    pub fn panicking(id: &str, message: &str) -> Self {
        Self::new(StaticPlugin::new(id), Behavior::PanicRoutes(message.to_string()))
    }

    pub fn stalling(inner: StaticPlugin, delay: Duration) -> Self {
        Self::new(inner, Behavior::Stall(delay))
    }

    pub fn shared(self) -> Arc<dyn ContributionSource> {
        Arc::new(self)
    }
}

impl ContributionSource for ScriptedPlugin {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn namespace(&self) -> Option<&str> {
        self.inner.namespace()
    }

    fn contribute_routes(&self) -> Result<Vec<RouteContribution>, ContributionError> {
        match &self.behavior {
            Behavior::FailRoutes(message) => Err(ContributionError::new(message.clone())),
            Behavior::PanicRoutes(message) => panic!("{message}"),
            Behavior::Stall(delay) => {
                std::thread::sleep(*delay);
                self.inner.contribute_routes()
            }
            Behavior::FailMenus(_) => self.inner.contribute_routes(),
        }
    }

    fn contribute_menus(&self) -> Result<Vec<MenuContribution>, ContributionError> {
        match &self.behavior {
            Behavior::FailMenus(message) => Err(ContributionError::new(message.clone())),
            Behavior::Stall(delay) => {
                std::thread::sleep(*delay);
                self.inner.contribute_menus()
            }
            Behavior::FailRoutes(_) | Behavior::PanicRoutes(_) => self.inner.contribute_menus(),
        }
    }
}
