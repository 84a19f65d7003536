//! Registry aggregator - one collect, validate, build cycle per call.

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use hexi_sdk::{ContributionError, ContributionSource, MenuContribution, RouteContribution};
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::phase::Phase;
use crate::config::{NamespacePolicy, RegistryConfig};
use crate::error::{Capability, RegistryError};
use crate::menu::{MenuEntry, MenuList, MenuTreeBuilder};
use crate::route::{RouteNode, RouteTree, RouteTreeBuilder};

/// The two artifacts handed to the shell after a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub routes: RouteTree,
    pub menus: MenuList,
}

impl Composition {
    /// The route a menu entry opens, matched by path.
    pub fn route_for_menu(&self, entry: &MenuEntry) -> Option<&RouteNode> {
        self.routes.find_by_path(&entry.index)
    }

    /// Menu entries whose `index` matches no route path.
    pub fn unlinked_menus(&self) -> Vec<&MenuEntry> {
        self.menus
            .flatten()
            .into_iter()
            .filter(|entry| self.route_for_menu(entry).is_none())
            .collect()
    }
}

/// Contributions of one plugin, tagged with its identity.
#[derive(Debug)]
struct Collected {
    plugin: String,
    namespace: Option<String>,
    routes: Vec<RouteContribution>,
    menus: Vec<MenuContribution>,
}

/// Phase bookkeeping for a single run.
struct Run {
    phase: Phase,
    started: Instant,
}

impl Run {
    fn start() -> Self {
        let mut run = Self {
            phase: Phase::Idle,
            started: Instant::now(),
        };
        run.advance(Phase::Collecting);
        run
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "invalid aggregation transition {} -> {}",
            self.phase,
            next
        );
        debug!(from = %self.phase, to = %next, "aggregation phase");
        self.phase = next;
    }

    fn fail(&mut self, err: RegistryError) -> RegistryError {
        warn!(phase = %self.phase, error = %err, "aggregation failed");
        self.advance(Phase::Failed);
        err
    }

    fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}

/// Composes plugin contributions into a route tree and a menu list.
///
/// The aggregator holds configuration only. Every call is an independent run
/// over the plugin list it is given, whose order is the registration order.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: RegistryConfig,
}

impl Aggregator {
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Enumerate `plugins` one after another and build both trees.
    ///
    /// Returns the first error encountered; no partial result is produced.
    pub fn aggregate(
        &self,
        plugins: &[Arc<dyn ContributionSource>],
    ) -> Result<Composition, RegistryError> {
        let mut run = Run::start();
        let active = self.active_plugins(plugins).map_err(|e| run.fail(e))?;

        let mut collected = Vec::with_capacity(active.len());
        for plugin in &active {
            collected.push(collect(plugin.as_ref()).map_err(|e| run.fail(e))?);
        }

        self.finish(run, collected)
    }

    /// Enumerate `plugins` in parallel, then build both trees exactly as
    /// [`Aggregator::aggregate`] would.
    ///
    /// Each plugin runs on its own detached thread and gets `plugin_timeout`
    /// to finish. A plugin that runs over is reported as an enumeration
    /// failure and its thread is left behind; it holds no runtime resources,
    /// so shutting down the runtime never waits for it. Results are merged in
    /// registration order, never completion order.
    pub async fn aggregate_concurrent(
        &self,
        plugins: &[Arc<dyn ContributionSource>],
    ) -> Result<Composition, RegistryError> {
        let mut run = Run::start();
        let active = self.active_plugins(plugins).map_err(|e| run.fail(e))?;

        let timeout = self.config.plugin_timeout;
        let deadline = tokio::time::Instant::now() + timeout;
        let mut workers = Vec::with_capacity(active.len());
        for plugin in active {
            let id = plugin.id().to_string();
            let receiver = spawn_worker(&id, plugin).map_err(|e| run.fail(e))?;
            workers.push((id, receiver));
        }

        let mut collected = Vec::with_capacity(workers.len());
        for (id, receiver) in workers {
            let result = match tokio::time::timeout_at(deadline, receiver).await {
                Ok(Ok(result)) => result,
                Ok(Err(_)) => Err(RegistryError::enumeration(
                    &id,
                    Capability::All,
                    "worker exited without reporting",
                )),
                Err(_) => Err(RegistryError::enumeration(
                    &id,
                    Capability::All,
                    format!("timed out after {}ms", timeout.as_millis()),
                )),
            };
            collected.push(result.map_err(|e| run.fail(e))?);
        }

        self.finish(run, collected)
    }

    /// Registration-ordered plugins minus disabled ones.
    fn active_plugins(
        &self,
        plugins: &[Arc<dyn ContributionSource>],
    ) -> Result<Vec<Arc<dyn ContributionSource>>, RegistryError> {
        let mut seen = HashSet::with_capacity(plugins.len());
        let mut active = Vec::with_capacity(plugins.len());

        for plugin in plugins {
            let id = plugin.id();
            if !seen.insert(id.to_string()) {
                return Err(RegistryError::DuplicatePlugin {
                    plugin: id.to_string(),
                });
            }
            if self.config.is_disabled(id) {
                info!(plugin = %id, "plugin disabled, skipping");
                continue;
            }
            active.push(Arc::clone(plugin));
        }

        Ok(active)
    }

    fn finish(
        &self,
        mut run: Run,
        collected: Vec<Collected>,
    ) -> Result<Composition, RegistryError> {
        run.advance(Phase::Validating);

        match self.validate(collected) {
            Ok(composition) => {
                run.advance(Phase::Ready);
                info!(
                    routes = composition.routes.len(),
                    menus = composition.menus.len(),
                    elapsed_ms = run.elapsed_ms(),
                    "aggregation complete"
                );
                Ok(composition)
            }
            Err(e) => Err(run.fail(e)),
        }
    }

    fn validate(&self, collected: Vec<Collected>) -> Result<Composition, RegistryError> {
        self.check_namespaces(&collected)?;

        let mut routes = RouteTreeBuilder::new(self.config.root.clone());
        let mut menus = MenuTreeBuilder::new();
        for plugin in collected {
            routes.extend(&plugin.plugin, plugin.routes);
            menus.extend(&plugin.plugin, plugin.menus);
        }

        let composition = Composition {
            routes: routes.build()?,
            menus: menus.build()?,
        };

        for entry in composition.unlinked_menus() {
            warn!(
                plugin = %entry.plugin,
                menu = %entry.name,
                index = %entry.index,
                "menu entry does not match any route path"
            );
        }

        Ok(composition)
    }

    fn check_namespaces(&self, collected: &[Collected]) -> Result<(), RegistryError> {
        let policy = self.config.namespace_policy;
        if policy == NamespacePolicy::Off {
            return Ok(());
        }

        for plugin in collected {
            let Some(namespace) = plugin.namespace.as_deref() else {
                continue;
            };

            let names = plugin
                .routes
                .iter()
                .map(|r| r.name.as_str())
                .chain(plugin.menus.iter().map(|m| m.name.as_str()));

            for name in names.filter(|n| !n.starts_with(namespace)) {
                if policy == NamespacePolicy::Enforce {
                    return Err(RegistryError::NamespaceViolation {
                        plugin: plugin.plugin.clone(),
                        name: name.to_string(),
                        namespace: namespace.to_string(),
                    });
                }
                warn!(
                    plugin = %plugin.plugin,
                    name = %name,
                    namespace = %namespace,
                    "contribution outside plugin namespace"
                );
            }
        }

        Ok(())
    }
}

/// Collect one plugin on a detached thread, reporting back over a oneshot.
fn spawn_worker(
    id: &str,
    plugin: Arc<dyn ContributionSource>,
) -> Result<oneshot::Receiver<Result<Collected, RegistryError>>, RegistryError> {
    let (sender, receiver) = oneshot::channel();
    std::thread::Builder::new()
        .name(format!("hexi-enum-{id}"))
        .spawn(move || {
            // The receiver is gone once the plugin has timed out.
            let _ = sender.send(collect(plugin.as_ref()));
        })
        .map_err(|e| {
            RegistryError::enumeration(id, Capability::All, format!("failed to spawn worker: {e}"))
        })?;
    Ok(receiver)
}

fn collect(source: &dyn ContributionSource) -> Result<Collected, RegistryError> {
    let plugin = source.id().to_string();
    let routes = enumerate(&plugin, Capability::Routes, || source.contribute_routes())?;
    let menus = enumerate(&plugin, Capability::Menus, || source.contribute_menus())?;

    debug!(
        plugin = %plugin,
        routes = routes.len(),
        menus = menus.len(),
        "collected contributions"
    );

    Ok(Collected {
        namespace: source.namespace().map(str::to_string),
        plugin,
        routes,
        menus,
    })
}

/// Run one enumeration call, turning errors and panics into registry errors.
fn enumerate<T>(
    plugin: &str,
    capability: Capability,
    call: impl FnOnce() -> Result<Vec<T>, ContributionError>,
) -> Result<Vec<T>, RegistryError> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(items)) => Ok(items),
        Ok(Err(e)) => Err(RegistryError::enumeration(plugin, capability, e.to_string())),
        Err(payload) => Err(RegistryError::enumeration(
            plugin,
            capability,
            format!("panicked: {}", panic_message(payload.as_ref())),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    struct Fixed {
        id: &'static str,
        routes: Vec<RouteContribution>,
        menus: Vec<MenuContribution>,
    }

    impl ContributionSource for Fixed {
        fn id(&self) -> &str {
            self.id
        }

        fn contribute_routes(&self) -> Result<Vec<RouteContribution>, ContributionError> {
            Ok(self.routes.clone())
        }

        fn contribute_menus(&self) -> Result<Vec<MenuContribution>, ContributionError> {
            Ok(self.menus.clone())
        }
    }

    struct Exploding;

    impl ContributionSource for Exploding {
        fn id(&self) -> &str {
            "exploding"
        }

        fn contribute_routes(&self) -> Result<Vec<RouteContribution>, ContributionError> {
            panic!("route table corrupted");
        }

        fn contribute_menus(&self) -> Result<Vec<MenuContribution>, ContributionError> {
            Ok(Vec::new())
        }
    }

    fn fixed(id: &'static str, routes: Vec<RouteContribution>) -> Arc<dyn ContributionSource> {
        Arc::new(Fixed {
            id,
            routes,
            menus: Vec::new(),
        })
    }

    #[test]
    fn no_plugins_yields_bare_root() {
        let composition = Aggregator::default().aggregate(&[]).unwrap();
        assert!(composition.routes.is_empty());
        assert!(composition.menus.is_empty());
    }

    #[test]
    fn panicking_plugin_is_isolated() {
        let plugins: Vec<Arc<dyn ContributionSource>> = vec![Arc::new(Exploding)];
        let err = Aggregator::default().aggregate(&plugins).unwrap_err();
        assert_eq!(
            err,
            RegistryError::PluginEnumeration {
                plugin: "exploding".into(),
                capability: Capability::Routes,
                cause: "panicked: route table corrupted".into(),
            }
        );
    }

    #[test]
    fn duplicate_plugin_ids_are_rejected() {
        let plugins = vec![fixed("a", vec![]), fixed("a", vec![])];
        let err = Aggregator::default().aggregate(&plugins).unwrap_err();
        assert_eq!(err, RegistryError::DuplicatePlugin { plugin: "a".into() });
    }

    #[test]
    fn disabled_plugins_are_skipped() {
        let config = RegistryConfig {
            disabled_plugins: vec!["b".into()],
            ..Default::default()
        };
        let plugins = vec![
            fixed("a", vec![RouteContribution::new("a", "/a")]),
            fixed("b", vec![RouteContribution::new("b", "/b")]),
        ];
        let composition = Aggregator::new(config).aggregate(&plugins).unwrap();
        assert!(composition.routes.get("a").is_some());
        assert!(composition.routes.get("b").is_none());
    }

    #[test]
    fn unlinked_menus_are_reported() {
        let plugins: Vec<Arc<dyn ContributionSource>> = vec![Arc::new(Fixed {
            id: "a",
            routes: vec![RouteContribution::new("a", "/a")],
            menus: vec![
                MenuContribution::new("a", "/a", "A"),
                MenuContribution::new("b", "/b", "B"),
            ],
        })];
        let composition = Aggregator::default().aggregate(&plugins).unwrap();

        let entry = composition.menus.get("a").unwrap();
        assert_eq!(composition.route_for_menu(entry).unwrap().name, "a");
        let unlinked: Vec<_> = composition
            .unlinked_menus()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(unlinked, vec!["b"]);
    }

    #[test]
    fn panic_message_handles_owned_strings() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
