#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common helpers for registry integration tests.
//!
//! Tests compose the real built-in plugins alongside fixtures from
//! `hexi-test-utils`, through the same `Aggregator` the shell uses.

#![allow(dead_code)]

use std::sync::Arc;

use hexi_kernel::route::RouteTree;
use hexi_kernel::{Aggregator, RegistryConfig};
use hexi_sdk::ContributionSource;

/// The shell's built-in plugins in their default order.
pub fn builtins() -> Vec<Arc<dyn ContributionSource>> {
    vec![
        Arc::new(hexi_input_manager::InputManagerPlugin),
        Arc::new(hexi_output_manager::OutputManagerPlugin),
        Arc::new(hexi_mca_manager::McaManagerPlugin),
    ]
}

/// Aggregator whose root sentinel is named `root`.
pub fn aggregator_with_root(root: &str) -> Aggregator {
    let mut config = RegistryConfig::default();
    config.root.name = root.to_string();
    Aggregator::new(config)
}

/// Names of the children of `name`, in tree order.
pub fn children_of<'a>(tree: &'a RouteTree, name: &str) -> Vec<&'a str> {
    let id = tree.id_of(name).expect("route should exist");
    tree.children(id).map(|n| n.name.as_str()).collect()
}
