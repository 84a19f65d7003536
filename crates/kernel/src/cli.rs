//! Command implementations for the `hexi` binary.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use hexi_kernel::plugin::ShellManifest;
use hexi_kernel::{Aggregator, RegistryConfig};
use hexi_sdk::ContributionSource;
use tracing::info;

/// Resolve the plugin set named by the shell manifest.
///
/// Without a manifest file the built-in plugins are composed in their
/// default order.
pub fn load_plugin_set(
    mut config: RegistryConfig,
    manifest_path: &Path,
    builtins: &[Arc<dyn ContributionSource>],
) -> Result<(RegistryConfig, Vec<Arc<dyn ContributionSource>>)> {
    if !manifest_path.exists() {
        info!(
            manifest = %manifest_path.display(),
            "shell manifest not found, using built-in plugins"
        );
        return Ok((config, builtins.to_vec()));
    }

    let manifest = ShellManifest::load(manifest_path)?;
    config.root = manifest.root_sentinel(&config.root);
    let plugins = manifest
        .resolve(&config.plugins_dir, builtins)
        .context("failed to resolve plugin set")?;

    Ok((config, plugins))
}

/// Compose and print the result as JSON on stdout.
pub async fn cmd_compose(
    config: RegistryConfig,
    plugins: &[Arc<dyn ContributionSource>],
    concurrent: bool,
    pretty: bool,
) -> Result<()> {
    let aggregator = Aggregator::new(config);
    let composition = if concurrent {
        aggregator.aggregate_concurrent(plugins).await?
    } else {
        aggregator.aggregate(plugins)?
    };

    let json = if pretty {
        serde_json::to_string_pretty(&composition)?
    } else {
        serde_json::to_string(&composition)?
    };
    println!("{json}");
    Ok(())
}

/// Compose and report counts, failing on the first registry error.
pub fn cmd_check(config: RegistryConfig, plugins: &[Arc<dyn ContributionSource>]) -> Result<()> {
    let composition = Aggregator::new(config).aggregate(plugins)?;

    println!(
        "OK: {} plugin(s), {} route(s), {} menu entr{}",
        plugins.len(),
        composition.routes.len(),
        composition.menus.len(),
        if composition.menus.len() == 1 { "y" } else { "ies" }
    );

    let unlinked = composition.unlinked_menus();
    if !unlinked.is_empty() {
        println!("{} menu entr(ies) match no route path:", unlinked.len());
        for entry in unlinked {
            println!("  {} ({}) from '{}'", entry.name, entry.index, entry.plugin);
        }
    }
    Ok(())
}

/// Print plugins in registration order.
pub fn cmd_plugins(config: &RegistryConfig, plugins: &[Arc<dyn ContributionSource>]) {
    if plugins.is_empty() {
        println!("No plugins registered.");
        return;
    }

    println!("{:<4} {:<24} {:<10} {:<24} {:<8}", "#", "PLUGIN", "CATEGORY", "NAMESPACE", "STATUS");
    println!("{}", "-".repeat(74));

    for (order, plugin) in plugins.iter().enumerate() {
        let status = if config.is_disabled(plugin.id()) {
            "disabled"
        } else {
            "enabled"
        };
        println!(
            "{:<4} {:<24} {:<10} {:<24} {:<8}",
            order + 1,
            plugin.id(),
            plugin.category().unwrap_or("-"),
            plugin.namespace().unwrap_or("-"),
            status
        );
    }
}
