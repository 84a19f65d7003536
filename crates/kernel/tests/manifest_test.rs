//! Integration tests for manifest-declared plugins and the shell manifest.
//!
//! ```bash
//! cargo test --test manifest_test
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::fs;
use std::path::Path;

use common::{builtins, children_of};
use hexi_kernel::plugin::{ManifestPlugin, PluginError, ShellManifest};
use hexi_kernel::{Aggregator, RegistryConfig};
use hexi_sdk::ContributionSource;

const TELEMETRY_INFO: &str = r#"
id = "telemetry"
description = "Telemetry settings beneath the input manager"
category = "input"
namespace = "hexiTelemetry"

[[routes]]
name = "hexiTelemetryStream"
parent = "hexiInputManagerConfig"
path = "/core/inputManager/config/telemetry"
component = "./Telemetry/stream.vue"
meta = { title = "Telemetry Stream" }

[[menus]]
name = "hexiTelemetryStream"
index = "/core/inputManager/config/telemetry"
title = "Telemetry"
"#;

fn write_plugin(plugins_dir: &Path, id: &str, info: &str) {
    let dir = plugins_dir.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{id}.info.toml")), info).unwrap();
}

#[test]
fn manifest_plugin_extends_builtin_route() {
    let tmp = tempfile::tempdir().unwrap();
    write_plugin(tmp.path(), "telemetry", TELEMETRY_INFO);

    // Telemetry is listed before its parent's plugin.
    let manifest = ShellManifest::parse_str(
        r#"plugins = ["telemetry", "input_manager", "output_manager"]"#,
    )
    .unwrap();
    let plugins = manifest.resolve(tmp.path(), &builtins()).unwrap();
    let ids: Vec<_> = plugins.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["telemetry", "input_manager", "output_manager"]);

    let composition = Aggregator::default().aggregate(&plugins).unwrap();
    assert_eq!(
        children_of(&composition.routes, "hexiInputManagerConfig"),
        vec![
            "hexiTelemetryStream",
            "hexiInputManagerConfigActivatedPlugin",
            "hexiInputManagerConfigLogs",
        ]
    );

    let stream = composition.routes.get("hexiTelemetryStream").unwrap();
    assert_eq!(stream.title(), Some("Telemetry Stream"));
    assert_eq!(stream.plugin.as_deref(), Some("telemetry"));

    let entry = composition.menus.get("hexiTelemetryStream").unwrap();
    assert_eq!(
        composition.route_for_menu(entry).unwrap().name,
        "hexiTelemetryStream"
    );
}

#[test]
fn manifest_plugin_loads_from_directory() {
    let tmp = tempfile::tempdir().unwrap();
    write_plugin(tmp.path(), "telemetry", TELEMETRY_INFO);

    let plugin = ManifestPlugin::load(&tmp.path().join("telemetry")).unwrap();
    assert_eq!(plugin.id(), "telemetry");
    assert_eq!(plugin.category(), Some("input"));
    assert_eq!(plugin.contribute_routes().unwrap().len(), 1);
}

#[test]
fn directory_without_manifest_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("empty")).unwrap();

    let err = ManifestPlugin::load(&tmp.path().join("empty")).unwrap_err();
    assert!(matches!(err, PluginError::MissingManifest { .. }));
    assert!(err.to_string().contains("plugin 'empty'"));
}

#[test]
fn directory_with_two_manifests_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    write_plugin(tmp.path(), "twice", r#"id = "twice""#);
    fs::write(tmp.path().join("twice").join("other.info.toml"), r#"id = "other""#).unwrap();

    let err = ManifestPlugin::load(&tmp.path().join("twice")).unwrap_err();
    assert!(matches!(err, PluginError::MultipleManifests { .. }));
}

#[test]
fn manifest_id_must_match_registration() {
    let tmp = tempfile::tempdir().unwrap();
    write_plugin(tmp.path(), "telemetry", r#"id = "telemetry2""#);

    let manifest = ShellManifest::parse_str(r#"plugins = ["telemetry"]"#).unwrap();
    let err = manifest.resolve(tmp.path(), &[]).err().unwrap();
    assert!(matches!(err, PluginError::IdMismatch { .. }));
}

#[test]
fn shell_manifest_sets_root() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("shell.toml");
    fs::write(
        &path,
        r#"
root = "appShell"
root_path = "/app"
plugins = []
"#,
    )
    .unwrap();

    let manifest = ShellManifest::load(&path).unwrap();
    let mut config = RegistryConfig::default();
    config.root = manifest.root_sentinel(&config.root);

    let composition = Aggregator::new(config).aggregate(&[]).unwrap();
    assert_eq!(composition.routes.root().name, "appShell");
    assert_eq!(composition.routes.root().path, "/app");
}

#[test]
fn missing_shell_manifest_reports_path() {
    let err = ShellManifest::load(Path::new("/nonexistent/shell.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/shell.toml"));
}

#[test]
fn shell_manifest_with_relative_root_path_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("shell.toml");
    fs::write(&path, "root = \"appShell\"\nroot_path = \"app\"\nplugins = []\n").unwrap();

    let err = ShellManifest::load(&path).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("root_path must start with '/'"), "{message}");
}
