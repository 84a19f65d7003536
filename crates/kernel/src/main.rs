//! Hexi shell
//!
//! Composes the plugin set declared by the shell manifest into a route tree
//! and sidebar menu list, and prints or validates the result.

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hexi_kernel::RegistryConfig;
use hexi_sdk::ContributionSource;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "hexi", about = "Compose Hexi shell navigation from plugins")]
struct Cli {
    /// Shell manifest listing plugins in registration order.
    #[arg(long, default_value = "shell.toml")]
    manifest: PathBuf,

    /// Directory holding manifest-declared plugins (overrides HEXI_PLUGINS_DIR).
    #[arg(long)]
    plugins_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the composed route tree and menu list as JSON.
    Compose {
        /// Enumerate plugins in parallel.
        #[arg(long)]
        concurrent: bool,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
    /// Validate the plugin set without printing the result.
    Check,
    /// List plugins in registration order.
    Plugins,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let mut config = RegistryConfig::from_env().context("failed to load configuration")?;
    if let Some(dir) = cli.plugins_dir {
        config.plugins_dir = dir;
    }
    info!(
        root = %config.root.name,
        plugins_dir = %config.plugins_dir.display(),
        namespace_policy = %config.namespace_policy,
        "configuration loaded"
    );

    let (config, plugins) = cli::load_plugin_set(config, &cli.manifest, &builtin_plugins())?;

    match cli.command {
        Command::Compose { concurrent, pretty } => {
            cli::cmd_compose(config, &plugins, concurrent, pretty).await
        }
        Command::Check => cli::cmd_check(config, &plugins),
        Command::Plugins => {
            cli::cmd_plugins(&config, &plugins);
            Ok(())
        }
    }
}

/// Plugins compiled into the shell, in their default registration order.
fn builtin_plugins() -> Vec<Arc<dyn ContributionSource>> {
    vec![
        Arc::new(hexi_input_manager::InputManagerPlugin),
        Arc::new(hexi_output_manager::OutputManagerPlugin),
        Arc::new(hexi_mca_manager::McaManagerPlugin),
    ]
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
