//! Command line interface
//!
//! ```text
//! hearth --config ./hearth.yaml --package app::services --log-level debug
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hearth_infrastructure::constants::DEFAULT_LOG_LEVEL;
use hearth_infrastructure::{Container, LoggingConfig, YamlConfigLoader, init_logging};
use tracing::info;

/// Bundled base configuration
const BUNDLED_CONFIG: &str = include_str!("../conf/hearth.yaml");

/// Command line interface for Hearth
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(about = "Hearth - Minimal application container")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file, mounted after every other source
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Container name (`hearth.container.name` in configuration takes precedence)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Package to scan; may be repeated
    #[arg(short, long = "package", value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Fully-qualified type to scan; may be repeated
    #[arg(long = "class", value_name = "TYPE")]
    pub classes: Vec<String>,

    /// Log level or filter directive
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    /// Also log to a daily-rolling file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging settings selected on the command line
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            json_format: self.json_logs,
            file_output: self.log_file.clone(),
        }
    }

    /// Configuration loader over the bundled defaults and the given file
    pub fn loader(&self) -> YamlConfigLoader {
        let loader = YamlConfigLoader::new().with_bundled("bundled:hearth.yaml", BUNDLED_CONFIG);
        match &self.config {
            Some(path) => loader.with_config_file(path),
            None => loader,
        }
    }

    /// Container with the loader, name and scan targets applied
    pub fn container(&self) -> Container {
        let mut container = Container::new().with_configuration_source(self.loader());
        if let Some(name) = &self.name {
            container = container.with_name(name.clone());
        }
        for package in &self.packages {
            container.add_package_to_scan(package.clone());
        }
        for class in &self.classes {
            container.add_class_to_scan(class.clone());
        }
        container
    }
}

/// Run a container until Ctrl-C
///
/// # Errors
///
/// Fails when logging cannot be installed, when the container fails to
/// start, or when teardown reports failures.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.logging_config()).context("Failed to initialize logging")?;

    let mut container = cli.container();
    let report = container.start().await.context("Container failed to start")?;
    print!("{report}");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for the shutdown signal")?;
    info!("Shutdown signal received");

    container.stop().await.context("Container stopped with failures")?;
    Ok(())
}
