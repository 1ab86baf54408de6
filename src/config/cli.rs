use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the reelboard binary.
#[derive(Debug, Parser)]
#[command(name = "reelboard", version, about = "Reelboard content dashboard")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "REELBOARD_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the dashboard HTTP server.
    Serve(Box<ServeArgs>),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Read list pages from this content backend instead of the fixture.
    #[arg(long = "catalog-base-url", value_name = "URL")]
    pub catalog_base_url: Option<String>,

    /// Load the in-memory catalog from this JSON file.
    #[arg(
        long = "catalog-fixture",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub catalog_fixture: Option<PathBuf>,

    /// Override the upstream request timeout.
    #[arg(long = "catalog-timeout-seconds", value_name = "SECONDS")]
    pub catalog_timeout_seconds: Option<u64>,
}
