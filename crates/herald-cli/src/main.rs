//! Herald CLI
//!
//! Thin wrapper around herald-core for logging from shell scripts.
//!
//! ## Usage
//!
//! ```bash
//! # Log a message through a built-in type
//! herald log success "Deployed"
//!
//! # Scoped, timestamped, with a secret masked
//! herald log info --scope deploy --scope db --timestamp --secret hunter2 "password=hunter2"
//!
//! # List the registered types
//! herald types
//!
//! # Show the effective configuration
//! herald config --config ./herald.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use herald_core::{
    config_file, global, ColorMode, ConfigField, InstanceConfig, LevelFilter, Logger,
    LoggerOptions,
};

/// Herald - decorated console logging
#[derive(Parser)]
#[command(name = "herald")]
#[command(version = "0.1.0")]
#[command(about = "Herald - decorated console logging")]
#[command(
    long_about = "Renders leveled, labeled, optionally scoped messages with badges, timestamps and secret redaction."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a message through a logger type
    Log {
        /// Logger type name (info, success, error, ...)
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Message words, joined with spaces
        #[arg(required = true)]
        message: Vec<String>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// List the registered logger types
    Types,

    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        display: DisplayArgs,
    },
}

/// Flags that shape the logger.
#[derive(Args, Debug)]
struct DisplayArgs {
    /// Scope name; repeat to nest
    #[arg(long)]
    scope: Vec<String>,

    /// Minimum level: debug, info, timer, warn, error or off
    #[arg(long)]
    log_level: Option<LevelFilter>,

    /// Value to mask in output; repeatable
    #[arg(long)]
    secret: Vec<String>,

    /// Show the local date
    #[arg(long)]
    date: bool,

    /// Show the local time
    #[arg(long)]
    timestamp: bool,

    /// Show the calling file name
    #[arg(long)]
    filename: bool,

    /// Uppercase labels
    #[arg(long)]
    uppercase: bool,

    /// Hide badges
    #[arg(long)]
    no_badge: bool,

    /// Hide labels
    #[arg(long)]
    no_label: bool,

    /// When to color output: auto, always or never
    #[arg(long, default_value = "auto")]
    color: ColorMode,

    /// Config file (default: nearest herald.json or package.json "herald" key)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl DisplayArgs {
    /// Instance layer built from the flags that were actually given.
    fn layer(&self) -> InstanceConfig {
        let mut layer = InstanceConfig::EMPTY;
        let toggles = [
            (self.date, ConfigField::DisplayDate, true),
            (self.timestamp, ConfigField::DisplayTimestamp, true),
            (self.filename, ConfigField::DisplayFilename, true),
            (self.uppercase, ConfigField::UppercaseLabel, true),
            (self.no_badge, ConfigField::DisplayBadge, false),
            (self.no_label, ConfigField::DisplayLabel, false),
        ];
        for (given, field, value) in toggles {
            if given {
                layer.set(field, Some(value));
            }
        }
        layer
    }

    /// Load the file layer into the global config, then build a logger
    /// with the flags as its instance layer.
    fn build_logger(&self) -> Result<Logger> {
        let file_layer = match &self.config {
            Some(path) => config_file::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => config_file::load_discovered(std::env::current_dir()?)?,
        };
        global::init(file_layer);

        let options = LoggerOptions::new()
            .config(self.layer())
            .log_level(self.log_level.unwrap_or_default())
            .scope(self.scope.iter().cloned())
            .secrets(&self.secret)
            .painter(self.color.painter());
        Ok(Logger::with_options(options))
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Log {
            type_name,
            message,
            display,
        } => {
            let logger = display.build_logger()?;
            logger.log(&type_name, [message.join(" ")])?;
        }

        Commands::Types => {
            let logger = Logger::new();
            for (name, ty) in logger.types().iter() {
                let level = ty
                    .log_level
                    .map(|level| level.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let badge = if ty.badge.is_empty() { "-" } else { ty.badge.as_str() };
                let label = if ty.label.is_empty() { "-" } else { ty.label.as_str() };
                println!("{:<10} {:<2} {:<10} {}", name, badge, label, level);
            }
        }

        Commands::Config { display } => {
            let logger = display.build_logger()?;
            let mut value = serde_json::to_value(logger.resolved_config())?;
            value["logLevel"] = serde_json::to_value(logger.log_level())?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}
