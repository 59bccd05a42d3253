//! Herald demo
//!
//! Walks through configuration layering, scopes, timers, secrets and
//! interactive output.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use herald_core::{
    configure, Arg, ColorMode, ConfigField, InstanceConfig, LogLevel, Logger, LoggerOptions,
};

/// Herald - configuration layering walkthrough
#[derive(Parser, Debug)]
#[command(name = "herald-demo")]
#[command(about = "Herald - configuration layering walkthrough")]
struct Args {
    /// When to color output: auto, always or never
    #[arg(long, default_value = "auto")]
    color: ColorMode,

    /// Skip the interactive section
    #[arg(long)]
    no_interactive: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

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

fn layer(fields: &[(ConfigField, bool)]) -> InstanceConfig {
    fields
        .iter()
        .fold(InstanceConfig::EMPTY, |acc, (field, value)| acc.with(*field, *value))
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let options = || LoggerOptions::new().painter(args.color.painter());

    // Global layer: applies to loggers built from here on
    configure(&layer(&[
        (ConfigField::DisplayFilename, true),
        (ConfigField::DisplayTimestamp, true),
        (ConfigField::DisplayDate, false),
    ]));

    let mut logger = Logger::with_options(options());
    logger.success("Hello from the global layer");

    // A scoped child inherits its parent, then overrides locally
    let mut foo = logger.scope(["foo scope"])?;
    foo.config(&layer(&[
        (ConfigField::DisplayTimestamp, false),
        (ConfigField::DisplayDate, true),
    ]));
    foo.success("Hello from the local layer");

    // Every toggle set on the instance
    logger.config(&layer(&[
        (ConfigField::DisplayScope, false),
        (ConfigField::DisplayBadge, true),
        (ConfigField::DisplayDate, true),
        (ConfigField::DisplayFilename, true),
        (ConfigField::DisplayLabel, true),
        (ConfigField::DisplayTimestamp, true),
        (ConfigField::UnderlineLabel, true),
        (ConfigField::UnderlineMessage, false),
        (ConfigField::UnderlinePrefix, false),
        (ConfigField::UnderlineSuffix, false),
        (ConfigField::UppercaseLabel, false),
    ]));
    logger.success("Hello from the full config");
    logger.info("This is an info message");
    logger.debug("This is a debug message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    // One-off override
    logger.log_with(
        "note",
        &layer(&[(ConfigField::UnderlinePrefix, true), (ConfigField::DisplayDate, false)]),
        ["prefix: only this call underlines it"],
    )?;

    // Structured arguments, one line each
    logger.log(
        "pending",
        [
            Arg::from("queue state"),
            Arg::from(serde_json::json!({ "jobs": 3, "names": ["a", "b"] })),
        ],
    )?;

    // Secrets
    let mut plain = Logger::with_options(options().secrets(["hunter2"]));
    plain.info("password=hunter2");
    plain.add_secrets([4242]);
    plain.info("pin 4242");
    plain.clear_secrets();

    // Level threshold
    plain.set_log_level(LogLevel::Warn);
    plain.info("dropped");
    plain.warn("kept");

    // Timers
    let mut timed = Logger::with_options(options());
    let label = timed.time(None);
    thread::sleep(Duration::from_millis(25));
    timed.time_end(Some(label.as_str()));

    if !args.no_interactive {
        let interactive = Logger::with_options(options().interactive(true).scope(["interactive"]));
        interactive.r#await("[1/3] fetching");
        thread::sleep(Duration::from_millis(300));
        interactive.r#await("[2/3] building");
        thread::sleep(Duration::from_millis(300));
        interactive.success("[3/3] done");
    }

    Ok(())
}
