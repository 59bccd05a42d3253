//! Herald Core Library
//!
//! Leveled, labeled, optionally scoped console logging with configurable
//! decoration, named timers and secret redaction.
//!
//! ## Overview
//!
//! A [`Logger`] renders each call through a named logger type (`info`,
//! `success`, `error`, ...) into one decorated line per argument:
//!
//! ```text
//! [date] [time] badge label [scope>chain] [file.rs] message
//! ```
//!
//! ## Configuration layers
//!
//! - **Defaults**: built-in toggles
//! - **Global**: process-wide, see [`configure`]
//! - **Instance**: accumulated through [`Logger::config`]
//! - **Call**: a one-off override passed to [`Logger::log_with`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use herald_core::{ConfigField, InstanceConfig, Logger};
//!
//! fn main() -> herald_core::HeraldResult<()> {
//!     let mut logger = Logger::new();
//!     logger.config(&InstanceConfig::EMPTY.with(ConfigField::DisplayTimestamp, true));
//!     logger.success("Operation successful");
//!
//!     let db = logger.scope(["db"])?;
//!     db.warn("slow query");
//!
//!     logger.time(Some("load"));
//!     logger.time_end(Some("load"));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod config_file;
pub mod dispatch;
pub mod error;
pub mod global;
pub mod level;
pub mod logger;
pub mod message;
pub mod render;
pub mod scope;
pub mod secrets;
pub mod stream;
pub mod style;
pub mod timer;
pub mod types;

// Re-exports
pub use config::{merge, merge_layers, ConfigField, InstanceConfig, ResolvedConfig};
pub use error::{HeraldError, HeraldResult};
pub use global::configure;
pub use level::{LevelFilter, LogLevel};
pub use logger::{Logger, LoggerOptions};
pub use message::Arg;
pub use render::{Clock, FixedClock, LineRenderer, RenderContext, SystemClock};
pub use scope::ScopeChain;
pub use secrets::{SecretSet, MASK};
pub use stream::{SharedBuffer, StreamSet, Target};
pub use style::{AnsiPainter, Color, ColorMode, Painter, PlainPainter, Style};
pub use timer::{TimerRegistry, TimerSpan};
pub use types::{LoggerType, LoggerTypePatch, TypeRegistry, DEFAULT_TYPE_NAMES};
