//! The logger instance.
//!
//! A [`Logger`] owns its configuration, type registry, scope chain, secrets,
//! timers and output streams. Scoped children are independent copies.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::{merge, InstanceConfig, ResolvedConfig};
use crate::dispatch::{resolve_targets, should_emit, Dispatcher};
use crate::error::{HeraldError, HeraldResult};
use crate::global;
use crate::level::{LevelFilter, LogLevel};
use crate::message::Arg;
use crate::render::{short_filename, Clock, LineRenderer, RenderContext, SystemClock};
use crate::scope::ScopeChain;
use crate::secrets::SecretSet;
use crate::stream::StreamSet;
use crate::style::{AnsiPainter, Color, Painter};
use crate::timer::{TimerRegistry, TimerSpan};
use crate::types::{LoggerType, LoggerTypePatch, TypeRegistry};

const TIMER_STARTED: &str = "Initialized timer...";

/// Construction options for [`Logger::with_options`].
#[derive(Clone, Default)]
pub struct LoggerOptions {
    /// Instance configuration layer
    pub config: InstanceConfig,
    /// Start disabled
    pub disabled: bool,
    /// Overwrite the previous line on each write
    pub interactive: bool,
    pub log_level: LevelFilter,
    /// Initial scope names
    pub scope: Vec<String>,
    pub secrets: Vec<String>,
    /// Default targets for types without their own streams
    pub stream: Option<StreamSet>,
    /// Custom types, merged by name onto the built-in set
    pub types: Vec<(String, LoggerTypePatch)>,
    /// Defaults to [`AnsiPainter`]
    pub painter: Option<Arc<dyn Painter>>,
    /// Defaults to [`SystemClock`]
    pub clock: Option<Arc<dyn Clock>>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: InstanceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn log_level(mut self, log_level: impl Into<LevelFilter>) -> Self {
        self.log_level = log_level.into();
        self
    }

    pub fn scope<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn secrets<I, S>(mut self, secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.secrets = secrets.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn stream(mut self, stream: impl Into<StreamSet>) -> Self {
        self.stream = Some(stream.into());
        self
    }

    /// Add or patch a type.
    pub fn with_type(mut self, name: impl Into<String>, patch: impl Into<LoggerTypePatch>) -> Self {
        self.types.push((name.into(), patch.into()));
        self
    }

    pub fn painter(mut self, painter: Arc<dyn Painter>) -> Self {
        self.painter = Some(painter);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("config", &self.config)
            .field("disabled", &self.disabled)
            .field("interactive", &self.interactive)
            .field("log_level", &self.log_level)
            .field("scope", &self.scope)
            .field("secrets", &self.secrets.len())
            .field("stream", &self.stream)
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}

/// A structured console logger.
#[derive(Clone)]
pub struct Logger {
    config: ResolvedConfig,
    scope: ScopeChain,
    types: TypeRegistry,
    secrets: SecretSet,
    timers: TimerRegistry,
    enabled: bool,
    level_filter: LevelFilter,
    stream: Option<StreamSet>,
    dispatcher: Dispatcher,
    painter: Arc<dyn Painter>,
    clock: Arc<dyn Clock>,
}

impl Logger {
    /// A logger with default options.
    pub fn new() -> Self {
        Self::with_options(LoggerOptions::default())
    }

    /// Build a logger. The global layer is read once, here.
    pub fn with_options(options: LoggerOptions) -> Self {
        let config = merge(
            &InstanceConfig::defaults(),
            &global::snapshot(),
            &options.config,
            &InstanceConfig::EMPTY,
        );

        let mut types = TypeRegistry::with_defaults();
        for (name, patch) in &options.types {
            types.patch(name, patch);
        }

        let mut secrets = SecretSet::new();
        secrets.add(&options.secrets);

        debug!(
            types = types.len(),
            interactive = options.interactive,
            level = %options.log_level,
            "logger created"
        );

        Self {
            config,
            scope: ScopeChain::from_names(&options.scope),
            types,
            secrets,
            timers: TimerRegistry::new(),
            enabled: !options.disabled,
            level_filter: options.log_level,
            stream: options.stream,
            dispatcher: Dispatcher::new(options.interactive),
            painter: options.painter.unwrap_or_else(|| Arc::new(AnsiPainter)),
            clock: options.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        }
    }

    // ------------------------------------------------------------------
    // Emission
    // ------------------------------------------------------------------

    /// Log through the type called `type_name`, one line per argument.
    #[track_caller]
    pub fn log<I, A>(&self, type_name: &str, args: I) -> HeraldResult<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        let args: Vec<Arg> = args.into_iter().map(Into::into).collect();
        self.emit(type_name, None, &args, Location::caller())
    }

    /// Like [`Logger::log`] with a per-call configuration override on top.
    #[track_caller]
    pub fn log_with<I, A>(
        &self,
        type_name: &str,
        call_config: &InstanceConfig,
        args: I,
    ) -> HeraldResult<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        let args: Vec<Arg> = args.into_iter().map(Into::into).collect();
        self.emit(type_name, Some(call_config), &args, Location::caller())
    }

    fn emit(
        &self,
        type_name: &str,
        call_config: Option<&InstanceConfig>,
        args: &[Arg],
        location: &Location<'_>,
    ) -> HeraldResult<()> {
        let ty = self
            .types
            .get(type_name)
            .ok_or_else(|| HeraldError::UnknownType(type_name.to_string()))?;
        let config = match call_config {
            Some(call) => self.config.apply(call),
            None => self.config,
        };
        self.dispatch(type_name, ty, &config, args, location)
    }

    fn emit_or_warn(&self, type_name: &str, arg: Arg, location: &Location<'_>) {
        if let Err(e) = self.emit(type_name, None, std::slice::from_ref(&arg), location) {
            warn!(type_name, error = %e, "Failed to write log line");
        }
    }

    fn dispatch(
        &self,
        type_name: &str,
        ty: &LoggerType,
        config: &ResolvedConfig,
        args: &[Arg],
        location: &Location<'_>,
    ) -> HeraldResult<()> {
        if !should_emit(self.enabled, self.level_filter, ty) {
            trace!(type_name, enabled = self.enabled, "call gated");
            return Ok(());
        }

        let ctx = RenderContext {
            logger_type: ty,
            config,
            scope: &self.scope,
            secrets: &self.secrets,
            filename: Some(short_filename(location.file())),
        };
        let lines = LineRenderer::new(self.painter.as_ref(), self.clock.as_ref()).render(&ctx, args);
        let targets = resolve_targets(type_name, ty, self.stream.as_ref());
        self.dispatcher.write(&targets, &lines)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Merge `config` onto this instance's effective configuration.
    /// Cumulative across calls.
    pub fn config(&mut self, config: &InstanceConfig) -> &mut Self {
        self.config = self.config.apply(config);
        debug!(config = ?self.config, "instance config updated");
        self
    }

    /// The effective configuration, without any per-call override.
    pub fn resolved_config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn set_log_level(&mut self, filter: impl Into<LevelFilter>) {
        self.level_filter = filter.into();
    }

    pub fn log_level(&self) -> LevelFilter {
        self.level_filter
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    pub fn is_interactive(&self) -> bool {
        self.dispatcher.is_interactive()
    }

    // ------------------------------------------------------------------
    // Scope
    // ------------------------------------------------------------------

    /// A child logger whose chain is this one's followed by `names`.
    ///
    /// Fails with [`HeraldError::EmptyScope`] when every name is blank.
    pub fn scope<I, S>(&self, names: I) -> HeraldResult<Logger>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let scope = self.scope.pushed(names);
        if scope.len() == self.scope.len() {
            return Err(HeraldError::EmptyScope);
        }
        debug!(scope = %scope, "scoped logger created");

        Ok(Logger {
            scope,
            timers: TimerRegistry::new(),
            ..self.clone()
        })
    }

    /// Drop every scope segment from this instance.
    pub fn unscope(&mut self) {
        self.scope.clear();
    }

    pub fn scope_chain(&self) -> &ScopeChain {
        &self.scope
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Start a timer and announce it. Returns the label used.
    #[track_caller]
    pub fn time(&mut self, label: Option<&str>) -> String {
        let location = Location::caller();
        let label = self.timers.start(label);
        let ty = self.timer_type("start", "▶", Color::Green, &label);
        if let Err(e) = self.dispatch("timer", &ty, &self.config, &[Arg::from(TIMER_STARTED)], location) {
            warn!(label = %label, error = %e, "Failed to write timer line");
        }
        label
    }

    /// Stop a timer and report its run time. `None` when no such timer is
    /// running; nothing is written in that case.
    #[track_caller]
    pub fn time_end(&mut self, label: Option<&str>) -> Option<TimerSpan> {
        let location = Location::caller();
        let span = self.timers.stop(label)?;
        let ty = self.timer_type("pause", "■", Color::Yellow, &span.label);
        let message = Arg::from(format!("Timer run for: {}ms", span.elapsed_millis()));
        if let Err(e) = self.dispatch("timer", &ty, &self.config, &[message], location) {
            warn!(label = %span.label, error = %e, "Failed to write timer line");
        }
        Some(span)
    }

    /// Timer lines borrow the badge and color of a registered type, show the
    /// timer label, and sit at the `timer` level.
    fn timer_type(&self, source: &str, badge: &str, color: Color, label: &str) -> LoggerType {
        let mut ty = match self.types.get(source) {
            Some(ty) => LoggerType {
                stream: None,
                ..ty.clone()
            },
            None => LoggerType::new(badge, color, label, LogLevel::Timer),
        };
        ty.label = label.to_string();
        ty.log_level = Some(LogLevel::Timer);
        ty
    }

    // ------------------------------------------------------------------
    // Secrets and enablement
    // ------------------------------------------------------------------

    pub fn add_secrets<I, S>(&mut self, secrets: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.secrets.add(secrets);
    }

    pub fn clear_secrets(&mut self) {
        self.secrets.clear();
    }

    pub fn secrets(&self) -> &SecretSet {
        &self.secrets
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("scope", &self.scope)
            .field("types", &self.types.len())
            .field("secrets", &self.secrets.len())
            .field("timers", &self.timers.len())
            .field("enabled", &self.enabled)
            .field("level_filter", &self.level_filter)
            .field("stream", &self.stream)
            .field("interactive", &self.dispatcher.is_interactive())
            .finish_non_exhaustive()
    }
}

/// One method per built-in type. Write failures are reported through
/// `tracing`; use [`Logger::log`] to handle them.
macro_rules! type_methods {
    ($($method:ident => $name:literal),* $(,)?) => {
        impl Logger {
            $(
                #[doc = concat!("Log through the `", $name, "` type.")]
                #[track_caller]
                pub fn $method(&self, message: impl Into<Arg>) {
                    self.emit_or_warn($name, message.into(), Location::caller());
                }
            )*
        }
    };
}

type_methods! {
    r#await => "await",
    complete => "complete",
    debug => "debug",
    error => "error",
    fatal => "fatal",
    fav => "fav",
    info => "info",
    log_plain => "log",
    note => "note",
    pause => "pause",
    pending => "pending",
    star => "star",
    start => "start",
    success => "success",
    wait => "wait",
    warn => "warn",
    watch => "watch",
}
