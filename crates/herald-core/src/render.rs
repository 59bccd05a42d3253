//! Line assembly.
//!
//! Segment order, left to right, each present only when its toggle is set:
//!
//! ```text
//! [date] [time] badge label [scope>chain] [file.rs] message
//! ```
//!
//! Segments are separated by single spaces and trailing whitespace is
//! trimmed once at the end. Every finished line passes through the
//! instance's [`SecretSet`].

use chrono::{DateTime, Local};

use crate::config::ResolvedConfig;
use crate::message::Arg;
use crate::scope::ScopeChain;
use crate::secrets::SecretSet;
use crate::style::{Color, Painter, Style};
use crate::types::LoggerType;

/// Source of the local wall-clock time shown in date/time segments.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Everything about the call site that shapes a line.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub logger_type: &'a LoggerType,
    pub config: &'a ResolvedConfig,
    pub scope: &'a ScopeChain,
    pub secrets: &'a SecretSet,
    /// Caller file name, shown when `displayFilename` is set
    pub filename: Option<&'a str>,
}

/// Builds decorated lines with the given painter and clock.
pub struct LineRenderer<'a> {
    painter: &'a dyn Painter,
    clock: &'a dyn Clock,
}

impl<'a> LineRenderer<'a> {
    pub fn new(painter: &'a dyn Painter, clock: &'a dyn Clock) -> Self {
        Self { painter, clock }
    }

    /// One redacted line per argument, in call order.
    pub fn render(&self, ctx: &RenderContext<'_>, args: &[Arg]) -> Vec<String> {
        let prefix = self.prefix_segments(ctx);
        args.iter()
            .map(|arg| {
                let mut segments = prefix.clone();
                segments.push(self.message_segment(ctx.config, &arg.render()));
                let line = segments.join(" ");
                ctx.secrets.redact(line.trim_end()).into_owned()
            })
            .collect()
    }

    /// Render a single piece of text as the message.
    pub fn render_one(&self, ctx: &RenderContext<'_>, message: &str) -> String {
        let mut lines = self.render(ctx, &[Arg::from(message)]);
        lines.pop().unwrap_or_default()
    }

    fn prefix_segments(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let config = ctx.config;
        let ty = ctx.logger_type;
        let grey = Style::color(Some(Color::Gray));
        let mut segments = Vec::new();

        if config.display_date || config.display_timestamp {
            let now = self.clock.now();
            if config.display_date {
                let date = format!("[{}]", now.format("%Y-%m-%d"));
                segments.push(self.painter.paint(&date, grey));
            }
            if config.display_timestamp {
                let time = format!("[{}]", now.format("%H:%M:%S"));
                segments.push(self.painter.paint(&time, grey));
            }
        }

        if config.display_badge && !ty.badge.is_empty() {
            segments.push(self.painter.paint(&ty.badge, Style::color(ty.color)));
        }

        if config.display_label && !ty.label.is_empty() {
            let label = if config.uppercase_label {
                ty.label.to_uppercase()
            } else {
                ty.label.clone()
            };
            let style = Style::color(ty.color).underlined(config.underline_label);
            segments.push(self.painter.paint(&label, style));
        }

        if config.display_scope {
            if let Some(scope) = ctx.scope.render() {
                segments.push(self.painter.paint(&scope, grey));
            }
        }

        if config.display_filename {
            if let Some(filename) = ctx.filename.filter(|f| !f.is_empty()) {
                segments.push(self.painter.paint(&format!("[{filename}]"), grey));
            }
        }

        segments
    }

    fn message_segment(&self, config: &ResolvedConfig, message: &str) -> String {
        if config.underline_message {
            return self.painter.paint(message, Style::PLAIN.underlined(true));
        }
        if !(config.underline_prefix || config.underline_suffix) {
            return message.to_string();
        }

        match split_prefix(message) {
            Some((prefix, suffix)) => {
                let prefix = self
                    .painter
                    .paint(prefix, Style::PLAIN.underlined(config.underline_prefix));
                let body = suffix.trim_start();
                let gap = &suffix[..suffix.len() - body.len()];
                if body.is_empty() {
                    return format!("{prefix}:{gap}");
                }
                let body = self
                    .painter
                    .paint(body, Style::PLAIN.underlined(config.underline_suffix));
                format!("{prefix}:{gap}{body}")
            }
            None => message.to_string(),
        }
    }
}

/// Split `prefix: suffix` at the first colon, leaving both sides untouched.
/// The prefix must be non-blank.
fn split_prefix(message: &str) -> Option<(&str, &str)> {
    let (prefix, suffix) = message.split_once(':')?;
    if prefix.trim().is_empty() {
        return None;
    }
    Some((prefix, suffix))
}

/// Last path component of a source path, as shown in the filename segment.
pub fn short_filename(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{merge_layers, ConfigField, InstanceConfig};
    use crate::style::PlainPainter;
    use crate::types::TypeRegistry;
    use chrono::TimeZone;

    /// Marks underlined text with underscores so tests can see it.
    struct MarkingPainter;

    impl Painter for MarkingPainter {
        fn paint(&self, text: &str, style: Style) -> String {
            if style.underline {
                format!("_{text}_")
            } else {
                text.to_string()
            }
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap())
    }

    fn config(layer: InstanceConfig) -> ResolvedConfig {
        merge_layers(&[&InstanceConfig::defaults(), &layer])
    }

    fn render(config: &ResolvedConfig, ty: &str, scope: &ScopeChain, msg: &str) -> String {
        let types = TypeRegistry::with_defaults();
        let secrets = SecretSet::new();
        let clock = clock();
        let renderer = LineRenderer::new(&PlainPainter, &clock);
        let ctx = RenderContext {
            logger_type: types.get(ty).unwrap(),
            config,
            scope,
            secrets: &secrets,
            filename: Some("main.rs"),
        };
        renderer.render_one(&ctx, msg)
    }

    #[test]
    fn test_default_layout() {
        let cfg = config(InstanceConfig::EMPTY);
        assert_eq!(render(&cfg, "success", &ScopeChain::new(), "ok"), "✔ success ok");
    }

    #[test]
    fn test_full_layout_order() {
        let cfg = config(
            InstanceConfig::EMPTY
                .with(ConfigField::DisplayDate, true)
                .with(ConfigField::DisplayTimestamp, true)
                .with(ConfigField::DisplayFilename, true)
                .with(ConfigField::UppercaseLabel, true),
        );
        let scope = ScopeChain::from_names(["a", "b"]);
        assert_eq!(
            render(&cfg, "error", &scope, "bad"),
            "[2024-03-09] [07:05:02] ✖ ERROR [a>b] [main.rs] bad"
        );
    }

    #[test]
    fn test_toggles_remove_segments() {
        let cfg = config(
            InstanceConfig::EMPTY
                .with(ConfigField::DisplayBadge, false)
                .with(ConfigField::DisplayLabel, false)
                .with(ConfigField::DisplayScope, false),
        );
        let scope = ScopeChain::from_names(["net"]);
        assert_eq!(render(&cfg, "info", &scope, "hi"), "hi");
    }

    #[test]
    fn test_undecorated_type_trims() {
        let cfg = config(InstanceConfig::EMPTY);
        assert_eq!(render(&cfg, "log", &ScopeChain::new(), "plain  "), "plain");
    }

    #[test]
    fn test_underline_prefix_and_suffix() {
        let types = TypeRegistry::with_defaults();
        let secrets = SecretSet::new();
        let clock = clock();
        let renderer = LineRenderer::new(&MarkingPainter, &clock);
        let scope = ScopeChain::new();

        let cfg = config(
            InstanceConfig::EMPTY
                .with(ConfigField::DisplayBadge, false)
                .with(ConfigField::DisplayLabel, false)
                .with(ConfigField::UnderlinePrefix, true),
        );
        let ctx = RenderContext {
            logger_type: types.get("info").unwrap(),
            config: &cfg,
            scope: &scope,
            secrets: &secrets,
            filename: None,
        };
        assert_eq!(renderer.render_one(&ctx, "db: connected"), "_db_: connected");
        assert_eq!(renderer.render_one(&ctx, "no colon here"), "no colon here");

        let cfg = cfg.apply(
            &InstanceConfig::EMPTY
                .with(ConfigField::UnderlinePrefix, false)
                .with(ConfigField::UnderlineSuffix, true),
        );
        let ctx = RenderContext { config: &cfg, ..ctx };
        assert_eq!(renderer.render_one(&ctx, "db: connected"), "db: _connected_");
    }

    #[test]
    fn test_prefix_split_keeps_text_intact() {
        let types = TypeRegistry::with_defaults();
        let secrets = SecretSet::new();
        let clock = clock();
        let scope = ScopeChain::new();
        let cfg = config(
            InstanceConfig::EMPTY
                .with(ConfigField::DisplayBadge, false)
                .with(ConfigField::DisplayLabel, false)
                .with(ConfigField::UnderlinePrefix, true)
                .with(ConfigField::UnderlineSuffix, true),
        );
        let ctx = RenderContext {
            logger_type: types.get("info").unwrap(),
            config: &cfg,
            scope: &scope,
            secrets: &secrets,
            filename: None,
        };

        let plain = LineRenderer::new(&PlainPainter, &clock);
        for message in ["see http://example.com", "a:b", "key:   spaced", "ratio 3:1", "end:"] {
            assert_eq!(plain.render_one(&ctx, message), message);
        }

        let marking = LineRenderer::new(&MarkingPainter, &clock);
        assert_eq!(
            marking.render_one(&ctx, "see http://example.com"),
            "_see http_:_//example.com_"
        );
        assert_eq!(marking.render_one(&ctx, "key:   spaced"), "_key_:   _spaced_");
    }

    #[test]
    fn test_underline_message_and_label() {
        let types = TypeRegistry::with_defaults();
        let secrets = SecretSet::new();
        let clock = clock();
        let renderer = LineRenderer::new(&MarkingPainter, &clock);
        let scope = ScopeChain::new();
        let cfg = config(InstanceConfig::EMPTY.with(ConfigField::UnderlineMessage, true));
        let ctx = RenderContext {
            logger_type: types.get("note").unwrap(),
            config: &cfg,
            scope: &scope,
            secrets: &secrets,
            filename: None,
        };
        assert_eq!(renderer.render_one(&ctx, "a: b"), "● _note_ _a: b_");
    }

    #[test]
    fn test_one_line_per_argument_and_redaction() {
        let types = TypeRegistry::with_defaults();
        let mut secrets = SecretSet::new();
        secrets.add(["pw123"]);
        let clock = clock();
        let renderer = LineRenderer::new(&PlainPainter, &clock);
        let scope = ScopeChain::new();
        let cfg = config(InstanceConfig::EMPTY);
        let ctx = RenderContext {
            logger_type: types.get("info").unwrap(),
            config: &cfg,
            scope: &scope,
            secrets: &secrets,
            filename: None,
        };

        let lines = renderer.render(&ctx, &[Arg::from("token=pw123"), Arg::from(7)]);
        assert_eq!(lines, vec!["ℹ info token=[secure]", "ℹ info 7"]);
    }

    #[test]
    fn test_short_filename() {
        assert_eq!(short_filename("src/bin/tool.rs"), "tool.rs");
        assert_eq!(short_filename("C:\\work\\main.rs"), "main.rs");
        assert_eq!(short_filename("lib.rs"), "lib.rs");
    }
}
