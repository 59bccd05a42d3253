//! Display configuration and the layer merge.
//!
//! A logger's effective configuration is assembled from four layers, lowest
//! to highest precedence:
//!
//! 1. built-in defaults ([`InstanceConfig::defaults`])
//! 2. the process-scoped global layer ([`crate::global`])
//! 3. the instance layer, accumulated through [`crate::Logger::config`]
//! 4. an optional per-call override ([`crate::Logger::log_with`])
//!
//! Each of the eleven toggles is resolved independently: a layer only
//! overrides a field it explicitly sets.

use serde::{Deserialize, Serialize};

/// One display/style toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    /// Show the type badge.
    DisplayBadge,
    /// Show the local date.
    DisplayDate,
    /// Show the caller's file name.
    DisplayFilename,
    /// Show the type label.
    DisplayLabel,
    /// Show the scope chain.
    DisplayScope,
    /// Show the local time.
    DisplayTimestamp,
    /// Underline the label.
    UnderlineLabel,
    /// Underline the whole message.
    UnderlineMessage,
    /// Underline the part of the message before the first colon.
    UnderlinePrefix,
    /// Underline the part of the message after the first colon.
    UnderlineSuffix,
    /// Uppercase the label.
    UppercaseLabel,
}

impl ConfigField {
    /// Every field, in declaration order.
    pub const ALL: [ConfigField; 11] = [
        ConfigField::DisplayBadge,
        ConfigField::DisplayDate,
        ConfigField::DisplayFilename,
        ConfigField::DisplayLabel,
        ConfigField::DisplayScope,
        ConfigField::DisplayTimestamp,
        ConfigField::UnderlineLabel,
        ConfigField::UnderlineMessage,
        ConfigField::UnderlinePrefix,
        ConfigField::UnderlineSuffix,
        ConfigField::UppercaseLabel,
    ];

    /// The camelCase key used in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            ConfigField::DisplayBadge => "displayBadge",
            ConfigField::DisplayDate => "displayDate",
            ConfigField::DisplayFilename => "displayFilename",
            ConfigField::DisplayLabel => "displayLabel",
            ConfigField::DisplayScope => "displayScope",
            ConfigField::DisplayTimestamp => "displayTimestamp",
            ConfigField::UnderlineLabel => "underlineLabel",
            ConfigField::UnderlineMessage => "underlineMessage",
            ConfigField::UnderlinePrefix => "underlinePrefix",
            ConfigField::UnderlineSuffix => "underlineSuffix",
            ConfigField::UppercaseLabel => "uppercaseLabel",
        }
    }
}

/// A partial configuration layer.
///
/// `None` means "inherit from the layer below", never `false`. Unknown keys
/// in serialized input are ignored so older binaries accept newer files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_badge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_date: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_filename: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_label: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_scope: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_timestamp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline_label: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline_message: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline_prefix: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline_suffix: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uppercase_label: Option<bool>,
}

impl InstanceConfig {
    /// A layer that sets nothing.
    pub const EMPTY: InstanceConfig = InstanceConfig {
        display_badge: None,
        display_date: None,
        display_filename: None,
        display_label: None,
        display_scope: None,
        display_timestamp: None,
        underline_label: None,
        underline_message: None,
        underline_prefix: None,
        underline_suffix: None,
        uppercase_label: None,
    };

    /// The built-in defaults layer. Every field is set.
    pub fn defaults() -> Self {
        Self {
            display_badge: Some(true),
            display_date: Some(false),
            display_filename: Some(false),
            display_label: Some(true),
            display_scope: Some(true),
            display_timestamp: Some(false),
            underline_label: Some(true),
            underline_message: Some(false),
            underline_prefix: Some(false),
            underline_suffix: Some(false),
            uppercase_label: Some(false),
        }
    }

    /// Get the explicit value of a field, if this layer sets it.
    pub fn get(&self, field: ConfigField) -> Option<bool> {
        match field {
            ConfigField::DisplayBadge => self.display_badge,
            ConfigField::DisplayDate => self.display_date,
            ConfigField::DisplayFilename => self.display_filename,
            ConfigField::DisplayLabel => self.display_label,
            ConfigField::DisplayScope => self.display_scope,
            ConfigField::DisplayTimestamp => self.display_timestamp,
            ConfigField::UnderlineLabel => self.underline_label,
            ConfigField::UnderlineMessage => self.underline_message,
            ConfigField::UnderlinePrefix => self.underline_prefix,
            ConfigField::UnderlineSuffix => self.underline_suffix,
            ConfigField::UppercaseLabel => self.uppercase_label,
        }
    }

    /// Set (or unset with `None`) a field of this layer.
    pub fn set(&mut self, field: ConfigField, value: Option<bool>) {
        match field {
            ConfigField::DisplayBadge => self.display_badge = value,
            ConfigField::DisplayDate => self.display_date = value,
            ConfigField::DisplayFilename => self.display_filename = value,
            ConfigField::DisplayLabel => self.display_label = value,
            ConfigField::DisplayScope => self.display_scope = value,
            ConfigField::DisplayTimestamp => self.display_timestamp = value,
            ConfigField::UnderlineLabel => self.underline_label = value,
            ConfigField::UnderlineMessage => self.underline_message = value,
            ConfigField::UnderlinePrefix => self.underline_prefix = value,
            ConfigField::UnderlineSuffix => self.underline_suffix = value,
            ConfigField::UppercaseLabel => self.uppercase_label = value,
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, field: ConfigField, value: bool) -> Self {
        self.set(field, Some(value));
        self
    }

    /// Whether this layer sets no field at all.
    pub fn is_empty(&self) -> bool {
        ConfigField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// Stack `upper` on top of this layer, producing a new partial layer.
    pub fn overlay(&self, upper: &InstanceConfig) -> InstanceConfig {
        let mut out = *self;
        for field in ConfigField::ALL {
            if let Some(value) = upper.get(field) {
                out.set(field, Some(value));
            }
        }
        out
    }
}

/// The fully merged set of toggles actually used to render a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub display_badge: bool,
    pub display_date: bool,
    pub display_filename: bool,
    pub display_label: bool,
    pub display_scope: bool,
    pub display_timestamp: bool,
    pub underline_label: bool,
    pub underline_message: bool,
    pub underline_prefix: bool,
    pub underline_suffix: bool,
    pub uppercase_label: bool,
}

impl ResolvedConfig {
    /// Get a field.
    pub fn get(&self, field: ConfigField) -> bool {
        match field {
            ConfigField::DisplayBadge => self.display_badge,
            ConfigField::DisplayDate => self.display_date,
            ConfigField::DisplayFilename => self.display_filename,
            ConfigField::DisplayLabel => self.display_label,
            ConfigField::DisplayScope => self.display_scope,
            ConfigField::DisplayTimestamp => self.display_timestamp,
            ConfigField::UnderlineLabel => self.underline_label,
            ConfigField::UnderlineMessage => self.underline_message,
            ConfigField::UnderlinePrefix => self.underline_prefix,
            ConfigField::UnderlineSuffix => self.underline_suffix,
            ConfigField::UppercaseLabel => self.uppercase_label,
        }
    }

    fn set(&mut self, field: ConfigField, value: bool) {
        match field {
            ConfigField::DisplayBadge => self.display_badge = value,
            ConfigField::DisplayDate => self.display_date = value,
            ConfigField::DisplayFilename => self.display_filename = value,
            ConfigField::DisplayLabel => self.display_label = value,
            ConfigField::DisplayScope => self.display_scope = value,
            ConfigField::DisplayTimestamp => self.display_timestamp = value,
            ConfigField::UnderlineLabel => self.underline_label = value,
            ConfigField::UnderlineMessage => self.underline_message = value,
            ConfigField::UnderlinePrefix => self.underline_prefix = value,
            ConfigField::UnderlineSuffix => self.underline_suffix = value,
            ConfigField::UppercaseLabel => self.uppercase_label = value,
        }
    }

    /// View this resolved config as a layer with every field set.
    pub fn as_layer(&self) -> InstanceConfig {
        let mut layer = InstanceConfig::EMPTY;
        for field in ConfigField::ALL {
            layer.set(field, Some(self.get(field)));
        }
        layer
    }

    /// Merge `upper` onto this config, returning the replacement value.
    pub fn apply(&self, upper: &InstanceConfig) -> ResolvedConfig {
        merge_layers(&[&self.as_layer(), upper])
    }
}

/// Resolve a stack of layers, lowest precedence first.
///
/// For each field the last layer that defines it wins; a field defined by no
/// layer resolves to `false`.
pub fn merge_layers(layers: &[&InstanceConfig]) -> ResolvedConfig {
    let mut resolved = ResolvedConfig::default();
    for field in ConfigField::ALL {
        let value = layers
            .iter()
            .rev()
            .find_map(|layer| layer.get(field))
            .unwrap_or(false);
        resolved.set(field, value);
    }
    resolved
}

/// Resolve the four standard layers.
pub fn merge(
    defaults: &InstanceConfig,
    global: &InstanceConfig,
    instance: &InstanceConfig,
    call: &InstanceConfig,
) -> ResolvedConfig {
    merge_layers(&[defaults, global, instance, call])
}
