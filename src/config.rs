//! Configuration shared by the formatter and the reporters.
//!
//! A [`Config`] can be passed explicitly ([`It::with_config`](crate::It::with_config),
//! [`expect_with`](crate::expect_with)) or installed once per process at
//! harness setup. Without an install, the process-wide config is read from the
//! environment on first use, falling back to the defaults.

use std::str::FromStr;

use once_cell::sync::OnceCell;
use termcolor::ColorChoice;

use crate::error::ConfigError;
use crate::format::{ValueFormatter, DEFAULT_MAX_VALUE_LEN};

/// Overrides [`Config::max_value_len`]; 0 disables truncation.
pub const MAX_VALUE_LEN_VAR: &str = "EXPECTATIONS_MAX_VALUE_LEN";
/// Overrides [`Config::color`]: `auto`, `always` or `never`.
pub const COLOR_VAR: &str = "EXPECTATIONS_COLOR";

static GLOBAL: OnceCell<Config> = OnceCell::new();

/// When console reporters use color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Color only when the stream is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn color_choice(self, stream: atty::Stream) -> ColorChoice {
        match self {
            ColorMode::Auto if atty::is(stream) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(ConfigError::InvalidColor {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Longest value rendering shown in diagnostics before it is cut.
    pub max_value_len: usize,
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_value_len: DEFAULT_MAX_VALUE_LEN,
            color: ColorMode::default(),
        }
    }
}

impl Config {
    pub fn with_max_value_len(mut self, max_value_len: usize) -> Self {
        self.max_value_len = max_value_len;
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::new(self.max_value_len)
    }

    /// Reads [`MAX_VALUE_LEN_VAR`] and [`COLOR_VAR`], keeping defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(MAX_VALUE_LEN_VAR) {
            config.max_value_len =
                value
                    .trim()
                    .parse()
                    .map_err(|source| ConfigError::InvalidMaxValueLen {
                        var: MAX_VALUE_LEN_VAR,
                        value: value.clone(),
                        source,
                    })?;
        }
        if let Some(value) = lookup(COLOR_VAR) {
            config.color = value.parse()?;
        }
        Ok(config)
    }

    /// Makes this the process-wide configuration.
    ///
    /// Only the first install, made before any expectation has read the
    /// process-wide config, succeeds.
    pub fn install(self) -> Result<(), ConfigError> {
        GLOBAL.set(self).map_err(|_| ConfigError::AlreadyInstalled)
    }

    /// The process-wide configuration.
    pub fn global() -> &'static Config {
        GLOBAL.get_or_init(|| Config::from_env().unwrap_or_default())
    }
}
