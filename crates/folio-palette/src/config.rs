#![forbid(unsafe_code)]

//! Palette configuration.
//!
//! Defaults match the portfolio site. Environment variables override them:
//!
//! | Variable                     | Field         |
//! |------------------------------|---------------|
//! | `FOLIO_PALETTE_BREAKPOINT`   | `breakpoint`  |
//! | `FOLIO_PALETTE_MAX_VISIBLE`  | `max_visible` |

use std::env;
use std::fmt;

use folio_core::viewport::Breakpoint;

/// Environment override for the narrow/wide threshold (logical pixels).
pub const ENV_BREAKPOINT: &str = "FOLIO_PALETTE_BREAKPOINT";
/// Environment override for the number of visible result rows.
pub const ENV_MAX_VISIBLE: &str = "FOLIO_PALETTE_MAX_VISIBLE";

/// Placeholder shown in the empty query input.
pub const DEFAULT_PLACEHOLDER: &str = "Search for pages and sections...";

/// An environment override that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable is set but not a valid number.
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
    /// The variable parsed but is outside the allowed range.
    OutOfRange {
        /// Variable name.
        var: &'static str,
        /// Parsed value.
        value: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { var, value } => write!(f, "{var}: not a number: {value:?}"),
            Self::OutOfRange { var, value } => write!(f, "{var}: out of range: {value}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Palette configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteConfig {
    /// Widths at or below this are narrow and get no keyboard listener.
    pub breakpoint: Breakpoint,
    /// Result rows visible at once; the selection scrolls within them.
    pub max_visible: usize,
    /// Query input placeholder.
    pub placeholder: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            breakpoint: Breakpoint::DEFAULT,
            max_visible: 8,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
        }
    }
}

impl PaletteConfig {
    /// Set breakpoint (builder).
    pub fn with_breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Set max visible rows (builder). Zero is raised to one.
    pub fn with_max_visible(mut self, n: usize) -> Self {
        self.max_visible = n.max(1);
        self
    }

    /// Set placeholder (builder).
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_overrides(|var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment, a map in tests).
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(ENV_BREAKPOINT) {
            let value = parse_number(ENV_BREAKPOINT, &raw)?;
            let max_narrow = u32::try_from(value).map_err(|_| ConfigError::OutOfRange {
                var: ENV_BREAKPOINT,
                value,
            })?;
            self.breakpoint = Breakpoint::new(max_narrow);
        }
        if let Some(raw) = lookup(ENV_MAX_VISIBLE) {
            let value = parse_number(ENV_MAX_VISIBLE, &raw)?;
            if value == 0 || value > u64::from(u16::MAX) {
                return Err(ConfigError::OutOfRange {
                    var: ENV_MAX_VISIBLE,
                    value,
                });
            }
            self.max_visible = value as usize;
        }
        Ok(self)
    }
}

fn parse_number(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: raw.to_owned(),
        })
}
