//! Translation settings shared by the library and the command-line driver.

use thiserror::Error;

pub const DEFAULT_TAB_WIDTH: usize = 8;
pub const TAB_WIDTH_ENV: &str = "PY2C_TAB_WIDTH";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{variable} must be a positive integer, got '{value}'")]
    InvalidTabWidth { variable: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Tabs advance the indentation column to the next multiple of this width.
    pub tab_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl Config {
    pub fn with_tab_width(tab_width: usize) -> Result<Self, ConfigError> {
        if tab_width == 0 {
            return Err(ConfigError::InvalidTabWidth {
                variable: TAB_WIDTH_ENV,
                value: tab_width.to_string(),
            });
        }
        Ok(Self { tab_width })
    }

    /// Reads overrides from the environment, keeping defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(TAB_WIDTH_ENV) {
            Ok(value) => Self::parse_tab_width(&value),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse_tab_width(value: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidTabWidth {
            variable: TAB_WIDTH_ENV,
            value: value.to_string(),
        };
        let tab_width = value.trim().parse::<usize>().map_err(|_| invalid())?;
        Self::with_tab_width(tab_width).map_err(|_| invalid())
    }
}
