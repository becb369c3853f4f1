//! Engine configuration
//!
//! Runtime parameters for the swap engine, serde-backed so the host
//! application can persist and restore them as JSON.

use pezdex_types::DEFAULT_DISPLAY_DIGITS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("slippage_bps must be <= 10000 (100%), got {0}")]
    SlippageOutOfRange(u16),

    #[error("config parse failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable parameters for quoting and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Slippage tolerance applied to quoted outputs, in basis points
    /// (100 = 1%).
    pub slippage_bps: u16,
    /// Fractional digits shown when formatting balances for display.
    pub display_digits: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slippage_bps: 100, // 1%
            display_digits: DEFAULT_DISPLAY_DIGITS,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize for persistence by the host application.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slippage_bps > 10_000 {
            return Err(ConfigError::SlippageOutOfRange(self.slippage_bps));
        }
        Ok(())
    }
}
