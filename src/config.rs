use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::amount::filter::DigitLimits;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₦";
pub const DEFAULT_DOLLAR_SYMBOL: &str = "$";

/// Display conventions shared by the normalizer, the formatters and the
/// keystroke filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub currency_symbol: String,
    pub dollar_symbol: String,
    pub grouping_separator: char,
    pub decimal_separator: char,
    pub max_integer_digits: usize,
    pub max_fraction_digits: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            dollar_symbol: DEFAULT_DOLLAR_SYMBOL.to_string(),
            grouping_separator: ',',
            decimal_separator: '.',
            max_integer_digits: 12,
            max_fraction_digits: 2,
        }
    }
}

impl FormatConfig {
    pub fn digit_limits(&self) -> DigitLimits {
        DigitLimits {
            max_integer_digits: self.max_integer_digits,
            max_fraction_digits: self.max_fraction_digits,
            decimal_separator: self.decimal_separator,
            grouping_separator: self.grouping_separator,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FormatConfig> {
    let Some(path) = path else {
        return Ok(FormatConfig::default());
    };
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read config {path:?}"))?;
    let config: FormatConfig =
        serde_json::from_str(&data).with_context(|| format!("invalid JSON in {path:?}"))?;
    tracing::debug!(?path, ?config, "loaded format config");
    Ok(config)
}
