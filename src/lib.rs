//! Currency amount entry helpers: cents-first text normalization for amount
//! fields, keystroke digit limits, currency formatting, plus small string,
//! image payload and JSON utilities.

pub mod amount;
pub mod config;
pub mod error;
pub mod field;
pub mod helpers;
pub mod utils;

pub use amount::{
    Amount, NormalizationMode, Normalized,
    filter::{DecimalDigitsFilter, DigitLimits, validate_keystroke, validate_keystroke_with},
    normalize::{normalize, normalize_with},
    watcher::CurrencyWatcher,
};
pub use config::FormatConfig;
pub use field::{EditField, TextWatcher};
