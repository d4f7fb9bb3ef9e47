//! Currency amount entry: normalization, formatting, keystroke limits and
//! the field watcher that ties them together.

use std::sync::LazyLock;

use regex::Regex;

pub mod filter;
pub mod format;
pub mod normalize;
pub mod watcher;

pub type Amount = f64;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric pattern"));
static AMOUNT_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$₦,]").expect("amount noise pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizationMode {
    /// Cents-first entry, currency symbol prefix.
    WithSymbolTwoDecimals,
    /// Cents-first entry, no symbol.
    PlainTwoDecimalsNoSymbol,
    /// Whole number with grouping; a typed decimal part is kept as-is.
    WholeNumberGrouped,
}

impl NormalizationMode {
    pub fn is_cents_first(self) -> bool {
        !matches!(self, NormalizationMode::WholeNumberGrouped)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    pub display: String,
    pub amount: Amount,
}

impl Normalized {
    pub fn cleared() -> Self {
        Self {
            display: String::new(),
            amount: 0.0,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.display.is_empty()
    }
}

pub fn is_numeric(value: &str) -> bool {
    NUMERIC.is_match(value)
}

/// Parses a loosely formatted amount, falling back to `0.0`.
pub fn to_safe_amount(value: &str) -> Amount {
    let cleaned = AMOUNT_NOISE.replace_all(value.trim(), "");
    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        Ok(_) => {
            tracing::warn!(value, "amount out of range, using 0.0");
            0.0
        }
        Err(err) => {
            if !cleaned.is_empty() {
                tracing::warn!(value, %err, "unparseable amount, using 0.0");
            }
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NormalizationMode, is_numeric, to_safe_amount};

    #[test]
    fn is_numeric_accepts_signed_decimals() {
        assert!(is_numeric("42"));
        assert!(is_numeric("-42.5"));
        assert!(!is_numeric("4.2.1"));
        assert!(!is_numeric("1,000"));
        assert!(!is_numeric("."));
        assert!(!is_numeric(""));
        assert!(!is_numeric("12."));
    }

    #[test]
    fn to_safe_amount_strips_symbols() {
        assert_eq!(to_safe_amount("₦1,234.56"), 1234.56);
        assert_eq!(to_safe_amount("$-5.50"), -5.5);
        assert_eq!(to_safe_amount(" 7 "), 7.0);
    }

    #[test]
    fn to_safe_amount_falls_back_to_zero() {
        assert_eq!(to_safe_amount(""), 0.0);
        assert_eq!(to_safe_amount("abc"), 0.0);
        assert_eq!(to_safe_amount("1e400"), 0.0);
    }

    #[test]
    fn only_grouped_mode_keeps_decimal_entry() {
        assert!(NormalizationMode::WithSymbolTwoDecimals.is_cents_first());
        assert!(NormalizationMode::PlainTwoDecimalsNoSymbol.is_cents_first());
        assert!(!NormalizationMode::WholeNumberGrouped.is_cents_first());
    }
}
