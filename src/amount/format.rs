use crate::amount::Amount;
use crate::config::FormatConfig;
use crate::utils::group_digits;

/// Two-decimal grouped rendering of `amount`. The sign always comes first,
/// ahead of the symbol.
pub fn format_amount(amount: Amount, symbol: Option<&str>, config: &FormatConfig) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let is_zero = whole.bytes().chain(cents.bytes()).all(|b| b == b'0');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

    format!(
        "{sign}{}{}{}{cents}",
        symbol.unwrap_or_default(),
        group_digits(whole, config.grouping_separator),
        config.decimal_separator,
    )
}

pub fn format_currency(amount: Amount, config: &FormatConfig) -> String {
    format_amount(amount, Some(&config.currency_symbol), config)
}

pub fn format_currency_no_symbol(amount: Amount, config: &FormatConfig) -> String {
    format_amount(amount, None, config)
}

pub fn format_currency_dollar(amount: Amount, config: &FormatConfig) -> String {
    format_amount(amount, Some(&config.dollar_symbol), config)
}
