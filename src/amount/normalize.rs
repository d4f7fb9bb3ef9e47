use crate::amount::{Amount, NormalizationMode, Normalized};
use crate::config::FormatConfig;
use crate::utils::{group_digits, only_digits, trim_leading_zeros};

pub fn normalize(raw: &str, mode: NormalizationMode) -> Normalized {
    normalize_with(raw, mode, &FormatConfig::default())
}

/// Reformats raw field text into its canonical display form and parsed
/// amount. Never fails: text without digits normalizes to the cleared state.
pub fn normalize_with(raw: &str, mode: NormalizationMode, config: &FormatConfig) -> Normalized {
    if raw.is_empty() {
        return Normalized::cleared();
    }

    let normalized = match mode {
        NormalizationMode::WithSymbolTwoDecimals => {
            cents_first(raw, Some(&config.currency_symbol), config)
        }
        NormalizationMode::PlainTwoDecimalsNoSymbol => cents_first(raw, None, config),
        NormalizationMode::WholeNumberGrouped => whole_number_grouped(raw, config),
    };
    tracing::debug!(raw, ?mode, display = %normalized.display, "normalized amount text");
    normalized
}

fn cents_first(raw: &str, symbol: Option<&str>, config: &FormatConfig) -> Normalized {
    let digits = only_digits(raw);
    if digits.is_empty() {
        return Normalized::cleared();
    }

    // Minor units: the last two digits are the cents, so dividing by 100
    // never needs rounding.
    let digits = trim_leading_zeros(&digits);
    let padded = format!("{digits:0>3}");
    let (whole, cents) = padded.split_at(padded.len() - 2);
    let Some(amount) = finite_amount(&format!("{whole}.{cents}")) else {
        return Normalized::cleared();
    };

    let display = format!(
        "{}{}{}{}",
        symbol.unwrap_or_default(),
        group_digits(whole, config.grouping_separator),
        config.decimal_separator,
        cents
    );
    Normalized { display, amount }
}

fn whole_number_grouped(raw: &str, config: &FormatConfig) -> Normalized {
    let mut whole = String::new();
    let mut fraction: Option<String> = None;
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            match fraction.as_mut() {
                Some(fraction) => fraction.push(ch),
                None => whole.push(ch),
            }
        } else if ch == config.decimal_separator && fraction.is_none() {
            fraction = Some(String::new());
        }
    }

    let fraction_digits = fraction.as_deref().unwrap_or_default();
    if whole.is_empty() && fraction_digits.is_empty() {
        return Normalized::cleared();
    }

    let whole = match trim_leading_zeros(&whole) {
        "" => "0",
        trimmed => trimmed,
    };
    let plain = if fraction_digits.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction_digits}")
    };
    let Some(amount) = finite_amount(&plain) else {
        return Normalized::cleared();
    };

    let mut display = group_digits(whole, config.grouping_separator);
    if let Some(fraction) = &fraction {
        display.push(config.decimal_separator);
        display.push_str(fraction);
    }
    Normalized { display, amount }
}

/// Parses a plain `digits[.digits]` amount. Text too long for an `f64` would
/// show a value the amount cannot carry, so it is refused.
fn finite_amount(plain: &str) -> Option<Amount> {
    match plain.parse::<Amount>() {
        Ok(amount) if amount.is_finite() => Some(amount),
        _ => {
            tracing::warn!(digits = plain.len(), "amount out of range, clearing");
            None
        }
    }
}
