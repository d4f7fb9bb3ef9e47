use std::ops::Range;

use crate::amount::NormalizationMode;
use crate::field::InputFilter;
use crate::utils::{byte_offset, only_digits, trim_leading_zeros};

/// Cents-first entry always ends in exactly this many fraction digits.
const MINOR_UNIT_DIGITS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitLimits {
    pub max_integer_digits: usize,
    pub max_fraction_digits: usize,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl DigitLimits {
    /// Limits using `.` as decimal and `,` as grouping separator.
    pub fn new(max_integer_digits: usize, max_fraction_digits: usize) -> Self {
        Self {
            max_integer_digits,
            max_fraction_digits,
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }

    pub fn with_separators(mut self, decimal_separator: char, grouping_separator: char) -> Self {
        self.decimal_separator = decimal_separator;
        self.grouping_separator = grouping_separator;
        self
    }

    /// Checks text as it would read after the edit. Grouping separators are
    /// ignored; anything else that is not a digit or the single decimal
    /// separator fails.
    pub fn allows(&self, prospective: &str) -> bool {
        let mut integer_digits = 0;
        let mut fraction_digits: Option<usize> = None;
        for ch in prospective.chars() {
            if ch == self.decimal_separator {
                if fraction_digits.is_some() || self.max_fraction_digits == 0 {
                    return false;
                }
                fraction_digits = Some(0);
            } else if ch == self.grouping_separator {
                continue;
            } else if ch.is_ascii_digit() {
                match fraction_digits.as_mut() {
                    Some(count) => *count += 1,
                    None => integer_digits += 1,
                }
            } else {
                return false;
            }
        }
        integer_digits <= self.max_integer_digits
            && fraction_digits.unwrap_or(0) <= self.max_fraction_digits
    }

    /// Checks text the way cents-first normalization reads it: every digit is
    /// a minor unit and the last two are the cents, whatever the symbol and
    /// separators on screen.
    pub fn allows_minor_units(&self, prospective: &str) -> bool {
        let digits = only_digits(prospective);
        let whole_digits = trim_leading_zeros(&digits)
            .len()
            .saturating_sub(MINOR_UNIT_DIGITS);
        whole_digits <= self.max_integer_digits
    }
}

/// Whether appending `inserted` to `current` stays within the limits, with
/// `.` as decimal and `,` as grouping separator. Use
/// [`validate_keystroke_with`] for other separators.
pub fn validate_keystroke(
    current: &str,
    inserted: &str,
    max_integer_digits: usize,
    max_fraction_digits: usize,
) -> bool {
    validate_keystroke_with(
        current,
        inserted,
        &DigitLimits::new(max_integer_digits, max_fraction_digits),
    )
}

pub fn validate_keystroke_with(current: &str, inserted: &str, limits: &DigitLimits) -> bool {
    limits.allows(&format!("{current}{inserted}"))
}

fn prospective_text(current: &str, range: Range<usize>, inserted: &str) -> Option<String> {
    let from = byte_offset(current, range.start)?;
    let to = byte_offset(current, range.end)?;
    if from > to {
        return None;
    }
    Some(format!("{}{inserted}{}", &current[..from], &current[to..]))
}

/// Positional variant of [`validate_keystroke`]; `range` is in chars.
pub fn validate_edit(current: &str, range: Range<usize>, inserted: &str, limits: &DigitLimits) -> bool {
    prospective_text(current, range, inserted).is_some_and(|text| limits.allows(&text))
}

/// Field filter rejecting edits that break [`DigitLimits`].
///
/// In cents-first modes the field shows formatted text (symbol, separators,
/// two cents), so edits are measured in minor-unit digits instead.
#[derive(Clone, Copy, Debug)]
pub struct DecimalDigitsFilter {
    limits: DigitLimits,
    cents_first: bool,
}

impl DecimalDigitsFilter {
    pub fn new(limits: DigitLimits) -> Self {
        Self {
            limits,
            cents_first: false,
        }
    }

    pub fn for_mode(limits: DigitLimits, mode: NormalizationMode) -> Self {
        Self {
            limits,
            cents_first: mode.is_cents_first(),
        }
    }
}

impl InputFilter for DecimalDigitsFilter {
    fn accepts(&self, current: &str, range: Range<usize>, inserted: &str) -> bool {
        if !self.cents_first {
            return validate_edit(current, range, inserted, &self.limits);
        }
        prospective_text(current, range, inserted)
            .is_some_and(|text| self.limits.allows_minor_units(&text))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{
        DecimalDigitsFilter, DigitLimits, validate_edit, validate_keystroke,
        validate_keystroke_with,
    };
    use crate::amount::{NormalizationMode, watcher::CurrencyWatcher};
    use crate::field::EditField;

    #[test]
    fn accepts_within_limits() {
        assert!(validate_keystroke("", "1", 5, 2));
        assert!(validate_keystroke("123", ".", 5, 2));
        assert!(validate_keystroke("123.4", "5", 5, 2));
        assert!(validate_keystroke("1,234", "5", 5, 2));
        assert!(validate_keystroke("", ".", 5, 2));
    }

    #[test]
    fn rejects_second_decimal_point() {
        assert!(!validate_keystroke("1.2", ".", 5, 2));
        assert!(!validate_keystroke("", "1.2.", 5, 2));
    }

    #[test]
    fn rejects_exceeding_digit_limits() {
        assert!(!validate_keystroke("12345", "6", 5, 2));
        assert!(!validate_keystroke("1.23", "4", 5, 2));
        assert!(!validate_keystroke("1", ".", 5, 0));
        assert!(!validate_keystroke("1", "a", 5, 2));
    }

    #[test]
    fn edit_position_decides_which_side_grows() {
        let limits = DigitLimits::new(3, 2);
        // "12.34" with a digit inserted before the point.
        assert!(validate_edit("12.34", 0..0, "9", &limits));
        // After the point the fraction overflows.
        assert!(!validate_edit("12.34", 3..3, "9", &limits));
        // A second point anywhere is refused.
        assert!(!validate_edit("12.34", 0..0, ".", &limits));
        assert!(!validate_edit("12.34", 5..5, ".", &limits));
        // Replacing the point itself is fine.
        assert!(validate_edit("12.34", 2..3, ".", &limits));
        assert!(!validate_edit("12", 1..4, "", &limits));
    }

    #[test]
    fn filter_blocks_keystrokes_on_a_field() {
        let field = EditField::new();
        field.add_filter(DecimalDigitsFilter::new(DigitLimits::new(3, 1)));
        for key in ["1", "2", "3", "4", ".", "5", "6", "."] {
            field.type_text(key);
        }
        assert_eq!(field.text(), "123.5");
    }

    #[test]
    fn keystroke_check_honours_configured_separators() {
        let limits = DigitLimits::new(5, 2).with_separators(',', '.');
        assert!(validate_keystroke_with("1.234", ",5", &limits));
        assert!(!validate_keystroke_with("1,2", ",", &limits));
        assert!(!validate_keystroke_with("1,23", "4", &limits));
        // The plain form keeps `,` as a grouping separator.
        assert!(validate_keystroke("1,2", ",", 5, 2));
    }

    #[test]
    fn cents_first_fields_count_minor_units() {
        for mode in [
            NormalizationMode::PlainTwoDecimalsNoSymbol,
            NormalizationMode::WithSymbolTwoDecimals,
        ] {
            let field = EditField::new();
            field.add_filter(DecimalDigitsFilter::for_mode(DigitLimits::new(3, 2), mode));
            let _watcher: Rc<CurrencyWatcher> = CurrencyWatcher::new(mode).attach(&field);

            let accepted: Vec<bool> = ["1", "2", "3", "4", "5", "6"]
                .iter()
                .map(|key| field.type_text(key))
                .collect();

            assert_eq!(accepted, vec![true, true, true, true, true, false], "mode {mode:?}");
            assert!(field.text().ends_with("123.45"), "mode {mode:?}: {}", field.text());
            assert!(field.delete_backward());
            assert!(field.text().ends_with("12.34"), "mode {mode:?}: {}", field.text());
        }
    }
}
