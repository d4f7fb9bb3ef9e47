pub fn only_digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

pub fn trim_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    }
}

pub fn group_digits(digits: &str, separator: char) -> String {
    let mut parts = Vec::new();
    let mut end = digits.len();
    while end > 0 {
        let start = end.saturating_sub(3);
        parts.push(&digits[start..end]);
        end = start;
    }
    parts.reverse();
    parts.join(&separator.to_string())
}

/// Byte offset of the `index`-th char, or `None` past the end.
pub fn byte_offset(s: &str, index: usize) -> Option<usize> {
    s.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(s.len()))
        .nth(index)
}
