pub fn capitalize_first_char_only(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Masks the first `count` chars with `#`, e.g. for card or account numbers.
pub fn mask_prefix(value: &str, count: usize) -> String {
    let masked = value.chars().take(count).count();
    "#".repeat(masked) + &value.chars().skip(count).collect::<String>()
}
