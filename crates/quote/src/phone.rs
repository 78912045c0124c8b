/// Formats a phone number as the user types: digits only, shaped as `(555) 123-4567`.
/// Digits past the tenth are dropped.
pub fn format_phone(raw: &str) -> String {
    let digits = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(10)
        .collect::<String>();

    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({digits}"),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}
