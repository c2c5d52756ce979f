//! Text and amount formatting for fixed-width receipt columns
//!
//! The printer firmware does not wrap text and has no column rendering of
//! its own, so every column is cut to an exact character count here.

/// Format a whole-rupiah amount with id-ID thousands grouping
///
/// `1234567` becomes `1.234.567`. No decimal places; the sign survives.
pub fn format_amount(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// First `max_chars` characters of `s`; never panics
pub fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Truncate then pad with trailing spaces to exactly `width` characters
pub fn pad_right(s: &str, width: usize) -> String {
    let t = truncate(s, width);
    let len = t.chars().count();
    format!("{}{}", t, " ".repeat(width - len))
}

/// Truncate then pad with leading spaces to exactly `width` characters
pub fn pad_left(s: &str, width: usize) -> String {
    let t = truncate(s, width);
    let len = t.chars().count();
    format!("{}{}", " ".repeat(width - len), t)
}
