//! German number notation: "." groups thousands, "," separates decimals.

use crate::error::NumberError;

use super::patterns::DECIMAL_TOKEN;

/// Parse a German-formatted number (e.g., "1.234,56" -> 1234.56).
///
/// Every "." is dropped and every "," becomes the decimal point, so
/// inputs with several commas fail rather than being guessed at.
pub fn parse_german_number(s: &str) -> Result<f64, NumberError> {
    let normalized = s.replace('.', "").replace(',', ".");
    normalized
        .trim()
        .parse::<f64>()
        .map_err(|_| NumberError { value: s.to_string() })
}

/// Split a line into its decimal tokens, in order of appearance.
pub fn decimal_tokens(line: &str) -> Vec<&str> {
    DECIMAL_TOKEN.find_iter(line).map(|m| m.as_str()).collect()
}

/// A line is a candidate data row if it has at least one digit and one comma.
pub fn is_candidate_row(line: &str) -> bool {
    line.contains(',') && line.chars().any(|c| c.is_ascii_digit())
}

/// Format a value in German style (1.234,56).
pub fn format_german_number(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (s.as_str(), None),
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if value < 0.0 && s.chars().any(|c| c != '0' && c != '.') {
        formatted.push('-');
    }
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    match decimal_part {
        Some(d) => format!("{},{}", formatted, d),
        None => formatted,
    }
}
