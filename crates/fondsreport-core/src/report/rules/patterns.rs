//! Regex patterns for the German fund report tables.

use lazy_static::lazy_static;
use regex::Regex;

// Digits are ASCII only, matching `is_candidate_row`.
lazy_static! {
    // Volume table: "<category> <amount> <D,DD>%". Applied to the whole
    // text, so a match may span line breaks.
    pub static ref VOLUME_ROW: Regex = Regex::new(
        r"(?P<category>[A-Za-zÄÖÜäöüß\s\-]+)\s+(?P<volume>[0-9.,]+)\s+(?P<share>[0-9]{1,2},[0-9]{2})%"
    ).unwrap();

    // Any German decimal token, optionally negative (e.g. -1.234,5)
    pub static ref DECIMAL_TOKEN: Regex = Regex::new(
        r"-?[0-9.]+,[0-9]+"
    ).unwrap();

    // Strict German amount with two decimals: 1.234.567,89
    pub static ref GERMAN_AMOUNT: Regex = Regex::new(
        r"[0-9]{1,3}(?:\.[0-9]{3})*,[0-9]{2}"
    ).unwrap();

    pub static ref LEADING_AMOUNT: Regex = Regex::new(
        r"^[0-9]{1,3}(?:\.[0-9]{3})*,[0-9]{2}"
    ).unwrap();

    // Name followed by the first amount on the line. The name must end in
    // something other than a digit or dot so an amount is never cut out of
    // a longer digit run.
    pub static ref NAME_AMOUNT_SPLIT: Regex = Regex::new(
        r"^(?P<name>.*?[^0-9.])?(?P<amount>[0-9]{1,3}(?:\.[0-9]{3})*,[0-9]{2})"
    ).unwrap();

    pub static ref HAS_LETTER: Regex = Regex::new(
        r"\p{L}"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_german_amount_shapes() {
        assert!(GERMAN_AMOUNT.is_match("1.234,56"));
        assert!(GERMAN_AMOUNT.is_match("12,00"));
        assert!(!GERMAN_AMOUNT.is_match("12,0"));
        assert!(LEADING_AMOUNT.is_match("1.234,00 Mio"));
        assert!(!LEADING_AMOUNT.is_match("Summe 1.234,00"));
    }

    #[test]
    fn test_name_amount_split_takes_first_amount() {
        let caps = NAME_AMOUNT_SPLIT.captures("Union Investment 1.234,00 5,00").unwrap();
        assert_eq!(&caps["name"], "Union Investment ");
        assert_eq!(&caps["amount"], "1.234,00");
    }

    #[test]
    fn test_name_amount_split_rejects_broken_digit_runs() {
        assert!(NAME_AMOUNT_SPLIT.captures("Fonds 12345,67").is_none());
        let caps = NAME_AMOUNT_SPLIT.captures("987,65 Mio").unwrap();
        assert!(caps.name("name").is_none());
    }

    #[test]
    fn test_non_ascii_digits_are_not_numbers() {
        // Arabic-Indic and full-width digits
        assert!(!DECIMAL_TOKEN.is_match("\u{0661}\u{0662},\u{0663}\u{0664}"));
        assert!(!GERMAN_AMOUNT.is_match("\u{FF11}\u{FF12},\u{FF13}\u{FF14}"));
        assert!(!VOLUME_ROW.is_match("Aktienfonds \u{0661}\u{0662},\u{0663} \u{0661},\u{0662}\u{0663}%"));
    }

    #[test]
    fn test_has_letter_accepts_umlauts() {
        assert!(HAS_LETTER.is_match("Ö"));
        assert!(!HAS_LETTER.is_match("1.234,00 -5,00"));
    }
}
