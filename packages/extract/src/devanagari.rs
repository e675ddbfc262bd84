//! Character classes shared by the extraction patterns.
//!
//! The classes are spelled out as code-point ranges rather than `\w`/`\d`
//! because Unicode `\d` also matches digits from every other script, and
//! the Devanagari block mixes letters, signs, digits and the dandas.

/// A name letter: Devanagari letters and signs (no dandas, no digits) or
/// ASCII letters.
pub const LETTER: &str = r"[\x{0900}-\x{0963}\x{0971}-\x{097F}A-Za-z]";

/// A digit in either ASCII or Devanagari script.
pub const DIGIT: &str = r"[0-9\x{0966}-\x{096F}]";

/// A letter or digit in either script, as used by house numbers.
pub const ALNUM: &str = r"[\x{0900}-\x{0963}\x{0966}-\x{096F}\x{0971}-\x{097F}0-9A-Za-z]";

const DEVANAGARI_ZERO: u32 = 0x0966;

/// Whether `c` lies in the Devanagari block (U+0900 to U+097F).
#[must_use]
pub const fn is_devanagari(c: char) -> bool {
    matches!(c, '\u{0900}'..='\u{097F}')
}

/// Whether `c` is a Devanagari digit (`०` to `९`).
#[must_use]
pub const fn is_devanagari_digit(c: char) -> bool {
    matches!(c, '\u{0966}'..='\u{096F}')
}

/// Collapses every whitespace run to a single space and trims the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a run of ASCII and/or Devanagari digits.
///
/// Returns `None` for empty input, any other character, or overflow.
#[must_use]
pub fn parse_number(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    text.chars().try_fold(0u32, |acc, c| {
        let digit = if c.is_ascii_digit() {
            c.to_digit(10)?
        } else if is_devanagari_digit(c) {
            u32::from(c) - DEVANAGARI_ZERO
        } else {
            return None;
        };
        acc.checked_mul(10)?.checked_add(digit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ascii_digits() {
        assert_eq!(parse_number("46"), Some(46));
        assert_eq!(parse_number(" 120 "), Some(120));
    }

    #[test]
    fn parses_devanagari_digits() {
        assert_eq!(parse_number("४६"), Some(46));
        assert_eq!(parse_number("१२०"), Some(120));
        assert_eq!(parse_number("1२"), Some(12));
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("4a"), None);
        assert_eq!(parse_number("पु"), None);
        assert_eq!(parse_number("99999999999"), None);
    }

    #[test]
    fn classifies_devanagari() {
        assert!(is_devanagari('क'));
        assert!(is_devanagari('ा'));
        assert!(is_devanagari('।'));
        assert!(!is_devanagari('a'));
        assert!(!is_devanagari(' '));
    }
}
