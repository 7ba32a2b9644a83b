//! Roman numeral formatting for front-matter page numbers.

/// Symbol table in descending value order, subtractive pairs included.
const SYMBOLS: [(u32, &str); 13] = [
    (1000, "m"),
    (900, "cm"),
    (500, "d"),
    (400, "cd"),
    (100, "c"),
    (90, "xc"),
    (50, "l"),
    (40, "xl"),
    (10, "x"),
    (9, "ix"),
    (5, "v"),
    (4, "iv"),
    (1, "i"),
];

/// Format `n` as a lowercase roman numeral.
///
/// Decomposition is greedy, largest symbol first. Callers must pass `n >= 1`;
/// zero yields an empty string. Values above 3999 repeat `m`.
///
/// # Example
///
/// ```
/// use thesis_text::model::to_roman;
///
/// assert_eq!(to_roman(1994), "mcmxciv");
/// assert_eq!(to_roman(4), "iv");
/// ```
pub fn to_roman(n: u32) -> String {
    let mut remaining = n;
    let mut out = String::new();

    for (value, symbol) in SYMBOLS {
        while remaining >= value {
            out.push_str(symbol);
            remaining -= value;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Digit-wise reference table for canonical numerals.
    fn reference(n: u32) -> String {
        const THOUSANDS: [&str; 4] = ["", "m", "mm", "mmm"];
        const HUNDREDS: [&str; 10] = ["", "c", "cc", "ccc", "cd", "d", "dc", "dcc", "dccc", "cm"];
        const TENS: [&str; 10] = ["", "x", "xx", "xxx", "xl", "l", "lx", "lxx", "lxxx", "xc"];
        const ONES: [&str; 10] = ["", "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix"];

        let n = n as usize;
        format!(
            "{}{}{}{}",
            THOUSANDS[n / 1000],
            HUNDREDS[(n / 100) % 10],
            TENS[(n / 10) % 10],
            ONES[n % 10]
        )
    }

    #[test]
    fn test_known_values() {
        assert_eq!(to_roman(1), "i");
        assert_eq!(to_roman(4), "iv");
        assert_eq!(to_roman(9), "ix");
        assert_eq!(to_roman(14), "xiv");
        assert_eq!(to_roman(40), "xl");
        assert_eq!(to_roman(90), "xc");
        assert_eq!(to_roman(400), "cd");
        assert_eq!(to_roman(1994), "mcmxciv");
        assert_eq!(to_roman(3999), "mmmcmxcix");
    }

    #[test]
    fn test_matches_reference_table() {
        for n in 1..4000 {
            assert_eq!(to_roman(n), reference(n), "mismatch for {n}");
        }
    }

    #[test]
    fn test_lowercase_only() {
        for n in 1..4000 {
            assert!(to_roman(n).chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_zero_is_empty() {
        assert_eq!(to_roman(0), "");
    }
}
