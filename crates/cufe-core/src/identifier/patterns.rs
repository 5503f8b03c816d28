//! Regex patterns used to locate identifier candidates.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A maximal run of hex digits, possibly broken by line breaks. Length is
    // checked afterwards on the stripped value, not here.
    pub static ref HEX_RUN: Regex = Regex::new(
        r"[0-9A-Fa-f][0-9A-Fa-f\r\n]*"
    ).unwrap();
}

/// Characters that may split an identifier across lines.
pub fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Characters that glue a hex run to surrounding text.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_run_is_maximal() {
        let m = HEX_RUN.find("no: abc\n123\nxyz").unwrap();
        assert_eq!(m.as_str(), "abc\n123\n");
    }

    #[test]
    fn test_hex_run_does_not_start_on_line_break() {
        let m = HEX_RUN.find("\n\nff").unwrap();
        assert_eq!(m.start(), 2);
    }
}
