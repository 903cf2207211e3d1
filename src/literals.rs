//! Conversion of literal lexemes into typed values.
//!
//! The lexer keeps literal text as-is; the strict validation (and the
//! resulting diagnostics) happens here, where the failure can be
//! reported with a proper message instead of a scan error.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LiteralError {
    /// The integer does not fit in 64 bits.
    IntegerOutOfRange(String),
    /// The string literal is unterminated or contains a character
    /// outside printable ASCII (space through '~').
    BadString(String),
    /// The hex literal has an odd number of digits or a stray
    /// non-hex character.
    BadHex(String),
}

impl Display for LiteralError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LiteralError::IntegerOutOfRange(text) => {
                write!(f, "integer literal '{text}' does not fit in 64 bits")
            }
            LiteralError::BadString(msg) => f.write_str(msg),
            LiteralError::BadHex(msg) => f.write_str(msg),
        }
    }
}

impl Error for LiteralError {}

/// Parses a decimal integer literal.  The lexer guarantees the text
/// is one or more decimal digits; leading zeroes are allowed.
pub(crate) fn parse_integer(text: &str) -> Result<u64, LiteralError> {
    text.parse::<u64>()
        .map_err(|_| LiteralError::IntegerOutOfRange(text.to_string()))
}

/// Parses a quoted string literal, returning its contents without
/// the quotes.  Contents are restricted to printable ASCII; there is
/// no escape-sequence interpretation.
pub(crate) fn parse_string(raw: &str) -> Result<String, LiteralError> {
    let body = match raw.strip_prefix('"') {
        Some(rest) => rest,
        None => {
            // The lexer only produces Str tokens starting with a
            // quote, so this indicates a bug in the lexer rules.
            return Err(LiteralError::BadString(format!(
                "string literal {raw} does not start with '\"'"
            )));
        }
    };
    let contents = match body.strip_suffix('"') {
        Some(contents) => contents,
        None => {
            return Err(LiteralError::BadString(
                "string literal is missing its closing '\"'".to_string(),
            ));
        }
    };
    for ch in contents.chars() {
        if !(' '..='~').contains(&ch) {
            return Err(LiteralError::BadString(format!(
                "string literal contains non-printable-ASCII character {:?}",
                ch
            )));
        }
    }
    Ok(contents.to_string())
}

/// Parses a `0x`-prefixed hex-byte literal.  Zero digits is legal
/// and denotes the empty byte string; an odd number of digits is an
/// error because it denotes no byte sequence.
pub(crate) fn parse_hex_bytes(raw: &str) -> Result<Vec<u8>, LiteralError> {
    let digits = match raw.strip_prefix("0x") {
        Some(digits) => digits,
        None => {
            return Err(LiteralError::BadHex(format!(
                "hex literal {raw} does not start with '0x'"
            )));
        }
    };
    if digits.len() % 2 != 0 {
        return Err(LiteralError::BadHex(format!(
            "hex literal has {} digits; an odd number of digits does not form whole bytes",
            digits.len()
        )));
    }
    let mut bytes = Vec::with_capacity(digits.len() / 2);
    let chunk_value = |s: &str| -> Result<u8, LiteralError> {
        u8::from_str_radix(s, 16)
            .map_err(|_| LiteralError::BadHex(format!("'{s}' is not a hexadecimal byte")))
    };
    let raw_bytes = digits.as_bytes();
    for pair in raw_bytes.chunks(2) {
        // Hex digits are ASCII, so the chunk is valid UTF-8.
        let s = std::str::from_utf8(pair)
            .map_err(|_| LiteralError::BadHex("hex literal is not ASCII".to_string()))?;
        bytes.push(chunk_value(s)?);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(parse_integer("0"), Ok(0));
        assert_eq!(parse_integer("42"), Ok(42));
        assert_eq!(parse_integer("007"), Ok(7));
        assert_eq!(parse_integer("18446744073709551615"), Ok(u64::MAX));
    }

    #[test]
    fn integer_overflow() {
        assert_eq!(
            parse_integer("18446744073709551616"),
            Err(LiteralError::IntegerOutOfRange(
                "18446744073709551616".to_string()
            ))
        );
    }

    #[test]
    fn strings() {
        assert_eq!(parse_string("\"\""), Ok(String::new()));
        assert_eq!(parse_string("\"hello\""), Ok("hello".to_string()));
        assert_eq!(parse_string("\" ~\""), Ok(" ~".to_string()));
    }

    #[test]
    fn unterminated_string() {
        assert!(parse_string("\"oops").is_err());
    }

    #[test]
    fn non_ascii_string() {
        assert!(parse_string("\"héllo\"").is_err());
        assert!(parse_string("\"a\u{7f}b\"").is_err());
    }

    #[test]
    fn hex_bytes() {
        assert_eq!(parse_hex_bytes("0x"), Ok(Vec::new()));
        assert_eq!(parse_hex_bytes("0x00"), Ok(vec![0]));
        assert_eq!(parse_hex_bytes("0xDeadBeef"), Ok(vec![0xde, 0xad, 0xbe, 0xef]));
    }

    #[test]
    fn odd_hex_digit_count() {
        assert!(parse_hex_bytes("0xABC").is_err());
        assert!(parse_hex_bytes("0x1").is_err());
    }
}
