//! Token scanner for TEAL source text.
//!
//! Line breaks are deliberately significant: the parser bounds every
//! variable-length operand list (for example the label lists of
//! `match` and `switch`) by the next [`Token::Newline`], so the lexer
//! must emit them rather than fold them into skipped whitespace.
use std::fmt::{self, Display, Formatter, Write};
use std::ops::Range;

use logos::Logos;

#[cfg(test)]
mod tests;

pub(crate) type Span = Range<usize>;

fn capture_text(lex: &mut logos::Lexer<Token>) -> String {
    lex.slice().to_string()
}

/// The parser consumes these tokens.
///
/// Opcode mnemonics come in two lexical forms: word-shaped (`dup`,
/// `asset_params_get`) which scan as [`Token::Identifier`], and
/// operator-shaped (`+`, `b<=`) which scan as [`Token::Symbol`].  The
/// lexer cannot tell a mnemonic from a label reference or a label
/// definition; only the parser can (the last is distinguished by a
/// following colon).
#[derive(Debug, PartialEq, Eq, Logos, Clone)]
#[logos(skip r"[ \t\r\u{FEFF}\u{2060}\u{200B}\u{A0}]+")]
pub(crate) enum Token {
    // In order for the parser to recover from tokenization errors, we
    // need to be able to emit an error token.
    Error(String),

    #[token("#pragma")]
    Pragma,

    // "version" is only meaningful directly after "#pragma", but we
    // give it its own token anyway; where the grammar wants an
    // identifier the parser accepts this token too, so that programs
    // may still use "version" as a label name.
    #[token("version")]
    Version,

    #[token("\n")]
    Newline,

    #[token(":")]
    Colon,

    /// Decimal digits, kept as text.  Conversion to a value (and
    /// overflow detection) happens in the literal parsers, not here.
    #[regex("[0-9]+", capture_text, priority = 20)]
    Number(String),

    /// A double-quoted string, including its quotes.  The closing
    /// quote is optional at scan time so that an unterminated string
    /// becomes a diagnostic rather than a cascade of bogus tokens.
    #[regex(r#""[^"\n]*"?"#, capture_text)]
    Str(String),

    /// `0x` followed by any number of hex digits, including zero
    /// (`0x` alone denotes an explicit empty byte string).
    #[regex("0x[0-9A-Fa-f]*", capture_text, priority = 25)]
    HexBytes(String),

    /// Also matches word-shaped opcode mnemonics; see the enum docs.
    #[regex("[A-Za-z_][A-Za-z0-9_-]*", capture_text)]
    Identifier(String),

    /// Operator-shaped opcode mnemonics: `+`, `!=`, `b<=`, `~` and
    /// friends.  Longest-match keeps this from splitting `b<=` into
    /// `b` and `<=`, and keeps `b-loop` an identifier (the identifier
    /// match is longer).
    #[regex(r"b?[-+*/%<>=!&|^~]+", capture_text, priority = 20)]
    Symbol(String),

    // Comment text never reaches the parser.
    #[regex("//[^\n]*", logos::skip, priority = 30)]
    Comment,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Error(msg) => write!(f, "(error: {msg})"),
            Token::Pragma => f.write_str("#pragma"),
            Token::Version => f.write_str("version"),
            Token::Newline => f.write_char('\n'),
            Token::Colon => f.write_char(':'),
            Token::Number(text)
            | Token::Str(text)
            | Token::HexBytes(text)
            | Token::Identifier(text)
            | Token::Symbol(text) => f.write_str(text),
            Token::Comment => Ok(()),
        }
    }
}

/// Scans the whole input, converting characters the token patterns
/// don't cover into [`Token::Error`] so that the parser can report
/// them and carry on.  Never fails.
#[derive(Debug, Clone)]
pub(crate) struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            inner: Token::lexer(input),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = (Token, Span);

    fn next(&mut self) -> Option<(Token, Span)> {
        match self.inner.next() {
            None => None,
            Some(Ok(token)) => Some((token, self.inner.span())),
            Some(Err(())) => {
                let bad = self
                    .inner
                    .slice()
                    .chars()
                    .next()
                    .expect("for the input to be invalid it has to be nonempty");
                Some((
                    Token::Error(format!("unrecognized character '{bad}'")),
                    self.inner.span(),
                ))
            }
        }
    }
}

/// Convenience for callers that want the whole token stream at once.
pub(crate) fn scan(input: &str) -> Vec<(Token, Span)> {
    Lexer::new(input).collect()
}
