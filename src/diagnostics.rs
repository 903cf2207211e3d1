//! Structured problems found while parsing.  Every diagnostic is
//! recoverable at the statement level: one malformed statement never
//! prevents the rest of the document from parsing, so a single pass
//! can report every problem in the document.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::source::LineAndColumn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A character outside every token pattern.
    InvalidCharacter,
    /// A `#pragma` line that is not `#pragma version <integer>`.
    InvalidPragma,
    /// A mnemonic with no registry entry.
    UnknownOpcode,
    /// The line ended before the opcode's operands were complete.
    TooFewOperands,
    /// Leftover tokens after the opcode's operands were complete.
    TooManyOperands,
    /// A `match`/`switch` with no target labels at all.
    EmptyLabelList,
    /// An enumerated-field operand outside the opcode's allowed set.
    InvalidFieldName,
    /// A numeric literal that denotes no 64-bit value.
    InvalidNumericLiteral,
    /// An unterminated or non-printable-ASCII string literal.
    InvalidStringLiteral,
    /// A hex-bytes literal that denotes no byte sequence.
    InvalidHexLiteral,
    /// An operand present but of the wrong kind for its slot, for
    /// example a number where a branch target label is required.
    UnexpectedOperand,
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::InvalidCharacter => "invalid character",
            DiagnosticKind::InvalidPragma => "invalid pragma",
            DiagnosticKind::UnknownOpcode => "unknown opcode",
            DiagnosticKind::TooFewOperands => "too few operands",
            DiagnosticKind::TooManyOperands => "too many operands",
            DiagnosticKind::EmptyLabelList => "empty label list",
            DiagnosticKind::InvalidFieldName => "invalid field name",
            DiagnosticKind::InvalidNumericLiteral => "invalid numeric literal",
            DiagnosticKind::InvalidStringLiteral => "invalid string literal",
            DiagnosticKind::InvalidHexLiteral => "invalid hex literal",
            DiagnosticKind::UnexpectedOperand => "unexpected operand",
        };
        f.write_str(name)
    }
}

/// One problem, positioned in the source text.  Line and column are
/// counted from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, message: String, location: LineAndColumn) -> Diagnostic {
        Diagnostic {
            kind,
            message,
            line: location.line(),
            column: location.column(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {}: {}: {}",
            self.line, self.column, self.kind, self.message
        )
    }
}

impl Error for Diagnostic {}
