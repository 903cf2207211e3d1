//! Line-bounded statement parser.
//!
//! The token stream arrives with explicit [`Token::Newline`] markers,
//! and each line is parsed as exactly one statement.  This is what
//! resolves the grammar's ambiguity around variable-length operand
//! lists: a `match`/`switch` label list (or an `intcblock` constant
//! block) simply runs to the end of its line, so no lookahead or
//! backtracking is ever needed to decide where it stops.
//!
//! Parsing never fails outright.  A malformed statement is reported
//! as a [`Diagnostic`] and dropped, and parsing resumes on the next
//! line, so a single pass reports every problem in the document.
use tracing::{event, Level};


use crate::ast::{Instruction, Operand, Program, Statement};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::lexer::{scan, Span, Token};
use crate::literals;
use crate::opcodes::{self, FieldSet, OperandKind, OperandShape, TXN_ARRAY_FIELDS, TXN_FIELDS};
use crate::source::Source;

/// Parses a whole document, returning the best-effort program
/// together with every problem found, in source order.
///
/// Malformed statements are dropped from the program but never stop
/// the parse; callers that want strictness can treat a non-empty
/// diagnostics list as failure.
pub fn parse(source: &str) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::new(source);
    parser.run();
    event!(
        Level::DEBUG,
        statements = parser.statements.len(),
        diagnostics = parser.diagnostics.len(),
        "parse finished"
    );
    (
        Program {
            statements: parser.statements,
        },
        parser.diagnostics,
    )
}

struct Parser<'a> {
    tokens: Vec<(Token, Span)>,
    pos: usize,
    source: Source<'a>,
    statements: Vec<Statement>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Parser<'a> {
        Parser {
            tokens: scan(input),
            pos: 0,
            source: Source::new(input),
            statements: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn run(&mut self) {
        while self.pos < self.tokens.len() {
            let line_start = self.pos;
            let mut line_end = line_start;
            while line_end < self.tokens.len() && self.tokens[line_end].0 != Token::Newline {
                line_end += 1;
            }
            // Split off the line so we can keep &mut self for
            // diagnostics while reading it.
            let line: Vec<(Token, Span)> = self.tokens[line_start..line_end].to_vec();
            self.parse_line(&line);
            self.pos = if line_end < self.tokens.len() {
                line_end + 1 // step over the Newline
            } else {
                line_end
            };
        }
    }

    fn report(&mut self, kind: DiagnosticKind, span: &Span, message: String) {
        let location = self.source.location_of(span.start);
        self.diagnostics.push(Diagnostic::new(kind, message, location));
    }

    /// Reports every `Token::Error` on the line and returns the line
    /// with them removed, so a stray character doesn't also corrupt
    /// the statement built from its neighbours.
    fn without_error_tokens(&mut self, line: &[(Token, Span)]) -> Vec<(Token, Span)> {
        let mut clean = Vec::with_capacity(line.len());
        for (token, span) in line {
            if let Token::Error(msg) = token {
                self.report(DiagnosticKind::InvalidCharacter, span, msg.clone());
            } else {
                clean.push((token.clone(), span.clone()));
            }
        }
        clean
    }

    fn parse_line(&mut self, raw_line: &[(Token, Span)]) {
        let line = self.without_error_tokens(raw_line);
        let Some((first, first_span)) = line.first() else {
            return; // blank line
        };

        if *first == Token::Pragma {
            self.parse_pragma(&line);
            return;
        }

        // A label declaration is an identifier and a colon with
        // nothing else before the line break.
        if line.len() == 2 && line[1].0 == Token::Colon {
            if let Some(name) = identifier_text(first) {
                self.statements.push(Statement::LabelDecl {
                    name: name.to_string(),
                });
                return;
            }
        }

        let mnemonic = first.to_string();
        match opcodes::lookup(&mnemonic) {
            None => {
                event!(Level::DEBUG, %mnemonic, "skipping line with unknown opcode");
                self.report(
                    DiagnosticKind::UnknownOpcode,
                    first_span,
                    format!("'{mnemonic}' is not a known opcode"),
                );
                // Best-effort recovery: the rest of the line is
                // consumed (by discarding it) so later lines parse.
            }
            Some(shape) => {
                if let Some(operands) = self.parse_operands(&mnemonic, first_span, *shape, &line[1..])
                {
                    self.statements
                        .push(Statement::Instruction(Instruction { mnemonic, operands }));
                }
            }
        }
    }

    fn parse_pragma(&mut self, line: &[(Token, Span)]) {
        let pragma_span = &line[0].1;
        let fail = |parser: &mut Self, span: &Span, detail: &str| {
            parser.report(
                DiagnosticKind::InvalidPragma,
                span,
                format!("expected '#pragma version <integer>': {detail}"),
            );
        };

        match (line.get(1), line.get(2)) {
            (Some((Token::Version, _)), Some((Token::Number(digits), number_span))) => {
                if let Some((_, extra_span)) = line.get(3) {
                    let extra_span = extra_span.clone();
                    fail(self, &extra_span, "unexpected text after the version number");
                    return;
                }
                match literals::parse_integer(digits) {
                    Ok(version) => {
                        self.statements.push(Statement::PragmaDecl { version });
                    }
                    Err(e) => {
                        let number_span = number_span.clone();
                        fail(self, &number_span, &e.to_string());
                    }
                }
            }
            (Some((Token::Version, _)), Some((other, other_span))) => {
                let other_span = other_span.clone();
                fail(self, &other_span, &format!("'{other}' is not a version number"));
            }
            (Some((Token::Version, version_span)), None) => {
                let version_span = version_span.clone();
                fail(self, &version_span, "missing version number");
            }
            (Some((other, other_span)), _) => {
                let other_span = other_span.clone();
                fail(
                    self,
                    &other_span,
                    &format!("expected the keyword 'version', found '{other}'"),
                );
            }
            (None, _) => {
                let pragma_span = pragma_span.clone();
                fail(self, &pragma_span, "missing 'version' keyword");
            }
        }
    }

    /// Consumes exactly the operands the shape demands.  Returns
    /// `None` (after reporting) if the statement must be dropped.
    fn parse_operands(
        &mut self,
        mnemonic: &str,
        mnemonic_span: &Span,
        shape: OperandShape,
        rest: &[(Token, Span)],
    ) -> Option<Vec<Operand>> {
        match shape {
            OperandShape::None => {
                self.expect_line_end(mnemonic, rest, 0)?;
                Some(Vec::new())
            }
            OperandShape::Fixed(kinds) => self.parse_fixed(mnemonic, mnemonic_span, kinds, rest),
            OperandShape::TxnField {
                leading_group_index,
            } => self.parse_txn_field(mnemonic, mnemonic_span, leading_group_index, rest),
            OperandShape::NumericList => self.parse_list(rest, |parser, token, span| {
                parser.numeric_operand(token, span)
            }),
            OperandShape::ByteValueList => self.parse_list(rest, |parser, token, span| {
                parser.byte_value_operand(token, span)
            }),
            OperandShape::LabelList => {
                if rest.is_empty() {
                    self.report(
                        DiagnosticKind::EmptyLabelList,
                        mnemonic_span,
                        format!("'{mnemonic}' requires at least one target label"),
                    );
                    return None;
                }
                self.parse_list(rest, |parser, token, span| {
                    parser.label_operand(token, span)
                })
            }
        }
    }

    fn parse_fixed(
        &mut self,
        mnemonic: &str,
        mnemonic_span: &Span,
        kinds: &[OperandKind],
        rest: &[(Token, Span)],
    ) -> Option<Vec<Operand>> {
        let mut operands = Vec::with_capacity(kinds.len());
        for (i, kind) in kinds.iter().enumerate() {
            let Some((token, span)) = rest.get(i) else {
                let at = rest.last().map_or(mnemonic_span, |(_, span)| span).clone();
                self.report(
                    DiagnosticKind::TooFewOperands,
                    &at,
                    format!(
                        "'{mnemonic}' takes {} operand{} but the line ends after {}",
                        kinds.len(),
                        if kinds.len() == 1 { "" } else { "s" },
                        i
                    ),
                );
                return None;
            };
            let operand = match kind {
                OperandKind::Numeric => self.numeric_operand(token, span)?,
                OperandKind::Label => self.label_operand(token, span)?,
                OperandKind::ByteValue => self.byte_value_operand(token, span)?,
                OperandKind::Field(set) => self.field_operand(token, span, set)?,
            };
            operands.push(operand);
        }
        self.expect_line_end(mnemonic, rest, kinds.len())?;
        Some(operands)
    }

    /// The `txn`/`gtxns`/`gtxn` shape.  Both the scalar and the array
    /// form consume one field-name token; set membership of that
    /// token, not operand count, decides whether an array index must
    /// follow.
    fn parse_txn_field(
        &mut self,
        mnemonic: &str,
        mnemonic_span: &Span,
        leading_group_index: bool,
        rest: &[(Token, Span)],
    ) -> Option<Vec<Operand>> {
        let mut operands = Vec::with_capacity(3);
        let mut next = 0;

        if leading_group_index {
            let Some((token, span)) = rest.first() else {
                self.report(
                    DiagnosticKind::TooFewOperands,
                    mnemonic_span,
                    format!("'{mnemonic}' requires a group index before the field name"),
                );
                return None;
            };
            operands.push(self.numeric_operand(token, span)?);
            next = 1;
        }

        let Some((token, span)) = rest.get(next) else {
            let at = rest.last().map_or(mnemonic_span, |(_, span)| span).clone();
            self.report(
                DiagnosticKind::TooFewOperands,
                &at,
                format!("'{mnemonic}' requires a transaction field name"),
            );
            return None;
        };
        let Some(field) = identifier_text(token) else {
            self.report(
                DiagnosticKind::InvalidFieldName,
                span,
                format!("'{token}' is not a transaction field or transaction array field name"),
            );
            return None;
        };

        if TXN_FIELDS.contains(field) {
            operands.push(Operand::EnumValue(field.to_string()));
            self.expect_line_end(mnemonic, rest, next + 1)?;
            Some(operands)
        } else if TXN_ARRAY_FIELDS.contains(field) {
            operands.push(Operand::EnumValue(field.to_string()));
            let Some((index_token, index_span)) = rest.get(next + 1) else {
                let span = span.clone();
                self.report(
                    DiagnosticKind::TooFewOperands,
                    &span,
                    format!("array field '{field}' requires a following numeric index"),
                );
                return None;
            };
            operands.push(self.numeric_operand(index_token, index_span)?);
            self.expect_line_end(mnemonic, rest, next + 2)?;
            Some(operands)
        } else {
            self.report(
                DiagnosticKind::InvalidFieldName,
                span,
                format!(
                    "'{field}' is not one of the {} transaction fields or {} transaction array fields",
                    TXN_FIELDS.members.len(),
                    TXN_ARRAY_FIELDS.members.len()
                ),
            );
            None
        }
    }

    /// Greedy list shape: every remaining token on the line is one
    /// operand.  The terminating line break makes the extent of the
    /// list unambiguous.
    fn parse_list(
        &mut self,
        rest: &[(Token, Span)],
        mut one: impl FnMut(&mut Self, &Token, &Span) -> Option<Operand>,
    ) -> Option<Vec<Operand>> {
        let mut operands = Vec::with_capacity(rest.len());
        for (token, span) in rest {
            operands.push(one(self, token, span)?);
        }
        Some(operands)
    }

    fn numeric_operand(&mut self, token: &Token, span: &Span) -> Option<Operand> {
        match token {
            Token::Number(digits) => match literals::parse_integer(digits) {
                Ok(value) => Some(Operand::IntegerLiteral(value)),
                Err(e) => {
                    self.report(DiagnosticKind::InvalidNumericLiteral, span, e.to_string());
                    None
                }
            },
            other => {
                self.report(
                    DiagnosticKind::UnexpectedOperand,
                    span,
                    format!("expected an integer literal, found '{other}'"),
                );
                None
            }
        }
    }

    fn label_operand(&mut self, token: &Token, span: &Span) -> Option<Operand> {
        match identifier_text(token) {
            Some(name) => Some(Operand::LabelRef(name.to_string())),
            None => {
                self.report(
                    DiagnosticKind::UnexpectedOperand,
                    span,
                    format!("expected a label identifier, found '{token}'"),
                );
                None
            }
        }
    }

    fn byte_value_operand(&mut self, token: &Token, span: &Span) -> Option<Operand> {
        match token {
            Token::Number(_) => self.numeric_operand(token, span),
            Token::Str(raw) => match literals::parse_string(raw) {
                Ok(contents) => Some(Operand::StringLiteral(contents)),
                Err(e) => {
                    self.report(DiagnosticKind::InvalidStringLiteral, span, e.to_string());
                    None
                }
            },
            Token::HexBytes(raw) => match literals::parse_hex_bytes(raw) {
                Ok(bytes) => Some(Operand::HexLiteral(bytes)),
                Err(e) => {
                    self.report(DiagnosticKind::InvalidHexLiteral, span, e.to_string());
                    None
                }
            },
            other => {
                self.report(
                    DiagnosticKind::UnexpectedOperand,
                    span,
                    format!("expected an integer, string or hex literal, found '{other}'"),
                );
                None
            }
        }
    }

    fn field_operand(&mut self, token: &Token, span: &Span, set: &FieldSet) -> Option<Operand> {
        let found = match identifier_text(token) {
            Some(name) if set.contains(name) => {
                return Some(Operand::EnumValue(name.to_string()));
            }
            Some(name) => name.to_string(),
            None => token.to_string(),
        };
        self.report(
            DiagnosticKind::InvalidFieldName,
            span,
            format!(
                "'{found}' is not a {}; expected {}",
                set.name,
                expected_set(set)
            ),
        );
        None
    }

    fn expect_line_end(
        &mut self,
        mnemonic: &str,
        rest: &[(Token, Span)],
        used: usize,
    ) -> Option<()> {
        match rest.get(used) {
            None => Some(()),
            Some((extra, span)) => {
                let span = span.clone();
                self.report(
                    DiagnosticKind::TooManyOperands,
                    &span,
                    format!("unexpected '{extra}' after the operands of '{mnemonic}'"),
                );
                None
            }
        }
    }
}

/// Identifier-shaped text, including the `version` keyword so that
/// labels named `version` still work.
fn identifier_text(token: &Token) -> Option<&str> {
    match token {
        Token::Identifier(name) => Some(name),
        Token::Version => Some("version"),
        _ => None,
    }
}

/// Members of small sets are worth spelling out; the transaction
/// field sets are too large for that to help anyone.
fn expected_set(set: &FieldSet) -> String {
    if set.members.len() <= 8 {
        format!("one of {{{}}}", set.members.join(", "))
    } else {
        format!("one of the {} {} names", set.members.len(), set.name)
    }
}
