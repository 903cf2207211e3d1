//! Abstract syntax for a parsed TEAL program.  It is a flat list of
//! statements rather than a tree; labels are plain strings, resolved
//! (if at all) by whoever consumes the program.
use std::fmt::{self, Display, Formatter, Write};

/// A single operand of an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    IntegerLiteral(u64),
    StringLiteral(String),
    HexLiteral(Vec<u8>),
    /// A member of one of the closed enumerated field sets (for
    /// example a transaction field name or a curve name).
    EnumValue(String),
    /// A reference to a label declared elsewhere in the program.
    /// Whether the label actually exists is not this crate's concern.
    LabelRef(String),
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operand::IntegerLiteral(n) => write!(f, "{n}"),
            Operand::StringLiteral(s) => write!(f, "\"{s}\""),
            Operand::HexLiteral(bytes) => {
                f.write_str("0x")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Operand::EnumValue(name) | Operand::LabelRef(name) => f.write_str(name),
        }
    }
}

/// An opcode with its operands, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: String,
    pub operands: Vec<Operand>,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic)?;
        for operand in &self.operands {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}

/// One statement: the unit delimited by line breaks in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    PragmaDecl { version: u64 },
    LabelDecl { name: String },
    Instruction(Instruction),
}

impl From<Instruction> for Statement {
    fn from(instruction: Instruction) -> Statement {
        Statement::Instruction(instruction)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::PragmaDecl { version } => write!(f, "#pragma version {version}"),
            Statement::LabelDecl { name } => write!(f, "{name}:"),
            Statement::Instruction(instruction) => instruction.fmt(f),
        }
    }
}

/// A parsed program: statements in source order, which is also the
/// execution order once compiled.  Constructed once per parse call
/// and not mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            statement.fmt(f)?;
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_display() {
        assert_eq!(Operand::IntegerLiteral(7).to_string(), "7");
        assert_eq!(
            Operand::StringLiteral("hi".to_string()).to_string(),
            "\"hi\""
        );
        assert_eq!(Operand::HexLiteral(vec![0xde, 0xad]).to_string(), "0xdead");
        assert_eq!(Operand::HexLiteral(Vec::new()).to_string(), "0x");
        assert_eq!(
            Operand::EnumValue("Sender".to_string()).to_string(),
            "Sender"
        );
    }

    #[test]
    fn statement_display() {
        assert_eq!(
            Statement::PragmaDecl { version: 8 }.to_string(),
            "#pragma version 8"
        );
        assert_eq!(
            Statement::LabelDecl {
                name: "start".to_string()
            }
            .to_string(),
            "start:"
        );
        assert_eq!(
            Statement::from(Instruction {
                mnemonic: "txn".to_string(),
                operands: vec![
                    Operand::EnumValue("ApplicationArgs".to_string()),
                    Operand::IntegerLiteral(0)
                ],
            })
            .to_string(),
            "txn ApplicationArgs 0"
        );
    }
}
