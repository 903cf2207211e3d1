#![deny(unreachable_pub)]
#![deny(unsafe_code)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::wildcard_imports)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::explicit_iter_loop)]

mod ast;
mod diagnostics;
mod lexer;
mod literals;
mod opcodes;
mod parser;
mod source;

pub use ast::{Instruction, Operand, Program, Statement};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use parser::parse;
