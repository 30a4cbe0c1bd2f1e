pub mod lexer;
pub mod parser;
pub mod request;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, Parser, SyntaxError, CONSTRAINT_HINT, OBJECTIVE_HINT};
pub use request::{solve, Diagnostic, Outcome, Results, SolveRequest};
