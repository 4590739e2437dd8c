pub mod ast;
mod error;
pub mod grammar;
mod lexer;
mod parser;
pub mod visit;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::TokenKind;
pub use parser::Parser;

/// Parses a single expression (no `,`/`;` batching).
pub fn parse(s: &str) -> Result<ast::Expression, ParseError> {
    Parser::new(s).parse()
}
