/*!
# Rust Language Module

This Rust module splits Barebones source into statements, parses them,
and resolves the structure of `while` and `if` blocks.

*/

/// 1-based source line, if known.
pub type LineNumber = Option<usize>;

#[macro_use]
mod error;
mod lex;
mod parse;
mod resolve;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use parse::parse;
pub use resolve::find_next;
pub use token::{Keyword, Token};

pub mod ast;
