use super::ast::Statement;
use super::token::{Keyword, Token};
use super::Error;
use crate::error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Parse one statement. Blank statements and comments parse to `None`.
pub fn parse(token: &Token) -> Result<Option<Statement>> {
    if token.is_skipped() {
        return Ok(None);
    }
    let mut words = token.words();
    let keyword = match words.next().and_then(Keyword::from_word) {
        Some(keyword) => keyword,
        None => return Err(error!(SyntaxError, token => "UNKNOWN INSTRUCTION")),
    };
    let name: Option<Rc<str>> = if keyword.takes_operand() {
        match words.next() {
            Some(name) => Some(name.into()),
            None => return Err(error!(SyntaxError, token => "MISSING OPERAND")),
        }
    } else {
        None
    };
    if words.next().is_some() {
        return Err(error!(SyntaxError, token => "UNEXPECTED OPERAND"));
    }
    let statement = match (keyword, name) {
        (Keyword::Clear, Some(name)) => Statement::Clear(name),
        (Keyword::Incr, Some(name)) => Statement::Incr(name),
        (Keyword::Decr, Some(name)) => Statement::Decr(name),
        (Keyword::While, Some(name)) => Statement::While(name),
        (Keyword::If, Some(name)) => Statement::If(name),
        (Keyword::Elif, Some(name)) => Statement::Elif(name),
        (Keyword::End, None) => Statement::End,
        (Keyword::Else, None) => Statement::Else,
        (Keyword::Endif, None) => Statement::Endif,
        _ => return Err(error!(InternalError, token => "OPERAND MISMATCH")),
    };
    Ok(Some(statement))
}
