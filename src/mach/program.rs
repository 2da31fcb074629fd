use super::{Op, Slots};
use crate::lang::{lex, parse, Error, Token};

/// ## Linked program
///
/// Every statement parsed once, with slots assigned in order of first
/// appearance. A statement that failed to parse keeps its error so the
/// interpreter can report it when execution reaches it.

#[derive(Debug, Clone)]
pub struct Program {
    tokens: Vec<Token>,
    ops: Vec<Result<Option<Op>, Error>>,
    slots: Slots,
}

impl Program {
    pub fn new(source: &str) -> Program {
        Program::from_tokens(lex(source))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Program {
        let mut slots = Slots::new();
        let ops = tokens
            .iter()
            .map(|token| match parse(token) {
                Ok(Some(statement)) => match Op::link(&statement, &mut slots) {
                    Ok(op) => Ok(Some(op)),
                    Err(error) => Err(error.in_token(token)),
                },
                Ok(None) => Ok(None),
                Err(error) => Err(error),
            })
            .collect();
        Program { tokens, ops, slots }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, addr: usize) -> Option<&Token> {
        self.tokens.get(addr)
    }

    /// The linked statement at `addr`; `Ok(None)` for blanks and comments.
    pub fn op(&self, addr: usize) -> Result<Option<Op>, Error> {
        match self.ops.get(addr) {
            Some(result) => result.clone(),
            None => Ok(None),
        }
    }

    pub fn ops(&self) -> impl Iterator<Item = &Result<Option<Op>, Error>> {
        self.ops.iter()
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    /// The first statement that failed to parse or link.
    pub fn first_error(&self) -> Option<&Error> {
        self.ops.iter().find_map(|op| op.as_ref().err())
    }
}
