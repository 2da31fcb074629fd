use super::{Slot, Slots};
use crate::lang::ast::Statement;
use crate::lang::{Error, Keyword};

/// ## Linked statement
///
/// A parsed statement with its variable replaced by a slot number.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Clear(Slot),
    Incr(Slot),
    Decr(Slot),
    While(Slot),
    End,
    If(Slot),
    Elif(Slot),
    Else,
    Endif,
}

impl Op {
    pub fn link(statement: &Statement, slots: &mut Slots) -> Result<Op, Error> {
        let slot = match statement.var_name() {
            Some(name) => slots.assign(name)?,
            None => 0,
        };
        Ok(match statement {
            Statement::Clear(_) => Op::Clear(slot),
            Statement::Incr(_) => Op::Incr(slot),
            Statement::Decr(_) => Op::Decr(slot),
            Statement::While(_) => Op::While(slot),
            Statement::End => Op::End,
            Statement::If(_) => Op::If(slot),
            Statement::Elif(_) => Op::Elif(slot),
            Statement::Else => Op::Else,
            Statement::Endif => Op::Endif,
        })
    }

    pub fn keyword(&self) -> Keyword {
        match self {
            Op::Clear(_) => Keyword::Clear,
            Op::Incr(_) => Keyword::Incr,
            Op::Decr(_) => Keyword::Decr,
            Op::While(_) => Keyword::While,
            Op::End => Keyword::End,
            Op::If(_) => Keyword::If,
            Op::Elif(_) => Keyword::Elif,
            Op::Else => Keyword::Else,
            Op::Endif => Keyword::Endif,
        }
    }

    /// Bytes of bytecode this statement compiles to.
    pub fn compiled_len(&self) -> usize {
        use super::Record;
        match self {
            Op::While(_) | Op::Endif => 0,
            Op::Clear(_) | Op::Incr(_) | Op::Decr(_) | Op::End | Op::Else => Record::LEN,
            Op::If(_) => 2 * Record::LEN,
            Op::Elif(_) => 3 * Record::LEN,
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Clear(slot)
            | Op::Incr(slot)
            | Op::Decr(slot)
            | Op::While(slot)
            | Op::If(slot)
            | Op::Elif(slot) => write!(f, "{} ({})", self.keyword(), slot),
            _ => write!(f, "{}", self.keyword()),
        }
    }
}
