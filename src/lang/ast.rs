use super::token::Keyword;
use std::rc::Rc;

/// ## Abstract syntax
///
/// A parsed statement. Variable names are already lower-cased by the
/// lexer, which makes them case-insensitive.

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Clear(Rc<str>),
    Incr(Rc<str>),
    Decr(Rc<str>),
    While(Rc<str>),
    End,
    If(Rc<str>),
    Elif(Rc<str>),
    Else,
    Endif,
}

impl Statement {
    pub fn keyword(&self) -> Keyword {
        use Statement::*;
        match self {
            Clear(_) => Keyword::Clear,
            Incr(_) => Keyword::Incr,
            Decr(_) => Keyword::Decr,
            While(_) => Keyword::While,
            End => Keyword::End,
            If(_) => Keyword::If,
            Elif(_) => Keyword::Elif,
            Else => Keyword::Else,
            Endif => Keyword::Endif,
        }
    }

    pub fn var_name(&self) -> Option<&Rc<str>> {
        use Statement::*;
        match self {
            Clear(name) | Incr(name) | Decr(name) | While(name) | If(name) | Elif(name) => {
                Some(name)
            }
            End | Else | Endif => None,
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.var_name() {
            Some(name) => write!(f, "{} {}", self.keyword(), name),
            None => write!(f, "{}", self.keyword()),
        }
    }
}
