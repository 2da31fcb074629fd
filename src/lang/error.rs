use super::LineNumber;
use std::rc::Rc;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    instruction: Option<Rc<str>>,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
    ($err:ident, $token:expr => $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_token($token)
            .message($msg)
    };
    ($err:ident, $token:expr =>) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_token($token)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            instruction: None,
            message: "",
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }

    pub fn in_line_number(self, line: usize) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: Some(line),
            ..self
        }
    }

    /// Attach the position and raw text of the offending statement.
    pub fn in_token(self, token: &super::Token) -> Error {
        Error {
            instruction: Some(token.text().into()),
            ..self.in_line_number(token.line_number())
        }
    }

    pub fn message(self, message: &'static str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error { message, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Break = 1,
    SyntaxError = 2,
    Overflow = 6,
    OutOfMemory = 7,
    EndWithoutWhile = 30,
    ElseWithoutIf = 31,
    IfWithoutEndif = 32,
    BadFormat = 40,
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            ErrorCode::Break => "BREAK",
            ErrorCode::SyntaxError => "SYNTAX ERROR",
            ErrorCode::Overflow => "OVERFLOW",
            ErrorCode::OutOfMemory => "OUT OF MEMORY",
            ErrorCode::EndWithoutWhile => "END WITHOUT WHILE",
            ErrorCode::ElseWithoutIf => "ELSE WITHOUT IF",
            ErrorCode::IfWithoutEndif => "IF WITHOUT ENDIF",
            ErrorCode::BadFormat => "BAD FORMAT",
            ErrorCode::InternalError => "INTERNAL ERROR",
        };
        write!(f, "{}", code_str)?;
        if let Some(line_number) = self.line_number {
            write!(f, " IN {}", line_number)?;
        }
        if let Some(instruction) = &self.instruction {
            write!(f, ": {}", instruction)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
