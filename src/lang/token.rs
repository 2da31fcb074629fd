use std::rc::Rc;

/// ## Raw statement
///
/// One `;`-delimited statement of source text, trimmed and lower-cased.
/// Blank statements and `#` comments are tokens too; every consumer
/// skips them.

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    line_number: usize,
    text: Rc<str>,
}

impl Token {
    pub fn new(line_number: usize, text: &str) -> Token {
        Token {
            line_number,
            text: text.trim().to_lowercase().into(),
        }
    }

    /// 1-based source line of the first non-blank character.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_comment(&self) -> bool {
        self.text.starts_with('#')
    }

    /// True for statements that have no effect anywhere.
    pub fn is_skipped(&self) -> bool {
        self.is_blank() || self.is_comment()
    }

    pub fn words(&self) -> std::str::SplitWhitespace<'_> {
        self.text.split_whitespace()
    }

    pub fn keyword(&self) -> Option<Keyword> {
        if self.is_skipped() {
            return None;
        }
        self.words().next().and_then(Keyword::from_word)
    }

    pub fn operand(&self) -> Option<&str> {
        if self.is_skipped() {
            return None;
        }
        self.words().nth(1)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Clear,
    Incr,
    Decr,
    While,
    End,
    If,
    Elif,
    Else,
    Endif,
}

impl Keyword {
    pub fn from_word(s: &str) -> Option<Keyword> {
        use Keyword::*;
        Some(match s {
            "clear" => Clear,
            "incr" => Incr,
            "decr" => Decr,
            "while" => While,
            "end" => End,
            "if" => If,
            "elif" => Elif,
            "else" => Else,
            "endif" => Endif,
            _ => return None,
        })
    }

    /// Whether the statement names a variable.
    pub fn takes_operand(self) -> bool {
        use Keyword::*;
        match self {
            Clear | Incr | Decr | While | If | Elif => true,
            End | Else | Endif => false,
        }
    }

    /// Opens a block that the resolver must step over.
    pub fn opens_block(self) -> bool {
        matches!(self, Keyword::If | Keyword::While)
    }

    /// Closes a block opened by `opens_block`.
    pub fn closes_block(self) -> bool {
        matches!(self, Keyword::Endif | Keyword::End)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Keyword::*;
        let s = match self {
            Clear => "clear",
            Incr => "incr",
            Decr => "decr",
            While => "while",
            End => "end",
            If => "if",
            Elif => "elif",
            Else => "else",
            Endif => "endif",
        };
        write!(f, "{}", s)
    }
}
