use super::token::Token;

/// Split source text into `;`-delimited statements.
///
/// Line breaks are only whitespace to the language, so a statement may
/// span lines; its line number is where its first non-blank character is.
pub fn lex(s: &str) -> Vec<Token> {
    let mut tokens = vec![];
    let mut line = 1;
    let mut start_line = None;
    let mut text = String::new();
    for ch in s.chars() {
        if ch == ';' {
            tokens.push(Token::new(start_line.unwrap_or(line), &text));
            text.clear();
            start_line = None;
            continue;
        }
        if start_line.is_none() && !ch.is_whitespace() {
            start_line = Some(line);
        }
        if ch == '\n' {
            line += 1;
        }
        text.push(ch);
    }
    if !text.trim().is_empty() {
        tokens.push(Token::new(start_line.unwrap_or(line), &text));
    }
    tokens
}
