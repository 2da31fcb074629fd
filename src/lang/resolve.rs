use super::token::{Keyword, Token};

/// ## Control-flow resolver
///
/// Finds the next statement after `start` whose keyword is one of
/// `targets`, stepping over any `if`/`endif` and `while`/`end` blocks
/// nested in between. Blank statements and comments are ignored.
///
/// The scan gives up at a closing keyword that does not belong to a
/// nested block: it closes the block enclosing `start`, so anything
/// beyond it is not a sibling.

pub fn find_next(tokens: &[Token], start: usize, targets: &[Keyword]) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(start + 1) {
        let keyword = match token.keyword() {
            Some(keyword) => keyword,
            None => continue,
        };
        if depth == 0 && targets.contains(&keyword) {
            return Some(index);
        }
        if keyword.opens_block() {
            depth += 1;
        } else if keyword.closes_block() {
            if depth == 0 {
                return None;
            }
            depth -= 1;
        }
    }
    None
}
