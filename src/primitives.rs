//! Token-stream utilities shared by the parse rules
use crate::error::ParseError;
use crate::tokenizer::{Token, TokenKind};

/// A slice of tokens split from the ones that follow it
///
/// Both halves borrow from the original token slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeResult<'t, 'a> {
    /// The tokens taken
    pub inside: &'t [Token<'a>],
    /// Everything after the taken tokens
    pub remainder: &'t [Token<'a>],
}

/// Extract the contents of a balanced scope opened by the first token
///
/// `tokens` must start with a `start` token. The scan tracks nesting depth and stops at the
/// `end` token that brings it back to zero; `inside` excludes that outer pair but keeps any nested
/// delimiters, and `remainder` starts right after the closing token.
///
/// # Example
/// ```
/// use texmath_parser::primitives::consume_balanced_scope;
/// use texmath_parser::{lex, TokenKind};
///
/// let tokens = lex("(x(y))z");
/// let scope = consume_balanced_scope(&tokens, TokenKind::ParenLeft, TokenKind::ParenRight)
///     .unwrap();
/// assert_eq!(scope.inside.len(), 4);
/// assert_eq!(scope.remainder.len(), 1);
/// ```
pub fn consume_balanced_scope<'t, 'a>(
    tokens: &'t [Token<'a>],
    start: TokenKind,
    end: TokenKind,
) -> Result<ScopeResult<'t, 'a>, ParseError> {
    let first = tokens.first().ok_or(ParseError::EmptyInput)?;
    if first.kind == end {
        return Err(ParseError::UnbalancedScope {
            text: first.text.to_owned(),
            start: first.start,
        });
    } else if first.kind != start {
        return Err(ParseError::UnexpectedToken {
            expected: start,
            found: first.kind,
            text: first.text.to_owned(),
            start: first.start,
        });
    }

    let mut depth: usize = 0;
    for (ind, tok) in tokens.iter().enumerate() {
        if tok.kind == start {
            depth += 1;
        } else if tok.kind == end {
            // can't underflow, the first token opened the scope and we return at zero
            depth -= 1;
            if depth == 0 {
                return Ok(ScopeResult {
                    inside: &tokens[1..ind],
                    remainder: &tokens[ind + 1..],
                });
            }
        }
    }
    Err(ParseError::UnclosedScope {
        text: first.text.to_owned(),
        start: first.start,
    })
}

/// Take the longest prefix of tokens that all satisfy `pred`
///
/// # Example
/// ```
/// use texmath_parser::primitives::consume_run;
/// use texmath_parser::{lex, TokenKind};
///
/// let tokens = lex("2xt+1");
/// let run = consume_run(&tokens, |tok| tok.kind != TokenKind::Command);
/// assert_eq!(run.inside.len(), 3);
/// assert_eq!(run.remainder.len(), 2);
/// ```
pub fn consume_run<'t, 'a, P>(tokens: &'t [Token<'a>], mut pred: P) -> ScopeResult<'t, 'a>
where
    P: FnMut(&Token<'a>) -> bool,
{
    let len = tokens
        .iter()
        .position(|tok| !pred(tok))
        .unwrap_or(tokens.len());
    let (inside, remainder) = tokens.split_at(len);
    ScopeResult { inside, remainder }
}
