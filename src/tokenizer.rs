use std::iter::FusedIterator;

/// A lexed token label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An escaped command like `\frac`, or a bare `+` / `-` operator
    Command,
    /// An opening brace `{`
    CommandArgStart,
    /// A closing brace `}`
    CommandArgEnd,
    /// The raw text between a pair of braces
    Arg,
    /// A run of digits with decimal points
    Number,
    /// A single lowercase letter
    Var,
    /// A subscript marker `_`
    Subscript,
    /// A superscript marker `^`
    Superscript,
    /// An opening parenthesis `(`
    ParenLeft,
    /// A closing parenthesis `)`
    ParenRight,
}

/// A lexed token with its position in the input
///
/// `start` and `end` are byte offsets, `start` inclusive and `end` exclusive, so `text` is always
/// `&input[start..end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    /// The token label
    pub kind: TokenKind,
    /// The slice of input this token covers
    pub text: &'a str,
    /// Offset of the first byte
    pub start: usize,
    /// Offset one past the last byte
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    None,
    Command,
    Number,
    // raw text between `{` and the next `}`
    Arg,
}

/// A single pass tokenizer over math markup
///
/// The tokenizer never fails. Characters without a token kind (whitespace, uppercase letters,
/// stray punctuation) are skipped, and a command, number, or brace argument still open at the end
/// of input is emitted as-is.
///
/// # Example
/// ```
/// use texmath_parser::{TokenKind, Tokenizer};
///
/// let kinds: Vec<_> = Tokenizer::new("\\sqrt{2}").map(|tok| tok.kind).collect();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::Command,
///         TokenKind::CommandArgStart,
///         TokenKind::Arg,
///         TokenKind::CommandArgEnd,
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    mark: usize,
    state: LexState,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer at the start of `inp`
    pub fn new(inp: &'a str) -> Self {
        Tokenizer {
            input: inp,
            pos: 0,
            mark: 0,
            state: LexState::None,
        }
    }

    fn token(&self, kind: TokenKind, start: usize, end: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.input[start..end],
            start,
            end,
        }
    }

    /// Close the pending multi-character token at `end`
    fn close(&mut self, kind: TokenKind, end: usize) -> Token<'a> {
        self.state = LexState::None;
        self.token(kind, self.mark, end)
    }

    fn flush(&mut self) -> Option<Token<'a>> {
        let end = self.input.len();
        let kind = match self.state {
            LexState::None => return None,
            LexState::Command => TokenKind::Command,
            LexState::Number => TokenKind::Number,
            LexState::Arg => TokenKind::Arg,
        };
        let tok = self.close(kind, end);
        (tok.start < tok.end).then_some(tok)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let here = self.pos;
            let Some(chr) = self.input[here..].chars().next() else {
                return self.flush();
            };
            match self.state {
                LexState::Command => match chr {
                    // the terminator is reprocessed, except a separating space
                    '\\' | '{' => return Some(self.close(TokenKind::Command, here)),
                    ' ' => {
                        self.pos += 1;
                        return Some(self.close(TokenKind::Command, here));
                    }
                    _ => self.pos += chr.len_utf8(),
                },
                LexState::Number => match chr {
                    '0'..='9' | '.' => self.pos += 1,
                    _ => return Some(self.close(TokenKind::Number, here)),
                },
                LexState::Arg => match chr {
                    '}' if here > self.mark => return Some(self.close(TokenKind::Arg, here)),
                    '}' => self.state = LexState::None,
                    _ => self.pos += chr.len_utf8(),
                },
                LexState::None => {
                    self.pos += chr.len_utf8();
                    let single = match chr {
                        '\\' => {
                            self.state = LexState::Command;
                            self.mark = here;
                            continue;
                        }
                        '0'..='9' | '.' => {
                            self.state = LexState::Number;
                            self.mark = here;
                            continue;
                        }
                        '{' => {
                            self.state = LexState::Arg;
                            self.mark = self.pos;
                            TokenKind::CommandArgStart
                        }
                        '}' => TokenKind::CommandArgEnd,
                        'a'..='z' => TokenKind::Var,
                        '+' | '-' => TokenKind::Command,
                        '_' => TokenKind::Subscript,
                        '^' => TokenKind::Superscript,
                        '(' => TokenKind::ParenLeft,
                        ')' => TokenKind::ParenRight,
                        _ => continue,
                    };
                    return Some(self.token(single, here, self.pos));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.input.len() - self.pos + 1))
    }
}

impl<'a> FusedIterator for Tokenizer<'a> {}

/// Lex a whole input into a token vector
pub fn lex(inp: &str) -> Vec<Token<'_>> {
    Tokenizer::new(inp).collect()
}
