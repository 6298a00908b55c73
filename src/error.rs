//! Errors raised while parsing, compiling, or serializing expressions
use crate::tokenizer::TokenKind;

/// A parse rule's structural preconditions weren't met
///
/// These are the failures the rule dispatcher treats as "try the next rule". Offsets are byte
/// offsets into the original input.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// There were no tokens left to parse.
    #[error("empty token list")]
    EmptyInput,

    /// A fixed-shape rule needed more tokens than remained.
    #[error("token list of insufficient length for {rule}: {found} < {required}")]
    InsufficientTokens {
        rule: &'static str,
        found: usize,
        required: usize,
    },

    /// A token of the wrong kind sat where the rule expected another.
    #[error("expected {expected:?} but found {found:?} `{text}` at offset {start}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        text: String,
        start: usize,
    },

    /// An operator position held a token with no binary-operator meaning.
    #[error("unrecognized operator `{text}` at offset {start}")]
    UnknownOperator { text: String, start: usize },

    /// A numeric run that doesn't convert to a float, e.g. `1.2.3`.
    #[error("invalid number `{text}` at offset {start}")]
    InvalidNumber { text: String, start: usize },

    /// A closing delimiter appeared with no matching opener.
    #[error("unmatched closing `{text}` at offset {start}")]
    UnbalancedScope { text: String, start: usize },

    /// The input ended while a scope was still open.
    #[error("unclosed `{text}` at offset {start}")]
    UnclosedScope { text: String, start: usize },

    /// Implicit multiplication needs at least two adjacent factors.
    #[error("implicit multiplication needs at least two factors at offset {start}")]
    SingletonRun { start: usize },

    /// A rule succeeded but left tokens it couldn't account for.
    #[error("unexpected trailing `{text}` at offset {start}")]
    TrailingTokens { text: String, start: usize },

    /// Every rule in the grammar failed on this token.
    #[error("failed to parse tokens starting at `{text}` (offset {start})")]
    NoRuleMatched { text: String, start: usize },
}

/// Any failure surfaced by this crate
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input didn't match the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A recognized construct that isn't implemented yet.
    #[error("unsupported construct: {0}")]
    Unsupported(String),

    /// A compiled function was called with the wrong number of values.
    #[error("expected {expected} arguments, got {found}")]
    Arity { expected: usize, found: usize },

    /// A compiled function was called by name without a value for a parameter.
    #[error("no value bound for variable `{0}`")]
    Unbound(String),

    /// A structured dict that doesn't describe a valid tree.
    #[error("malformed node dict: {0}")]
    MalformedDict(String),

    /// The JSON layer failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unsupported(what: impl Into<String>) -> Self {
        Error::Unsupported(what.into())
    }
}

/// A `Result` alias with this crate's [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::{Error, ParseError};
    use crate::tokenizer::TokenKind;

    #[test]
    fn messages_point_at_tokens() {
        let err = ParseError::UnexpectedToken {
            expected: TokenKind::ParenLeft,
            found: TokenKind::Var,
            text: "x".into(),
            start: 4,
        };
        assert_eq!(
            err.to_string(),
            "expected ParenLeft but found Var `x` at offset 4"
        );

        let err = ParseError::InsufficientTokens {
            rule: "subscript",
            found: 3,
            required: 5,
        };
        assert_eq!(
            err.to_string(),
            "token list of insufficient length for subscript: 3 < 5"
        );
    }

    #[test]
    fn parse_errors_are_transparent() {
        let err: Error = ParseError::EmptyInput.into();
        assert!(matches!(err, Error::Parse(ParseError::EmptyInput)));
        assert_eq!(err.to_string(), "empty token list");
    }
}
