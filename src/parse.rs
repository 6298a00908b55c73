use crate::command_map::CommandMap;
#[cfg(not(feature = "qp-trie"))]
use crate::command_map::HashCommandMap;
#[cfg(feature = "qp-trie")]
use crate::command_map::QpTrieCommandMap;
use crate::error::{Error, ParseError, Result};
use crate::primitives::{consume_balanced_scope, consume_run, ScopeResult};
use crate::tokenizer::{Token, TokenKind};
use crate::tree::{BinaryOp, BinaryOpKind, Node, UnaryCommand, UnaryKind};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// What a command or operator token means to the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// An operator taking two operands, infix (`a+b`) or braced (`\frac{a}{b}`)
    Binary(BinaryOpKind),
    /// A prefix command taking one operand
    Unary(UnaryKind),
}

macro_rules! commands {
    ($($cmd:expr => $($str:expr),+;)+) => {
        [
            $(
                $(
                    ($str, $cmd),
                )+
            )+
        ]
    };
}

/// The commands the default parser understands
///
/// Exported so alternate [command maps][crate::command_map] can be built from it, or extended.
pub const LATEX_COMMANDS: [(&str, Command); 8] = commands!(
    Command::Binary(BinaryOpKind::Add) => "+";
    Command::Binary(BinaryOpKind::Multiply) => "\\cdot", "\\times";
    Command::Binary(BinaryOpKind::Divide) => "\\frac", "\\div";
    Command::Binary(BinaryOpKind::Pow) => "^";
    Command::Unary(UnaryKind::Sqrt) => "\\sqrt";
    Command::Unary(UnaryKind::Negative) => "-";
);

/// The command map [`Parser::new`] uses
#[cfg(feature = "qp-trie")]
pub type DefaultCommands = QpTrieCommandMap<&'static str, Command>;
/// The command map [`Parser::new`] uses
#[cfg(not(feature = "qp-trie"))]
pub type DefaultCommands = HashCommandMap<&'static str, Command>;

#[cfg(feature = "qp-trie")]
lazy_static! {
    static ref DEFAULT_COMMANDS: DefaultCommands = QpTrieCommandMap::from_iter(LATEX_COMMANDS);
}
#[cfg(not(feature = "qp-trie"))]
lazy_static! {
    static ref DEFAULT_COMMANDS: DefaultCommands = HashCommandMap::from_iter(LATEX_COMMANDS);
}

/// A single parse rule
///
/// The order of a rule list is the grammar's precedence: the dispatcher tries each rule in turn
/// and the first to succeed wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `( expr )`
    Parenthesized,
    /// A binary command with two braced arguments, `\frac{1}{2}`
    BracketBinaryOp,
    /// `atom OP operand`, folding to the right
    InfixBinaryOp,
    /// `x^{2}`
    Superscript,
    /// `x_{1}`, folded into the variable name
    Subscript,
    /// A unary command followed by a braced argument or an atom, `\sqrt{2}`, `-x`
    UnaryCommand,
    /// Adjacent numbers and variables, `2xt`
    ImplicitMultiplication,
    /// A numeric literal
    Number,
    /// A single variable
    Variable,
}

/// The top-level rules in priority order
pub const DEFAULT_RULES: [Rule; 8] = [
    Rule::Parenthesized,
    Rule::BracketBinaryOp,
    Rule::InfixBinaryOp,
    Rule::Superscript,
    Rule::Subscript,
    Rule::UnaryCommand,
    Rule::Number,
    Rule::Variable,
];

/// The top-level rules when implicit multiplication is enabled
pub const IMPLICIT_RULES: [Rule; 9] = [
    Rule::Parenthesized,
    Rule::BracketBinaryOp,
    Rule::InfixBinaryOp,
    Rule::Superscript,
    Rule::Subscript,
    Rule::UnaryCommand,
    Rule::ImplicitMultiplication,
    Rule::Number,
    Rule::Variable,
];

// Right hand operands of an infix operator; everything after the first is an atom.
const OPERANDS: [Rule; 8] = [
    Rule::InfixBinaryOp,
    Rule::Parenthesized,
    Rule::BracketBinaryOp,
    Rule::Superscript,
    Rule::Subscript,
    Rule::UnaryCommand,
    Rule::Number,
    Rule::Variable,
];
const IMPLICIT_OPERANDS: [Rule; 9] = [
    Rule::InfixBinaryOp,
    Rule::Parenthesized,
    Rule::BracketBinaryOp,
    Rule::Superscript,
    Rule::Subscript,
    Rule::UnaryCommand,
    Rule::ImplicitMultiplication,
    Rule::Number,
    Rule::Variable,
];

const PARENTHESIZED: &str = "parenthesized expression";
const BRACKET_BINARY: &str = "bracketed binary operation";
const INFIX_BINARY: &str = "infix binary operation";
const SUPERSCRIPT: &str = "superscript";
const SUBSCRIPT: &str = "subscript";
const UNARY: &str = "unary command";

// Outcomes of earlier rule applications, keyed by rule and token subslice (address, length). A
// success keeps the node and how many tokens it left.
type Memo = HashMap<(Rule, usize, usize), Result<(Node, usize), ParseError>>;

/// A successfully parsed node and the tokens after it
///
/// `remainder` is always a suffix of the slice handed to the rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<'t, 'a> {
    /// The parsed node
    pub node: Node,
    /// The unconsumed tokens
    pub remainder: &'t [Token<'a>],
}

fn require(rule: &'static str, tokens: &[Token<'_>], required: usize) -> Result<(), ParseError> {
    if tokens.len() < required {
        Err(ParseError::InsufficientTokens {
            rule,
            found: tokens.len(),
            required,
        })
    } else {
        Ok(())
    }
}

fn expect(tok: &Token<'_>, kind: TokenKind) -> Result<(), ParseError> {
    if tok.kind == kind {
        Ok(())
    } else {
        Err(ParseError::UnexpectedToken {
            expected: kind,
            found: tok.kind,
            text: tok.text.to_owned(),
            start: tok.start,
        })
    }
}

fn number(tok: &Token<'_>) -> Result<Node, ParseError> {
    expect(tok, TokenKind::Number)?;
    tok.text
        .parse()
        .map(Node::Number)
        .map_err(|_| ParseError::InvalidNumber {
            text: tok.text.to_owned(),
            start: tok.start,
        })
}

fn factor(tok: &Token<'_>) -> Result<Node, ParseError> {
    match tok.kind {
        TokenKind::Var => Ok(Node::Var(tok.text.to_owned())),
        _ => number(tok),
    }
}

fn braces<'t, 'a>(tokens: &'t [Token<'a>]) -> Result<ScopeResult<'t, 'a>> {
    Ok(consume_balanced_scope(
        tokens,
        TokenKind::CommandArgStart,
        TokenKind::CommandArgEnd,
    )?)
}

/// The parts of `x_{1}` / `x^{2}`: the base variable and the braced argument
fn script_parts<'t, 'a>(
    tokens: &'t [Token<'a>],
    marker: TokenKind,
) -> Result<(&'t Token<'a>, &'t Token<'a>)> {
    expect(&tokens[0], TokenKind::Var)?;
    expect(&tokens[1], marker)?;
    expect(&tokens[2], TokenKind::CommandArgStart)?;
    match (tokens[3].kind, tokens[4].kind) {
        (TokenKind::Arg, TokenKind::CommandArgEnd) => Ok((&tokens[0], &tokens[3])),
        _ => Err(Error::unsupported(format!(
            "script argument that isn't a braced literal at offset {}",
            tokens[3].start
        ))),
    }
}

/// A recursive descent parser over lexed tokens
///
/// The parser carries its configuration: the command table that gives operator tokens their
/// meaning, and whether adjacent factors multiply implicitly. Every rule is also available on its
/// own through [`apply`][Parser::apply] or its `parse_*` method.
///
/// # Example
/// ```
/// use texmath_parser::tree::{BinaryOp, BinaryOpKind, Node};
/// use texmath_parser::{lex, Parser};
///
/// let tokens = lex("2x");
/// let parser = Parser::new().with_implicit_multiplication(true);
/// let tree = parser.parse_complete(&tokens).unwrap();
/// let expected = BinaryOp::new(BinaryOpKind::Multiply, 2.0, Node::Var("x".into()));
/// assert_eq!(tree, Node::from(expected));
/// ```
#[derive(Debug)]
pub struct Parser<'m, M> {
    commands: &'m M,
    implicit_multiplication: bool,
}

impl<'m, M> Clone for Parser<'m, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'m, M> Copy for Parser<'m, M> {}

impl Parser<'static, DefaultCommands> {
    /// A parser over [`LATEX_COMMANDS`] without implicit multiplication
    pub fn new() -> Self {
        Self::with_commands(&DEFAULT_COMMANDS)
    }
}

impl Default for Parser<'static, DefaultCommands> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'m, M> Parser<'m, M>
where
    M: CommandMap<Command>,
{
    /// Create a parser with a custom command table
    pub fn with_commands(commands: &'m M) -> Self {
        Parser {
            commands,
            implicit_multiplication: false,
        }
    }

    /// Enable or disable implicit multiplication in automatic dispatch
    ///
    /// When enabled, runs of numbers and variables (`2xt`) parse as products wherever an operand
    /// is expected. [`parse_implicit_multiplication`][Parser::parse_implicit_multiplication] works
    /// either way.
    pub fn with_implicit_multiplication(mut self, enabled: bool) -> Self {
        self.implicit_multiplication = enabled;
        self
    }

    /// Whether implicit multiplication takes part in dispatch
    pub fn implicit_multiplication(&self) -> bool {
        self.implicit_multiplication
    }

    /// The top-level rules in the order they're tried
    pub fn rules(&self) -> &'static [Rule] {
        if self.implicit_multiplication {
            &IMPLICIT_RULES
        } else {
            &DEFAULT_RULES
        }
    }

    fn operands(&self) -> &'static [Rule] {
        if self.implicit_multiplication {
            &IMPLICIT_OPERANDS
        } else {
            &OPERANDS
        }
    }

    fn atoms(&self) -> &'static [Rule] {
        &self.operands()[1..]
    }

    /// Apply one rule to the start of `tokens`
    pub fn apply<'t, 'a>(&self, rule: Rule, tokens: &'t [Token<'a>]) -> Result<Parsed<'t, 'a>> {
        self.apply_in(&mut Memo::new(), rule, tokens)
    }

    /// Parse a prefix of `tokens` with the first top-level rule that succeeds
    pub fn parse<'t, 'a>(&self, tokens: &'t [Token<'a>]) -> Result<Parsed<'t, 'a>> {
        self.first_match(&mut Memo::new(), self.rules(), tokens)
    }

    /// Parse all of `tokens`
    ///
    /// Rules are tried in the same order as [`parse`][Parser::parse], but a rule only wins if it
    /// consumes every token. If none does, the error points at the trailing tokens of the first
    /// rule that matched a prefix.
    pub fn parse_complete(&self, tokens: &[Token<'_>]) -> Result<Node> {
        self.complete(&mut Memo::new(), tokens)
    }

    /// Parse a leading number token
    pub fn parse_number<'t, 'a>(&self, tokens: &'t [Token<'a>]) -> Result<Parsed<'t, 'a>> {
        let (first, remainder) = tokens.split_first().ok_or(ParseError::EmptyInput)?;
        Ok(Parsed {
            node: number(first)?,
            remainder,
        })
    }

    /// Parse a leading variable token
    pub fn parse_variable<'t, 'a>(&self, tokens: &'t [Token<'a>]) -> Result<Parsed<'t, 'a>> {
        let (first, remainder) = tokens.split_first().ok_or(ParseError::EmptyInput)?;
        expect(first, TokenKind::Var)?;
        Ok(Parsed {
            node: Node::Var(first.text.to_owned()),
            remainder,
        })
    }

    /// Parse a leading raw argument token
    pub fn parse_arg<'t, 'a>(&self, tokens: &'t [Token<'a>]) -> Result<Parsed<'t, 'a>> {
        let (first, remainder) = tokens.split_first().ok_or(ParseError::EmptyInput)?;
        expect(first, TokenKind::Arg)?;
        Ok(Parsed {
            node: Node::Arg(first.text.to_owned()),
            remainder,
        })
    }

    /// Parse `( expr )`, where `expr` must use every token inside the parentheses
    pub fn parse_parenthesized<'t, 'a>(&self, tokens: &'t [Token<'a>]) -> Result<Parsed<'t, 'a>> {
        self.apply(Rule::Parenthesized, tokens)
    }

    /// Parse a binary command with two braced arguments, e.g. `\frac{1}{2}`
    ///
    /// The arguments stay raw [`Arg`][Node::Arg] leaves.
    pub fn parse_bracket_binary_op<'t, 'a>(
        &self,
        tokens: &'t [Token<'a>],
    ) -> Result<Parsed<'t, 'a>> {
        self.apply(Rule::BracketBinaryOp, tokens)
    }

    /// Parse `atom OP operand`
    ///
    /// The right operand is itself tried as an infix operation first, so chains fold to the
    /// right: `x+y+5+z` is `x+(y+(5+z))`.
    pub fn parse_infix_binary_op<'t, 'a>(
        &self,
        tokens: &'t [Token<'a>],
    ) -> Result<Parsed<'t, 'a>> {
        self.apply(Rule::InfixBinaryOp, tokens)
    }

    /// Parse `x_{1}` into the variable `x1`
    pub fn parse_subscript<'t, 'a>(&self, tokens: &'t [Token<'a>]) -> Result<Parsed<'t, 'a>> {
        self.apply(Rule::Subscript, tokens)
    }

    /// Parse `x^{2}` into a power with a raw exponent
    pub fn parse_superscript<'t, 'a>(&self, tokens: &'t [Token<'a>]) -> Result<Parsed<'t, 'a>> {
        self.apply(Rule::Superscript, tokens)
    }

    /// Parse a unary command applied to a braced argument or an atom
    pub fn parse_unary_command<'t, 'a>(
        &self,
        tokens: &'t [Token<'a>],
    ) -> Result<Parsed<'t, 'a>> {
        self.apply(Rule::UnaryCommand, tokens)
    }

    /// Parse a run of adjacent numbers and variables as a right-folded product
    ///
    /// `2xt` becomes `2*(x*t)`. The run needs at least two factors.
    pub fn parse_implicit_multiplication<'t, 'a>(
        &self,
        tokens: &'t [Token<'a>],
    ) -> Result<Parsed<'t, 'a>> {
        let first = tokens.first().ok_or(ParseError::EmptyInput)?;
        let run = consume_run(tokens, |tok| {
            matches!(tok.kind, TokenKind::Number | TokenKind::Var)
        });
        let Some((last, init)) = run.inside.split_last().filter(|(_, init)| !init.is_empty())
        else {
            return Err(ParseError::SingletonRun { start: first.start }.into());
        };
        let node = init.iter().rev().try_fold(factor(last)?, |acc, tok| {
            Ok::<Node, ParseError>(BinaryOp::new(BinaryOpKind::Multiply, factor(tok)?, acc).into())
        })?;
        Ok(Parsed {
            node,
            remainder: run.remainder,
        })
    }

    /// Apply `rule`, reusing an earlier outcome for the same tokens
    ///
    /// Every slice the rules see is a subslice of the caller's tokens, so its address and length
    /// identify it for the rest of the parse.
    fn apply_in<'t, 'a>(
        &self,
        memo: &mut Memo,
        rule: Rule,
        tokens: &'t [Token<'a>],
    ) -> Result<Parsed<'t, 'a>> {
        let key = (rule, tokens.as_ptr() as usize, tokens.len());
        if let Some(seen) = memo.get(&key) {
            return match seen {
                Ok((node, rest)) => Ok(Parsed {
                    node: node.clone(),
                    remainder: &tokens[tokens.len() - rest..],
                }),
                Err(err) => Err(err.clone().into()),
            };
        }
        let res = match rule {
            Rule::Parenthesized => self.parenthesized(memo, tokens),
            Rule::BracketBinaryOp => self.bracket_binary_op(tokens),
            Rule::InfixBinaryOp => self.infix_binary_op(memo, tokens),
            Rule::Superscript => self.superscript(tokens),
            Rule::Subscript => self.subscript(tokens),
            Rule::UnaryCommand => self.unary_command(memo, tokens),
            Rule::ImplicitMultiplication => self.parse_implicit_multiplication(tokens),
            Rule::Number => self.parse_number(tokens),
            Rule::Variable => self.parse_variable(tokens),
        };
        // anything but a parse failure ends the whole parse, so only these are worth keeping
        match &res {
            Ok(parsed) => {
                memo.insert(key, Ok((parsed.node.clone(), parsed.remainder.len())));
            }
            Err(Error::Parse(err)) => {
                memo.insert(key, Err(err.clone()));
            }
            Err(_) => {}
        }
        res
    }

    /// The first rule of `rules` that applies; only parse failures move on to the next rule
    fn first_match<'t, 'a>(
        &self,
        memo: &mut Memo,
        rules: &[Rule],
        tokens: &'t [Token<'a>],
    ) -> Result<Parsed<'t, 'a>> {
        let first = tokens.first().ok_or(ParseError::EmptyInput)?;
        for &rule in rules {
            match self.apply_in(memo, rule, tokens) {
                Err(Error::Parse(_)) => continue,
                res => return res,
            }
        }
        Err(ParseError::NoRuleMatched {
            text: first.text.to_owned(),
            start: first.start,
        }
        .into())
    }

    fn complete(&self, memo: &mut Memo, tokens: &[Token<'_>]) -> Result<Node> {
        let first = tokens.first().ok_or(ParseError::EmptyInput)?;
        let mut trailing = None;
        for &rule in self.rules() {
            match self.apply_in(memo, rule, tokens) {
                Ok(Parsed {
                    node,
                    remainder: [],
                }) => return Ok(node),
                Ok(Parsed {
                    remainder: [next, ..],
                    ..
                }) => {
                    trailing.get_or_insert_with(|| ParseError::TrailingTokens {
                        text: next.text.to_owned(),
                        start: next.start,
                    });
                }
                Err(Error::Parse(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Err(trailing
            .unwrap_or_else(|| ParseError::NoRuleMatched {
                text: first.text.to_owned(),
                start: first.start,
            })
            .into())
    }

    fn binary_op(&self, tok: &Token<'_>) -> Result<BinaryOpKind, ParseError> {
        match (tok.kind, self.commands.get_command(tok.text)) {
            (TokenKind::Command | TokenKind::Superscript, Some(&Command::Binary(op))) => Ok(op),
            _ => Err(ParseError::UnknownOperator {
                text: tok.text.to_owned(),
                start: tok.start,
            }),
        }
    }

    /// The single literal inside a pair of braces
    fn braced_arg(&self, inside: &[Token<'_>]) -> Result<Node> {
        let arg = self.parse_arg(inside)?;
        match arg.remainder.first() {
            None => Ok(arg.node),
            Some(next) => Err(ParseError::TrailingTokens {
                text: next.text.to_owned(),
                start: next.start,
            }
            .into()),
        }
    }

    fn parenthesized<'t, 'a>(
        &self,
        memo: &mut Memo,
        tokens: &'t [Token<'a>],
    ) -> Result<Parsed<'t, 'a>> {
        require(PARENTHESIZED, tokens, 2)?;
        let scope = consume_balanced_scope(tokens, TokenKind::ParenLeft, TokenKind::ParenRight)?;
        let inner = self.complete(memo, scope.inside)?;
        Ok(Parsed {
            node: Node::expression(inner),
            remainder: scope.remainder,
        })
    }

    fn bracket_binary_op<'t, 'a>(&self, tokens: &'t [Token<'a>]) -> Result<Parsed<'t, 'a>> {
        require(BRACKET_BINARY, tokens, 1)?;
        let op = self.binary_op(&tokens[0])?;
        let first = braces(&tokens[1..])?;
        let second = braces(first.remainder)?;
        let node = BinaryOp::new(
            op,
            self.braced_arg(first.inside)?,
            self.braced_arg(second.inside)?,
        );
        Ok(Parsed {
            node: node.into(),
            remainder: second.remainder,
        })
    }

    fn infix_binary_op<'t, 'a>(
        &self,
        memo: &mut Memo,
        tokens: &'t [Token<'a>],
    ) -> Result<Parsed<'t, 'a>> {
        require(INFIX_BINARY, tokens, 3)?;
        let left = self.first_match(memo, self.atoms(), tokens)?;
        require(INFIX_BINARY, left.remainder, 2)?;
        let op = self.binary_op(&left.remainder[0])?;
        let right = self.first_match(memo, self.operands(), &left.remainder[1..])?;
        Ok(Parsed {
            node: BinaryOp::new(op, left.node, right.node).into(),
            remainder: right.remainder,
        })
    }

    fn subscript<'t, 'a>(&self, tokens: &'t [Token<'a>]) -> Result<Parsed<'t, 'a>> {
        require(SUBSCRIPT, tokens, 5)?;
        let (var, arg) = script_parts(tokens, TokenKind::Subscript)?;
        Ok(Parsed {
            node: Node::Var(format!("{}{}", var.text, arg.text)),
            remainder: &tokens[5..],
        })
    }

    fn superscript<'t, 'a>(&self, tokens: &'t [Token<'a>]) -> Result<Parsed<'t, 'a>> {
        require(SUPERSCRIPT, tokens, 5)?;
        let (var, arg) = script_parts(tokens, TokenKind::Superscript)?;
        let node = BinaryOp::new(
            BinaryOpKind::Pow,
            Node::Var(var.text.to_owned()),
            Node::Arg(arg.text.to_owned()),
        );
        Ok(Parsed {
            node: node.into(),
            remainder: &tokens[5..],
        })
    }

    fn unary_command<'t, 'a>(
        &self,
        memo: &mut Memo,
        tokens: &'t [Token<'a>],
    ) -> Result<Parsed<'t, 'a>> {
        require(UNARY, tokens, 2)?;
        let op = match (tokens[0].kind, self.commands.get_command(tokens[0].text)) {
            (TokenKind::Command, Some(&Command::Unary(op))) => op,
            _ => {
                return Err(ParseError::UnknownOperator {
                    text: tokens[0].text.to_owned(),
                    start: tokens[0].start,
                }
                .into())
            }
        };
        let arg = if tokens[1].kind == TokenKind::CommandArgStart {
            let scope = braces(&tokens[1..])?;
            Parsed {
                node: self.braced_arg(scope.inside)?,
                remainder: scope.remainder,
            }
        } else {
            self.first_match(memo, self.atoms(), &tokens[1..])?
        };
        Ok(Parsed {
            node: UnaryCommand::new(op, arg.node).into(),
            remainder: arg.remainder,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, Parser, Rule, DEFAULT_RULES, LATEX_COMMANDS};
    use crate::command_map::LinearCommandMap;
    use crate::error::{Error, ParseError};
    use crate::tokenizer::lex;
    use crate::tree::{BinaryOp, BinaryOpKind, Node, UnaryCommand, UnaryKind};

    fn var(name: &str) -> Node {
        Node::Var(name.into())
    }

    fn arg(raw: &str) -> Node {
        Node::Arg(raw.into())
    }

    fn bin(op: BinaryOpKind, left: impl Into<Node>, right: impl Into<Node>) -> Node {
        Node::from(BinaryOp::new(op, left, right))
    }

    fn unary(op: UnaryKind, arg: impl Into<Node>) -> Node {
        Node::from(UnaryCommand::new(op, arg))
    }

    fn complete(inp: &str) -> Result<Node, Error> {
        Parser::new().parse_complete(&lex(inp))
    }

    #[test]
    fn number() {
        let tokens = lex("5\\cdot 3");
        let number = Parser::new().parse_number(&tokens).unwrap();
        assert_eq!(number.remainder.len(), tokens.len() - 1);
        assert_eq!(number.node, Node::Number(5.0));
    }

    #[test]
    fn variable() {
        let tokens = lex("x+3");
        let parsed = Parser::new().parse_variable(&tokens).unwrap();
        assert_eq!(parsed.node, var("x"));
        assert_eq!(parsed.remainder.len(), 2);
        assert!(matches!(
            Parser::new().parse_variable(&tokens[1..]),
            Err(Error::Parse(ParseError::UnexpectedToken { .. }))
        ));
    }

    #[test]
    fn invalid_number() {
        let tokens = lex("1.2.3");
        let err = Parser::new().apply(Rule::Number, &tokens).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::InvalidNumber { start: 0, .. })
        ));
        assert!(matches!(
            complete("1.2.3"),
            Err(Error::Parse(ParseError::NoRuleMatched { .. }))
        ));
    }

    #[test]
    fn infix_add() {
        let tokens = lex("5+3");
        let parsed = Parser::new().apply(Rule::InfixBinaryOp, &tokens).unwrap();
        assert!(parsed.remainder.is_empty());
        assert_eq!(parsed.node, bin(BinaryOpKind::Add, 5.0, 3.0));
    }

    #[test]
    fn infix_right_fold() {
        let expected = bin(
            BinaryOpKind::Add,
            var("x"),
            bin(
                BinaryOpKind::Add,
                var("y"),
                bin(BinaryOpKind::Add, 5.0, var("z")),
            ),
        );
        assert_eq!(complete("x+y+5+z").unwrap(), expected);
    }

    #[test]
    fn infix_commands() {
        let expected = bin(
            BinaryOpKind::Multiply,
            var("x"),
            bin(BinaryOpKind::Pow, var("y"), 2.0),
        );
        assert_eq!(complete("x\\cdot y^2").unwrap(), expected);
        assert_eq!(
            complete("6\\div 3").unwrap(),
            bin(BinaryOpKind::Divide, 6.0, 3.0)
        );
    }

    #[test]
    fn infix_needs_three_tokens() {
        let tokens = lex("x+");
        let err = Parser::new().apply(Rule::InfixBinaryOp, &tokens).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::InsufficientTokens {
                found: 2,
                required: 3,
                ..
            })
        ));
    }

    #[test]
    fn infix_unknown_operator() {
        let tokens = lex("x\\alpha y");
        let err = Parser::new().apply(Rule::InfixBinaryOp, &tokens).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::UnknownOperator { start: 1, .. })
        ));
        // `\sqrt` is a command, but not a binary one
        let tokens = lex("x\\sqrt y");
        assert!(Parser::new().apply(Rule::InfixBinaryOp, &tokens).is_err());
    }

    #[test]
    fn subscript() {
        let tokens = lex("x_{1}");
        let parsed = Parser::new().apply(Rule::Subscript, &tokens).unwrap();
        assert_eq!(parsed.node, var("x1"));
        assert!(parsed.remainder.is_empty());
        assert_eq!(complete("x_{1}").unwrap(), var("x1"));
        assert_eq!(
            complete("x_{1}+3").unwrap(),
            bin(BinaryOpKind::Add, var("x1"), 3.0)
        );
    }

    #[test]
    fn subscript_needs_five_tokens() {
        let tokens = lex("x_{1");
        let err = Parser::new().apply(Rule::Subscript, &tokens).unwrap_err();
        assert_eq!(
            err.to_string(),
            "token list of insufficient length for subscript: 4 < 5"
        );
    }

    #[test]
    fn superscript() {
        let expected = bin(BinaryOpKind::Pow, var("x"), arg("2"));
        assert_eq!(complete("x^{2}").unwrap(), expected);
        assert_eq!(
            complete("x^{2}+1").unwrap(),
            bin(BinaryOpKind::Add, expected, 1.0)
        );
    }

    #[test]
    fn empty_script_is_unsupported() {
        let err = complete("x^{}+1").unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn bracket_binary() {
        let tokens = lex("\\frac{1}{2}");
        let parsed = Parser::new().apply(Rule::BracketBinaryOp, &tokens).unwrap();
        assert!(parsed.remainder.is_empty());
        assert_eq!(parsed.node, bin(BinaryOpKind::Divide, arg("1"), arg("2")));
        assert_eq!(
            complete("\\cdot{a b}{c}").unwrap(),
            bin(BinaryOpKind::Multiply, arg("a b"), arg("c"))
        );
    }

    #[test]
    fn bracket_binary_needs_two_args() {
        let tokens = lex("\\frac{1}");
        assert!(Parser::new().apply(Rule::BracketBinaryOp, &tokens).is_err());
        assert!(complete("\\frac{}{2}").is_err());
    }

    #[test]
    fn parenthesized() {
        let tokens = lex("(x+1)+2");
        let parsed = Parser::new().parse(&tokens).unwrap();
        let inner = Node::expression(bin(BinaryOpKind::Add, var("x"), 1.0));
        // first success wins, even with tokens left over
        assert_eq!(parsed.node, inner);
        assert_eq!(parsed.remainder.len(), 2);
        assert_eq!(
            complete("(x+1)+2").unwrap(),
            bin(BinaryOpKind::Add, inner, 2.0)
        );
    }

    #[test]
    fn nested_parens() {
        assert_eq!(
            complete("((x))").unwrap(),
            Node::expression(Node::expression(var("x")))
        );
        assert!(complete("()").is_err());
    }

    #[test]
    fn deep_nesting() {
        let depth = 64;
        // ((((x)+1)+1)+1)... where every group is also the left atom of an infix
        let left = format!("{}x{}", "(".repeat(depth), ")+1".repeat(depth));
        let func = complete(&left).unwrap().compile().unwrap();
        assert_eq!(func.call(&[0.0]).unwrap(), depth as f64);

        let right = format!("{}x{}", "x+(".repeat(depth), ")".repeat(depth));
        let func = complete(&right).unwrap().compile().unwrap();
        assert_eq!(func.arity(), depth + 1);
        assert_eq!(func.call_with(|_| Some(1.0)).unwrap(), (depth + 1) as f64);
    }

    #[test]
    fn reused_results_keep_their_remainder() {
        // the group is parsed on its own, then again as the left atom of each infix
        let tokens = lex("(x)+(y)+z");
        let parsed = Parser::new().parse(&tokens).unwrap();
        assert_eq!(parsed.node, Node::expression(var("x")));
        assert_eq!(parsed.remainder.len(), tokens.len() - 3);
        assert_eq!(
            Parser::new().parse_complete(&tokens).unwrap(),
            bin(
                BinaryOpKind::Add,
                Node::expression(var("x")),
                bin(BinaryOpKind::Add, Node::expression(var("y")), var("z"))
            )
        );
    }

    #[test]
    fn unbalanced() {
        assert!(matches!(
            complete(")x"),
            Err(Error::Parse(ParseError::NoRuleMatched { start: 0, .. }))
        ));
        let tokens = lex(")x");
        assert!(matches!(
            Parser::new().apply(Rule::Parenthesized, &tokens),
            Err(Error::Parse(ParseError::UnbalancedScope { .. }))
        ));
        assert!(matches!(complete("(x+1"), Err(Error::Parse(_))));
    }

    #[test]
    fn unary_commands() {
        assert_eq!(
            complete("\\sqrt{2}").unwrap(),
            unary(UnaryKind::Sqrt, arg("2"))
        );
        assert_eq!(
            complete("-x+1").unwrap(),
            bin(BinaryOpKind::Add, unary(UnaryKind::Negative, var("x")), 1.0)
        );
        assert_eq!(
            complete("\\sqrt 2\\cdot 3").unwrap(),
            bin(BinaryOpKind::Multiply, unary(UnaryKind::Sqrt, 2.0), 3.0)
        );
    }

    #[test]
    fn implicit_multiplication_rule() {
        let tokens = lex("2xt+1");
        let parsed = Parser::new().parse_implicit_multiplication(&tokens).unwrap();
        let expected = bin(
            BinaryOpKind::Multiply,
            2.0,
            bin(BinaryOpKind::Multiply, var("x"), var("t")),
        );
        assert_eq!(parsed.node, expected);
        assert_eq!(parsed.remainder.len(), 2);
    }

    #[test]
    fn implicit_multiplication_singleton() {
        let tokens = lex("2+x");
        let err = Parser::new()
            .parse_implicit_multiplication(&tokens)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::SingletonRun { start: 0 })
        ));
    }

    #[test]
    fn implicit_multiplication_dispatch() {
        let tokens = lex("2x+1");
        assert!(matches!(
            Parser::new().parse_complete(&tokens),
            Err(Error::Parse(ParseError::TrailingTokens { start: 1, .. }))
        ));

        let parser = Parser::new().with_implicit_multiplication(true);
        assert!(parser.implicit_multiplication());
        assert!(parser.rules().contains(&Rule::ImplicitMultiplication));
        let expected = bin(
            BinaryOpKind::Add,
            bin(BinaryOpKind::Multiply, 2.0, var("x")),
            1.0,
        );
        assert_eq!(parser.parse_complete(&tokens).unwrap(), expected);
    }

    #[test]
    fn rule_order() {
        let parser = Parser::new();
        assert_eq!(parser.rules(), &DEFAULT_RULES[..]);
        assert_eq!(
            &parser.rules()[..3],
            &[
                Rule::Parenthesized,
                Rule::BracketBinaryOp,
                Rule::InfixBinaryOp,
            ][..]
        );
        assert!(!parser.rules().contains(&Rule::ImplicitMultiplication));
    }

    #[test]
    fn custom_commands() {
        let commands = LinearCommandMap::from_vec(vec![
            ("+", Command::Binary(BinaryOpKind::Add)),
            ("\\over", Command::Binary(BinaryOpKind::Divide)),
        ]);
        let parser = Parser::with_commands(&commands);
        assert_eq!(
            parser.parse_complete(&lex("x\\over y")).unwrap(),
            bin(BinaryOpKind::Divide, var("x"), var("y"))
        );
        assert!(parser.parse_complete(&lex("x\\cdot y")).is_err());
        assert_eq!(LATEX_COMMANDS.len(), 8);
    }

    #[test]
    fn empty() {
        assert!(matches!(
            complete(""),
            Err(Error::Parse(ParseError::EmptyInput))
        ));
    }
}
