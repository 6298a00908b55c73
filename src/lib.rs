//! A small parser for LaTeX-like math markup that compiles to evaluable functions
//!
//! Markup like `x+y+5+z`, `\frac{1}{2}` or `x_{1}\cdot 3` is lexed into
//! [`Token`]s, parsed into a [`Node`][tree::Node] tree, and then either serialized to a tagged
//! JSON form or compiled into a [`Function`] of its free variables.
//!
//! ## Usage
//!
//! ```sh
//! cargo add texmath-parser
//! ```
//!
//! then
//!
//! ```
//! let func = texmath_parser::compile("x+y+5+z").unwrap();
//! assert_eq!(func.call(&[1.0, 2.0, 3.0]).unwrap(), 11.0);
//! ```
//!
//! ## Dialect
//!
//! The grammar is small and fixed. Tokens are single lowercase letter variables, decimal numbers,
//! `\commands`, the bare operators `+`, `-` and `^`, the script markers `_` and `^`, parentheses,
//! and braces whose contents are captured verbatim as one argument. Anything else, including
//! whitespace between tokens, is skipped.
//!
//! ```txt
//! n ::= digits with decimal points           numbers
//! v ::= a | b | ... | z                      variables
//! a ::= raw text between { and }             arguments
//! o ::= + | ^ | \cdot | \times | \frac | \div binary commands
//! u ::= \sqrt | -                            unary commands
//! A ::= (E) | o{a}{a} | v^{a} | v_{a} | u{a} | uA | n | v
//! I ::= A o I | A o A                        infix chains fold to the right
//! E ::= (E) | o{a}{a} | I | v^{a} | v_{a} | u{a} | uA | n | v
//! ```
//!
//! The alternatives of `E` are tried in order and the first one that consumes the whole input
//! wins, so `x+y+5+z` is `x+(y+(5+z))`. There's no operator precedence beyond that ordering:
//! `2\cdot 3+4` is `2*(3+4)`. The bare `^` folds the same way, so `x^2+1` is `x**(2+1)`. Use
//! parentheses to group differently.
//!
//! ```
//! let func = texmath_parser::compile("x^2+1").unwrap();
//! assert_eq!(func.to_string(), "|x| (x**(2+1))");
//! assert_eq!(func.call(&[2.0]).unwrap(), 8.0);
//! assert_eq!(texmath_parser::compile("(x^2)+1").unwrap().call(&[2.0]).unwrap(), 5.0);
//! ```
//!
//! Arguments are never parsed further. `\frac{1}{2}` divides the raw arguments `1` and `2`, and
//! `x^{2}` raises `x` to the raw argument `2`. Compiling a tree reads arguments as numbers.
//!
//! ### Implicit multiplication
//!
//! Runs of numbers and variables, like `2xt`, can be read as right-folded products. This is off by
//! default; enable it with [`Parser::with_implicit_multiplication`].
//!
//! ```
//! use texmath_parser::{lex, Parser};
//!
//! let tokens = lex("2xt+1");
//! assert!(Parser::new().parse_complete(&tokens).is_err());
//! let parser = Parser::new().with_implicit_multiplication(true);
//! let tree = parser.parse_complete(&tokens).unwrap();
//! assert_eq!(tree.to_string(), "((2*(x*t))+1)");
//! ```
//!
//! ### Custom commands
//!
//! Commands get their meaning from a [`CommandMap`][command_map::CommandMap]. The default is
//! built from [`LATEX_COMMANDS`], but any table works:
//!
//! ```
//! use texmath_parser::command_map::HashCommandMap;
//! use texmath_parser::tree::BinaryOpKind;
//! use texmath_parser::{lex, Command, Parser};
//!
//! let commands = HashCommandMap::from_iter([("\\over", Command::Binary(BinaryOpKind::Divide))]);
//! let tree = Parser::with_commands(&commands).parse_complete(&lex("x\\over 2"));
//! assert_eq!(tree.unwrap().to_string(), "(x/2)");
//! ```
//!
//! ## Tree Structure
//!
//! Every [`Node`][tree::Node] owns its children. The constructors accept anything that converts
//! [Into] a node, so trees can be written by hand:
//!
//! ```
//! use texmath_parser::tree::{BinaryOp, BinaryOpKind, Node};
//!
//! let tree = Node::from(BinaryOp::new(BinaryOpKind::Multiply, 5.0, 7.0));
//! assert_eq!(
//!     texmath_parser::serialize::to_json(&tree).unwrap(),
//!     r#"{"type":"ASTBinaryOp","op":"*","left_arg":{"type":"ASTNumber","number":"5"},"right_arg":{"type":"ASTNumber","number":"7"}}"#,
//! );
//! ```
#![warn(missing_docs)]
pub mod command_map;
pub mod compile;
pub mod error;
mod parse;
pub mod primitives;
pub mod serialize;
mod tokenizer;
pub mod tree;

pub use compile::Function;
pub use error::{Error, ParseError, Result};
pub use parse::{
    Command, DefaultCommands, Parsed, Parser, Rule, DEFAULT_RULES, IMPLICIT_RULES, LATEX_COMMANDS,
};
pub use tokenizer::{lex, Token, TokenKind, Tokenizer};

/// Parse a whole input with the default parser
///
/// ```
/// let tree = texmath_parser::parse("x_{1}").unwrap();
/// assert_eq!(tree, texmath_parser::tree::Node::Var("x1".into()));
/// ```
pub fn parse(inp: &str) -> Result<tree::Node> {
    Parser::new().parse_complete(&lex(inp))
}

/// Parse and compile a whole input with the default parser
pub fn compile(inp: &str) -> Result<Function> {
    parse(inp)?.compile()
}
