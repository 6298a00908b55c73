//! The expression tree produced by the parser
//!
//! - [`Node`] - Any node in the tree
//! - [`BinaryOp`] - Two operands joined by a [`BinaryOpKind`], written either infix (`a+b`) or as
//!       a command with braced arguments (`\frac{a}{b}`)
//! - [`UnaryCommand`] - A prefix command like `\sqrt` or `-` applied to one operand
//!
//! Every node owns its children, and nothing in the tree changes after the parser builds it.
//! Like the parse structures, the constructors accept anything that converts [Into] a [`Node`].
//!
//! ```
//! use texmath_parser::tree::{BinaryOp, BinaryOpKind, Node};
//!
//! let sum = BinaryOp::new(BinaryOpKind::Add, Node::Var("x".into()), Node::Number(5.0));
//! assert_eq!(Node::from(sum).to_string(), "(x+5)");
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;

/// The arithmetic a [`BinaryOp`] performs
///
/// Serializes as its operator symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOpKind {
    /// `+`
    #[serde(rename = "+")]
    Add,
    /// `*`
    #[serde(rename = "*")]
    Multiply,
    /// `**`
    #[serde(rename = "**")]
    Pow,
    /// `/`
    #[serde(rename = "/")]
    Divide,
}

impl BinaryOpKind {
    /// The operator symbol used in sources and serialized trees
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOpKind::Add => "+",
            BinaryOpKind::Multiply => "*",
            BinaryOpKind::Pow => "**",
            BinaryOpKind::Divide => "/",
        }
    }

    /// Apply the operator
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOpKind::Add => left + right,
            BinaryOpKind::Multiply => left * right,
            BinaryOpKind::Pow => left.powf(right),
            BinaryOpKind::Divide => left / right,
        }
    }
}

impl fmt::Display for BinaryOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The function a [`UnaryCommand`] applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryKind {
    /// `\sqrt`
    Sqrt,
    /// prefix `-`
    Negative,
}

impl UnaryKind {
    /// Apply the command
    pub fn apply(self, arg: f64) -> f64 {
        match self {
            UnaryKind::Sqrt => arg.sqrt(),
            UnaryKind::Negative => -arg,
        }
    }
}

/// Two operands and the operator between them
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    /// The operator
    pub op: BinaryOpKind,
    left: Box<Node>,
    right: Box<Node>,
}

impl BinaryOp {
    /// Create a binary operation from fully built operands
    pub fn new<L, R>(op: BinaryOpKind, left: L, right: R) -> Self
    where
        L: Into<Node>,
        R: Into<Node>,
    {
        BinaryOp {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// The left operand
    pub fn left(&self) -> &Node {
        &self.left
    }

    /// The right operand
    pub fn right(&self) -> &Node {
        &self.right
    }
}

/// A prefix command applied to one operand
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryCommand {
    /// The command
    pub op: UnaryKind,
    arg: Box<Node>,
}

impl UnaryCommand {
    /// Create a unary command from a fully built argument
    pub fn new<A: Into<Node>>(op: UnaryKind, arg: A) -> Self {
        UnaryCommand {
            op,
            arg: Box::new(arg.into()),
        }
    }

    /// The operand
    pub fn arg(&self) -> &Node {
        &self.arg
    }
}

/// A node of the expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A numeric literal
    Number(f64),
    /// A variable, possibly with its subscript folded into the name (`x_{1}` is `x1`)
    Var(String),
    /// The raw text of a braced command argument
    Arg(String),
    /// A binary operation
    BinaryOp(BinaryOp),
    /// A parenthesized group
    Expression(Box<Node>),
    /// A unary command
    UnaryCommand(UnaryCommand),
}

impl Node {
    /// Wrap a node in parentheses
    pub fn expression<N: Into<Node>>(inner: N) -> Self {
        Node::Expression(Box::new(inner.into()))
    }

    /// Names of the variable leaves in left-to-right order
    ///
    /// A variable used twice appears twice; the list is the parameter order of the function
    /// [compiled][crate::compile::Function] from this node.
    ///
    /// ```
    /// let tree = texmath_parser::parse("x+y+x").unwrap();
    /// assert_eq!(tree.free_vars(), ["x", "y", "x"]);
    /// ```
    pub fn free_vars(&self) -> Vec<&str> {
        let mut vars = Vec::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars<'n>(&'n self, vars: &mut Vec<&'n str>) {
        match self {
            Node::Var(name) => vars.push(name.as_str()),
            Node::BinaryOp(bin) => {
                bin.left.collect_vars(vars);
                bin.right.collect_vars(vars);
            }
            Node::Expression(inner) => inner.collect_vars(vars),
            Node::UnaryCommand(unary) => unary.arg.collect_vars(vars),
            Node::Number(_) | Node::Arg(_) => {}
        }
    }
}

impl From<BinaryOp> for Node {
    fn from(bin: BinaryOp) -> Self {
        Node::BinaryOp(bin)
    }
}

impl From<UnaryCommand> for Node {
    fn from(unary: UnaryCommand) -> Self {
        Node::UnaryCommand(unary)
    }
}

impl From<f64> for Node {
    fn from(num: f64) -> Self {
        Node::Number(num)
    }
}

/// Renders the fully parenthesized source the node compiles to
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(num) => write!(f, "{num}"),
            Node::Var(name) => f.write_str(name),
            Node::Arg(raw) => f.write_str(raw),
            Node::BinaryOp(bin) => write!(f, "({}{}{})", bin.left, bin.op, bin.right),
            Node::Expression(inner) => write!(f, "({inner})"),
            Node::UnaryCommand(UnaryCommand {
                op: UnaryKind::Sqrt,
                arg,
            }) => write!(f, "sqrt({arg})"),
            Node::UnaryCommand(UnaryCommand {
                op: UnaryKind::Negative,
                arg,
            }) => write!(f, "(-{arg})"),
        }
    }
}
