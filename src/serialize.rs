//! The structured wire form of expression trees
//!
//! [`NodeDict`] mirrors [`Node`] with a `type` tag on every object. Numbers travel as their
//! decimal text rather than JSON numbers.
//!
//! ```
//! use texmath_parser::serialize::to_json;
//!
//! let tree = texmath_parser::parse("x_{1}").unwrap();
//! assert_eq!(to_json(&tree).unwrap(), r#"{"type":"ASTVar","name":"x1"}"#);
//! ```
use crate::error::{Error, Result};
use crate::tree::{BinaryOp, BinaryOpKind, Node};
use serde::{Deserialize, Serialize};

/// A tagged dict describing one node
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeDict {
    /// `{"type":"ASTNumber","number":"5"}`
    #[serde(rename = "ASTNumber")]
    Number { number: String },
    /// `{"type":"ASTVar","name":"x1"}`
    #[serde(rename = "ASTVar")]
    Var { name: String },
    /// `{"type":"ASTArg","value":"2"}`
    #[serde(rename = "ASTArg")]
    Arg { value: String },
    /// `{"type":"ASTBinaryOp","op":"+","left_arg":...,"right_arg":...}`
    #[serde(rename = "ASTBinaryOp")]
    BinaryOp {
        op: BinaryOpKind,
        left_arg: Box<NodeDict>,
        right_arg: Box<NodeDict>,
    },
    /// `{"type":"ASTExpression","children":[...]}`, always with one child
    #[serde(rename = "ASTExpression")]
    Expression { children: Vec<NodeDict> },
}

impl TryFrom<&Node> for NodeDict {
    type Error = Error;

    fn try_from(node: &Node) -> Result<Self> {
        Ok(match node {
            Node::Number(num) => NodeDict::Number {
                number: num.to_string(),
            },
            Node::Var(name) => NodeDict::Var { name: name.clone() },
            Node::Arg(value) => NodeDict::Arg {
                value: value.clone(),
            },
            Node::BinaryOp(bin) => NodeDict::BinaryOp {
                op: bin.op,
                left_arg: Box::new(bin.left().try_into()?),
                right_arg: Box::new(bin.right().try_into()?),
            },
            Node::Expression(inner) => NodeDict::Expression {
                children: vec![NodeDict::try_from(&**inner)?],
            },
            Node::UnaryCommand(unary) => {
                return Err(Error::unsupported(format!(
                    "serializing unary command {:?}",
                    unary.op
                )))
            }
        })
    }
}

impl TryFrom<NodeDict> for Node {
    type Error = Error;

    fn try_from(dict: NodeDict) -> Result<Self> {
        Ok(match dict {
            NodeDict::Number { number } => match number.parse() {
                Ok(num) => Node::Number(num),
                Err(_) => return Err(Error::MalformedDict(format!("bad number `{number}`"))),
            },
            NodeDict::Var { name } => Node::Var(name),
            NodeDict::Arg { value } => Node::Arg(value),
            NodeDict::BinaryOp {
                op,
                left_arg,
                right_arg,
            } => BinaryOp::new(op, Node::try_from(*left_arg)?, Node::try_from(*right_arg)?).into(),
            NodeDict::Expression { children } => {
                let found = children.len();
                let [inner]: [NodeDict; 1] = children.try_into().map_err(|_| {
                    Error::MalformedDict(format!("expression with {found} children"))
                })?;
                Node::expression(Node::try_from(inner)?)
            }
        })
    }
}

/// The dict form of a tree
pub fn to_dict(node: &Node) -> Result<NodeDict> {
    node.try_into()
}

/// Serialize a tree as compact JSON
pub fn to_json(node: &Node) -> Result<String> {
    Ok(serde_json::to_string(&to_dict(node)?)?)
}

/// Serialize a tree as indented JSON
pub fn to_json_pretty(node: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_dict(node)?)?)
}

/// Read a tree back from its JSON form
pub fn from_json(json: &str) -> Result<Node> {
    let dict: NodeDict = serde_json::from_str(json)?;
    dict.try_into()
}
