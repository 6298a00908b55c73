//! Compile expression trees into numeric functions
//!
//! A [`Function`] takes one value per [free variable][Node::free_vars], in the order the variables
//! appear in the source. A variable used twice takes two values unless it's called by name with
//! [`call_with`][Function::call_with].
//!
//! ```
//! let func = texmath_parser::compile("x+y+5+z").unwrap();
//! assert_eq!(func.params(), ["x", "y", "z"]);
//! assert_eq!(func.call(&[1.0, 2.0, 3.0]).unwrap(), 11.0);
//! assert_eq!(func.to_string(), "|x, y, z| (x+(y+(5+z)))");
//! ```
use crate::error::{Error, Result};
use crate::tree::Node;
use std::fmt;

type Eval = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// An evaluable function compiled from a [`Node`]
pub struct Function {
    params: Vec<String>,
    eval: Eval,
    source: String,
}

impl Function {
    /// Compile a tree
    ///
    /// Fails with [`Error::Unsupported`] if a raw argument isn't a numeric literal.
    pub fn compile(node: &Node) -> Result<Self> {
        let mut slot = 0;
        let eval = build(node, &mut slot)?;
        Ok(Function {
            params: node.free_vars().into_iter().map(str::to_owned).collect(),
            eval,
            source: node.to_string(),
        })
    }

    /// Parameter names in call order
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The number of values [`call`][Function::call] expects
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The fully parenthesized body
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate with one value per parameter
    pub fn call(&self, args: &[f64]) -> Result<f64> {
        if args.len() == self.arity() {
            Ok((self.eval)(args))
        } else {
            Err(Error::Arity {
                expected: self.arity(),
                found: args.len(),
            })
        }
    }

    /// Evaluate, looking each parameter up by name
    ///
    /// Every occurrence of a name gets the same value.
    ///
    /// ```
    /// let func = texmath_parser::compile("x\\cdot x+y").unwrap();
    /// assert_eq!(func.arity(), 3);
    /// let val = func.call_with(|name| match name {
    ///     "x" => Some(3.0),
    ///     "y" => Some(1.0),
    ///     _ => None,
    /// });
    /// assert_eq!(val.unwrap(), 12.0);
    /// ```
    pub fn call_with<F>(&self, mut lookup: F) -> Result<f64>
    where
        F: FnMut(&str) -> Option<f64>,
    {
        let args = self
            .params
            .iter()
            .map(|name| lookup(name).ok_or_else(|| Error::Unbound(name.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok((self.eval)(&args))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("params", &self.params)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}| {}", self.params.join(", "), self.source)
    }
}

impl Node {
    /// Compile this tree into a [`Function`]
    pub fn compile(&self) -> Result<Function> {
        Function::compile(self)
    }
}

// `slot` counts variables in walk order, matching `Node::free_vars`
fn build(node: &Node, slot: &mut usize) -> Result<Eval> {
    let eval: Eval = match node {
        Node::Number(num) => {
            let num = *num;
            Box::new(move |_| num)
        }
        Node::Arg(raw) => {
            let num = decimal(raw)
                .ok_or_else(|| Error::unsupported(format!("non-numeric argument `{raw}`")))?;
            Box::new(move |_| num)
        }
        Node::Var(_) => {
            let ind = *slot;
            *slot += 1;
            Box::new(move |args| args[ind])
        }
        Node::BinaryOp(bin) => {
            let op = bin.op;
            let left = build(bin.left(), slot)?;
            let right = build(bin.right(), slot)?;
            Box::new(move |args| op.apply(left(args), right(args)))
        }
        Node::Expression(inner) => build(inner, slot)?,
        Node::UnaryCommand(unary) => {
            let op = unary.op;
            let arg = build(unary.arg(), slot)?;
            Box::new(move |args| op.apply(arg(args)))
        }
    };
    Ok(eval)
}

// Arguments read as numbers only in the shape the lexer gives number tokens
fn decimal(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let shaped = raw.bytes().all(|byte| byte.is_ascii_digit() || byte == b'.')
        && raw.bytes().any(|byte| byte.is_ascii_digit());
    shaped.then(|| raw.parse().ok()).flatten()
}
