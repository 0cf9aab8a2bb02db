//! Attributes, blocks and bodies.

use std::fmt;

use super::format;
use super::value::Value;

/// A reference such as `data.grafana_folder.team-a.uid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    pub root: String,
    pub attrs: Vec<String>,
}

impl Traversal {
    pub fn new<I, S>(root: impl Into<String>, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            attrs: attrs.into_iter().map(Into::into).collect(),
        }
    }
}

/// A function call such as `jsonencode({})`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncCall {
    pub name: String,
    pub args: Vec<Expression>,
}

impl FuncCall {
    pub fn new(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// The right-hand side of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value),
    Traversal(Traversal),
    FuncCall(FuncCall),
}

impl Expression {
    pub(crate) fn is_multiline(&self) -> bool {
        match self {
            Expression::Literal(value) => value.is_multiline(),
            Expression::Traversal(_) => false,
            Expression::FuncCall(call) => call.args.iter().any(Expression::is_multiline),
        }
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Literal(value)
    }
}

macro_rules! literal_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Expression {
                fn from(value: $ty) -> Self {
                    Expression::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_from!(&str, String, bool, i64, u64);

impl From<Traversal> for Expression {
    fn from(traversal: Traversal) -> Self {
        Expression::Traversal(traversal)
    }
}

impl From<FuncCall> for Expression {
    fn from(call: FuncCall) -> Self {
        Expression::FuncCall(call)
    }
}

/// `key = expression`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: String,
    pub expr: Expression,
}

/// `ident "label" ... { body }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub ident: String,
    pub labels: Vec<String>,
    pub body: Body,
}

impl Block {
    pub fn new<I, S>(ident: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ident: ident.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            body: Body::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Structure {
    Attribute(Attribute),
    Block(Block),
}

/// An ordered sequence of attributes and blocks.
///
/// Also used as a whole document: a `.tf` file is a body without braces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    pub(crate) items: Vec<Structure>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Set an attribute, replacing the expression in place if `key` already exists.
    pub fn set_attribute(&mut self, key: impl Into<String>, expr: impl Into<Expression>) {
        let key = key.into();
        let expr = expr.into();
        for item in &mut self.items {
            if let Structure::Attribute(attr) = item
                && attr.key == key
            {
                attr.expr = expr;
                return;
            }
        }
        self.items.push(Structure::Attribute(Attribute { key, expr }));
    }

    pub fn append_block(&mut self, block: Block) {
        self.items.push(Structure::Block(block));
    }

    /// Append an empty block and return it for filling in.
    pub fn append_new_block<I, S>(&mut self, ident: &str, labels: I) -> &mut Block
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.push(Structure::Block(Block::new(ident, labels)));
        match self.items.last_mut() {
            Some(Structure::Block(block)) => block,
            _ => unreachable!("a block was just pushed"),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes().find(|attr| attr.key == key)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.items.iter().filter_map(|item| match item {
            Structure::Attribute(attr) => Some(attr),
            Structure::Block(_) => None,
        })
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.items.iter().filter_map(|item| match item {
            Structure::Block(block) => Some(block),
            Structure::Attribute(_) => None,
        })
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        format::write_body(&mut out, self, 0);
        f.write_str(&out)
    }
}
