//! The expression AST produced by the parser adapter (spec section 3).
//!
//! A tagged sum of node kinds, not a class hierarchy (spec section 9): every
//! traversal matches on [`Expr`] directly.

/// Member-access operator: `->` crosses a pointer, `.` stays within the
/// current object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOp {
    Arrow,
    Dot,
}

/// Supported comparison operators (spec section 3). Anything else that a
/// parser could in principle produce (arithmetic, bitwise, `&&`/`||`) is
/// represented as `Other` and rejected downstream by the operator emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }
}

/// A binary operator as parsed, before the validator/operator-emitter decide
/// whether it is one this compiler supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Cmp(CmpOp),
    Other(&'static str),
}

use crate::literal::RawLiteral;

/// The expression AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare identifier, e.g. the `skb` in `skb->len`.
    Name(String),
    /// An integer literal, in its raw lexical form; see [`crate::literal`].
    IntLiteral(RawLiteral),
    /// `base.member` or `base->member`.
    Member { base: Box<Expr>, op: AccessOp, member: String },
    /// `lhs <op> rhs`.
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
}

impl Expr {
    /// True for `Name` and `Member` nodes: anything that is a pure
    /// member-access chain rooted in an identifier, with no arithmetic,
    /// literals, or calls along the way.
    pub fn is_access_chain(&self) -> bool {
        match self {
            Expr::Name(_) => true,
            Expr::Member { base, .. } => base.is_access_chain(),
            _ => false,
        }
    }
}
