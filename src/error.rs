//! Compiler error taxonomy.
//!
//! One [`CompileError`] variant per phase of spec section 7, each wrapping a
//! phase-specific error type. Every layer is total: a failed phase never
//! produces a partial instruction stream, and each wrapping preserves the
//! literal context string spec section 4.8 assigns to it.

use thiserror::Error;

/// Top-level error returned by [`crate::compile::compile`] and
/// [`crate::compile::compile_access_only`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("failed to parse expression: {0}")]
    Parse(#[from] ParseError),

    #[error("expression is not a supported predicate form: {0}")]
    Shape(#[from] ShapeError),

    #[error("failed to convert expr to access offsets: {0}")]
    TypeMismatch(#[from] ResolveError),

    #[error("unexpected member access of bitfield or unsupported terminal type: {0}")]
    UnsupportedField(#[from] ClassifyError),

    #[error("failed to convert operator to instructions: {0}")]
    UnsupportedOperator(#[from] OpError),

    #[error("failed to parse right operand as number: {0}")]
    LiteralParse(String),

    #[error("internal invariant violated: {0}")]
    Invariant(#[from] InvariantError),
}

/// Syntax errors from the parser adapter (spec section 4.1).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected character {found:?} at offset {at}")]
    UnexpectedChar { found: char, at: usize },
    #[error("expected identifier at offset {at}")]
    ExpectedIdent { at: usize },
    #[error("trailing input after expression: {rest:?}")]
    TrailingInput { rest: String },
}

/// AST-shape errors from the validator (spec section 4.2).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ShapeError {
    #[error("left operand is not a bare identifier or member-access chain rooted in one")]
    NotMemberAccess,
}

/// Type-walker / offset-resolver errors (spec section 4.3).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ResolveError {
    #[error("member {member:?} not found on type {parent_type_name:?}")]
    MemberNotFound { parent_type_name: String, member: String },
    #[error("attempted `->` on non-pointer type {type_name:?}")]
    NotIndirectable { type_name: String },
    #[error("attempted `.` on non-struct/union type {type_name:?}")]
    NotAggregate { type_name: String },
}

/// Field-classifier errors (spec section 4.4).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ClassifyError {
    #[error("member {member:?} is a bitfield and cannot be compared")]
    UnexpectedBitfield { member: String },
    #[error("terminal type {type_name:?} is not a comparable integer or pointer of supported width")]
    UnexpectedTerminalType { type_name: String },
}

/// Operator-emitter errors (spec section 4.7).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum OpError {
    #[error("operator {operator:?} is not a supported comparison")]
    UnexpectedOperator { operator: String },
}

/// Internal invariants the emitters guarantee hold; a violation indicates a
/// bug in the compiler rather than a malformed predicate.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InvariantError {
    #[error("empty offset list where `Access` required at least one hop")]
    EmptyOffsetsForAccess,
    #[error("label {label} referenced by a jump was never defined")]
    UnresolvedLabel { label: String },
    #[error("label {label} was defined more than once")]
    DuplicateLabel { label: String },
}
