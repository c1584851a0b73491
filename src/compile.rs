//! Compilation driver (spec section 4.8): orchestrates parsing, validation,
//! offset resolution, classification, and instruction emission, then wraps
//! the result in the mandatory prologue/epilogue.

use crate::ast::{BinOp, Expr};
use crate::btf::{BtfGraph, BtfTypeId};
use crate::classify::{self, Classification};
use crate::consts::POINTER_SIZE;
use crate::emit::{chain, normalize, operator};
use crate::error::CompileError;
use crate::isa::{Instructions, Label, Op, Operand, RegisterId, ResolvedOp};
use crate::literal;
use crate::options::CompileOptions;
use crate::parser;
use crate::resolve::{self, ResolveResult};
use crate::validate;

/// Splits a validated AST into its left access chain and, if present, the
/// explicit comparison operator and integer right operand.
fn split(ast: &Expr) -> Result<(&Expr, Option<crate::ast::CmpOp>, Option<&Expr>), CompileError> {
    match ast {
        Expr::Binary { op, lhs, rhs } => match op {
            BinOp::Cmp(cmp) => Ok((lhs.as_ref(), Some(*cmp), Some(rhs.as_ref()))),
            BinOp::Other(name) => Err(operator::reject_unsupported_operator(name)),
        },
        other => Ok((other, None, None)),
    }
}

fn rhs_constant(rhs: Option<&Expr>) -> Result<i64, CompileError> {
    match rhs {
        None => Ok(0),
        Some(Expr::IntLiteral(raw)) => literal::resolve(raw),
        Some(_) => unreachable!("the parser only produces integer-literal right operands"),
    }
}

/// Resolves the effective `(Classification, operator, raw_constant)` triple
/// for a validated, resolved chain. The bare-root-pointer case (spec
/// section 4.8 step 3) skips classification entirely and compares
/// pointer-width unsigned against the explicit or implicit zero constant.
fn effective_comparison(
    graph: &BtfGraph,
    resolved: &ResolveResult,
    cmp: Option<crate::ast::CmpOp>,
    rhs: Option<&Expr>,
) -> Result<(Classification, crate::ast::CmpOp, i64), CompileError> {
    let op = cmp.unwrap_or(crate::ast::CmpOp::Ne);
    if resolved.offsets.is_empty() {
        let constant = rhs_constant(rhs)?;
        Ok((Classification { size: POINTER_SIZE, signed_compare: false }, op, constant))
    } else {
        let classification = classify::classify(
            graph,
            resolved.terminal_type,
            resolved.terminal_bitfield_size,
            resolved.terminal_bit_misalignment,
            "<terminal>",
        )?;
        let constant = rhs_constant(rhs)?;
        Ok((classification, op, constant))
    }
}

/// Compiles `predicate` into a finished, label-resolved instruction stream.
#[tracing::instrument(skip(graph, opts), fields(predicate))]
pub fn compile(
    predicate: &str,
    graph: &BtfGraph,
    root_type: BtfTypeId,
    opts: &CompileOptions,
) -> Result<Vec<ResolvedOp>, CompileError> {
    let ast = parser::parse(predicate)?;
    validate::validate_left_operand(&ast)?;
    let (left, cmp, rhs) = split(&ast)?;

    let resolved = resolve::resolve(left, root_type, graph)?;
    let (classification, op, raw_constant) = effective_comparison(graph, &resolved, cmp, rhs)?;

    let mut insns = Instructions::new();
    insns.push_op(Op::Mov { dst: opts.work_reg, src: Operand::Reg(opts.arg_reg) });

    chain::emit_chain(&mut insns, opts, &resolved.offsets, opts.work_reg, Label::ExitFail);

    let tgt = normalize::TargetInfo {
        size: classification.size,
        signed: classification.signed_compare,
        big_endian: resolved.big_endian,
        constant: raw_constant,
    };
    let effective_constant = normalize::normalize(&mut insns, opts.work_reg, tgt, opts.sign_extend_32bit_signed);

    operator::emit_op(
        &mut insns,
        op,
        opts.work_reg,
        effective_constant,
        classification.signed_compare,
        opts.result_reg,
        Label::Return,
    )?;

    insns.push_label(Label::ExitFail);
    insns.push_op(Op::Mov { dst: opts.result_reg, src: Operand::Imm(0) });
    insns.push_label(Label::Return);
    insns.push_op(Op::Return);

    tracing::debug!(instruction_count = insns.len(), "compilation finished");
    insns.finalize()
}

/// Access-only entry point (spec section 4.8): emits the prologue and chain
/// only, for splicing a dereference into a larger program. Still runs the
/// classifier to ensure the terminal type is well-formed, and reports
/// whether `fail_label` ended up referenced.
pub fn compile_access_only(
    access_expr: &str,
    graph: &BtfGraph,
    root_type: BtfTypeId,
    work_reg: RegisterId,
    dest_reg: RegisterId,
    fail_label: Label,
    opts: &CompileOptions,
) -> Result<(Vec<ResolvedOp>, bool), CompileError> {
    use crate::error::ShapeError;

    let ast = parser::parse(access_expr)?;
    validate::validate_left_operand(&ast)?;
    if matches!(ast, Expr::Binary { .. }) {
        return Err(CompileError::Shape(ShapeError::NotMemberAccess));
    }

    let resolved = resolve::resolve(&ast, root_type, graph)?;
    if !resolved.offsets.is_empty() {
        classify::classify(
            graph,
            resolved.terminal_type,
            resolved.terminal_bitfield_size,
            resolved.terminal_bit_misalignment,
            "<terminal>",
        )?;
    }

    let mut insns = Instructions::new();
    insns.push_op(Op::Mov { dst: work_reg, src: Operand::Reg(opts.arg_reg) });
    let label_used = chain::emit_chain(&mut insns, opts, &resolved.offsets, work_reg, fail_label.clone());
    if work_reg != dest_reg {
        insns.push_op(Op::Mov { dst: dest_reg, src: Operand::Reg(work_reg) });
    }
    if label_used {
        insns.push_label(fail_label);
    }

    let resolved_insns = insns.finalize()?;
    Ok((resolved_insns, label_used))
}
