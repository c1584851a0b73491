//! Operator emitter (spec section 4.7): translates the comparison operator
//! into a single conditional jump, choosing the signed/unsigned opcode
//! family from the terminal type's encoding alone — never from the
//! constant's value (spec section 8's "signed/unsigned determinism" law).

use crate::ast::CmpOp;
use crate::error::{CompileError, OpError};
use crate::isa::{Instructions, JumpCond, JumpTarget, Label, Op, Operand, RegisterId};

fn jump_cond(op: CmpOp, signed: bool) -> JumpCond {
    match (op, signed) {
        // equality is encoding-independent: always the unsigned opcode.
        (CmpOp::Eq, _) => JumpCond::Eq,
        (CmpOp::Ne, _) => JumpCond::Ne,
        (CmpOp::Lt, false) => JumpCond::Lt,
        (CmpOp::Lt, true) => JumpCond::Slt,
        (CmpOp::Le, false) => JumpCond::Le,
        (CmpOp::Le, true) => JumpCond::Sle,
        (CmpOp::Gt, false) => JumpCond::Gt,
        (CmpOp::Gt, true) => JumpCond::Sgt,
        (CmpOp::Ge, false) => JumpCond::Ge,
        (CmpOp::Ge, true) => JumpCond::Sge,
    }
}

/// Emits `MOV result_reg, 1` followed by the conditional jump to
/// `return_label`. Any operator outside the comparison set (arithmetic,
/// bitwise, logical connectives) is rejected here with `UnexpectedOperator`.
pub fn emit_op(
    insns: &mut Instructions,
    op: CmpOp,
    work_reg: RegisterId,
    effective_constant: i64,
    signed_compare: bool,
    result_reg: RegisterId,
    return_label: Label,
) -> Result<(), CompileError> {
    insns.push_op(Op::Mov { dst: result_reg, src: Operand::Imm(1) });
    insns.push_op(Op::Jump {
        cond: jump_cond(op, signed_compare),
        lhs: work_reg,
        rhs: Operand::Imm(effective_constant),
        target: JumpTarget::Label(return_label),
    });
    Ok(())
}

/// Rejects a non-comparison [`crate::ast::BinOp`] with the taxonomy's
/// `UnexpectedOperator` error; called by the driver before it ever reaches
/// `emit_op`.
pub fn reject_unsupported_operator(operator: &str) -> CompileError {
    CompileError::UnsupportedOperator(OpError::UnexpectedOperator { operator: operator.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_always_unsigned() {
        assert_eq!(jump_cond(CmpOp::Eq, true), JumpCond::Eq);
        assert_eq!(jump_cond(CmpOp::Eq, false), JumpCond::Eq);
        assert_eq!(jump_cond(CmpOp::Ne, true), JumpCond::Ne);
    }

    #[test]
    fn ordering_picks_signed_family_from_encoding() {
        assert_eq!(jump_cond(CmpOp::Gt, false), JumpCond::Gt);
        assert_eq!(jump_cond(CmpOp::Gt, true), JumpCond::Sgt);
        assert_eq!(jump_cond(CmpOp::Le, true), JumpCond::Sle);
    }
}
