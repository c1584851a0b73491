//! AST validator (spec section 4.2): enforces that the predicate is either
//! a bare pointer test or a binary comparison whose left operand is a
//! member-access chain rooted in a named pointer.

use crate::ast::Expr;
use crate::error::{CompileError, ShapeError};

/// Succeeds iff the left operand (or the whole AST, for the bare-name form)
/// is reachable from an identifier by zero or more member-access steps.
/// Constants, function calls, unary operators, and arithmetic on the left
/// are rejected here, before any BTF lookups are attempted.
pub fn validate_left_operand(expr: &Expr) -> Result<(), CompileError> {
    let left = match expr {
        Expr::Binary { lhs, .. } => lhs.as_ref(),
        other => other,
    };
    if left.is_access_chain() {
        Ok(())
    } else {
        Err(CompileError::Shape(ShapeError::NotMemberAccess))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AccessOp, BinOp, CmpOp};
    use crate::literal::RawLiteral;

    #[test]
    fn bare_name_is_valid() {
        assert!(validate_left_operand(&Expr::Name("skb".into())).is_ok());
    }

    #[test]
    fn comparison_with_chain_left_is_valid() {
        let expr = Expr::Binary {
            op: BinOp::Cmp(CmpOp::Gt),
            lhs: Box::new(Expr::Member { base: Box::new(Expr::Name("skb".into())), op: AccessOp::Arrow, member: "len".into() }),
            rhs: Box::new(Expr::IntLiteral(RawLiteral::Decimal("1024".into()))),
        };
        assert!(validate_left_operand(&expr).is_ok());
    }

    #[test]
    fn literal_left_operand_is_rejected() {
        let expr = Expr::Binary {
            op: BinOp::Cmp(CmpOp::Eq),
            lhs: Box::new(Expr::IntLiteral(RawLiteral::Decimal("1".into()))),
            rhs: Box::new(Expr::IntLiteral(RawLiteral::Decimal("1".into()))),
        };
        assert!(matches!(validate_left_operand(&expr), Err(CompileError::Shape(ShapeError::NotMemberAccess))));
    }
}
