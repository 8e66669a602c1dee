//! Expression forms of the IR.
//!
//! Expressions are the right-hand sides of the three-address IR. Operands
//! of compound expressions are always variables, never nested expressions;
//! the IR builder is responsible for flattening. The evaluator in the
//! constant-propagation analysis and the side-effect classifier in the
//! dead-code detector both dispatch exhaustively over this sum.

use strum::Display;

use crate::ir::{ClassId, IrType, MethodRef, VarId};

/// Binary operators over `int` operands.
///
/// Comparison operators produce `int` 1/0, matching the IR's convention of
/// lowering boolean results to integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition (wrapping).
    Add,
    /// Subtraction (wrapping).
    Sub,
    /// Multiplication (wrapping).
    Mul,
    /// Division, truncating toward zero. Traps on zero divisor.
    Div,
    /// Remainder. Traps on zero divisor.
    Rem,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise xor.
    Xor,
    /// Shift left. Shift amount taken mod 32.
    Shl,
    /// Arithmetic (sign-extending) shift right. Shift amount taken mod 32.
    Shr,
    /// Logical (zero-extending) shift right. Shift amount taken mod 32.
    Ushr,
    /// Equal, producing 1 or 0.
    Eq,
    /// Not equal, producing 1 or 0.
    Ne,
    /// Less than, producing 1 or 0.
    Lt,
    /// Less or equal, producing 1 or 0.
    Le,
    /// Greater than, producing 1 or 0.
    Gt,
    /// Greater or equal, producing 1 or 0.
    Ge,
}

impl BinaryOp {
    /// Returns `true` if this operator can trap at runtime (divide or
    /// remainder by zero).
    ///
    /// Trapping operators count as side-effecting for dead-code purposes:
    /// an assignment whose RHS divides cannot be removed even when its
    /// result is never read.
    #[must_use]
    pub const fn may_trap(&self) -> bool {
        matches!(self, BinaryOp::Div | BinaryOp::Rem)
    }

    /// Returns `true` if this is a comparison operator producing 1/0.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }
}

/// Dispatch form of a call site.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum CallKind {
    /// Static dispatch; the target is the declared method itself.
    Static,
    /// Non-virtual instance dispatch (constructors, private and super
    /// calls); resolved by dispatch from the declared class.
    Special,
    /// Virtual dispatch over a class receiver.
    Virtual,
    /// Virtual dispatch over an interface receiver.
    Interface,
    /// Dynamically computed target; not resolvable by CHA.
    Dynamic,
}

/// A method invocation expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeExp {
    /// The dispatch form of this call.
    pub kind: CallKind,
    /// Static reference to the invoked method (declared class +
    /// subsignature).
    pub method_ref: MethodRef,
    /// Argument variables, in parameter order.
    pub args: Vec<VarId>,
}

/// An expression: the right-hand side of an assignment or the condition of
/// a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exp {
    /// A variable read.
    Var(VarId),
    /// An integer literal.
    IntLiteral(i32),
    /// A binary operation over two variables.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: VarId,
        /// Right operand.
        rhs: VarId,
    },
    /// A method invocation.
    Invoke(InvokeExp),
    /// An object allocation.
    New {
        /// The instantiated class.
        class: ClassId,
    },
    /// A checked cast. May throw at runtime.
    Cast {
        /// The target type.
        ty: IrType,
        /// The cast operand.
        var: VarId,
    },
    /// A field read. May trigger class initialization or a null
    /// dereference.
    FieldAccess {
        /// Receiver variable; `None` for static fields.
        base: Option<VarId>,
        /// Declaring class of the field.
        class: ClassId,
        /// Field name.
        field: String,
    },
    /// An array element read. May throw on a bad index or null array.
    ArrayAccess {
        /// The array variable.
        array: VarId,
        /// The index variable.
        index: VarId,
    },
    /// An instance-of test.
    InstanceOf {
        /// The tested variable.
        var: VarId,
        /// The tested-against class.
        class: ClassId,
    },
}

impl Exp {
    /// Collects the variables read by this expression into `out`.
    pub(crate) fn collect_uses(&self, out: &mut Vec<VarId>) {
        match self {
            Exp::Var(v) => out.push(*v),
            Exp::IntLiteral(_) | Exp::New { .. } => {}
            Exp::Binary { lhs, rhs, .. } => {
                out.push(*lhs);
                out.push(*rhs);
            }
            Exp::Invoke(invoke) => out.extend_from_slice(&invoke.args),
            Exp::Cast { var, .. } | Exp::InstanceOf { var, .. } => out.push(*var),
            Exp::FieldAccess { base, .. } => {
                if let Some(b) = base {
                    out.push(*b);
                }
            }
            Exp::ArrayAccess { array, index } => {
                out.push(*array);
                out.push(*index);
            }
        }
    }

    /// Returns the invocation payload if this expression is a call.
    #[must_use]
    pub const fn as_invoke(&self) -> Option<&InvokeExp> {
        match self {
            Exp::Invoke(invoke) => Some(invoke),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_may_trap() {
        assert!(BinaryOp::Div.may_trap());
        assert!(BinaryOp::Rem.may_trap());
        assert!(!BinaryOp::Add.may_trap());
        assert!(!BinaryOp::Shl.may_trap());
        assert!(!BinaryOp::Eq.may_trap());
    }

    #[test]
    fn test_exp_uses() {
        let mut uses = Vec::new();
        Exp::Binary {
            op: BinaryOp::Add,
            lhs: VarId::new(1),
            rhs: VarId::new(2),
        }
        .collect_uses(&mut uses);
        assert_eq!(uses, vec![VarId::new(1), VarId::new(2)]);

        uses.clear();
        Exp::IntLiteral(5).collect_uses(&mut uses);
        assert!(uses.is_empty());

        uses.clear();
        Exp::ArrayAccess {
            array: VarId::new(3),
            index: VarId::new(4),
        }
        .collect_uses(&mut uses);
        assert_eq!(uses.len(), 2);
    }

    #[test]
    fn test_call_kind_display() {
        assert_eq!(CallKind::Virtual.to_string(), "virtual");
        assert_eq!(CallKind::Static.to_string(), "static");
    }
}
