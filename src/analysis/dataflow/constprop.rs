//! Intraprocedural constant propagation.
//!
//! A forward analysis tracking which integer-typed locals hold known
//! constants at each program point. Branch joins meet per-variable values:
//! agreeing constants survive, disagreeing ones decay to `Nac`.
//!
//! Only variables whose declared type can hold an `int` (byte, short,
//! int, char, boolean) participate; the transfer ignores all others, so
//! fact maps stay small and the lattice-height termination bound holds.

use crate::{
    analysis::{
        cfg::ControlFlowGraph,
        dataflow::{CpFact, CpValue, DataflowAnalysis, Direction},
    },
    ir::{BinaryOp, Exp, MethodBody, StmtKind, VarId},
    utils::graph::NodeId,
};

/// Intraprocedural constant propagation over one method body.
pub struct ConstantPropagation<'a> {
    body: &'a MethodBody,
}

impl<'a> ConstantPropagation<'a> {
    /// The analysis ID this analysis publishes results under.
    pub const ID: &'static str = "constprop";

    /// Creates the analysis for a method body.
    #[must_use]
    pub const fn new(body: &'a MethodBody) -> Self {
        Self { body }
    }

    /// Returns `true` if `var` participates in constant propagation.
    #[must_use]
    pub fn can_hold_int(&self, var: VarId) -> bool {
        self.body.var(var).ty.can_hold_int()
    }

    /// Evaluates an expression to an abstract value under the fact `in_fact`.
    ///
    /// - a variable reads its value from the fact;
    /// - an integer literal is that constant;
    /// - a binary expression folds when both operands are constants, with
    ///   32-bit two's-complement semantics (divide/remainder by a zero
    ///   constant yields `Undef`: the operation traps and produces no
    ///   value);
    /// - every other form (calls, loads, allocations, casts,
    ///   instance-of) is `Nac`.
    #[must_use]
    pub fn evaluate(&self, exp: &Exp, in_fact: &CpFact) -> CpValue {
        match exp {
            Exp::Var(v) => in_fact.get(*v),
            Exp::IntLiteral(value) => CpValue::Const(*value),
            Exp::Binary { op, lhs, rhs } => {
                if !self.can_hold_int(*lhs) || !self.can_hold_int(*rhs) {
                    return CpValue::Undef;
                }
                let a = in_fact.get(*lhs);
                let b = in_fact.get(*rhs);

                if a.is_nac() || b.is_nac() {
                    // Divisor-zero refinement: the division traps, so the
                    // statement defines nothing regardless of the NAC
                    // operand.
                    if op.may_trap() && b == CpValue::Const(0) {
                        return CpValue::Undef;
                    }
                    return CpValue::Nac;
                }
                match (a, b) {
                    (CpValue::Const(a), CpValue::Const(b)) => Self::fold(*op, a, b),
                    _ => CpValue::Undef,
                }
            }
            _ => CpValue::Nac,
        }
    }

    /// Applies the transfer function for one statement: `output` becomes
    /// the meet of itself with `input`, then the statement's definition
    /// (if any) is re-generated from `input`.
    ///
    /// `None` statements (the synthetic entry/exit nodes) propagate
    /// `input` unchanged. Returns whether `output` changed. Shared by the
    /// intraprocedural transfer and the interprocedural non-call node
    /// transfer.
    pub fn transfer_stmt(
        &self,
        stmt: Option<&crate::ir::Stmt>,
        input: &CpFact,
        output: &mut CpFact,
    ) -> bool {
        let old = output.clone();
        input.meet_into(output);

        if let Some(stmt) = stmt {
            match stmt.kind() {
                StmtKind::Assign { lhs, rhs } if self.can_hold_int(*lhs) => {
                    let value = self.evaluate(rhs, input);
                    if value.is_undef() {
                        // Gen/kill: the definition replaces whatever the
                        // meet brought in.
                        output.remove(*lhs);
                    } else {
                        output.update(*lhs, value);
                    }
                }
                StmtKind::Invoke {
                    result: Some(lhs), ..
                } if self.can_hold_int(*lhs) => {
                    // Intraprocedurally a call result is unknown.
                    output.update(*lhs, CpValue::Nac);
                }
                _ => {}
            }
        }

        *output != old
    }

    /// Folds a binary operation over two constant operands.
    fn fold(op: BinaryOp, a: i32, b: i32) -> CpValue {
        let result = match op {
            BinaryOp::Add => a.wrapping_add(b),
            BinaryOp::Sub => a.wrapping_sub(b),
            BinaryOp::Mul => a.wrapping_mul(b),
            BinaryOp::Div => {
                if b == 0 {
                    return CpValue::Undef;
                }
                a.wrapping_div(b)
            }
            BinaryOp::Rem => {
                if b == 0 {
                    return CpValue::Undef;
                }
                a.wrapping_rem(b)
            }
            BinaryOp::And => a & b,
            BinaryOp::Or => a | b,
            BinaryOp::Xor => a ^ b,
            // wrapping_* shifts take the amount mod 32.
            BinaryOp::Shl => a.wrapping_shl(b as u32),
            BinaryOp::Shr => a.wrapping_shr(b as u32),
            BinaryOp::Ushr => ((a as u32).wrapping_shr(b as u32)) as i32,
            BinaryOp::Eq => i32::from(a == b),
            BinaryOp::Ne => i32::from(a != b),
            BinaryOp::Lt => i32::from(a < b),
            BinaryOp::Le => i32::from(a <= b),
            BinaryOp::Gt => i32::from(a > b),
            BinaryOp::Ge => i32::from(a >= b),
        };
        CpValue::Const(result)
    }
}

impl DataflowAnalysis for ConstantPropagation<'_> {
    type Fact = CpFact;
    const DIRECTION: Direction = Direction::Forward;

    /// Formal parameters come from unknown callers, so the boundary fact
    /// pins every one of them to `Nac`. Non-parameter locals stay
    /// implicitly `Undef`.
    fn boundary_fact(&self, _cfg: &ControlFlowGraph) -> CpFact {
        let mut fact = CpFact::new();
        for &param in self.body.params() {
            fact.update(param, CpValue::Nac);
        }
        fact
    }

    fn initial_fact(&self) -> CpFact {
        CpFact::new()
    }

    fn meet_into(&self, fact: &CpFact, target: &mut CpFact) -> bool {
        fact.meet_into(target)
    }

    fn transfer(
        &self,
        cfg: &ControlFlowGraph,
        node: NodeId,
        input: &CpFact,
        output: &mut CpFact,
    ) -> bool {
        let stmt = cfg.stmt_index_of(node).and_then(|i| self.body.stmt(i));
        self.transfer_stmt(stmt, input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::{cfg::CfgEdgeKind, dataflow::WorklistSolver},
        ir::{IrType, MethodBody, MethodId, PrimitiveType, Stmt, Var},
    };

    /// Builds a body with `n` int locals named v0..vn and the given
    /// statements; the first `params` locals are parameters.
    fn int_body(n: usize, params: usize, stmts: Vec<Stmt>) -> MethodBody {
        let vars = (0..n)
            .map(|i| Var {
                name: format!("v{i}"),
                ty: IrType::int(),
            })
            .collect();
        MethodBody::new(vars, (0..params).map(VarId::new).collect(), stmts)
    }

    /// Straight-line CFG entry -> s0 -> ... -> exit.
    fn linear_cfg(stmt_count: usize) -> ControlFlowGraph {
        let mut cfg = ControlFlowGraph::new(MethodId::new(0));
        let mut prev = cfg.entry();
        for i in 0..stmt_count {
            let node = cfg.add_stmt(i);
            cfg.add_edge(prev, node, CfgEdgeKind::Normal).unwrap();
            prev = node;
        }
        cfg.add_edge(prev, cfg.exit(), CfgEdgeKind::Normal).unwrap();
        cfg
    }

    fn assign(index: usize, lhs: usize, rhs: Exp) -> Stmt {
        Stmt::new(
            index,
            index as i32 + 1,
            StmtKind::Assign {
                lhs: VarId::new(lhs),
                rhs,
            },
        )
    }

    fn binary(op: BinaryOp, lhs: usize, rhs: usize) -> Exp {
        Exp::Binary {
            op,
            lhs: VarId::new(lhs),
            rhs: VarId::new(rhs),
        }
    }

    #[test]
    fn test_straight_line_folding() {
        // a = 1; b = 2; c = a + b; z = 0; d = c * z;
        let body = int_body(
            5,
            0,
            vec![
                assign(0, 0, Exp::IntLiteral(1)),
                assign(1, 1, Exp::IntLiteral(2)),
                assign(2, 2, binary(BinaryOp::Add, 0, 1)),
                assign(3, 4, Exp::IntLiteral(0)),
                assign(4, 3, binary(BinaryOp::Mul, 2, 4)),
            ],
        );
        let cfg = linear_cfg(5);
        let cp = ConstantPropagation::new(&body);
        let result = WorklistSolver::solve(&cp, &cfg).unwrap();

        let exit_in = result.in_fact(cfg.exit());
        assert_eq!(exit_in.get(VarId::new(0)), CpValue::Const(1));
        assert_eq!(exit_in.get(VarId::new(1)), CpValue::Const(2));
        assert_eq!(exit_in.get(VarId::new(2)), CpValue::Const(3));
        assert_eq!(exit_in.get(VarId::new(3)), CpValue::Const(0));
    }

    #[test]
    fn test_parameters_are_nac() {
        // p is a parameter; x = p;
        let body = int_body(2, 1, vec![assign(0, 1, Exp::Var(VarId::new(0)))]);
        let cfg = linear_cfg(1);
        let cp = ConstantPropagation::new(&body);
        let result = WorklistSolver::solve(&cp, &cfg).unwrap();

        let exit_in = result.in_fact(cfg.exit());
        assert_eq!(exit_in.get(VarId::new(0)), CpValue::Nac);
        assert_eq!(exit_in.get(VarId::new(1)), CpValue::Nac);
    }

    #[test]
    fn test_divide_by_zero_constant_is_undef() {
        // a = 10; b = 0; c = a / b;
        let body = int_body(
            3,
            0,
            vec![
                assign(0, 0, Exp::IntLiteral(10)),
                assign(1, 1, Exp::IntLiteral(0)),
                assign(2, 2, binary(BinaryOp::Div, 0, 1)),
            ],
        );
        let cfg = linear_cfg(3);
        let cp = ConstantPropagation::new(&body);
        let result = WorklistSolver::solve(&cp, &cfg).unwrap();

        assert_eq!(
            result.in_fact(cfg.exit()).get(VarId::new(2)),
            CpValue::Undef
        );
    }

    #[test]
    fn test_nac_dividend_zero_divisor_is_undef() {
        // p is a parameter (NAC); b = 0; c = p % b;
        let body = int_body(
            3,
            1,
            vec![
                assign(0, 1, Exp::IntLiteral(0)),
                assign(1, 2, binary(BinaryOp::Rem, 0, 1)),
            ],
        );
        let cfg = linear_cfg(2);
        let cp = ConstantPropagation::new(&body);
        let result = WorklistSolver::solve(&cp, &cfg).unwrap();

        assert_eq!(
            result.in_fact(cfg.exit()).get(VarId::new(2)),
            CpValue::Undef
        );
    }

    #[test]
    fn test_join_of_distinct_constants_is_nac() {
        // if (p) { x = 1 } else { x = 2 }; y = x
        //
        // entry -> s0(if) -> s1, s2; s1 -> s3; s2 -> s3; s3 -> exit
        let mut vars: Vec<Var> = (0..3)
            .map(|i| Var {
                name: format!("v{i}"),
                ty: IrType::int(),
            })
            .collect();
        vars[0].ty = IrType::Primitive(PrimitiveType::Boolean);
        let stmts = vec![
            Stmt::new(
                0,
                1,
                StmtKind::If {
                    cond: Exp::Var(VarId::new(0)),
                },
            ),
            assign(1, 1, Exp::IntLiteral(1)),
            assign(2, 1, Exp::IntLiteral(2)),
            assign(3, 2, Exp::Var(VarId::new(1))),
        ];
        let body = MethodBody::new(vars, vec![VarId::new(0)], stmts);

        let mut cfg = ControlFlowGraph::new(MethodId::new(0));
        let s0 = cfg.add_stmt(0);
        let s1 = cfg.add_stmt(1);
        let s2 = cfg.add_stmt(2);
        let s3 = cfg.add_stmt(3);
        cfg.add_edge(cfg.entry(), s0, CfgEdgeKind::Normal).unwrap();
        cfg.add_edge(s0, s1, CfgEdgeKind::IfTrue).unwrap();
        cfg.add_edge(s0, s2, CfgEdgeKind::IfFalse).unwrap();
        cfg.add_edge(s1, s3, CfgEdgeKind::Normal).unwrap();
        cfg.add_edge(s2, s3, CfgEdgeKind::Normal).unwrap();
        cfg.add_edge(s3, cfg.exit(), CfgEdgeKind::Normal).unwrap();

        let cp = ConstantPropagation::new(&body);
        let result = WorklistSolver::solve(&cp, &cfg).unwrap();

        // At y = x, the two arms have met.
        let in_s3 = result.in_fact(s3);
        assert_eq!(in_s3.get(VarId::new(1)), CpValue::Nac);

        let exit_in = result.in_fact(cfg.exit());
        assert_eq!(exit_in.get(VarId::new(2)), CpValue::Nac);
    }

    #[test]
    fn test_fold_arithmetic_wraps() {
        assert_eq!(
            ConstantPropagation::fold(BinaryOp::Add, i32::MAX, 1),
            CpValue::Const(i32::MIN)
        );
        assert_eq!(
            ConstantPropagation::fold(BinaryOp::Mul, i32::MIN, -1),
            CpValue::Const(i32::MIN)
        );
        assert_eq!(
            ConstantPropagation::fold(BinaryOp::Div, i32::MIN, -1),
            CpValue::Const(i32::MIN)
        );
        assert_eq!(
            ConstantPropagation::fold(BinaryOp::Rem, i32::MIN, -1),
            CpValue::Const(0)
        );
        assert_eq!(
            ConstantPropagation::fold(BinaryOp::Div, 7, -2),
            CpValue::Const(-3),
            "division truncates toward zero"
        );
    }

    #[test]
    fn test_fold_shifts_mask_amount() {
        assert_eq!(
            ConstantPropagation::fold(BinaryOp::Shl, 1, 33),
            CpValue::Const(2)
        );
        assert_eq!(
            ConstantPropagation::fold(BinaryOp::Shr, -8, 1),
            CpValue::Const(-4),
            "shr is arithmetic"
        );
        assert_eq!(
            ConstantPropagation::fold(BinaryOp::Ushr, -1, 28),
            CpValue::Const(15),
            "ushr is logical"
        );
    }

    #[test]
    fn test_fold_comparisons() {
        assert_eq!(
            ConstantPropagation::fold(BinaryOp::Lt, 1, 2),
            CpValue::Const(1)
        );
        assert_eq!(
            ConstantPropagation::fold(BinaryOp::Ge, 1, 2),
            CpValue::Const(0)
        );
        assert_eq!(
            ConstantPropagation::fold(BinaryOp::Eq, 5, 5),
            CpValue::Const(1)
        );
    }

    #[test]
    fn test_evaluate_opaque_forms_are_nac() {
        let body = int_body(1, 0, Vec::new());
        let cp = ConstantPropagation::new(&body);
        let fact = CpFact::new();

        let new_exp = Exp::New {
            class: crate::ir::ClassId::new(0),
        };
        assert_eq!(cp.evaluate(&new_exp, &fact), CpValue::Nac);

        let field = Exp::FieldAccess {
            base: None,
            class: crate::ir::ClassId::new(0),
            field: "f".into(),
        };
        assert_eq!(cp.evaluate(&field, &fact), CpValue::Nac);
    }

    #[test]
    fn test_evaluate_non_int_operand_is_undef() {
        // One operand is a long: the expression stays out of the lattice.
        let vars = vec![
            Var {
                name: "a".into(),
                ty: IrType::int(),
            },
            Var {
                name: "b".into(),
                ty: IrType::Primitive(PrimitiveType::Long),
            },
        ];
        let body = MethodBody::new(vars, Vec::new(), Vec::new());
        let cp = ConstantPropagation::new(&body);

        let exp = binary(BinaryOp::Add, 0, 1);
        assert_eq!(cp.evaluate(&exp, &CpFact::new()), CpValue::Undef);
    }
}
