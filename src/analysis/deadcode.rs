//! Dead-code detection.
//!
//! Fuses constant-propagation and live-variable results to find two kinds
//! of dead statements:
//!
//! - **unreachable code**: statements no execution can reach once
//!   constant branch conditions prune CFG edges;
//! - **dead assignments**: reachable assignments whose value is never
//!   read and whose right-hand side has no observable side effect.
//!
//! The detector walks the CFG breadth-first from the entry, following
//! only the edges a constant condition permits, then reports everything
//! it never visited plus the dead assignments it saw along the way.

use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use crate::{
    analysis::{
        cfg::{CfgEdgeKind, ControlFlowGraph},
        dataflow::{ConstantPropagation, CpFact, CpValue, DataflowResult, SetFact},
    },
    ir::{Exp, MethodBody, StmtKind, VarId},
    utils::graph::NodeSet,
};

/// Dead-code detection for one method.
pub struct DeadCodeDetection;

impl DeadCodeDetection {
    /// The analysis ID the dead-statement set is published under.
    pub const ID: &'static str = "deadcode";

    /// Computes the set of dead statement indices, ordered ascending.
    ///
    /// `constants` must be the constant-propagation result for `cfg` and
    /// `live` the live-variable result; both are consumed read-only.
    #[must_use]
    pub fn analyze(
        body: &MethodBody,
        cfg: &ControlFlowGraph,
        constants: &DataflowResult<CpFact>,
        live: &DataflowResult<SetFact<VarId>>,
    ) -> BTreeSet<usize> {
        let cp = ConstantPropagation::new(body);
        let mut dead = BTreeSet::new();
        let mut visited = NodeSet::new();
        let mut queue = VecDeque::new();

        visited.insert(cfg.entry());
        queue.push_back(cfg.entry());

        while let Some(node) = queue.pop_front() {
            let stmt = cfg.stmt_index_of(node).and_then(|i| body.stmt(i));

            if let Some(stmt) = stmt {
                match stmt.kind() {
                    StmtKind::If { cond } => {
                        match cp.evaluate(cond, constants.in_fact(node)) {
                            // The branch itself is reachable but forces
                            // nothing beyond it.
                            CpValue::Undef => continue,
                            CpValue::Const(c) => {
                                for (target, kind) in cfg.out_edges(node) {
                                    let taken = match kind {
                                        CfgEdgeKind::IfTrue => c == 1,
                                        CfgEdgeKind::IfFalse => c == 0,
                                        _ => false,
                                    };
                                    if taken && visited.insert(target) {
                                        queue.push_back(target);
                                    }
                                }
                                continue;
                            }
                            // Not a constant: both arms stay live.
                            CpValue::Nac => {}
                        }
                    }
                    StmtKind::Switch { var } => {
                        match constants.in_fact(node).get(*var) {
                            CpValue::Undef => continue,
                            CpValue::Const(k) => {
                                let mut matched = false;
                                for (target, kind) in cfg.out_edges(node) {
                                    if kind.case_value() == Some(k) {
                                        matched = true;
                                        if visited.insert(target) {
                                            queue.push_back(target);
                                        }
                                        break;
                                    }
                                }
                                if !matched {
                                    for (target, kind) in cfg.out_edges(node) {
                                        if kind == CfgEdgeKind::SwitchDefault
                                            && visited.insert(target)
                                        {
                                            queue.push_back(target);
                                        }
                                    }
                                }
                                continue;
                            }
                            // Not a constant: every case stays live.
                            CpValue::Nac => {}
                        }
                    }
                    StmtKind::Assign { lhs, rhs } => {
                        if !live.out_fact(node).contains(lhs) && has_no_side_effect(rhs) {
                            dead.insert(stmt.index());
                        }
                    }
                    _ => {}
                }
            }

            for succ in cfg.successors(node) {
                if visited.insert(succ) {
                    queue.push_back(succ);
                }
            }
        }

        // Everything the pruned traversal never reached is dead, as long
        // as it maps to a real source line.
        for stmt in body.stmts() {
            let reached = cfg
                .stmt_node(stmt.index())
                .is_some_and(|n| visited.contains(n));
            if !reached && stmt.line() > 0 {
                dead.insert(stmt.index());
            }
        }

        debug!(
            method = %cfg.method(),
            dead = dead.len(),
            total = body.stmt_count(),
            "dead-code detection finished"
        );
        dead
    }
}

/// Returns `true` if evaluating `exp` has no observable side effect.
///
/// Allocation, casts, field and array accesses, calls, and division or
/// remainder (which may trap) are side-effecting; everything else is
/// pure and safe to eliminate when unread.
fn has_no_side_effect(exp: &Exp) -> bool {
    match exp {
        Exp::New { .. }
        | Exp::Cast { .. }
        | Exp::FieldAccess { .. }
        | Exp::ArrayAccess { .. }
        | Exp::Invoke(_) => false,
        Exp::Binary { op, .. } => !op.may_trap(),
        Exp::Var(_) | Exp::IntLiteral(_) | Exp::InstanceOf { .. } => true,
    }
}
