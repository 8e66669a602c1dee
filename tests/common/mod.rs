#![allow(dead_code)]

//! Shared helpers for the integration suites.
//!
//! The tests play the host's role: they assemble small programs through
//! the public builder APIs, hand-build CFGs, and store them in the
//! result maps the analyses read from.

use flowscope::prelude::*;

/// Creates `n` int-typed variables named `v0..vn`.
pub fn int_vars(n: usize) -> Vec<Var> {
    (0..n)
        .map(|i| Var {
            name: format!("v{i}"),
            ty: IrType::int(),
        })
        .collect()
}

/// Shorthand for an assignment statement.
pub fn assign(index: usize, lhs: usize, rhs: Exp) -> Stmt {
    Stmt::new(
        index,
        index as i32 + 1,
        StmtKind::Assign {
            lhs: VarId::new(lhs),
            rhs,
        },
    )
}

/// Shorthand for a binary expression over two variables.
pub fn binary(op: BinaryOp, lhs: usize, rhs: usize) -> Exp {
    Exp::Binary {
        op,
        lhs: VarId::new(lhs),
        rhs: VarId::new(rhs),
    }
}

/// Builds a straight-line CFG `entry -> s0 -> ... -> s(n-1) -> exit` and
/// stores it on the body under `"cfg"`.
pub fn store_linear_cfg(body: &MethodBody, method: MethodId) {
    let mut cfg = ControlFlowGraph::new(method);
    let mut prev = cfg.entry();
    for i in 0..body.stmt_count() {
        let node = cfg.add_stmt(i);
        cfg.add_edge(prev, node, CfgEdgeKind::Normal).unwrap();
        prev = node;
    }
    cfg.add_edge(prev, cfg.exit(), CfgEdgeKind::Normal).unwrap();
    body.results().put(CFG_ID, cfg);
}

/// The `int (int...)` subsignature used by most test methods.
pub fn int_sig(name: &str, arity: usize) -> Subsignature {
    Subsignature::new(name, vec![IrType::int(); arity], IrType::int())
}
