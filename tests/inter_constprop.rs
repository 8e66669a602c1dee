//! Interprocedural constant propagation integration tests.

mod common;

use common::{assign, int_sig, int_vars, store_linear_cfg};
use flowscope::analysis::driver;
use flowscope::prelude::*;

/// Builds:
///
/// ```text
/// static int main() { a = 5; r = id(a); return r; }
/// static int id(int p) { return p; }
/// ```
///
/// with straight-line CFGs for both methods, optionally passing the
/// wrong number of arguments at the call site.
fn caller_callee_program(arg_count: usize) -> (Program, MethodId, MethodId) {
    let mut builder = ProgramBuilder::new();
    let class = builder.add_class("Main", None, Vec::new(), ClassFlags::empty());

    // id(int p) { return p; }
    let id_body = MethodBody::new(
        int_vars(1),
        vec![VarId::new(0)],
        vec![Stmt::new(
            0,
            10,
            StmtKind::Return {
                var: Some(VarId::new(0)),
            },
        )],
    );
    let id = builder.add_method(class, int_sig("id", 1), MethodFlags::STATIC, Some(id_body));

    // main() { a = 5; r = id(a); return r; }
    let args = vec![VarId::new(0); arg_count];
    let main_body = MethodBody::new(
        int_vars(2),
        Vec::new(),
        vec![
            assign(0, 0, Exp::IntLiteral(5)),
            Stmt::new(
                1,
                2,
                StmtKind::Invoke {
                    result: Some(VarId::new(1)),
                    exp: InvokeExp {
                        kind: CallKind::Static,
                        method_ref: MethodRef {
                            class,
                            subsig: int_sig("id", 1),
                        },
                        args,
                    },
                },
            ),
            Stmt::new(
                2,
                3,
                StmtKind::Return {
                    var: Some(VarId::new(1)),
                },
            ),
        ],
    );
    let main = builder.add_method(class, int_sig("main", 0), MethodFlags::STATIC, Some(main_body));
    builder.add_entry(main);

    let program = builder.build().unwrap();
    store_linear_cfg(program.body_of(id).unwrap(), id);
    store_linear_cfg(program.body_of(main).unwrap(), main);
    (program, main, id)
}

#[test]
fn constant_flows_through_call_and_return() {
    let (program, main, id) = caller_callee_program(1);

    driver::run_cha(&program).unwrap();
    driver::run_inter_constprop(&program).unwrap();

    let result = program
        .results()
        .get::<InterCpResult>(InterConstantPropagation::ID)
        .expect("inter-constprop result published under its ID");

    let main_cfg = program
        .body_of(main)
        .unwrap()
        .results()
        .get::<ControlFlowGraph>(CFG_ID)
        .unwrap();

    // At the return statement of main, the call result is the constant
    // that went in.
    let return_node = main_cfg.stmt_node(2).unwrap();
    let at_return = result.in_fact_of(main, return_node).unwrap();
    assert_eq!(at_return.get(VarId::new(1)), CpValue::Const(5));
    assert_eq!(at_return.get(VarId::new(0)), CpValue::Const(5));

    // Inside the callee, the parameter carries the argument's constant.
    let id_cfg = program
        .body_of(id)
        .unwrap()
        .results()
        .get::<ControlFlowGraph>(CFG_ID)
        .unwrap();
    let id_return = id_cfg.stmt_node(0).unwrap();
    let in_id = result.in_fact_of(id, id_return).unwrap();
    assert_eq!(in_id.get(VarId::new(0)), CpValue::Const(5));
}

#[test]
fn call_result_does_not_bypass_the_callee() {
    // The call site's own OUT still has r unbound: r only materializes
    // at the return site, via the return edge.
    let (program, main, _id) = caller_callee_program(1);

    driver::run_cha(&program).unwrap();
    driver::run_inter_constprop(&program).unwrap();

    let result = program
        .results()
        .get::<InterCpResult>(InterConstantPropagation::ID)
        .unwrap();
    let main_cfg = program
        .body_of(main)
        .unwrap()
        .results()
        .get::<ControlFlowGraph>(CFG_ID)
        .unwrap();

    let call_node = main_cfg.stmt_node(1).unwrap();
    let call_out = result.out_fact_of(main, call_node).unwrap();
    assert_eq!(call_out.get(VarId::new(1)), CpValue::Undef);
}

#[test]
fn arity_mismatch_aborts_the_analysis() {
    let (program, _main, _id) = caller_callee_program(2);

    driver::run_cha(&program).unwrap();
    let err = driver::run_inter_constprop(&program).unwrap_err();
    assert!(matches!(
        err,
        Error::ArityMismatch {
            expected: 1,
            actual: 2,
            ..
        }
    ));

    // No partial result was stored.
    assert!(!program.results().contains(InterConstantPropagation::ID));
}

#[test]
fn icfg_stitches_call_edges_correctly() {
    let (program, main, id) = caller_callee_program(1);
    driver::run_cha(&program).unwrap();
    let call_graph = program.results().get::<CallGraph>(ChaBuilder::ID).unwrap();

    let icfg = Icfg::build(&program, &call_graph).unwrap();

    let main_cfg = program
        .body_of(main)
        .unwrap()
        .results()
        .get::<ControlFlowGraph>(CFG_ID)
        .unwrap();
    let call_global = icfg
        .global_node(main, main_cfg.stmt_node(1).unwrap())
        .unwrap();

    // Every intra out-edge of the call site is a call-to-return edge;
    // the only other out-edge is the call edge into the callee.
    let mut saw_call = false;
    let mut saw_call_to_return = false;
    for (_, kind) in icfg.out_edges(call_global) {
        match kind {
            IcfgEdgeKind::Call { callee, .. } => {
                assert_eq!(*callee, id);
                saw_call = true;
            }
            IcfgEdgeKind::CallToReturn { call_site } => {
                assert_eq!(call_site.stmt, 1);
                saw_call_to_return = true;
            }
            other => panic!("unexpected out-edge at call site: {other:?}"),
        }
    }
    assert!(saw_call);
    assert!(saw_call_to_return);

    // The return site receives a return edge carrying the callee's
    // return variable.
    let return_site = icfg
        .global_node(main, main_cfg.stmt_node(2).unwrap())
        .unwrap();
    let has_return_edge = icfg.in_edges(return_site).any(|(_, kind)| {
        matches!(
            kind,
            IcfgEdgeKind::Return { return_vars, .. } if return_vars == &vec![VarId::new(0)]
        )
    });
    assert!(has_return_edge);
}

#[test]
fn inter_constprop_requires_call_graph() {
    let (program, _main, _id) = caller_callee_program(1);
    let err = driver::run_inter_constprop(&program).unwrap_err();
    assert!(matches!(err, Error::MissingResult("cha")));
}
