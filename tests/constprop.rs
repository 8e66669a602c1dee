//! Constant propagation integration tests.
//!
//! These suites drive the full host flow: build a program through the
//! public builder, store CFGs in the result maps, run the driver
//! helpers, and read published results back by analysis ID.

mod common;

use common::{assign, binary, int_sig, int_vars, store_linear_cfg};
use flowscope::analysis::driver;
use flowscope::prelude::*;

/// Builds a one-class program whose single method has the given locals
/// and statements with a straight-line CFG.
fn single_method_program(vars: Vec<Var>, params: Vec<VarId>, stmts: Vec<Stmt>) -> (Program, MethodId) {
    let mut builder = ProgramBuilder::new();
    let class = builder.add_class("Main", None, Vec::new(), ClassFlags::empty());
    let body = MethodBody::new(vars, params, stmts);
    let method = builder.add_method(
        class,
        int_sig("main", 0),
        MethodFlags::STATIC,
        Some(body),
    );
    builder.add_entry(method);
    let program = builder.build().unwrap();
    store_linear_cfg(program.body_of(method).unwrap(), method);
    (program, method)
}

#[test]
fn constant_folding_through_driver() {
    // a = 1; b = 2; c = a + b; z = 0; d = c * z;
    let (program, method) = single_method_program(
        int_vars(5),
        Vec::new(),
        vec![
            assign(0, 0, Exp::IntLiteral(1)),
            assign(1, 1, Exp::IntLiteral(2)),
            assign(2, 2, binary(BinaryOp::Add, 0, 1)),
            assign(3, 4, Exp::IntLiteral(0)),
            assign(4, 3, binary(BinaryOp::Mul, 2, 4)),
        ],
    );

    driver::run_constprop(&program, method).unwrap();

    let body = program.body_of(method).unwrap();
    let result = body
        .results()
        .get::<DataflowResult<CpFact>>(ConstantPropagation::ID)
        .expect("constprop result published under its ID");
    let cfg = body.results().get::<ControlFlowGraph>(CFG_ID).unwrap();

    let exit_in = result.in_fact(cfg.exit());
    assert_eq!(exit_in.get(VarId::new(0)), CpValue::Const(1));
    assert_eq!(exit_in.get(VarId::new(1)), CpValue::Const(2));
    assert_eq!(exit_in.get(VarId::new(2)), CpValue::Const(3));
    assert_eq!(exit_in.get(VarId::new(3)), CpValue::Const(0));
}

#[test]
fn join_of_distinct_constants_is_nac() {
    // if (p) { x = 1 } else { x = 2 }; y = x
    let mut vars = int_vars(3);
    vars[0] = Var {
        name: "p".into(),
        ty: IrType::boolean(),
    };
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

    let mut builder = ProgramBuilder::new();
    let class = builder.add_class("Main", None, Vec::new(), ClassFlags::empty());
    let body = MethodBody::new(vars, vec![VarId::new(0)], stmts);
    let method = builder.add_method(class, int_sig("branchy", 1), MethodFlags::STATIC, Some(body));
    builder.add_entry(method);
    let program = builder.build().unwrap();

    // Diamond CFG.
    let body = program.body_of(method).unwrap();
    let mut cfg = ControlFlowGraph::new(method);
    let nodes: Vec<_> = (0..4).map(|i| cfg.add_stmt(i)).collect();
    cfg.add_edge(cfg.entry(), nodes[0], CfgEdgeKind::Normal).unwrap();
    cfg.add_edge(nodes[0], nodes[1], CfgEdgeKind::IfTrue).unwrap();
    cfg.add_edge(nodes[0], nodes[2], CfgEdgeKind::IfFalse).unwrap();
    cfg.add_edge(nodes[1], nodes[3], CfgEdgeKind::Normal).unwrap();
    cfg.add_edge(nodes[2], nodes[3], CfgEdgeKind::Normal).unwrap();
    cfg.add_edge(nodes[3], cfg.exit(), CfgEdgeKind::Normal).unwrap();
    body.results().put(CFG_ID, cfg);

    driver::run_constprop(&program, method).unwrap();

    let result = body
        .results()
        .get::<DataflowResult<CpFact>>(ConstantPropagation::ID)
        .unwrap();
    let cfg = body.results().get::<ControlFlowGraph>(CFG_ID).unwrap();

    let at_merge = result.in_fact(cfg.stmt_node(3).unwrap());
    assert_eq!(at_merge.get(VarId::new(1)), CpValue::Nac);
    assert_eq!(
        result.out_fact(cfg.stmt_node(3).unwrap()).get(VarId::new(2)),
        CpValue::Nac
    );
}

#[test]
fn divide_by_zero_stays_undef() {
    // a = 10; b = 0; c = a / b;
    let (program, method) = single_method_program(
        int_vars(3),
        Vec::new(),
        vec![
            assign(0, 0, Exp::IntLiteral(10)),
            assign(1, 1, Exp::IntLiteral(0)),
            assign(2, 2, binary(BinaryOp::Div, 0, 1)),
        ],
    );

    driver::run_constprop(&program, method).unwrap();

    let body = program.body_of(method).unwrap();
    let result = body
        .results()
        .get::<DataflowResult<CpFact>>(ConstantPropagation::ID)
        .unwrap();
    let cfg = body.results().get::<ControlFlowGraph>(CFG_ID).unwrap();

    assert_eq!(
        result.in_fact(cfg.exit()).get(VarId::new(2)),
        CpValue::Undef
    );
}

#[test]
fn missing_cfg_is_reported() {
    let mut builder = ProgramBuilder::new();
    let class = builder.add_class("Main", None, Vec::new(), ClassFlags::empty());
    let method = builder.add_method(
        class,
        int_sig("main", 0),
        MethodFlags::STATIC,
        Some(MethodBody::new(Vec::new(), Vec::new(), Vec::new())),
    );
    builder.add_entry(method);
    let program = builder.build().unwrap();

    // No CFG stored: the driver refuses to run.
    let err = driver::run_constprop(&program, method).unwrap_err();
    assert!(matches!(err, Error::MissingResult("cfg")));
}

#[test]
fn intra_passes_run_method_parallel() {
    // Several independent methods; run_intra_all must publish both
    // results for each of them.
    let mut builder = ProgramBuilder::new();
    let class = builder.add_class("Main", None, Vec::new(), ClassFlags::empty());
    let mut methods = Vec::new();
    for i in 0..8 {
        let body = MethodBody::new(
            int_vars(2),
            Vec::new(),
            vec![
                assign(0, 0, Exp::IntLiteral(i)),
                assign(1, 1, binary(BinaryOp::Add, 0, 0)),
            ],
        );
        methods.push(builder.add_method(
            class,
            int_sig(&format!("m{i}"), 0),
            MethodFlags::STATIC,
            Some(body),
        ));
    }
    let program = builder.build().unwrap();
    for &m in &methods {
        store_linear_cfg(program.body_of(m).unwrap(), m);
    }

    driver::run_intra_all(&program).unwrap();

    for (i, &m) in methods.iter().enumerate() {
        let body = program.body_of(m).unwrap();
        let cp = body
            .results()
            .get::<DataflowResult<CpFact>>(ConstantPropagation::ID)
            .expect("constprop published");
        assert!(body.results().contains(LiveVariableAnalysis::ID));

        let cfg = body.results().get::<ControlFlowGraph>(CFG_ID).unwrap();
        let expected = (i as i32).wrapping_add(i as i32);
        assert_eq!(
            cp.in_fact(cfg.exit()).get(VarId::new(1)),
            CpValue::Const(expected)
        );
    }
}
