//! Driver helpers wiring analyses to the result maps.
//!
//! Each helper runs one analysis for one method (or the whole program)
//! and publishes the result under the analysis ID, which is how
//! downstream passes find their inputs:
//!
//! - `"cfg"`: stored by the host, consumed by everything here
//! - `"constprop"`, `"livevar"`: per-method, stored on the body
//! - `"cha"`, `"inter-constprop"`: program-level, stored on the program
//! - `"deadcode"`: per-method, requires `"constprop"` and `"livevar"`
//!
//! [`run_intra_all`] fans the intraprocedural passes out over all
//! concrete methods with rayon; per-method state is disjoint and the
//! result maps are concurrent, so no further synchronization is needed.

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::{
    analysis::{
        callgraph::{CallGraph, ChaBuilder},
        cfg::{ControlFlowGraph, CFG_ID},
        dataflow::{
            ConstantPropagation, CpFact, DataflowResult, IterativeSolver, LiveVariableAnalysis,
            SetFact, WorklistSolver,
        },
        deadcode::DeadCodeDetection,
        icfg::Icfg,
        inter::{InterConstantPropagation, InterCpResult, InterSolver},
    },
    ir::{Method, MethodId, Program, VarId},
    Error, Result,
};

/// Fetches the stored CFG of a method.
fn cfg_of(program: &Program, method: MethodId) -> Result<std::sync::Arc<ControlFlowGraph>> {
    program
        .body_of(method)?
        .results()
        .get::<ControlFlowGraph>(CFG_ID)
        .ok_or(Error::MissingResult(CFG_ID))
}

/// Runs intraprocedural constant propagation for one method and
/// publishes the result under `"constprop"`.
pub fn run_constprop(program: &Program, method: MethodId) -> Result<()> {
    let body = program.body_of(method)?;
    let cfg = cfg_of(program, method)?;
    let analysis = ConstantPropagation::new(body);
    let result = WorklistSolver::solve(&analysis, &cfg)?;
    body.results().put(ConstantPropagation::ID, result);
    Ok(())
}

/// Runs live-variable analysis for one method and publishes the result
/// under `"livevar"`.
pub fn run_livevar(program: &Program, method: MethodId) -> Result<()> {
    let body = program.body_of(method)?;
    let cfg = cfg_of(program, method)?;
    let analysis = LiveVariableAnalysis::new(body);
    let result = IterativeSolver::solve(&analysis, &cfg)?;
    body.results().put(LiveVariableAnalysis::ID, result);
    Ok(())
}

/// Runs dead-code detection for one method and publishes the sorted
/// dead-statement set under `"deadcode"`.
///
/// # Errors
///
/// Requires `"constprop"` and `"livevar"` results on the method;
/// returns [`Error::MissingResult`] naming whichever is absent.
pub fn run_deadcode(program: &Program, method: MethodId) -> Result<BTreeSet<usize>> {
    let body = program.body_of(method)?;
    let cfg = cfg_of(program, method)?;
    let constants = body
        .results()
        .get::<DataflowResult<CpFact>>(ConstantPropagation::ID)
        .ok_or(Error::MissingResult(ConstantPropagation::ID))?;
    let live = body
        .results()
        .get::<DataflowResult<SetFact<VarId>>>(LiveVariableAnalysis::ID)
        .ok_or(Error::MissingResult(LiveVariableAnalysis::ID))?;

    let dead = DeadCodeDetection::analyze(body, &cfg, &constants, &live);
    body.results().put(DeadCodeDetection::ID, dead.clone());
    Ok(dead)
}

/// Builds the CHA call graph and publishes it under `"cha"` on the
/// program.
pub fn run_cha(program: &Program) -> Result<()> {
    let graph = ChaBuilder::new(program).build()?;
    program.results().put(ChaBuilder::ID, graph);
    Ok(())
}

/// Runs interprocedural constant propagation over the ICFG and publishes
/// the result under `"inter-constprop"` on the program.
///
/// # Errors
///
/// Requires the `"cha"` call graph and per-method CFGs; aborts without a
/// result on call-edge arity mismatches.
pub fn run_inter_constprop(program: &Program) -> Result<()> {
    let call_graph = program
        .results()
        .get::<CallGraph>(ChaBuilder::ID)
        .ok_or(Error::MissingResult(ChaBuilder::ID))?;
    let icfg = Icfg::build(program, &call_graph)?;
    let analysis = InterConstantPropagation::new(program);
    let facts = InterSolver::solve(&analysis, &icfg)?;
    program
        .results()
        .put(InterConstantPropagation::ID, InterCpResult { icfg, facts });
    Ok(())
}

/// Runs the intraprocedural analyses (constant propagation and live
/// variables) for every concrete method, in parallel.
///
/// Each method's CFG and fact maps are disjoint from every other's, so
/// the passes parallelize method-wise without shared mutable state.
pub fn run_intra_all(program: &Program) -> Result<()> {
    let methods: Vec<MethodId> = program
        .methods()
        .filter(|m| m.body().is_some())
        .map(Method::id)
        .collect();

    methods.par_iter().try_for_each(|&method| {
        run_constprop(program, method)?;
        run_livevar(program, method)
    })
}
