//! Interprocedural constant propagation.
//!
//! Lifts the intraprocedural analysis across call edges: argument values
//! flow into callee parameters on call edges, return values flow back to
//! the call's result variable on return edges, and everything the callee
//! cannot touch bypasses it on the call-to-return edge, minus the call's
//! result variable, which is killed there so its value originates solely
//! from the return edges.

use rustc_hash::FxHashMap;

use crate::{
    analysis::{
        dataflow::{ConstantPropagation, CpFact, CpValue, DataflowResult, MeetSemiLattice},
        icfg::{Icfg, IcfgEdgeKind, IcfgNode},
        inter::InterDataflowAnalysis,
    },
    ir::{Method, MethodBody, MethodId, Program, StmtKind},
    utils::graph::NodeId,
    Error, Result,
};

/// The program-level result of interprocedural constant propagation:
/// the ICFG the facts are indexed by, plus the facts themselves.
///
/// The accessors translate method-local CFG nodes to the global index,
/// so callers query with the same handles they used to build the CFGs.
#[derive(Debug)]
pub struct InterCpResult {
    /// The ICFG the analysis ran over.
    pub icfg: Icfg,
    /// IN/OUT fact per global ICFG node.
    pub facts: DataflowResult<CpFact>,
}

impl InterCpResult {
    /// Returns the IN fact of a method-local CFG node.
    #[must_use]
    pub fn in_fact_of(&self, method: MethodId, local: NodeId) -> Option<&CpFact> {
        let global = self.icfg.global_node(method, local)?;
        Some(self.facts.in_fact(global))
    }

    /// Returns the OUT fact of a method-local CFG node.
    #[must_use]
    pub fn out_fact_of(&self, method: MethodId, local: NodeId) -> Option<&CpFact> {
        let global = self.icfg.global_node(method, local)?;
        Some(self.facts.out_fact(global))
    }
}

/// Interprocedural constant propagation over a whole program.
pub struct InterConstantPropagation<'a> {
    program: &'a Program,
    /// Bodies of all concrete methods, for O(1) statement access during
    /// transfers.
    bodies: FxHashMap<MethodId, &'a MethodBody>,
}

impl<'a> InterConstantPropagation<'a> {
    /// The analysis ID this analysis publishes results under.
    pub const ID: &'static str = "inter-constprop";

    /// Creates the analysis over `program`.
    #[must_use]
    pub fn new(program: &'a Program) -> Self {
        let bodies = program
            .methods()
            .filter_map(|m| m.body().map(|b| (m.id(), b)))
            .collect();
        Self { program, bodies }
    }

    fn body(&self, method: MethodId) -> Option<&'a MethodBody> {
        self.bodies.get(&method).copied()
    }

    /// The variable a call site binds its result to, if any.
    fn call_result(&self, method: MethodId, stmt: usize) -> Option<crate::ir::VarId> {
        let stmt = self.body(method)?.stmt(stmt)?;
        match stmt.kind() {
            StmtKind::Invoke { result, .. } => *result,
            _ => None,
        }
    }
}

impl InterDataflowAnalysis for InterConstantPropagation<'_> {
    type Fact = CpFact;

    /// Entry methods have unknown callers, so their parameters are
    /// pinned to `Nac`, exactly as in the intraprocedural boundary.
    fn boundary_fact(&self, icfg: &Icfg, entry: NodeId) -> CpFact {
        let mut fact = CpFact::new();
        if let Some(node) = icfg.node(entry) {
            if let Some(body) = self.body(node.method) {
                for &param in body.params() {
                    fact.update(param, CpValue::Nac);
                }
            }
        }
        fact
    }

    fn initial_fact(&self) -> CpFact {
        CpFact::new()
    }

    fn meet_into(&self, fact: &CpFact, target: &mut CpFact) -> bool {
        fact.meet_into(target)
    }

    /// Call nodes only propagate: `out ⊔= in`, per-key. The result
    /// variable is deliberately not killed here.
    fn transfer_call_node(&self, _node: &IcfgNode, input: &CpFact, output: &mut CpFact) -> bool {
        input.meet_into(output)
    }

    /// Non-call nodes behave exactly like the intraprocedural transfer.
    fn transfer_non_call_node(&self, node: &IcfgNode, input: &CpFact, output: &mut CpFact) -> bool {
        let Some(body) = self.body(node.method) else {
            // A node of a bodyless method cannot occur in a well-formed
            // ICFG; propagate untouched.
            return input.meet_into(output);
        };
        let cp = ConstantPropagation::new(body);
        cp.transfer_stmt(node.stmt.and_then(|i| body.stmt(i)), input, output)
    }

    fn transfer_edge(&self, kind: &IcfgEdgeKind, source_out: &CpFact) -> Result<CpFact> {
        match kind {
            IcfgEdgeKind::Normal => Ok(source_out.clone()),

            IcfgEdgeKind::CallToReturn { call_site } => {
                let mut fact = source_out.clone();
                if let Some(result) = self.call_result(call_site.method, call_site.stmt) {
                    fact.remove(result);
                }
                Ok(fact)
            }

            IcfgEdgeKind::Call { call_site, callee } => {
                let mut fact = CpFact::new();
                let Some(caller_body) = self.body(call_site.method) else {
                    return Ok(fact);
                };
                let Some(invoke) = caller_body.stmt(call_site.stmt).and_then(|s| s.as_invoke())
                else {
                    return Ok(fact);
                };
                let callee_body = self
                    .program
                    .method(*callee)
                    .and_then(Method::body)
                    .ok_or(Error::MissingBody(*callee))?;

                let params = callee_body.params();
                if params.len() != invoke.args.len() {
                    return Err(Error::ArityMismatch {
                        call_site: call_site.stmt,
                        expected: params.len(),
                        actual: invoke.args.len(),
                    });
                }
                for (&param, &arg) in params.iter().zip(invoke.args.iter()) {
                    fact.update(param, source_out.get(arg));
                }
                Ok(fact)
            }

            IcfgEdgeKind::Return {
                call_site,
                return_vars,
            } => {
                let mut fact = CpFact::new();
                if let Some(result) = self.call_result(call_site.method, call_site.stmt) {
                    let mut value = fact.get(result);
                    for &ret in return_vars {
                        value = value.meet(&source_out.get(ret));
                    }
                    fact.update(result, value);
                }
                Ok(fact)
            }
        }
    }
}
