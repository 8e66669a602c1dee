//! Worklist fixed-point solver for interprocedural analyses.
//!
//! The driver is the same shape as the intraprocedural worklist solver,
//! with two differences: incoming facts pass through the edge transfer of
//! each in-edge before being met into a node's IN, and the node transfer
//! dispatches on whether the node is a call site. Fixpoint is reached
//! when no IN fact changes.

use std::collections::VecDeque;

use tracing::debug;

use crate::{
    analysis::{
        dataflow::DataflowResult,
        icfg::Icfg,
        inter::InterDataflowAnalysis,
    },
    utils::graph::NodeSet,
    Result,
};

/// Worklist solver over the ICFG.
pub struct InterSolver;

impl InterSolver {
    /// Solves `analysis` over `icfg` to a fixpoint.
    ///
    /// # Errors
    ///
    /// Propagates edge-transfer failures (such as call-edge arity
    /// mismatches); no partial result is produced.
    pub fn solve<A: InterDataflowAnalysis>(
        analysis: &A,
        icfg: &Icfg,
    ) -> Result<DataflowResult<A::Fact>> {
        let initial = analysis.initial_fact();
        let mut result = DataflowResult::new(icfg.node_count(), &initial);

        for &entry in icfg.entry_nodes() {
            let boundary = analysis.boundary_fact(icfg, entry);
            result.set_in_fact(entry, boundary.clone());
            *result.out_fact_mut(entry) = boundary;
        }

        let mut worklist: VecDeque<_> = icfg.node_ids().collect();
        let mut queued = NodeSet::new();
        for node in icfg.node_ids() {
            queued.insert(node);
        }

        let mut iterations = 0usize;
        while let Some(node) = worklist.pop_front() {
            queued.remove(node);
            iterations += 1;

            // IN[n] ⊔= transfer_edge(e, OUT[src e]) over in-edges. The
            // meet accumulates into the existing IN, which keeps boundary
            // facts at entry nodes intact.
            for (source, kind) in icfg.in_edges(node) {
                let fact = analysis.transfer_edge(kind, result.out_fact(source))?;
                analysis.meet_into(&fact, result.in_fact_mut(node));
            }

            let Some(payload) = icfg.node(node) else {
                continue;
            };
            let (out, ins) = result.out_mut_and_ins(node);
            let input = &ins[node.index()];
            let changed = if payload.is_call {
                analysis.transfer_call_node(payload, input, out)
            } else {
                analysis.transfer_non_call_node(payload, input, out)
            };

            if changed {
                for succ in icfg.successors(node) {
                    if queued.insert(succ) {
                        worklist.push_back(succ);
                    }
                }
            }
        }

        debug!(
            nodes = icfg.node_count(),
            iterations, "interprocedural solver converged"
        );
        Ok(result)
    }
}
