//! Fixed-point solvers for dataflow analyses.
//!
//! Two strategies are provided:
//!
//! - [`WorklistSolver`] revisits only nodes whose inputs changed. It
//!   supports both directions and is the default choice.
//! - [`IterativeSolver`] sweeps all nodes round-robin until a full pass
//!   makes no change. It implements the backward direction only and
//!   rejects forward selection with [`Error::NotSupported`] before doing
//!   any work.
//!
//! Both strategies reach the same fixpoint (the meet-over-all-paths lower
//! bound); termination follows from finite lattice height and monotone
//! transfers. The worklist performs O(height × touched-keys) node revisits
//! in the worst case.

use std::collections::VecDeque;

use tracing::debug;

use crate::{
    analysis::{
        cfg::ControlFlowGraph,
        dataflow::{DataflowAnalysis, DataflowResult, Direction},
    },
    utils::graph::{postorder, reverse_postorder, NodeId, NodeSet},
    Error, Result,
};

/// Worklist-based fixed-point solver.
///
/// Nodes are seeded in (reverse) postorder so most facts stabilize in one
/// pass over acyclic regions; a membership bitmap deduplicates queue
/// entries.
pub struct WorklistSolver;

impl WorklistSolver {
    /// Solves `analysis` over `cfg` to a fixpoint.
    ///
    /// # Errors
    ///
    /// This strategy supports both directions; it currently never fails,
    /// but returns `Result` so strategy selection is uniform across
    /// solvers.
    pub fn solve<A: DataflowAnalysis>(
        analysis: &A,
        cfg: &ControlFlowGraph,
    ) -> Result<DataflowResult<A::Fact>> {
        match A::DIRECTION {
            Direction::Forward => Ok(Self::solve_forward(analysis, cfg)),
            Direction::Backward => Ok(Self::solve_backward(analysis, cfg)),
        }
    }

    fn solve_forward<A: DataflowAnalysis>(
        analysis: &A,
        cfg: &ControlFlowGraph,
    ) -> DataflowResult<A::Fact> {
        let initial = analysis.initial_fact();
        let mut result = DataflowResult::new(cfg.node_count(), &initial);

        let boundary = analysis.boundary_fact(cfg);
        result.set_in_fact(cfg.entry(), boundary.clone());
        // The entry node is synthetic and transfers nothing; its OUT is
        // the boundary so its successors meet it in.
        *result.out_fact_mut(cfg.entry()) = boundary;

        let (mut worklist, mut queued) = seed_worklist(cfg, cfg.entry(), true);

        let mut iterations = 0usize;
        while let Some(node) = worklist.pop_front() {
            queued.remove(node);
            iterations += 1;

            // IN[B] := ⊔ OUT[P] over predecessors, from a fresh fact.
            let mut new_in = analysis.initial_fact();
            for pred in cfg.predecessors(node) {
                analysis.meet_into(result.out_fact(pred), &mut new_in);
            }
            result.set_in_fact(node, new_in);

            let (out, ins) = result.out_mut_and_ins(node);
            if analysis.transfer(cfg, node, &ins[node.index()], out) {
                for succ in cfg.successors(node) {
                    if queued.insert(succ) {
                        worklist.push_back(succ);
                    }
                }
            }
        }

        debug!(
            method = %cfg.method(),
            nodes = cfg.node_count(),
            iterations,
            "worklist solver converged (forward)"
        );
        result
    }

    fn solve_backward<A: DataflowAnalysis>(
        analysis: &A,
        cfg: &ControlFlowGraph,
    ) -> DataflowResult<A::Fact> {
        let initial = analysis.initial_fact();
        let mut result = DataflowResult::new(cfg.node_count(), &initial);

        let boundary = analysis.boundary_fact(cfg);
        result.set_in_fact(cfg.exit(), boundary.clone());
        *result.out_fact_mut(cfg.exit()) = boundary;

        let (mut worklist, mut queued) = seed_worklist(cfg, cfg.exit(), false);

        let mut iterations = 0usize;
        while let Some(node) = worklist.pop_front() {
            queued.remove(node);
            iterations += 1;

            // OUT[B] := ⊔ IN[S] over successors, from a fresh fact.
            let mut new_out = analysis.initial_fact();
            for succ in cfg.successors(node) {
                analysis.meet_into(result.in_fact(succ), &mut new_out);
            }
            *result.out_fact_mut(node) = new_out;

            let (in_fact, outs) = result.in_mut_and_outs(node);
            if analysis.transfer(cfg, node, &outs[node.index()], in_fact) {
                for pred in cfg.predecessors(node) {
                    if queued.insert(pred) {
                        worklist.push_back(pred);
                    }
                }
            }
        }

        debug!(
            method = %cfg.method(),
            nodes = cfg.node_count(),
            iterations,
            "worklist solver converged (backward)"
        );
        result
    }
}

/// Round-robin iterative solver, backward direction only.
pub struct IterativeSolver;

impl IterativeSolver {
    /// Solves `analysis` over `cfg` to a fixpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] for forward analyses; the
    /// rejection happens at selection time, before any fact is touched.
    pub fn solve<A: DataflowAnalysis>(
        analysis: &A,
        cfg: &ControlFlowGraph,
    ) -> Result<DataflowResult<A::Fact>> {
        match A::DIRECTION {
            Direction::Forward => Err(Error::NotSupported),
            Direction::Backward => Ok(Self::solve_backward(analysis, cfg)),
        }
    }

    fn solve_backward<A: DataflowAnalysis>(
        analysis: &A,
        cfg: &ControlFlowGraph,
    ) -> DataflowResult<A::Fact> {
        let initial = analysis.initial_fact();
        let mut result = DataflowResult::new(cfg.node_count(), &initial);

        let boundary = analysis.boundary_fact(cfg);
        result.set_in_fact(cfg.exit(), boundary.clone());
        *result.out_fact_mut(cfg.exit()) = boundary;

        // All nodes except the exit, in reverse insertion order.
        let mut rev_flow: Vec<NodeId> = cfg.node_ids().filter(|&n| n != cfg.exit()).collect();
        rev_flow.reverse();

        let mut passes = 0usize;
        loop {
            passes += 1;
            let mut changed = false;
            for &node in &rev_flow {
                // OUT[B] ⊔= IN[S] for each successor S.
                {
                    let (out, ins) = result.out_mut_and_ins(node);
                    for succ in cfg.successors(node) {
                        analysis.meet_into(&ins[succ.index()], out);
                    }
                }

                let (in_fact, outs) = result.in_mut_and_outs(node);
                changed |= analysis.transfer(cfg, node, &outs[node.index()], in_fact);
            }
            if !changed {
                break;
            }
        }

        debug!(
            method = %cfg.method(),
            nodes = cfg.node_count(),
            passes,
            "iterative solver converged (backward)"
        );
        result
    }
}

/// Builds the initial worklist: every node except `boundary`, preferring
/// reverse postorder (forward) or postorder (backward) for the reachable
/// region, with any remaining nodes appended in ID order.
fn seed_worklist(
    cfg: &ControlFlowGraph,
    boundary: NodeId,
    forward: bool,
) -> (VecDeque<NodeId>, NodeSet) {
    let order = if forward {
        reverse_postorder(cfg.graph(), cfg.entry())
    } else {
        postorder(cfg.graph(), cfg.entry())
    };

    let mut worklist = VecDeque::with_capacity(cfg.node_count());
    let mut queued = NodeSet::new();
    for node in order {
        if node != boundary && queued.insert(node) {
            worklist.push_back(node);
        }
    }
    // Nodes unreachable from the entry still belong on the worklist.
    for node in cfg.node_ids() {
        if node != boundary && queued.insert(node) {
            worklist.push_back(node);
        }
    }
    (worklist, queued)
}
