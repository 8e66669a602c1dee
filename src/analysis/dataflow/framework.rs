//! The dataflow analysis capability record.
//!
//! Any specific analysis (constant propagation, live variables) implements
//! [`DataflowAnalysis`]; the worklist and iterative solvers drive it to a
//! fixpoint. The trait is the five-method contract the solvers need and
//! nothing more: direction, the two fact constructors, the meet, and the
//! node transfer.

use std::fmt::Debug;

use crate::{
    analysis::cfg::ControlFlowGraph,
    utils::graph::NodeId,
};

/// Direction of a dataflow analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Facts flow from entry toward exit; confluence at join points.
    Forward,
    /// Facts flow from exit toward entry; confluence at split points.
    Backward,
}

/// A dataflow analysis over one method's CFG.
///
/// # Transfer convention
///
/// `transfer` receives the fact flowing *into* the node in the analysis
/// direction and mutates the fact flowing *out* of it:
///
/// - forward: `input` is `IN[B]`, `output` is `OUT[B]`
/// - backward: `input` is `OUT[B]`, `output` is `IN[B]`
///
/// It returns whether `output` changed; solvers use that to decide which
/// neighbors to revisit. Transfers must be monotone with respect to the
/// fact lattice or the fixpoint iteration will not terminate.
pub trait DataflowAnalysis {
    /// The fact type at each program point.
    type Fact: Clone + PartialEq + Debug;

    /// The direction of this analysis.
    const DIRECTION: Direction;

    /// Returns the fact injected at the boundary node: the entry for
    /// forward analyses, the exit for backward ones.
    fn boundary_fact(&self, cfg: &ControlFlowGraph) -> Self::Fact;

    /// Returns the fact every interior node starts from.
    fn initial_fact(&self) -> Self::Fact;

    /// Meets `fact` into `target`, returning whether `target` changed.
    fn meet_into(&self, fact: &Self::Fact, target: &mut Self::Fact) -> bool;

    /// Applies this node's transfer function. See the trait docs for the
    /// direction-dependent meaning of `input` and `output`.
    fn transfer(
        &self,
        cfg: &ControlFlowGraph,
        node: NodeId,
        input: &Self::Fact,
        output: &mut Self::Fact,
    ) -> bool;
}

/// The computed IN and OUT facts of a finished analysis, per CFG node.
///
/// Indexed by [`NodeId`]; frozen once the solver returns it.
#[derive(Debug, Clone)]
pub struct DataflowResult<F> {
    /// IN fact per node.
    in_facts: Vec<F>,
    /// OUT fact per node.
    out_facts: Vec<F>,
}

impl<F: Clone> DataflowResult<F> {
    /// Creates a result with every fact initialized from `initial`.
    #[must_use]
    pub fn new(node_count: usize, initial: &F) -> Self {
        Self {
            in_facts: vec![initial.clone(); node_count],
            out_facts: vec![initial.clone(); node_count],
        }
    }

    /// Returns the IN fact of `node`.
    #[must_use]
    pub fn in_fact(&self, node: NodeId) -> &F {
        &self.in_facts[node.index()]
    }

    /// Returns the OUT fact of `node`.
    #[must_use]
    pub fn out_fact(&self, node: NodeId) -> &F {
        &self.out_facts[node.index()]
    }

    /// Returns the number of nodes covered.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.in_facts.len()
    }

    pub(crate) fn in_fact_mut(&mut self, node: NodeId) -> &mut F {
        &mut self.in_facts[node.index()]
    }

    pub(crate) fn out_fact_mut(&mut self, node: NodeId) -> &mut F {
        &mut self.out_facts[node.index()]
    }

    pub(crate) fn set_in_fact(&mut self, node: NodeId, fact: F) {
        self.in_facts[node.index()] = fact;
    }

    /// Splits mutable access into the IN fact of `node` and the full OUT
    /// table, so a transfer can read one and write the other.
    pub(crate) fn in_mut_and_outs(&mut self, node: NodeId) -> (&mut F, &[F]) {
        (&mut self.in_facts[node.index()], &self.out_facts)
    }

    /// Splits mutable access into the OUT fact of `node` and the full IN
    /// table.
    pub(crate) fn out_mut_and_ins(&mut self, node: NodeId) -> (&mut F, &[F]) {
        (&mut self.out_facts[node.index()], &self.in_facts)
    }
}
