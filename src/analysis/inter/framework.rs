//! The interprocedural analysis capability record.

use std::fmt::Debug;

use crate::{
    analysis::icfg::{Icfg, IcfgEdgeKind, IcfgNode},
    utils::graph::NodeId,
    Result,
};

/// An interprocedural dataflow analysis over the ICFG.
///
/// Compared to the intraprocedural record, node transfers are split into
/// call and non-call forms (call nodes only propagate, deferring the
/// kill of their result variable to the call-to-return edge), and an edge
/// transfer dispatches over the [`IcfgEdgeKind`] sum to produce the fact
/// flowing into each edge's target.
///
/// Interprocedural analyses are forward: facts flow from callers into
/// callees along call edges and back along return edges.
pub trait InterDataflowAnalysis {
    /// The fact type at each ICFG node.
    type Fact: Clone + PartialEq + Debug;

    /// Returns the fact injected at a global entry node.
    fn boundary_fact(&self, icfg: &Icfg, entry: NodeId) -> Self::Fact;

    /// Returns the fact every other node starts from.
    fn initial_fact(&self) -> Self::Fact;

    /// Meets `fact` into `target`, returning whether `target` changed.
    fn meet_into(&self, fact: &Self::Fact, target: &mut Self::Fact) -> bool;

    /// Transfer for a call-site node. Returns whether `output` changed.
    ///
    /// Implementations must not kill the call's result variable here;
    /// that happens on the call-to-return edge so the callee's return
    /// value can flow back in.
    fn transfer_call_node(
        &self,
        node: &IcfgNode,
        input: &Self::Fact,
        output: &mut Self::Fact,
    ) -> bool;

    /// Transfer for every other node. Returns whether `output` changed.
    fn transfer_non_call_node(
        &self,
        node: &IcfgNode,
        input: &Self::Fact,
        output: &mut Self::Fact,
    ) -> bool;

    /// Transfer for an edge: from the OUT fact of the edge's source to
    /// the fact met into the target's IN.
    ///
    /// # Errors
    ///
    /// Call edges abort with [`Error::ArityMismatch`](crate::Error::ArityMismatch)
    /// when the callee's parameter count differs from the call's argument
    /// count.
    fn transfer_edge(&self, kind: &IcfgEdgeKind, source_out: &Self::Fact) -> Result<Self::Fact>;
}
