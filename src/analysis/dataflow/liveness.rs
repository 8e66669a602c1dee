//! Live variable analysis.
//!
//! A variable is *live* at a program point if some path from that point
//! reaches a use of the variable without passing a redefinition. This is
//! the classic backward may-analysis:
//!
//! - `OUT[B] = ∪ IN[S]` over successors S
//! - `IN[B] = use(B) ∪ (OUT[B] ∖ def(B))`
//!
//! The dead-code detector consumes the per-statement OUT sets to find
//! assignments whose values are never read.

use crate::{
    analysis::{
        cfg::ControlFlowGraph,
        dataflow::{DataflowAnalysis, Direction, SetFact},
    },
    ir::{MethodBody, VarId},
    utils::graph::NodeId,
};

/// Live variable analysis over one method body.
pub struct LiveVariableAnalysis<'a> {
    body: &'a MethodBody,
}

impl<'a> LiveVariableAnalysis<'a> {
    /// The analysis ID this analysis publishes results under.
    pub const ID: &'static str = "livevar";

    /// Creates the analysis for a method body.
    #[must_use]
    pub const fn new(body: &'a MethodBody) -> Self {
        Self { body }
    }
}

impl DataflowAnalysis for LiveVariableAnalysis<'_> {
    type Fact = SetFact<VarId>;
    const DIRECTION: Direction = Direction::Backward;

    /// Nothing is live at method exit.
    fn boundary_fact(&self, _cfg: &ControlFlowGraph) -> SetFact<VarId> {
        SetFact::new()
    }

    fn initial_fact(&self) -> SetFact<VarId> {
        SetFact::new()
    }

    fn meet_into(&self, fact: &SetFact<VarId>, target: &mut SetFact<VarId>) -> bool {
        target.union_with(fact)
    }

    fn transfer(
        &self,
        cfg: &ControlFlowGraph,
        node: NodeId,
        input: &SetFact<VarId>,
        output: &mut SetFact<VarId>,
    ) -> bool {
        // Backward: input is OUT[B], output is IN[B].
        let mut new_in = input.clone();
        if let Some(index) = cfg.stmt_index_of(node) {
            if let Some(stmt) = self.body.stmt(index) {
                if let Some(def) = stmt.def() {
                    new_in.remove(&def);
                }
                for used in stmt.uses() {
                    new_in.insert(used);
                }
            }
        }

        let changed = *output != new_in;
        *output = new_in;
        changed
    }
}
