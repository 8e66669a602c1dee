//! Interprocedural edge kinds.
//!
//! The ICFG carries four edge kinds; interprocedural analyses dispatch on
//! this sum at the edge-transfer site. Each kind carries the payload its
//! transfer needs: the call site for kill decisions, the callee for
//! parameter binding, and the callee's return variables for return-value
//! joins.

use crate::{
    analysis::callgraph::CallSite,
    ir::{MethodId, VarId},
};

/// The kind of an ICFG edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcfgEdgeKind {
    /// An intraprocedural edge between two nodes of the same method.
    Normal,
    /// A call edge from a call site to the callee's entry node.
    Call {
        /// The originating call site.
        call_site: CallSite,
        /// The invoked method.
        callee: MethodId,
    },
    /// A return edge from the callee's exit node back to a return site of
    /// the call.
    Return {
        /// The call site this edge answers.
        call_site: CallSite,
        /// The variables the callee's return statements yield.
        return_vars: Vec<VarId>,
    },
    /// An edge from a call site to its return site within the same
    /// method, bypassing the callee.
    CallToReturn {
        /// The call site being bypassed.
        call_site: CallSite,
    },
}

impl IcfgEdgeKind {
    /// Returns `true` for edges crossing a method boundary.
    #[must_use]
    pub const fn is_interprocedural(&self) -> bool {
        matches!(self, Self::Call { .. } | Self::Return { .. })
    }
}
