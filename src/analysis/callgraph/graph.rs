//! Call graph representation.
//!
//! The call graph holds exactly the methods transitively reachable from
//! the program's entry methods, plus one [`CallEdge`] per resolved
//! (call-site, callee) pair. Reachability, not edge uniqueness, is the
//! deduplication criterion: multiple edges may share endpoints when they
//! come from different call sites or dispatch kinds.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    analysis::callgraph::{CallEdge, CallSite},
    ir::MethodId,
};

/// A reachable-methods call graph rooted at the program's entry methods.
#[derive(Debug, Default)]
pub struct CallGraph {
    /// The entry methods anchoring reachability.
    entries: Vec<MethodId>,
    /// Reachable methods, in discovery order.
    reachable: Vec<MethodId>,
    /// Membership index over `reachable`.
    reachable_set: FxHashSet<MethodId>,
    /// All call edges.
    edges: Vec<CallEdge>,
    /// Callees per call site, in resolution order.
    site_callees: FxHashMap<CallSite, Vec<MethodId>>,
}

impl CallGraph {
    /// Creates an empty call graph with the given entry methods.
    #[must_use]
    pub fn new(entries: Vec<MethodId>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Records `method` as reachable. Returns `false` if it already was.
    pub(crate) fn add_reachable(&mut self, method: MethodId) -> bool {
        if self.reachable_set.insert(method) {
            self.reachable.push(method);
            true
        } else {
            false
        }
    }

    /// Adds a call edge.
    pub(crate) fn add_edge(&mut self, edge: CallEdge) {
        self.site_callees
            .entry(edge.call_site)
            .or_default()
            .push(edge.callee);
        self.edges.push(edge);
    }

    /// Returns `true` if `method` is reachable from an entry method.
    #[must_use]
    pub fn contains(&self, method: MethodId) -> bool {
        self.reachable_set.contains(&method)
    }

    /// Returns the entry methods.
    #[must_use]
    pub fn entries(&self) -> &[MethodId] {
        &self.entries
    }

    /// Returns the reachable methods in discovery order.
    #[must_use]
    pub fn reachable_methods(&self) -> &[MethodId] {
        &self.reachable
    }

    /// Returns the number of reachable methods.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.reachable.len()
    }

    /// Returns all call edges.
    #[must_use]
    pub fn edges(&self) -> &[CallEdge] {
        &self.edges
    }

    /// Returns the number of call edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the callees resolved for `site`, in resolution order.
    #[must_use]
    pub fn callees_of_site(&self, site: CallSite) -> &[MethodId] {
        self.site_callees.get(&site).map_or(&[], Vec::as_slice)
    }

    /// Returns the distinct callees of `caller` across all its call
    /// sites, in edge order.
    #[must_use]
    pub fn callees_of(&self, caller: MethodId) -> Vec<MethodId> {
        let mut callees = Vec::new();
        for edge in &self.edges {
            if edge.call_site.method == caller && !callees.contains(&edge.callee) {
                callees.push(edge.callee);
            }
        }
        callees
    }

    /// Returns the distinct callers of `callee`, in edge order.
    #[must_use]
    pub fn callers_of(&self, callee: MethodId) -> Vec<MethodId> {
        let mut callers = Vec::new();
        for edge in &self.edges {
            if edge.callee == callee && !callers.contains(&edge.call_site.method) {
                callers.push(edge.call_site.method);
            }
        }
        callers
    }

    /// Returns the call sites within `caller` that resolved to at least
    /// one callee, in edge order.
    #[must_use]
    pub fn call_sites_in(&self, caller: MethodId) -> Vec<CallSite> {
        let mut sites = Vec::new();
        for edge in &self.edges {
            if edge.call_site.method == caller && !sites.contains(&edge.call_site) {
                sites.push(edge.call_site);
            }
        }
        sites
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::CallKind;

    #[test]
    fn test_reachable_dedup() {
        let mut graph = CallGraph::new(vec![MethodId::new(0)]);
        assert!(graph.add_reachable(MethodId::new(0)));
        assert!(!graph.add_reachable(MethodId::new(0)));
        assert_eq!(graph.method_count(), 1);
        assert!(graph.contains(MethodId::new(0)));
        assert!(!graph.contains(MethodId::new(1)));
    }

    #[test]
    fn test_edges_may_share_endpoints() {
        let mut graph = CallGraph::new(vec![MethodId::new(0)]);
        let site_a = CallSite::new(MethodId::new(0), 0);
        let site_b = CallSite::new(MethodId::new(0), 3);
        let callee = MethodId::new(1);

        graph.add_edge(CallEdge::new(CallKind::Static, site_a, callee));
        graph.add_edge(CallEdge::new(CallKind::Static, site_b, callee));

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.callees_of(MethodId::new(0)), vec![callee]);
        assert_eq!(graph.call_sites_in(MethodId::new(0)), vec![site_a, site_b]);
        assert_eq!(graph.callers_of(callee), vec![MethodId::new(0)]);
    }

    #[test]
    fn test_site_callees_resolution_order() {
        let mut graph = CallGraph::new(Vec::new());
        let site = CallSite::new(MethodId::new(0), 0);
        graph.add_edge(CallEdge::new(CallKind::Virtual, site, MethodId::new(1)));
        graph.add_edge(CallEdge::new(CallKind::Virtual, site, MethodId::new(2)));

        assert_eq!(
            graph.callees_of_site(site),
            &[MethodId::new(1), MethodId::new(2)]
        );
        assert!(graph
            .callees_of_site(CallSite::new(MethodId::new(5), 0))
            .is_empty());
    }
}
