//! Class Hierarchy Analysis call-graph construction.
//!
//! CHA resolves call targets using only declared class relationships: a
//! virtual call may land on any non-abstract override in the cone of the
//! receiver's declared type. The builder runs a memoized BFS over
//! methods, scanning each newly reachable body for call sites and
//! enqueuing their resolved targets.

use std::collections::VecDeque;

use tracing::debug;

use crate::{
    analysis::callgraph::{CallEdge, CallGraph, CallSite},
    ir::{CallKind, ClassId, InvokeExp, MethodId, Program, Subsignature},
    Result,
};

/// CHA call-graph builder.
pub struct ChaBuilder<'a> {
    program: &'a Program,
}

impl<'a> ChaBuilder<'a> {
    /// The analysis ID the call graph is published under.
    pub const ID: &'static str = "cha";

    /// Creates a builder over `program`.
    #[must_use]
    pub const fn new(program: &'a Program) -> Self {
        Self { program }
    }

    /// Builds the call graph rooted at the program's entry methods.
    ///
    /// A method appears in the returned graph iff it is transitively
    /// reachable from an entry method through resolved edges. Call sites
    /// whose targets cannot be resolved (dynamic dispatch, dispatch
    /// misses) simply contribute no edges.
    ///
    /// # Errors
    ///
    /// Returns an error if a reachable method ID does not resolve in the
    /// program.
    pub fn build(&self) -> Result<CallGraph> {
        let mut graph = CallGraph::new(self.program.entries().to_vec());

        let mut worklist: VecDeque<MethodId> = self.program.entries().iter().copied().collect();
        while let Some(method_id) = worklist.pop_front() {
            if !graph.add_reachable(method_id) {
                continue;
            }
            let method = self
                .program
                .method(method_id)
                .ok_or(crate::Error::MethodNotFound(method_id))?;
            let Some(body) = method.body() else {
                // Abstract reachable methods have no call sites.
                continue;
            };

            for stmt in body.stmts() {
                let Some(invoke) = stmt.as_invoke() else {
                    continue;
                };
                let site = CallSite::new(method_id, stmt.index());
                for callee in self.resolve(invoke) {
                    graph.add_edge(CallEdge::new(invoke.kind, site, callee));
                    worklist.push_back(callee);
                }
            }
        }

        debug!(
            methods = graph.method_count(),
            edges = graph.edge_count(),
            "CHA call graph built"
        );
        Ok(graph)
    }

    /// Resolves the possible targets of a call site via CHA.
    ///
    /// - `static` calls target the declared class's own method;
    /// - `special` calls dispatch from the declared class;
    /// - `virtual` and `interface` calls dispatch at every class in the
    ///   declared receiver's cone: transitive subclasses for classes,
    ///   transitive subinterfaces plus implementors for interfaces;
    /// - `dynamic` calls are not resolvable statically.
    ///
    /// Dispatch misses are dropped silently; the returned targets are
    /// deduplicated but keep cone-discovery order.
    #[must_use]
    pub fn resolve(&self, invoke: &InvokeExp) -> Vec<MethodId> {
        let declared = invoke.method_ref.class;
        let subsig = &invoke.method_ref.subsig;
        let mut targets = Vec::new();

        match invoke.kind {
            CallKind::Static => {
                if let Some(hierarchy_class) = self.program.hierarchy().class(declared) {
                    if let Some(m) = hierarchy_class.declared_method(subsig) {
                        targets.push(m);
                    }
                }
            }
            CallKind::Special => {
                if let Some(m) = self.dispatch(declared, subsig) {
                    targets.push(m);
                }
            }
            CallKind::Virtual | CallKind::Interface => {
                // BFS over the receiver cone.
                let hierarchy = self.program.hierarchy();
                let mut queue = VecDeque::new();
                queue.push_back(declared);
                let mut seen = vec![declared];

                while let Some(class_id) = queue.pop_front() {
                    if let Some(m) = self.dispatch(class_id, subsig) {
                        if !targets.contains(&m) {
                            targets.push(m);
                        }
                    }
                    let Some(class) = hierarchy.class(class_id) else {
                        continue;
                    };
                    let next: Vec<ClassId> = if class.is_interface() {
                        hierarchy
                            .direct_subinterfaces_of(class_id)
                            .iter()
                            .chain(hierarchy.direct_implementors_of(class_id))
                            .copied()
                            .collect()
                    } else {
                        hierarchy.direct_subclasses_of(class_id).to_vec()
                    };
                    for sub in next {
                        if !seen.contains(&sub) {
                            seen.push(sub);
                            queue.push_back(sub);
                        }
                    }
                }
            }
            CallKind::Dynamic => {}
        }

        targets
    }

    /// Looks up the dispatch target for `subsig` starting at `class`.
    ///
    /// Returns the class's own non-abstract declaration if present,
    /// otherwise recurses into the superclass chain; `None` when the
    /// chain runs out. Never returns an abstract method.
    #[must_use]
    pub fn dispatch(&self, class: ClassId, subsig: &Subsignature) -> Option<MethodId> {
        let mut current = Some(class);
        while let Some(class_id) = current {
            let class = self.program.hierarchy().class(class_id)?;
            if let Some(method_id) = class.declared_method(subsig) {
                if let Some(method) = self.program.method(method_id) {
                    if !method.is_abstract() {
                        return Some(method_id);
                    }
                }
            }
            current = class.superclass();
        }
        None
    }
}
