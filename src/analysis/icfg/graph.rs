//! ICFG construction and representation.
//!
//! The ICFG is the union of every reachable method's CFG, re-indexed into
//! one global node space, stitched together along call-graph edges:
//!
//! - intra edges become [`Normal`](IcfgEdgeKind::Normal) edges, except
//!   the out-edges of call sites, which become
//!   [`CallToReturn`](IcfgEdgeKind::CallToReturn) edges to the call's
//!   return sites;
//! - each resolved callee adds a [`Call`](IcfgEdgeKind::Call) edge into
//!   its entry node and [`Return`](IcfgEdgeKind::Return) edges from its
//!   exit node back to the return sites, carrying the callee's return
//!   variables.
//!
//! The call site's own OUT fact therefore reaches its return site only
//! through the call-to-return edge, and the called method's return value
//! only through the return edges.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    analysis::{
        callgraph::{CallGraph, CallSite},
        cfg::{ControlFlowGraph, CFG_ID},
        icfg::IcfgEdgeKind,
    },
    ir::{MethodId, Program},
    utils::graph::{DirectedGraph, NodeId},
    Error, Result,
};

/// An ICFG node: a CFG node of one reachable method, re-indexed globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcfgNode {
    /// The containing method.
    pub method: MethodId,
    /// The node's ID within the method's own CFG.
    pub local: NodeId,
    /// The statement index, or `None` for the synthetic entry/exit.
    pub stmt: Option<usize>,
    /// Whether the node is a call site.
    pub is_call: bool,
}

/// The interprocedural control-flow graph.
#[derive(Debug)]
pub struct Icfg {
    /// The stitched graph over global node IDs.
    graph: DirectedGraph<IcfgNode, IcfgEdgeKind>,
    /// Global entry nodes: the CFG entries of the program's entry
    /// methods.
    entry_nodes: Vec<NodeId>,
    /// Local-to-global node translation per method.
    node_map: FxHashMap<(MethodId, NodeId), NodeId>,
}

impl Icfg {
    /// Builds the ICFG for every method reachable in `call_graph`.
    ///
    /// Each reachable method must have published its CFG under
    /// [`CFG_ID`] in its body's result map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingResult`] if a reachable method has no
    /// stored CFG, or [`Error::MethodNotFound`] for a dangling method ID.
    pub fn build(program: &Program, call_graph: &CallGraph) -> Result<Self> {
        let mut graph: DirectedGraph<IcfgNode, IcfgEdgeKind> = DirectedGraph::new();
        let mut node_map: FxHashMap<(MethodId, NodeId), NodeId> = FxHashMap::default();

        // Pass 1: import every reachable method's nodes.
        let mut cfgs: Vec<(MethodId, std::sync::Arc<ControlFlowGraph>)> = Vec::new();
        for &method_id in call_graph.reachable_methods() {
            let method = program
                .method(method_id)
                .ok_or(Error::MethodNotFound(method_id))?;
            let Some(body) = method.body() else {
                continue;
            };
            let cfg = body
                .results()
                .get::<ControlFlowGraph>(CFG_ID)
                .ok_or(Error::MissingResult(CFG_ID))?;

            for local in cfg.node_ids() {
                let stmt = cfg.stmt_index_of(local);
                let is_call = stmt
                    .and_then(|i| body.stmt(i))
                    .is_some_and(crate::ir::Stmt::is_call);
                let global = graph.add_node(IcfgNode {
                    method: method_id,
                    local,
                    stmt,
                    is_call,
                });
                node_map.insert((method_id, local), global);
            }
            cfgs.push((method_id, cfg));
        }

        // Pass 2: intra edges. Out-edges of call sites become
        // call-to-return edges; everything else is normal.
        for (method_id, cfg) in &cfgs {
            for local in cfg.node_ids() {
                let source = node_map[&(*method_id, local)];
                let call_site = if graph.node(source).is_some_and(|n| n.is_call) {
                    cfg.stmt_index_of(local)
                        .map(|i| CallSite::new(*method_id, i))
                } else {
                    None
                };
                for (target_local, _kind) in cfg.out_edges(local) {
                    let target = node_map[&(*method_id, target_local)];
                    let kind = match call_site {
                        Some(site) => IcfgEdgeKind::CallToReturn { call_site: site },
                        None => IcfgEdgeKind::Normal,
                    };
                    graph.add_edge(source, target, kind)?;
                }
            }
        }

        // Pass 3: interprocedural edges along resolved calls.
        for edge in call_graph.edges() {
            let site = edge.call_site;
            let Some(callee_body) = program
                .method(edge.callee)
                .and_then(crate::ir::Method::body)
            else {
                continue;
            };
            let callee_cfg = callee_body
                .results()
                .get::<ControlFlowGraph>(CFG_ID)
                .ok_or(Error::MissingResult(CFG_ID))?;

            let Some((_, caller_cfg)) = cfgs.iter().find(|(m, _)| *m == site.method) else {
                continue;
            };
            let Some(call_local) = caller_cfg.stmt_node(site.stmt) else {
                continue;
            };
            let call_global = node_map[&(site.method, call_local)];
            let callee_entry = node_map[&(edge.callee, callee_cfg.entry())];
            let callee_exit = node_map[&(edge.callee, callee_cfg.exit())];

            graph.add_edge(
                call_global,
                callee_entry,
                IcfgEdgeKind::Call {
                    call_site: site,
                    callee: edge.callee,
                },
            )?;

            let return_vars = callee_body.return_vars();
            for return_site_local in caller_cfg.successors(call_local) {
                let return_site = node_map[&(site.method, return_site_local)];
                graph.add_edge(
                    callee_exit,
                    return_site,
                    IcfgEdgeKind::Return {
                        call_site: site,
                        return_vars: return_vars.clone(),
                    },
                )?;
            }
        }

        // Global entries: the CFG entries of the entry methods.
        let mut entry_nodes = Vec::new();
        for &entry in call_graph.entries() {
            if let Some((_, cfg)) = cfgs.iter().find(|(m, _)| *m == entry) {
                entry_nodes.push(node_map[&(entry, cfg.entry())]);
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            methods = cfgs.len(),
            "ICFG built"
        );

        Ok(Self {
            graph,
            entry_nodes,
            node_map,
        })
    }

    /// Returns the number of global nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the node payload for a global node ID.
    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&IcfgNode> {
        self.graph.node(node)
    }

    /// Returns an iterator over all global node IDs.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_ids()
    }

    /// Returns the global entry nodes of the entry methods.
    #[must_use]
    pub fn entry_nodes(&self) -> &[NodeId] {
        &self.entry_nodes
    }

    /// Translates a method-local CFG node to its global ID.
    #[must_use]
    pub fn global_node(&self, method: MethodId, local: NodeId) -> Option<NodeId> {
        self.node_map.get(&(method, local)).copied()
    }

    /// Returns the incoming edges of `node` as `(source, kind)` pairs.
    pub fn in_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &IcfgEdgeKind)> + '_ {
        self.graph.incoming_edges(node)
    }

    /// Returns the outgoing edges of `node` as `(target, kind)` pairs.
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &IcfgEdgeKind)> + '_ {
        self.graph.outgoing_edges(node)
    }

    /// Returns the successors of `node`.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.successors(node)
    }
}
