//! Control flow graph for a single method.
//!
//! The CFG's nodes are the method's statements plus a synthetic entry and
//! exit; edges are tagged with [`CfgEdgeKind`]. Hosts build the graph
//! through the constructor API and freeze it by publishing it into the
//! method's result map under [`CFG_ID`]; analyses then only read it.

use crate::{
    analysis::cfg::CfgEdgeKind,
    ir::MethodId,
    utils::graph::{DirectedGraph, NodeId},
    Result,
};

/// The analysis ID under which hosts store each method's CFG.
pub const CFG_ID: &str = "cfg";

/// A node of the control flow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfgNode {
    /// The synthetic entry node, preceding all statements.
    Entry,
    /// The synthetic exit node, following all returns.
    Exit,
    /// A statement node, carrying the statement's index.
    Stmt(usize),
}

impl CfgNode {
    /// Returns the statement index if this is a statement node.
    #[must_use]
    pub const fn stmt_index(&self) -> Option<usize> {
        match self {
            Self::Stmt(i) => Some(*i),
            _ => None,
        }
    }
}

/// The control flow graph of one method.
///
/// # Examples
///
/// ```rust
/// use flowscope::analysis::cfg::{CfgEdgeKind, ControlFlowGraph};
/// use flowscope::ir::MethodId;
///
/// // entry -> s0 -> exit
/// let mut cfg = ControlFlowGraph::new(MethodId::new(0));
/// let s0 = cfg.add_stmt(0);
/// cfg.add_edge(cfg.entry(), s0, CfgEdgeKind::Normal).unwrap();
/// cfg.add_edge(s0, cfg.exit(), CfgEdgeKind::Normal).unwrap();
///
/// assert_eq!(cfg.successors(cfg.entry()).collect::<Vec<_>>(), vec![s0]);
/// ```
#[derive(Debug)]
pub struct ControlFlowGraph {
    /// The underlying directed graph.
    graph: DirectedGraph<CfgNode, CfgEdgeKind>,
    /// The method this CFG belongs to.
    method: MethodId,
    /// The synthetic entry node.
    entry: NodeId,
    /// The synthetic exit node.
    exit: NodeId,
    /// Statement index to node ID, for dense O(1) lookup.
    stmt_nodes: Vec<Option<NodeId>>,
}

impl ControlFlowGraph {
    /// Creates an empty CFG for `method` containing only the synthetic
    /// entry and exit nodes.
    #[must_use]
    pub fn new(method: MethodId) -> Self {
        let mut graph = DirectedGraph::new();
        let entry = graph.add_node(CfgNode::Entry);
        let exit = graph.add_node(CfgNode::Exit);
        Self {
            graph,
            method,
            entry,
            exit,
            stmt_nodes: Vec::new(),
        }
    }

    /// Adds a node for the statement with the given index and returns its
    /// node ID. Adding the same index twice returns the existing node.
    pub fn add_stmt(&mut self, stmt_index: usize) -> NodeId {
        if let Some(Some(existing)) = self.stmt_nodes.get(stmt_index) {
            return *existing;
        }
        let node = self.graph.add_node(CfgNode::Stmt(stmt_index));
        if self.stmt_nodes.len() <= stmt_index {
            self.stmt_nodes.resize(stmt_index + 1, None);
        }
        self.stmt_nodes[stmt_index] = Some(node);
        node
    }

    /// Adds an edge between two existing nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`](crate::Error::GraphError) if either
    /// endpoint does not exist.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, kind: CfgEdgeKind) -> Result<()> {
        self.graph.add_edge(from, to, kind)
    }

    /// Returns the method this CFG belongs to.
    #[must_use]
    pub const fn method(&self) -> MethodId {
        self.method
    }

    /// Returns the synthetic entry node.
    #[must_use]
    pub const fn entry(&self) -> NodeId {
        self.entry
    }

    /// Returns the synthetic exit node.
    #[must_use]
    pub const fn exit(&self) -> NodeId {
        self.exit
    }

    /// Returns the number of nodes, including entry and exit.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the node payload for `node`, if it exists.
    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&CfgNode> {
        self.graph.node(node)
    }

    /// Returns the node for the statement with the given index, if one
    /// was added.
    #[must_use]
    pub fn stmt_node(&self, stmt_index: usize) -> Option<NodeId> {
        self.stmt_nodes.get(stmt_index).copied().flatten()
    }

    /// Returns the statement index of `node`, or `None` for entry/exit.
    #[must_use]
    pub fn stmt_index_of(&self, node: NodeId) -> Option<usize> {
        self.graph.node(node).and_then(CfgNode::stmt_index)
    }

    /// Returns an iterator over all node IDs.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_ids()
    }

    /// Returns an iterator over the successors of `node`.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.successors(node)
    }

    /// Returns an iterator over the predecessors of `node`.
    pub fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.predecessors(node)
    }

    /// Returns an iterator over the outgoing edges of `node` as
    /// `(target, kind)` pairs.
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, CfgEdgeKind)> + '_ {
        self.graph.outgoing_edges(node).map(|(t, k)| (t, *k))
    }

    /// Returns a reference to the underlying directed graph, for
    /// traversal utilities.
    #[must_use]
    pub const fn graph(&self) -> &DirectedGraph<CfgNode, CfgEdgeKind> {
        &self.graph
    }
}
