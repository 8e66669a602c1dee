//! Core directed graph implementation.
//!
//! [`DirectedGraph`] is the shared substrate for the control-flow graph,
//! the call graph, and the interprocedural CFG. It stores typed node and
//! edge data in contiguous vectors with adjacency lists in both directions,
//! giving O(1) node/edge access and cheap successor/predecessor iteration.
//!
//! Graphs are built single-threaded and then used immutably; the structure
//! is [`Send`] and [`Sync`] when its node and edge types are.

use crate::{utils::graph::NodeId, Error, Result};

/// Internal storage for edge data and endpoints.
#[derive(Debug, Clone)]
struct EdgeData<E> {
    /// Source node of the edge.
    source: NodeId,
    /// Target node of the edge.
    target: NodeId,
    /// User-provided edge data.
    data: E,
}

/// A directed graph with typed node and edge data.
///
/// # Examples
///
/// ```rust
/// use flowscope::utils::graph::DirectedGraph;
///
/// let mut graph: DirectedGraph<&str, i32> = DirectedGraph::new();
/// let a = graph.add_node("A");
/// let b = graph.add_node("B");
/// graph.add_edge(a, b, 10).unwrap();
///
/// assert_eq!(graph.node_count(), 2);
/// let succs: Vec<_> = graph.successors(a).collect();
/// assert_eq!(succs, vec![b]);
/// ```
#[derive(Debug, Clone)]
pub struct DirectedGraph<N, E> {
    /// Node data storage, indexed by `NodeId`.
    nodes: Vec<N>,
    /// Edge data storage.
    edges: Vec<EdgeData<E>>,
    /// Outgoing edge indices per node.
    outgoing: Vec<Vec<usize>>,
    /// Incoming edge indices per node.
    incoming: Vec<Vec<usize>>,
}

impl<N, E> Default for DirectedGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> DirectedGraph<N, E> {
    /// Creates a new empty directed graph.
    #[must_use]
    pub fn new() -> Self {
        DirectedGraph {
            nodes: Vec::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Adds a new node with the given data to the graph.
    ///
    /// The node is assigned the next sequential `NodeId`, starting from 0.
    pub fn add_node(&mut self, data: N) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(data);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Adds a directed edge from `source` to `target` carrying `data`.
    ///
    /// Parallel edges are permitted; callers that need edge uniqueness must
    /// check before inserting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`] if either endpoint does not exist.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, data: E) -> Result<()> {
        if source.index() >= self.nodes.len() {
            return Err(Error::GraphError(format!(
                "edge source {source} does not exist"
            )));
        }
        if target.index() >= self.nodes.len() {
            return Err(Error::GraphError(format!(
                "edge target {target} does not exist"
            )));
        }

        let edge_idx = self.edges.len();
        self.edges.push(EdgeData {
            source,
            target,
            data,
        });
        self.outgoing[source.index()].push(edge_idx);
        self.incoming[target.index()].push(edge_idx);
        Ok(())
    }

    /// Returns a reference to the data associated with the given node.
    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&N> {
        self.nodes.get(node.index())
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all node identifiers, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Returns an iterator over the successors of a node.
    ///
    /// A node appears once per outgoing edge, so parallel edges yield
    /// repeated successors.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing
            .get(node.index())
            .into_iter()
            .flatten()
            .map(|&e| self.edges[e].target)
    }

    /// Returns an iterator over the predecessors of a node.
    pub fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incoming
            .get(node.index())
            .into_iter()
            .flatten()
            .map(|&e| self.edges[e].source)
    }

    /// Returns an iterator over the outgoing edges of a node as
    /// `(target, &edge_data)` pairs.
    pub fn outgoing_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &E)> + '_ {
        self.outgoing
            .get(node.index())
            .into_iter()
            .flatten()
            .map(|&e| (self.edges[e].target, &self.edges[e].data))
    }

    /// Returns an iterator over the incoming edges of a node as
    /// `(source, &edge_data)` pairs.
    pub fn incoming_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &E)> + '_ {
        self.incoming
            .get(node.index())
            .into_iter()
            .flatten()
            .map(|&e| (self.edges[e].source, &self.edges[e].data))
    }
}
