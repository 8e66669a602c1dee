//! Node identifier for directed graphs.

use crate::macros::index_type;

index_type! {
    /// A strongly-typed identifier for nodes within a directed graph.
    ///
    /// Node IDs are assigned sequentially starting from 0 when nodes are
    /// added to a graph, so they double as positions into per-node side
    /// tables such as the IN/OUT fact vectors of a
    /// [`DataflowResult`](crate::analysis::dataflow::DataflowResult).
    NodeId, "n"
}
