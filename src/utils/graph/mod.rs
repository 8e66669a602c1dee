//! Generic directed graph infrastructure.
//!
//! The control-flow graph and the interprocedural CFG wrap a
//! [`DirectedGraph`] and expose domain-specific accessors on top; the
//! traversal orders seed the solvers' worklists, and [`NodeSet`] is the
//! membership bitmap those traversals and worklists dedup with.

mod directed;
mod node;
mod nodeset;
mod traversal;

pub use directed::DirectedGraph;
pub use node::NodeId;
pub use nodeset::NodeSet;
pub use traversal::{postorder, reverse_postorder};
