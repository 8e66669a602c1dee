//! Per-method control flow graphs.

mod edge;
mod graph;

pub use edge::CfgEdgeKind;
pub use graph::{CfgNode, ControlFlowGraph, CFG_ID};
