//! Call-graph construction via Class Hierarchy Analysis.

mod cha;
mod graph;
mod site;

pub use cha::ChaBuilder;
pub use graph::CallGraph;
pub use site::{CallEdge, CallSite};
