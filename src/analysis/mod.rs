//! Program analysis: CFGs, dataflow solving, call graphs, and the
//! analyses built on them.
//!
//! # Analysis IDs
//!
//! Every analysis is keyed by a string ID, used both to publish its
//! result into the owning [`ResultMap`](crate::ir::ResultMap) and to
//! fetch prerequisite results:
//!
//! | ID                 | Result type                               | Scope   |
//! |--------------------|-------------------------------------------|---------|
//! | `"cfg"`            | [`cfg::ControlFlowGraph`]                 | method  |
//! | `"constprop"`      | `DataflowResult<CpFact>`                  | method  |
//! | `"livevar"`        | `DataflowResult<SetFact<VarId>>`          | method  |
//! | `"deadcode"`       | `BTreeSet<usize>`                         | method  |
//! | `"cha"`            | [`callgraph::CallGraph`]                  | program |
//! | `"inter-constprop"`| [`inter::InterCpResult`]                  | program |
//!
//! The driver helpers in [`driver`] run each analysis and do the
//! publishing; a host registry maps IDs to those entry points.

pub mod callgraph;
pub mod cfg;
pub mod dataflow;
pub mod deadcode;
pub mod driver;
pub mod icfg;
pub mod inter;

pub use deadcode::DeadCodeDetection;
