//! Interprocedural dataflow analysis over the ICFG.

mod constprop;
mod framework;
mod solver;

pub use constprop::{InterConstantPropagation, InterCpResult};
pub use framework::InterDataflowAnalysis;
pub use solver::InterSolver;
