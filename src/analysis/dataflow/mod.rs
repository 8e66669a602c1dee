//! Intraprocedural dataflow analysis.
//!
//! This module hosts the lattice and fact containers, the
//! [`DataflowAnalysis`] capability record, the two fixed-point solvers,
//! and the concrete analyses built on them:
//!
//! - [`ConstantPropagation`]: forward, over [`CpFact`] maps
//! - [`LiveVariableAnalysis`]: backward, over [`SetFact`] sets
//!
//! The typical flow is: construct the analysis over a method body, hand
//! it with the method's CFG to a solver, and publish the returned
//! [`DataflowResult`] into the method's result map under the analysis ID.

mod constprop;
mod fact;
mod framework;
mod lattice;
mod liveness;
mod solver;

pub use constprop::ConstantPropagation;
pub use fact::{CpFact, SetFact};
pub use framework::{DataflowAnalysis, DataflowResult, Direction};
pub use lattice::{CpValue, MeetSemiLattice};
pub use liveness::LiveVariableAnalysis;
pub use solver::{IterativeSolver, WorklistSolver};
