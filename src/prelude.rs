//! Convenient re-exports of the most commonly used types.
//!
//! Import this module to get the essential types for setting up a
//! program, running analyses, and reading their results.

pub use crate::{Error, Result};

// IR construction and access
pub use crate::ir::{
    BinaryOp, CallKind, Class, ClassFlags, ClassHierarchy, ClassId, Exp, InvokeExp, IrType,
    Method, MethodBody, MethodFlags, MethodId, MethodRef, PrimitiveType, Program, ProgramBuilder,
    ResultMap, Stmt, StmtKind, Subsignature, Var, VarId,
};

// Control flow graphs
pub use crate::analysis::cfg::{CfgEdgeKind, CfgNode, ControlFlowGraph, CFG_ID};

// Dataflow framework and analyses
pub use crate::analysis::dataflow::{
    ConstantPropagation, CpFact, CpValue, DataflowAnalysis, DataflowResult, Direction,
    IterativeSolver, LiveVariableAnalysis, MeetSemiLattice, SetFact, WorklistSolver,
};

// Interprocedural analysis
pub use crate::analysis::{
    callgraph::{CallEdge, CallGraph, CallSite, ChaBuilder},
    icfg::{Icfg, IcfgEdgeKind, IcfgNode},
    inter::{InterConstantPropagation, InterCpResult, InterDataflowAnalysis, InterSolver},
};

// Clients and drivers
pub use crate::analysis::{deadcode::DeadCodeDetection, driver};

// Graph utilities
pub use crate::utils::graph::NodeId;
