//! The intermediate representation consumed by the analyses.
//!
//! The IR is class-based, statically typed, and three-address: every
//! statement defines at most one variable, and compound expressions take
//! variables as operands. Construction from source or bytecode is the
//! host's job, done through [`ProgramBuilder`] and the per-method
//! [`MethodBody`] constructor; everything here is read-only once analyses
//! run.
//!
//! # Structure
//!
//! - [`Program`]: classes, methods, entry methods, program-level results
//! - [`ClassHierarchy`] / [`Class`]: inheritance queries behind CHA
//! - [`Method`] / [`MethodBody`]: statements, variables, per-method
//!   results
//! - [`Stmt`] / [`Exp`]: the statement and expression sums the analyses
//!   dispatch over
//! - [`ResultMap`]: string-ID-keyed storage analyses publish into

mod class;
mod exp;
mod method;
mod program;
mod results;
mod sig;
mod stmt;
mod types;
mod var;

pub use class::{Class, ClassFlags, ClassHierarchy, ClassId};
pub use exp::{BinaryOp, CallKind, Exp, InvokeExp};
pub use method::{Method, MethodBody, MethodFlags, MethodId, MethodRef, Var};
pub use program::{Program, ProgramBuilder};
pub use results::ResultMap;
pub use sig::Subsignature;
pub use stmt::{Stmt, StmtKind};
pub use types::{IrType, PrimitiveType};
pub use var::VarId;
