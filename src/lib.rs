// Copyright 2025-2026 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]

//! # flowscope
//!
//! A dataflow analysis core for a class-based, statically-typed,
//! bytecode-like intermediate representation. `flowscope` implements the
//! classical analyses (constant propagation, live variables, Class
//! Hierarchy Analysis call graphs, interprocedural constant propagation,
//! and dead-code detection) over a generic fixed-point solving
//! framework.
//!
//! # Architecture
//!
//! - **IR layer** ([`ir`]): the statement and expression sums, methods,
//!   classes, and the class hierarchy the analyses consume. Hosts build
//!   programs through [`ir::ProgramBuilder`] and per-method CFGs through
//!   [`analysis::cfg::ControlFlowGraph`]; everything is read-only once
//!   analysis starts.
//! - **Dataflow layer** ([`analysis::dataflow`]): the three-point
//!   constant lattice, fact containers, the [`analysis::dataflow::DataflowAnalysis`]
//!   capability record, and two solver strategies (worklist and
//!   iterative) that reach the same meet-over-paths fixpoint.
//! - **Interprocedural layer** ([`analysis::callgraph`],
//!   [`analysis::icfg`], [`analysis::inter`]): CHA call-graph
//!   construction, the ICFG stitched from per-method CFGs along call
//!   edges, and the interprocedural lift of constant propagation.
//! - **Clients** ([`analysis::deadcode`]): dead-code detection fusing
//!   constant and liveness facts.
//!
//! Results flow between analyses through string-ID-keyed
//! [`ir::ResultMap`]s on each method body and on the program; the
//! [`analysis::driver`] helpers run an analysis and publish its result in
//! one step.
//!
//! # Example
//!
//! ```rust
//! use flowscope::analysis::cfg::{CfgEdgeKind, ControlFlowGraph, CFG_ID};
//! use flowscope::analysis::dataflow::{ConstantPropagation, CpValue, WorklistSolver};
//! use flowscope::ir::{Exp, IrType, MethodBody, Stmt, StmtKind, Var, VarId};
//! use flowscope::ir::MethodId;
//!
//! // x = 7
//! let body = MethodBody::new(
//!     vec![Var { name: "x".into(), ty: IrType::int() }],
//!     Vec::new(),
//!     vec![Stmt::new(0, 1, StmtKind::Assign {
//!         lhs: VarId::new(0),
//!         rhs: Exp::IntLiteral(7),
//!     })],
//! );
//! let mut cfg = ControlFlowGraph::new(MethodId::new(0));
//! let s0 = cfg.add_stmt(0);
//! cfg.add_edge(cfg.entry(), s0, CfgEdgeKind::Normal)?;
//! cfg.add_edge(s0, cfg.exit(), CfgEdgeKind::Normal)?;
//!
//! let cp = ConstantPropagation::new(&body);
//! let result = WorklistSolver::solve(&cp, &cfg)?;
//! assert_eq!(result.out_fact(s0).get(VarId::new(0)), CpValue::Const(7));
//! # Ok::<(), flowscope::Error>(())
//! ```

pub mod analysis;
pub mod ir;
pub mod prelude;
pub mod utils;

pub(crate) mod error;
pub(crate) mod macros;

/// The result type used throughout this library.
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
