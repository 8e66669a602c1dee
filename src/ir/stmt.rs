//! Statement forms of the IR.
//!
//! Statements are three-address: at most one defined variable per
//! statement. Control-flow targets are not stored on the statements
//! themselves; the host-provided [`ControlFlowGraph`](crate::analysis::cfg::ControlFlowGraph)
//! carries branch edges tagged with their kinds.

use crate::ir::{Exp, InvokeExp, VarId};

/// The payload of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    /// `lhs = rhs`.
    Assign {
        /// The defined variable.
        lhs: VarId,
        /// The right-hand side expression.
        rhs: Exp,
    },
    /// A call statement, optionally binding its result: `[r =] m(args)`.
    Invoke {
        /// The variable bound to the return value, if any.
        result: Option<VarId>,
        /// The invocation.
        exp: InvokeExp,
    },
    /// A conditional branch on `cond`; the CFG carries the true/false
    /// edges.
    If {
        /// The branch condition, conventionally a comparison expression.
        cond: Exp,
    },
    /// A table switch on `var`; the CFG carries case and default edges.
    Switch {
        /// The switched variable.
        var: VarId,
    },
    /// Return from the method, optionally with a value.
    Return {
        /// The returned variable, if the method returns a value.
        var: Option<VarId>,
    },
    /// No operation. Also used for lowered gotos, whose targets live in
    /// the CFG.
    Nop,
}

/// A statement of a method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    /// Dense index of this statement within its method.
    index: usize,
    /// Source line number; non-positive when synthetic.
    line: i32,
    /// The statement payload.
    kind: StmtKind,
}

impl Stmt {
    /// Creates a new statement.
    #[must_use]
    pub const fn new(index: usize, line: i32, kind: StmtKind) -> Self {
        Self { index, line, kind }
    }

    /// Returns the dense index of this statement within its method.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the source line number, or a non-positive value for
    /// synthetic statements.
    #[must_use]
    pub const fn line(&self) -> i32 {
        self.line
    }

    /// Returns the statement payload.
    #[must_use]
    pub const fn kind(&self) -> &StmtKind {
        &self.kind
    }

    /// Returns the variable defined by this statement, if any.
    ///
    /// The IR is three-address, so there is at most one.
    #[must_use]
    pub fn def(&self) -> Option<VarId> {
        match &self.kind {
            StmtKind::Assign { lhs, .. } => Some(*lhs),
            StmtKind::Invoke { result, .. } => *result,
            _ => None,
        }
    }

    /// Returns the variables read by this statement.
    #[must_use]
    pub fn uses(&self) -> Vec<VarId> {
        let mut uses = Vec::new();
        match &self.kind {
            StmtKind::Assign { rhs, .. } => rhs.collect_uses(&mut uses),
            StmtKind::Invoke { exp, .. } => uses.extend_from_slice(&exp.args),
            StmtKind::If { cond } => cond.collect_uses(&mut uses),
            StmtKind::Switch { var } => uses.push(*var),
            StmtKind::Return { var } => {
                if let Some(v) = var {
                    uses.push(*v);
                }
            }
            StmtKind::Nop => {}
        }
        uses
    }

    /// Returns the invocation payload if this is a call statement.
    #[must_use]
    pub const fn as_invoke(&self) -> Option<&InvokeExp> {
        match &self.kind {
            StmtKind::Invoke { exp, .. } => Some(exp),
            _ => None,
        }
    }

    /// Returns `true` if this statement is a call.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(self.kind, StmtKind::Invoke { .. })
    }

    /// Returns `true` if this statement is a conditional branch.
    #[must_use]
    pub const fn is_if(&self) -> bool {
        matches!(self.kind, StmtKind::If { .. })
    }

    /// Returns `true` if this statement is a switch.
    #[must_use]
    pub const fn is_switch(&self) -> bool {
        matches!(self.kind, StmtKind::Switch { .. })
    }
}
