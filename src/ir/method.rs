//! Methods, method bodies, and method references.

use bitflags::bitflags;

use crate::ir::{ClassId, IrType, ResultMap, Stmt, StmtKind, Subsignature, VarId};
use crate::macros::index_type;

index_type! {
    /// A strongly-typed identifier for methods within a program.
    ///
    /// Assigned sequentially by the program builder; usable as a dense
    /// index.
    MethodId, "m"
}

bitflags! {
    /// Method attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodFlags: u8 {
        /// The method has no body; virtual dispatch never lands on it.
        const ABSTRACT = 1 << 0;
        /// The method dispatches statically.
        const STATIC = 1 << 1;
        /// The method cannot be overridden.
        const FINAL = 1 << 2;
    }
}

/// A local variable of a method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    /// Source-level name, for diagnostics.
    pub name: String,
    /// Declared type.
    pub ty: IrType,
}

/// A static reference to a method: its declared class plus subsignature.
///
/// Call sites carry a `MethodRef`; CHA resolution turns it into zero or
/// more concrete [`MethodId`] targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// The class the reference names (the static receiver type).
    pub class: ClassId,
    /// The referenced subsignature.
    pub subsig: Subsignature,
}

/// The body of a concrete method.
///
/// Owns the method's variables and statements, plus the per-method
/// [`ResultMap`] analyses publish into. Statement indices are dense and
/// equal each statement's position in `stmts`.
#[derive(Debug)]
pub struct MethodBody {
    /// Formal parameters, in declaration order.
    params: Vec<VarId>,
    /// All local variables, indexed by [`VarId`].
    vars: Vec<Var>,
    /// All statements, indexed by statement index.
    stmts: Vec<Stmt>,
    /// Analysis results published for this method.
    results: ResultMap,
}

impl MethodBody {
    /// Creates a method body from its variables, parameters, and
    /// statements.
    ///
    /// # Panics
    ///
    /// Panics if statement indices are not dense positions in `stmts`;
    /// the analyses index side tables by statement index and rely on this.
    #[must_use]
    pub fn new(vars: Vec<Var>, params: Vec<VarId>, stmts: Vec<Stmt>) -> Self {
        for (position, stmt) in stmts.iter().enumerate() {
            assert_eq!(
                stmt.index(),
                position,
                "statement indices must be dense and in order"
            );
        }
        Self {
            params,
            vars,
            stmts,
            results: ResultMap::new(),
        }
    }

    /// Returns the formal parameters, in declaration order.
    #[must_use]
    pub fn params(&self) -> &[VarId] {
        &self.params
    }

    /// Returns the variable table entry for `var`.
    #[must_use]
    pub fn var(&self, var: VarId) -> &Var {
        &self.vars[var.index()]
    }

    /// Returns the number of local variables.
    #[must_use]
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Returns the statements of this body.
    #[must_use]
    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    /// Returns the statement at `index`, if it exists.
    #[must_use]
    pub fn stmt(&self, index: usize) -> Option<&Stmt> {
        self.stmts.get(index)
    }

    /// Returns the number of statements.
    #[must_use]
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    /// Returns the variables returned by this body's `Return` statements.
    ///
    /// These are the return variables carried on interprocedural return
    /// edges.
    #[must_use]
    pub fn return_vars(&self) -> Vec<VarId> {
        self.stmts
            .iter()
            .filter_map(|s| match s.kind() {
                StmtKind::Return { var } => *var,
                _ => None,
            })
            .collect()
    }

    /// Returns the per-method analysis result map.
    #[must_use]
    pub fn results(&self) -> &ResultMap {
        &self.results
    }
}

/// A method of the program.
#[derive(Debug)]
pub struct Method {
    /// This method's identifier.
    id: MethodId,
    /// The declaring class.
    class: ClassId,
    /// Name and parameter/return types, excluding the declaring class.
    subsig: Subsignature,
    /// Attribute flags.
    flags: MethodFlags,
    /// The body; `None` for abstract methods.
    body: Option<MethodBody>,
}

impl Method {
    pub(crate) fn new(
        id: MethodId,
        class: ClassId,
        subsig: Subsignature,
        flags: MethodFlags,
        body: Option<MethodBody>,
    ) -> Self {
        Self {
            id,
            class,
            subsig,
            flags,
            body,
        }
    }

    /// Returns this method's identifier.
    #[must_use]
    pub const fn id(&self) -> MethodId {
        self.id
    }

    /// Returns the declaring class.
    #[must_use]
    pub const fn class(&self) -> ClassId {
        self.class
    }

    /// Returns the subsignature.
    #[must_use]
    pub const fn subsig(&self) -> &Subsignature {
        &self.subsig
    }

    /// Returns `true` if the method is abstract (has no body).
    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.flags.contains(MethodFlags::ABSTRACT)
    }

    /// Returns `true` if the method dispatches statically.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }

    /// Returns the body, if the method has one.
    #[must_use]
    pub const fn body(&self) -> Option<&MethodBody> {
        self.body.as_ref()
    }
}
