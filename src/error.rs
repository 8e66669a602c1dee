use thiserror::Error;

use crate::ir::{ClassId, MethodId};

/// The generic Error type covering all failures this library can return.
///
/// The analysis core operates on well-typed inputs; most variants indicate a
/// violated precondition rather than a recoverable condition. A failed
/// analysis never produces a partial result and never corrupts results
/// already stored for other methods.
///
/// Two conditions are deliberately *not* errors:
///
/// - Divide-by-zero during abstract evaluation folds to the `Undef` lattice
///   value.
/// - A dispatch miss during call-graph construction silently drops the
///   unresolvable target from the edge set.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested solver strategy does not support the analysis direction.
    ///
    /// Rejected at solver-selection time, before any iteration happens.
    #[error("This solver strategy does not support the requested direction")]
    NotSupported,

    /// Parameter/argument arity mismatch on an interprocedural call edge.
    ///
    /// The ICFG connected a call site to a callee whose formal parameter
    /// count differs from the call's argument count. This is a malformed
    /// input; the interprocedural analysis aborts without a result.
    #[error("Call edge arity mismatch at statement {call_site}: callee expects {expected} parameters, call passes {actual}")]
    ArityMismatch {
        /// Index of the offending call-site statement.
        call_site: usize,
        /// Formal parameter count of the callee.
        expected: usize,
        /// Argument count at the call site.
        actual: usize,
    },

    /// A graph construction or query referenced a node or edge that does
    /// not exist.
    #[error("{0}")]
    GraphError(String),

    /// A required prerequisite analysis result was not found.
    ///
    /// Analyses fetch their inputs from the result map by ID (for example
    /// dead-code detection requires "constprop" and "livevar" results).
    /// The associated value names the missing ID.
    #[error("Required analysis result '{0}' has not been computed")]
    MissingResult(&'static str),

    /// A method ID did not resolve in the program.
    #[error("Method {0} not found in program")]
    MethodNotFound(MethodId),

    /// A class ID did not resolve in the class hierarchy.
    #[error("Class {0} not found in hierarchy")]
    ClassNotFound(ClassId),

    /// A method required to carry a body (for CFG or IR scanning) is
    /// abstract or otherwise bodyless.
    #[error("Method {0} has no body")]
    MissingBody(MethodId),
}
