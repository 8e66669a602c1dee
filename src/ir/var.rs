//! Variable identifiers.

use crate::macros::index_type;

index_type! {
    /// A strongly-typed identifier for local variables within a method.
    ///
    /// Variable IDs are dense per-method indices into the body's variable
    /// table, which lets set-valued facts and liveness results use them
    /// as array indices.
    VarId, "v"
}
