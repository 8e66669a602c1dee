//! Crate-internal helper macros.

/// Defines a dense index newtype.
///
/// Every identifier in the crate (graph nodes, variables, methods,
/// classes) is a dense index into some owning table, assigned in
/// insertion order. This macro stamps out the newtype so they all carry
/// the same accessors and a short display prefix, while staying distinct
/// types that cannot be mixed up.
macro_rules! index_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// Creates an identifier from a raw index value.
            #[must_use]
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the raw index value, usable as a position in
            /// dense per-entity side tables.
            #[must_use]
            #[inline]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

pub(crate) use index_type;
