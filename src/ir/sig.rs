//! Method subsignatures.

use std::fmt;

use crate::ir::IrType;

/// A method subsignature: name plus parameter and return types, excluding
/// the declaring class.
///
/// Two methods in different classes with equal subsignatures are
/// override-related candidates; virtual dispatch matches on subsignature
/// equality while walking the class hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subsignature {
    /// Method name.
    pub name: String,
    /// Parameter types, in order.
    pub params: Vec<IrType>,
    /// Return type.
    pub ret: IrType,
}

impl Subsignature {
    /// Creates a new subsignature.
    #[must_use]
    pub fn new(name: impl Into<String>, params: Vec<IrType>, ret: IrType) -> Self {
        Self {
            name: name.into(),
            params,
            ret,
        }
    }
}

impl fmt::Display for Subsignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.ret, self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ")")
    }
}
