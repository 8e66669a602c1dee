//! Lattice values for dataflow analysis.
//!
//! The constant-propagation domain is a three-point lattice per variable:
//!
//! ```text
//!            Nac              (top: not a constant, absorbs)
//!          /  |  \
//!   Const(c1) ... Const(cn)
//!          \  |  /
//!           Undef             (bottom: no information yet)
//! ```
//!
//! Meets move values *up* this lattice (`Undef ⊑ Const(c) ⊑ Nac`, distinct
//! constants join to `Nac`), so every ascending chain has length at most
//! three and fixpoint iteration terminates.

use std::fmt;
use std::fmt::Debug;

/// A meet semi-lattice.
///
/// The meet operation combines information from multiple control-flow
/// paths at a confluence point. It must be idempotent, commutative, and
/// associative; the solvers rely on nothing else.
pub trait MeetSemiLattice: Clone + Debug + PartialEq {
    /// Computes the meet of two lattice elements.
    #[must_use]
    fn meet(&self, other: &Self) -> Self;
}

/// The abstract value of one integer variable.
///
/// This is an explicit tagged union; `Undef` and `Nac` must stay
/// distinguishable in meets, which a nullable integer cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CpValue {
    /// Bottom: no information about the variable yet.
    #[default]
    Undef,
    /// The variable holds exactly this integer.
    Const(i32),
    /// Top: the variable is not a constant.
    Nac,
}

impl CpValue {
    /// Returns `true` if this is the bottom element.
    #[must_use]
    pub const fn is_undef(&self) -> bool {
        matches!(self, Self::Undef)
    }

    /// Returns `true` if this is a known constant.
    #[must_use]
    pub const fn is_const(&self) -> bool {
        matches!(self, Self::Const(_))
    }

    /// Returns `true` if this is the top element.
    #[must_use]
    pub const fn is_nac(&self) -> bool {
        matches!(self, Self::Nac)
    }

    /// Returns the constant if this is a `Const` value.
    #[must_use]
    pub const fn as_const(&self) -> Option<i32> {
        match self {
            Self::Const(c) => Some(*c),
            _ => None,
        }
    }
}

impl MeetSemiLattice for CpValue {
    /// The meet table:
    ///
    /// - `meet(x, Undef) = x` (bottom is the identity)
    /// - `meet(x, Nac) = Nac` (top absorbs)
    /// - `meet(Const(c), Const(c)) = Const(c)`
    /// - `meet(Const(c), Const(d)) = Nac` for `c != d`
    fn meet(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Undef, x) | (x, Self::Undef) => *x,
            (Self::Nac, _) | (_, Self::Nac) => Self::Nac,
            (Self::Const(a), Self::Const(b)) => {
                if a == b {
                    Self::Const(*a)
                } else {
                    Self::Nac
                }
            }
        }
    }
}

impl fmt::Display for CpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undef => write!(f, "UNDEF"),
            Self::Const(c) => write!(f, "#{c}"),
            Self::Nac => write!(f, "NAC"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [CpValue; 5] = [
        CpValue::Undef,
        CpValue::Const(0),
        CpValue::Const(1),
        CpValue::Const(-7),
        CpValue::Nac,
    ];

    #[test]
    fn test_meet_table() {
        let c5 = CpValue::Const(5);
        let c7 = CpValue::Const(7);

        assert_eq!(CpValue::Undef.meet(&c5), c5);
        assert_eq!(c5.meet(&CpValue::Undef), c5);
        assert_eq!(c5.meet(&CpValue::Nac), CpValue::Nac);
        assert_eq!(CpValue::Nac.meet(&CpValue::Undef), CpValue::Nac);
        assert_eq!(c5.meet(&c5), c5);
        assert_eq!(c5.meet(&c7), CpValue::Nac);
        assert_eq!(CpValue::Undef.meet(&CpValue::Undef), CpValue::Undef);
    }

    #[test]
    fn test_meet_commutative() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(a.meet(&b), b.meet(&a), "meet({a}, {b})");
            }
        }
    }

    #[test]
    fn test_meet_associative() {
        for a in SAMPLES {
            for b in SAMPLES {
                for c in SAMPLES {
                    assert_eq!(
                        a.meet(&b.meet(&c)),
                        a.meet(&b).meet(&c),
                        "meet({a}, {b}, {c})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_meet_idempotent() {
        for a in SAMPLES {
            assert_eq!(a.meet(&a), a);
        }
    }

    #[test]
    fn test_predicates() {
        assert!(CpValue::Undef.is_undef());
        assert!(CpValue::Const(3).is_const());
        assert!(CpValue::Nac.is_nac());
        assert_eq!(CpValue::Const(3).as_const(), Some(3));
        assert_eq!(CpValue::Nac.as_const(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CpValue::Undef.to_string(), "UNDEF");
        assert_eq!(CpValue::Const(42).to_string(), "#42");
        assert_eq!(CpValue::Nac.to_string(), "NAC");
    }
}
