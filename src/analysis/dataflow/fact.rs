//! Fact containers for dataflow analysis.
//!
//! [`CpFact`] maps variables to [`CpValue`]s with the convention that an
//! absent key denotes `Undef`. The convention is load-bearing: default
//! entries are never materialized, so lattice-height bounds depend only on
//! the variables an analysis actually touches.
//!
//! [`SetFact`] is the unordered-set fact used by may-analyses such as
//! live variables.

use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    analysis::dataflow::{CpValue, MeetSemiLattice},
    ir::VarId,
};

/// A constant-propagation fact: variable → abstract value.
///
/// The single mutation entry point is [`update`](Self::update), which
/// both stores and reports change; solvers drive their fixpoint tests off
/// that return value. Updating a variable to `Undef` removes its entry,
/// keeping absent-means-bottom intact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CpFact {
    map: FxHashMap<VarId, CpValue>,
}

impl CpFact {
    /// Creates an empty (all-`Undef`) fact.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value recorded for `var`, or `Undef` if absent.
    #[must_use]
    pub fn get(&self, var: VarId) -> CpValue {
        self.map.get(&var).copied().unwrap_or_default()
    }

    /// Stores `value` for `var` and returns whether the fact changed.
    ///
    /// Storing `Undef` removes the entry; storing the already-present
    /// value is a no-op returning `false`.
    pub fn update(&mut self, var: VarId, value: CpValue) -> bool {
        if value.is_undef() {
            return self.map.remove(&var).is_some();
        }
        match self.map.insert(var, value) {
            Some(old) => old != value,
            None => true,
        }
    }

    /// Removes the entry for `var`, returning its previous value if any.
    pub fn remove(&mut self, var: VarId) -> Option<CpValue> {
        self.map.remove(&var)
    }

    /// Meets every entry of `self` into `target`, returning whether
    /// `target` changed.
    ///
    /// For each key present in `self`, `target[k]` becomes
    /// `meet(target[k], self[k])`. Keys absent from `self` are untouched,
    /// which is correct because absent means `Undef` and `Undef` is the
    /// meet identity.
    pub fn meet_into(&self, target: &mut CpFact) -> bool {
        let mut changed = false;
        for (&var, &value) in &self.map {
            let met = target.get(var).meet(&value);
            changed |= target.update(var, met);
        }
        changed
    }

    /// Returns an iterator over the present entries.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, CpValue)> + '_ {
        self.map.iter().map(|(&v, &val)| (v, val))
    }

    /// Returns the number of present (non-`Undef`) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no entry is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl MeetSemiLattice for CpFact {
    fn meet(&self, other: &Self) -> Self {
        let mut result = self.clone();
        other.meet_into(&mut result);
        result
    }
}

/// An unordered-set fact.
///
/// Supports the operations may-analyses need: union (the meet), set
/// difference, and membership. The in-place variants report whether the
/// receiver changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetFact<T: Eq + Hash + Clone> {
    items: FxHashSet<T>,
}

impl<T: Eq + Hash + Clone> SetFact<T> {
    /// Creates an empty set fact.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: FxHashSet::default(),
        }
    }

    /// Returns `true` if `item` is in the set.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Inserts `item`, returning whether the set changed.
    pub fn insert(&mut self, item: T) -> bool {
        self.items.insert(item)
    }

    /// Removes `item`, returning whether the set changed.
    pub fn remove(&mut self, item: &T) -> bool {
        self.items.remove(item)
    }

    /// Unions `other` into `self`, returning whether `self` changed.
    pub fn union_with(&mut self, other: &Self) -> bool {
        let before = self.items.len();
        self.items.extend(other.items.iter().cloned());
        self.items.len() != before
    }

    /// Removes every element of `other` from `self`, returning whether
    /// `self` changed.
    pub fn difference_with(&mut self, other: &Self) -> bool {
        let before = self.items.len();
        for item in &other.items {
            self.items.remove(item);
        }
        self.items.len() != before
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Eq + Hash + Clone + std::fmt::Debug> MeetSemiLattice for SetFact<T> {
    /// Meet is union: an element is in the combined fact if it is in the
    /// fact of any incoming path.
    fn meet(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.union_with(other);
        result
    }
}
