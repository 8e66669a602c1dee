//! Dense node sets.
//!
//! Traversals, solver worklists, and the dead-code walk all track
//! membership over node IDs, which are dense small integers. [`NodeSet`]
//! packs membership into machine words and grows on demand, so callers
//! never have to size it to the graph up front, and insertion doubles as
//! the membership test the worklists key off.

use std::fmt;

use crate::utils::graph::NodeId;

const WORD_BITS: usize = usize::BITS as usize;

/// A growable set of graph nodes backed by a word-packed bitmap.
///
/// The two operations the analyses lean on are [`insert`](Self::insert),
/// which reports whether the node was new (one call replaces the usual
/// contains-then-mark pair), and [`remove`](Self::remove), which lets a
/// worklist clear membership as it pops.
#[derive(Default)]
pub struct NodeSet {
    words: Vec<usize>,
}

impl NodeSet {
    /// Creates an empty node set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits a node into its word position and bit mask.
    fn slot(node: NodeId) -> (usize, usize) {
        let index = node.index();
        (index / WORD_BITS, 1 << (index % WORD_BITS))
    }

    /// Inserts `node`, growing the bitmap as needed.
    ///
    /// Returns `true` if the node was not yet in the set.
    pub fn insert(&mut self, node: NodeId) -> bool {
        let (word, mask) = Self::slot(node);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let fresh = self.words[word] & mask == 0;
        self.words[word] |= mask;
        fresh
    }

    /// Removes `node`, returning whether it was present.
    pub fn remove(&mut self, node: NodeId) -> bool {
        let (word, mask) = Self::slot(node);
        match self.words.get_mut(word) {
            Some(slot) => {
                let present = *slot & mask != 0;
                *slot &= !mask;
                present
            }
            None => false,
        }
    }

    /// Returns `true` if `node` is in the set.
    ///
    /// Nodes beyond the grown range are absent, so no sizing contract
    /// exists between the set and any particular graph.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        let (word, mask) = Self::slot(node);
        self.words.get(word).is_some_and(|slot| slot & mask != 0)
    }

    /// Returns the number of nodes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Returns an iterator over the members in ascending ID order.
    ///
    /// Each word is drained bit by bit through `trailing_zeros`, so
    /// iteration cost tracks the population, not the capacity.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            std::iter::successors(Some(word), |&w| {
                let rest = w & (w - 1);
                (rest != 0).then_some(rest)
            })
            .take_while(|&w| w != 0)
            .map(move |w| NodeId::new(i * WORD_BITS + w.trailing_zeros() as usize))
        })
    }
}

impl fmt::Debug for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_freshness() {
        let mut set = NodeSet::new();
        assert!(set.is_empty());

        assert!(set.insert(NodeId::new(3)));
        assert!(!set.insert(NodeId::new(3)));
        assert!(set.contains(NodeId::new(3)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_grows_across_word_boundaries() {
        let mut set = NodeSet::new();
        set.insert(NodeId::new(0));
        set.insert(NodeId::new(200));

        assert!(set.contains(NodeId::new(0)));
        assert!(set.contains(NodeId::new(200)));
        assert!(!set.contains(NodeId::new(199)));
        // Far beyond anything inserted, without growing first.
        assert!(!set.contains(NodeId::new(100_000)));
    }

    #[test]
    fn test_remove() {
        let mut set = NodeSet::new();
        set.insert(NodeId::new(7));

        assert!(set.remove(NodeId::new(7)));
        assert!(!set.remove(NodeId::new(7)));
        assert!(!set.contains(NodeId::new(7)));
        // Removing past the grown range is a no-op.
        assert!(!set.remove(NodeId::new(500)));
    }

    #[test]
    fn test_iter_ascending() {
        let mut set = NodeSet::new();
        for i in [90, 4, 63, 64, 0] {
            set.insert(NodeId::new(i));
        }

        let members: Vec<usize> = set.iter().map(NodeId::index).collect();
        assert_eq!(members, vec![0, 4, 63, 64, 90]);
    }

    #[test]
    fn test_debug_lists_members() {
        let mut set = NodeSet::new();
        set.insert(NodeId::new(1));
        set.insert(NodeId::new(5));
        assert_eq!(format!("{set:?}"), "{NodeId(1), NodeId(5)}");
    }
}
