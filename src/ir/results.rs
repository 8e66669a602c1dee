//! Analysis result storage.
//!
//! Every method body and the program itself carry a [`ResultMap`]: a
//! concurrent, string-ID-keyed map from analysis ID to an opaque result
//! object. Analyses publish under their `ID` constant; downstream passes
//! fetch by ID with the concrete type they expect. The map is concurrent
//! so method-parallel intraprocedural runs can publish without an
//! external lock.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;

/// A concurrent map from analysis ID to published result.
///
/// Results are stored as `Arc<dyn Any>` and recovered with a typed
/// [`get`](Self::get); a type mismatch simply yields `None`, the same as
/// an absent entry.
///
/// # Examples
///
/// ```rust
/// use flowscope::ir::ResultMap;
///
/// let results = ResultMap::new();
/// results.put("constprop", vec![1, 2, 3]);
///
/// let facts: std::sync::Arc<Vec<i32>> = results.get("constprop").unwrap();
/// assert_eq!(facts.len(), 3);
/// assert!(results.get::<String>("constprop").is_none());
/// ```
#[derive(Default)]
pub struct ResultMap {
    map: DashMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for ResultMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&str> = self.map.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        f.debug_struct("ResultMap").field("ids", &ids).finish()
    }
}

impl ResultMap {
    /// Creates an empty result map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    /// Publishes a result under the given analysis ID, replacing any
    /// previous result with that ID.
    pub fn put<T: Any + Send + Sync>(&self, id: &'static str, value: T) {
        self.map.insert(id, Arc::new(value));
    }

    /// Fetches the result published under `id`, if present and of the
    /// expected type.
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self, id: &str) -> Option<Arc<T>> {
        let entry = self.map.get(id)?;
        Arc::clone(entry.value()).downcast::<T>().ok()
    }

    /// Returns `true` if a result is published under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }
}
