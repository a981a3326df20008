//! # Selectors
//!
//! Pick a function value by a boolean or by a key. Selectors never invoke
//! the chosen branch; the caller decides whether and when to call it.

use crate::error::{SelectError, SelectResult};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// The condition for [`branch2`]: a ready boolean or a deferred check.
pub enum Condition<'a> {
    Value(bool),
    Deferred(Box<dyn Fn() -> bool + 'a>),
}

impl<'a> Condition<'a> {
    pub fn deferred<F>(check: F) -> Self
    where
        F: Fn() -> bool + 'a,
    {
        Condition::Deferred(Box::new(check))
    }

    pub fn evaluate(&self) -> bool {
        match self {
            Condition::Value(b) => *b,
            Condition::Deferred(check) => check(),
        }
    }
}

impl From<bool> for Condition<'_> {
    fn from(value: bool) -> Self {
        Condition::Value(value)
    }
}

/// Choose between two branches.
///
/// Both branches share one type; use fn pointers or boxed closures when the
/// branches are distinct closures.
pub fn branch2<'a, F>(condition: impl Into<Condition<'a>>, on_true: F, on_false: F) -> F {
    if condition.into().evaluate() {
        on_true
    } else {
        on_false
    }
}

/// Keyed branches with an optional fallback.
///
/// Keys are usually a caller-defined enum of named variants.
#[derive(Debug, Clone)]
pub struct BranchMap<K, F> {
    branches: HashMap<K, F>,
    default: Option<F>,
}

impl<K, F> BranchMap<K, F>
where
    K: Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self {
            branches: HashMap::new(),
            default: None,
        }
    }

    pub fn branch(mut self, key: K, f: F) -> Self {
        self.branches.insert(key, f);
        self
    }

    /// Branch returned when no key matches.
    pub fn with_default(mut self, f: F) -> Self {
        self.default = Some(f);
        self
    }

    pub fn insert(&mut self, key: K, f: F) -> Option<F> {
        self.branches.insert(key, f)
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn select(&self, key: &K) -> SelectResult<&F> {
        self.branches
            .get(key)
            .or(self.default.as_ref())
            .ok_or_else(|| SelectError::UnknownBranch {
                key: format!("{key:?}"),
            })
    }
}

impl<K, F> Default for BranchMap<K, F>
where
    K: Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, F> FromIterator<(K, F)> for BranchMap<K, F>
where
    K: Eq + Hash + Debug,
{
    fn from_iter<I: IntoIterator<Item = (K, F)>>(iter: I) -> Self {
        Self {
            branches: iter.into_iter().collect(),
            default: None,
        }
    }
}

/// Evaluate `condition` to a key and return the branch registered under it.
pub fn branch_multiple<K, F>(
    condition: impl FnOnce() -> K,
    map: &BranchMap<K, F>,
) -> SelectResult<&F>
where
    K: Eq + Hash + Debug,
{
    map.select(&condition())
}
