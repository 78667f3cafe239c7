//! Variable environment.
//!
//! One flat mapping from name to value. There are no scopes: assignment
//! creates or overwrites a binding, and every statement of a program sees
//! every earlier assignment. The caller owns the environment and lends it
//! to each run, so bindings outlive a single execution and can seed or
//! inspect later ones.
//!
//! Not synchronized. Programs that must run in parallel need one
//! environment each.

use rustc_hash::FxHashMap;

use crate::Value;

/// Mapping from variable name to value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment {
    bindings: FxHashMap<String, Value>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Environment {
            bindings: FxHashMap::default(),
        }
    }

    /// Look up a binding.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Create or overwrite a binding, returning the previous value.
    pub fn assign(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    /// Remove a binding.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Bindings ordered by name, for stable output.
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Drop all bindings.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut env = Environment::new();
        env.extend(iter);
        env
    }
}

impl<K: Into<String>> Extend<(K, Value)> for Environment {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.bindings.insert(name.into(), value);
        }
    }
}
