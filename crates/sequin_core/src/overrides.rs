//! User-supplied variable values for a run session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Variable name → user-supplied value, scoped to one run session.
///
/// # Examples
///
/// ```
/// use sequin_core::InputOverrides;
///
/// let mut overrides = InputOverrides::new();
/// overrides.set("topic", "rust");
/// overrides.set("empty", "");
///
/// assert_eq!(overrides.get_non_empty("topic"), Some("rust"));
/// assert_eq!(overrides.get_non_empty("empty"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(transparent)]
pub struct InputOverrides(BTreeMap<String, String>);

impl InputOverrides {
    /// Create an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, returning the previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Get a value, including empty strings.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Get a value only when it is non-empty.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Remove a value, returning it.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// Remove every value.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of the underlying map, for request payloads.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.0.clone()
    }
}

impl<K, V> FromIterator<(K, V)> for InputOverrides
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
