//! Optimistic override writes with rollback.

use sequin_core::InputOverrides;
use tracing::debug;

/// Overrides written ahead of a backend confirmation.
///
/// Holds the value each name had before [`OptimisticEdit::apply`] so a
/// failed backend call can restore it exactly.
///
/// # Examples
///
/// ```
/// use sequin_core::InputOverrides;
/// use sequin_run::OptimisticEdit;
///
/// let mut overrides = InputOverrides::new();
/// overrides.set("summary", "old");
///
/// let edit = OptimisticEdit::apply(&mut overrides, vec![("summary".into(), "new".into())]);
/// assert_eq!(overrides.get("summary"), Some("new"));
///
/// edit.rollback(&mut overrides);
/// assert_eq!(overrides.get("summary"), Some("old"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an optimistic edit must be confirmed or rolled back"]
pub struct OptimisticEdit {
    previous: Vec<(String, Option<String>)>,
}

impl OptimisticEdit {
    /// Write the values, remembering what they replaced.
    pub fn apply(overrides: &mut InputOverrides, values: Vec<(String, String)>) -> Self {
        let previous = values
            .into_iter()
            .map(|(name, value)| {
                let prior = overrides.set(name.clone(), value);
                (name, prior)
            })
            .collect::<Vec<_>>();
        debug!(count = previous.len(), "Applied optimistic overrides");
        Self { previous }
    }

    /// Names written by this edit.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.previous.iter().map(|(name, _)| name.as_str())
    }

    /// Restore the prior values, newest write first.
    pub fn rollback(self, overrides: &mut InputOverrides) {
        debug!(count = self.previous.len(), "Rolling back optimistic overrides");
        for (name, prior) in self.previous.into_iter().rev() {
            match prior {
                Some(value) => {
                    overrides.set(name, value);
                }
                None => {
                    overrides.remove(&name);
                }
            }
        }
    }

    /// Keep the written values.
    pub fn confirm(self) {
        debug!(count = self.previous.len(), "Confirmed optimistic overrides");
    }
}
