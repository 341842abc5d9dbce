//! Value resolution for variable references.

use sequin_core::{BlockRun, CatalogEntry, InputOverrides, VariableCatalog};
use std::collections::BTreeMap;
use tracing::trace;

/// Resolve the value a run should use for a variable.
///
/// Priority, highest first:
/// 1. a non-empty override
/// 2. the named output of the most recently completed block run that emits it
/// 3. the catalog's declared default
/// 4. the catalog's value
/// 5. the empty string
///
/// `block_runs` must be in execution order. Nothing is cached; callers
/// resolve again whenever any input changes.
///
/// # Examples
///
/// ```
/// use sequin_core::{CatalogEntry, CatalogKind, InputOverrides};
/// use sequin_run::resolve;
///
/// let entry = CatalogEntry::new("a", CatalogKind::Global).with_default("Z");
/// let mut overrides = InputOverrides::new();
/// assert_eq!(resolve("a", &overrides, &[], Some(&entry)), "Z");
///
/// overrides.set("a", "X");
/// assert_eq!(resolve("a", &overrides, &[], Some(&entry)), "X");
/// ```
pub fn resolve(
    name: &str,
    overrides: &InputOverrides,
    block_runs: &[BlockRun],
    entry: Option<&CatalogEntry>,
) -> String {
    if let Some(value) = overrides.get_non_empty(name) {
        trace!(name, source = "override", "Resolved variable");
        return value.to_string();
    }

    let emitted = block_runs
        .iter()
        .rev()
        .filter(|run| run.is_completed())
        .find_map(|run| run.named_output(name));
    if let Some(value) = emitted {
        trace!(name, source = "block_run", "Resolved variable");
        return value;
    }

    let declared = entry.and_then(|e| {
        e.declared_default()
            .filter(|v| !v.is_empty())
            .or_else(|| e.value.clone().filter(|v| !v.is_empty()))
    });
    match declared {
        Some(value) => {
            trace!(name, source = "catalog", "Resolved variable");
            value
        }
        None => String::new(),
    }
}

/// Resolve every name against the catalog.
pub fn resolve_all<S: AsRef<str>>(
    names: &[S],
    overrides: &InputOverrides,
    block_runs: &[BlockRun],
    catalog: &VariableCatalog,
) -> BTreeMap<String, String> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            (
                name.to_string(),
                resolve(name, overrides, block_runs, catalog.get(name)),
            )
        })
        .collect()
}
