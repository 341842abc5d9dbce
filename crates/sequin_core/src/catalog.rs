//! Variable catalog snapshots.
//!
//! The catalog lists every variable a sequence's prompts may reference:
//! global variables, global lists, and outputs of blocks in the sequence.

use crate::{VariableType, value_to_text};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Category of a catalog entry as tagged by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CatalogKind {
    /// Global scalar variable
    Global,
    /// Global list of items
    GlobalList,
    /// Output of a block in the sequence
    BlockOutput,
}

impl From<CatalogKind> for VariableType {
    fn from(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Global => VariableType::Global,
            CatalogKind::GlobalList => VariableType::List,
            CatalogKind::BlockOutput => VariableType::Output,
        }
    }
}

/// One variable known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Reference name
    pub name: String,
    /// Category
    #[serde(rename = "type")]
    pub kind: CatalogKind,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Current value
    #[serde(default, deserialize_with = "lenient_text")]
    pub value: Option<String>,
    /// Declared default value
    #[serde(default, deserialize_with = "lenient_text")]
    pub default_value: Option<String>,
    /// Items of a global list
    #[serde(default)]
    pub items: Option<Vec<String>>,
    /// Producing block for block outputs
    #[serde(default)]
    pub block_id: Option<i64>,
}

impl CatalogEntry {
    /// Create an entry with only a name and category.
    pub fn new(name: impl Into<String>, kind: CatalogKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            value: None,
            default_value: None,
            items: None,
            block_id: None,
        }
    }

    /// Set the declared default.
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Set the current value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set list items.
    pub fn with_items(mut self, items: Vec<String>) -> Self {
        self.items = Some(items);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Variable type presented to the prompt editor.
    pub fn variable_type(&self) -> VariableType {
        self.kind.into()
    }

    /// Declared default.
    ///
    /// A global list without an explicit default defaults to its items,
    /// encoded as a JSON array.
    pub fn declared_default(&self) -> Option<String> {
        if let Some(default) = &self.default_value {
            return Some(default.clone());
        }
        match (&self.kind, &self.items) {
            (CatalogKind::GlobalList, Some(items)) => Some(Value::from(items.clone()).to_string()),
            _ => None,
        }
    }
}

/// Ordered snapshot of the variables available to a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableCatalog {
    entries: Vec<CatalogEntry>,
}

impl VariableCatalog {
    /// Create a catalog from entries.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Look up an entry by reference name. The first entry wins on duplicates.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CatalogEntry> for VariableCatalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Null => None,
        other => Some(value_to_text(&other)),
    }))
}
