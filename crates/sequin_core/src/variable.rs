//! Variables used by a prompt.

use crate::CatalogEntry;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Kind of value a used variable draws from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VariableType {
    /// Global variable, also used for names the catalog does not know
    #[default]
    Global,
    /// Global list
    List,
    /// Output of an earlier block
    Output,
}

/// A variable referenced by a template, with catalog metadata attached.
///
/// # Examples
///
/// ```
/// use sequin_core::{UsedVariable, VariableType};
///
/// let var = UsedVariable::synthesized("topic");
/// assert_eq!(var.var_type(), &VariableType::Global);
/// assert_eq!(var.description(), "Variable: topic");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct UsedVariable {
    /// Reference name
    name: String,
    /// Display label
    label: String,
    /// Description shown next to the input field
    #[builder(default)]
    description: String,
    /// Value category
    #[builder(default)]
    #[serde(rename = "type")]
    var_type: VariableType,
    /// Catalog value
    #[builder(default)]
    value: String,
    /// Declared default
    #[builder(default)]
    default_value: String,
}

impl UsedVariable {
    /// Create a builder.
    pub fn builder() -> UsedVariableBuilder {
        UsedVariableBuilder::default()
    }

    /// Build a used variable from its catalog entry.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        let description = entry
            .description
            .clone()
            .unwrap_or_else(|| format!("Variable: {}", entry.name));
        Self {
            name: entry.name.clone(),
            label: entry.name.clone(),
            description,
            var_type: entry.variable_type(),
            value: entry.value.clone().unwrap_or_default(),
            default_value: entry.declared_default().unwrap_or_default(),
        }
    }

    /// Synthesize metadata for a name the catalog does not know.
    pub fn synthesized(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            description: format!("Variable: {}", name),
            name,
            var_type: VariableType::Global,
            value: String::new(),
            default_value: String::new(),
        }
    }
}
