//! Blocks, their typed configuration, and sequences.
//!
//! The backend stores a block's configuration as an untyped JSON object
//! keyed by block type. [`BlockConfig`] is the typed form; conversion in
//! both directions happens only at the [`BlockRecord`] boundary.

use sequin_error::JsonError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::str::FromStr;

/// Output name used when a block's configuration does not declare one.
pub const DEFAULT_OUTPUT_NAME: &str = "output";

/// Kinds of blocks in a sequence.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BlockType {
    /// Single free-text response
    Standard,
    /// Response split into named fields
    Discretization,
    /// One response per item of a list
    SingleList,
    /// One response per cell of a row/column matrix
    MultiList,
}

/// Typed block configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "block_type", rename_all = "snake_case")]
pub enum BlockConfig {
    /// Free-text block
    Standard {
        /// Variable name later blocks use to reference the response
        output_name: String,
    },
    /// Block producing named fields
    Discretization {
        /// Declared field names, each referenceable as a variable
        output_names: Vec<String>,
    },
    /// Block iterating a list
    SingleList {
        /// Variable name of the produced list
        output_name: String,
        /// List the block iterates over
        list_name: Option<String>,
    },
    /// Block iterating a matrix of two lists
    MultiList {
        /// Variable name of the produced matrix
        output_name: String,
        /// List providing matrix rows
        row_list: Option<String>,
        /// List providing matrix columns
        column_list: Option<String>,
    },
}

impl BlockConfig {
    /// The block type this configuration belongs to.
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockConfig::Standard { .. } => BlockType::Standard,
            BlockConfig::Discretization { .. } => BlockType::Discretization,
            BlockConfig::SingleList { .. } => BlockType::SingleList,
            BlockConfig::MultiList { .. } => BlockType::MultiList,
        }
    }

    /// Variable names this block's outputs are published under.
    pub fn output_names(&self) -> Vec<&str> {
        match self {
            BlockConfig::Standard { output_name }
            | BlockConfig::SingleList { output_name, .. }
            | BlockConfig::MultiList { output_name, .. } => vec![output_name.as_str()],
            BlockConfig::Discretization { output_names } => {
                output_names.iter().map(String::as_str).collect()
            }
        }
    }

    /// Default configuration for a block type.
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Standard => BlockConfig::Standard {
                output_name: DEFAULT_OUTPUT_NAME.to_string(),
            },
            BlockType::Discretization => BlockConfig::Discretization {
                output_names: Vec::new(),
            },
            BlockType::SingleList => BlockConfig::SingleList {
                output_name: DEFAULT_OUTPUT_NAME.to_string(),
                list_name: None,
            },
            BlockType::MultiList => BlockConfig::MultiList {
                output_name: DEFAULT_OUTPUT_NAME.to_string(),
                row_list: None,
                column_list: None,
            },
        }
    }

    /// Interpret the backend's untyped configuration for a block type.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is not a JSON object or a
    /// declared field has the wrong shape.
    pub fn from_parts(block_type: BlockType, config: &Value) -> Result<Self, JsonError> {
        let empty = Map::new();
        let fields = match config {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(JsonError::new(format!(
                    "Config for {} block must be an object, got {}",
                    block_type, other
                )));
            }
        };

        let output_name = || {
            optional_string(fields, "output_name")
                .map(|name| name.unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string()))
        };

        match block_type {
            BlockType::Standard => Ok(BlockConfig::Standard {
                output_name: output_name()?,
            }),
            BlockType::Discretization => {
                let output_names = match fields.get("output_names") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(items)) => items
                        .iter()
                        .map(|item| {
                            item.as_str().map(str::to_string).ok_or_else(|| {
                                JsonError::new(format!(
                                    "output_names entries must be strings, got {}",
                                    item
                                ))
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?,
                    Some(other) => {
                        return Err(JsonError::new(format!(
                            "output_names must be an array, got {}",
                            other
                        )));
                    }
                };
                Ok(BlockConfig::Discretization { output_names })
            }
            BlockType::SingleList => Ok(BlockConfig::SingleList {
                output_name: output_name()?,
                list_name: optional_string(fields, "list_name")?,
            }),
            BlockType::MultiList => Ok(BlockConfig::MultiList {
                output_name: output_name()?,
                row_list: optional_string(fields, "row_list")?,
                column_list: optional_string(fields, "column_list")?,
            }),
        }
    }

    /// Build the untyped configuration object the backend stores.
    pub fn to_payload(&self) -> Value {
        match self {
            BlockConfig::Standard { output_name } => json!({ "output_name": output_name }),
            BlockConfig::Discretization { output_names } => {
                json!({ "output_names": output_names })
            }
            BlockConfig::SingleList {
                output_name,
                list_name,
            } => json!({ "output_name": output_name, "list_name": list_name }),
            BlockConfig::MultiList {
                output_name,
                row_list,
                column_list,
            } => json!({
                "output_name": output_name,
                "row_list": row_list,
                "column_list": column_list,
            }),
        }
    }
}

fn optional_string(fields: &Map<String, Value>, key: &str) -> Result<Option<String>, JsonError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(JsonError::new(format!(
            "{} must be a string, got {}",
            key, other
        ))),
    }
}

/// Block as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Block id
    pub id: i64,
    /// Owning sequence
    pub sequence_id: i64,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Block type tag
    pub block_type: String,
    /// Prompt template
    #[serde(default)]
    pub prompt: String,
    /// Execution position within the sequence
    #[serde(default)]
    pub position: i32,
    /// Untyped configuration
    #[serde(default)]
    pub config: Value,
}

/// One step of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BlockRecord", into = "BlockRecord")]
pub struct Block {
    /// Block id
    pub id: i64,
    /// Owning sequence
    pub sequence_id: i64,
    /// Display name
    pub name: String,
    /// Prompt template
    pub prompt: String,
    /// Execution position within the sequence
    pub position: i32,
    /// Typed configuration
    pub config: BlockConfig,
}

impl Block {
    /// The block's type.
    pub fn block_type(&self) -> BlockType {
        self.config.block_type()
    }
}

impl TryFrom<BlockRecord> for Block {
    type Error = JsonError;

    fn try_from(record: BlockRecord) -> Result<Self, Self::Error> {
        let block_type = BlockType::from_str(&record.block_type).map_err(|_| {
            JsonError::new(format!(
                "Block {} has unknown block type '{}'",
                record.id, record.block_type
            ))
        })?;
        let config = BlockConfig::from_parts(block_type, &record.config)?;
        Ok(Self {
            id: record.id,
            sequence_id: record.sequence_id,
            name: record.name,
            prompt: record.prompt,
            position: record.position,
            config,
        })
    }
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        Self {
            id: block.id,
            sequence_id: block.sequence_id,
            name: block.name,
            block_type: block.config.block_type().to_string(),
            prompt: block.prompt,
            position: block.position,
            config: block.config.to_payload(),
        }
    }
}

/// An ordered pipeline of blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Sequence id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}
