//! Variable-reference template system.
//!
//! Prompts reference variables with `<<name>>`, `<<name[i]>>` and
//! `<<name[i][j]>>` tokens. This crate extracts those references and keeps
//! the ordered list of variables a prompt uses in step with the prompt text.
//!
//! Parsing is a single non-overlapping scan; references do not nest and
//! there is no escaping. The scan lives behind [`ReferenceParser`] so the
//! order model does not depend on the token grammar.

mod order;
mod parser;

pub use order::{
    VariableOrder, derive_used_variables, insert_variable, remove_variable, reorder_template,
    strip_tokens,
};
pub use parser::{
    AngleBracketParser, ReferenceParser, contains_reference, parse_references, reference_names,
};
