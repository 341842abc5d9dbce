//! Output validation for edited block responses.
//!
//! Each block type has a validator that sorts findings into errors, which
//! block a save, and warnings or suggestions, which are advisory.
//! [`EditSession`] drives the validators through the edit lifecycle.

mod report;
mod rules;
mod session;
mod validator;

pub use report::{IssueKind, OutputValidation, ValidationIssue};
pub use session::{EditSession, EditState};
pub use validator::{
    validate_content, validate_discretization, validate_list, validate_matrix, validate_output,
};
