//! Template reference parsing.

use regex::Regex;
use sequin_core::{VariableKind, VariableReference};
use std::sync::LazyLock;
use tracing::trace;

/// `<<...>>` where the inner text contains no `>`.
static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<<([^>]+)>>").expect("reference pattern is valid"));

/// One `[...]` index group.
static INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").expect("index pattern is valid"));

/// Extracts variable references from template text.
pub trait ReferenceParser: Send + Sync {
    /// References in left-to-right order, duplicates included.
    fn parse(&self, template: &str) -> Vec<VariableReference>;

    /// The simple token that references `name`.
    fn token_for(&self, name: &str) -> String {
        format!("<<{}>>", name)
    }
}

/// The `<<name>>` / `<<name[i]>>` / `<<name[i][j]>>` grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleBracketParser;

impl ReferenceParser for AngleBracketParser {
    fn parse(&self, template: &str) -> Vec<VariableReference> {
        REFERENCE
            .captures_iter(template)
            .filter_map(|caps| {
                let raw_token = caps.get(0)?.as_str().to_string();
                let inner = caps.get(1)?.as_str();
                let reference = parse_inner(raw_token, inner);
                trace!(token = %reference.raw_token, kind = %reference.kind, "Parsed reference");
                Some(reference)
            })
            .collect()
    }
}

fn parse_inner(raw_token: String, inner: &str) -> VariableReference {
    let (name, rest) = match inner.find('[') {
        Some(pos) => (&inner[..pos], &inner[pos..]),
        None => (inner, ""),
    };
    let indices: Vec<String> = INDEX
        .captures_iter(rest)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .collect();

    VariableReference {
        raw_token,
        name: name.trim().to_string(),
        kind: VariableKind::from_index_count(indices.len()),
        indices,
    }
}

/// Parse every reference in a template with the default grammar.
///
/// # Examples
///
/// ```
/// use sequin_core::VariableKind;
/// use sequin_template::parse_references;
///
/// let refs = parse_references("Use <<topic>> and <<grid[row][2]>>.");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].kind, VariableKind::Simple);
/// assert_eq!(refs[1].name, "grid");
/// assert_eq!(refs[1].indices, vec!["row", "2"]);
/// assert_eq!(refs[1].kind, VariableKind::MatrixIndexed);
/// ```
pub fn parse_references(template: &str) -> Vec<VariableReference> {
    AngleBracketParser.parse(template)
}

/// Distinct reference names in order of first appearance.
pub fn reference_names(template: &str) -> Vec<String> {
    distinct_names(&AngleBracketParser, template)
}

/// Whether the template references `name` in any form.
pub fn contains_reference(template: &str, name: &str) -> bool {
    parse_references(template).iter().any(|r| r.name == name)
}

pub(crate) fn distinct_names<P: ReferenceParser + ?Sized>(
    parser: &P,
    template: &str,
) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for reference in parser.parse(template) {
        if !reference.name.is_empty() && !names.contains(&reference.name) {
            names.push(reference.name);
        }
    }
    names
}
