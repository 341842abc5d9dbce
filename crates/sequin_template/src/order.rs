//! Ordered variables of a prompt, kept consistent with the prompt text.
//!
//! Reordering is not position-preserving: every reference token of the
//! previous order is stripped from the text, whitespace is collapsed, and
//! the tokens are appended to the end in the new order. Prose around the
//! tokens therefore loses them and they always end up at the tail.

use crate::parser::{AngleBracketParser, ReferenceParser, distinct_names};
use regex::Regex;
use sequin_core::{UsedVariable, VariableCatalog};
use sequin_error::{TemplateError, TemplateErrorKind};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, instrument};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Remove every literal `<<name>>` token for the given names, collapse
/// whitespace runs to one space and trim.
///
/// Indexed references such as `<<name[0]>>` are not simple tokens and are
/// left in place.
///
/// # Examples
///
/// ```
/// use sequin_template::strip_tokens;
///
/// let text = strip_tokens("Compare <<a>> and <<b>>.", &["a", "b"]);
/// assert_eq!(text, "Compare and .");
/// ```
pub fn strip_tokens<S: AsRef<str>>(template: &str, names: &[S]) -> String {
    strip_with(&AngleBracketParser, template, names)
}

/// Relocate the tokens of `old_order` to the tail of the text in `new_order`.
///
/// # Examples
///
/// ```
/// use sequin_template::reorder_template;
///
/// let text = reorder_template("Compare <<a>> and <<b>>.", &["a", "b"], &["b", "a"]);
/// assert_eq!(text, "Compare and . <<b>> <<a>>");
/// ```
pub fn reorder_template<S: AsRef<str>, T: AsRef<str>>(
    template: &str,
    old_order: &[S],
    new_order: &[T],
) -> String {
    reorder_with(&AngleBracketParser, template, old_order, new_order)
}

/// Strip every `<<name>>` token from the text.
pub fn remove_variable(template: &str, name: &str) -> String {
    strip_tokens(template, &[name])
}

/// Append `<<name>>` to the end of the text, space-separated.
pub fn insert_variable(template: &str, name: &str) -> String {
    append_tokens(&AngleBracketParser, template.trim_end(), &[name])
}

/// Build the used-variable list for a template.
///
/// Names follow `order` where the template still references them; names
/// missing from `order` follow in first-appearance order. Names the catalog
/// does not know get synthesized metadata.
pub fn derive_used_variables<S: AsRef<str>>(
    order: &[S],
    template: &str,
    catalog: &VariableCatalog,
) -> Vec<UsedVariable> {
    let names = distinct_names(&AngleBracketParser, template);
    reconcile_order(order, &names)
        .iter()
        .map(|name| match catalog.get(name) {
            Some(entry) => UsedVariable::from_entry(entry),
            None => UsedVariable::synthesized(name.as_str()),
        })
        .collect()
}

fn strip_with<P: ReferenceParser + ?Sized, S: AsRef<str>>(
    parser: &P,
    template: &str,
    names: &[S],
) -> String {
    let mut text = template.to_string();
    for name in names {
        text = text.replace(&parser.token_for(name.as_ref()), "");
    }
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

fn append_tokens<P: ReferenceParser + ?Sized, S: AsRef<str>>(
    parser: &P,
    text: &str,
    names: &[S],
) -> String {
    let tokens: Vec<String> = names.iter().map(|n| parser.token_for(n.as_ref())).collect();
    let tail = tokens.join(" ");
    match (text.is_empty(), tail.is_empty()) {
        (_, true) => text.to_string(),
        (true, false) => tail,
        (false, false) => format!("{} {}", text, tail),
    }
}

fn reorder_with<P: ReferenceParser + ?Sized, S: AsRef<str>, T: AsRef<str>>(
    parser: &P,
    template: &str,
    old_order: &[S],
    new_order: &[T],
) -> String {
    let stripped = strip_with(parser, template, old_order);
    append_tokens(parser, &stripped, new_order)
}

/// Keep surviving names in their existing order, then append names that
/// appear in `present` but not in `order`.
fn reconcile_order<S: AsRef<str>>(order: &[S], present: &[String]) -> Vec<String> {
    let present_set: HashSet<&str> = present.iter().map(String::as_str).collect();
    let mut result: Vec<String> = Vec::with_capacity(present.len());
    for name in order {
        let name = name.as_ref();
        if present_set.contains(name) && !result.iter().any(|n| n == name) {
            result.push(name.to_string());
        }
    }
    for name in present {
        if !result.contains(name) {
            result.push(name.clone());
        }
    }
    result
}

/// The ordered variables of one prompt, bound to its text.
///
/// Every mutation rewrites the text and re-derives the order so that the
/// set of ordered names always equals the set of names the text references.
///
/// # Examples
///
/// ```
/// use sequin_template::VariableOrder;
///
/// let mut order = VariableOrder::new("Compare <<a>> and <<b>>.");
/// assert_eq!(order.order(), ["a", "b"]);
///
/// order.reorder(&["b", "a"]).unwrap();
/// assert_eq!(order.template(), "Compare and . <<b>> <<a>>");
/// assert_eq!(order.order(), ["b", "a"]);
/// ```
#[derive(Debug, Clone)]
pub struct VariableOrder<P: ReferenceParser = AngleBracketParser> {
    parser: P,
    template: String,
    order: Vec<String>,
}

impl VariableOrder<AngleBracketParser> {
    /// Bind to a template using the default reference grammar.
    pub fn new(template: impl Into<String>) -> Self {
        Self::with_parser(AngleBracketParser, template)
    }
}

impl<P: ReferenceParser> VariableOrder<P> {
    /// Bind to a template using a custom parser.
    pub fn with_parser(parser: P, template: impl Into<String>) -> Self {
        let template = template.into();
        let order = distinct_names(&parser, &template);
        Self {
            parser,
            template,
            order,
        }
    }

    /// Current template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Current variable order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Consume the model, returning the template text.
    pub fn into_template(self) -> String {
        self.template
    }

    /// Replace the text after a free-form edit and re-sync the order.
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
        self.sync();
    }

    /// Re-derive the order from the text, keeping the user's order for
    /// names that are still referenced.
    pub fn sync(&mut self) {
        let present = distinct_names(&self.parser, &self.template);
        self.order = reconcile_order(&self.order, &present);
    }

    /// Used variables with catalog metadata, in the current order.
    pub fn derive(&self, catalog: &VariableCatalog) -> Vec<UsedVariable> {
        self.order
            .iter()
            .map(|name| match catalog.get(name) {
                Some(entry) => UsedVariable::from_entry(entry),
                None => UsedVariable::synthesized(name.as_str()),
            })
            .collect()
    }

    /// Apply a new order by relocating all tokens to the tail of the text.
    ///
    /// # Errors
    ///
    /// Returns an error if `new_order` is not a permutation of the current
    /// order.
    #[instrument(skip(self), fields(current = ?self.order))]
    pub fn reorder<S: AsRef<str> + std::fmt::Debug>(
        &mut self,
        new_order: &[S],
    ) -> Result<&str, TemplateError> {
        let requested: Vec<String> = new_order.iter().map(|s| s.as_ref().to_string()).collect();
        let mut sorted_requested = requested.clone();
        sorted_requested.sort();
        sorted_requested.dedup();
        let mut sorted_current = self.order.clone();
        sorted_current.sort();

        if sorted_requested != sorted_current || requested.len() != self.order.len() {
            return Err(TemplateError::new(TemplateErrorKind::InvalidOrder {
                current: self.order.clone(),
                requested,
            }));
        }

        self.template = reorder_with(&self.parser, &self.template, &self.order, &requested);
        self.order = requested;
        self.sync();
        debug!(template = %self.template, "Reordered template variables");
        Ok(&self.template)
    }

    /// Remove every simple token for `name` from the text.
    #[instrument(skip(self))]
    pub fn remove(&mut self, name: &str) -> &str {
        self.template = strip_with(&self.parser, &self.template, &[name]);
        self.sync();
        debug!(template = %self.template, "Removed variable");
        &self.template
    }

    /// Append a token for `name` to the end of the text.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or contains `>`.
    #[instrument(skip(self))]
    pub fn insert(&mut self, name: &str) -> Result<&str, TemplateError> {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.contains('>') || trimmed.contains('<') {
            return Err(TemplateError::new(TemplateErrorKind::InvalidName(
                name.to_string(),
            )));
        }
        self.template = append_tokens(&self.parser, self.template.trim_end(), &[trimmed]);
        self.sync();
        debug!(template = %self.template, "Inserted variable");
        Ok(&self.template)
    }
}
