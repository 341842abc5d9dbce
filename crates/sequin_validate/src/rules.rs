//! Individual checks shared by the block-type validators.

use crate::{IssueKind, OutputValidation, ValidationIssue};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static CLAIM_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bclaims?\b").expect("claim word pattern is valid"));

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(\d+)\.\s").expect("numbered line pattern is valid"));

static INDEPENDENT_CLAIM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+\.\s+An?\s").expect("independent claim pattern is valid")
});

static DEPENDENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bof\s+claim\s+(\d+)").expect("dependency pattern is valid")
});

static CLAIM_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)claim|output|^c\d+$").expect("claim field pattern is valid")
});

static JSON_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}").expect("json fragment pattern is valid"));

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:([-*+•])|(\d+)[.)]|([A-Za-z])[.)])(?:\s+|$)")
        .expect("list marker pattern is valid")
});

/// Whether text talks about claims.
pub(crate) fn mentions_claims(text: &str) -> bool {
    CLAIM_WORD.is_match(text)
}

/// Whether text has at least one `N. ` line.
pub(crate) fn has_numbered_lines(text: &str) -> bool {
    NUMBERED_LINE.is_match(text)
}

/// Whether a field name suggests it holds claims.
pub(crate) fn is_claim_field(name: &str) -> bool {
    CLAIM_FIELD.is_match(name)
}

pub(crate) fn check_not_empty(text: &str, report: &mut OutputValidation) -> bool {
    if text.trim().is_empty() {
        report.add_error(ValidationIssue::new(
            IssueKind::Empty,
            "Content cannot be empty",
        ));
        return false;
    }
    true
}

pub(crate) fn check_lowercase_start(text: &str, report: &mut OutputValidation) {
    if text.trim_start().chars().next().is_some_and(char::is_lowercase) {
        report.add_warning(ValidationIssue::new(
            IssueKind::LowercaseStart,
            "Content starts with a lowercase letter",
        ));
    }
}

/// Structure checks for numbered claims.
///
/// Findings are warnings except a missing terminal period, which is a
/// suggestion.
pub(crate) fn check_claims(text: &str, report: &mut OutputValidation) {
    let starts: Vec<(usize, u64)> = NUMBERED_LINE
        .captures_iter(text)
        .filter_map(|caps| {
            let start = caps.get(0)?.start();
            let number = caps.get(1)?.as_str().parse().ok()?;
            Some((start, number))
        })
        .collect();

    let bodies: Vec<(u64, &str)> = starts
        .iter()
        .enumerate()
        .map(|(i, &(start, number))| {
            let end = starts.get(i + 1).map_or(text.len(), |&(next, _)| next);
            (number, &text[start..end])
        })
        .collect();

    if !bodies.iter().any(|(_, body)| INDEPENDENT_CLAIM.is_match(body)) {
        report.add_warning(ValidationIssue::new(
            IssueKind::MissingIndependentClaim,
            "No independent claim found (expected a claim like \"1. A ...\")",
        ));
    }

    let numbers: Vec<u64> = bodies.iter().map(|(n, _)| *n).collect();
    let sequential = numbers.iter().zip(1u64..).all(|(n, expected)| *n == expected);
    if !sequential {
        report.add_warning(ValidationIssue::new(
            IssueKind::NonSequentialClaims,
            format!(
                "Claims must be numbered sequentially from 1, found {:?}",
                numbers
            ),
        ));
    }

    for (number, body) in &bodies {
        for caps in DEPENDENCY.captures_iter(body) {
            let Some(cited) = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) else {
                continue;
            };
            if cited >= *number {
                report.add_warning(ValidationIssue::new(
                    IssueKind::InvalidClaimDependency,
                    format!(
                        "Claim {} depends on claim {}, which is not an earlier claim",
                        number, cited
                    ),
                ));
            }
        }
        if !body.trim_end().ends_with('.') {
            report.add_suggestion(ValidationIssue::new(
                IssueKind::MissingTerminalPeriod,
                format!("Claim {} should end with a period", number),
            ));
        }
    }
}

/// Flag `{...}` fragments that do not parse as JSON.
pub(crate) fn check_embedded_json(text: &str, report: &mut OutputValidation) {
    for fragment in JSON_FRAGMENT.find_iter(text) {
        if let Err(e) = serde_json::from_str::<serde_json::Value>(fragment.as_str()) {
            report.add_error(ValidationIssue::new(
                IssueKind::MalformedJson,
                format!("Malformed JSON '{}': {}", fragment.as_str(), e),
            ));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MarkerStyle {
    Bullet,
    Number,
    Letter,
}

struct ListItem<'a> {
    style: Option<MarkerStyle>,
    number: Option<u64>,
    text: &'a str,
}

fn parse_item(item: &str) -> ListItem<'_> {
    let Some(caps) = LIST_MARKER.captures(item) else {
        return ListItem {
            style: None,
            number: None,
            text: item.trim(),
        };
    };
    let rest = caps.get(0).map_or(item, |m| &item[m.end()..]);
    let (style, number) = if caps.get(1).is_some() {
        (MarkerStyle::Bullet, None)
    } else if let Some(n) = caps.get(2) {
        (MarkerStyle::Number, n.as_str().parse().ok())
    } else {
        (MarkerStyle::Letter, None)
    };
    ListItem {
        style: Some(style),
        number,
        text: rest.trim(),
    }
}

/// Advisory list consistency checks.
pub(crate) fn check_list_items(items: &[&str], report: &mut OutputValidation) {
    let parsed: Vec<ListItem<'_>> = items.iter().map(|item| parse_item(item)).collect();

    for (i, item) in parsed.iter().enumerate() {
        if item.text.is_empty() {
            report.add_warning(ValidationIssue::new(
                IssueKind::EmptyItem,
                format!("Item {} is empty", i + 1),
            ));
        }
    }

    let styles: BTreeSet<MarkerStyle> = parsed.iter().filter_map(|item| item.style).collect();
    if styles.len() > 1 {
        report.add_warning(ValidationIssue::new(
            IssueKind::MixedListMarkers,
            "List items use more than one marker style",
        ));
    }

    let numbers: Vec<u64> = parsed.iter().filter_map(|item| item.number).collect();
    if numbers
        .windows(2)
        .any(|pair| pair[0].checked_add(1) != Some(pair[1]))
    {
        report.add_suggestion(ValidationIssue::new(
            IssueKind::NonSequentialList,
            format!("Numbered items are not sequential: {:?}", numbers),
        ));
    }
}
