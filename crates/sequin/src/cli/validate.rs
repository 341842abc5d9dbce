//! Validation command handler.

use super::{ValidationOutputFormat, parse_assignments};
use sequin_core::{BlockType, OutputEdit};
use sequin_validate::{EditSession, OutputValidation};

/// Handles the validate command.
///
/// Named fields take precedence over list items, which take precedence
/// over content. Exits with status 1 when the output has errors.
#[tracing::instrument(skip_all, fields(block_type = %block_type))]
pub fn handle_validate_command(
    block_type: BlockType,
    fields: &[String],
    items: &[String],
    content: Option<String>,
    format: ValidationOutputFormat,
) -> anyhow::Result<()> {
    let edit = if !fields.is_empty() {
        OutputEdit::NamedOutputs(parse_assignments(fields)?.into_iter().collect())
    } else if !items.is_empty() {
        OutputEdit::List(items.to_vec())
    } else {
        OutputEdit::Content(content.unwrap_or_default())
    };

    let mut session = EditSession::new(block_type);
    session.begin(edit);
    let saved = session.submit().is_ok();
    let report = session.last_validation().cloned().unwrap_or_default();

    output_report(&report, format)?;
    if !saved {
        std::process::exit(1);
    }
    Ok(())
}

fn output_report(report: &OutputValidation, format: ValidationOutputFormat) -> anyhow::Result<()> {
    match format {
        ValidationOutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        ValidationOutputFormat::Human => {
            if report.is_clean() {
                println!("✓ Output is valid");
                return Ok(());
            }
            if report.is_valid() {
                println!("✓ Output is valid with findings");
            } else {
                println!("✗ Output has {} error(s)", report.errors.len());
            }
            for section in [
                report.format_errors(),
                report.format_warnings(),
                report.format_suggestions(),
            ] {
                if !section.is_empty() {
                    println!("\n{}", section);
                }
            }
        }
    }
    Ok(())
}
