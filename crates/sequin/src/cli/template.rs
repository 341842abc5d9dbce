//! Template inspection command handlers.

use sequin_core::VariableKind;
use sequin_template::{VariableOrder, parse_references};

/// Handles the refs command.
#[tracing::instrument(skip_all)]
pub fn handle_refs_command(template: &str) -> anyhow::Result<()> {
    let references = parse_references(template);
    if references.is_empty() {
        println!("No variable references");
        return Ok(());
    }

    for reference in references {
        match reference.kind {
            VariableKind::Simple => println!("{}\t{}", reference.name, reference.kind),
            _ => println!(
                "{}\t{}\t[{}]",
                reference.name,
                reference.kind,
                reference.indices.join("][")
            ),
        }
    }
    Ok(())
}

/// Handles the reorder command.
#[tracing::instrument(skip(template))]
pub fn handle_reorder_command(template: &str, order: &[String]) -> anyhow::Result<()> {
    let mut model = VariableOrder::new(template);
    let reordered = model.reorder(order)?;
    println!("{}", reordered);
    Ok(())
}
