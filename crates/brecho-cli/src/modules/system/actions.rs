use brecho_core::api::DynamicFieldDescriptor;
use brecho_core::{FieldCategory, FieldKind, IntakeProposal, Item, ItemSubmission};
use schemars::schema_for;

use crate::cli_args::{SchemaArgs, SchemaTarget};

pub(crate) fn handle_field_types_command() {
    println!("TYPE        DESCRIPTION");
    for kind in FieldKind::ALL {
        println!("{:<10}  {}", kind.as_str(), kind_description(kind));
    }
    println!();
    println!("CATEGORY    ORDER");
    for category in FieldCategory::ORDER {
        println!("{:<10}  {}", category.as_str(), category.rank() + 1);
    }
}

fn kind_description(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "Short free text",
        FieldKind::Number => "Integer or decimal (accepts 12,50)",
        FieldKind::Boolean => "sim/não, true/false",
        FieldKind::Multiline => "Long text: descriptions, reports, notes",
        FieldKind::Select => "One of a fixed option list",
    }
}

pub(crate) fn handle_schema_command(args: SchemaArgs) -> anyhow::Result<()> {
    let schema = match args.target {
        SchemaTarget::Submission => schema_for!(ItemSubmission),
        SchemaTarget::Proposal => schema_for!(IntakeProposal),
        SchemaTarget::Item => schema_for!(Item),
        SchemaTarget::Descriptor => schema_for!(DynamicFieldDescriptor),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
