use brecho_core::FieldKind;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::modules::items::args::parse_key_value;

#[derive(Args)]
pub struct IntakeArgs {
    #[command(subcommand)]
    pub command: IntakeCommand,
}

#[derive(Subcommand)]
pub enum IntakeCommand {
    #[command(about = "Send photos (and a voice note) for AI analysis")]
    Analyze(IntakeAnalyzeArgs),
    #[command(about = "Ask which extra fields a category needs")]
    Fields(IntakeFieldsArgs),
    #[command(about = "Show a saved proposal as grouped fields")]
    Review(IntakeReviewArgs),
    #[command(about = "Edit a saved proposal and confirm the intake")]
    Submit(IntakeSubmitArgs),
}

#[derive(Args)]
pub struct IntakeAnalyzeArgs {
    #[arg(required = true, help = "Photo files, in capture order")]
    pub photos: Vec<PathBuf>,
    #[arg(long, help = "Voice note describing the item")]
    pub audio: Option<PathBuf>,
    #[arg(long, short, help = "Save the proposal JSON to this file")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct IntakeFieldsArgs {
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub subcategory: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long = "photo")]
    pub photos: Vec<PathBuf>,
    #[arg(long, short, help = "Save the descriptors JSON to this file")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct IntakeReviewArgs {
    #[arg(help = "Proposal JSON saved by `intake analyze`")]
    pub proposal: PathBuf,
}

#[derive(Args)]
pub struct IntakeSubmitArgs {
    #[arg(help = "Proposal JSON saved by `intake analyze`")]
    pub proposal: PathBuf,
    #[arg(long, help = "Consignor ID (required)")]
    pub consignor: Option<String>,
    #[arg(long, help = "Descriptors JSON saved by `intake fields`")]
    pub descriptors: Option<PathBuf>,
    #[arg(
        long = "add-field",
        value_name = "NAME[:TYPE[:OPT|OPT]]",
        value_parser = parse_custom_field,
        help = "Declare a custom field; repeatable"
    )]
    pub add_fields: Vec<CustomFieldSpec>,
    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Field to write; repeatable"
    )]
    pub values: Vec<(String, String)>,
    #[arg(long = "remove", value_name = "KEY")]
    pub remove: Vec<String>,
    #[arg(long = "photo", help = "Photo files, in capture order")]
    pub photos: Vec<PathBuf>,
    #[arg(long, help = "Discard edits and use the proposal as analyzed")]
    pub reset: bool,
    #[arg(long, help = "Print the payload without sending it")]
    pub dry_run: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CustomFieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub options: Vec<String>,
}

pub(crate) fn parse_custom_field(raw: &str) -> Result<CustomFieldSpec, String> {
    let mut parts = raw.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim().to_string();
    if name.is_empty() {
        return Err(format!("empty field name in `{raw}`"));
    }
    let kind = match parts.next().map(str::trim).filter(|kind| !kind.is_empty()) {
        Some(kind) => kind.parse::<FieldKind>().map_err(|err| err.to_string())?,
        None => FieldKind::Text,
    };
    let options = parts
        .next()
        .map(|options| {
            options
                .split('|')
                .map(str::trim)
                .filter(|option| !option.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Ok(CustomFieldSpec {
        name,
        kind,
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_field_specs() {
        assert_eq!(
            parse_custom_field("Estilo Boho").expect("plain"),
            CustomFieldSpec {
                name: "Estilo Boho".to_string(),
                kind: FieldKind::Text,
                options: Vec::new(),
            }
        );
        let select = parse_custom_field("voltagem:select:110V|220V").expect("select");
        assert_eq!(select.kind, FieldKind::Select);
        assert_eq!(select.options, vec!["110V", "220V"]);
        assert!(parse_custom_field(":number").is_err());
        assert!(parse_custom_field("peso:weight").is_err());
    }
}
