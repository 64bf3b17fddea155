use brecho_core::api::{DynamicFieldsRequest, DynamicFieldsResponse, IntakeRequest};
use brecho_core::{EditSession, FieldTarget, IntakeProposal, Photo};
use std::path::PathBuf;
use tracing::{info, warn};

use super::files::{read_json_file, read_photo, write_json_file};
use super::http::{analyze_intake, confirm_intake, request_dynamic_fields};
use crate::cli_args::*;
use crate::modules::items::print_session;
use crate::modules::system::http::{print_json_response, read_json};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_intake(
    args: IntakeArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        IntakeCommand::Analyze(args) => {
            let images = encode_photos(&args.photos)?;
            let audio = args
                .audio
                .as_deref()
                .map(read_photo)
                .transpose()?
                .map(|audio| audio.to_base64());
            info!(photos = images.len(), audio = audio.is_some(), "analyzing item");
            let response = analyze_intake(ctx, IntakeRequest { images, audio }).await?;
            let body: serde_json::Value = read_json(response).await?;
            if let Some(output) = args.output.as_deref() {
                write_json_file(output, &body)?;
            }
            let proposal: IntakeProposal = serde_json::from_value(body)?;
            print_proposal(&proposal);
        }
        IntakeCommand::Fields(args) => {
            let payload = DynamicFieldsRequest {
                category: args.category,
                subcategory: args.subcategory,
                brand: args.brand,
                images: encode_photos(&args.photos)?,
            };
            let response = request_dynamic_fields(ctx, payload).await?;
            let body: serde_json::Value = read_json(response).await?;
            let fields = serde_json::from_value::<DynamicFieldsResponse>(body)?.into_fields();
            let fields = serde_json::to_value(&fields)?;
            if let Some(output) = args.output.as_deref() {
                write_json_file(output, &fields)?;
            }
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        IntakeCommand::Review(args) => {
            let proposal: IntakeProposal = read_json_file(&args.proposal)?;
            print_proposal(&proposal);
        }
        IntakeCommand::Submit(args) => {
            let proposal: IntakeProposal = read_json_file(&args.proposal)?;
            let mut session = open_session(proposal, args.consignor.as_deref(), &args.photos)?;
            if let Some(path) = args.descriptors.as_deref() {
                let descriptors: DynamicFieldsResponse = read_json_file(path)?;
                session.apply_descriptors(&descriptors.into_fields());
            }
            for spec in args.add_fields {
                if session
                    .add_custom_field(&spec.name, spec.kind, spec.options)
                    .is_none()
                {
                    warn!(name = %spec.name, "custom field name is blank or reserved; skipped");
                }
            }
            for (key, value) in &args.values {
                if session.set_field_input(key, value) == FieldTarget::Ignored {
                    warn!(key = %key, "field is read-only; skipped");
                }
            }
            for key in &args.remove {
                session.remove_field(key);
            }
            if args.reset {
                session.reset_to_original();
            }

            let submission = session.build_submission()?;
            if args.dry_run {
                println!("{}", serde_json::to_string_pretty(&submission)?);
                return Ok(());
            }
            info!(
                sku = %submission.sku,
                dynamic_fields = submission.dynamic_fields.len(),
                photos = submission.photos.len(),
                "confirming intake"
            );
            let response = confirm_intake(ctx, submission.into_confirm_request()).await?;
            print_json_response(response).await?;
        }
    }
    Ok(())
}

/// Editing session over a proposal with the consignor and photos attached.
pub(crate) fn open_session(
    proposal: IntakeProposal,
    consignor: Option<&str>,
    photos: &[PathBuf],
) -> anyhow::Result<EditSession> {
    let mut session = EditSession::from_proposal(proposal);
    if let Some(consignor) = consignor {
        session.select_consignor(consignor);
    }
    for path in photos {
        session.attach_photo(read_photo(path)?);
    }
    Ok(session)
}

fn encode_photos(paths: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    paths
        .iter()
        .map(|path| read_photo(path).map(|photo: Photo| photo.to_base64()))
        .collect()
}

fn print_proposal(proposal: &IntakeProposal) {
    print_session(&EditSession::from_proposal(proposal.clone()));
    let similar = proposal.ranked_similar();
    if similar.is_empty() {
        return;
    }
    println!();
    println!("[similar]");
    for item in similar {
        let price = item
            .price
            .map(|price| format!("{price:.2}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<12}  {:<32}  {:>8}  {:.3}",
            item.sku,
            item.title.as_deref().unwrap_or("-"),
            price,
            item.distance
        );
    }
}
