use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use brecho_core::api::{ConsignorQrRequest, ConsignorQrResponse, CreateConsignorRequest};
use brecho_core::Consignor;
use std::path::PathBuf;
use tracing::info;

use super::http::{create_consignor, fetch_consignors, request_qr};
use crate::cli_args::*;
use crate::modules::system::http::{print_json_response, read_json};
use crate::modules::system::CommandContext;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

pub(crate) async fn handle_consignor(
    args: ConsignorArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        ConsignorCommand::List(args) => {
            let consignors = fetch_consignors(ctx).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&consignors)?);
            } else {
                print_consignor_table(&consignors);
            }
        }
        ConsignorCommand::Create(args) => {
            let payload = CreateConsignorRequest {
                name: args.name,
                phone: args.phone,
                email: args.email,
                commission_percent: args.commission,
            };
            let response = create_consignor(ctx, payload).await?;
            print_json_response(response).await?;
        }
        ConsignorCommand::Qr(args) => {
            let payload = ConsignorQrRequest {
                consignor_id: args.consignor_id.clone(),
                size: args.size,
            };
            let response = request_qr(ctx, payload).await?;
            let body: ConsignorQrResponse = read_json(response).await?;
            let png = decode_png(&body.qr_code)?;
            let output = args
                .output
                .unwrap_or_else(|| PathBuf::from(format!("consignor-{}.png", args.consignor_id)));
            std::fs::write(&output, &png)?;
            info!(consignor_id = %args.consignor_id, bytes = png.len(), "qr code written");
            println!("{}", output.display());
        }
    }
    Ok(())
}

/// Accepts bare base64 or a `data:image/png;base64,` URL.
fn decode_png(encoded: &str) -> anyhow::Result<Vec<u8>> {
    let encoded = encoded
        .split_once("base64,")
        .map_or(encoded, |(_, data)| data)
        .trim();
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|err| anyhow::anyhow!("invalid QR code payload: {err}"))?;
    if !bytes.starts_with(PNG_SIGNATURE) {
        anyhow::bail!("QR code payload is not a PNG image");
    }
    Ok(bytes)
}

fn print_consignor_table(consignors: &[Consignor]) {
    let id_width = consignors
        .iter()
        .map(|c| c.id.len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let name_width = consignors
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    println!(
        "{:<id_width$}  {:<name_width$}  {:<16}  COMMISSION",
        "ID", "NAME", "PHONE"
    );
    for consignor in consignors {
        let commission = consignor
            .commission_percent
            .map(|value| format!("{value}%"))
            .unwrap_or_else(|| "-".to_string());
        let name = if consignor.active {
            consignor.name.clone()
        } else {
            format!("{} (inactive)", consignor.name)
        };
        println!(
            "{:<id_width$}  {:<name_width$}  {:<16}  {}",
            consignor.id,
            name,
            consignor.phone.as_deref().unwrap_or("-"),
            commission
        );
    }
}
