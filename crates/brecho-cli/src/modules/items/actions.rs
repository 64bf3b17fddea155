use brecho_core::api::ArchiveItemRequest;
use brecho_core::{Consignor, Directory, EditSession, FieldTarget, Item, ItemFilter};
use tracing::{info, warn};

use super::http::{fetch_items, find_item, patch_item};
use super::render::print_session;
use crate::cli_args::*;
use crate::modules::consignors::fetch_consignors;
use crate::modules::system::http::print_json_response;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_item(
    args: ItemArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        ItemCommand::List(args) => {
            let items = fetch_items(ctx).await?;
            let filter = ItemFilter {
                search: args.search,
                status: args.status,
                consignor_id: args.consignor,
                include_archived: args.archived,
            };
            let matched = filter.apply(&items);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&matched)?);
                return Ok(());
            }
            let consignors = consignors_or_empty(ctx).await;
            let directory = Directory::new(&consignors, &items);
            print_item_table(&matched, &directory);
        }
        ItemCommand::Get(args) => {
            let record = find_item(ctx, &args.sku).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
                return Ok(());
            }
            print_session(&EditSession::from_item(record));
        }
        ItemCommand::Set(args) => {
            let record = find_item(ctx, &args.sku).await?;
            let mut session = EditSession::from_item(record);
            for (key, value) in &args.values {
                if session.set_field_input(key, value) == FieldTarget::Ignored {
                    warn!(key = %key, "field is read-only; skipped");
                }
            }
            for key in &args.remove {
                if !session.remove_field(key) {
                    warn!(key = %key, "no such dynamic field");
                }
            }
            let patch = session.changes();
            if patch.is_empty() {
                println!("No changes");
                return Ok(());
            }
            if args.dry_run {
                println!("{}", serde_json::to_string_pretty(&patch)?);
                return Ok(());
            }
            info!(
                sku = %args.sku,
                keys = patch.len(),
                operator = ctx.operator.as_deref().unwrap_or("-"),
                "patching item"
            );
            let response =
                patch_item(ctx, &args.sku, serde_json::Value::Object(patch)).await?;
            print_json_response(response).await?;
        }
        ItemCommand::Archive(args) => {
            let payload = serde_json::to_value(ArchiveItemRequest::archive())?;
            let response = patch_item(ctx, &args.sku, payload).await?;
            print_json_response(response).await?;
        }
        ItemCommand::Restore(args) => {
            let payload = serde_json::to_value(ArchiveItemRequest::restore())?;
            let response = patch_item(ctx, &args.sku, payload).await?;
            print_json_response(response).await?;
        }
    }
    Ok(())
}

// A failed consignor fetch only degrades the table to "N/A" names.
async fn consignors_or_empty(ctx: &CommandContext<'_>) -> Vec<Consignor> {
    match fetch_consignors(ctx).await {
        Ok(consignors) => consignors,
        Err(err) => {
            warn!(error = %err, "consignor list unavailable");
            Vec::new()
        }
    }
}

fn print_item_table(items: &[&Item], directory: &Directory<'_>) {
    let mut rows = Vec::new();
    let mut sku_width = "SKU".len();
    let mut name_width = "NAME".len();
    let mut consignor_width = "CONSIGNOR".len();

    for item in items {
        let name = item.name.as_deref().unwrap_or("-");
        let consignor = directory.consignor_name(item.consignor_id.as_deref());
        let status = if item.is_archived() {
            "archived".to_string()
        } else {
            item.status.clone().unwrap_or_else(|| "-".to_string())
        };
        let price = item
            .price
            .map(|price| format!("{price:.2}"))
            .unwrap_or_else(|| "-".to_string());
        sku_width = sku_width.max(item.sku.len());
        name_width = name_width.max(name.chars().count());
        consignor_width = consignor_width.max(consignor.chars().count());
        rows.push((item.sku.as_str(), name, consignor, status, price));
    }

    println!(
        "{:<sku_width$}  {:<name_width$}  {:<consignor_width$}  {:<9}  PRICE",
        "SKU", "NAME", "CONSIGNOR", "STATUS"
    );
    for (sku, name, consignor, status, price) in rows {
        println!(
            "{sku:<sku_width$}  {name:<name_width$}  {consignor:<consignor_width$}  {status:<9}  {price}"
        );
    }
}
