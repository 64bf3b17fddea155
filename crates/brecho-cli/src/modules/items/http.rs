use brecho_core::{Item, Record};
use reqwest::Method;

use crate::modules::system::http::{api_url, fetch_json, segment, send_request};
use crate::modules::system::{CommandContext, ListResponse};

pub(crate) async fn fetch_items(ctx: &CommandContext<'_>) -> anyhow::Result<Vec<Item>> {
    let items: ListResponse<Item> = fetch_json(ctx, "/items").await?;
    Ok(items.into_vec())
}

/// Stored record of one item. There is no single-item endpoint, so the list is
/// searched by sku.
pub(crate) async fn find_item(ctx: &CommandContext<'_>, sku: &str) -> anyhow::Result<Record> {
    let items: ListResponse<Record> = fetch_json(ctx, "/items").await?;
    items
        .into_vec()
        .into_iter()
        .find(|record| record.get("sku").and_then(|value| value.as_str()) == Some(sku))
        .ok_or_else(|| anyhow::anyhow!("item not found: {sku}"))
}

pub(crate) async fn patch_item(
    ctx: &CommandContext<'_>,
    sku: &str,
    payload: serde_json::Value,
) -> anyhow::Result<reqwest::Response> {
    let url = api_url(ctx, &format!("/items/{}", segment(sku)));
    send_request(ctx, Method::PATCH, url, Some(payload)).await
}
