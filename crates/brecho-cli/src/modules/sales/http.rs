use brecho_core::api::SaleRequest;
use brecho_core::Sale;
use reqwest::Method;

use crate::modules::system::http::{api_url, fetch_json, segment, send_request};
use crate::modules::system::{CommandContext, ListResponse};

pub(crate) async fn fetch_sales(ctx: &CommandContext<'_>) -> anyhow::Result<Vec<Sale>> {
    let sales: ListResponse<Sale> = fetch_json(ctx, "/sales").await?;
    Ok(sales.into_vec())
}

pub(crate) async fn create_sale(
    ctx: &CommandContext<'_>,
    payload: SaleRequest,
) -> anyhow::Result<reqwest::Response> {
    let url = api_url(ctx, "/sales");
    send_request(ctx, Method::POST, url, Some(serde_json::to_value(&payload)?)).await
}

pub(crate) async fn update_sale(
    ctx: &CommandContext<'_>,
    id: &str,
    payload: SaleRequest,
) -> anyhow::Result<reqwest::Response> {
    let url = api_url(ctx, &format!("/sales/{}", segment(id)));
    send_request(ctx, Method::PUT, url, Some(serde_json::to_value(&payload)?)).await
}

pub(crate) async fn delete_sale(
    ctx: &CommandContext<'_>,
    id: &str,
) -> anyhow::Result<reqwest::Response> {
    let url = api_url(ctx, &format!("/sales/{}", segment(id)));
    send_request(ctx, Method::DELETE, url, None).await
}
