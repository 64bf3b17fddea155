use brecho_core::api::{ConsignorQrRequest, CreateConsignorRequest};
use brecho_core::Consignor;
use reqwest::Method;

use crate::modules::system::http::{api_url, fetch_json, send_request};
use crate::modules::system::{CommandContext, ListResponse};

pub(crate) async fn fetch_consignors(ctx: &CommandContext<'_>) -> anyhow::Result<Vec<Consignor>> {
    let consignors: ListResponse<Consignor> = fetch_json(ctx, "/consignors").await?;
    Ok(consignors.into_vec())
}

pub(crate) async fn create_consignor(
    ctx: &CommandContext<'_>,
    payload: CreateConsignorRequest,
) -> anyhow::Result<reqwest::Response> {
    let url = api_url(ctx, "/consignors");
    send_request(ctx, Method::POST, url, Some(serde_json::to_value(&payload)?)).await
}

pub(crate) async fn request_qr(
    ctx: &CommandContext<'_>,
    payload: ConsignorQrRequest,
) -> anyhow::Result<reqwest::Response> {
    let url = api_url(ctx, "/qr/consignor");
    send_request(ctx, Method::POST, url, Some(serde_json::to_value(&payload)?)).await
}
