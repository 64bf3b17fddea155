use brecho_core::api::{ConfirmIntakeRequest, DynamicFieldsRequest, IntakeRequest};
use reqwest::Method;

use crate::modules::system::http::{api_url, send_request};
use crate::modules::system::CommandContext;

pub(crate) async fn analyze_intake(
    ctx: &CommandContext<'_>,
    payload: IntakeRequest,
) -> anyhow::Result<reqwest::Response> {
    let url = api_url(ctx, "/ai/intake");
    send_request(ctx, Method::POST, url, Some(serde_json::to_value(&payload)?)).await
}

pub(crate) async fn request_dynamic_fields(
    ctx: &CommandContext<'_>,
    payload: DynamicFieldsRequest,
) -> anyhow::Result<reqwest::Response> {
    let url = api_url(ctx, "/ai/dynamic-fields");
    send_request(ctx, Method::POST, url, Some(serde_json::to_value(&payload)?)).await
}

pub(crate) async fn confirm_intake(
    ctx: &CommandContext<'_>,
    payload: ConfirmIntakeRequest,
) -> anyhow::Result<reqwest::Response> {
    let url = api_url(ctx, "/ai/confirm-intake");
    send_request(ctx, Method::POST, url, Some(serde_json::to_value(&payload)?)).await
}
