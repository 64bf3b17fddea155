use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::modules::system::CommandContext;

pub(crate) fn api_url(ctx: &CommandContext<'_>, path: &str) -> String {
    format!("{}{}", ctx.addr.trim_end_matches('/'), path)
}

fn authorize(
    ctx: &CommandContext<'_>,
    builder: reqwest::RequestBuilder,
) -> reqwest::RequestBuilder {
    match ctx.access_token.as_deref() {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Sends one JSON request. Failures are returned to the caller as is; there
/// are no retries.
pub(crate) async fn send_request(
    ctx: &CommandContext<'_>,
    method: Method,
    url: String,
    payload: Option<serde_json::Value>,
) -> anyhow::Result<reqwest::Response> {
    let method_clone = method.clone();
    let builder = authorize(ctx, ctx.client.request(method, &url));
    let builder = if let Some(payload) = payload {
        builder.json(&payload)
    } else {
        builder
    };
    debug!(method = %method_clone, url = %url, "http request");
    let start = std::time::Instant::now();
    let response = builder.send().await?;
    debug!(
        method = %method_clone,
        url = %url,
        status = %response.status(),
        elapsed_ms = start.elapsed().as_millis(),
        "http response"
    );
    Ok(response)
}

pub(crate) async fn send_multipart(
    ctx: &CommandContext<'_>,
    url: String,
    form: Form,
) -> anyhow::Result<reqwest::Response> {
    let builder = authorize(ctx, ctx.client.post(&url)).multipart(form);
    debug!(method = "POST", url = %url, "http multipart request");
    let start = std::time::Instant::now();
    let response = builder.send().await?;
    debug!(
        method = "POST",
        url = %url,
        status = %response.status(),
        elapsed_ms = start.elapsed().as_millis(),
        "http response"
    );
    Ok(response)
}

pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> anyhow::Result<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Request failed: {status} {body}");
    }
    Ok(response.json::<T>().await?)
}

pub(crate) async fn fetch_json<T: DeserializeOwned>(
    ctx: &CommandContext<'_>,
    path: &str,
) -> anyhow::Result<T> {
    let response = send_request(ctx, Method::GET, api_url(ctx, path), None).await?;
    read_json(response).await
}

pub(crate) async fn print_json_response(response: reqwest::Response) -> anyhow::Result<()> {
    let body: serde_json::Value = read_json(response).await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

pub(crate) async fn print_empty_response(
    response: reqwest::Response,
    message: &str,
) -> anyhow::Result<()> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Request failed: {status} {body}");
    }
    println!("{message}");
    Ok(())
}

/// Encodes a path segment such as a sku.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
