use brecho_core::api::BulkItemsRequest;
use brecho_core::Photo;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::modules::system::http::{api_url, send_multipart, send_request};
use crate::modules::system::CommandContext;

const OCTET_STREAM: &str = "application/octet-stream";

/// Multipart body of `POST /ai/analyze`: repeated `photos` parts, then the
/// optional `audio` and `text` parts.
pub(crate) fn analyze_form(
    photos: Vec<Photo>,
    audio: Option<Photo>,
    text: Option<String>,
) -> anyhow::Result<Form> {
    let mut form = Form::new();
    for (index, photo) in photos.into_iter().enumerate() {
        let fallback = format!("photo-{}.jpg", index + 1);
        form = form.part("photos", file_part(photo, fallback)?);
    }
    if let Some(audio) = audio {
        form = form.part("audio", file_part(audio, "audio.webm".to_string())?);
    }
    if let Some(text) = text.filter(|text| !text.trim().is_empty()) {
        form = form.text("text", text);
    }
    Ok(form)
}

fn file_part(photo: Photo, fallback_name: String) -> anyhow::Result<Part> {
    let mime = photo.mime_type.as_deref().unwrap_or(OCTET_STREAM).to_string();
    let name = photo.filename.unwrap_or(fallback_name);
    Ok(Part::bytes(photo.bytes).file_name(name).mime_str(&mime)?)
}

pub(crate) async fn analyze_multipart(
    ctx: &CommandContext<'_>,
    form: Form,
) -> anyhow::Result<reqwest::Response> {
    let url = api_url(ctx, "/ai/analyze");
    send_multipart(ctx, url, form).await
}

pub(crate) async fn upload_bulk(
    ctx: &CommandContext<'_>,
    payload: BulkItemsRequest,
) -> anyhow::Result<reqwest::Response> {
    let url = api_url(ctx, "/items/bulk");
    send_request(ctx, Method::POST, url, Some(serde_json::to_value(&payload)?)).await
}
