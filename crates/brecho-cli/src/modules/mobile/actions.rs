use brecho_core::{bulk_request, IntakeProposal, ItemSubmission};
use tracing::info;

use super::http::{analyze_form, analyze_multipart, upload_bulk};
use crate::cli_args::*;
use crate::modules::intake::{open_session, read_photo};
use crate::modules::system::http::print_json_response;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_mobile(
    args: MobileArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        MobileCommand::Analyze(args) => {
            let photos = args
                .photos
                .iter()
                .map(|path| read_photo(path))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let audio = args.audio.as_deref().map(read_photo).transpose()?;
            let form = analyze_form(photos, audio, args.text)?;
            let response = analyze_multipart(ctx, form).await?;
            print_json_response(response).await?;
        }
        MobileCommand::Upload(args) => {
            if !args.photos.is_empty() && args.proposals.len() > 1 {
                anyhow::bail!("--photo can only be used with a single proposal");
            }
            // Every item is validated before anything is sent.
            let mut submissions: Vec<ItemSubmission> = Vec::with_capacity(args.proposals.len());
            for path in &args.proposals {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| anyhow::anyhow!("cannot read {}: {err}", path.display()))?;
                let proposal: IntakeProposal = serde_json::from_str(&contents)?;
                let session = open_session(proposal, args.consignor.as_deref(), &args.photos)?;
                let submission = session
                    .build_submission()
                    .map_err(|err| anyhow::anyhow!("{}: {err}", path.display()))?;
                submissions.push(submission);
            }
            let payload = bulk_request(&submissions);
            if args.dry_run {
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(());
            }
            info!(items = payload.items.len(), "uploading bulk items");
            let response = upload_bulk(ctx, payload).await?;
            print_json_response(response).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn analyze_posts_multipart_parts() {
        let mut server = Server::new_async().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let photo = dir.path().join("etiqueta.png");
        std::fs::write(&photo, b"png-bytes").expect("photo");
        let mock = server
            .mock("POST", "/ai/analyze")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="photos"; filename="etiqueta.png""#.to_string()),
                Matcher::Regex("(?i)content-type: image/png".to_string()),
                Matcher::Regex(r#"name="text""#.to_string()),
                Matcher::Regex("vestido de festa".to_string()),
            ]))
            .with_status(200)
            .with_body(json!({ "sku": "BR-55", "cadastro": {} }).to_string())
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let addr = server.url();
        let mut ctx = CommandContext {
            client: &client,
            addr: &addr,
            access_token: None,
            operator: None,
        };
        let args = MobileArgs {
            command: MobileCommand::Analyze(MobileAnalyzeArgs {
                photos: vec![photo],
                audio: None,
                text: Some("vestido de festa".to_string()),
            }),
        };

        handle_mobile(args, &mut ctx).await.expect("analyze ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_sends_every_item_with_consignor() {
        let mut server = Server::new_async().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let first = dir.path().join("a.json");
        let second = dir.path().join("b.json");
        std::fs::write(
            &first,
            json!({ "sku": "BR-1", "cadastro": { "cor": "Azul" } }).to_string(),
        )
        .expect("first");
        std::fs::write(
            &second,
            json!({ "sku": "BR-2", "cadastro": { "tecido": "linho" } }).to_string(),
        )
        .expect("second");
        let mock = server
            .mock("POST", "/items/bulk")
            .match_body(Matcher::Json(json!({
                "items": [
                    {
                        "sku": "BR-1",
                        "consignor_id": "4",
                        "cor": "Azul",
                        "dynamic_fields": { "cor": "Azul" },
                        "photos": [],
                    },
                    {
                        "sku": "BR-2",
                        "consignor_id": "4",
                        "tecido": "linho",
                        "dynamic_fields": { "tecido": "linho" },
                        "photos": [],
                    },
                ],
            })))
            .with_status(200)
            .with_body(json!({ "created": 2 }).to_string())
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let addr = server.url();
        let mut ctx = CommandContext {
            client: &client,
            addr: &addr,
            access_token: None,
            operator: None,
        };
        let args = MobileArgs {
            command: MobileCommand::Upload(MobileUploadArgs {
                proposals: vec![first, second],
                consignor: Some("4".to_string()),
                photos: Vec::new(),
                dry_run: false,
            }),
        };

        handle_mobile(args, &mut ctx).await.expect("upload ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_rejects_missing_consignor_before_sending() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a.json");
        std::fs::write(&path, json!({ "sku": "BR-1", "cadastro": {} }).to_string())
            .expect("proposal");

        let client = reqwest::Client::new();
        let mut ctx = CommandContext {
            client: &client,
            addr: "http://127.0.0.1:9",
            access_token: None,
            operator: None,
        };
        let args = MobileArgs {
            command: MobileCommand::Upload(MobileUploadArgs {
                proposals: vec![path],
                consignor: None,
                photos: Vec::new(),
                dry_run: false,
            }),
        };

        let err = handle_mobile(args, &mut ctx).await.expect_err("rejected");
        assert!(err.to_string().contains("consignor is required"));
    }
}
