use brecho_core::api::SaleRequest;
use brecho_core::{parse_rfc3339, Consignor, Directory, Item, Sale, SalesSummary};
use chrono::Utc;
use tracing::warn;

use super::http::{create_sale, delete_sale, fetch_sales, update_sale};
use crate::cli_args::*;
use crate::modules::consignors::fetch_consignors;
use crate::modules::items::fetch_items;
use crate::modules::system::http::{print_empty_response, print_json_response};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_sale(
    args: SaleArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        SaleCommand::List(args) => {
            let sales = fetch_sales(ctx).await?;
            let (consignors, items) = lookups(ctx).await;
            let directory = Directory::new(&consignors, &items);
            let sales: Vec<&Sale> = sales
                .iter()
                .filter(|sale| match args.consignor.as_deref() {
                    Some(wanted) => directory.sale_consignor(sale) == Some(wanted),
                    None => true,
                })
                .collect();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&sales)?);
            } else {
                print_sale_table(&sales, &directory);
            }
        }
        SaleCommand::Create(args) => {
            let payload = build_sale_request(args)?;
            let response = create_sale(ctx, payload).await?;
            print_json_response(response).await?;
        }
        SaleCommand::Update(args) => {
            let payload = build_sale_request(args.sale)?;
            let response = update_sale(ctx, &args.id, payload).await?;
            print_json_response(response).await?;
        }
        SaleCommand::Delete(args) => {
            let response = delete_sale(ctx, &args.id).await?;
            print_empty_response(response, "Sale deleted").await?;
        }
        SaleCommand::Summary(args) => {
            let since = match args.since.as_deref() {
                Some(raw) => Some(
                    parse_rfc3339(raw)
                        .ok_or_else(|| anyhow::anyhow!("invalid --since timestamp: {raw}"))?,
                ),
                None => None,
            };
            let sales = fetch_sales(ctx).await?;
            let (consignors, items) = lookups(ctx).await;
            let directory = Directory::new(&consignors, &items);
            let summary = SalesSummary::compute(&sales, &directory, since);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Sales    {}", summary.count);
                println!("Revenue  {:.2}", summary.revenue);
                for (consignor, revenue) in &summary.by_consignor {
                    println!("  {consignor:<24}  {revenue:.2}");
                }
            }
        }
    }
    Ok(())
}

fn build_sale_request(args: SaleWriteArgs) -> anyhow::Result<SaleRequest> {
    if !(args.price.is_finite() && args.price > 0.0) {
        anyhow::bail!("price must be greater than zero");
    }
    let sold_at = match args.sold_at {
        Some(raw) => {
            if parse_rfc3339(&raw).is_none() {
                anyhow::bail!("invalid --sold-at timestamp: {raw}");
            }
            raw
        }
        None => Utc::now().to_rfc3339(),
    };
    Ok(SaleRequest {
        sku: args.sku,
        price: args.price,
        consignor_id: args.consignor,
        payment_method: args.payment_method,
        sold_at: Some(sold_at),
    })
}

// Names are cosmetic here; a failed lookup falls back to "N/A".
async fn lookups(ctx: &CommandContext<'_>) -> (Vec<Consignor>, Vec<Item>) {
    let consignors = fetch_consignors(ctx).await.unwrap_or_else(|err| {
        warn!(error = %err, "consignor list unavailable");
        Vec::new()
    });
    let items = fetch_items(ctx).await.unwrap_or_else(|err| {
        warn!(error = %err, "item list unavailable");
        Vec::new()
    });
    (consignors, items)
}

fn print_sale_table(sales: &[&Sale], directory: &Directory<'_>) {
    let id_width = sales
        .iter()
        .map(|sale| sale.id.len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let sku_width = sales
        .iter()
        .map(|sale| sale.sku.len())
        .max()
        .unwrap_or(0)
        .max("SKU".len());
    println!(
        "{:<id_width$}  {:<sku_width$}  {:<24}  {:<16}  {:>10}  SOLD AT",
        "ID", "SKU", "ITEM", "CONSIGNOR", "PRICE"
    );
    for sale in sales {
        let consignor = directory.consignor_name(directory.sale_consignor(sale));
        println!(
            "{:<id_width$}  {:<sku_width$}  {:<24}  {:<16}  {:>10.2}  {}",
            sale.id,
            sale.sku,
            directory.item_name(&sale.sku),
            consignor,
            sale.price,
            sale.sold_at.as_deref().unwrap_or("-")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn write_args(price: f64, sold_at: Option<&str>) -> SaleWriteArgs {
        SaleWriteArgs {
            sku: "BR-7".to_string(),
            price,
            consignor: Some("3".to_string()),
            payment_method: Some("pix".to_string()),
            sold_at: sold_at.map(str::to_string),
        }
    }

    #[test]
    fn sale_request_validates_price_and_timestamp() {
        assert!(build_sale_request(write_args(0.0, None)).is_err());
        assert!(build_sale_request(write_args(f64::NAN, None)).is_err());
        assert!(build_sale_request(write_args(50.0, Some("ontem"))).is_err());
        let request =
            build_sale_request(write_args(50.0, Some("2026-05-02T14:00:00-03:00"))).expect("ok");
        assert_eq!(request.sold_at.as_deref(), Some("2026-05-02T14:00:00-03:00"));
        let request = build_sale_request(write_args(50.0, None)).expect("ok");
        assert!(request.sold_at.as_deref().and_then(parse_rfc3339).is_some());
    }

    #[tokio::test]
    async fn update_puts_full_sale() {
        let mut server = Server::new_async().await;
        let put_mock = server
            .mock("PUT", "/sales/9")
            .match_header("authorization", "Bearer token")
            .match_body(Matcher::PartialJson(json!({
                "sku": "BR-7",
                "price": 80.0,
                "consignor_id": "3",
                "payment_method": "pix",
            })))
            .with_status(200)
            .with_body(json!({ "id": 9 }).to_string())
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let addr = server.url();
        let mut ctx = CommandContext {
            client: &client,
            addr: &addr,
            access_token: Some("token".to_string()),
            operator: None,
        };
        let args = SaleArgs {
            command: SaleCommand::Update(SaleUpdateArgs {
                id: "9".to_string(),
                sale: write_args(80.0, None),
            }),
        };

        handle_sale(args, &mut ctx).await.expect("update ok");
        put_mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_failure_reports_status_and_body() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/sales/9")
            .with_status(404)
            .with_body("sale not found")
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
        let args = SaleArgs {
            command: SaleCommand::Delete(SaleDeleteArgs {
                id: "9".to_string(),
            }),
        };

        let err = handle_sale(args, &mut ctx).await.expect_err("404");
        assert!(err.to_string().contains("Request failed: 404"));
        assert!(err.to_string().contains("sale not found"));
    }
}
