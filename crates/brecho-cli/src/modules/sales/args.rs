use clap::{Args, Subcommand};

#[derive(Args)]
pub struct SaleArgs {
    #[command(subcommand)]
    pub command: SaleCommand,
}

#[derive(Subcommand)]
pub enum SaleCommand {
    List(SaleListArgs),
    Create(SaleWriteArgs),
    Update(SaleUpdateArgs),
    Delete(SaleDeleteArgs),
    #[command(about = "Sales count and revenue, per consignor")]
    Summary(SaleSummaryArgs),
}

#[derive(Args)]
pub struct SaleListArgs {
    #[arg(long, help = "Consignor ID")]
    pub consignor: Option<String>,
    #[arg(long, help = "Print raw JSON instead of a table")]
    pub json: bool,
}

#[derive(Args)]
pub struct SaleWriteArgs {
    #[arg(long)]
    pub sku: String,
    #[arg(long)]
    pub price: f64,
    #[arg(long, help = "Consignor ID")]
    pub consignor: Option<String>,
    #[arg(long, help = "e.g. pix, dinheiro, cartao")]
    pub payment_method: Option<String>,
    #[arg(long, help = "RFC 3339 timestamp (default: now)")]
    pub sold_at: Option<String>,
}

#[derive(Args)]
pub struct SaleUpdateArgs {
    pub id: String,
    #[command(flatten)]
    pub sale: SaleWriteArgs,
}

#[derive(Args)]
pub struct SaleDeleteArgs {
    pub id: String,
}

#[derive(Args)]
pub struct SaleSummaryArgs {
    #[arg(long, help = "Only sales at or after this RFC 3339 timestamp")]
    pub since: Option<String>,
    #[arg(long, help = "Print JSON instead of text")]
    pub json: bool,
}
