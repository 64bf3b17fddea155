use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConsignorArgs {
    #[command(subcommand)]
    pub command: ConsignorCommand,
}

#[derive(Subcommand)]
pub enum ConsignorCommand {
    List(ConsignorListArgs),
    Create(ConsignorCreateArgs),
    #[command(about = "Write a consignor QR code to a PNG file")]
    Qr(ConsignorQrArgs),
}

#[derive(Args)]
pub struct ConsignorListArgs {
    #[arg(long, help = "Print raw JSON instead of a table")]
    pub json: bool,
}

#[derive(Args)]
pub struct ConsignorCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, help = "Commission in percent, e.g. 40")]
    pub commission: Option<f64>,
}

#[derive(Args)]
pub struct ConsignorQrArgs {
    pub consignor_id: String,
    #[arg(long, default_value_t = 300, help = "Image size in pixels")]
    pub size: u32,
    #[arg(long, short, help = "Output file (default: consignor-<id>.png)")]
    pub output: Option<PathBuf>,
}
