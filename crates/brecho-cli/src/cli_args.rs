use clap::{ArgAction, Parser, Subcommand};

pub use crate::modules::consignors::args::*;
pub use crate::modules::intake::args::*;
pub use crate::modules::items::args::*;
pub use crate::modules::mobile::args::*;
pub use crate::modules::sales::args::*;
pub use crate::modules::system::args::*;

#[derive(Parser)]
#[command(name = "brecho")]
#[command(about = "Brechó intake and catalogue CLI")]
pub struct Cli {
    #[arg(long, help = "API base URL (overrides every other source)")]
    pub addr: Option<String>,
    #[arg(long, env = "BRECHO_TOKEN", help = "Bearer token passed to the API as is")]
    pub token: Option<String>,
    #[arg(long)]
    pub context: Option<String>,
    #[arg(long, env = "BRECHO_OPERATOR", help = "Operator name recorded in logs")]
    pub operator: Option<String>,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[arg(long, help = "Allow http:// to non-loopback hosts and invalid TLS certificates")]
    pub insecure: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Config(ConfigArgs),
    Item(ItemArgs),
    Consignor(ConsignorArgs),
    Sale(SaleArgs),
    #[command(about = "AI-assisted intake: analyze photos, review and confirm")]
    Intake(IntakeArgs),
    #[command(about = "Mobile intake transport: multipart analysis and bulk upload")]
    Mobile(MobileArgs),
    #[command(about = "List the dynamic field types")]
    FieldTypes,
    #[command(about = "Print the JSON schema of an API payload")]
    Schema(SchemaArgs),
}
