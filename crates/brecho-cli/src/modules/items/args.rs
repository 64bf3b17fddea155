use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ItemArgs {
    #[command(subcommand)]
    pub command: ItemCommand,
}

#[derive(Subcommand)]
pub enum ItemCommand {
    #[command(about = "List items, optionally filtered")]
    List(ItemListArgs),
    #[command(about = "Show an item with its fields grouped by category")]
    Get(ItemGetArgs),
    #[command(about = "Edit item fields and send the changes")]
    Set(ItemSetArgs),
    #[command(about = "Archive an item (it is never deleted)")]
    Archive(ItemSkuArgs),
    #[command(about = "Bring an archived item back")]
    Restore(ItemSkuArgs),
}

#[derive(Args)]
pub struct ItemListArgs {
    #[arg(long, help = "Search sku, name, brand and category")]
    pub search: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, help = "Consignor ID")]
    pub consignor: Option<String>,
    #[arg(long, help = "Include archived items")]
    pub archived: bool,
    #[arg(long, help = "Print raw JSON instead of a table")]
    pub json: bool,
}

#[derive(Args)]
pub struct ItemGetArgs {
    pub sku: String,
    #[arg(long, help = "Print the stored record as JSON")]
    pub json: bool,
}

#[derive(Args)]
pub struct ItemSetArgs {
    pub sku: String,
    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Field to write; repeatable"
    )]
    pub values: Vec<(String, String)>,
    #[arg(long = "remove", value_name = "KEY", help = "Dynamic field to drop; repeatable")]
    pub remove: Vec<String>,
    #[arg(long, help = "Print the patch without sending it")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ItemSkuArgs {
    pub sku: String,
}

pub(crate) fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
