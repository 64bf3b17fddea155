use clap::{Args, Subcommand, ValueEnum};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Create or update a context")]
    SetContext(SetContextArgs),
    #[command(about = "Set the active context")]
    UseContext(UseContextArgs),
    #[command(about = "Print the active context name")]
    CurrentContext,
    #[command(about = "List known context names")]
    GetContexts,
}

#[derive(Args)]
pub struct SetContextArgs {
    #[arg(help = "Context name")]
    pub name: String,
    #[arg(long, help = "API base URL")]
    pub addr: Option<String>,
    #[arg(long, help = "Operator name recorded in logs")]
    pub operator: Option<String>,
}

#[derive(Args)]
pub struct UseContextArgs {
    #[arg(help = "Context name")]
    pub name: String,
}

#[derive(Args)]
pub struct SchemaArgs {
    #[arg(value_enum, default_value_t = SchemaTarget::Submission)]
    pub target: SchemaTarget,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SchemaTarget {
    Submission,
    Proposal,
    Item,
    Descriptor,
}
