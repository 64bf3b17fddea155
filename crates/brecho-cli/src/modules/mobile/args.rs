use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct MobileArgs {
    #[command(subcommand)]
    pub command: MobileCommand,
}

#[derive(Subcommand)]
pub enum MobileCommand {
    #[command(about = "Multipart analysis of photos, voice note and text")]
    Analyze(MobileAnalyzeArgs),
    #[command(about = "Upload several reviewed proposals in one request")]
    Upload(MobileUploadArgs),
}

#[derive(Args)]
pub struct MobileAnalyzeArgs {
    #[arg(required = true)]
    pub photos: Vec<PathBuf>,
    #[arg(long)]
    pub audio: Option<PathBuf>,
    #[arg(long, help = "Free-text notes about the item")]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct MobileUploadArgs {
    #[arg(required = true, help = "Proposal JSON files")]
    pub proposals: Vec<PathBuf>,
    #[arg(long, help = "Consignor ID for every item (required)")]
    pub consignor: Option<String>,
    #[arg(long = "photo", help = "Photos; only with a single proposal")]
    pub photos: Vec<PathBuf>,
    #[arg(long, help = "Print the payload without sending it")]
    pub dry_run: bool,
}
