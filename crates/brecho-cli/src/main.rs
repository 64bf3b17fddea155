use clap::Parser;
use tracing::{info_span, Instrument};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod cli_args;
mod cli_command;
mod modules;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::system::CommandContext;
use crate::modules::system::{
    ensure_secure_addr, handle_config_command, load_config, resolve_addr, save_config,
};
use crate::modules::system::{handle_field_types_command, handle_schema_command};

pub(crate) const DEFAULT_ADDR: &str = "http://127.0.0.1:8000";
pub(crate) const API_URL_ENV: &str = "BRECHO_API_URL";
pub(crate) const HOSTNAME_ENVS: [&str; 2] = ["BRECHO_HOSTNAME", "HOSTNAME"];
pub(crate) const PRODUCTION_ADDR: &str = "https://api.brecho.app";
pub(crate) const PRODUCTION_DOMAIN: &str = "brecho.app";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(cli.insecure)
        .build()?;
    let mut config = load_config()?;
    let command = cli.command;

    match command {
        Command::Config(args) => {
            handle_config_command(args, &mut config)?;
            save_config(&config)?;
        }
        Command::FieldTypes => {
            handle_field_types_command();
        }
        Command::Schema(args) => {
            handle_schema_command(args)?;
        }
        command => {
            let context_name = cli.context.or_else(|| config.current_context.clone());
            let context = context_name
                .as_deref()
                .and_then(|name| config.contexts.get(name))
                .cloned();
            let addr = resolve_addr(cli.addr, context.as_ref());
            ensure_secure_addr(&addr, cli.insecure)?;
            let operator = cli
                .operator
                .or_else(|| context.as_ref().and_then(|ctx| ctx.operator.clone()));

            let span = info_span!(
                "session",
                session_id = %Uuid::now_v7(),
                operator = operator.as_deref().unwrap_or("-"),
                context = context_name.as_deref().unwrap_or("-"),
            );
            let mut ctx = CommandContext {
                client: &client,
                addr: &addr,
                access_token: cli.token,
                operator,
            };

            handle_command(command, &mut ctx).instrument(span).await?;
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
