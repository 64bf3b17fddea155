use crate::cli_args::*;
use crate::modules::system::CommandContext;

use crate::modules::consignors::handle_consignor;
use crate::modules::intake::handle_intake;
use crate::modules::items::handle_item;
use crate::modules::mobile::handle_mobile;
use crate::modules::sales::handle_sale;

pub(crate) async fn handle_command(
    command: Command,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match command {
        Command::Item(args) => handle_item(args, ctx).await?,
        Command::Consignor(args) => handle_consignor(args, ctx).await?,
        Command::Sale(args) => handle_sale(args, ctx).await?,
        Command::Intake(args) => handle_intake(args, ctx).await?,
        Command::Mobile(args) => handle_mobile(args, ctx).await?,
        Command::Config(_) | Command::FieldTypes | Command::Schema(_) => {
            unreachable!()
        }
    }

    Ok(())
}
