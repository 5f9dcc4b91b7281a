use clap::{Args, Subcommand};

mod advance;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// Record a fulfilment status change reported for an order
    Advance(advance::AdvanceArgs),
}

pub(crate) async fn run(command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::Advance(args) => advance::run(args).await,
    }
}
