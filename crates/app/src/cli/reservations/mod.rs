use clap::{Args, Subcommand};

mod sweep;

#[derive(Debug, Args)]
pub(crate) struct ReservationsCommand {
    #[command(subcommand)]
    command: ReservationsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReservationsSubcommand {
    /// Deactivate every expired reservation once
    Sweep(sweep::SweepArgs),
}

pub(crate) async fn run(command: ReservationsCommand) -> Result<(), String> {
    match command.command {
        ReservationsSubcommand::Sweep(args) => sweep::run(args).await,
    }
}
