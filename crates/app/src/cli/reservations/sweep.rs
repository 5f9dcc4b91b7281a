use clap::Args;
use jiff::Timestamp;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SweepArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: SweepArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let swept = context
        .reservations
        .sweep_expired(Timestamp::now())
        .await
        .map_err(|error| format!("failed to sweep reservations: {error}"))?;

    println!("swept: {swept}");

    Ok(())
}
