use clap::{Parser, Subcommand};

mod catalog;
mod db;
mod orders;
mod reservations;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Catalog(catalog::CatalogCommand),
    Db(db::DbCommand),
    Orders(orders::OrdersCommand),
    Reservations(reservations::ReservationsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Catalog(command) => catalog::run(command).await,
            Commands::Db(command) => db::run(command).await,
            Commands::Orders(command) => orders::run(command).await,
            Commands::Reservations(command) => reservations::run(command).await,
        }
    }
}

/// Database connection flag shared by every subcommand.
#[derive(Debug, clap::Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub(crate) database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn context(&self) -> Result<storefront_app::context::AppContext, String> {
        storefront_app::context::AppContext::from_database_url(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
