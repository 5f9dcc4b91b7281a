use clap::{Args, Subcommand};

mod create_product;
mod create_variant;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Create a product
    CreateProduct(create_product::CreateProductArgs),

    /// Create a purchasable variant of an existing product
    CreateVariant(create_variant::CreateVariantArgs),
}

pub(crate) async fn run(command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::CreateProduct(args) => create_product::run(args).await,
        CatalogSubcommand::CreateVariant(args) => create_variant::run(args).await,
    }
}
