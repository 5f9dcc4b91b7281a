use clap::Args;
use storefront_app::domain::catalog::models::{NewProduct, ProductUuid};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// URL slug, unique across products
    #[arg(long)]
    slug: String,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<Uuid>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let product = context
        .catalog
        .create_product(NewProduct {
            uuid: args
                .product_uuid
                .map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: args.name,
            slug: args.slug,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_slug: {}", product.slug);

    Ok(())
}
