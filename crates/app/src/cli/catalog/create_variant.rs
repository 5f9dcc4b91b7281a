use clap::Args;
use rust_decimal::Decimal;
use storefront_app::domain::catalog::models::{
    NewVariant, ProductUuid, VariantOption, VariantUuid,
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateVariantArgs {
    /// Product the variant belongs to
    #[arg(long)]
    product: Uuid,

    /// Stock keeping unit, unique across variants
    #[arg(long)]
    sku: String,

    /// List price
    #[arg(long)]
    price: Decimal,

    /// Optional discounted price; must not exceed the list price
    #[arg(long)]
    discount_price: Option<Decimal>,

    /// Units in stock
    #[arg(long)]
    stock: u32,

    /// Create the variant hidden from the cart
    #[arg(long)]
    inactive: bool,

    /// Representative image
    #[arg(long)]
    image_url: Option<String>,

    /// Option label as `Name=Value`; repeat for several
    #[arg(long = "option", value_parser = parse_option)]
    options: Vec<VariantOption>,

    /// Optional variant UUID; generated when omitted
    #[arg(long)]
    variant_uuid: Option<Uuid>,

    #[command(flatten)]
    database: DatabaseArgs,
}

fn parse_option(raw: &str) -> Result<VariantOption, String> {
    let (option, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected Name=Value, got {raw:?}"))?;

    Ok(VariantOption {
        option: option.trim().to_string(),
        value: value.trim().to_string(),
    })
}

pub(crate) async fn run(args: CreateVariantArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let variant = context
        .catalog
        .create_variant(NewVariant {
            uuid: args
                .variant_uuid
                .map_or_else(VariantUuid::new, VariantUuid::from_uuid),
            product_uuid: ProductUuid::from_uuid(args.product),
            sku: args.sku,
            price: args.price,
            discount_price: args.discount_price,
            stock: args.stock,
            is_active: !args.inactive,
            image_url: args.image_url,
            options: args.options,
        })
        .await
        .map_err(|error| format!("failed to create variant: {error}"))?;

    println!("variant_uuid: {}", variant.uuid);
    println!("effective_price: {}", variant.effective_price());

    Ok(())
}
