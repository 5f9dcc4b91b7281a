use clap::Args;
use jiff::Timestamp;
use storefront_app::domain::orders::models::{OrderProgress, OrderStatus, OrderUuid};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct AdvanceArgs {
    /// Order to advance
    #[arg(long)]
    order: Uuid,

    /// New status, e.g. `sent_to_provider` or `shipped`
    #[arg(long)]
    status: OrderStatus,

    /// Identifier assigned by the fulfilment provider
    #[arg(long)]
    provider_order_id: Option<String>,

    /// Carrier tracking number
    #[arg(long)]
    tracking_number: Option<String>,

    /// Carrier name
    #[arg(long)]
    shipping_company: Option<String>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: AdvanceArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let order = context
        .orders
        .advance_order(
            OrderUuid::from_uuid(args.order),
            OrderProgress {
                status: args.status,
                provider_order_id: args.provider_order_id,
                provider_response: None,
                tracking_number: args.tracking_number,
                shipping_company: args.shipping_company,
            },
            Timestamp::now(),
        )
        .await
        .map_err(|error| format!("failed to advance order: {error}"))?;

    println!("order_uuid: {}", order.uuid);
    println!("status: {}", order.status);

    Ok(())
}
