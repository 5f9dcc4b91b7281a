//! Order confirmation summary.

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso};

use crate::domain::{
    carts::mirror::{CartLine, CartMirror},
    catalog::models::VariantOption,
    customers::models::CustomerProfile,
    orders::models::{Order, OrderUuid},
};

/// One purchased line as shown to the shopper and to fulfilment.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationLine {
    pub product_name: String,
    pub sku: String,
    pub options: Vec<VariantOption>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl From<&CartLine> for ConfirmationLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_name: line.product_name.clone(),
            sku: line.sku.clone(),
            options: line.options.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price(),
            subtotal: line.line_total(),
        }
    }
}

/// Human-readable summary of a placed order, handed to the notification channel.
///
/// The `Display` rendering is the message text.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    pub order_uuid: OrderUuid,
    pub customer: CustomerProfile,
    pub lines: Vec<ConfirmationLine>,
    pub subtotal: Decimal,
    pub savings: Decimal,
    pub total: Decimal,
}

impl OrderConfirmation {
    #[must_use]
    pub fn new(order: &Order, customer: &CustomerProfile, cart: &CartMirror) -> Self {
        Self {
            order_uuid: order.uuid,
            customer: customer.clone(),
            lines: cart.items().iter().map(ConfirmationLine::from).collect(),
            subtotal: cart.subtotal(),
            savings: cart.savings(),
            total: order.total,
        }
    }
}

/// Format an amount in Colombian pesos.
#[must_use]
pub fn format_cop(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::COP).to_string()
}

impl fmt::Display for OrderConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let customer = &self.customer;

        writeln!(f, "*NUEVO PEDIDO*")?;
        writeln!(f, "*ORDEN #{}*", self.order_uuid)?;
        writeln!(f)?;

        writeln!(f, "*DATOS DEL CLIENTE*")?;
        writeln!(f, "Nombre: {}", customer.name)?;
        writeln!(f, "Teléfono: {}", customer.phone)?;

        if let Some(email) = &customer.email {
            writeln!(f, "Email: {email}")?;
        }

        writeln!(f)?;
        writeln!(f, "*DIRECCIÓN DE ENTREGA*")?;
        writeln!(f, "Departamento: {}", customer.department)?;
        writeln!(f, "Ciudad: {}", customer.city)?;

        if let Some(neighborhood) = &customer.neighborhood {
            writeln!(f, "Barrio: {neighborhood}")?;
        }

        writeln!(f, "Dirección: {}", customer.address)?;
        writeln!(f)?;

        writeln!(f, "*PRODUCTOS*")?;

        for (index, line) in (1..).zip(&self.lines) {
            writeln!(f)?;
            writeln!(f, "{index}. *{}*", line.product_name)?;
            writeln!(f, "   • SKU: {}", line.sku)?;
            writeln!(f, "   • Cantidad: {}", line.quantity)?;

            if !line.options.is_empty() {
                let options = line
                    .options
                    .iter()
                    .map(|option| format!("{}: {}", option.option, option.value))
                    .collect::<Vec<_>>()
                    .join(", ");

                writeln!(f, "   • Opciones: {options}")?;
            }

            writeln!(f, "   • Precio unitario: {}", format_cop(line.unit_price))?;
            writeln!(f, "   • Subtotal: {}", format_cop(line.subtotal))?;
        }

        writeln!(f)?;

        if self.savings > Decimal::ZERO {
            writeln!(f, "Subtotal: {}", format_cop(self.subtotal))?;
            writeln!(f, "Ahorro: {}", format_cop(self.savings))?;
        }

        writeln!(f, "*TOTAL A PAGAR: {}*", format_cop(self.total))?;

        if let Some(note) = &customer.note {
            writeln!(f)?;
            writeln!(f, "*OBSERVACIONES*")?;
            writeln!(f, "{note}")?;
        }

        writeln!(f)?;
        write!(f, "Pago contraentrega")
    }
}
