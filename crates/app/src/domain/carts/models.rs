//! Cart Models

use crate::domain::carts::mirror::CartMirror;

/// The kind of mutation a cart call performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Added,
    Updated,
    Removed,
    Cleared,
}

impl CartAction {
    /// Shopper-facing confirmation for the action.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            CartAction::Added => "Producto agregado al carrito",
            CartAction::Updated => "Cantidad actualizada",
            CartAction::Removed => "Producto eliminado del carrito",
            CartAction::Cleared => "Carrito vaciado",
        }
    }
}

/// Outcome of a successful cart mutation: what happened and the cart as it now stands.
#[derive(Debug, Clone)]
pub struct CartChange {
    pub action: CartAction,
    pub cart: CartMirror,
}

impl CartChange {
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.action.message()
    }
}
