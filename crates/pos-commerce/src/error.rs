//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in point-of-sale operations.
///
/// Cart and filter operations never produce these; they surface only from
/// completing a sale and from resolving user input.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Sale attempted with no items in the cart.
    #[error("Cart is empty: add products before completing the sale")]
    EmptyCart,

    /// Product not found by code.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Unknown payment method.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),
}

impl CommerceError {
    /// Whether the error only blocks the action and should be shown as a notice.
    pub fn is_advisory(&self) -> bool {
        matches!(self, CommerceError::EmptyCart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_empty_cart_is_advisory() {
        assert!(CommerceError::EmptyCart.is_advisory());
        assert!(!CommerceError::ProductNotFound("ZZZ999".into()).is_advisory());
        assert!(!CommerceError::UnknownPaymentMethod("bitcoin".into()).is_advisory());
    }
}
