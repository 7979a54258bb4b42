//! Custom actions for the Product actor.
//!
//! Stock is moved only through these actions, so concurrent orders for the same
//! product are serialized by the product actor.

/// Stock operations on a [`Product`](crate::model::Product).
///
/// Every action answers with the stock level after it ran.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Current stock, unchanged.
    CheckStock,
    /// Takes units out of stock. Fails when fewer are available.
    ReserveStock(u32),
    /// Puts previously reserved units back.
    ReleaseStock(u32),
}
