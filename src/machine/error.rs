//! Error types for machine operations.

use thiserror::Error;

use crate::Amount;
use crate::item::ItemError;

/// Top-level error returned by [`VendingMachine`](super::VendingMachine) operations.
#[derive(Debug, Error, PartialEq)]
pub enum MachineError {
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("invalid item: {0}")]
    Item(#[from] ItemError),
}

/// Error while building or filling the catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("requested {requested} slots but the machine supports at most {maximum}")]
    CapacityExceedsMaximum { requested: usize, maximum: usize },
    #[error("all {0} slots are taken")]
    Full(usize),
}

/// Error during a purchase attempt.
#[derive(Debug, Error, PartialEq)]
pub enum PurchaseError {
    #[error("no item in slot {0}")]
    UnknownSlot(usize),
    #[error("{0} is out of stock")]
    SoldOut(String),
    #[error("contribution {0} must be positive")]
    NonPositiveAmount(Amount),
    #[error("paid {paid} does not cover price {price}")]
    Underpaid { price: Amount, paid: Amount },
}

/// Error applying an admin command.
#[derive(Debug, Error, PartialEq)]
pub enum AdminError {
    #[error("no item in slot {0}")]
    UnknownSlot(usize),
    #[error("quantity {0} cannot be negative")]
    NegativeQuantity(i64),
    #[error("price {0} must be positive")]
    NonPositivePrice(Amount),
    #[error("funds {0} cannot be negative")]
    NegativeFunds(Amount),
    #[error("name has {len} characters, at most {max} allowed")]
    NameTooLong { len: usize, max: usize },
    #[error(transparent)]
    Item(#[from] ItemError),
}
