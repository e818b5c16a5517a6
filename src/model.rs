//! Core domain types for purchases and admin operations.

use std::fmt;

use crate::Amount;

/// Where a purchase attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseState {
    Selecting,
    Paying,
    Completed,
    Refunded,
}

impl fmt::Display for PurchaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PurchaseState::Selecting => "selecting",
            PurchaseState::Paying => "paying",
            PurchaseState::Completed => "completed",
            PurchaseState::Refunded => "refunded",
        };
        f.write_str(label)
    }
}

/// Progress of the payment after one contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payment {
    /// Still short by `remaining`.
    Due { remaining: Amount },
    /// Paid in full; `change` is what would be handed back.
    Covered { change: Amount },
}

/// Why a purchase ended without a sale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefundReason {
    /// The operator gave up before covering the price.
    Cancelled,
    /// The float cannot cover the change owed.
    InsufficientChange { change: Amount, float: Amount },
    /// The item ran out between selection and settlement.
    SoldOut,
}

impl fmt::Display for RefundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefundReason::Cancelled => f.write_str("cancelled by customer"),
            RefundReason::InsufficientChange { change, float } => {
                write!(f, "change {change} exceeds float {float}")
            }
            RefundReason::SoldOut => f.write_str("item sold out"),
        }
    }
}

/// Terminal result of a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// One unit sold from slot `index`; `change` handed back.
    Completed { index: usize, change: Amount },
    /// Everything paid (`amount`) handed back; nothing else changed.
    Refunded { amount: Amount, reason: RefundReason },
}

impl Outcome {
    pub fn state(&self) -> PurchaseState {
        match self {
            Outcome::Completed { .. } => PurchaseState::Completed,
            Outcome::Refunded { .. } => PurchaseState::Refunded,
        }
    }
}

/// An operation the admin menu can apply to the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    /// Add `quantity` units to slot `index`.
    Replenish { index: usize, quantity: i64 },
    /// Empty every ledger.
    ResetStock,
    ChangePrice { index: usize, price: Amount },
    RenameMachine { title: String },
    RenameItem { index: usize, name: String },
    /// Inject cash into the float.
    AddFunds { amount: Amount },
}

impl AdminCommand {
    pub fn name(&self) -> &'static str {
        match self {
            AdminCommand::Replenish { .. } => "replenish",
            AdminCommand::ResetStock => "reset stock",
            AdminCommand::ChangePrice { .. } => "change price",
            AdminCommand::RenameMachine { .. } => "rename machine",
            AdminCommand::RenameItem { .. } => "rename item",
            AdminCommand::AddFunds { .. } => "add funds",
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            AdminCommand::Replenish { index, .. }
            | AdminCommand::ChangePrice { index, .. }
            | AdminCommand::RenameItem { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// What an applied admin command did.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminOutcome {
    /// `added` of `requested` units made it into the ledger.
    Replenished { added: usize, requested: usize },
    /// A zero quantity was requested.
    NothingAdded,
    StockReset,
    PriceChanged { old: Amount, new: Amount },
    PriceUnchanged,
    MachineRenamed { title: String },
    ItemRenamed { name: String },
    FundsAdded { total: Amount },
    /// A zero amount was injected.
    FundsUnchanged { total: Amount },
}
