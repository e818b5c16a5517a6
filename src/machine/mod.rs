//! The vending machine.
//!
//! The machine owns a fixed-capacity catalog of items and the aggregate
//! counters (stock on hand, cash float). It drives two kinds of operations:
//! purchases, which move through `Selecting -> Paying -> Completed | Refunded`,
//! and admin commands applied through [`VendingMachine::apply`].
//! Slots are addressed by zero-based index.

use tracing::{info, warn};

use crate::Amount;
use crate::config::{Config, Limits};
use crate::item::{Item, starter_catalog};
use crate::model::{AdminCommand, AdminOutcome, Outcome, RefundReason};

mod purchase;
pub use purchase::Purchase;

mod state;
pub use state::{Summary, Till};

mod error;
pub use error::{AdminError, CatalogError, MachineError, PurchaseError};

/// A single vending machine.
pub struct VendingMachine {
    title: String,
    catalog: Vec<Item>,
    capacity: usize,
    limits: Limits,
    till: Till,
}

/// Public API
impl VendingMachine {
    /// Build an empty machine with `capacity` slots under the default limits.
    pub fn new(capacity: usize) -> Result<Self, CatalogError> {
        Self::with_limits(capacity, Limits::default())
    }

    pub fn with_limits(capacity: usize, limits: Limits) -> Result<Self, CatalogError> {
        if capacity > limits.max_slots {
            return Err(CatalogError::CapacityExceedsMaximum {
                requested: capacity,
                maximum: limits.max_slots,
            });
        }
        Ok(Self {
            title: String::from("INTI Vending Machine"),
            catalog: Vec::with_capacity(capacity),
            capacity,
            limits,
            till: Till::default(),
        })
    }

    /// Build the machine described by `config` and load the starter catalog.
    ///
    /// Items that do not fit the configured slots are left out.
    pub fn from_config(config: &Config) -> Result<Self, MachineError> {
        let limits = config.limits();
        let mut machine = Self::with_limits(config.slots, limits)?.with_title(&config.title);
        for item in starter_catalog(limits.stock_capacity)? {
            // a full catalog is logged and skipped
            let _ = machine.register_item(item);
        }
        Ok(machine)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add an item to the next free slot.
    ///
    /// A full catalog leaves the machine untouched.
    pub fn register_item(&mut self, item: Item) -> Result<(), CatalogError> {
        if self.is_catalog_full() {
            warn!(
                item = item.name(),
                capacity = self.capacity,
                "catalog full, item not registered"
            );
            return Err(CatalogError::Full(self.capacity));
        }
        info!(item = item.name(), stock = item.stock(), "item registered");
        self.till.stock_in(item.stock());
        self.catalog.push(item);
        Ok(())
    }

    pub fn is_catalog_full(&self) -> bool {
        self.catalog.len() >= self.capacity
    }

    pub fn is_catalog_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_catalog_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[Item] {
        &self.catalog
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.catalog.get(index)
    }

    /// Stock counter maintained incrementally.
    pub fn total_stock(&self) -> usize {
        self.till.stock
    }

    /// Cash float available for change.
    pub fn total_money(&self) -> Amount {
        self.till.money
    }

    pub fn summary(&self) -> Summary {
        let items: Vec<_> = self
            .catalog
            .iter()
            .map(|item| (item.name().to_string(), item.stock()))
            .collect();
        Summary {
            total_stock: items.iter().map(|(_, stock)| stock).sum(),
            items,
            total_money: self.till.money,
        }
    }

    /// Select the item in slot `index` and start paying for it.
    pub fn begin_purchase(&self, index: usize) -> Result<Purchase, PurchaseError> {
        let item = self
            .catalog
            .get(index)
            .ok_or(PurchaseError::UnknownSlot(index))?;
        if item.is_sold_out() {
            info!(slot = index, item = item.name(), "selection refused: sold out");
            return Err(PurchaseError::SoldOut(item.name().to_string()));
        }
        Ok(Purchase::new(index, item.price()))
    }

    /// Finish a fully paid purchase.
    ///
    /// Completes the sale when the float can cover the change, refunds
    /// otherwise. Stock and cash only move on completion.
    pub fn settle(&mut self, purchase: Purchase) -> Result<Outcome, PurchaseError> {
        let result = self.apply_settle(purchase);
        Self::log_settle(&result);
        result
    }

    /// Apply a single admin command on top of the current machine state.
    pub fn apply(&mut self, command: AdminCommand) -> Result<AdminOutcome, MachineError> {
        let name = command.name();
        let index = command.index();
        let result = self.apply_admin(command);
        Self::log_result(name, index, &result);
        Ok(result?)
    }
}

/// Private API
impl VendingMachine {
    fn log_settle(result: &Result<Outcome, PurchaseError>) {
        match result {
            Ok(outcome @ Outcome::Completed { index, change }) => {
                info!(
                    slot = index,
                    change = %change,
                    state = %outcome.state(),
                    "purchase settled"
                );
            }
            Ok(outcome @ Outcome::Refunded { amount, reason }) => {
                warn!(
                    amount = %amount,
                    reason = %reason,
                    state = %outcome.state(),
                    "purchase settled"
                );
            }
            Err(e) => {
                info!(reason = %e, "settlement skipped");
            }
        }
    }

    /// Small helper to log `apply` results
    fn log_result<T: std::fmt::Debug, E: std::fmt::Display>(
        command: &str,
        index: Option<usize>,
        result: &Result<T, E>,
    ) {
        match (result, index) {
            (Ok(outcome), Some(slot)) => {
                info!(slot = slot, outcome = ?outcome, "{command} applied");
            }
            (Ok(outcome), None) => {
                info!(outcome = ?outcome, "{command} applied");
            }
            (Err(e), Some(slot)) => {
                info!(slot = slot, reason = %e, "{command} skipped");
            }
            (Err(e), None) => {
                info!(reason = %e, "{command} skipped");
            }
        }
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut Item, AdminError> {
        self.catalog
            .get_mut(index)
            .ok_or(AdminError::UnknownSlot(index))
    }

    /// Settle a `Purchase`:
    /// - Refuse if payment does not cover the price
    /// - Refund if the item sold out in the meantime
    /// - Refund if change exceeds the float
    /// - Otherwise take one unit and credit the till
    fn apply_settle(&mut self, purchase: Purchase) -> Result<Outcome, PurchaseError> {
        if !purchase.is_covered() {
            return Err(PurchaseError::Underpaid {
                price: purchase.price(),
                paid: purchase.paid(),
            });
        }

        let index = purchase.index();
        let Some(item) = self.catalog.get_mut(index) else {
            return Err(PurchaseError::UnknownSlot(index));
        };
        if item.is_sold_out() {
            return Ok(purchase.refund(RefundReason::SoldOut));
        }

        let price = purchase.price();
        let change = purchase.paid() - price;
        if !self.till.can_pay_out(change) {
            let float = self.till.money;
            return Ok(purchase.refund(RefundReason::InsufficientChange { change, float }));
        }

        // stock and cash move together, exactly once
        item.remove_one_unit();
        self.till.stock_out();
        self.till.credit(price - change);

        Ok(Outcome::Completed { index, change })
    }

    fn apply_admin(&mut self, command: AdminCommand) -> Result<AdminOutcome, AdminError> {
        match command {
            AdminCommand::Replenish { index, quantity } => self.apply_replenish(index, quantity),
            AdminCommand::ResetStock => Ok(self.apply_reset_stock()),
            AdminCommand::ChangePrice { index, price } => self.apply_change_price(index, price),
            AdminCommand::RenameMachine { title } => Ok(self.apply_rename_machine(title)),
            AdminCommand::RenameItem { index, name } => self.apply_rename_item(index, name),
            AdminCommand::AddFunds { amount } => self.apply_add_funds(amount),
        }
    }

    /// Apply `AdminCommand::Replenish`:
    /// - Zero quantity is a no-op
    /// - Only units the ledger accepted count toward the stock counter
    fn apply_replenish(&mut self, index: usize, quantity: i64) -> Result<AdminOutcome, AdminError> {
        if quantity < 0 {
            return Err(AdminError::NegativeQuantity(quantity));
        }
        let item = self.item_mut(index)?;
        if quantity == 0 {
            return Ok(AdminOutcome::NothingAdded);
        }

        let requested = usize::try_from(quantity).unwrap_or(usize::MAX);
        let added = item.add_stock(requested);
        if added < requested {
            warn!(
                slot = index,
                added = added,
                requested = requested,
                "ledger full, partial replenish"
            );
        }
        self.till.stock_in(added);

        Ok(AdminOutcome::Replenished { added, requested })
    }

    fn apply_reset_stock(&mut self) -> AdminOutcome {
        self.catalog.iter_mut().for_each(Item::reset_stock);
        self.till.stock = 0;
        AdminOutcome::StockReset
    }

    fn apply_change_price(&mut self, index: usize, price: Amount) -> Result<AdminOutcome, AdminError> {
        if !price.is_positive() {
            return Err(AdminError::NonPositivePrice(price));
        }
        let item = self.item_mut(index)?;
        let old = item.price();
        if old == price {
            return Ok(AdminOutcome::PriceUnchanged);
        }
        item.set_price(price)?;
        Ok(AdminOutcome::PriceChanged { old, new: price })
    }

    fn apply_rename_machine(&mut self, title: String) -> AdminOutcome {
        self.title = title.to_uppercase();
        AdminOutcome::MachineRenamed {
            title: self.title.clone(),
        }
    }

    /// Apply `AdminCommand::RenameItem`:
    /// - Reject names longer than the configured cap
    /// - Capitalize only the first character
    fn apply_rename_item(&mut self, index: usize, name: String) -> Result<AdminOutcome, AdminError> {
        let max = self.limits.max_name_len;
        let len = name.chars().count();
        if len > max {
            return Err(AdminError::NameTooLong { len, max });
        }

        let mut chars = name.chars();
        let name: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };

        let item = self.item_mut(index)?;
        item.set_name(name.clone())?;
        Ok(AdminOutcome::ItemRenamed { name })
    }

    fn apply_add_funds(&mut self, amount: Amount) -> Result<AdminOutcome, AdminError> {
        if amount.is_negative() {
            return Err(AdminError::NegativeFunds(amount));
        }
        if amount.is_zero() {
            return Ok(AdminOutcome::FundsUnchanged {
                total: self.till.money,
            });
        }
        self.till.credit(amount);
        Ok(AdminOutcome::FundsAdded {
            total: self.till.money,
        })
    }
}
