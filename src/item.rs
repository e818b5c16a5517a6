//! Catalog items and their stock.

use thiserror::Error;

use crate::Amount;
use crate::ledger::StockLedger;

/// One interchangeable unit of stock. Units carry no data; only their count matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StockUnit;

#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    #[error("initial stock {requested} exceeds ledger capacity {capacity}")]
    StockExceedsCapacity { requested: usize, capacity: usize },
    #[error("item name cannot be empty")]
    EmptyName,
    #[error("price {0} cannot be negative")]
    NegativePrice(Amount),
}

/// A product slot: identity, price and a ledger of units on hand.
#[derive(Debug)]
pub struct Item {
    name: String,
    price: Amount,
    symbol: char,
    stock: StockLedger<StockUnit>,
}

impl Item {
    /// Build an item whose ledger holds at most `capacity` units.
    pub fn new(
        name: impl Into<String>,
        price: Amount,
        initial_stock: usize,
        capacity: usize,
    ) -> Result<Self, ItemError> {
        if initial_stock > capacity {
            return Err(ItemError::StockExceedsCapacity {
                requested: initial_stock,
                capacity,
            });
        }
        if price.is_negative() {
            return Err(ItemError::NegativePrice(price));
        }
        let name = name.into();
        let symbol = symbol_for(&name).ok_or(ItemError::EmptyName)?;

        let mut item = Self {
            name,
            price,
            symbol,
            stock: StockLedger::new(capacity),
        };
        item.add_stock(initial_stock);
        Ok(item)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Amount {
        self.price
    }

    /// Character drawn in the catalog grid for each unit on hand.
    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn stock(&self) -> usize {
        self.stock.count()
    }

    pub fn capacity(&self) -> usize {
        self.stock.capacity()
    }

    pub fn is_sold_out(&self) -> bool {
        self.stock.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.stock.is_full()
    }

    /// Rename the item; the display symbol follows the new first letter.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ItemError> {
        let name = name.into();
        self.symbol = symbol_for(&name).ok_or(ItemError::EmptyName)?;
        self.name = name;
        Ok(())
    }

    pub fn set_price(&mut self, price: Amount) -> Result<(), ItemError> {
        if price.is_negative() {
            return Err(ItemError::NegativePrice(price));
        }
        self.price = price;
        Ok(())
    }

    /// Add up to `requested` units, stopping at the first one the ledger refuses.
    ///
    /// Returns how many were actually added.
    pub fn add_stock(&mut self, requested: usize) -> usize {
        let mut added = 0;
        while added < requested && self.stock.try_add(StockUnit).is_ok() {
            added += 1;
        }
        added
    }

    /// Take one unit off the ledger. Returns `false` if there was nothing to take.
    pub fn remove_one_unit(&mut self) -> bool {
        self.stock.try_remove().is_some()
    }

    pub fn reset_stock(&mut self) {
        self.stock.clear();
    }
}

fn symbol_for(name: &str) -> Option<char> {
    name.chars().next().and_then(|c| c.to_uppercase().next())
}

/// The catalog a freshly installed machine is loaded with.
pub fn starter_catalog(capacity: usize) -> Result<Vec<Item>, ItemError> {
    [
        ("Cola", 1.50, 19),
        ("Sprite", 1.50, 0),
        ("Milo", 1.00, 3),
        ("Chocolate", 2.00, 20),
        ("Tea", 2.50, 12),
    ]
    .into_iter()
    .map(|(name, price, stock)| Item::new(name, Amount::new(price), stock, capacity))
    .collect()
}
