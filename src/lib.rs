pub mod amount;
pub mod config;
pub mod console;
pub mod credentials;
pub mod item;
pub mod ledger;
pub mod machine;
pub mod model;

pub use amount::Amount;
pub use item::Item;
pub use ledger::StockLedger;
pub use machine::VendingMachine;
