//! Runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Fleet-wide limits shared by every machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Hard maximum of catalog slots a machine may be built with.
    pub max_slots: usize,
    /// Units each item ledger can hold.
    pub stock_capacity: usize,
    /// Longest item name accepted on rename.
    pub max_name_len: usize,
}

impl Limits {
    pub const DEFAULT: Limits = Limits {
        max_slots: 5,
        stock_capacity: 20,
        max_name_len: 15,
    };
}

impl Default for Limits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What registering a new admin account does to the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RegistrationMode {
    /// Replace the whole store with the new account.
    #[default]
    Overwrite,
    /// Keep existing accounts and add the new one.
    Append,
}

#[derive(Debug, Parser)]
#[command(name = "vending-machine")]
#[command(about = "An interactive vending machine with an admin mode.")]
pub struct Config {
    /// Catalog slots to build the machine with
    #[arg(long, default_value_t = Limits::DEFAULT.max_slots)]
    pub slots: usize,

    /// Hard maximum of catalog slots
    #[arg(long, default_value_t = Limits::DEFAULT.max_slots)]
    pub max_slots: usize,

    /// Units each item can hold
    #[arg(long, default_value_t = Limits::DEFAULT.stock_capacity)]
    pub stock_capacity: usize,

    /// Longest accepted item name
    #[arg(long, default_value_t = Limits::DEFAULT.max_name_len)]
    pub max_name_len: usize,

    /// Title shown above the catalog
    #[arg(long, default_value = "INTI Vending Machine")]
    pub title: String,

    /// Admin credential store
    #[arg(long, default_value = "records.txt")]
    pub records: PathBuf,

    /// Where credentials are exported after a successful login
    #[arg(long, default_value = "exported_records.txt")]
    pub export: PathBuf,

    /// Whether registration replaces or extends the credential store
    #[arg(long, value_enum, default_value_t = RegistrationMode::Overwrite)]
    pub registration: RegistrationMode,

    /// Pause after status messages, in milliseconds (0 disables)
    #[arg(long, default_value_t = 1500)]
    pub pace_ms: u64,

    /// Do not clear the screen between menus
    #[arg(long)]
    pub no_clear: bool,
}

impl Config {
    pub fn limits(&self) -> Limits {
        Limits {
            max_slots: self.max_slots,
            stock_capacity: self.stock_capacity,
            max_name_len: self.max_name_len,
        }
    }

    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fleet_limits() {
        let config = Config::parse_from(["vending-machine"]);
        assert_eq!(config.limits(), Limits::default());
        assert_eq!(config.slots, 5);
        assert_eq!(config.registration, RegistrationMode::Overwrite);
        assert_eq!(config.pace(), Duration::from_millis(1500));
        assert!(!config.no_clear);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::parse_from([
            "vending-machine",
            "--slots",
            "3",
            "--stock-capacity",
            "8",
            "--registration",
            "append",
            "--pace-ms",
            "0",
            "--no-clear",
        ]);
        assert_eq!(config.slots, 3);
        assert_eq!(config.limits().stock_capacity, 8);
        assert_eq!(config.registration, RegistrationMode::Append);
        assert_eq!(config.pace(), Duration::ZERO);
        assert!(config.no_clear);
    }

    #[test]
    fn config_command_is_well_formed() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
