//! Interactive operator session.
//!
//! The session owns the machine and walks the operator through the customer
//! and admin menus, one input line per prompt. All screen text comes from
//! [`render`]; all state changes go through the machine's public API.

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;
use tokio_stream::Stream;
use tracing::{info, warn};

use crate::credentials::{CredentialError, CredentialStore};
use crate::machine::{AdminError, MachineError, Purchase, VendingMachine};
use crate::model::{AdminCommand, AdminOutcome, Outcome, Payment, RefundReason};

pub mod render;

mod terminal;
pub use terminal::Terminal;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("operator input closed")]
    InputClosed,

    #[error("failed to write to terminal: {0}")]
    Output(#[from] io::Error),
}

pub struct Session<S, W> {
    machine: VendingMachine,
    store: CredentialStore,
    export_path: PathBuf,
    term: Terminal<S, W>,
}

/// Public API
impl<S, W> Session<S, W>
where
    S: Stream<Item = String> + Unpin,
    W: Write,
{
    pub fn new(
        machine: VendingMachine,
        store: CredentialStore,
        export_path: impl Into<PathBuf>,
        term: Terminal<S, W>,
    ) -> Self {
        Self {
            machine,
            store,
            export_path: export_path.into(),
            term,
        }
    }

    pub fn into_parts(self) -> (VendingMachine, W) {
        (self.machine, self.term.into_output())
    }

    /// Run the main menu until the operator chooses to exit.
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        loop {
            self.term.say(render::main_menu(self.machine.title()))?;
            match self.term.read_choice("Enter Option: ", 1..=3).await? {
                1 => {
                    self.term.clear()?;
                    self.shop().await?;
                }
                2 => {
                    self.term.clear()?;
                    if self.authenticate().await? {
                        self.admin().await?;
                    }
                }
                _ => {
                    self.term.say(render::goodbye())?;
                    info!("session ended by operator");
                    return Ok(());
                }
            }
        }
    }
}

/// Customer flow
impl<S, W> Session<S, W>
where
    S: Stream<Item = String> + Unpin,
    W: Write,
{
    async fn shop(&mut self) -> Result<(), ConsoleError> {
        let count = self.machine.len();
        if count == 0 {
            self.term.say("NO ITEMS AVAILABLE\n")?;
            return Ok(());
        }
        let back = count + 1;

        loop {
            self.term.say(render::catalog(&self.machine))?;
            self.term.say(format!(
                "Choose Item Index to Purchase [1 - {count}]\nReturn to Main Menu [{back}]\n"
            ))?;
            let choice = self.term.read_choice("Enter Option: ", 1..=back).await?;
            if choice == back {
                self.term.clear()?;
                return Ok(());
            }

            let purchase = match self.machine.begin_purchase(choice - 1) {
                Ok(purchase) => purchase,
                Err(e) => {
                    self.term.clear()?;
                    self.term.say(format!("!!!{}!!!\n", e.to_string().to_uppercase()))?;
                    continue;
                }
            };

            self.term.clear()?;
            if !self.pay(purchase).await? {
                return Ok(());
            }

            if !self.term.confirm("Buy Another Item (Y/N): ").await? {
                self.term.clear()?;
                self.term.say(render::thank_you())?;
                self.term.pause().await;
                self.term.clear()?;
                return Ok(());
            }
            self.term.clear()?;
        }
    }

    /// Collect payment and settle. Returns whether the sale completed.
    async fn pay(&mut self, mut purchase: Purchase) -> Result<bool, ConsoleError> {
        self.term.say(render::catalog(&self.machine))?;

        while !purchase.is_covered() {
            let remaining = purchase.price() - purchase.paid();
            self.term
                .say(format!("Please Pay RM {remaining} to Purchase Item\n"))?;
            let amount = self.term.read_amount("Enter Amount: RM ").await?;

            if purchase.insert(amount).is_err() {
                self.term.say("\nINVALID AMOUNT! PLEASE ENTER A VALID VALUE!")?;
                self.term.pause().await;
                self.term.clear()?;
                self.term.say(render::catalog(&self.machine))?;
                continue;
            }

            self.term.clear()?;
            self.term.say(render::catalog(&self.machine))?;
            self.term.say(render::breakdown(purchase.paid()))?;

            if let Payment::Due { .. } = purchase.payment() {
                self.term.say("!!!INSUFFICIENT AMOUNT!!!")?;
                if self.term.confirm("Cancel Transaction (Y/N): ").await? {
                    let outcome = purchase.cancel();
                    self.term.clear()?;
                    self.report_refund(outcome).await?;
                    return Ok(false);
                }
            }
        }

        match self.machine.settle(purchase) {
            Ok(Outcome::Completed { change, .. }) => {
                self.term.clear()?;
                self.term.say(render::catalog(&self.machine))?;
                self.term.say("!!!PAYMENT SUCCESSFUL!!!")?;
                if change.is_positive() {
                    self.term
                        .say(format!("Please Collect Your Change RM {change}\n"))?;
                }
                Ok(true)
            }
            Ok(outcome @ Outcome::Refunded { reason, .. }) => {
                match reason {
                    RefundReason::InsufficientChange { .. } => {
                        self.term.say("!!!SORRY, NOT ENOUGH CHANGE IN MACHINE!!!")?
                    }
                    RefundReason::SoldOut => self.term.say("!!!SORRY, ITEM SOLD OUT!!!")?,
                    RefundReason::Cancelled => {}
                }
                self.term.pause().await;
                self.term.clear()?;
                self.report_refund(outcome).await?;
                Ok(false)
            }
            Err(e) => {
                warn!(reason = %e, "settlement refused");
                self.term.say(format!("!!!{}!!!\n", e.to_string().to_uppercase()))?;
                Ok(false)
            }
        }
    }

    async fn report_refund(&mut self, outcome: Outcome) -> Result<(), ConsoleError> {
        if let Outcome::Refunded { amount, .. } = outcome {
            self.term.say(render::refunded(amount))?;
            self.term.pause().await;
            self.term.clear()?;
        }
        Ok(())
    }
}

/// Login and registration
impl<S, W> Session<S, W>
where
    S: Stream<Item = String> + Unpin,
    W: Write,
{
    /// Returns `true` once the operator has logged in.
    async fn authenticate(&mut self) -> Result<bool, ConsoleError> {
        loop {
            self.term.say(render::login_menu())?;
            match self.term.read_choice("Choice => ", 1..=3).await? {
                1 => {
                    self.term.clear()?;
                    if self.login().await? {
                        return Ok(true);
                    }
                }
                2 => {
                    self.term.clear()?;
                    self.register().await?;
                }
                _ => {
                    self.term.clear()?;
                    return Ok(false);
                }
            }
        }
    }

    async fn login(&mut self) -> Result<bool, ConsoleError> {
        self.term.say("Please Enter the Username & Password\n")?;
        let username = self.term.read_line("USERNAME: ").await?.trim().to_string();
        let password = self.term.read_line("PASSWORD: ").await?.trim().to_string();

        let verified = match self.store.verify(&username, &password) {
            Ok(verified) => verified,
            Err(e) => {
                warn!("{e}");
                false
            }
        };

        self.term.clear()?;
        if !verified {
            self.term.say("LOGIN ERROR\nPlease Check Again\n")?;
            self.term.pause().await;
            return Ok(false);
        }

        self.term.say(format!(
            "Welcome, {username}.\nYour LOGIN is SUCCESSFUL!"
        ))?;
        match self.store.export(&self.export_path) {
            Ok(_) => self.term.say(format!(
                "User data has been successfully exported to '{}'.",
                self.export_path.display()
            ))?,
            Err(e) => {
                warn!("{e}");
                self.term.say("User data could not be exported.")?;
            }
        }
        self.term.pause().await;
        self.term.clear()?;
        Ok(true)
    }

    async fn register(&mut self) -> Result<(), ConsoleError> {
        let username = self.term.read_line("Enter the Username: ").await?.trim().to_string();
        let password = self.term.read_line("Enter the Password: ").await?.trim().to_string();

        self.term.clear()?;
        match self.store.register(&username, &password) {
            Ok(()) => self.term.say("Registration is Successful!\n")?,
            Err(CredentialError::EmptyField) => {
                self.term.say("USERNAME AND PASSWORD CANNOT BE EMPTY\n")?
            }
            Err(CredentialError::Whitespace) => {
                self.term.say("USERNAME AND PASSWORD CANNOT CONTAIN SPACES\n")?
            }
            Err(e) => {
                warn!("{e}");
                self.term.say("REGISTRATION FAILED\n")?;
            }
        }
        Ok(())
    }
}

/// Admin flow
impl<S, W> Session<S, W>
where
    S: Stream<Item = String> + Unpin,
    W: Write,
{
    async fn admin(&mut self) -> Result<(), ConsoleError> {
        loop {
            self.term.say(render::admin_menu())?;
            let choice = self.term.read_choice("Enter Option: ", 1..=7).await?;
            self.term.clear()?;
            match choice {
                1 => self.replenish().await?,
                2 => self.show_summary().await?,
                3 => self.reset_stock().await?,
                4 => self.change_price().await?,
                5 => self.rename().await?,
                6 => self.add_funds().await?,
                _ => return Ok(()),
            }
        }
    }

    /// Show the catalog and ask for a slot; `None` means go back.
    async fn pick_item(&mut self, action: &str) -> Result<Option<usize>, ConsoleError> {
        let count = self.machine.len();
        self.term.say(render::catalog(&self.machine))?;
        if count == 0 {
            return Ok(None);
        }
        let back = count + 1;
        self.term.say(format!(
            "Enter Item Index to {action} [1-{count}]\nReturn to Admin Menu [{back}]\n"
        ))?;
        let choice = self.term.read_choice("Enter Option: ", 1..=back).await?;
        Ok((choice != back).then_some(choice - 1))
    }

    async fn finish(&mut self) -> Result<(), ConsoleError> {
        self.term.pause().await;
        self.term.clear()
    }

    async fn replenish(&mut self) -> Result<(), ConsoleError> {
        let Some(index) = self.pick_item("Replenish Stock").await? else {
            return self.term.clear();
        };

        loop {
            let quantity = self
                .term
                .read_integer("Enter Additional Stock Quantity: ")
                .await?;
            match self.machine.apply(AdminCommand::Replenish { index, quantity }) {
                Ok(AdminOutcome::Replenished { added, requested }) => {
                    if added < requested {
                        self.term.say(format!(
                            "[ STOCK IS FULL ]\nADDED {added} ITEMS OUT OF {requested}"
                        ))?;
                    }
                    if added > 0 {
                        self.term.say("!!!STOCK REPLENISHED SUCCESSFULLY!!!\n")?;
                    }
                    break;
                }
                Ok(AdminOutcome::NothingAdded) => {
                    self.term.say("!!!NOTHING ADDED!!!\n")?;
                    break;
                }
                Ok(_) => break,
                Err(MachineError::Admin(AdminError::NegativeQuantity(_))) => {
                    self.term.say("INVALID QUANTITY\nPLEASE ENTER A VALID QUANTITY\n")?;
                }
                Err(e) => {
                    self.term.say(format!("{e}\n"))?;
                    break;
                }
            }
        }
        self.finish().await
    }

    async fn show_summary(&mut self) -> Result<(), ConsoleError> {
        self.term.say(render::summary(&self.machine.summary()))?;
        self.term.acknowledge("Return to Admin Menu (Y): ").await?;
        self.term.clear()
    }

    async fn reset_stock(&mut self) -> Result<(), ConsoleError> {
        if !self.term.confirm("Reset All Stock to 0? (Y/N): ").await? {
            self.term.clear()?;
            self.term.say("!!!STOCK RESET OPERATION CANCELLED!!!\n")?;
            return self.finish().await;
        }

        self.term.clear()?;
        match self.machine.apply(AdminCommand::ResetStock) {
            Ok(_) => self.term.say("!!!ALL STOCK HAS BEEN RESET TO 0!!!\n")?,
            Err(e) => self.term.say(format!("{e}\n"))?,
        }
        self.finish().await
    }

    async fn change_price(&mut self) -> Result<(), ConsoleError> {
        let Some(index) = self.pick_item("Change Price").await? else {
            return self.term.clear();
        };

        loop {
            let price = self.term.read_amount("Enter New Price: RM ").await?;
            match self.machine.apply(AdminCommand::ChangePrice { index, price }) {
                Ok(AdminOutcome::PriceUnchanged) => {
                    self.term.say("!!!PRICE NO CHANGES!!!\n")?;
                    break;
                }
                Ok(_) => {
                    self.term.say("!!!PRICE CHANGED SUCCESSFULLY!!!\n")?;
                    break;
                }
                Err(MachineError::Admin(AdminError::NonPositivePrice(_))) => {
                    self.term.say("INVALID PRICE\nPLEASE ENTER A VALID PRICE\n")?;
                }
                Err(e) => {
                    self.term.say(format!("{e}\n"))?;
                    break;
                }
            }
        }
        self.finish().await
    }

    async fn rename(&mut self) -> Result<(), ConsoleError> {
        self.term
            .say("1. Machine Title\n2. Stock Header Name\n3. Return to Admin Menu\n")?;
        match self.term.read_choice("Enter Choice: ", 1..=3).await? {
            1 => self.rename_machine().await,
            2 => self.rename_item().await,
            _ => self.term.clear(),
        }
    }

    async fn rename_machine(&mut self) -> Result<(), ConsoleError> {
        let title = self.term.read_line("Enter New Name: ").await?;
        self.term.clear()?;
        match self.machine.apply(AdminCommand::RenameMachine { title }) {
            Ok(_) => self.term.say("!!!MACHINE TITLE CHANGED SUCCESSFULLY!!!\n")?,
            Err(e) => self.term.say(format!("{e}\n"))?,
        }
        self.finish().await
    }

    async fn rename_item(&mut self) -> Result<(), ConsoleError> {
        let count = self.machine.len();
        self.term.say(render::catalog(&self.machine))?;
        if count == 0 {
            return self.finish().await;
        }
        let index = self
            .term
            .read_choice(&format!("Enter Item Index to Change [1-{count}]: "), 1..=count)
            .await?
            - 1;

        loop {
            let name = self.term.read_line("Enter New Name: ").await?;
            match self.machine.apply(AdminCommand::RenameItem { index, name }) {
                Ok(_) => {
                    self.term.clear()?;
                    self.term.say("!!!ITEM NAME CHANGED SUCCESSFULLY!!!\n")?;
                    break;
                }
                Err(MachineError::Admin(AdminError::NameTooLong { max, .. })) => {
                    self.term.say(format!(
                        "\n!!!ITEM NAME FAILED TO CHANGE!!!\n!!!MAXIMUM {max} CHARACTERS ONLY!!!\n"
                    ))?;
                }
                Err(MachineError::Admin(AdminError::Item(_))) => {
                    self.term.say("\n!!!ITEM NAME CANNOT BE EMPTY!!!\n")?;
                }
                Err(e) => {
                    self.term.say(format!("{e}\n"))?;
                    break;
                }
            }
        }
        self.finish().await
    }

    async fn add_funds(&mut self) -> Result<(), ConsoleError> {
        self.term.say("1. Add Funds\n2. Return to Admin Menu\n")?;
        if self.term.read_choice("Enter Choice: ", 1..=2).await? == 2 {
            return self.term.clear();
        }

        loop {
            let amount = self.term.read_amount("Enter Additional Funds: RM ").await?;
            match self.machine.apply(AdminCommand::AddFunds { amount }) {
                Ok(AdminOutcome::FundsAdded { total }) => {
                    self.term.clear()?;
                    self.term.say(format!(
                        "****** FUNDS ADDED SUCCESSFULLY ******\nNEW TOTAL MONEY: RM {total}\n"
                    ))?;
                    break;
                }
                Ok(AdminOutcome::FundsUnchanged { total }) => {
                    self.term.clear()?;
                    self.term
                        .say(format!("******** NO CHANGES ********\nTOTAL MONEY: RM {total}\n"))?;
                    break;
                }
                Ok(_) => break,
                Err(MachineError::Admin(AdminError::NegativeFunds(_))) => {
                    self.term.say("INVALID AMOUNT\nPLEASE ENTER A VALID AMOUNT\n")?;
                }
                Err(e) => {
                    self.term.say(format!("{e}\n"))?;
                    break;
                }
            }
        }
        self.finish().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Amount;
    use crate::config::RegistrationMode;
    use crate::item::starter_catalog;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    // test utils

    struct Harness {
        dir: TempDir,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn records(&self) -> PathBuf {
            self.dir.path().join("records.txt")
        }

        fn exported(&self) -> PathBuf {
            self.dir.path().join("exported_records.txt")
        }

        /// Run a scripted session against the starter catalog.
        async fn run(&self, script: &[&str]) -> (Result<(), ConsoleError>, VendingMachine, String) {
            let mut machine = VendingMachine::new(5).unwrap();
            for item in starter_catalog(20).unwrap() {
                machine.register_item(item).unwrap();
            }
            self.run_with(machine, script).await
        }

        async fn run_with(
            &self,
            machine: VendingMachine,
            script: &[&str],
        ) -> (Result<(), ConsoleError>, VendingMachine, String) {
            let lines: Vec<String> = script.iter().map(|l| l.to_string()).collect();
            let term = Terminal::new(tokio_stream::iter(lines), Vec::new(), false, Duration::ZERO);
            let store = CredentialStore::new(self.records(), RegistrationMode::Overwrite);
            let mut session = Session::new(machine, store, self.exported(), term);

            let result = session.run().await;
            let (machine, out) = session.into_parts();
            (result, machine, String::from_utf8(out).unwrap())
        }
    }

    const LOGIN: [&str; 7] = ["2", "2", "admin", "pw", "1", "admin", "pw"];

    /// Register, log in, run `steps` in the admin menu, then leave.
    fn admin_script<'a>(steps: &[&'a str]) -> Vec<&'a str> {
        let mut script: Vec<&'a str> = LOGIN.to_vec();
        script.extend_from_slice(steps);
        script.extend(["7", "3"]);
        script
    }

    // Main menu

    #[tokio::test]
    async fn exit_ends_session() {
        let (result, _, out) = Harness::new().run(&["3"]).await;
        assert!(result.is_ok());
        assert!(out.contains("HAVE A NICE DAY"));
    }

    #[tokio::test]
    async fn invalid_main_menu_input_reprompts() {
        let (result, _, out) = Harness::new().run(&["abc", "9", "3"]).await;
        assert!(result.is_ok());
        assert_eq!(out.matches("INVALID OPTION").count(), 2);
    }

    #[tokio::test]
    async fn closed_input_ends_with_error() {
        let (result, _, _) = Harness::new().run(&["1"]).await;
        assert!(matches!(result, Err(ConsoleError::InputClosed)));
    }

    // Purchases

    #[tokio::test]
    async fn exact_payment_sells_one_unit() {
        let (result, machine, out) = Harness::new().run(&["1", "1", "1.50", "N", "3"]).await;
        assert!(result.is_ok());
        assert!(out.contains("!!!PAYMENT SUCCESSFUL!!!"));
        assert!(!out.contains("Collect Your Change"));
        assert!(out.contains("THANK YOU"));
        assert_eq!(machine.item(0).unwrap().stock(), 18);
        assert_eq!(machine.total_money(), Amount::new(1.5));
        assert_eq!(machine.total_stock(), 53);
    }

    #[tokio::test]
    async fn buying_again_returns_to_catalog() {
        let script = ["1", "1", "1.50", "Y", "5", "2.50", "N", "3"];
        let (_, machine, out) = Harness::new().run(&script).await;
        assert_eq!(out.matches("!!!PAYMENT SUCCESSFUL!!!").count(), 2);
        assert_eq!(machine.item(4).unwrap().stock(), 11);
        assert_eq!(machine.total_money(), Amount::new(4.0));
    }

    #[tokio::test]
    async fn sold_out_item_is_refused_before_payment() {
        let (result, machine, out) = Harness::new().run(&["1", "2", "6", "3"]).await;
        assert!(result.is_ok());
        assert!(out.contains("OUT OF STOCK"));
        assert!(!out.contains("Please Pay"));
        assert_eq!(machine.total_stock(), 54);
    }

    #[tokio::test]
    async fn non_positive_contribution_is_not_counted() {
        let script = ["1", "1", "0", "-1", "1.50", "N", "3"];
        let (_, machine, out) = Harness::new().run(&script).await;
        assert_eq!(out.matches("INVALID AMOUNT!").count(), 2);
        assert!(out.contains("Total Inserted: RM 1.50"));
        assert_eq!(machine.total_money(), Amount::new(1.5));
    }

    #[tokio::test]
    async fn partial_payment_can_be_cancelled() {
        let (result, machine, out) = Harness::new().run(&["1", "5", "1", "Y", "3"]).await;
        assert!(result.is_ok());
        assert!(out.contains("!!!INSUFFICIENT AMOUNT!!!"));
        assert!(out.contains("REFUNDED"));
        assert!(out.contains("RM 1.00"));
        assert_eq!(machine.item(4).unwrap().stock(), 12);
        assert_eq!(machine.total_money(), Amount::ZERO);
    }

    #[tokio::test]
    async fn partial_payments_accumulate() {
        let script = ["1", "5", "1", "N", "1", "N", "0.50", "N", "3"];
        let (_, machine, out) = Harness::new().run(&script).await;
        assert!(out.contains("Please Pay RM 1.50 to Purchase Item"));
        assert!(out.contains("Please Pay RM 0.50 to Purchase Item"));
        assert!(out.contains("!!!PAYMENT SUCCESSFUL!!!"));
        assert_eq!(machine.item(4).unwrap().stock(), 11);
    }

    #[tokio::test]
    async fn missing_change_refunds() {
        let (result, machine, out) = Harness::new().run(&["1", "3", "2", "3"]).await;
        assert!(result.is_ok());
        assert!(out.contains("NOT ENOUGH CHANGE"));
        assert!(out.contains("REFUNDED"));
        assert_eq!(machine.item(2).unwrap().stock(), 3);
        assert_eq!(machine.total_money(), Amount::ZERO);
    }

    // Login and registration

    #[tokio::test]
    async fn wrong_credentials_do_not_open_admin() {
        let h = Harness::new();
        let (result, _, out) = h.run(&["2", "1", "root", "toor", "3", "3"]).await;
        assert!(result.is_ok());
        assert!(out.contains("LOGIN ERROR"));
        assert!(!out.contains("Admin Menu"));
    }

    #[tokio::test]
    async fn registration_then_login_exports_records() {
        let h = Harness::new();
        let (result, _, out) = h.run(&admin_script(&[])).await;
        assert!(result.is_ok());
        assert!(out.contains("Registration is Successful!"));
        assert!(out.contains("Your LOGIN is SUCCESSFUL!"));
        assert!(out.contains("Admin Menu"));
        assert_eq!(fs::read_to_string(h.records()).unwrap(), "admin pw\n");
        assert_eq!(
            fs::read_to_string(h.exported()).unwrap(),
            "Username: admin, Password: pw\n"
        );
    }

    #[tokio::test]
    async fn registration_refuses_spaced_password() {
        let h = Harness::new();
        let (result, _, out) = h
            .run(&["2", "2", "admin", "my pw", "1", "admin", "my", "3", "3"])
            .await;
        assert!(result.is_ok());
        assert!(out.contains("CANNOT CONTAIN SPACES"));
        assert!(out.contains("LOGIN ERROR"));
        assert!(!h.records().exists());
    }

    // Admin

    #[tokio::test]
    async fn replenish_rejects_negative_then_adds() {
        let h = Harness::new();
        let (_, machine, out) = h.run(&admin_script(&["1", "2", "-2", "5"])).await;
        assert!(out.contains("INVALID QUANTITY"));
        assert!(out.contains("!!!STOCK REPLENISHED SUCCESSFULLY!!!"));
        assert_eq!(machine.item(1).unwrap().stock(), 5);
        assert_eq!(machine.total_stock(), 59);
    }

    #[tokio::test]
    async fn replenish_reports_shortfall() {
        let h = Harness::new();
        let (_, machine, out) = h.run(&admin_script(&["1", "1", "5"])).await;
        assert!(out.contains("ADDED 1 ITEMS OUT OF 5"));
        assert_eq!(machine.item(0).unwrap().stock(), 20);
    }

    #[tokio::test]
    async fn replenish_zero_adds_nothing() {
        let h = Harness::new();
        let (_, machine, out) = h.run(&admin_script(&["1", "3", "0"])).await;
        assert!(out.contains("!!!NOTHING ADDED!!!"));
        assert_eq!(machine.item(2).unwrap().stock(), 3);
    }

    #[tokio::test]
    async fn summary_waits_for_y() {
        let h = Harness::new();
        let (_, _, out) = h.run(&admin_script(&["2", "n", "y"])).await;
        assert!(out.contains("MACHINE SUMMARY"));
        assert!(out.contains("Total Stock    : 54"));
        assert!(out.contains("PLEASE ENTER 'Y' TO EXIT"));
    }

    #[tokio::test]
    async fn reset_stock_honours_confirmation() {
        let h = Harness::new();
        let (_, machine, out) = h.run(&admin_script(&["3", "N"])).await;
        assert!(out.contains("CANCELLED"));
        assert_eq!(machine.total_stock(), 54);

        let (_, machine, out) = h.run(&admin_script(&["3", "x", "Y"])).await;
        assert!(out.contains("ALL STOCK HAS BEEN RESET TO 0"));
        assert_eq!(machine.total_stock(), 0);
        assert!(machine.items().iter().all(|item| item.is_sold_out()));
    }

    #[tokio::test]
    async fn change_price_reprompts_on_invalid_price() {
        let h = Harness::new();
        let (_, machine, out) = h.run(&admin_script(&["4", "1", "0", "2.00"])).await;
        assert!(out.contains("INVALID PRICE"));
        assert!(out.contains("!!!PRICE CHANGED SUCCESSFULLY!!!"));
        assert_eq!(machine.item(0).unwrap().price(), Amount::new(2.0));
    }

    #[tokio::test]
    async fn change_price_to_same_value() {
        let h = Harness::new();
        let (_, _, out) = h.run(&admin_script(&["4", "1", "1.50"])).await;
        assert!(out.contains("!!!PRICE NO CHANGES!!!"));
    }

    #[tokio::test]
    async fn rename_machine_title() {
        let h = Harness::new();
        let (_, machine, out) = h.run(&admin_script(&["5", "1", "snack corner"])).await;
        assert!(out.contains("MACHINE TITLE CHANGED SUCCESSFULLY"));
        assert_eq!(machine.title(), "SNACK CORNER");
    }

    #[tokio::test]
    async fn rename_item_enforces_length_cap() {
        let h = Harness::new();
        let script = admin_script(&["5", "2", "2", "a very long drink name", "", "lemonade"]);
        let (_, machine, out) = h.run(&script).await;
        assert!(out.contains("MAXIMUM 15 CHARACTERS ONLY"));
        assert!(out.contains("ITEM NAME CANNOT BE EMPTY"));
        assert!(out.contains("ITEM NAME CHANGED SUCCESSFULLY"));
        assert_eq!(machine.item(1).unwrap().name(), "Lemonade");
    }

    #[tokio::test]
    async fn add_funds_rejects_negative_then_adds() {
        let h = Harness::new();
        let (_, machine, out) = h.run(&admin_script(&["6", "1", "-5", "10"])).await;
        assert!(out.contains("INVALID AMOUNT"));
        assert!(out.contains("NEW TOTAL MONEY: RM 10.00"));
        assert_eq!(machine.total_money(), Amount::new(10.0));
    }

    #[tokio::test]
    async fn add_zero_funds_changes_nothing() {
        let h = Harness::new();
        let (_, machine, out) = h.run(&admin_script(&["6", "1", "0"])).await;
        assert!(out.contains("NO CHANGES"));
        assert_eq!(machine.total_money(), Amount::ZERO);
    }

    #[tokio::test]
    async fn funds_make_change_possible() {
        let h = Harness::new();
        let mut script = admin_script(&["6", "1", "5"]);
        // drop the final exit and go shopping
        script.pop();
        script.extend(["1", "3", "2", "N", "3"]);
        let (_, machine, out) = h.run(&script).await;
        assert!(out.contains("Please Collect Your Change RM 1.00"));
        assert_eq!(machine.item(2).unwrap().stock(), 2);
        assert_eq!(machine.total_money(), Amount::new(5.0));
    }
}
