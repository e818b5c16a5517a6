//! Screen text. Pure functions of machine state; nothing here mutates.

use std::fmt::Write;

use crate::Amount;
use crate::machine::{Summary, VendingMachine};

const COLUMN: usize = 20;
const LABEL: usize = 15;
const INDENT: &str = "    ";

pub fn main_menu(title: &str) -> String {
    let title = title.to_uppercase();
    let rule = "=".repeat(title.chars().count().max(20));
    format!(
        "\n{rule}\n     WELCOME TO\n\n{title}\n{rule}\n\n\
         1 [Show Items       ]\n\
         2 [Inventory-Admin  ]\n\
         3 [Exit             ]\n"
    )
}

pub fn login_menu() -> &'static str {
    "Press 1 to LOGIN\nPress 2 to REGISTER\nPress 3 to RETURN TO MAIN MENU\n"
}

pub fn admin_menu() -> &'static str {
    "\n==========\nAdmin Menu\n==========\n\n\
     1 [Replenish Stock                  ]\n\
     2 [Display Machine Summary          ]\n\
     3 [Reset Stock                      ]\n\
     4 [Change Price                     ]\n\
     5 [Change Title or Stock Header Name]\n\
     6 [Allocate Extra Funds             ]\n\
     7 [Return to Main Menu              ]\n"
}

/// The catalog grid: one column per item, one row per ledger slot, with
/// each unit on hand drawn as the item's symbol from the bottom up.
pub fn catalog(machine: &VendingMachine) -> String {
    let items = machine.items();
    let mut out = format!("\n[{}]\n\n", machine.title());
    if items.is_empty() {
        out.push_str("NO ITEMS REGISTERED\n");
        return out;
    }

    let headers: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{} [{}] ", item.name(), i + 1))
        .collect();

    let mut line = String::from(INDENT);
    for header in &headers {
        let _ = write!(line, "{header:<LABEL$}{}", " ".repeat(COLUMN - LABEL));
    }
    push_line(&mut out, &line);

    let mut line = String::from(INDENT);
    for item in items {
        let _ = write!(line, "{:<COLUMN$}", format!("RM {}", item.price()));
    }
    push_line(&mut out, &line);

    let dashes = (COLUMN * items.len()).saturating_sub(COLUMN - LABEL + 5);
    push_line(&mut out, &format!("{INDENT}{}", "-".repeat(dashes)));

    let rows = items.iter().map(|item| item.capacity()).max().unwrap_or(0);
    for row in 0..rows {
        let mut line = String::from(INDENT);
        for (item, header) in items.iter().zip(&headers) {
            let stock = item.stock();
            if stock == 0 {
                let cell = if row == 0 { "<Out of Stock>" } else { "" };
                let _ = write!(line, "{cell:<COLUMN$}");
                continue;
            }
            let mid = (header.chars().count() / 2).min(COLUMN - 1);
            let blank = item.capacity().saturating_sub(stock);
            let mark = if row < blank { ' ' } else { item.symbol() };
            let _ = write!(line, "{}{mark}{}", " ".repeat(mid), " ".repeat(COLUMN - 1 - mid));
        }
        push_line(&mut out, &line);
    }
    out
}

/// Running total split into whole units and cents.
pub fn breakdown(paid: Amount) -> String {
    let (whole, cents) = paid.split();
    let rule = "-".repeat(30);
    format!(
        "SUMMARY OF INSERTED MONEY\n{rule}\n{:>14}: {whole}\n{:>14}: {cents}\n{rule}\n\
         Total Inserted: RM {paid}\n{rule}\n",
        "Ringgit", "Cents"
    )
}

pub fn summary(summary: &Summary) -> String {
    let rule = "-".repeat(35);
    let mut out = format!("MACHINE SUMMARY\n{rule}\n");
    for (name, stock) in &summary.items {
        let _ = writeln!(out, "{name:<LABEL$}: {stock:>2} in stock");
    }
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:<LABEL$}: {}", "Total Stock", summary.total_stock);
    let _ = writeln!(out, "{:<LABEL$}: {}", "Total Money", summary.total_money);
    let _ = writeln!(out, "{rule}");
    out
}

pub fn refunded(amount: Amount) -> String {
    format!(
        "********* REFUNDED *********\n  TRANSACTION CANCELLED\n  \
         PLEASE COLLECT YOUR MONEY: RM {amount}\n{}\n",
        "*".repeat(28)
    )
}

pub fn thank_you() -> String {
    format!(
        "{stars} THANK YOU {stars}\n ENJOY YOUR PURCHASED ITEM AND COME BACK NEXT TIME\n{}\n",
        "*".repeat(51),
        stars = "*".repeat(20)
    )
}

pub fn goodbye() -> &'static str {
    "\n========================\nEXITED. HAVE A NICE DAY!\n========================\n"
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}
