use crate::Amount;

/// Machine-wide counters kept alongside per-item state.
///
/// `stock` mirrors the sum of every item ledger; `money` is the float
/// available for change.
#[derive(Debug, Default)]
pub struct Till {
    pub stock: usize,
    pub money: Amount,
}

impl Till {
    pub fn stock_in(&mut self, units: usize) {
        self.stock += units;
    }

    pub fn stock_out(&mut self) {
        self.stock = self.stock.saturating_sub(1);
    }

    pub fn credit(&mut self, amount: Amount) {
        self.money += amount;
    }

    pub fn can_pay_out(&self, change: Amount) -> bool {
        change <= self.money
    }
}

/// Snapshot of the machine for the admin summary screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Name and stock of each registered item, in slot order.
    pub items: Vec<(String, usize)>,
    /// Total stock recomputed from the items.
    pub total_stock: usize,
    pub total_money: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn till_default_is_empty() {
        let till = Till::default();
        assert_eq!(till.stock, 0);
        assert_eq!(till.money, Amount::ZERO);
    }

    #[test]
    fn stock_counter_never_underflows() {
        let mut till = Till::default();
        till.stock_in(1);
        till.stock_out();
        till.stock_out();
        assert_eq!(till.stock, 0);
    }

    #[test]
    fn pay_out_bounded_by_float() {
        let mut till = Till::default();
        assert!(till.can_pay_out(Amount::ZERO));
        assert!(!till.can_pay_out(Amount::new(0.5)));
        till.credit(Amount::new(0.5));
        assert!(till.can_pay_out(Amount::new(0.5)));
    }
}
