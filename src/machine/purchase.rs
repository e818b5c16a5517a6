use crate::Amount;
use crate::model::{Outcome, Payment, RefundReason};

use super::PurchaseError;

/// A purchase in the paying state.
///
/// Obtained from [`VendingMachine::begin_purchase`](super::VendingMachine::begin_purchase)
/// and ended either by [`Purchase::cancel`] or by handing it to
/// [`VendingMachine::settle`](super::VendingMachine::settle). The price is
/// fixed at selection time.
#[derive(Debug)]
pub struct Purchase {
    index: usize,
    price: Amount,
    paid: Amount,
}

impl Purchase {
    pub(super) fn new(index: usize, price: Amount) -> Self {
        Self {
            index,
            price,
            paid: Amount::ZERO,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn price(&self) -> Amount {
        self.price
    }

    pub fn paid(&self) -> Amount {
        self.paid
    }

    pub fn is_covered(&self) -> bool {
        self.paid >= self.price
    }

    /// Accept one contribution. Zero or negative contributions are refused
    /// and do not accumulate.
    pub fn insert(&mut self, amount: Amount) -> Result<Payment, PurchaseError> {
        if !amount.is_positive() {
            return Err(PurchaseError::NonPositiveAmount(amount));
        }
        self.paid += amount;
        Ok(self.payment())
    }

    pub fn payment(&self) -> Payment {
        if self.is_covered() {
            Payment::Covered {
                change: self.paid - self.price,
            }
        } else {
            Payment::Due {
                remaining: self.price - self.paid,
            }
        }
    }

    /// Give up on the purchase; everything paid so far is handed back.
    pub fn cancel(self) -> Outcome {
        self.refund(RefundReason::Cancelled)
    }

    pub(super) fn refund(self, reason: RefundReason) -> Outcome {
        Outcome::Refunded {
            amount: self.paid,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase(price: f64) -> Purchase {
        Purchase::new(0, Amount::new(price))
    }

    #[test]
    fn new_purchase_owes_full_price() {
        let purchase = purchase(1.5);
        assert_eq!(
            purchase.payment(),
            Payment::Due {
                remaining: Amount::new(1.5)
            }
        );
        assert_eq!(purchase.paid(), Amount::ZERO);
        assert!(!purchase.is_covered());
    }

    #[test]
    fn contributions_accumulate_until_covered() {
        let mut purchase = purchase(1.5);
        assert_eq!(
            purchase.insert(Amount::new(1.0)).unwrap(),
            Payment::Due {
                remaining: Amount::new(0.5)
            }
        );
        assert_eq!(
            purchase.insert(Amount::new(1.0)).unwrap(),
            Payment::Covered {
                change: Amount::new(0.5)
            }
        );
        assert_eq!(purchase.paid(), Amount::new(2.0));
    }

    #[test]
    fn exact_payment_leaves_no_change() {
        let mut purchase = purchase(1.5);
        assert_eq!(
            purchase.insert(Amount::new(1.5)).unwrap(),
            Payment::Covered {
                change: Amount::ZERO
            }
        );
    }

    #[test]
    fn non_positive_contribution_is_refused() {
        let mut purchase = purchase(1.0);
        assert_eq!(
            purchase.insert(Amount::ZERO),
            Err(PurchaseError::NonPositiveAmount(Amount::ZERO))
        );
        assert_eq!(
            purchase.insert(Amount::new(-2.0)),
            Err(PurchaseError::NonPositiveAmount(Amount::new(-2.0)))
        );
        assert_eq!(purchase.paid(), Amount::ZERO);
    }

    #[test]
    fn cancel_refunds_everything_paid() {
        let mut purchase = purchase(2.0);
        purchase.insert(Amount::new(0.5)).unwrap();
        purchase.insert(Amount::new(0.2)).unwrap();

        match purchase.cancel() {
            Outcome::Refunded { amount, reason } => {
                assert_eq!(amount, Amount::new(0.5) + Amount::new(0.2));
                assert_eq!(reason, RefundReason::Cancelled);
            }
            other => panic!("expected refund, got {other:?}"),
        }
    }
}
