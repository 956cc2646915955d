//! Debt ledger: the mutable account list the pricing core reads from
//!
//! The ledger is owned by the operator session and mutated by toggles and
//! edits; the pricing core treats it as read-only input and snapshots it
//! at pricing time.

pub mod account;
pub mod loader;
pub mod parse;

pub use account::{AccountType, DebtAccount};
pub use loader::{load_ledger_csv, load_ledger_json, LedgerLoadError};
pub use parse::{clamp_amount, parse_currency, parse_percent};

use serde::{Deserialize, Serialize};

/// Ordered, mutable collection of debt accounts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebtLedger {
    accounts: Vec<DebtAccount>,
}

impl DebtLedger {
    pub fn new(accounts: Vec<DebtAccount>) -> Self {
        Self { accounts }
    }

    pub fn accounts(&self) -> &[DebtAccount] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&DebtAccount> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut DebtAccount> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    /// Append an account; returns false (and leaves the ledger unchanged)
    /// when the id is already present
    pub fn add(&mut self, account: DebtAccount) -> bool {
        if self.get(account.id).is_some() {
            return false;
        }
        self.accounts.push(account);
        true
    }

    /// Remove an account by id; returns the removed record if present
    pub fn remove(&mut self, id: u32) -> Option<DebtAccount> {
        let idx = self.accounts.iter().position(|a| a.id == id)?;
        Some(self.accounts.remove(idx))
    }

    /// Flip the payoff-inclusion flag; returns the new value, or None for
    /// an unknown id
    pub fn toggle_include(&mut self, id: u32) -> Option<bool> {
        let account = self.get_mut(id)?;
        account.include_in_payoff = !account.include_in_payoff;
        Some(account.include_in_payoff)
    }

    /// Accounts currently marked for payoff, in ledger order
    pub fn included(&self) -> impl Iterator<Item = &DebtAccount> {
        self.accounts.iter().filter(|a| a.include_in_payoff)
    }

    /// Sum of balances of included accounts (the payoff total)
    pub fn payoff_total(&self) -> f64 {
        self.included().map(|a| a.balance).sum()
    }

    /// Sum of monthly payments of included accounts
    pub fn included_payment_total(&self) -> f64 {
        self.included().map(|a| a.payment).sum()
    }

    /// Sum of monthly payments across the whole ledger (the borrower's
    /// current obligation, whether or not each debt is consolidated)
    pub fn total_payment(&self) -> f64 {
        self.accounts.iter().map(|a| a.payment).sum()
    }

    /// Balance of included non-mortgage debt (what "debt consolidation"
    /// eliminates beyond the mortgage refinance itself)
    pub fn non_mortgage_payoff(&self) -> f64 {
        self.included()
            .filter(|a| !a.is_mortgage())
            .map(|a| a.balance)
            .sum()
    }

    /// Monthly payments of included non-mortgage debt
    pub fn non_mortgage_payment(&self) -> f64 {
        self.included()
            .filter(|a| !a.is_mortgage())
            .map(|a| a.payment)
            .sum()
    }

    /// Count of included non-mortgage accounts
    pub fn non_mortgage_count(&self) -> usize {
        self.included().filter(|a| !a.is_mortgage()).count()
    }

    /// First included mortgage account, used to seed loan-configuration
    /// defaults
    pub fn primary_mortgage(&self) -> Option<&DebtAccount> {
        self.included().find(|a| a.is_mortgage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> DebtLedger {
        DebtLedger::new(vec![
            DebtAccount::new(1, "First National", AccountType::Mortgage, 410_000.0, 2_710.0, Some(6.875)),
            DebtAccount::new(2, "Visa", AccountType::Revolving, 18_500.0, 525.0, Some(22.99)),
            DebtAccount::new(3, "Auto Loan", AccountType::Installment, 31_200.0, 612.0, Some(7.4)),
        ])
    }

    #[test]
    fn test_payoff_totals() {
        let ledger = sample_ledger();
        assert_eq!(ledger.payoff_total(), 459_700.0);
        assert_eq!(ledger.total_payment(), 3_847.0);
        assert_eq!(ledger.non_mortgage_payoff(), 49_700.0);
        assert_eq!(ledger.non_mortgage_count(), 2);
    }

    #[test]
    fn test_toggle_include() {
        let mut ledger = sample_ledger();
        assert_eq!(ledger.toggle_include(2), Some(false));
        assert_eq!(ledger.payoff_total(), 441_200.0);
        assert_eq!(ledger.toggle_include(2), Some(true));
        assert_eq!(ledger.toggle_include(99), None);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut ledger = sample_ledger();
        let dup = DebtAccount::new(1, "Other Bank", AccountType::Other, 1.0, 1.0, None);
        assert!(!ledger.add(dup));
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_primary_mortgage() {
        let mut ledger = sample_ledger();
        assert_eq!(ledger.primary_mortgage().unwrap().id, 1);
        ledger.toggle_include(1);
        assert!(ledger.primary_mortgage().is_none());
    }
}
