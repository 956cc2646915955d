//! Point-in-time capture of pricing inputs
//!
//! A snapshot is taken exactly once per pricing run and never mutated;
//! re-pricing replaces it wholesale. Its only consumer is the diff engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::LoanConfiguration;
use crate::ledger::{DebtAccount, DebtLedger};

/// Immutable deep copy of the included accounts and the configuration in
/// effect when pricing ran
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSnapshot {
    accounts: Vec<DebtAccount>,
    config: LoanConfiguration,
    captured_at: DateTime<Utc>,
}

impl PricingSnapshot {
    /// Capture the current included accounts and configuration
    pub fn capture(ledger: &DebtLedger, config: &LoanConfiguration) -> Self {
        Self {
            accounts: ledger.included().cloned().collect(),
            config: config.clone(),
            captured_at: Utc::now(),
        }
    }

    pub fn accounts(&self) -> &[DebtAccount] {
        &self.accounts
    }

    pub fn config(&self) -> &LoanConfiguration {
        &self.config
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn payoff_total(&self) -> f64 {
        self.accounts.iter().map(|a| a.balance).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoanConfiguration;
    use crate::ledger::AccountType;

    #[test]
    fn test_capture_copies_included_only() {
        let mut ledger = DebtLedger::new(vec![
            DebtAccount::new(1, "First National", AccountType::Mortgage, 410_000.0, 2_710.0, None),
            DebtAccount::new(2, "Visa", AccountType::Revolving, 18_500.0, 525.0, None),
        ]);
        ledger.toggle_include(2);

        let config = LoanConfiguration::seeded_from(&ledger, 800_000.0, 6.5);
        let snapshot = PricingSnapshot::capture(&ledger, &config);

        assert_eq!(snapshot.accounts().len(), 1);
        assert_eq!(snapshot.payoff_total(), 410_000.0);

        // Mutating the live ledger afterwards does not reach the snapshot
        ledger.get_mut(1).unwrap().set_balance(999_999.0);
        assert_eq!(snapshot.payoff_total(), 410_000.0);
    }
}
