//! Snapshot diff engine
//!
//! Compares the pricing-time snapshot to the live ledger's included set.
//! Matching is keyed strictly by account id: creditor names can collide
//! across distinct accounts and positions shift, so neither may merge two
//! records.

use serde::{Deserialize, Serialize};

use crate::ledger::{DebtAccount, DebtLedger};

use super::snapshot::PricingSnapshot;

/// A balance or payment change on an account present in both sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangedAccount {
    pub id: u32,
    pub creditor: String,

    pub previous_balance: f64,
    pub current_balance: f64,
    /// current - previous
    pub balance_delta: f64,

    pub previous_payment: f64,
    pub current_payment: f64,
    /// current - previous
    pub payment_delta: f64,
}

/// Full comparison of snapshot versus live included accounts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    /// Included live but absent from the snapshot
    pub new_accounts: Vec<DebtAccount>,

    /// In the snapshot but no longer included live
    pub removed_accounts: Vec<DebtAccount>,

    /// Present in both with a different balance or payment
    pub changed_accounts: Vec<ChangedAccount>,

    /// Sum of balance deltas across changed accounts
    pub total_balance_delta: f64,

    /// Sum of payment deltas across changed accounts
    pub total_payment_delta: f64,
}

impl SnapshotDiff {
    /// Diff a snapshot against the live ledger's included accounts
    pub fn compute(snapshot: &PricingSnapshot, ledger: &DebtLedger) -> Self {
        let mut diff = SnapshotDiff::default();

        for live in ledger.included() {
            match snapshot.accounts().iter().find(|s| s.id == live.id) {
                None => diff.new_accounts.push(live.clone()),
                Some(prev) => {
                    if prev.balance != live.balance || prev.payment != live.payment {
                        let balance_delta = live.balance - prev.balance;
                        let payment_delta = live.payment - prev.payment;
                        diff.total_balance_delta += balance_delta;
                        diff.total_payment_delta += payment_delta;
                        diff.changed_accounts.push(ChangedAccount {
                            id: live.id,
                            creditor: live.creditor.clone(),
                            previous_balance: prev.balance,
                            current_balance: live.balance,
                            balance_delta,
                            previous_payment: prev.payment,
                            current_payment: live.payment,
                            payment_delta,
                        });
                    }
                }
            }
        }

        for prev in snapshot.accounts() {
            if !ledger.included().any(|live| live.id == prev.id) {
                diff.removed_accounts.push(prev.clone());
            }
        }

        diff
    }

    /// True iff any category is non-empty
    pub fn has_changes(&self) -> bool {
        !self.new_accounts.is_empty()
            || !self.removed_accounts.is_empty()
            || !self.changed_accounts.is_empty()
    }
}
