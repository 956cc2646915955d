//! Consolidation Engine - Deterministic pricing core for debt-consolidation refinance scenarios
//!
//! This library provides:
//! - A debt ledger with robust currency normalization at its boundary
//! - Pure loan-calculator math (amortization, mortgage insurance, LTV/cashout)
//! - A fixed rate-selection table
//! - A Setup → Priced → ProposalReady state machine with staleness tracking
//! - An id-keyed snapshot diff engine
//! - A benefit ranking engine with a capped proposal selection

pub mod benefits;
pub mod calc;
pub mod config;
pub mod ledger;
pub mod pricing;
pub mod proposal;
pub mod rates;

// Re-export commonly used types
pub use benefits::{AdjustableParams, BenefitId, BenefitModule, SelectionSet};
pub use calc::LoanQuote;
pub use config::{LoanConfiguration, LoanProgram, LoanTerm};
pub use ledger::{AccountType, DebtAccount, DebtLedger};
pub use pricing::{PricingSession, PricingSnapshot, PricingState, SnapshotDiff};
pub use proposal::ProposalPayload;
pub use rates::{RateOffer, RateSheet};
