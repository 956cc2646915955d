//! Pricing state machine, snapshot capture, and staleness detection

pub mod diff;
pub mod session;
pub mod snapshot;

pub use diff::{ChangedAccount, SnapshotDiff};
pub use session::{PricingSession, PricingState, DEFAULT_CLOSING_COSTS};
pub use snapshot::PricingSnapshot;
