//! Loan Calculator: pure, side-effect-free pricing math
//!
//! Everything here operates on primitives and clamps bad input to safe
//! defaults instead of raising; the estimator must always produce some
//! consistent figure from whatever it is handed.

pub mod amortization;
pub mod insurance;
pub mod loan_amount;
pub mod quote;

pub use amortization::{
    accelerated_term_months, amortized_payment, future_value_of_contributions, implied_balance,
};
pub use insurance::{mortgage_insurance, MortgageInsurance};
pub use loan_amount::{
    clamp_target_ltv, extra_cashout_available, max_loan_at_ltv, resolve_loan_amount,
    CashoutSource, ResolvedLoan,
};
pub use quote::LoanQuote;
