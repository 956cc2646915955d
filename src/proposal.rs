//! Proposal payload: the flat export contract for the proposal renderer
//!
//! The renderer/exporter consumes exactly this; the engine knows nothing
//! about document layout or formatting.

use serde::{Deserialize, Serialize};

use crate::benefits::BenefitModule;
use crate::calc::LoanQuote;
use crate::config::LoanConfiguration;

/// A selected benefit module as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedModule {
    pub id: String,
    pub title: String,
    pub value: f64,
    pub sublabel: String,
}

/// Flat data contract handed to the proposal renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalPayload {
    // Loan terms
    pub program: String,
    pub term_years: u32,
    pub interest_rate: f64,
    pub property_value: f64,

    // Debt totals
    pub payoff_total: f64,
    pub accounts_paid_off: usize,

    // Loan sizing
    pub cashout: f64,
    pub gross_loan_amount: f64,
    pub ltv_percent_display: u32,

    // Payment breakdown, current vs proposed
    pub current_total_payment: f64,
    pub proposed_principal_interest: f64,
    pub proposed_mortgage_insurance: f64,
    pub proposed_escrow: f64,
    pub proposed_total_payment: f64,
    pub monthly_savings: f64,

    // Break-even
    pub closing_costs: f64,
    pub break_even_months: Option<u32>,

    // Selected value propositions, in selection order
    pub selected_modules: Vec<SelectedModule>,
}

impl ProposalPayload {
    /// Assemble the payload from the priced quote and the selected modules
    pub fn assemble(
        quote: &LoanQuote,
        config: &LoanConfiguration,
        closing_costs: f64,
        accounts_paid_off: usize,
        selected: &[&BenefitModule],
    ) -> Self {
        Self {
            program: config.program.as_str().to_string(),
            term_years: config.term.years(),
            interest_rate: config.interest_rate,
            property_value: config.property_value,
            payoff_total: quote.payoff_total,
            accounts_paid_off,
            cashout: quote.cashout,
            gross_loan_amount: quote.gross_loan_amount,
            ltv_percent_display: quote.ltv_display(),
            current_total_payment: quote.current_total_payment,
            proposed_principal_interest: quote.monthly_pi,
            proposed_mortgage_insurance: quote.monthly_mi,
            proposed_escrow: quote.monthly_escrow,
            proposed_total_payment: quote.total_payment,
            monthly_savings: quote.payment_delta,
            closing_costs,
            break_even_months: quote.break_even_months(closing_costs),
            selected_modules: selected
                .iter()
                .map(|m| SelectedModule {
                    id: m.id.as_str().to_string(),
                    title: m.id.title().to_string(),
                    value: m.value,
                    sublabel: m.sublabel.clone(),
                })
                .collect(),
        }
    }
}
