//! Loan quote derivation
//!
//! A quote is derived, never stored: every read recomputes it from the
//! live ledger and configuration, so it has no lifecycle of its own and
//! can never drift from its inputs.

use serde::{Deserialize, Serialize};

use crate::config::{monthly_escrow, LoanConfiguration};
use crate::ledger::DebtLedger;

use super::amortization::amortized_payment;
use super::insurance::mortgage_insurance;
use super::loan_amount::{clamp_target_ltv, resolve_loan_amount, CashoutSource};

/// Priced view of the consolidated loan versus current payments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    /// Sum of balances of included debts
    pub payoff_total: f64,

    /// Cash to borrower beyond the payoff; never negative
    pub cashout: f64,

    /// payoff + cashout, before any financed premium
    pub base_loan_amount: f64,

    /// Upfront mortgage-insurance premium financed into the balance
    pub financed_premium: f64,

    /// base loan + financed premium
    pub gross_loan_amount: f64,

    /// base loan / property value, percent, full precision; display
    /// rounding goes through [`LoanQuote::ltv_display`]
    pub ltv_percent: f64,

    /// Monthly principal & interest on the gross loan
    pub monthly_pi: f64,

    /// Monthly mortgage-insurance premium
    pub monthly_mi: f64,

    /// Monthly escrow (taxes + insurance), zero when not escrowed
    pub monthly_escrow: f64,

    /// P&I + MI + escrow
    pub total_payment: f64,

    /// Sum of current monthly payments on the debts being consolidated
    pub current_total_payment: f64,

    /// current - proposed; positive means the borrower saves monthly
    pub payment_delta: f64,
}

impl LoanQuote {
    /// Derive a quote from the live ledger and configuration.
    ///
    /// A manual cashout override is taken as-is (clamped non-negative);
    /// otherwise the cashout derives from the target-LTV slider, which is
    /// first clamped to the payoff floor and the program's LTV band.
    pub fn derive(ledger: &DebtLedger, config: &LoanConfiguration) -> Self {
        let payoff_total = ledger.payoff_total();

        let source = match config.cashout_override {
            Some(cashout) => CashoutSource::Manual(cashout),
            None => CashoutSource::TargetLtv(clamp_target_ltv(
                config.target_ltv,
                payoff_total,
                config.property_value,
                config.program,
            )),
        };

        let resolved = resolve_loan_amount(payoff_total, source, config.property_value);

        let mi = mortgage_insurance(config.program, resolved.base_loan_amount, resolved.ltv_percent);
        let gross_loan_amount = resolved.base_loan_amount + mi.upfront_financed;

        let monthly_pi = amortized_payment(
            gross_loan_amount,
            config.interest_rate,
            config.term.years(),
        );

        let escrow = if config.include_escrow {
            monthly_escrow(config.property_value)
        } else {
            0.0
        };

        let total_payment = monthly_pi + mi.monthly + escrow;
        let current_total_payment = ledger.included_payment_total();

        Self {
            payoff_total,
            cashout: resolved.cashout,
            base_loan_amount: resolved.base_loan_amount,
            financed_premium: mi.upfront_financed,
            gross_loan_amount,
            ltv_percent: resolved.ltv_percent,
            monthly_pi,
            monthly_mi: mi.monthly,
            monthly_escrow: escrow,
            total_payment,
            current_total_payment,
            payment_delta: current_total_payment - total_payment,
        }
    }

    /// LTV rounded to a whole percent for display
    pub fn ltv_display(&self) -> u32 {
        self.ltv_percent.round().max(0.0) as u32
    }

    /// Break-even horizon in whole months for a given closing-cost basis;
    /// None when there are no monthly savings to recoup against
    pub fn break_even_months(&self, closing_costs: f64) -> Option<u32> {
        if self.payment_delta <= 0.0 {
            return None;
        }
        let costs = closing_costs.max(0.0);
        Some((costs / self.payment_delta).ceil() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoanProgram, LoanTerm};
    use crate::ledger::{AccountType, DebtAccount};
    use approx::assert_relative_eq;

    fn ledger() -> DebtLedger {
        DebtLedger::new(vec![
            DebtAccount::new(1, "First National", AccountType::Mortgage, 410_000.0, 2_960.0, Some(6.875)),
            DebtAccount::new(2, "Visa", AccountType::Revolving, 18_500.0, 525.0, Some(22.99)),
            DebtAccount::new(3, "Auto Loan", AccountType::Installment, 31_200.0, 612.0, Some(7.4)),
        ])
    }

    fn config() -> LoanConfiguration {
        LoanConfiguration {
            program: LoanProgram::Conventional,
            term: LoanTerm::Thirty,
            property_value: 800_000.0,
            interest_rate: 6.0,
            include_escrow: false,
            cashout_override: Some(0.0),
            target_ltv: 0.0,
        }
    }

    #[test]
    fn test_quote_invariants() {
        let quote = LoanQuote::derive(&ledger(), &config());

        assert_eq!(quote.payoff_total, 459_700.0);
        assert_eq!(quote.cashout, 0.0);
        assert!(quote.gross_loan_amount >= quote.payoff_total);
        assert_eq!(quote.base_loan_amount, quote.payoff_total + quote.cashout);
        assert_relative_eq!(quote.ltv_percent, 57.4625, max_relative = 1e-12);
        assert_eq!(quote.ltv_display(), 57);

        // Below 80 LTV conventional: no MI, no financed premium
        assert_eq!(quote.monthly_mi, 0.0);
        assert_eq!(quote.gross_loan_amount, quote.base_loan_amount);

        // Current payments are the included accounts' payments
        assert_eq!(quote.current_total_payment, 4_097.0);
        assert_relative_eq!(
            quote.payment_delta,
            quote.current_total_payment - quote.total_payment,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_quote_fha_finances_premium() {
        let mut cfg = config();
        cfg.program = LoanProgram::Fha;
        let quote = LoanQuote::derive(&ledger(), &cfg);

        assert_relative_eq!(quote.financed_premium, 459_700.0 * 0.0175, max_relative = 1e-12);
        assert_eq!(quote.gross_loan_amount, quote.base_loan_amount + quote.financed_premium);
        assert!(quote.monthly_mi > 0.0);
        // gross = payoff + cashout + financed premium, never less than payoff
        assert!(quote.gross_loan_amount > quote.payoff_total);
    }

    #[test]
    fn test_quote_slider_drives_cashout() {
        let mut cfg = config();
        cfg.cashout_override = None;
        cfg.target_ltv = 70.0;
        let quote = LoanQuote::derive(&ledger(), &cfg);

        assert_eq!(quote.cashout, 100_300.0); // 560k target - 459.7k payoff
        assert_relative_eq!(quote.ltv_percent, 70.0, max_relative = 1e-12);

        // Slider below the payoff floor clamps up, cashout stays zero
        cfg.target_ltv = 10.0;
        let floored = LoanQuote::derive(&ledger(), &cfg);
        assert_eq!(floored.cashout, 0.0);
        assert_relative_eq!(floored.ltv_percent, 57.4625, max_relative = 1e-12);
    }

    #[test]
    fn test_quote_escrow_included() {
        let mut cfg = config();
        cfg.include_escrow = true;
        let quote = LoanQuote::derive(&ledger(), &cfg);

        assert!(quote.monthly_escrow > 0.0);
        assert_relative_eq!(
            quote.total_payment,
            quote.monthly_pi + quote.monthly_mi + quote.monthly_escrow,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_break_even_scenario() {
        // $401/mo savings against $8,057 closing costs
        let mut quote = LoanQuote::derive(&ledger(), &config());
        quote.current_total_payment = 4_572.0;
        quote.total_payment = 4_171.0;
        quote.payment_delta = 401.0;

        assert_eq!(quote.break_even_months(8_057.0), Some(21));
        assert_eq!(quote.break_even_months(0.0), Some(0));

        quote.payment_delta = 0.0;
        assert_eq!(quote.break_even_months(8_057.0), None);
    }
}
