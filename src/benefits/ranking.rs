//! Benefit computation, partitioning, and ranking
//!
//! `recompute_modules` is a pure function of the priced quote, the ledger,
//! the closing-cost basis, and the adjustable display parameters. Impact
//! scores come exclusively from stable quote figures: the adjustable knobs
//! shape displayed values only, so moving a slider never changes which
//! modules are flagged recommended.

use crate::calc::{accelerated_term_months, future_value_of_contributions, LoanQuote};
use crate::config::LoanConfiguration;
use crate::ledger::DebtLedger;

use super::catalog::{
    AdjustableParams, BenefitId, BenefitModule, BASELINE_DEFERRAL_MONTHS,
    BASELINE_REINVESTMENT_RETURN, REINVESTMENT_HORIZON_MONTHS,
};

/// Compute all modules for the current quote, then partition by
/// provides-value, rank that set descending by impact (catalog order
/// breaks ties), and flag the top 3 as recommended and the single highest
/// as the top benefit.
pub fn recompute_modules(
    quote: &LoanQuote,
    ledger: &DebtLedger,
    config: &LoanConfiguration,
    closing_costs: f64,
    params: &AdjustableParams,
) -> Vec<BenefitModule> {
    let mut modules: Vec<BenefitModule> = BenefitId::ALL
        .iter()
        .map(|&id| compute_module(id, quote, ledger, config, closing_costs, params))
        .collect();

    // Stable sort: catalog order survives impact ties
    let mut ranked: Vec<usize> = (0..modules.len())
        .filter(|&i| modules[i].provides_value)
        .collect();
    ranked.sort_by(|&a, &b| {
        modules[b]
            .impact
            .partial_cmp(&modules[a].impact)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (rank, &idx) in ranked.iter().enumerate() {
        modules[idx].recommended = rank < 3;
        modules[idx].top_benefit = rank == 0;
    }

    modules
}

fn compute_module(
    id: BenefitId,
    quote: &LoanQuote,
    ledger: &DebtLedger,
    config: &LoanConfiguration,
    closing_costs: f64,
    params: &AdjustableParams,
) -> BenefitModule {
    let delta = quote.payment_delta;
    let savings = delta.max(0.0);

    let (value, sublabel, impact, provides_value) = match id {
        BenefitId::DebtConsolidation => {
            let count = ledger.non_mortgage_count();
            (
                ledger.non_mortgage_payoff(),
                format!("{} account{} paid off at closing", count, plural(count)),
                12.0 * ledger.non_mortgage_payment(),
                count > 0,
            )
        }

        BenefitId::PaymentSavings => (
            savings,
            "lower total monthly payment".to_string(),
            12.0 * savings,
            delta > 0.0,
        ),

        BenefitId::BreakEven => {
            let months = quote.break_even_months(closing_costs);
            (
                months.map(f64::from).unwrap_or(0.0),
                format!("months to recoup ${:.0} in closing costs", closing_costs.max(0.0)),
                (36.0 * savings - closing_costs.max(0.0)).max(0.0),
                months.is_some(),
            )
        }

        BenefitId::CompoundGrowth => {
            let displayed = future_value_of_contributions(
                savings,
                params.reinvestment_return_pct,
                REINVESTMENT_HORIZON_MONTHS,
            );
            let baseline_fv = future_value_of_contributions(
                savings,
                BASELINE_REINVESTMENT_RETURN,
                REINVESTMENT_HORIZON_MONTHS,
            );
            let contributions = savings * REINVESTMENT_HORIZON_MONTHS as f64;
            (
                displayed,
                format!(
                    "10-year value of reinvested savings at {:.1}%",
                    params.reinvestment_return_pct
                ),
                (baseline_fv - contributions).max(0.0),
                delta > 0.0,
            )
        }

        BenefitId::DisposableIncome => (
            savings,
            "freed up every month".to_string(),
            6.0 * savings,
            delta > 0.0,
        ),

        BenefitId::CashFlowWindow => {
            let months = params.cash_flow_deferral_months;
            (
                months as f64 * quote.total_payment,
                format!("{} payment-free month{} at closing", months, plural(months as usize)),
                BASELINE_DEFERRAL_MONTHS as f64 * quote.current_total_payment,
                quote.total_payment > 0.0,
            )
        }

        BenefitId::CashBack => (
            quote.cashout,
            "cash in hand at closing".to_string(),
            quote.cashout,
            quote.cashout > 0.0,
        ),

        BenefitId::AcceleratedPayoff => {
            // Apply the monthly savings as extra principal on the new loan
            let accelerated = if delta > 0.0 {
                accelerated_term_months(
                    quote.gross_loan_amount,
                    config.interest_rate,
                    quote.monthly_pi + delta,
                )
            } else {
                None
            };
            let months_saved = accelerated
                .map(|n| (config.term.months() as f64 - n).max(0.0))
                .unwrap_or(0.0);
            (
                months_saved,
                "months shaved off by redirecting savings to principal".to_string(),
                months_saved * quote.monthly_pi,
                delta > 0.0 && accelerated.is_some() && months_saved > 0.0,
            )
        }
    };

    BenefitModule {
        id,
        value,
        sublabel,
        impact,
        provides_value,
        recommended: false,
        top_benefit: false,
        selected: false,
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoanProgram, LoanTerm};
    use crate::ledger::{AccountType, DebtAccount};

    fn fixture() -> (DebtLedger, LoanConfiguration) {
        let ledger = DebtLedger::new(vec![
            DebtAccount::new(1, "First National", AccountType::Mortgage, 410_000.0, 3_435.0, Some(7.5)),
            DebtAccount::new(2, "Visa", AccountType::Revolving, 18_500.0, 525.0, Some(22.99)),
            DebtAccount::new(3, "Auto Loan", AccountType::Installment, 31_200.0, 612.0, Some(7.4)),
        ]);
        let config = LoanConfiguration {
            program: LoanProgram::Conventional,
            term: LoanTerm::Thirty,
            property_value: 800_000.0,
            interest_rate: 6.0,
            include_escrow: false,
            cashout_override: Some(0.0),
            target_ltv: 0.0,
        };
        (ledger, config)
    }

    fn modules_for(
        ledger: &DebtLedger,
        config: &LoanConfiguration,
        params: &AdjustableParams,
    ) -> Vec<BenefitModule> {
        let quote = LoanQuote::derive(ledger, config);
        recompute_modules(&quote, ledger, config, 8_057.0, params)
    }

    fn by_id(modules: &[BenefitModule], id: BenefitId) -> &BenefitModule {
        modules.iter().find(|m| m.id == id).unwrap()
    }

    #[test]
    fn test_full_catalog_computed() {
        let (ledger, config) = fixture();
        let modules = modules_for(&ledger, &config, &AdjustableParams::default());
        assert_eq!(modules.len(), BenefitId::ALL.len());
    }

    #[test]
    fn test_saving_scenario_provides_value() {
        let (ledger, config) = fixture();
        let quote = LoanQuote::derive(&ledger, &config);
        assert!(quote.payment_delta > 0.0, "fixture must save money: {}", quote.payment_delta);

        let modules = modules_for(&ledger, &config, &AdjustableParams::default());

        assert!(by_id(&modules, BenefitId::PaymentSavings).provides_value);
        assert!(by_id(&modules, BenefitId::DebtConsolidation).provides_value);
        assert!(by_id(&modules, BenefitId::BreakEven).provides_value);
        assert!(by_id(&modules, BenefitId::AcceleratedPayoff).provides_value);
        // No cashout in this configuration
        assert!(!by_id(&modules, BenefitId::CashBack).provides_value);
    }

    #[test]
    fn test_recommended_flags() {
        let (ledger, config) = fixture();
        let modules = modules_for(&ledger, &config, &AdjustableParams::default());

        let recommended: Vec<_> = modules.iter().filter(|m| m.recommended).collect();
        assert_eq!(recommended.len(), 3);
        assert!(recommended.iter().all(|m| m.provides_value));

        let top: Vec<_> = modules.iter().filter(|m| m.top_benefit).collect();
        assert_eq!(top.len(), 1);
        assert!(top[0].recommended);

        // Top benefit has the maximum impact among provides-value modules
        let max_impact = modules
            .iter()
            .filter(|m| m.provides_value)
            .map(|m| m.impact)
            .fold(f64::MIN, f64::max);
        assert_eq!(top[0].impact, max_impact);
    }

    #[test]
    fn test_ranking_stable_under_adjustable_params() {
        let (ledger, config) = fixture();

        let baseline = modules_for(&ledger, &config, &AdjustableParams::default());
        let tweaked = modules_for(
            &ledger,
            &config,
            &AdjustableParams {
                reinvestment_return_pct: 12.0,
                cash_flow_deferral_months: 6,
            },
        );

        for (a, b) in baseline.iter().zip(tweaked.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.recommended, b.recommended, "recommended flipped for {:?}", a.id);
            assert_eq!(a.top_benefit, b.top_benefit, "top benefit flipped for {:?}", a.id);
            assert_eq!(a.impact, b.impact, "impact moved for {:?}", a.id);
        }

        // The displayed values do respond to the knobs
        let growth_a = by_id(&baseline, BenefitId::CompoundGrowth).value;
        let growth_b = by_id(&tweaked, BenefitId::CompoundGrowth).value;
        assert!(growth_b > growth_a);

        let window_a = by_id(&baseline, BenefitId::CashFlowWindow).value;
        let window_b = by_id(&tweaked, BenefitId::CashFlowWindow).value;
        assert!(window_b > window_a);
    }

    #[test]
    fn test_cash_back_requires_cashout() {
        let (ledger, mut config) = fixture();
        config.cashout_override = Some(40_000.0);
        let modules = modules_for(&ledger, &config, &AdjustableParams::default());

        let cash_back = by_id(&modules, BenefitId::CashBack);
        assert!(cash_back.provides_value);
        assert_eq!(cash_back.value, 40_000.0);
        assert_eq!(cash_back.impact, 40_000.0);
    }

    #[test]
    fn test_no_savings_scenario() {
        let (ledger, mut config) = fixture();
        // Price the new loan badly enough that there are no savings
        config.interest_rate = 12.0;
        let quote = LoanQuote::derive(&ledger, &config);
        assert!(quote.payment_delta < 0.0);

        let modules = modules_for(&ledger, &config, &AdjustableParams::default());
        assert!(!by_id(&modules, BenefitId::PaymentSavings).provides_value);
        assert!(!by_id(&modules, BenefitId::BreakEven).provides_value);
        assert!(!by_id(&modules, BenefitId::CompoundGrowth).provides_value);
        assert!(!by_id(&modules, BenefitId::AcceleratedPayoff).provides_value);
        // Consolidation still holds: the debts are still paid off
        assert!(by_id(&modules, BenefitId::DebtConsolidation).provides_value);
    }
}
