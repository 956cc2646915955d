//! Cashout / LTV resolution
//!
//! Two equivalent entry points: a manual cashout derives the LTV, a target
//! LTV derives the cashout. Feeding the derived cashout back through the
//! LTV formula reproduces the same LTV within rounding.

use serde::{Deserialize, Serialize};

use crate::config::LoanProgram;

/// LTV ceiling used for the "extra cashout available" hint
pub const EXTRA_CASHOUT_LTV_CEILING: f64 = 80.0;

/// How the cashout side of the loan amount is specified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CashoutSource {
    /// Operator entered a dollar cashout directly
    Manual(f64),
    /// Derive cashout from an LTV slider position (percent)
    TargetLtv(f64),
}

/// Resolved loan sizing before mortgage insurance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLoan {
    /// Sum of balances being paid off
    pub payoff_total: f64,

    /// Cash to borrower beyond the payoff; never negative
    pub cashout: f64,

    /// payoff + cashout
    pub base_loan_amount: f64,

    /// base / property value, percent, full precision
    pub ltv_percent: f64,
}

impl ResolvedLoan {
    /// LTV rounded to a whole percent for display; monetary derivations
    /// keep full precision
    pub fn ltv_display(&self) -> u32 {
        self.ltv_percent.round().max(0.0) as u32
    }
}

/// Resolve cashout, base loan amount, and LTV from either entry point.
/// Negative inputs clamp to zero; a non-positive property value yields an
/// LTV of zero rather than a division error.
pub fn resolve_loan_amount(
    payoff_total: f64,
    source: CashoutSource,
    property_value: f64,
) -> ResolvedLoan {
    let payoff = payoff_total.max(0.0);
    let property = property_value.max(0.0);

    let cashout = match source {
        CashoutSource::Manual(amount) => amount.max(0.0),
        CashoutSource::TargetLtv(ltv) => {
            let target = max_loan_at_ltv(property, ltv.max(0.0));
            (target - payoff).max(0.0)
        }
    };

    let base = payoff + cashout;
    let ltv_percent = if property > 0.0 {
        base / property * 100.0
    } else {
        0.0
    };

    ResolvedLoan {
        payoff_total: payoff,
        cashout,
        base_loan_amount: base,
        ltv_percent,
    }
}

/// Largest loan amount at a given LTV percent, rounded to the dollar
pub fn max_loan_at_ltv(property_value: f64, ltv_percent: f64) -> f64 {
    (property_value.max(0.0) * ltv_percent.max(0.0) / 100.0).round()
}

/// Additional cashout available before hitting the 80% LTV ceiling
pub fn extra_cashout_available(property_value: f64, current_loan_amount: f64) -> f64 {
    let ceiling = max_loan_at_ltv(property_value, EXTRA_CASHOUT_LTV_CEILING);
    (ceiling - current_loan_amount.max(0.0)).max(0.0)
}

/// Clamp an LTV slider position to the valid band: never below the floor
/// implied by the payoff (you cannot finance less than what is being paid
/// off), raised to a program minimum when one exists, capped at the
/// program maximum unless the payoff floor itself exceeds it.
pub fn clamp_target_ltv(
    target_ltv: f64,
    payoff_total: f64,
    property_value: f64,
    program: LoanProgram,
) -> f64 {
    let payoff_floor = if property_value > 0.0 {
        payoff_total.max(0.0) / property_value * 100.0
    } else {
        0.0
    };

    let mut ltv = target_ltv.max(payoff_floor);
    if let Some(min) = program.min_ltv() {
        ltv = ltv.max(min);
    }
    // The payoff floor wins over the program ceiling: an oversized payoff
    // still has to be financed in full
    ltv.min(program.max_ltv()).max(payoff_floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_manual_cashout_derives_ltv() {
        let resolved = resolve_loan_amount(459_700.0, CashoutSource::Manual(25_000.0), 800_000.0);
        assert_eq!(resolved.cashout, 25_000.0);
        assert_eq!(resolved.base_loan_amount, 484_700.0);
        assert_relative_eq!(resolved.ltv_percent, 60.5875, max_relative = 1e-12);
        assert_eq!(resolved.ltv_display(), 61);
    }

    #[test]
    fn test_target_ltv_derives_cashout() {
        let resolved = resolve_loan_amount(459_700.0, CashoutSource::TargetLtv(65.0), 800_000.0);
        assert_eq!(resolved.cashout, 60_300.0);
        assert_eq!(resolved.base_loan_amount, 520_000.0);
        assert_relative_eq!(resolved.ltv_percent, 65.0, max_relative = 1e-12);
    }

    #[test]
    fn test_round_trip_consistency() {
        // Derive cashout from an LTV, then feed it back as manual: LTV must
        // reproduce within rounding
        for &(payoff, ltv, property) in &[
            (459_700.0, 65.0, 800_000.0),
            (50_000.0, 40.0, 950_000.0),
            (123_456.0, 77.7, 654_321.0),
        ] {
            let from_ltv = resolve_loan_amount(payoff, CashoutSource::TargetLtv(ltv), property);
            let from_cashout =
                resolve_loan_amount(payoff, CashoutSource::Manual(from_ltv.cashout), property);
            assert!(
                (from_cashout.ltv_percent - from_ltv.ltv_percent).abs() < 0.01,
                "LTV round trip diverged: {} vs {}",
                from_cashout.ltv_percent,
                from_ltv.ltv_percent
            );
            assert_eq!(from_cashout.cashout, from_ltv.cashout);
        }
    }

    #[test]
    fn test_cashout_never_negative() {
        // Target LTV below the payoff floor yields zero cashout, not
        // negative; gross never drops below the payoff
        let resolved = resolve_loan_amount(459_700.0, CashoutSource::TargetLtv(30.0), 800_000.0);
        assert_eq!(resolved.cashout, 0.0);
        assert_eq!(resolved.base_loan_amount, 459_700.0);

        let manual = resolve_loan_amount(459_700.0, CashoutSource::Manual(-5_000.0), 800_000.0);
        assert_eq!(manual.cashout, 0.0);
        assert!(manual.base_loan_amount >= manual.payoff_total);
    }

    #[test]
    fn test_zero_property_value() {
        let resolved = resolve_loan_amount(100_000.0, CashoutSource::TargetLtv(80.0), 0.0);
        assert_eq!(resolved.ltv_percent, 0.0);
        assert_eq!(resolved.cashout, 0.0);
    }

    #[test]
    fn test_small_payoff_ltv_stands() {
        // $50k payoff on a $950k property: ~5% LTV, no program minimum
        // exists, so the computed value stands
        let resolved = resolve_loan_amount(50_000.0, CashoutSource::Manual(0.0), 950_000.0);
        assert_relative_eq!(resolved.ltv_percent, 5.263157894736842, max_relative = 1e-12);
        assert_eq!(resolved.ltv_display(), 5);

        let clamped = clamp_target_ltv(
            resolved.ltv_percent,
            50_000.0,
            950_000.0,
            LoanProgram::Conventional,
        );
        assert_relative_eq!(clamped, resolved.ltv_percent, max_relative = 1e-12);
    }

    #[test]
    fn test_clamp_target_ltv_floor_and_ceiling() {
        // Floor: slider cannot go below the payoff-implied LTV
        let floored = clamp_target_ltv(10.0, 459_700.0, 800_000.0, LoanProgram::Conventional);
        assert_relative_eq!(floored, 57.4625, max_relative = 1e-12);

        // Ceiling: slider caps at the program maximum
        let capped = clamp_target_ltv(99.0, 100_000.0, 800_000.0, LoanProgram::Conventional);
        assert_eq!(capped, 95.0);

        // Oversized payoff overrides the ceiling
        let oversized = clamp_target_ltv(80.0, 880_000.0, 800_000.0, LoanProgram::Conventional);
        assert_relative_eq!(oversized, 110.0, max_relative = 1e-12);
    }

    #[test]
    fn test_extra_cashout_hint() {
        assert_eq!(extra_cashout_available(800_000.0, 500_000.0), 140_000.0);
        assert_eq!(extra_cashout_available(800_000.0, 700_000.0), 0.0);
        assert_eq!(max_loan_at_ltv(950_000.0, 80.0), 760_000.0);
    }
}
