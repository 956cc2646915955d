//! Mortgage-insurance policy table
//!
//! Premium rates here are policy constants of the estimator, not derived
//! figures. FHA-family programs carry an upfront premium financed into the
//! balance plus an ongoing monthly premium; Conventional carries a monthly
//! premium tiered by LTV band above 80; VA-family programs carry none.

use serde::{Deserialize, Serialize};

use crate::config::LoanProgram;

/// FHA upfront premium, fraction of base loan, financed into the balance
pub const FHA_UPFRONT_RATE: f64 = 0.0175;

/// FHA ongoing annual premium, fraction of the financed amount
pub const FHA_ANNUAL_RATE: f64 = 0.0055;

/// Conventional annual PMI rates by LTV band: (80, 90] / (90, 95] / > 95
pub const PMI_TIER_80_90: f64 = 0.005;
pub const PMI_TIER_90_95: f64 = 0.008;
pub const PMI_TIER_OVER_95: f64 = 0.010;

/// Mortgage-insurance determination for a priced loan
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MortgageInsurance {
    /// One-time premium financed into the loan balance
    pub upfront_financed: f64,

    /// Ongoing monthly premium
    pub monthly: f64,
}

impl MortgageInsurance {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Determine mortgage insurance for a program, base loan amount, and LTV
/// percent. `base_loan_amount` excludes any financed premium; the FHA
/// monthly premium applies to the financed total (base + upfront).
pub fn mortgage_insurance(
    program: LoanProgram,
    base_loan_amount: f64,
    ltv_percent: f64,
) -> MortgageInsurance {
    let base = base_loan_amount.max(0.0);

    if program.is_va_family() || base == 0.0 {
        return MortgageInsurance::none();
    }

    if program.is_fha_family() {
        let upfront = base * FHA_UPFRONT_RATE;
        let financed = base + upfront;
        return MortgageInsurance {
            upfront_financed: upfront,
            monthly: financed * FHA_ANNUAL_RATE / 12.0,
        };
    }

    // Conventional: no PMI at or below 80 LTV, tiered above
    let annual_rate = if ltv_percent <= 80.0 {
        0.0
    } else if ltv_percent <= 90.0 {
        PMI_TIER_80_90
    } else if ltv_percent <= 95.0 {
        PMI_TIER_90_95
    } else {
        PMI_TIER_OVER_95
    };

    MortgageInsurance {
        upfront_financed: 0.0,
        monthly: base * annual_rate / 12.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_va_family_has_no_insurance() {
        assert_eq!(mortgage_insurance(LoanProgram::Va, 500_000.0, 99.0), MortgageInsurance::none());
        assert_eq!(mortgage_insurance(LoanProgram::VaIrrrl, 500_000.0, 85.0), MortgageInsurance::none());
    }

    #[test]
    fn test_conventional_at_or_below_80() {
        let mi = mortgage_insurance(LoanProgram::Conventional, 400_000.0, 80.0);
        assert_eq!(mi.monthly, 0.0);
        assert_eq!(mi.upfront_financed, 0.0);
    }

    #[test]
    fn test_conventional_tier_80_90() {
        // $800k base at ~84 LTV: 0.5%/12 of base ≈ $333/mo
        let mi = mortgage_insurance(LoanProgram::Conventional, 800_000.0, 84.2);
        assert!((mi.monthly - 333.33).abs() < 0.01);
        assert_eq!(mi.upfront_financed, 0.0);
    }

    #[test]
    fn test_conventional_upper_tiers() {
        let mid = mortgage_insurance(LoanProgram::Conventional, 300_000.0, 93.0);
        assert!((mid.monthly - 300_000.0 * 0.008 / 12.0).abs() < 1e-9);

        let high = mortgage_insurance(LoanProgram::Conventional, 300_000.0, 96.0);
        assert!((high.monthly - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_fha_upfront_and_monthly() {
        let mi = mortgage_insurance(LoanProgram::Fha, 400_000.0, 85.0);
        assert!((mi.upfront_financed - 7_000.0).abs() < 1e-9);
        // Monthly premium on the financed amount (407k)
        assert!((mi.monthly - 407_000.0 * 0.0055 / 12.0).abs() < 1e-9);

        // Streamline uses the same FHA policy
        let streamline = mortgage_insurance(LoanProgram::FhaStreamline, 400_000.0, 85.0);
        assert_eq!(streamline, mi);
    }

    #[test]
    fn test_negative_base_clamps() {
        assert_eq!(mortgage_insurance(LoanProgram::Fha, -1.0, 85.0), MortgageInsurance::none());
    }
}
