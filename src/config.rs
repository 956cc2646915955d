//! Loan configuration and program policy tables

use serde::{Deserialize, Serialize};

use crate::ledger::{clamp_amount, DebtLedger};

/// Loan program governing maximum LTV and mortgage-insurance policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanProgram {
    Conventional,
    Fha,
    Va,
    FhaStreamline,
    VaIrrrl,
}

impl LoanProgram {
    /// Maximum LTV percent permitted by the program
    pub fn max_ltv(&self) -> f64 {
        match self {
            LoanProgram::Conventional => 95.0,
            LoanProgram::Fha => 96.5,
            LoanProgram::Va => 100.0,
            LoanProgram::FhaStreamline => 97.75,
            LoanProgram::VaIrrrl => 100.0,
        }
    }

    /// Minimum LTV percent required by the program, when one exists.
    /// None of the current programs imposes one; the clamp path exists for
    /// programs that do.
    pub fn min_ltv(&self) -> Option<f64> {
        match self {
            LoanProgram::Conventional
            | LoanProgram::Fha
            | LoanProgram::Va
            | LoanProgram::FhaStreamline
            | LoanProgram::VaIrrrl => None,
        }
    }

    /// Whether the program belongs to the FHA family (upfront + ongoing
    /// mortgage-insurance premium)
    pub fn is_fha_family(&self) -> bool {
        matches!(self, LoanProgram::Fha | LoanProgram::FhaStreamline)
    }

    /// Whether the program belongs to the VA family (no insurance in this
    /// model)
    pub fn is_va_family(&self) -> bool {
        matches!(self, LoanProgram::Va | LoanProgram::VaIrrrl)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanProgram::Conventional => "Conventional",
            LoanProgram::Fha => "FHA",
            LoanProgram::Va => "VA",
            LoanProgram::FhaStreamline => "FHA Streamline",
            LoanProgram::VaIrrrl => "VA IRRRL",
        }
    }

    /// Parse loose program labels from CLI/config input
    pub fn from_label(label: &str) -> Option<Self> {
        match label
            .trim()
            .to_ascii_lowercase()
            .replace(['-', '_', ' '], "")
            .as_str()
        {
            "conventional" | "conv" => Some(LoanProgram::Conventional),
            "fha" => Some(LoanProgram::Fha),
            "va" => Some(LoanProgram::Va),
            "fhastreamline" | "streamline" => Some(LoanProgram::FhaStreamline),
            "vairrrl" | "irrrl" => Some(LoanProgram::VaIrrrl),
            _ => None,
        }
    }
}

/// Loan term; the menu offers fixed terms only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanTerm {
    Ten,
    Fifteen,
    Twenty,
    Thirty,
}

impl LoanTerm {
    pub fn years(&self) -> u32 {
        match self {
            LoanTerm::Ten => 10,
            LoanTerm::Fifteen => 15,
            LoanTerm::Twenty => 20,
            LoanTerm::Thirty => 30,
        }
    }

    pub fn months(&self) -> u32 {
        self.years() * 12
    }

    /// Snap an arbitrary year count to the nearest offered term
    pub fn from_years(years: u32) -> Self {
        match years {
            0..=12 => LoanTerm::Ten,
            13..=17 => LoanTerm::Fifteen,
            18..=24 => LoanTerm::Twenty,
            _ => LoanTerm::Thirty,
        }
    }
}

/// Annual property-tax rate assumed for escrow estimates
pub const ESCROW_TAX_RATE: f64 = 0.011;

/// Annual hazard-insurance rate assumed for escrow estimates
pub const ESCROW_INSURANCE_RATE: f64 = 0.0035;

/// Monthly escrow estimate (taxes + insurance) for a property value
pub fn monthly_escrow(property_value: f64) -> f64 {
    clamp_amount(property_value) * (ESCROW_TAX_RATE + ESCROW_INSURANCE_RATE) / 12.0
}

/// Loan parameters in effect for pricing
///
/// `cashout_override` of None means "derive cashout from the target-LTV
/// slider"; Some(x) pins cashout at x dollars regardless of slider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanConfiguration {
    pub program: LoanProgram,
    pub term: LoanTerm,

    /// Property value (AVM estimate)
    pub property_value: f64,

    /// Selected nominal annual interest rate, percent
    pub interest_rate: f64,

    /// Whether taxes + insurance are escrowed into the payment
    pub include_escrow: bool,

    /// Manual cashout in dollars; None derives from `target_ltv`
    pub cashout_override: Option<f64>,

    /// LTV slider position, percent; only meaningful while
    /// `cashout_override` is None
    pub target_ltv: f64,
}

impl LoanConfiguration {
    /// Seed defaults from the ledger's primary mortgage: the new loan
    /// starts at the existing rate (or `fallback_rate` when the ledger
    /// does not record one), 30-year term, escrowed, cashout derived from
    /// the slider parked at the payoff floor.
    pub fn seeded_from(ledger: &DebtLedger, property_value: f64, fallback_rate: f64) -> Self {
        let rate = ledger
            .primary_mortgage()
            .and_then(|m| m.rate)
            .unwrap_or(fallback_rate);

        let property_value = clamp_amount(property_value);
        let target_ltv = if property_value > 0.0 {
            ledger.payoff_total() / property_value * 100.0
        } else {
            0.0
        };

        Self {
            program: LoanProgram::Conventional,
            term: LoanTerm::Thirty,
            property_value,
            interest_rate: rate,
            include_escrow: true,
            cashout_override: None,
            target_ltv,
        }
    }
}
