//! Fixed catalog of benefit modules and their adjustable display knobs

use serde::{Deserialize, Serialize};

/// Fixed reinvestment return used for ranking. The adjustable display
/// percentage never enters impact scoring, so tweaking it cannot reshuffle
/// which modules are recommended.
pub const BASELINE_REINVESTMENT_RETURN: f64 = 7.0;

/// Fixed cash-flow deferral window used for ranking, months
pub const BASELINE_DEFERRAL_MONTHS: u32 = 2;

/// Horizon for the reinvestment projection, months
pub const REINVESTMENT_HORIZON_MONTHS: u32 = 120;

/// Identifier of a value-proposition module; the catalog is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BenefitId {
    DebtConsolidation,
    PaymentSavings,
    BreakEven,
    CompoundGrowth,
    DisposableIncome,
    CashFlowWindow,
    CashBack,
    AcceleratedPayoff,
}

impl BenefitId {
    /// Catalog order; also the deterministic tie-break for ranking
    pub const ALL: [BenefitId; 8] = [
        BenefitId::DebtConsolidation,
        BenefitId::PaymentSavings,
        BenefitId::BreakEven,
        BenefitId::CompoundGrowth,
        BenefitId::DisposableIncome,
        BenefitId::CashFlowWindow,
        BenefitId::CashBack,
        BenefitId::AcceleratedPayoff,
    ];

    /// Stable wire id used in the proposal payload
    pub fn as_str(&self) -> &'static str {
        match self {
            BenefitId::DebtConsolidation => "debt-consolidation",
            BenefitId::PaymentSavings => "payment-savings",
            BenefitId::BreakEven => "break-even",
            BenefitId::CompoundGrowth => "compound-growth",
            BenefitId::DisposableIncome => "disposable-income",
            BenefitId::CashFlowWindow => "cash-flow-window",
            BenefitId::CashBack => "cash-back",
            BenefitId::AcceleratedPayoff => "accelerated-payoff",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BenefitId::DebtConsolidation => "Debt Consolidation",
            BenefitId::PaymentSavings => "Payment Savings",
            BenefitId::BreakEven => "Break-Even Point",
            BenefitId::CompoundGrowth => "Reinvested Savings",
            BenefitId::DisposableIncome => "Disposable Income",
            BenefitId::CashFlowWindow => "Cash-Flow Window",
            BenefitId::CashBack => "Cash Back at Closing",
            BenefitId::AcceleratedPayoff => "Accelerated Payoff",
        }
    }
}

/// Display-only knobs attached to individual modules. Impact scoring
/// deliberately ignores these; see the BASELINE_* constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustableParams {
    /// Reinvestment annual return percentage shown on the compound-growth
    /// module
    pub reinvestment_return_pct: f64,

    /// Payment-free months shown on the cash-flow-window module
    pub cash_flow_deferral_months: u32,
}

impl Default for AdjustableParams {
    fn default() -> Self {
        Self {
            reinvestment_return_pct: BASELINE_REINVESTMENT_RETURN,
            cash_flow_deferral_months: BASELINE_DEFERRAL_MONTHS,
        }
    }
}

/// One computed value-proposition instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitModule {
    pub id: BenefitId,

    /// Displayed metric (dollars or months depending on the module)
    pub value: f64,

    /// Short explanatory line under the metric
    pub sublabel: String,

    /// Internal ranking score; never shown to the user
    #[serde(skip_serializing, default)]
    pub impact: f64,

    /// Whether the module offers real value under the current quote
    pub provides_value: bool,

    /// Among the top 3 by impact within the provides-value set
    pub recommended: bool,

    /// The single highest-impact module
    pub top_benefit: bool,

    /// Chosen for the proposal; capped at 2 selections globally
    pub selected: bool,
}
