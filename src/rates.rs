//! Rate selection table
//!
//! A fixed, ordered menu of discrete rate offers presented after pricing.
//! Positive point fractions mean the borrower pays points; negative means
//! a lender credit. Switching offers changes price, not eligibility, so it
//! never marks the quote stale; payment and break-even figures recompute
//! on the next read.

use serde::Serialize;

/// One row of the rate menu
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateOffer {
    /// Display label
    pub label: &'static str,

    /// Nominal annual rate, percent
    pub rate: f64,

    /// Point cost as a signed fraction of the loan amount
    /// (positive = borrower pays, negative = lender credit)
    pub point_fraction: f64,
}

impl RateOffer {
    /// Signed dollar cost of the points for a given loan amount
    pub fn point_cost(&self, loan_amount: f64) -> f64 {
        loan_amount.max(0.0) * self.point_fraction
    }
}

/// Ordered, fixed menu of rate offers
#[derive(Debug, Clone, Serialize)]
pub struct RateSheet {
    offers: Vec<RateOffer>,
}

impl RateSheet {
    /// The standard menu around a 6.5% par rate
    pub fn standard() -> Self {
        Self {
            offers: vec![
                RateOffer { label: "6.000% (1.750 pts)", rate: 6.000, point_fraction: 0.01750 },
                RateOffer { label: "6.250% (1.000 pt)", rate: 6.250, point_fraction: 0.01000 },
                RateOffer { label: "6.500% (par)", rate: 6.500, point_fraction: 0.0 },
                RateOffer { label: "6.750% (0.500 credit)", rate: 6.750, point_fraction: -0.00500 },
                RateOffer { label: "7.000% (1.000 credit)", rate: 7.000, point_fraction: -0.01000 },
            ],
        }
    }

    pub fn offers(&self) -> &[RateOffer] {
        &self.offers
    }

    pub fn get(&self, index: usize) -> Option<&RateOffer> {
        self.offers.get(index)
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Index of the par (zero-point) offer, when present
    pub fn par_index(&self) -> Option<usize> {
        self.offers.iter().position(|o| o.point_fraction == 0.0)
    }

    /// Par rate used to seed configuration defaults when the ledger has no
    /// recorded mortgage rate
    pub fn par_rate(&self) -> f64 {
        self.par_index()
            .and_then(|i| self.offers.get(i))
            .map(|o| o.rate)
            .unwrap_or(6.5)
    }
}

impl Default for RateSheet {
    fn default() -> Self {
        Self::standard()
    }
}
