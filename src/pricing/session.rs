//! Pricing state machine
//!
//! Owns the ledger, the configuration, the pricing-time snapshot, and the
//! module selection for one operator session. Single-threaded and
//! re-entrant only through explicit calls; there is no background
//! recomputation loop.
//!
//! Pricing here is a pure local computation. The two-phase
//! `begin_pricing` / `complete_pricing` split exists so a second pricing
//! request while one is open is refused at this boundary, and so a real
//! rate-search call has a seam to slot into later.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::benefits::{
    recompute_modules, AdjustableParams, BenefitId, BenefitModule, SelectionSet,
};
use crate::calc::{clamp_target_ltv, LoanQuote};
use crate::config::{LoanConfiguration, LoanProgram, LoanTerm};
use crate::ledger::{clamp_amount, DebtAccount, DebtLedger};
use crate::proposal::ProposalPayload;
use crate::rates::RateSheet;

use super::diff::SnapshotDiff;
use super::snapshot::PricingSnapshot;

/// Default closing-cost basis before any rate-offer points
pub const DEFAULT_CLOSING_COSTS: f64 = 8_000.0;

/// Name of the machine's current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingState {
    /// Initial; no quote exists yet
    Setup,
    /// Quote computed, snapshot captured
    Priced,
    /// Priced with at least one module selected
    ProposalReady,
}

/// One operator session of the consolidation pricing engine
#[derive(Debug, Clone)]
pub struct PricingSession {
    ledger: DebtLedger,
    config: LoanConfiguration,
    rate_sheet: RateSheet,
    selected_offer: Option<usize>,
    base_closing_costs: f64,

    snapshot: Option<PricingSnapshot>,
    stale: bool,
    in_flight: bool,
    first_priced: bool,

    selection: SelectionSet,
    params: AdjustableParams,
}

impl PricingSession {
    /// Start a session, seeding configuration defaults from the ledger's
    /// primary mortgage and the rate sheet's par rate
    pub fn new(ledger: DebtLedger, property_value: f64) -> Self {
        let rate_sheet = RateSheet::standard();
        let config = LoanConfiguration::seeded_from(&ledger, property_value, rate_sheet.par_rate());
        Self::with_config(ledger, config)
    }

    /// Start a session with an explicit configuration
    pub fn with_config(ledger: DebtLedger, config: LoanConfiguration) -> Self {
        Self {
            ledger,
            config,
            rate_sheet: RateSheet::standard(),
            selected_offer: None,
            base_closing_costs: DEFAULT_CLOSING_COSTS,
            snapshot: None,
            stale: false,
            in_flight: false,
            first_priced: false,
            selection: SelectionSet::new(),
            params: AdjustableParams::default(),
        }
    }

    // --- read-only views -------------------------------------------------

    pub fn ledger(&self) -> &DebtLedger {
        &self.ledger
    }

    pub fn config(&self) -> &LoanConfiguration {
        &self.config
    }

    pub fn rate_sheet(&self) -> &RateSheet {
        &self.rate_sheet
    }

    pub fn selected_offer(&self) -> Option<usize> {
        self.selected_offer
    }

    pub fn snapshot(&self) -> Option<&PricingSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn adjustable_params(&self) -> &AdjustableParams {
        &self.params
    }

    /// Current state name, derived rather than stored: ProposalReady is
    /// purely "Priced with a non-empty selection"
    pub fn state(&self) -> PricingState {
        if self.snapshot.is_none() {
            PricingState::Setup
        } else if self.selection.is_empty() {
            PricingState::Priced
        } else {
            PricingState::ProposalReady
        }
    }

    /// Whether inputs have changed since the last pricing run
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn is_pricing_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Closing-cost basis for break-even: the base costs plus the signed
    /// point cost of the selected rate offer on the current loan amount
    pub fn closing_cost_basis(&self) -> f64 {
        let points = self
            .selected_offer
            .and_then(|i| self.rate_sheet.get(i))
            .map(|offer| {
                let loan = LoanQuote::derive(&self.ledger, &self.config).gross_loan_amount;
                offer.point_cost(loan)
            })
            .unwrap_or(0.0);
        (self.base_closing_costs + points).max(0.0)
    }

    /// The current quote, recomputed from live inputs on every read.
    /// None until the first pricing run; while stale, this is the live
    /// re-derivation and `is_stale` tells the caller the displayed figures
    /// are no longer authoritative.
    pub fn quote(&self) -> Option<LoanQuote> {
        self.snapshot.as_ref()?;
        Some(LoanQuote::derive(&self.ledger, &self.config))
    }

    /// Diff of the pricing-time snapshot against the live ledger
    pub fn diff(&self) -> Option<SnapshotDiff> {
        self.snapshot
            .as_ref()
            .map(|snapshot| SnapshotDiff::compute(snapshot, &self.ledger))
    }

    /// Ranked benefit modules for the current quote, with selection state
    /// applied; empty before the first pricing run
    pub fn modules(&self) -> Vec<BenefitModule> {
        let Some(quote) = self.quote() else {
            return Vec::new();
        };
        let mut modules = recompute_modules(
            &quote,
            &self.ledger,
            &self.config,
            self.closing_cost_basis(),
            &self.params,
        );
        self.selection.apply(&mut modules);
        modules
    }

    /// Proposal payload; None until at least one module is selected
    pub fn proposal(&self) -> Option<ProposalPayload> {
        if self.state() != PricingState::ProposalReady {
            return None;
        }
        let quote = self.quote()?;
        let modules = self.modules();
        let selected: Vec<&BenefitModule> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| modules.iter().find(|m| m.id == *id))
            .collect();

        Some(ProposalPayload::assemble(
            &quote,
            &self.config,
            self.closing_cost_basis(),
            self.ledger.included().count(),
            &selected,
        ))
    }

    // --- pricing transitions ---------------------------------------------

    /// Open a pricing run. Returns false and does nothing when a run is
    /// already open; the machine refuses concurrent pricing requests.
    pub fn begin_pricing(&mut self) -> bool {
        if self.in_flight {
            debug!("pricing request ignored: a run is already in flight");
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Close the open pricing run: capture a fresh snapshot, clear the
    /// stale flag, and seed the default selection on the first run only.
    /// A call without an open run is ignored.
    pub fn complete_pricing(&mut self) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;
        self.snapshot = Some(PricingSnapshot::capture(&self.ledger, &self.config));
        self.stale = false;

        if !self.first_priced {
            self.first_priced = true;
            self.selection.select(BenefitId::DebtConsolidation);
            self.selection.select(BenefitId::PaymentSavings);
            debug!("seeded default module selection");
        }

        info!(
            "priced: payoff ${:.0}, state {:?}",
            self.ledger.payoff_total(),
            self.state()
        );
    }

    /// One-shot pricing run; false when refused because a run is open
    pub fn run_pricing(&mut self) -> bool {
        if !self.begin_pricing() {
            return false;
        }
        self.complete_pricing();
        true
    }

    /// Full reset back to Setup: discards the snapshot and all module
    /// selections; the next pricing run re-seeds defaults
    pub fn reset(&mut self) {
        self.snapshot = None;
        self.selection.clear();
        self.stale = false;
        self.in_flight = false;
        self.first_priced = false;
        info!("session reset to setup");
    }

    // --- ledger mutation --------------------------------------------------

    /// Toggle an account's payoff inclusion; marks the quote stale
    pub fn toggle_account(&mut self, id: u32) -> Option<bool> {
        let included = self.ledger.toggle_include(id)?;
        self.mark_stale();
        Some(included)
    }

    /// Edit an account balance; marks stale when the account is included
    pub fn set_account_balance(&mut self, id: u32, balance: f64) -> bool {
        let Some(account) = self.ledger.get_mut(id) else {
            return false;
        };
        account.set_balance(balance);
        if account.include_in_payoff {
            self.mark_stale();
        }
        true
    }

    /// Edit an account payment; marks stale when the account is included
    pub fn set_account_payment(&mut self, id: u32, payment: f64) -> bool {
        let Some(account) = self.ledger.get_mut(id) else {
            return false;
        };
        account.set_payment(payment);
        if account.include_in_payoff {
            self.mark_stale();
        }
        true
    }

    /// Add an account; marks stale when it joins the included set
    pub fn add_account(&mut self, account: DebtAccount) -> bool {
        let included = account.include_in_payoff;
        let added = self.ledger.add(account);
        if added && included {
            self.mark_stale();
        }
        added
    }

    /// Remove an account; marks stale when it was included
    pub fn remove_account(&mut self, id: u32) -> Option<DebtAccount> {
        let removed = self.ledger.remove(id)?;
        if removed.include_in_payoff {
            self.mark_stale();
        }
        Some(removed)
    }

    // --- configuration mutation -------------------------------------------

    pub fn set_program(&mut self, program: LoanProgram) {
        self.config.program = program;
        self.mark_stale();
    }

    pub fn set_term(&mut self, term: LoanTerm) {
        self.config.term = term;
        self.mark_stale();
    }

    pub fn set_property_value(&mut self, value: f64) {
        self.config.property_value = clamp_amount(value);
        self.mark_stale();
    }

    pub fn set_interest_rate(&mut self, rate: f64) {
        self.config.interest_rate = rate.max(0.0);
        self.selected_offer = None;
        self.mark_stale();
    }

    pub fn set_include_escrow(&mut self, include: bool) {
        self.config.include_escrow = include;
        self.mark_stale();
    }

    /// Pin cashout to a dollar amount (None returns control to the slider)
    pub fn set_cashout_override(&mut self, cashout: Option<f64>) {
        self.config.cashout_override = cashout.map(|c| c.max(0.0));
        self.mark_stale();
    }

    /// Move the LTV slider; the position clamps to the payoff floor and
    /// the program band rather than rejecting
    pub fn set_target_ltv(&mut self, target: f64) {
        self.config.target_ltv = clamp_target_ltv(
            target,
            self.ledger.payoff_total(),
            self.config.property_value,
            self.config.program,
        );
        self.config.cashout_override = None;
        self.mark_stale();
    }

    /// Select a rate offer from the sheet. Substitutes its rate and point
    /// cost without marking the quote stale: the offer changes price, not
    /// eligibility, and payment/break-even figures recompute on read.
    pub fn select_rate_offer(&mut self, index: usize) -> bool {
        let Some(offer) = self.rate_sheet.get(index) else {
            return false;
        };
        self.config.interest_rate = offer.rate;
        self.selected_offer = Some(index);
        debug!("rate offer selected: {}", offer.label);
        true
    }

    pub fn set_base_closing_costs(&mut self, costs: f64) {
        self.base_closing_costs = clamp_amount(costs);
    }

    // --- module selection and display knobs --------------------------------

    /// Toggle a module's proposal selection. Selecting past the cap of 2
    /// is a silent no-op (returns false, set unchanged). Ignored in Setup.
    pub fn toggle_module(&mut self, id: BenefitId) -> bool {
        if self.snapshot.is_none() {
            return false;
        }
        self.selection.toggle(id)
    }

    pub fn selected_module_count(&self) -> usize {
        self.selection.count()
    }

    /// Display-only knobs; never affects staleness or ranking
    pub fn set_adjustable_params(&mut self, params: AdjustableParams) {
        self.params = params;
    }

    fn mark_stale(&mut self) {
        if self.snapshot.is_some() && !self.stale {
            self.stale = true;
            debug!("inputs changed after pricing; quote marked stale");
        }
    }
}
