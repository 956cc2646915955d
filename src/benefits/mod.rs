//! Benefit Ranking Engine: value propositions for the client proposal

pub mod catalog;
pub mod ranking;

pub use catalog::{
    AdjustableParams, BenefitId, BenefitModule, BASELINE_DEFERRAL_MONTHS,
    BASELINE_REINVESTMENT_RETURN, REINVESTMENT_HORIZON_MONTHS,
};
pub use ranking::recompute_modules;

use serde::{Deserialize, Serialize};

/// Maximum number of modules that may be selected for a proposal
pub const SELECTION_CAP: usize = 2;

/// The proposal selection set, bounded by [`SELECTION_CAP`]
///
/// Selection is independent of ranking and survives module recomputation;
/// only a full pricing reset clears it. Exceeding the cap is a deliberate
/// soft limit: the attempt is ignored, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    selected: Vec<BenefitId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a module. Returns false (leaving the set unchanged) when the
    /// cap is already reached or the module is already selected.
    pub fn select(&mut self, id: BenefitId) -> bool {
        if self.selected.contains(&id) || self.selected.len() >= SELECTION_CAP {
            return false;
        }
        self.selected.push(id);
        true
    }

    /// Deselect a module; false when it was not selected
    pub fn deselect(&mut self, id: BenefitId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| *s != id);
        self.selected.len() != before
    }

    /// Toggle a module's selection; a select attempt at the cap is a no-op
    pub fn toggle(&mut self, id: BenefitId) -> bool {
        if self.is_selected(id) {
            self.deselect(id)
        } else {
            self.select(id)
        }
    }

    pub fn is_selected(&self, id: BenefitId) -> bool {
        self.selected.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in selection order
    pub fn ids(&self) -> &[BenefitId] {
        &self.selected
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Stamp selection state onto a freshly recomputed module list
    pub fn apply(&self, modules: &mut [BenefitModule]) {
        for module in modules {
            module.selected = self.is_selected(module.id);
        }
    }
}
