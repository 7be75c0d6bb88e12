use kostologio_schemas::breakdown::CostBreakdown;
use kostologio_schemas::catalog::{Catalog, Group};
use kostologio_schemas::extras::ExtraId;
use kostologio_schemas::page::PageConfig;
use kostologio_schemas::unit::Unit;

use crate::aggregate::{
    self, clamp_markup, extras_line_items, line_items_for_group, sum_costs, GroupSubtotals,
    LineItemCost,
};
use crate::error::KostologioError;
use crate::estimate::state::EstimateState;
use crate::extras::ExtrasList;

/// The per-page estimation engine: owns the quote state and recomputes the
/// full cost breakdown synchronously after every mutation. `recalc` is pure
/// over the current state; calling it twice without a mutation in between
/// yields an identical breakdown.
#[derive(Debug)]
pub struct EstimateEngine {
    state: EstimateState,
}

impl EstimateEngine {
    pub(crate) fn from_state(state: EstimateState) -> Self {
        EstimateEngine { state }
    }

    pub fn state(&self) -> &EstimateState {
        &self.state
    }

    pub fn page(&self) -> &PageConfig {
        &self.state.page
    }

    pub fn catalog(&self) -> &Catalog {
        &self.state.catalog
    }

    // ----- base measurements -----

    pub fn set_area(&mut self, m2: f64) {
        self.state.measurements.set_area(m2);
    }

    pub fn set_linear_length(&mut self, lm: f64) {
        self.state.measurements.set_linear_length(lm);
    }

    pub fn set_volume(&mut self, m3: f64) {
        self.state.measurements.set_volume(m3);
    }

    pub fn set_worker_days(&mut self, key: &str, days: f64) {
        self.state.measurements.set_worker_days(key, days);
    }

    pub fn set_piece_count(&mut self, key: &str, count: f64) {
        self.state.measurements.set_piece_count(key, count);
    }

    /// Raw slider input; clamped to the page bounds and rounded.
    pub fn set_markup(&mut self, markup_percent: f64) {
        self.state.markup_percent = clamp_markup(markup_percent, &self.state.page);
    }

    // ----- extras -----

    pub fn add_extra(&mut self) -> ExtraId {
        self.state.extras.add(&self.state.page)
    }

    pub fn remove_extra(&mut self, id: ExtraId) {
        self.state.extras.remove(id);
    }

    pub fn set_extra_description(&mut self, id: ExtraId, text: &str) -> Result<(), KostologioError> {
        self.state.extras.set_description(id, text)
    }

    pub fn set_extra_price(&mut self, id: ExtraId, price: f64) -> Result<(), KostologioError> {
        self.state.extras.set_price(id, price)
    }

    pub fn set_extra_quantity(&mut self, id: ExtraId, quantity: f64) -> Result<(), KostologioError> {
        self.state.extras.set_quantity(id, quantity)
    }

    pub fn set_extra_unit(&mut self, id: ExtraId, unit: Unit) -> Result<(), KostologioError> {
        self.state.extras.set_unit(id, unit, &self.state.page)
    }

    pub fn set_extra_auto(&mut self, id: ExtraId, auto: bool) -> Result<(), KostologioError> {
        self.state.extras.set_auto(id, auto, &self.state.page)
    }

    /// Ids of extras whose resolved quantity is currently ≤ 0. A UI hint
    /// only; flagged rows still contribute their (zero) cost.
    pub fn extras_needing_attention(&self) -> Vec<ExtraId> {
        self.state
            .extras
            .items()
            .iter()
            .filter(|ex| ExtrasList::needs_attention(ex, &self.state.page, &self.state.measurements))
            .map(|ex| ex.id)
            .collect()
    }

    // ----- catalog reconciliation -----

    /// Applies a price persisted by the external price API to the local
    /// catalog snapshot, in every group carrying the key. Runs only on a
    /// successful save round-trip; a failed save leaves the snapshot
    /// untouched. An extra backed by the key keeps its own edited price.
    pub fn apply_saved_price(&mut self, key: &str, latest_price: f64) -> Result<(), KostologioError> {
        if !self.state.catalog.set_price(key, latest_price) {
            return Err(KostologioError::ItemNotFound(key.to_string()));
        }
        Ok(())
    }

    // ----- computation -----

    /// Costed lines for one of the page's groups, in catalog order.
    pub fn line_items(&self, group: Group) -> Vec<LineItemCost> {
        if group == Group::Extras {
            extras_line_items(&self.state.extras, &self.state.page, &self.state.measurements)
        } else {
            line_items_for_group(
                group,
                self.state.catalog.group(group),
                &self.state.measurements,
            )
        }
    }

    /// Recomputes the full breakdown from the current state. Synchronous
    /// and side-effect free.
    pub fn recalc(&self) -> CostBreakdown {
        let mut subtotals = GroupSubtotals::default();
        for group in &self.state.page.groups {
            subtotals.set(*group, sum_costs(&self.line_items(*group)));
        }
        aggregate::aggregate(&subtotals, self.state.markup_percent, &self.state.measurements)
    }
}
