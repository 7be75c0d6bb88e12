use kostologio_schemas::breakdown::CostBreakdown;
use kostologio_schemas::catalog::{CatalogItem, Group};
use kostologio_schemas::measurements::BaseMeasurements;
use kostologio_schemas::page::PageConfig;
use kostologio_schemas::unit::Unit;

use crate::consumption::{derive_quantity, parse_consumption};
use crate::extras::ExtrasList;

/// One costed line of the quote: a catalog item or an extra with its
/// derived quantity and cost.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemCost {
    pub key: String,
    pub name: String,
    pub unit: Unit,
    pub quantity: f64,
    /// True when the quantity was ceiled (piece-like consumption result or
    /// a manually counted piece item).
    pub rounded: bool,
    pub unit_price: f64,
    pub cost: f64,
}

/// Per-group cost subtotals fed into [`aggregate`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupSubtotals {
    pub areas: f64,
    pub linear: f64,
    pub volumes: f64,
    pub pieces: f64,
    pub workers: f64,
    pub extras: f64,
}

impl GroupSubtotals {
    pub fn set(&mut self, group: Group, value: f64) {
        match group {
            Group::Areas => self.areas = value,
            Group::Linear => self.linear = value,
            Group::Volumes => self.volumes = value,
            Group::Pieces => self.pieces = value,
            Group::Workers => self.workers = value,
            Group::Extras => self.extras = value,
        }
    }

    pub fn total(&self) -> f64 {
        self.areas + self.linear + self.volumes + self.pieces + self.workers + self.extras
    }
}

/// Clamps a raw markup input to the page's slider bounds and rounds it to
/// the nearest whole percent. Non-numeric input falls back to 0 before
/// clamping; nothing is ever rejected.
pub fn clamp_markup(raw: f64, page: &PageConfig) -> u32 {
    let raw = if raw.is_finite() { raw } else { 0.0 };
    raw.clamp(page.markup_min as f64, page.markup_max as f64)
        .round() as u32
}

/// Costs every item of one catalog group against the current measurements.
///
/// The group selects the driving base: areas → m², linear → lm,
/// volumes → m³, pieces → the item's own ceiled manual count,
/// workers → that worker's days. Consumption rates apply to the area,
/// linear and volume groups; workers and pieces are costed directly.
pub fn line_items_for_group(
    group: Group,
    items: &[CatalogItem],
    measurements: &BaseMeasurements,
) -> Vec<LineItemCost> {
    items
        .iter()
        .map(|item| {
            let (quantity, unit, rounded) = match group {
                Group::Pieces => (measurements.piece_count(&item.key), item.unit, true),
                Group::Workers => (measurements.worker_days(&item.key), item.unit, false),
                _ => {
                    let base = match group {
                        Group::Areas => measurements.area,
                        Group::Linear => measurements.linear_length,
                        Group::Volumes => measurements.volume,
                        // Extras never route through here.
                        _ => 0.0,
                    };
                    let rate = item
                        .consumption
                        .as_deref()
                        .and_then(parse_consumption);
                    let derived = derive_quantity(rate.as_ref(), base);
                    (
                        derived.quantity,
                        derived.unit.unwrap_or(item.unit),
                        derived.rounded,
                    )
                }
            };
            LineItemCost {
                key: item.key.clone(),
                name: item.name.clone(),
                unit,
                quantity,
                rounded,
                unit_price: item.latest_price,
                cost: item.latest_price * quantity,
            }
        })
        .collect()
}

/// Costs the extras list against the current measurements.
pub fn extras_line_items(
    extras: &ExtrasList,
    page: &PageConfig,
    measurements: &BaseMeasurements,
) -> Vec<LineItemCost> {
    extras
        .items()
        .iter()
        .map(|ex| {
            let quantity = ExtrasList::resolved_quantity(ex, page, measurements);
            LineItemCost {
                key: ex.source_key.clone().unwrap_or_else(|| format!("extra_{}", ex.id)),
                name: ex.description.clone(),
                unit: ex.unit,
                quantity,
                rounded: false,
                unit_price: ex.price,
                cost: ex.price * quantity,
            }
        })
        .collect()
}

pub fn sum_costs(items: &[LineItemCost]) -> f64 {
    items.iter().map(|it| it.cost).sum()
}

/// Folds group subtotals into the full breakdown: markup-adjusted sell
/// price, gross profit, margin, and zero-guarded per-unit sell prices.
pub fn aggregate(
    subtotals: &GroupSubtotals,
    markup_percent: u32,
    measurements: &BaseMeasurements,
) -> CostBreakdown {
    let total_cost = subtotals.total();
    let sell_price = total_cost * (1.0 + markup_percent as f64 / 100.0);
    let gross_profit = sell_price - total_cost;
    let margin_percent = if sell_price > 0.0 {
        gross_profit / sell_price * 100.0
    } else {
        0.0
    };
    let per_unit = |measurement: f64| {
        if measurement > 0.0 {
            Some(sell_price / measurement)
        } else {
            None
        }
    };
    CostBreakdown {
        sum_areas: subtotals.areas,
        sum_linear: subtotals.linear,
        sum_volumes: subtotals.volumes,
        sum_pieces: subtotals.pieces,
        sum_workers: subtotals.workers,
        sum_extras: subtotals.extras,
        total_cost,
        markup_percent,
        sell_price,
        gross_profit,
        margin_percent,
        sell_per_m2: per_unit(measurements.area),
        sell_per_lm: per_unit(measurements.linear_length),
        sell_per_m3: per_unit(measurements.volume),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str, unit: Unit, price: f64, consumption: Option<&str>) -> CatalogItem {
        CatalogItem {
            key: key.to_string(),
            name: key.to_string(),
            unit,
            consumption: consumption.map(str::to_string),
            latest_price: price,
        }
    }

    #[test]
    fn markup_clamp_and_round() {
        let page = PageConfig::tiling();
        assert_eq!(clamp_markup(20.0, &page), 20);
        assert_eq!(clamp_markup(20.4, &page), 20);
        assert_eq!(clamp_markup(20.6, &page), 21);
        assert_eq!(clamp_markup(-5.0, &page), 0);
        assert_eq!(clamp_markup(250.0, &page), 100);
        assert_eq!(clamp_markup(f64::NAN, &page), 0);
    }

    #[test]
    fn area_item_without_rate_passes_area_through() {
        let mut m = BaseMeasurements::default();
        m.set_area(50.0);
        let items = vec![item("tile_labor", Unit::SquareMeter, 10.0, None)];
        let costed = line_items_for_group(Group::Areas, &items, &m);
        assert_eq!(costed[0].quantity, 50.0);
        assert_eq!(costed[0].cost, 500.0);
        assert_eq!(costed[0].unit, Unit::SquareMeter);
        assert!(!costed[0].rounded);
    }

    #[test]
    fn consumption_rate_drives_area_item_quantity() {
        let mut m = BaseMeasurements::default();
        m.set_area(10.0);
        let items = vec![item("glue", Unit::Kilogram, 0.8, Some("7 kg per 1 m2"))];
        let costed = line_items_for_group(Group::Areas, &items, &m);
        assert_eq!(costed[0].quantity, 70.0);
        assert!((costed[0].cost - 56.0).abs() < 1e-9);
    }

    #[test]
    fn unparseable_rate_falls_back_to_passthrough() {
        let mut m = BaseMeasurements::default();
        m.set_linear_length(12.0);
        let items = vec![item("profile", Unit::LinearMeter, 2.0, Some("about 3 per meter"))];
        let costed = line_items_for_group(Group::Linear, &items, &m);
        assert_eq!(costed[0].quantity, 12.0);
        assert_eq!(costed[0].cost, 24.0);
    }

    #[test]
    fn linear_piece_rate_is_ceiled() {
        let mut m = BaseMeasurements::default();
        m.set_linear_length(10.4);
        let items = vec![item("dowel", Unit::Piece, 0.5, Some("2 unit per 1 lm"))];
        let costed = line_items_for_group(Group::Linear, &items, &m);
        assert_eq!(costed[0].quantity, 21.0);
        assert!(costed[0].rounded);
        assert_eq!(costed[0].cost, 10.5);
    }

    #[test]
    fn manual_piece_counts_are_ceiled_before_costing() {
        let mut m = BaseMeasurements::default();
        m.set_piece_count("sheet_gyps", 11.2);
        let items = vec![item("sheet_gyps", Unit::Sheet, 6.0, None)];
        let costed = line_items_for_group(Group::Pieces, &items, &m);
        assert_eq!(costed[0].quantity, 12.0);
        assert_eq!(costed[0].cost, 72.0);
    }

    #[test]
    fn worker_days_multiply_unrounded() {
        let mut m = BaseMeasurements::default();
        m.set_worker_days("technitis", 2.5);
        let items = vec![item("technitis", Unit::Day, 90.0, None)];
        let costed = line_items_for_group(Group::Workers, &items, &m);
        assert_eq!(costed[0].quantity, 2.5);
        assert_eq!(costed[0].cost, 225.0);
    }

    #[test]
    fn aggregate_markup_algebra() {
        let m = BaseMeasurements::default();
        for markup in [0u32, 14, 20, 50, 100] {
            let sub = GroupSubtotals {
                areas: 380.0,
                workers: 120.0,
                ..Default::default()
            };
            let b = aggregate(&sub, markup, &m);
            assert_eq!(b.total_cost, 500.0);
            let expected_sell = 500.0 * (1.0 + markup as f64 / 100.0);
            assert!((b.sell_price - expected_sell).abs() < 1e-9);
            assert!((b.gross_profit - (expected_sell - 500.0)).abs() < 1e-9);
            let expected_margin = (expected_sell - 500.0) / expected_sell * 100.0;
            assert!((b.margin_percent - expected_margin).abs() < 1e-9);
        }
    }

    #[test]
    fn margin_is_zero_when_sell_price_is_zero() {
        let m = BaseMeasurements::default();
        let b = aggregate(&GroupSubtotals::default(), 20, &m);
        assert_eq!(b.sell_price, 0.0);
        assert_eq!(b.margin_percent, 0.0);
    }

    #[test]
    fn quoted_scenario_fifty_m2_at_twenty_percent() {
        let mut m = BaseMeasurements::default();
        m.set_area(50.0);
        let sub = GroupSubtotals {
            areas: 500.0,
            ..Default::default()
        };
        let b = aggregate(&sub, 20, &m);
        assert_eq!(b.sell_price, 600.0);
        assert!((b.gross_profit - 100.0).abs() < 1e-9);
        assert!((b.margin_percent - 100.0 / 6.0).abs() < 1e-6);
        assert_eq!(b.sell_per_m2, Some(12.0));
    }

    #[test]
    fn per_unit_prices_unavailable_at_zero_measurement() {
        let m = BaseMeasurements::default();
        let sub = GroupSubtotals {
            extras: 100.0,
            ..Default::default()
        };
        let b = aggregate(&sub, 20, &m);
        assert_eq!(b.sell_per_m2, None);
        assert_eq!(b.sell_per_lm, None);
        assert_eq!(b.sell_per_m3, None);
        assert!(b.sell_price.is_finite());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let mut m = BaseMeasurements::default();
        m.set_area(33.3);
        m.set_volume(2.0);
        let sub = GroupSubtotals {
            areas: 123.45,
            volumes: 67.89,
            extras: 10.0,
            ..Default::default()
        };
        let first = aggregate(&sub, 35, &m);
        let second = aggregate(&sub, 35, &m);
        assert_eq!(first, second);
    }
}
