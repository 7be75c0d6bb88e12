use kostologio_schemas::catalog::CatalogItem;
use kostologio_schemas::extras::{ExtraId, ExtraLineItem};
use kostologio_schemas::measurements::{sanitize, BaseMeasurements};
use kostologio_schemas::page::PageConfig;
use kostologio_schemas::unit::Unit;

use crate::error::KostologioError;

/// User-managed list of ad-hoc line items for one page.
///
/// Owns the id counter and enforces the auto-quantity invariant: an extra
/// may only auto-derive its quantity while its unit is in the page's
/// auto-capable set.
#[derive(Debug, Clone, Default)]
pub struct ExtrasList {
    items: Vec<ExtraLineItem>,
    next_id: ExtraId,
}

impl ExtrasList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ExtraLineItem] {
        &self.items
    }

    pub fn get(&self, id: ExtraId) -> Option<&ExtraLineItem> {
        self.items.iter().find(|ex| ex.id == id)
    }

    fn get_mut(&mut self, id: ExtraId) -> Result<&mut ExtraLineItem, KostologioError> {
        self.items
            .iter_mut()
            .find(|ex| ex.id == id)
            .ok_or(KostologioError::ExtraNotFound(id))
    }

    /// Adds a blank extra. New rows default to the piece unit, which is not
    /// auto-capable on any page, so they start in manual entry.
    pub fn add(&mut self, page: &PageConfig) -> ExtraId {
        self.push(String::new(), Unit::Piece, 0.0, true, None, page)
    }

    /// Seeds an extra from a catalog entry at page init. Whether it starts
    /// automatic is page policy; a non-capable unit forces manual anyway.
    pub fn add_seeded(&mut self, item: &CatalogItem, page: &PageConfig) -> ExtraId {
        self.push(
            item.name.clone(),
            item.unit,
            item.latest_price,
            page.seed_auto_quantity,
            Some(item.key.clone()),
            page,
        )
    }

    fn push(
        &mut self,
        description: String,
        unit: Unit,
        price: f64,
        auto_quantity: bool,
        source_key: Option<String>,
        page: &PageConfig,
    ) -> ExtraId {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(ExtraLineItem {
            id,
            description,
            unit,
            price,
            quantity: 0.0,
            auto_quantity: auto_quantity && page.is_auto_capable(unit),
            source_key,
        });
        id
    }

    /// Removes an extra by id. Unknown ids are ignored; removal has no
    /// cascade effects.
    pub fn remove(&mut self, id: ExtraId) {
        self.items.retain(|ex| ex.id != id);
    }

    pub fn set_description(&mut self, id: ExtraId, description: &str) -> Result<(), KostologioError> {
        self.get_mut(id)?.description = description.to_string();
        Ok(())
    }

    pub fn set_price(&mut self, id: ExtraId, price: f64) -> Result<(), KostologioError> {
        self.get_mut(id)?.price = sanitize(price);
        Ok(())
    }

    /// Manual quantity entry; only read while `auto_quantity` is false.
    pub fn set_quantity(&mut self, id: ExtraId, quantity: f64) -> Result<(), KostologioError> {
        self.get_mut(id)?.quantity = sanitize(quantity);
        Ok(())
    }

    /// Unit change transition: switching to an auto-capable unit enables
    /// automatic quantity by default; switching to anything else forces
    /// manual entry.
    pub fn set_unit(
        &mut self,
        id: ExtraId,
        unit: Unit,
        page: &PageConfig,
    ) -> Result<(), KostologioError> {
        let can_auto = page.is_auto_capable(unit);
        let ex = self.get_mut(id)?;
        ex.unit = unit;
        ex.auto_quantity = can_auto;
        Ok(())
    }

    /// Auto-checkbox transition: enabling auto on a non-capable unit is
    /// rejected and the flag stays false.
    pub fn set_auto(
        &mut self,
        id: ExtraId,
        auto: bool,
        page: &PageConfig,
    ) -> Result<(), KostologioError> {
        let ex = self.get_mut(id)?;
        ex.auto_quantity = auto && page.is_auto_capable(ex.unit);
        Ok(())
    }

    /// Quantity an auto extra derives from the current measurements.
    pub fn auto_quantity_value(unit: Unit, measurements: &BaseMeasurements) -> f64 {
        match unit {
            Unit::SquareMeter => measurements.area,
            Unit::LinearMeter => measurements.linear_length,
            Unit::CubicMeter => measurements.volume,
            Unit::Day => measurements.total_worker_days(),
            _ => 0.0,
        }
    }

    /// Effective quantity of one extra under the current measurements.
    pub fn resolved_quantity(
        ex: &ExtraLineItem,
        page: &PageConfig,
        measurements: &BaseMeasurements,
    ) -> f64 {
        if ex.auto_quantity && page.is_auto_capable(ex.unit) {
            Self::auto_quantity_value(ex.unit, measurements)
        } else {
            ex.quantity
        }
    }

    /// UI hint: a resolved quantity ≤ 0 flags the row for attention. It is
    /// not an error and does not exclude the row from the sum.
    pub fn needs_attention(
        ex: &ExtraLineItem,
        page: &PageConfig,
        measurements: &BaseMeasurements,
    ) -> bool {
        Self::resolved_quantity(ex, page, measurements) <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_item(key: &str, unit: Unit, price: f64) -> CatalogItem {
        CatalogItem {
            key: key.to_string(),
            name: key.to_string(),
            unit,
            consumption: None,
            latest_price: price,
        }
    }

    #[test]
    fn new_rows_start_manual_on_piece_unit() {
        let page = PageConfig::tiling();
        let mut extras = ExtrasList::new();
        let id = extras.add(&page);
        let ex = extras.get(id).unwrap();
        assert_eq!(ex.unit, Unit::Piece);
        assert!(!ex.auto_quantity);
    }

    #[test]
    fn unit_change_enables_auto_on_capable_units() {
        let page = PageConfig::tiling();
        let mut extras = ExtrasList::new();
        let id = extras.add(&page);

        extras.set_unit(id, Unit::SquareMeter, &page).unwrap();
        assert!(extras.get(id).unwrap().auto_quantity);

        // lm has no automatic source on the tiling page
        extras.set_unit(id, Unit::LinearMeter, &page).unwrap();
        assert!(!extras.get(id).unwrap().auto_quantity);
    }

    #[test]
    fn auto_toggle_rejected_for_non_capable_unit() {
        let page = PageConfig::tiling();
        let mut extras = ExtrasList::new();
        let id = extras.add(&page);

        extras.set_auto(id, true, &page).unwrap();
        assert!(!extras.get(id).unwrap().auto_quantity);

        extras.set_unit(id, Unit::Day, &page).unwrap();
        extras.set_auto(id, false, &page).unwrap();
        assert!(!extras.get(id).unwrap().auto_quantity);
        extras.set_auto(id, true, &page).unwrap();
        assert!(extras.get(id).unwrap().auto_quantity);
    }

    #[test]
    fn auto_quantity_tracks_measurements() {
        let page = PageConfig::tiling();
        let mut extras = ExtrasList::new();
        let id = extras.add(&page);
        extras.set_unit(id, Unit::SquareMeter, &page).unwrap();

        let mut m = BaseMeasurements::default();
        m.set_area(10.0);
        let ex = extras.get(id).unwrap();
        assert_eq!(ExtrasList::resolved_quantity(ex, &page, &m), 10.0);

        m.set_area(25.0);
        assert_eq!(ExtrasList::resolved_quantity(ex, &page, &m), 25.0);
    }

    #[test]
    fn day_unit_sums_all_worker_days() {
        let page = PageConfig::facade();
        let mut extras = ExtrasList::new();
        let id = extras.add(&page);
        extras.set_unit(id, Unit::Day, &page).unwrap();

        let mut m = BaseMeasurements::default();
        m.set_worker_days("technitis", 2.0);
        m.set_worker_days("voithos", 1.5);
        let ex = extras.get(id).unwrap();
        assert_eq!(ExtrasList::resolved_quantity(ex, &page, &m), 3.5);
    }

    #[test]
    fn seeded_auto_policy_follows_the_page() {
        let mut extras = ExtrasList::new();
        let bucket = catalog_item("extra_kados", Unit::Piece, 120.0);
        let lining = catalog_item("extra_fatoura", Unit::SquareMeter, 0.0);

        let tiling = PageConfig::tiling();
        let id = extras.add_seeded(&lining, &tiling);
        assert!(extras.get(id).unwrap().auto_quantity);
        // Piece unit cannot auto-derive even where seeding defaults to auto.
        let id = extras.add_seeded(&bucket, &tiling);
        assert!(!extras.get(id).unwrap().auto_quantity);
        assert_eq!(extras.get(id).unwrap().price, 120.0);

        let painting = PageConfig::painting();
        let id = extras.add_seeded(&lining, &painting);
        assert!(!extras.get(id).unwrap().auto_quantity);
    }

    #[test]
    fn needs_attention_flags_zero_quantity() {
        let page = PageConfig::tiling();
        let mut extras = ExtrasList::new();
        let id = extras.add(&page);
        let m = BaseMeasurements::default();
        assert!(ExtrasList::needs_attention(extras.get(id).unwrap(), &page, &m));
        extras.set_quantity(id, 2.0).unwrap();
        assert!(!ExtrasList::needs_attention(extras.get(id).unwrap(), &page, &m));
    }

    #[test]
    fn removal_is_by_id_with_no_cascade() {
        let page = PageConfig::tiling();
        let mut extras = ExtrasList::new();
        let a = extras.add(&page);
        let b = extras.add(&page);
        extras.remove(a);
        assert!(extras.get(a).is_none());
        assert!(extras.get(b).is_some());
        // unknown id is a no-op
        extras.remove(999);
        assert_eq!(extras.items().len(), 1);
    }
}
