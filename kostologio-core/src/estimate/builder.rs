use kostologio_schemas::catalog::{Catalog, Group};
use kostologio_schemas::measurements::BaseMeasurements;
use kostologio_schemas::page::PageConfig;

use crate::aggregate::clamp_markup;
use crate::error::KostologioError;
use crate::estimate::engine::EstimateEngine;
use crate::estimate::state::EstimateState;
use crate::extras::ExtrasList;

/// A fluent builder for constructing an `EstimateEngine`.
///
/// Validates that the catalog carries every group the page declares and
/// seeds the extras list from the catalog's `extras` group the way the
/// pages did at load time.
#[derive(Default)]
pub struct EstimateBuilder {
    page: Option<PageConfig>,
    catalog: Option<Catalog>,
    measurements: BaseMeasurements,
    markup_percent: f64,
    seed_extras: bool,
}

impl EstimateBuilder {
    pub fn new() -> Self {
        EstimateBuilder {
            markup_percent: 20.0,
            seed_extras: true,
            ..Default::default()
        }
    }

    /// Sets the page configuration driving group selection and auto units.
    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the catalog snapshot fetched for this page.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the initial base measurements.
    pub fn with_measurements(mut self, measurements: BaseMeasurements) -> Self {
        self.measurements = measurements;
        self
    }

    /// Sets the initial markup; clamped to the page bounds at build time.
    pub fn with_markup(mut self, markup_percent: f64) -> Self {
        self.markup_percent = markup_percent;
        self
    }

    /// Disables seeding the extras list from the catalog's extras group.
    pub fn without_seeded_extras(mut self) -> Self {
        self.seed_extras = false;
        self
    }

    pub fn build(self) -> Result<EstimateEngine, KostologioError> {
        let page = self
            .page
            .ok_or_else(|| KostologioError::ConfigError("page configuration is missing".to_string()))?;
        let catalog = self
            .catalog
            .ok_or_else(|| KostologioError::CatalogNotLoaded(page.key.clone()))?;

        for group in &page.groups {
            // Extras may legitimately be empty; every other declared group
            // must carry at least one priced item.
            if *group != Group::Extras && catalog.group(*group).is_empty() {
                return Err(KostologioError::GroupMissing {
                    page: page.key.clone(),
                    group: group.name().to_string(),
                });
            }
        }

        let mut extras = ExtrasList::new();
        if self.seed_extras {
            for item in &catalog.extras {
                extras.add_seeded(item, &page);
            }
        }

        let markup_percent = clamp_markup(self.markup_percent, &page);
        Ok(EstimateEngine::from_state(EstimateState {
            page,
            catalog,
            measurements: self.measurements,
            markup_percent,
            extras,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kostologio_schemas::catalog::CatalogItem;
    use kostologio_schemas::unit::Unit;

    fn worker(key: &str, price: f64) -> CatalogItem {
        CatalogItem {
            key: key.to_string(),
            name: key.to_string(),
            unit: Unit::Day,
            consumption: None,
            latest_price: price,
        }
    }

    #[test]
    fn build_requires_declared_groups() {
        let err = EstimateBuilder::new()
            .with_page(PageConfig::painting())
            .with_catalog(Catalog::default())
            .build()
            .unwrap_err();
        assert!(matches!(err, KostologioError::GroupMissing { .. }));
    }

    #[test]
    fn build_seeds_extras_and_clamps_markup() {
        let mut catalog = Catalog::default();
        catalog.workers.push(worker("technitis", 90.0));
        catalog.extras.push(CatalogItem {
            key: "extra_kados".to_string(),
            name: "Κάδος".to_string(),
            unit: Unit::Piece,
            consumption: None,
            latest_price: 120.0,
        });
        let engine = EstimateBuilder::new()
            .with_page(PageConfig::painting())
            .with_catalog(catalog)
            .with_markup(140.0)
            .build()
            .unwrap();
        assert_eq!(engine.state().markup_percent, 100);
        assert_eq!(engine.state().extras.items().len(), 1);
        assert_eq!(engine.state().extras.items()[0].price, 120.0);
    }
}
