use anyhow::{Context, Result};
use kostologio_core::estimate::engine::EstimateEngine;
use kostologio_schemas::measurements::BaseMeasurements;
use kostologio_schemas::unit::Unit;
use serde::Deserialize;
use std::fs;

/// A quote request: the page to estimate, the measured quantities, and any
/// adjustments to the seeded extras or catalog prices.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub page: String,
    #[serde(default = "default_markup")]
    pub markup_percent: f64,
    #[serde(default)]
    pub measurements: BaseMeasurements,
    #[serde(default)]
    pub extras: Vec<ExtraEntry>,
    #[serde(default)]
    pub saved_prices: Vec<SavedPrice>,
}

fn default_markup() -> f64 {
    20.0
}

/// One extras row in the request. With a `source_key` it adjusts the
/// matching seeded extra; without one it is appended as a new row.
#[derive(Debug, Deserialize)]
pub struct ExtraEntry {
    #[serde(default)]
    pub source_key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub auto_quantity: Option<bool>,
}

/// A price already persisted by the external price API, to reconcile into
/// the local catalog snapshot.
#[derive(Debug, Deserialize)]
pub struct SavedPrice {
    pub key: String,
    pub latest_price: f64,
}

impl EstimateRequest {
    pub fn load(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read request file '{}'", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse request file '{}'", path))
    }

    /// Applies the request's extras adjustments and saved prices to a
    /// freshly built engine. Measurements and markup are applied at build
    /// time by the caller.
    pub fn apply_extras(&self, engine: &mut EstimateEngine) -> Result<()> {
        for entry in &self.extras {
            let id = match entry
                .source_key
                .as_deref()
                .and_then(|key| seeded_extra_id(engine, key))
            {
                Some(id) => id,
                None => engine.add_extra(),
            };
            if let Some(unit) = entry.unit {
                engine.set_extra_unit(id, unit)?;
            }
            if let Some(text) = &entry.description {
                engine.set_extra_description(id, text)?;
            }
            if let Some(price) = entry.price {
                engine.set_extra_price(id, price)?;
            }
            if let Some(auto) = entry.auto_quantity {
                engine.set_extra_auto(id, auto)?;
            }
            if let Some(quantity) = entry.quantity {
                engine.set_extra_quantity(id, quantity)?;
            }
        }
        for saved in &self.saved_prices {
            engine
                .apply_saved_price(&saved.key, saved.latest_price)
                .with_context(|| format!("Saved price for unknown catalog key '{}'", saved.key))?;
        }
        Ok(())
    }
}

fn seeded_extra_id(engine: &EstimateEngine, key: &str) -> Option<u64> {
    engine
        .state()
        .extras
        .items()
        .iter()
        .find(|ex| ex.source_key.as_deref() == Some(key))
        .map(|ex| ex.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_request() {
        let yaml = r#"
page: gypsosanida
markup_percent: 35
measurements:
  area: 42.5
  linear_length: 18
  worker_days:
    technitis: 3
    voithos: 1.5
  piece_counts:
    sheet_gyps: 30.2
extras:
  - source_key: extra_kados
    price: 110
  - description: Μεταφορικά
    unit: unit
    price: 45
    quantity: 1
saved_prices:
  - key: sheet_gyps
    latest_price: 6.2
"#;
        let req: EstimateRequest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(req.page, "gypsosanida");
        assert_eq!(req.markup_percent, 35.0);
        assert_eq!(req.measurements.area, 42.5);
        assert_eq!(req.measurements.piece_counts["sheet_gyps"], 30.2);
        assert_eq!(req.extras.len(), 2);
        assert_eq!(req.extras[1].unit, Some(Unit::Piece));
        assert_eq!(req.saved_prices[0].latest_price, 6.2);
    }

    #[test]
    fn minimal_request_defaults_markup() {
        let req: EstimateRequest = serde_yaml::from_str("page: plakakia\n").unwrap();
        assert_eq!(req.markup_percent, 20.0);
        assert!(req.extras.is_empty());
        assert_eq!(req.measurements, BaseMeasurements::default());
    }
}
