use serde::{Deserialize, Serialize};

/// Measurement unit attached to a catalog or extra line item.
///
/// Wire names match the catalog files and the price API payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "m2")]
    SquareMeter,
    #[serde(rename = "m3")]
    CubicMeter,
    #[serde(rename = "lm")]
    LinearMeter,
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "unit", alias = "units", alias = "piece", alias = "pieces")]
    Piece,
    #[serde(rename = "sheet", alias = "sheets")]
    Sheet,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "bag", alias = "bags")]
    Bag,
}

impl Unit {
    /// Units counted in whole items; derived quantities are always ceiled.
    pub fn is_piece_like(self) -> bool {
        matches!(self, Unit::Piece | Unit::Sheet | Unit::Bag)
    }

    /// Parses a unit token as it appears in consumption strings and catalog
    /// files, accepting the localized synonyms used by the original catalogs.
    pub fn parse_token(token: &str) -> Option<Unit> {
        match token.to_lowercase().as_str() {
            "m2" => Some(Unit::SquareMeter),
            "m3" => Some(Unit::CubicMeter),
            "lm" => Some(Unit::LinearMeter),
            "day" => Some(Unit::Day),
            "unit" | "units" | "piece" | "pieces" | "τεμ" | "τεμ." | "τεμάχιο" | "τεμάχια" => {
                Some(Unit::Piece)
            }
            "sheet" | "sheets" => Some(Unit::Sheet),
            "kg" => Some(Unit::Kilogram),
            "bag" | "bags" | "σακί" | "σακιά" => Some(Unit::Bag),
            _ => None,
        }
    }

    /// Display label, localized the way the original pages rendered units.
    pub fn label(self) -> &'static str {
        match self {
            Unit::SquareMeter => "m²",
            Unit::CubicMeter => "m³",
            Unit::LinearMeter => "lm",
            Unit::Day => "ημέρα",
            Unit::Piece => "τεμ.",
            Unit::Sheet => "sheet",
            Unit::Kilogram => "kg",
            Unit::Bag => "σακί",
        }
    }

    /// Wire name as carried in catalog files.
    pub fn wire_name(self) -> &'static str {
        match self {
            Unit::SquareMeter => "m2",
            Unit::CubicMeter => "m3",
            Unit::LinearMeter => "lm",
            Unit::Day => "day",
            Unit::Piece => "unit",
            Unit::Sheet => "sheet",
            Unit::Kilogram => "kg",
            Unit::Bag => "bag",
        }
    }
}
