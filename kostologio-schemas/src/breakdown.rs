use crate::catalog::Group;
use serde::{Deserialize, Serialize};

/// Derived cost summary for one recalculation pass. Never stored; computed
/// fresh from the current state on every input change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub sum_areas: f64,
    pub sum_linear: f64,
    pub sum_volumes: f64,
    pub sum_pieces: f64,
    pub sum_workers: f64,
    pub sum_extras: f64,
    pub total_cost: f64,
    pub markup_percent: u32,
    pub sell_price: f64,
    pub gross_profit: f64,
    /// Gross profit as a percentage of sell price; 0 when sell price is 0.
    pub margin_percent: f64,
    /// Per-unit sell prices, `None` when the base measurement is 0.
    pub sell_per_m2: Option<f64>,
    pub sell_per_lm: Option<f64>,
    pub sell_per_m3: Option<f64>,
}

impl CostBreakdown {
    pub fn subtotal(&self, group: Group) -> f64 {
        match group {
            Group::Areas => self.sum_areas,
            Group::Linear => self.sum_linear,
            Group::Volumes => self.sum_volumes,
            Group::Pieces => self.sum_pieces,
            Group::Workers => self.sum_workers,
            Group::Extras => self.sum_extras,
        }
    }

    pub fn markup_zone(&self) -> MarkupZone {
        MarkupZone::classify(self.markup_percent)
    }
}

/// Informational markup classification shown next to the slider. A
/// presentation rule only; it never feeds back into the cost math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupZone {
    DangerouslyLow,
    Conservative,
    Balanced,
    Strong,
}

impl MarkupZone {
    pub fn classify(markup_percent: u32) -> MarkupZone {
        match markup_percent {
            0..=14 => MarkupZone::DangerouslyLow,
            15..=30 => MarkupZone::Conservative,
            31..=60 => MarkupZone::Balanced,
            _ => MarkupZone::Strong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarkupZone::DangerouslyLow => "Επικίνδυνα χαμηλό περιθώριο",
            MarkupZone::Conservative => "Συντηρητικό περιθώριο",
            MarkupZone::Balanced => "Ισορροπημένο περιθώριο",
            MarkupZone::Strong => "Ισχυρό περιθώριο",
        }
    }
}
