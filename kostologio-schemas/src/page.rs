use crate::catalog::Group;
use crate::unit::Unit;
use serde::{Deserialize, Serialize};

/// Static configuration of one calculator page: which catalog groups it
/// carries, which units an extra can auto-derive from, and the markup
/// bounds of its slider. The four built-in trades only differ by this
/// configuration; the engine itself is shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub key: String,
    pub title: String,
    pub groups: Vec<Group>,
    pub auto_units: Vec<Unit>,
    pub markup_min: u32,
    pub markup_max: u32,
    /// Whether extras seeded from the catalog start with automatic
    /// quantity. The painting page seeds manual extras.
    pub seed_auto_quantity: bool,
}

impl PageConfig {
    /// Tiling (plakakia): area- and volume-driven materials plus crew.
    pub fn tiling() -> Self {
        PageConfig {
            key: "plakakia".to_string(),
            title: "Πλακάκια".to_string(),
            groups: vec![Group::Areas, Group::Volumes, Group::Workers, Group::Extras],
            auto_units: vec![Unit::SquareMeter, Unit::CubicMeter, Unit::Day],
            markup_min: 0,
            markup_max: 100,
            seed_auto_quantity: true,
        }
    }

    /// Drywall (gypsosanida): area/linear materials, manually counted
    /// sheets and profiles, crew.
    pub fn drywall() -> Self {
        PageConfig {
            key: "gypsosanida".to_string(),
            title: "Γυψοσανίδα".to_string(),
            groups: vec![
                Group::Areas,
                Group::Linear,
                Group::Pieces,
                Group::Workers,
                Group::Extras,
            ],
            auto_units: vec![Unit::SquareMeter, Unit::LinearMeter, Unit::Day],
            markup_min: 0,
            markup_max: 100,
            seed_auto_quantity: true,
        }
    }

    /// Thermal-facade insulation (thermoprosopsi).
    pub fn facade() -> Self {
        PageConfig {
            key: "thermoprosopsi".to_string(),
            title: "Θερμοπρόσοψη".to_string(),
            groups: vec![Group::Areas, Group::Linear, Group::Workers, Group::Extras],
            auto_units: vec![Unit::SquareMeter, Unit::LinearMeter, Unit::Day],
            markup_min: 0,
            markup_max: 100,
            seed_auto_quantity: true,
        }
    }

    /// Painting (elaioxromatismoi): crew-only catalog; materials are
    /// entered as extras, seeded manual.
    pub fn painting() -> Self {
        PageConfig {
            key: "elaioxromatismoi".to_string(),
            title: "Ελαιοχρωματισμοί".to_string(),
            groups: vec![Group::Workers, Group::Extras],
            auto_units: vec![Unit::SquareMeter, Unit::Day],
            markup_min: 0,
            markup_max: 100,
            seed_auto_quantity: false,
        }
    }

    pub fn all() -> Vec<PageConfig> {
        vec![
            PageConfig::tiling(),
            PageConfig::drywall(),
            PageConfig::facade(),
            PageConfig::painting(),
        ]
    }

    pub fn by_key(key: &str) -> Option<PageConfig> {
        PageConfig::all().into_iter().find(|p| p.key == key)
    }

    pub fn has_group(&self, group: Group) -> bool {
        self.groups.contains(&group)
    }

    /// Whether an extra with this unit can derive its quantity from the
    /// page's base measurements.
    pub fn is_auto_capable(&self, unit: Unit) -> bool {
        self.auto_units.contains(&unit)
    }
}
