use crate::unit::Unit;
use serde::{Deserialize, Serialize};

/// Item group within a page's catalog. The group decides which base
/// measurement drives the item's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Areas,
    Linear,
    Volumes,
    Pieces,
    Workers,
    Extras,
}

impl Group {
    pub const ALL: [Group; 6] = [
        Group::Areas,
        Group::Linear,
        Group::Volumes,
        Group::Pieces,
        Group::Workers,
        Group::Extras,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Group::Areas => "areas",
            Group::Linear => "linear",
            Group::Volumes => "volumes",
            Group::Pieces => "pieces",
            Group::Workers => "workers",
            Group::Extras => "extras",
        }
    }
}

/// A priced line item sourced from the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub key: String,
    pub name: String,
    pub unit: Unit,
    /// Raw consumption description, e.g. "7 kg per 1 m2". Parsed lazily by
    /// the engine; an unparseable string means 1:1 passthrough.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumption: Option<String>,
    pub latest_price: f64,
}

/// Per-page catalog, grouped the way the external API serves it. Pages vary
/// in which groups they populate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub areas: Vec<CatalogItem>,
    #[serde(default)]
    pub linear: Vec<CatalogItem>,
    #[serde(default)]
    pub volumes: Vec<CatalogItem>,
    #[serde(default)]
    pub pieces: Vec<CatalogItem>,
    #[serde(default)]
    pub workers: Vec<CatalogItem>,
    #[serde(default)]
    pub extras: Vec<CatalogItem>,
}

impl Catalog {
    pub fn group(&self, group: Group) -> &[CatalogItem] {
        match group {
            Group::Areas => &self.areas,
            Group::Linear => &self.linear,
            Group::Volumes => &self.volumes,
            Group::Pieces => &self.pieces,
            Group::Workers => &self.workers,
            Group::Extras => &self.extras,
        }
    }

    fn group_mut(&mut self, group: Group) -> &mut Vec<CatalogItem> {
        match group {
            Group::Areas => &mut self.areas,
            Group::Linear => &mut self.linear,
            Group::Volumes => &mut self.volumes,
            Group::Pieces => &mut self.pieces,
            Group::Workers => &mut self.workers,
            Group::Extras => &mut self.extras,
        }
    }

    pub fn find(&self, key: &str) -> Option<&CatalogItem> {
        Group::ALL
            .iter()
            .flat_map(|g| self.group(*g).iter())
            .find(|it| it.key == key)
    }

    /// Updates the stored price for `key` in every group that carries it.
    /// Returns true if at least one entry was updated.
    pub fn set_price(&mut self, key: &str, latest_price: f64) -> bool {
        let mut updated = false;
        for group in Group::ALL {
            for item in self.group_mut(group).iter_mut() {
                if item.key == key {
                    item.latest_price = latest_price;
                    updated = true;
                }
            }
        }
        updated
    }
}
