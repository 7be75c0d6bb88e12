use crate::catalog::{Catalog, CatalogItem};
use serde::{Deserialize, Serialize};

/// On-disk catalog file for one page.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub schema_version: String,
    pub page: String,
    pub catalog: Catalog,
}

/// Body of `POST /api/{page}/update-price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePricePayload {
    pub key: String,
    pub latest_price: f64,
}

/// Success body returned by the price API; carries the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePriceResponse {
    pub status: String,
    pub item: CatalogItem,
}
