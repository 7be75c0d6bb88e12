use kostologio_schemas::catalog::Catalog;
use kostologio_schemas::measurements::BaseMeasurements;
use kostologio_schemas::page::PageConfig;

use crate::extras::ExtrasList;

/// All mutable quote state for one page, owned by a single engine instance.
/// There are no ambient globals; every recomputation reads from here.
#[derive(Debug, Clone)]
pub struct EstimateState {
    pub page: PageConfig,
    pub catalog: Catalog,
    pub measurements: BaseMeasurements,
    pub markup_percent: u32,
    pub extras: ExtrasList,
}
