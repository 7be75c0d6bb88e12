use thiserror::Error;

#[derive(Debug, Error)]
pub enum KostologioError {
    #[error("Catalog item with key '{0}' not found")]
    ItemNotFound(String),

    #[error("Page '{0}' is not a known calculator page")]
    PageNotFound(String),

    #[error("Catalog for page '{0}' is missing")]
    CatalogNotLoaded(String),

    #[error("Page '{page}' declares group '{group}' but the catalog does not carry it")]
    GroupMissing { page: String, group: String },

    #[error("Extra line item with id {0} not found")]
    ExtraNotFound(u64),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
