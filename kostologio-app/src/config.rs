use anyhow::{Context, Result};
use kostologio_schemas::catalog::Catalog;
use kostologio_schemas::file_formats::CatalogFile;
use std::{collections::HashMap, fs, path::Path};

/// All per-page catalogs loaded from disk, keyed by page key.
///
/// YAML files carry the versioned `CatalogFile` wrapper; JSON files carry
/// the bare group object exactly as the external catalog API serves it and
/// are keyed by file stem.
pub struct PriceBook {
    pub catalogs: HashMap<String, Catalog>,
}

impl PriceBook {
    /// Loads every catalog file in the given directory.
    pub fn load(base_path: &str) -> Result<Self> {
        println!("Loading price book from '{}'...", base_path);

        let mut catalogs = HashMap::new();
        for entry in fs::read_dir(base_path)
            .with_context(|| format!("Failed to read directory: {}", base_path))?
        {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match path.extension().and_then(|s| s.to_str()) {
                Some("yaml") | Some("yml") => {
                    let (page, catalog) = load_yaml_catalog(&path)?;
                    catalogs.insert(page, catalog);
                }
                Some("json") => {
                    let (page, catalog) = load_json_catalog(&path)?;
                    catalogs.insert(page, catalog);
                }
                _ => {}
            }
        }

        println!("Price book loaded: {} page catalog(s).", catalogs.len());
        Ok(PriceBook { catalogs })
    }

    pub fn catalog(&self, page_key: &str) -> Option<&Catalog> {
        self.catalogs.get(page_key)
    }
}

fn load_yaml_catalog(path: &Path) -> Result<(String, Catalog)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {:?}", path))?;
    let file: CatalogFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
    Ok((file.page, file.catalog))
}

fn load_json_catalog(path: &Path) -> Result<(String, Catalog)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {:?}", path))?;
    let catalog: Catalog = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from {:?}", path))?;
    let page = path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Catalog file has no usable file name")?
        .to_string();
    Ok((page, catalog))
}
