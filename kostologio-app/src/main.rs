use anyhow::{Context, Result};
use clap::Parser;
use kostologio_core::error::KostologioError;
use kostologio_core::estimate::builder::EstimateBuilder;
use kostologio_schemas::page::PageConfig;
use std::fs;
use std::path::{Path, PathBuf};

mod config;
mod report;
mod request;

/// Construction-trade quote calculator.
#[derive(Debug, Parser)]
#[command(name = "kostologio", version)]
struct Cli {
    /// Directory holding the per-page catalog files.
    #[arg(long, default_value = "data/catalogs")]
    catalogs: String,

    /// Estimate request file (YAML).
    #[arg(long)]
    request: String,

    /// Base directory for run output.
    #[arg(long, default_value = "data/runs")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    println!("--- Kostologio ---");

    let request = request::EstimateRequest::load(&cli.request)?;
    let page = PageConfig::by_key(&request.page)
        .ok_or_else(|| KostologioError::PageNotFound(request.page.clone()))?;

    let book = config::PriceBook::load(&cli.catalogs)?;
    let catalog = book
        .catalog(&page.key)
        .ok_or_else(|| KostologioError::CatalogNotLoaded(page.key.clone()))?
        .clone();

    let mut engine = EstimateBuilder::new()
        .with_page(page)
        .with_catalog(catalog)
        .with_measurements(request.measurements.clone())
        .with_markup(request.markup_percent)
        .build()?;
    request.apply_extras(&mut engine)?;

    let breakdown = engine.recalc();
    report::print_report(&engine, &breakdown);

    let out_dir = cli.out.join(format!(
        "{}_{}",
        engine.page().key,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    // Copy the request file into the run directory for traceability.
    fs::copy(&cli.request, Path::new(&out_dir).join("request.yaml"))
        .with_context(|| format!("Failed to copy request file '{}'", cli.request))?;

    report::export_quote(&engine, &breakdown, &out_dir)?;

    Ok(())
}
