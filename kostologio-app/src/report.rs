use anyhow::{Context, Result};
use kostologio_core::estimate::engine::EstimateEngine;
use kostologio_core::export::QuoteWriter;
use kostologio_schemas::breakdown::CostBreakdown;
use std::path::Path;

fn fmt_eur(amount: f64) -> String {
    format!("{:.2} €", amount)
}

fn fmt_per_unit(value: Option<f64>) -> String {
    match value {
        Some(v) => fmt_eur(v),
        None => "—".to_string(),
    }
}

/// Prints the quote breakdown the way the page summary rendered it.
pub fn print_report(engine: &EstimateEngine, breakdown: &CostBreakdown) {
    let page = engine.page();
    println!("\n--- Προσφορά: {} ---", page.title);

    for group in &page.groups {
        let items = engine.line_items(*group);
        if items.is_empty() {
            continue;
        }
        println!("\n[{}]", group.name());
        for item in &items {
            let qty = if item.rounded {
                format!("{:.0}", item.quantity)
            } else {
                format!("{:.2}", item.quantity)
            };
            println!(
                "  {:<28} {:>8} {:<6} x {:>8} = {:>10}",
                item.name,
                qty,
                item.unit.label(),
                fmt_eur(item.unit_price),
                fmt_eur(item.cost)
            );
        }
        println!("  Υποσύνολο: {}", fmt_eur(breakdown.subtotal(*group)));
    }

    let flagged = engine.extras_needing_attention();
    if !flagged.is_empty() {
        println!("\nΠροσοχή: {} επιπρόσθετο(α) με μηδενική ποσότητα.", flagged.len());
    }

    println!("\nΚόστος:          {}", fmt_eur(breakdown.total_cost));
    println!(
        "Markup:          {}% ({})",
        breakdown.markup_percent,
        breakdown.markup_zone().label()
    );
    println!("Τιμή πώλησης:    {}", fmt_eur(breakdown.sell_price));
    println!(
        "Μικτό κέρδος:    {} ({:.1}%)",
        fmt_eur(breakdown.gross_profit),
        breakdown.margin_percent
    );
    println!("Τιμή ανά m²:     {}", fmt_per_unit(breakdown.sell_per_m2));
    println!("Τιμή ανά lm:     {}", fmt_per_unit(breakdown.sell_per_lm));
    println!("Τιμή ανά m³:     {}", fmt_per_unit(breakdown.sell_per_m3));
}

/// Writes the quote line items as CSV and the breakdown as JSON into the
/// run directory.
pub fn export_quote(
    engine: &EstimateEngine,
    breakdown: &CostBreakdown,
    out_dir: &Path,
) -> Result<()> {
    let csv_path = out_dir.join("quote.csv");
    let mut writer = QuoteWriter::new(&csv_path)
        .with_context(|| format!("Failed to create {:?}", csv_path))?;
    for group in &engine.page().groups {
        writer.write_group(*group, &engine.line_items(*group))?;
    }
    writer.write_summary(breakdown)?;
    writer.finish()?;

    let json_path = out_dir.join("summary.json");
    kostologio_core::export::write_breakdown_json(&json_path, breakdown)
        .with_context(|| format!("Failed to write {:?}", json_path))?;

    println!("Quote exported to {:?}", out_dir);
    Ok(())
}
