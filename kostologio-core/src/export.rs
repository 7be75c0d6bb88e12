use std::fs;
use std::path::Path;

use kostologio_schemas::breakdown::CostBreakdown;
use kostologio_schemas::catalog::Group;
use serde::Serialize;

use crate::aggregate::LineItemCost;
use crate::error::KostologioError;

#[derive(Debug, Serialize)]
struct QuoteRow {
    section: String,
    key: String,
    description: String,
    unit: String,
    quantity: f64,
    unit_price: f64,
    cost: f64,
}

/// CSV export of a computed quote: one row per costed line item, followed
/// by a summary block with the totals and markup figures.
pub struct QuoteWriter {
    path: String,
    writer: csv::Writer<fs::File>,
}

impl QuoteWriter {
    pub fn new(path: &Path) -> Result<Self, KostologioError> {
        let display = path.display().to_string();
        let writer = csv::Writer::from_path(path)
            .map_err(|e| KostologioError::CsvError(display.clone(), e))?;
        Ok(QuoteWriter {
            path: display,
            writer,
        })
    }

    pub fn write_group(
        &mut self,
        group: Group,
        items: &[LineItemCost],
    ) -> Result<(), KostologioError> {
        for item in items {
            let row = QuoteRow {
                section: group.name().to_string(),
                key: item.key.clone(),
                description: item.name.clone(),
                unit: item.unit.wire_name().to_string(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                cost: item.cost,
            };
            self.writer
                .serialize(row)
                .map_err(|e| KostologioError::CsvError(self.path.clone(), e))?;
        }
        Ok(())
    }

    pub fn write_summary(&mut self, breakdown: &CostBreakdown) -> Result<(), KostologioError> {
        let rows = [
            ("total_cost", breakdown.total_cost),
            ("markup_percent", breakdown.markup_percent as f64),
            ("sell_price", breakdown.sell_price),
            ("gross_profit", breakdown.gross_profit),
            ("margin_percent", breakdown.margin_percent),
        ];
        for (key, value) in rows {
            let row = QuoteRow {
                section: "summary".to_string(),
                key: key.to_string(),
                description: String::new(),
                unit: String::new(),
                quantity: 0.0,
                unit_price: 0.0,
                cost: value,
            };
            self.writer
                .serialize(row)
                .map_err(|e| KostologioError::CsvError(self.path.clone(), e))?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), KostologioError> {
        self.writer
            .flush()
            .map_err(|e| KostologioError::FileIO(self.path.clone(), e))?;
        Ok(())
    }
}

/// Writes the breakdown as pretty-printed JSON, the machine-readable
/// counterpart of the CSV quote.
pub fn write_breakdown_json(
    path: &Path,
    breakdown: &CostBreakdown,
) -> Result<(), KostologioError> {
    let json = serde_json::to_string_pretty(breakdown)?;
    fs::write(path, json).map_err(|e| KostologioError::FileIO(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kostologio_schemas::unit::Unit;

    #[test]
    fn writes_rows_and_summary() {
        let dir = std::env::temp_dir().join("kostologio_export_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("quote.csv");

        let mut writer = QuoteWriter::new(&path).unwrap();
        writer
            .write_group(
                Group::Areas,
                &[LineItemCost {
                    key: "glue".to_string(),
                    name: "Κόλλα".to_string(),
                    unit: Unit::Kilogram,
                    quantity: 70.0,
                    rounded: false,
                    unit_price: 0.8,
                    cost: 56.0,
                }],
            )
            .unwrap();
        writer
            .write_summary(&CostBreakdown {
                total_cost: 56.0,
                markup_percent: 20,
                sell_price: 67.2,
                gross_profit: 11.2,
                ..Default::default()
            })
            .unwrap();
        writer.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("section,key,description,unit,quantity,unit_price,cost"));
        assert!(content.contains("areas,glue,Κόλλα,kg,70.0,0.8,56.0"));
        assert!(content.contains("summary,sell_price"));
        fs::remove_file(&path).ok();
    }
}
