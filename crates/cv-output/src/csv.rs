//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `deliveries.csv`
//! - `drinks.csv`
//! - `refills.csv`
//! - `requests.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{DeliveryRow, DrinkRow, OutputResult, RefillRow, RequestRow};
use crate::writer::OutputWriter;

/// Writes statistics to four CSV files.
pub struct CsvWriter {
    deliveries: Writer<File>,
    drinks:     Writer<File>,
    refills:    Writer<File>,
    requests:   Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut deliveries = Writer::from_path(dir.join("deliveries.csv"))?;
        deliveries.write_record([
            "camel", "camel_type", "request", "warehouse", "oasis", "load",
            "departs_at", "delivers_at", "returns_at", "walked", "path",
        ])?;

        let mut drinks = Writer::from_path(dir.join("drinks.csv"))?;
        drinks.write_record(["camel", "request", "node", "time"])?;

        let mut refills = Writer::from_path(dir.join("refills.csv"))?;
        refills.write_record(["warehouse", "time", "before", "after"])?;

        let mut requests = Writer::from_path(dir.join("requests.csv"))?;
        requests.write_record([
            "request", "oasis", "baskets", "arrival", "deadline",
            "delivered", "delivered_at", "state", "camels",
        ])?;

        Ok(Self { deliveries, drinks, refills, requests, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_delivery(&mut self, row: &DeliveryRow, drinks: &[DrinkRow]) -> OutputResult<()> {
        self.deliveries.write_record(&[
            row.camel.to_string(),
            row.camel_type.to_string(),
            row.request.to_string(),
            row.warehouse.to_string(),
            row.oasis.to_string(),
            row.load.to_string(),
            row.departs_at.to_string(),
            row.delivers_at.to_string(),
            row.returns_at.to_string(),
            row.walked.to_string(),
            row.path.clone(),
        ])?;
        for d in drinks {
            self.drinks.write_record(&[
                d.camel.to_string(),
                d.request.to_string(),
                d.node.to_string(),
                d.time.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_refill(&mut self, row: &RefillRow) -> OutputResult<()> {
        self.refills.write_record(&[
            row.warehouse.to_string(),
            row.time.to_string(),
            row.before.to_string(),
            row.after.to_string(),
        ])?;
        Ok(())
    }

    fn write_requests(&mut self, rows: &[RequestRow]) -> OutputResult<()> {
        for r in rows {
            self.requests.write_record(&[
                r.request.to_string(),
                r.oasis.to_string(),
                r.baskets.to_string(),
                r.arrival.to_string(),
                r.deadline.to_string(),
                r.delivered.to_string(),
                r.delivered_at.map(|t| t.to_string()).unwrap_or_default(),
                r.state.clone(),
                r.camels.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.deliveries.flush()?;
        self.drinks.flush()?;
        self.refills.flush()?;
        self.requests.flush()?;
        Ok(())
    }
}
