//! `cv-output` — run statistics and their writers for the rust_caravan
//! simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                                 |
//! |-----------|---------|---------------------------------------------------------------|
//! | *(none)*  | CSV     | `deliveries.csv`, `drinks.csv`, `refills.csv`, `requests.csv` |
//! | `sqlite`  | SQLite  | `statistics.db`                                               |
//!
//! Both implement [`OutputWriter`] and are driven by [`StatisticsObserver`],
//! which implements `cv_sim::SimObserver` and also keeps an in-memory
//! [`Statistics`] (per camel, per oasis, per warehouse).
//!
//! # Usage
//!
//! ```rust,ignore
//! use cv_output::{CsvWriter, StatisticsObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = StatisticsObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod stats;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StatisticsObserver;
pub use row::{DeliveryRow, DrinkRow, RefillRow, RequestRow};
pub use stats::{CamelStats, OasisDelivery, OasisStats, Statistics, WarehouseStats};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
