//! Data providers — how price series get into the pipeline.
//!
//! Network retrieval is a collaborator concern, not implemented here. The
//! shipped providers are offline: CSV import and a deterministic synthetic
//! walk (for development and tests).

pub mod csv_import;
pub mod provider;
pub mod synthetic;

pub use csv_import::{export_csv, CsvProvider};
pub use provider::{DataError, DataProvider};
pub use synthetic::SyntheticProvider;
