//! Recoverable domain errors.
//!
//! Transport and configuration failures travel as `anyhow::Error`; the enums here
//! cover failures that only cost one record or one output file.

use thiserror::Error;

/// A product node did not have the expected structure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("product node has no title link")]
    MissingTitle,

    #[error("product node has no price element")]
    MissingPrice,
}

/// One export format could not be written.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0} export is not available in this build")]
    Unsupported(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "xlsx")]
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
