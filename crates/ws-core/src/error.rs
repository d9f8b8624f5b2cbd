//! Error types for wskim

use thiserror::Error;

/// wskim error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Parquet read/write error
    #[error("Parquet read/write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A partition was requested that has no entry in the weight table.
    #[error("unknown partition '{partition}' for channel '{channel}' (no weight configured)")]
    UnknownPartition {
        /// Channel name.
        channel: String,
        /// Partition name.
        partition: String,
    },

    /// A required input column is absent.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A column exists but has an unsupported type.
    #[error("column '{column}' has wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Column name.
        column: String,
        /// Expected type description.
        expected: String,
        /// Actual Arrow type.
        actual: String,
    },

    /// Input data does not have the shape the pipeline relies on.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A named histogram is absent from a results file.
    #[error("histogram not found: {0}")]
    MissingHistogram(String),

    /// Histograms expected to share a binning do not.
    #[error("histogram '{name}' has {actual} bins, expected {expected}")]
    BinCountMismatch {
        /// Histogram name.
        name: String,
        /// Bin count of the reference histogram.
        expected: usize,
        /// Bin count found.
        actual: usize,
    },

    /// Input files for a partition could not be located.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
