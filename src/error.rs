//! Error type shared across the crate
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading solver output or rendering plots
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying i/o failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed `.inp` configuration file
    #[error("malformed input file {file:?}: {msg}")]
    Parse {
        /// Offending file
        file: PathBuf,
        /// What went wrong
        msg: String,
    },
    /// A required configuration key was not found
    #[error("missing key {key:?} in {file:?}")]
    MissingKey {
        /// Name of the key
        key: String,
        /// File that was searched
        file: PathBuf,
    },
    /// A configuration value could not be converted to the requested type
    #[error("invalid value {value:?} for key {key:?}")]
    InvalidValue {
        /// Name of the key
        key: String,
        /// Raw token
        value: String,
    },
    /// Solution files must be written in binary format
    #[error("op_file_format must be 'binary', but solver.inp says {0:?}")]
    NotBinary(String),
    /// Snapshot file holds fewer values than the grid dimensions demand
    #[error("snapshot {file:?} too short: expected {expected} values, found {found}")]
    ShapeMismatch {
        /// Offending file
        file: PathBuf,
        /// Number of values implied by ndims/nvars/size
        expected: usize,
        /// Number of values actually present
        found: usize,
    },
    /// Flat buffer length does not match the configured dimensions
    #[error("cannot reshape buffer of {found} values into {expected}")]
    Reshape {
        /// Number of values implied by nvars/size
        expected: usize,
        /// Buffer length
        found: usize,
    },
    /// Only 2-D and 3-D domains are supported
    #[error("unsupported number of dimensions: {0}")]
    BadDimensions(usize),
    /// Solution vector has fewer components than the physics requires
    #[error("expected at least {expected} solution components, found {found}")]
    BadVariables {
        /// Required component count
        expected: usize,
        /// Component count from solver.inp
        found: usize,
    },
    /// No snapshot file was found at all
    #[error("no snapshot file found in {0:?}")]
    NoSnapshots(PathBuf),
    /// Failure in the plotters backend
    #[error("plotting error: {0}")]
    Plot(String),
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Self::Plot(e.to_string())
    }
}

/// Result type of this crate
pub type Result<T> = std::result::Result<T, Error>;
