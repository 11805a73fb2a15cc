//! Failure kinds that callers may want to tell apart.
//!
//! They travel inside [anyhow::Error] and can be recovered with
//! `error.downcast_ref::<DataError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    /// The image file is missing or cannot be decoded.
    #[error("failed to decode image '{}'", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// A record index beyond the end of a dataset.
    #[error("index {index} is out of range for a dataset of {len} records")]
    IndexOutOfRange { index: usize, len: usize },
    /// Examples in one batch do not share the same shape.
    #[error("cannot collate examples: {reason}")]
    Collate { reason: String },
}

/// Fail with [DataError::IndexOutOfRange] unless `index < len`.
pub fn check_index(index: usize, len: usize) -> Result<(), DataError> {
    if index < len {
        Ok(())
    } else {
        Err(DataError::IndexOutOfRange { index, len })
    }
}
