//! FIT file input.
//!
//! Opens an activity file and hands it to `fitparser` for decoding. All
//! byte-level knowledge of the FIT container lives in that crate; this
//! module owns the file handle and the error surface for a failed pass.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use fitparser::FitDataRecord;
use thiserror::Error;
use tracing::debug;

/// Failure to produce a decoded message sequence from a file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be opened or read.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not a valid FIT container.
    #[error("failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },
}

/// Read and decode every message in a FIT file, in file order.
///
/// The whole file is decoded up front, so callers may iterate the returned
/// messages as many times as they need. There is no partial result: an open
/// or decode failure discards the pass.
pub fn read_messages(path: &Path) -> Result<Vec<FitDataRecord>, SourceError> {
    debug!(path = %path.display(), "opening FIT file");
    let mut file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let messages = fitparser::from_reader(&mut file).map_err(|e| SourceError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(count = messages.len(), "decoded FIT messages");
    Ok(messages)
}
