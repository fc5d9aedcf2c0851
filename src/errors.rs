use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every way a conversion run can end early.
///
/// None of these are recoverable; the binary reports them and exits
/// with a failure status. Files written before a `Write` error stay in place.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("could not read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input was read but holds no entry. A notice about the input, not a fault.
    #[error("No BibTeX entries found in the file")]
    NoEntries,

    #[error("could not create output directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
