//! CLI errors

use std::{io, path::PathBuf};

use flashsale::{DecodeError, EncodeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("could not decode record: {0}")]
    Decode(#[from] DecodeError),

    #[error("could not encode record: {0}")]
    Encode(#[from] EncodeError),
}
