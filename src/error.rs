use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::level::LayoutError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
    #[error("cannot read maze file {path}: {source}")]
    LayoutRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid maze file {path}: {source}")]
    LayoutInvalid {
        path: PathBuf,
        #[source]
        source: LayoutError,
    },
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type AppResult<T> = Result<T, AppError>;
