use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no UCD cache at {path} (rebuild it with --ucd)")]
    CacheMissing { path: PathBuf },

    #[error("UCD cache at {path} is corrupt")]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("cannot open UCD cache at {path}")]
    CacheUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write UCD cache to {path}")]
    CacheUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read name source {path}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read {path}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid start position: line {line}, column {column} (both must be 1 or more)")]
    InvalidPosition { line: i64, column: i64 },

    #[error("cannot write output")]
    Output(#[source] io::Error),

    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),

    #[error("{0}")]
    Usage(String),
}
