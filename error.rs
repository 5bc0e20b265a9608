use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can stop a counting run after the arguments were accepted.
#[derive(Debug)]
pub enum CounterError {
    /// Input file could not be opened or read.
    Io { path: PathBuf, source: io::Error },
    /// `--encoding` label is not a known WHATWG label.
    UnknownEncoding(String),
    /// Input bytes are not valid in the requested encoding.
    Malformed { path: PathBuf, encoding: &'static str },
    /// Writing the report to stdout failed.
    Output(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for CounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterError::Io { path, source } => {
                write!(f, "couldn't read file '{}': {}", path.display(), source)
            }
            CounterError::UnknownEncoding(label) => write!(f, "unknown encoding '{}'", label),
            CounterError::Malformed { path, encoding } => {
                write!(f, "file '{}' is not valid {} text", path.display(), encoding)
            }
            CounterError::Output(e) => write!(f, "failed to write report: {}", e),
            CounterError::Json(e) => write!(f, "failed to serialize report: {}", e),
        }
    }
}

impl std::error::Error for CounterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CounterError::Io { source, .. } => Some(source),
            CounterError::Output(e) => Some(e),
            CounterError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CounterError {
    fn from(e: io::Error) -> Self {
        CounterError::Output(e)
    }
}

impl From<serde_json::Error> for CounterError {
    fn from(e: serde_json::Error) -> Self {
        CounterError::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, CounterError>;
