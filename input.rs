use std::fs;
use std::path::Path;
use encoding_rs::{Encoding, UTF_8};

use crate::error::{CounterError, Result};

/// Look up a WHATWG encoding label such as `utf-8`, `latin1` or `shift_jis`.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| CounterError::UnknownEncoding(label.to_string()))
}

/// Read the whole file and decode it. Malformed sequences are an error,
/// never replaced. A BOM is kept as part of the text.
pub fn read_text(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| CounterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Read {} bytes from '{}'", bytes.len(), path.display());

    let malformed = || CounterError::Malformed {
        path: path.to_path_buf(),
        encoding: encoding.name(),
    };
    if encoding == UTF_8 {
        return String::from_utf8(bytes).map_err(|_| malformed());
    }
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes)
        .map(|text| text.into_owned())
        .ok_or_else(malformed)
}
