//! JSON-backed apartment source.
//!
//! Supported payloads:
//! - A JSON array of listing objects: `[{...}, {...}]`
//! - Newline-delimited JSON (NDJSON): one listing object per line, at least two lines
//! - `null` or an empty body, which mean "no response"

use std::fs;
use std::path::{Path, PathBuf};

use crate::apartment::Apartment;
use crate::error::{SourceError, SourceResult};

use super::{ApartmentsSource, ApiConfig};

/// Reads listings from a JSON file on every fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    /// Source reading `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Source reading the configured apartments endpoint under `root`.
    pub fn under(root: impl AsRef<Path>, config: &ApiConfig) -> Self {
        let endpoint = config.apartments_endpoint.trim_start_matches('/');
        Self::new(root.as_ref().join(endpoint))
    }

    /// Path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ApartmentsSource for JsonSource {
    fn fetch(&self) -> SourceResult<Option<Vec<Apartment>>> {
        let text = fs::read_to_string(&self.path)?;
        parse_apartments(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse a listings payload.
///
/// Returns `Ok(None)` for an empty body or a JSON `null`.
pub fn parse_apartments(input: &str) -> SourceResult<Option<Vec<Apartment>>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // First try parsing as a single JSON value (array or null).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return match v {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Array(_) => Ok(Some(serde_json::from_value(v)?)),
            _ => Err(SourceError::InvalidPayload {
                message: "json must be null, an array of listings, or NDJSON".to_string(),
            }),
        };
    }

    // Fall back to NDJSON.
    let mut out = Vec::new();
    for (i, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let apartment = serde_json::from_str::<Apartment>(line).map_err(|e| {
            SourceError::InvalidPayload {
                message: format!("invalid ndjson at line {}: {}", i + 1, e),
            }
        })?;
        out.push(apartment);
    }
    Ok(Some(out))
}
