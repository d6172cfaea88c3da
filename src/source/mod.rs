//! Where raw apartment records come from.
//!
//! The store never talks to a transport directly; it asks an [`ApartmentsSource`] for the full
//! listing and runs the query pipeline locally. A source signals an empty response with
//! `Ok(None)` and a failed fetch with a [`crate::SourceError`].
//!
//! - [`JsonSource`]: a JSON file (array, single object or NDJSON)
//! - [`StaticSource`]: records held in memory
//! - [`ApiConfig`]: base URL + endpoint wiring shared by sources
//! - [`observability`]: load outcome hooks used by [`crate::store::ApartmentsStore`]

pub mod json;
pub mod observability;

use serde::{Deserialize, Serialize};

use crate::apartment::Apartment;
use crate::error::SourceResult;

pub use json::{parse_apartments, JsonSource};
pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingLoadObserver,
};

/// Base URL used when running in the client.
pub const CLIENT_BASE_URL: &str = "/";
/// Base URL used when rendering on the server.
pub const SERVER_BASE_URL: &str = "localhost:3000/";
/// Default endpoint for the apartments listing.
pub const APARTMENTS_ENDPOINT: &str = "/apartments.json";

/// Endpoint wiring for apartment sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint is resolved against.
    pub base_url: String,
    /// Path of the apartments listing.
    pub apartments_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: CLIENT_BASE_URL.to_string(),
            apartments_endpoint: APARTMENTS_ENDPOINT.to_string(),
        }
    }
}

impl ApiConfig {
    /// Configuration for server-side rendering.
    pub fn server() -> Self {
        Self {
            base_url: SERVER_BASE_URL.to_string(),
            ..Self::default()
        }
    }

    /// Join `path` onto the base URL with exactly one `/` between them.
    pub fn resolve(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Full URL of the apartments listing.
    pub fn apartments_url(&self) -> String {
        self.resolve(&self.apartments_endpoint)
    }
}

/// A provider of the raw apartment listing.
pub trait ApartmentsSource {
    /// Fetch every listing. `Ok(None)` means the source gave no response.
    fn fetch(&self) -> SourceResult<Option<Vec<Apartment>>>;

    /// Short description used in load reports.
    fn describe(&self) -> String {
        "apartments source".to_string()
    }
}

impl<S: ApartmentsSource + ?Sized> ApartmentsSource for &S {
    fn fetch(&self) -> SourceResult<Option<Vec<Apartment>>> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Records held in memory; `None` simulates a source with no response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticSource {
    records: Option<Vec<Apartment>>,
}

impl StaticSource {
    /// Source that always returns `records`.
    pub fn new(records: Vec<Apartment>) -> Self {
        Self {
            records: Some(records),
        }
    }

    /// Source that never responds.
    pub fn no_response() -> Self {
        Self { records: None }
    }
}

impl ApartmentsSource for StaticSource {
    fn fetch(&self) -> SourceResult<Option<Vec<Apartment>>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}
