//! Pending AV service requests.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Maps a service key to its display label. Unknown keys pass through.
pub fn service_label(key: &str) -> &str {
    match key {
        "webcast" => "Webcast",
        "recording" => "Recording",
        other => other,
    }
}

/// A pending AV service request for an event.
///
/// Mirrors the request data persisted by the host application: the selected
/// service keys and either "all contributions" (the default) or an explicit
/// selection of composite contribution ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvRequest {
    /// Requested service keys (e.g. "webcast", "recording").
    #[serde(default)]
    pub services: Vec<String>,
    /// Whether the request covers all contributions of the event.
    #[serde(default = "default_all_contributions")]
    pub all_contributions: bool,
    /// Composite contribution ids, used when `all_contributions` is false.
    #[serde(default)]
    pub contributions: HashSet<String>,
}

fn default_all_contributions() -> bool {
    true
}

impl Default for AvRequest {
    fn default() -> Self {
        Self {
            services: Vec::new(),
            all_contributions: true,
            contributions: HashSet::new(),
        }
    }
}

impl AvRequest {
    /// Creates a request covering all contributions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request restricted to the given composite contribution ids.
    pub fn for_contributions<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            services: Vec::new(),
            all_contributions: false,
            contributions: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Builder method to add a service key.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.services.push(service.into());
        self
    }

    /// The display labels of the selected services.
    pub fn selected_services(&self) -> Vec<String> {
        self.services
            .iter()
            .map(|key| service_label(key).to_string())
            .collect()
    }
}
