//! Plugin settings as an explicit configuration object.
//!
//! The host application persists these under the keys `managers`,
//! `allow_subcontributions` and `webcast_ping_url`; the struct deserializes
//! directly from that JSON shape. The reference location used for equipment
//! lookups is configurable and defaults to `"CERN"`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

/// A reference to a user or group principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Principal {
    /// A single user, by id.
    User(String),
    /// A group, by name.
    Group(String),
}

/// A user of the host application, with its group memberships.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub groups: HashSet<String>,
}

impl User {
    /// Creates a new user with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            groups: HashSet::new(),
        }
    }

    /// Builder method to add a group membership.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.insert(group.into());
        self
    }
}

/// Configuration for the AV request correlator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvSettings {
    /// Principals allowed to manage AV requests.
    pub managers: HashSet<Principal>,
    /// Whether subcontributions are listed alongside contributions.
    pub allow_subcontributions: bool,
    /// Endpoint pinged after AV-relevant changes. Unset disables the ping.
    pub webcast_ping_url: Option<Url>,
    /// The location whose rooms are considered for AV equipment.
    pub reference_location: String,
}

impl Default for AvSettings {
    fn default() -> Self {
        Self {
            managers: HashSet::new(),
            allow_subcontributions: false,
            webcast_ping_url: None,
            reference_location: "CERN".to_string(),
        }
    }
}

impl AvSettings {
    /// Creates settings with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a manager principal.
    pub fn with_manager(mut self, principal: Principal) -> Self {
        self.managers.insert(principal);
        self
    }

    /// Builder method to enable or disable subcontribution listing.
    pub fn with_allow_subcontributions(mut self, allow: bool) -> Self {
        self.allow_subcontributions = allow;
        self
    }

    /// Builder method to set the webcast ping URL.
    pub fn with_webcast_ping_url(mut self, url: Url) -> Self {
        self.webcast_ping_url = Some(url);
        self
    }

    /// Builder method to set the reference location.
    pub fn with_reference_location(mut self, location: impl Into<String>) -> Self {
        self.reference_location = location.into();
        self
    }

    /// Checks if a user is an AV manager.
    ///
    /// With no managers configured nobody qualifies; absent configuration
    /// degrades to an empty permission set rather than an error.
    pub fn is_av_manager(&self, user: &User) -> bool {
        self.managers.iter().any(|principal| match principal {
            Principal::User(id) => *id == user.id,
            Principal::Group(group) => user.groups.contains(group),
        })
    }
}
