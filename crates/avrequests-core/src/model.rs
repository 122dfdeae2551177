//! Domain model for AV request correlation.
//!
//! This module provides the entities read from the host application:
//! - [`Event`]: a conference event with its contributions
//! - [`Contribution`] / [`Subcontribution`]: scheduled entries of an event
//! - [`Room`] and [`RoomDirectory`]: rooms and their equipment
//!
//! The capability traits [`HasDateRange`], [`HasLocation`] and [`HasRoom`]
//! replace the host's loosely-typed attribute access with explicit interfaces.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The equipment type name that marks a room as AV-capable.
pub const WEBCAST_RECORDING: &str = "Webcast/Recording";

/// Access to an entity's scheduled date range.
pub trait HasDateRange {
    /// Returns the (start, end) pair, or `None` for entities without dates.
    fn date_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)>;
}

/// Access to an entity's location name.
pub trait HasLocation {
    fn location_name(&self) -> Option<&str>;
}

/// Access to an entity's room name.
pub trait HasRoom {
    fn room_name(&self) -> Option<&str>;
}

/// The type of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A lecture-style event with no contribution structure of its own.
    SimpleEvent,
    Meeting,
    Conference,
}

impl EventKind {
    /// Returns true for events treated as a single implicit contribution.
    pub fn is_simple(&self) -> bool {
        matches!(self, Self::SimpleEvent)
    }
}

/// A conference event as seen by the correlator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier within the host application.
    pub id: String,
    /// The event type.
    pub kind: EventKind,
    /// The event title.
    pub title: String,
    /// When the event starts.
    pub start_date: DateTime<Utc>,
    /// When the event ends.
    pub end_date: DateTime<Utc>,
    /// The event's location name, if set.
    pub location: Option<String>,
    /// The event's default room name, if set.
    pub room: Option<String>,
    /// The event's contributions.
    pub contributions: Vec<Contribution>,
}

impl Event {
    /// Creates a new event with required fields.
    pub fn new(
        id: impl Into<String>,
        kind: EventKind,
        title: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            start_date,
            end_date,
            location: None,
            room: None,
            contributions: Vec::new(),
        }
    }

    /// Builder method to set the location name.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the default room name.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Builder method to add a contribution.
    pub fn with_contribution(mut self, contribution: Contribution) -> Self {
        self.contributions.push(contribution);
        self
    }
}

impl HasDateRange for Event {
    fn date_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.start_date, self.end_date))
    }
}

impl HasLocation for Event {
    fn location_name(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl HasRoom for Event {
    fn room_name(&self) -> Option<&str> {
        self.room.as_deref()
    }
}

/// A contribution belonging to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Unique identifier within the host application.
    pub id: String,
    /// The contribution title.
    pub title: String,
    /// When the contribution starts, if scheduled.
    pub start_date: Option<DateTime<Utc>>,
    /// When the contribution ends, if scheduled.
    pub end_date: Option<DateTime<Utc>>,
    /// The contribution's own location name; falls back to the event's.
    pub location: Option<String>,
    /// The contribution's own room name; falls back to the event's.
    pub room: Option<String>,
    /// Whether this is a poster contribution.
    pub is_poster: bool,
    /// The contribution's subcontributions.
    pub subcontributions: Vec<Subcontribution>,
}

impl Contribution {
    /// Creates a new contribution with required fields.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date: None,
            end_date: None,
            location: None,
            room: None,
            is_poster: false,
            subcontributions: Vec::new(),
        }
    }

    /// Builder method to set the scheduled date range.
    pub fn with_dates(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Builder method to set the contribution's own location name.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the contribution's own room name.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Builder method to mark the contribution as a poster.
    pub fn poster(mut self, is_poster: bool) -> Self {
        self.is_poster = is_poster;
        self
    }

    /// Builder method to add a subcontribution.
    pub fn with_subcontribution(mut self, subcontribution: Subcontribution) -> Self {
        self.subcontributions.push(subcontribution);
        self
    }

    /// The contribution's location name, inheriting the event's when unset.
    pub fn effective_location<'a>(&'a self, event: &'a Event) -> Option<&'a str> {
        self.location.as_deref().or(event.location.as_deref())
    }

    /// The contribution's room name, inheriting the event's when unset.
    pub fn effective_room<'a>(&'a self, event: &'a Event) -> Option<&'a str> {
        self.room.as_deref().or(event.room.as_deref())
    }
}

/// A subcontribution. It has no dates of its own and inherits scheduling
/// and location context from its parent contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcontribution {
    /// Unique identifier within the parent contribution.
    pub id: String,
    /// The subcontribution title.
    pub title: String,
}

impl Subcontribution {
    /// Creates a new subcontribution.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A room with its equipment.
///
/// Rooms compare and hash by (location, name); equipment is not part of
/// their identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// The room name (e.g. "513/1-024").
    pub name: String,
    /// The location the room belongs to.
    pub location: String,
    /// Names of the equipment types available in the room.
    pub equipment: HashSet<String>,
}

impl Room {
    /// Creates a new room without equipment.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            equipment: HashSet::new(),
        }
    }

    /// Builder method to add an equipment type by name.
    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment.insert(equipment.into());
        self
    }

    /// Returns true if the room has the given equipment type.
    pub fn has_equipment(&self, name: &str) -> bool {
        self.equipment.contains(name)
    }
}

impl PartialEq for Room {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location && self.name == other.name
    }
}

impl Eq for Room {}

impl Hash for Room {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
        self.name.hash(state);
    }
}

/// The queryable collection of rooms, standing in for the host
/// application's room and equipment storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomDirectory {
    rooms: Vec<Room>,
}

impl RoomDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory from a list of rooms.
    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// Adds a room to the directory.
    pub fn add_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    /// Returns all rooms.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Returns the set of AV-capable rooms in the given reference location:
    /// rooms there that have the [`WEBCAST_RECORDING`] equipment type.
    pub fn av_capable_rooms(&self, reference_location: &str) -> HashSet<&Room> {
        self.rooms
            .iter()
            .filter(|room| {
                room.location == reference_location && room.has_equipment(WEBCAST_RECORDING)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    mod event {
        use super::*;

        #[test]
        fn kind_is_simple() {
            assert!(EventKind::SimpleEvent.is_simple());
            assert!(!EventKind::Meeting.is_simple());
            assert!(!EventKind::Conference.is_simple());
        }

        #[test]
        fn builder_and_capability_traits() {
            let event = Event::new(
                "42",
                EventKind::Meeting,
                "Weekly TB",
                utc(2025, 3, 1, 9, 0, 0),
                utc(2025, 3, 1, 17, 0, 0),
            )
            .with_location("CERN")
            .with_room("500/1-001");

            assert_eq!(event.location_name(), Some("CERN"));
            assert_eq!(event.room_name(), Some("500/1-001"));
            assert_eq!(
                event.date_range(),
                Some((utc(2025, 3, 1, 9, 0, 0), utc(2025, 3, 1, 17, 0, 0)))
            );
        }

        #[test]
        fn missing_location_and_room() {
            let event = Event::new(
                "42",
                EventKind::SimpleEvent,
                "Seminar",
                utc(2025, 3, 1, 9, 0, 0),
                utc(2025, 3, 1, 10, 0, 0),
            );
            assert_eq!(event.location_name(), None);
            assert_eq!(event.room_name(), None);
        }
    }

    mod contribution {
        use super::*;

        fn event_with_room() -> Event {
            Event::new(
                "1",
                EventKind::Meeting,
                "Meeting",
                utc(2025, 3, 1, 9, 0, 0),
                utc(2025, 3, 1, 17, 0, 0),
            )
            .with_location("CERN")
            .with_room("500/1-001")
        }

        #[test]
        fn effective_location_falls_back_to_event() {
            let event = event_with_room();
            let contribution = Contribution::new("10", "Status report");

            assert_eq!(contribution.effective_location(&event), Some("CERN"));
            assert_eq!(contribution.effective_room(&event), Some("500/1-001"));
        }

        #[test]
        fn own_location_wins() {
            let event = event_with_room();
            let contribution = Contribution::new("10", "Status report")
                .with_location("Fermilab")
                .with_room("WH11");

            assert_eq!(contribution.effective_location(&event), Some("Fermilab"));
            assert_eq!(contribution.effective_room(&event), Some("WH11"));
        }

        #[test]
        fn no_location_anywhere() {
            let event = Event::new(
                "1",
                EventKind::Meeting,
                "Meeting",
                utc(2025, 3, 1, 9, 0, 0),
                utc(2025, 3, 1, 17, 0, 0),
            );
            let contribution = Contribution::new("10", "Status report");

            assert_eq!(contribution.effective_location(&event), None);
            assert_eq!(contribution.effective_room(&event), None);
        }
    }

    mod room {
        use super::*;

        #[test]
        fn identity_ignores_equipment() {
            let bare = Room::new("513/1-024", "CERN");
            let equipped = Room::new("513/1-024", "CERN").with_equipment(WEBCAST_RECORDING);
            assert_eq!(bare, equipped);

            let elsewhere = Room::new("513/1-024", "Fermilab");
            assert_ne!(bare, elsewhere);
        }

        #[test]
        fn equipment_lookup() {
            let room = Room::new("513/1-024", "CERN")
                .with_equipment(WEBCAST_RECORDING)
                .with_equipment("Projector");
            assert!(room.has_equipment(WEBCAST_RECORDING));
            assert!(room.has_equipment("Projector"));
            assert!(!room.has_equipment("Whiteboard"));
        }
    }

    mod directory {
        use super::*;

        #[test]
        fn av_capable_rooms_filters_location_and_equipment() {
            let directory = RoomDirectory::from_rooms(vec![
                Room::new("513/1-024", "CERN").with_equipment(WEBCAST_RECORDING),
                Room::new("500/1-001", "CERN").with_equipment("Projector"),
                Room::new("WH11", "Fermilab").with_equipment(WEBCAST_RECORDING),
            ]);

            let capable = directory.av_capable_rooms("CERN");
            assert_eq!(capable.len(), 1);
            assert!(capable.iter().any(|r| r.name == "513/1-024"));
        }

        #[test]
        fn empty_directory() {
            let directory = RoomDirectory::new();
            assert!(directory.av_capable_rooms("CERN").is_empty());
        }
    }
}
