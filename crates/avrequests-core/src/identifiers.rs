//! Change-detection snapshots of AV-relevant data.
//!
//! [`DataIdentifiers`] captures the dates and locations of an event and its
//! selected contributions as sorted `[[kind, id], value]` pairs. The host
//! application persists the serialized form and compares it structurally
//! against a later snapshot to decide whether a re-notification is warranted,
//! so the encoding must be deterministic and round-trip safe.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Event, HasDateRange, HasLocation, HasRoom};
use crate::schedule::ScheduleEntry;

/// The kind of entity a snapshot key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Event,
    Contribution,
    Subcontribution,
}

/// A snapshot key: entity kind plus entity id. Serializes as a two-element
/// array.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey(pub EntityKind, pub String);

/// Start/end dates in RFC 3339 form. Absent for entities without dates.
pub type DatePair = (String, String);

/// (location name, room name), either of which may be unset.
pub type LocationPair = (Option<String>, Option<String>);

/// A comparable snapshot of dates and locations across an event and its
/// selected contributions. Pairs are sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataIdentifiers {
    pub dates: Vec<(EntityKey, Option<DatePair>)>,
    pub locations: Vec<(EntityKey, LocationPair)>,
}

impl DataIdentifiers {
    /// Builds the snapshot for an event and its selected schedule entries.
    ///
    /// The event itself is always included: while the contribution dates and
    /// locations already cover the schedule, a location change of the main
    /// event is still relevant to the AV team.
    pub fn collect<'a>(
        event: &Event,
        entries: impl IntoIterator<Item = &'a ScheduleEntry<'a>>,
    ) -> Self {
        let mut dates = BTreeMap::new();
        let mut locations = BTreeMap::new();

        let event_key = EntityKey(EntityKind::Event, event.id.clone());
        dates.insert(event_key.clone(), event.date_range().map(date_pair));
        locations.insert(event_key, location_pair(event));

        for entry in entries {
            let kind = if entry.is_subcontribution() {
                EntityKind::Subcontribution
            } else {
                EntityKind::Contribution
            };
            let key = EntityKey(kind, entry.entity_id().to_string());
            dates.insert(key.clone(), entry.date_range().map(date_pair));
            locations.insert(key, location_pair(entry));
        }

        Self {
            dates: dates.into_iter().collect(),
            locations: locations.into_iter().collect(),
        }
    }

    /// Encodes the snapshot into a JSON value, the form the host stores.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Decodes a snapshot previously produced by [`Self::to_value`].
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

fn date_pair((start, end): (DateTime<Utc>, DateTime<Utc>)) -> DatePair {
    (start.to_rfc3339(), end.to_rfc3339())
}

fn location_pair(entity: &(impl HasLocation + HasRoom)) -> LocationPair {
    (
        entity.location_name().map(str::to_string),
        entity.room_name().map(str::to_string),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contribution, EventKind, Subcontribution};
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn sample_event() -> Event {
        Event::new(
            "1",
            EventKind::Meeting,
            "Collaboration meeting",
            utc(2025, 3, 1, 9, 0, 0),
            utc(2025, 3, 1, 17, 0, 0),
        )
        .with_location("CERN")
        .with_room("500/1-001")
        .with_contribution(
            Contribution::new("10", "Opening")
                .with_dates(utc(2025, 3, 1, 9, 30, 0), utc(2025, 3, 1, 10, 0, 0)),
        )
    }

    fn entries(event: &Event) -> Vec<ScheduleEntry<'_>> {
        event
            .contributions
            .iter()
            .map(|contribution| ScheduleEntry::Contribution {
                event,
                contribution,
            })
            .collect()
    }

    #[test]
    fn event_is_always_included() {
        let event = sample_event();
        let no_entries: Vec<&ScheduleEntry> = Vec::new();
        let identifiers = DataIdentifiers::collect(&event, no_entries);

        assert_eq!(identifiers.dates.len(), 1);
        assert_eq!(
            identifiers.dates[0].0,
            EntityKey(EntityKind::Event, "1".to_string())
        );
        assert_eq!(
            identifiers.locations[0].1,
            (Some("CERN".to_string()), Some("500/1-001".to_string()))
        );
    }

    #[test]
    fn subcontributions_have_no_dates() {
        let event = Event::new(
            "1",
            EventKind::Meeting,
            "Meeting",
            utc(2025, 3, 1, 9, 0, 0),
            utc(2025, 3, 1, 17, 0, 0),
        )
        .with_contribution(
            Contribution::new("10", "Talk")
                .with_dates(utc(2025, 3, 1, 9, 30, 0), utc(2025, 3, 1, 10, 0, 0))
                .with_subcontribution(Subcontribution::new("0", "Part one")),
        );
        let contribution = &event.contributions[0];
        let entry = ScheduleEntry::Subcontribution {
            event: &event,
            contribution,
            index: 0,
            subcontribution: &contribution.subcontributions[0],
        };

        let identifiers = DataIdentifiers::collect(&event, [&entry]);
        let sub_key = EntityKey(EntityKind::Subcontribution, "0".to_string());
        let (_, dates) = identifiers
            .dates
            .iter()
            .find(|(key, _)| *key == sub_key)
            .unwrap();
        assert_eq!(*dates, None);
    }

    #[test]
    fn keys_are_sorted_regardless_of_input_order() {
        let event = Event::new(
            "1",
            EventKind::Meeting,
            "Meeting",
            utc(2025, 3, 1, 9, 0, 0),
            utc(2025, 3, 1, 17, 0, 0),
        )
        .with_contribution(Contribution::new("20", "Later"))
        .with_contribution(Contribution::new("10", "Earlier"));

        let unsorted = entries(&event);
        let reversed: Vec<_> = unsorted.iter().rev().collect();
        let forward = DataIdentifiers::collect(&event, unsorted.iter());
        let backward = DataIdentifiers::collect(&event, reversed);

        assert_eq!(forward, backward);
        let keys: Vec<_> = forward.dates.iter().map(|(key, _)| key.clone()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn value_roundtrip() {
        let event = sample_event();
        let all = entries(&event);
        let identifiers = DataIdentifiers::collect(&event, all.iter());

        let value = identifiers.to_value().unwrap();
        let decoded = DataIdentifiers::from_value(value).unwrap();
        assert_eq!(identifiers, decoded);
    }

    #[test]
    fn serialized_shape() {
        let event = sample_event();
        let all = entries(&event);
        let identifiers = DataIdentifiers::collect(&event, all.iter());

        let json = serde_json::to_string(&identifiers).unwrap();
        insta::assert_snapshot!(
            json,
            @r#"{"dates":[[["event","1"],["2025-03-01T09:00:00+00:00","2025-03-01T17:00:00+00:00"]],[["contribution","10"],["2025-03-01T09:30:00+00:00","2025-03-01T10:00:00+00:00"]]],"locations":[[["event","1"],["CERN","500/1-001"]],[["contribution","10"],["CERN","500/1-001"]]]}"#
        );
    }

    #[test]
    fn duplicate_keys_collapse() {
        let event = Event::new(
            "1",
            EventKind::Meeting,
            "Meeting",
            utc(2025, 3, 1, 9, 0, 0),
            utc(2025, 3, 1, 17, 0, 0),
        )
        .with_contribution(Contribution::new("10", "Talk"));
        let all = entries(&event);
        let twice: Vec<_> = all.iter().chain(all.iter()).collect();

        let identifiers = DataIdentifiers::collect(&event, twice);
        // event plus one contribution
        assert_eq!(identifiers.dates.len(), 2);
    }
}
