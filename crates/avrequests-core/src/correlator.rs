//! The contribution/room correlator.
//!
//! Given an event, [`Correlator`] produces a deterministic, capability-
//! annotated list of its contributions and derives the change-detection
//! snapshot for a request. Capability means: the entry's location is the
//! configured reference location and its room is in the AV-capable room set.

use std::collections::HashSet;

use tracing::debug;

use crate::identifiers::DataIdentifiers;
use crate::model::{Event, HasLocation, HasRoom, RoomDirectory};
use crate::request::AvRequest;
use crate::schedule::ScheduleEntry;
use crate::settings::AvSettings;

/// A schedule entry annotated with its AV capability and, when it deviates
/// from the event's default, its room name.
#[derive(Debug, Clone)]
pub struct AnnotatedEntry<'a> {
    pub entry: ScheduleEntry<'a>,
    /// Whether the entry takes place in an AV-capable room.
    pub capable: bool,
    /// The entry's room name, only when it differs from the event's room.
    pub custom_room: Option<String>,
}

/// Correlates event contributions with room AV capabilities.
pub struct Correlator<'s> {
    settings: &'s AvSettings,
    capable_rooms: HashSet<String>,
}

impl<'s> Correlator<'s> {
    /// Creates a correlator, resolving the AV-capable room set from the
    /// directory once.
    pub fn new(settings: &'s AvSettings, directory: &RoomDirectory) -> Self {
        let capable_rooms: HashSet<String> = directory
            .av_capable_rooms(&settings.reference_location)
            .into_iter()
            .map(|room| room.name.clone())
            .collect();
        debug!(
            location = %settings.reference_location,
            rooms = capable_rooms.len(),
            "Resolved AV-capable rooms"
        );
        Self {
            settings,
            capable_rooms,
        }
    }

    /// The names of the AV-capable rooms in the reference location.
    pub fn capable_rooms(&self) -> &HashSet<String> {
        &self.capable_rooms
    }

    /// Returns the event's non-poster contributions, annotated and ordered.
    ///
    /// Subcontributions of the remaining contributions are appended when the
    /// `allow_subcontributions` setting is enabled; the combined list is then
    /// sorted by (start date, contribution id, is-subcontribution,
    /// subcontribution index, title).
    pub fn contributions<'e>(&self, event: &'e Event) -> Vec<AnnotatedEntry<'e>> {
        let filtered: Vec<_> = event
            .contributions
            .iter()
            .filter(|contribution| !contribution.is_poster)
            .collect();

        let mut entries: Vec<ScheduleEntry<'e>> = filtered
            .iter()
            .map(|&contribution| ScheduleEntry::Contribution {
                event,
                contribution,
            })
            .collect();

        if self.settings.allow_subcontributions {
            for &contribution in &filtered {
                for (index, subcontribution) in contribution.subcontributions.iter().enumerate() {
                    entries.push(ScheduleEntry::Subcontribution {
                        event,
                        contribution,
                        index,
                        subcontribution,
                    });
                }
            }
        }

        entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let event_room = event.room.as_deref();
        entries
            .into_iter()
            .map(|entry| {
                let capable = entry.location_name()
                    == Some(self.settings.reference_location.as_str())
                    && entry
                        .room_name()
                        .is_some_and(|room| self.capable_rooms.contains(room));
                let custom_room = entry
                    .room_name()
                    .filter(|&room| Some(room) != event_room)
                    .map(str::to_string);
                AnnotatedEntry {
                    entry,
                    capable,
                    custom_room,
                }
            })
            .collect()
    }

    /// Returns the contributions covered by a request.
    ///
    /// Simple events have no contributions to select from. Otherwise the
    /// full annotated list is filtered by the request's composite ids unless
    /// the request covers all contributions.
    pub fn selected_contributions<'e>(
        &self,
        request: &AvRequest,
        event: &'e Event,
    ) -> Vec<AnnotatedEntry<'e>> {
        if event.kind.is_simple() {
            return Vec::new();
        }
        let mut entries = self.contributions(event);
        if !request.all_contributions {
            entries.retain(|annotated| {
                request.contributions.contains(&annotated.entry.composite_id())
            });
        }
        entries
    }

    /// Checks if the event has any contributions in AV-capable rooms.
    ///
    /// A simple event is its own single contribution, so only the event's
    /// room is checked.
    pub fn has_capable_contributions(&self, event: &Event) -> bool {
        if event.kind.is_simple() {
            event
                .room
                .as_deref()
                .is_some_and(|room| self.capable_rooms.contains(room))
        } else {
            self.contributions(event)
                .iter()
                .any(|annotated| annotated.capable)
        }
    }

    /// Checks if the event has any contributions at all. A simple event
    /// always counts as having one implicit contribution.
    pub fn has_any_contributions(&self, event: &Event) -> bool {
        event.kind.is_simple() || !self.contributions(event).is_empty()
    }

    /// Builds the change-detection snapshot for a request: the event plus
    /// its selected contributions.
    pub fn data_identifiers(&self, request: &AvRequest, event: &Event) -> DataIdentifiers {
        let selected = self.selected_contributions(request, event);
        DataIdentifiers::collect(event, selected.iter().map(|annotated| &annotated.entry))
    }
}
