//! Schedule entries: a tagged view over contributions and subcontributions.
//!
//! [`ScheduleEntry`] unifies the two entry types for ordering, capability
//! annotation and identifier generation. Entries carry a reference to their
//! event so location and room fall back through the owner chain.

use chrono::{DateTime, Utc};

use crate::model::{Contribution, Event, HasDateRange, HasLocation, HasRoom, Subcontribution};

/// A single entry in an event's schedule.
#[derive(Debug, Clone, Copy)]
pub enum ScheduleEntry<'a> {
    /// A top-level contribution.
    Contribution {
        event: &'a Event,
        contribution: &'a Contribution,
    },
    /// A subcontribution, with its position within the parent contribution.
    Subcontribution {
        event: &'a Event,
        contribution: &'a Contribution,
        index: usize,
        subcontribution: &'a Subcontribution,
    },
}

impl<'a> ScheduleEntry<'a> {
    /// The contribution this entry belongs to (itself, or the parent for
    /// subcontributions).
    pub fn contribution(&self) -> &'a Contribution {
        match self {
            Self::Contribution { contribution, .. }
            | Self::Subcontribution { contribution, .. } => contribution,
        }
    }

    /// The event this entry belongs to.
    pub fn event(&self) -> &'a Event {
        match self {
            Self::Contribution { event, .. } | Self::Subcontribution { event, .. } => event,
        }
    }

    /// The entry's own title.
    pub fn title(&self) -> &'a str {
        match self {
            Self::Contribution { contribution, .. } => &contribution.title,
            Self::Subcontribution {
                subcontribution, ..
            } => &subcontribution.title,
        }
    }

    /// The entry's own identifier (the subcontribution id for
    /// subcontributions, not the composite id).
    pub fn entity_id(&self) -> &'a str {
        match self {
            Self::Contribution { contribution, .. } => &contribution.id,
            Self::Subcontribution {
                subcontribution, ..
            } => &subcontribution.id,
        }
    }

    /// Returns true for subcontribution entries.
    pub fn is_subcontribution(&self) -> bool {
        matches!(self, Self::Subcontribution { .. })
    }

    /// The position within the parent contribution, for subcontributions.
    pub fn subcontribution_index(&self) -> Option<usize> {
        match self {
            Self::Contribution { .. } => None,
            Self::Subcontribution { index, .. } => Some(*index),
        }
    }

    /// The start date governing this entry's position in the schedule.
    /// Subcontributions use their parent contribution's start date.
    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.contribution().start_date
    }

    /// The key realizing the total order over schedule entries:
    /// (start date, contribution id, is-subcontribution, subcontribution
    /// index, title). Ids compare lexicographically.
    pub fn sort_key(&self) -> (Option<DateTime<Utc>>, &'a str, bool, Option<usize>, &'a str) {
        (
            self.start_date(),
            &self.contribution().id,
            self.is_subcontribution(),
            self.subcontribution_index(),
            self.title(),
        )
    }

    /// The composite identifier recorded on requests: `"<contrib>"` for
    /// contributions, `"<contrib>-<sub>"` for subcontributions.
    pub fn composite_id(&self) -> String {
        match self {
            Self::Contribution { contribution, .. } => contribution.id.clone(),
            Self::Subcontribution {
                contribution,
                subcontribution,
                ..
            } => format!("{}-{}", contribution.id, subcontribution.id),
        }
    }
}

impl HasDateRange for ScheduleEntry<'_> {
    fn date_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self {
            Self::Contribution { contribution, .. } => {
                contribution.start_date.zip(contribution.end_date)
            }
            // subcontributions don't have dates
            Self::Subcontribution { .. } => None,
        }
    }
}

impl HasLocation for ScheduleEntry<'_> {
    fn location_name(&self) -> Option<&str> {
        self.contribution().effective_location(self.event())
    }
}

impl HasRoom for ScheduleEntry<'_> {
    fn room_name(&self) -> Option<&str> {
        self.contribution().effective_room(self.event())
    }
}

/// Splits a composite contribution identifier back into its parts.
///
/// Returns the contribution id and, for subcontributions, the
/// subcontribution id.
pub fn split_composite_id(id: &str) -> (&str, Option<&str>) {
    match id.split_once('-') {
        Some((contribution, subcontribution)) => (contribution, Some(subcontribution)),
        None => (id, None),
    }
}
