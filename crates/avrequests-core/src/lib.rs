//! Core types for audiovisual request handling: the domain model, settings,
//! the contribution/room correlator and change-detection identifiers.

pub mod correlator;
pub mod identifiers;
pub mod model;
pub mod request;
pub mod schedule;
pub mod settings;
pub mod tracing;

pub use correlator::{AnnotatedEntry, Correlator};
pub use identifiers::{DataIdentifiers, EntityKey, EntityKind};
pub use model::{
    Contribution, Event, EventKind, HasDateRange, HasLocation, HasRoom, Room, RoomDirectory,
    Subcontribution, WEBCAST_RECORDING,
};
pub use request::{AvRequest, service_label};
pub use schedule::{ScheduleEntry, split_composite_id};
pub use settings::{AvSettings, Principal, User};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
