pub mod event;
pub mod event_attendance;
pub mod location;
pub mod photo;
pub mod role;
pub mod status;
pub mod user;

pub use event::{Event, EventPatch};
pub use event_attendance::EventAttendance;
pub use location::Location;
pub use photo::Photo;
pub use role::Role;
pub use status::EventStatus;
pub use user::{User, UserPatch};

/// Marker for store-backed rows.
pub trait Entity {}

impl Entity for Event {}
impl Entity for EventAttendance {}
impl Entity for Location {}
impl Entity for Photo {}
impl Entity for Role {}
impl Entity for EventStatus {}
impl Entity for User {}
