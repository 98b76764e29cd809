//! One service per entity family.
//!
//! Every call runs validation, mapping and the repository in that order.
//! A validation failure is returned as is; past validation the repository
//! outcome is forwarded with only its value mapped to the response shape.

pub mod event;
pub mod event_attendance;
pub mod maintenance;
pub mod photo;
pub mod user;

pub use event::EventService;
pub use event_attendance::EventAttendanceService;
pub use maintenance::MaintenanceService;
pub use photo::PhotoService;
pub use user::UserService;
