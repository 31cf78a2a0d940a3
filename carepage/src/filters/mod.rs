pub mod planning;
pub mod service;

pub use planning::{PlanningFilter, is_date_in_future};
pub use service::{
    ALL_SERVICES, CardFilter, NoteFilter, SERVICE_SELECT_ID, attach_service_filters,
    service_matches,
};
