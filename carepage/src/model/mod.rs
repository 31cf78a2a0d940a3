//! Payloads exchanged with the backend.

pub mod note;
pub mod resident;
pub mod stool;

pub use note::{NoteStatus, restyle_note};
pub use resident::{ResidentSummary, RowRequest};
pub use stool::{StoolEntry, StoolSheet, TimeSlot, collect_stool_sheet, slot_select_id};
