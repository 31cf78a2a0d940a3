pub mod form;
pub mod notice;
pub mod popup;
pub mod select;
pub mod toggle;

pub use form::{FormFields, collect_fields, reset_fields};
pub use notice::{Notice, NoticeKind, NoticeTiming};
pub use popup::{LoadOutcome, PdfFrame, Popup, RequestToken};
pub use select::{FilterableSelect, SelectConfig, SelectOption, SelectState};
pub use toggle::{PaneSwitch, ViewToggle};
