//! Core types for matchcal: subjects, event drafts, identity maps,
//! freshness checks and sale-window extraction.

pub mod draft;
pub mod freshness;
pub mod identity_map;
pub mod sale_window;
pub mod storage;
pub mod subject;
pub mod tracing;

pub use draft::{
    DraftTime, EventDraft, LOCATION_TBD, ReminderMethod, ReminderOverride, Reminders,
};
pub use freshness::{DEFAULT_FRESHNESS_DAYS, freshness_window, is_fresh};
pub use identity_map::IdentityMap;
pub use sale_window::extract_sale_start;
pub use storage::{StorageError, StorageResult, read_json, remove_if_exists, write_json_pretty};
pub use subject::{Subject, SubjectId};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
