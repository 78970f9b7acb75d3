// src/hours/mod.rs
pub mod format;
pub mod parse;
pub mod status;
pub mod store;
pub mod types;

pub use format::TimeFormat;
pub use status::StatusResolver;
pub use store::{ScheduleStore, WindowSource};
pub use types::{
    ChangeType, DaySchedule, EntityStatus, ParseOutcome, ParsedRange, RawScheduleEntry, ServiceWindow,
};
