// src/lib.rs
//! Campus hours: read hours pages and static tables into per-day service
//! windows, then answer "open now?" and "what changes next?".

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod hours;
pub mod log;
pub mod normalize;
pub mod specs;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{Catalog, EngineOptions, StaticScheduleTable};
pub use error::HoursError;
pub use hours::{
    ChangeType, DaySchedule, EntityStatus, ParseOutcome, ParsedRange, RawScheduleEntry, ScheduleStore,
    ServiceWindow, StatusResolver, TimeFormat, WindowSource,
};
pub use normalize::{CatalogMatcher, EntityMatcher, normalize_key};
pub use specs::{Extraction, MarkupShape, extract};
