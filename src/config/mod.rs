// src/config/mod.rs

pub mod catalog;
pub mod consts;
pub mod options;
pub mod static_hours;

pub use catalog::{Catalog, Entity, EntityKind};
pub use options::EngineOptions;
pub use static_hours::{StaticEntry, StaticScheduleTable};
