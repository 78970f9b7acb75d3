// src/specs/mod.rs
//! # Hours page readers
//!
//! Each submodule knows **one page shape** and where the hours live in it.
//! Readers take already-fetched markup and hand back pre-parse
//! [`RawScheduleEntry`] rows keyed by normalized entity name.
//!
//! ## What lives here
//! - Shape detection (tabular dining grid vs. per-location blocks).
//! - Row/column selection, "no hours" marks, label assignment.
//!
//! ## What does **not** live here
//! - Fetching. Callers bring the markup.
//! - Time parsing, fallback to static hours, status. See `hours::*`.
//! - Mapping keys to entity ids. See `normalize::join`.
//!
//! ## Conventions
//! - Malformed markup never panics; the worst case is an empty [`Extraction`].
//! - Keys come from [`normalize_key`](crate::normalize::normalize_key) and
//!   never from configuration.
//! - Rows for the same key append in document order.
//!
//! ```text
//! markup ─ detect_shape ─┬─ dining::extract   (tabular)
//!                        └─ library::extract  (location blocks)
//!          → Extraction { day, entries: key → [RawScheduleEntry] }
//!          → normalize::join → ScheduleStore
//! ```
pub mod dining;
pub mod library;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::consts::LIBRARY_BLOCK_MARKER;
use crate::hours::types::RawScheduleEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkupShape {
    /// One row per entity, one column per meal period.
    Tabular,
    /// Marked location rows, each followed by sub-service rows.
    LocationBlock,
}

/// Everything one page said about one calendar day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extraction {
    pub day: NaiveDate,
    pub shape: Option<MarkupShape>,
    pub entries: BTreeMap<String, Vec<RawScheduleEntry>>,
}

impl Extraction {
    pub fn empty(day: NaiveDate) -> Self {
        Self { day, shape: None, entries: BTreeMap::new() }
    }

    pub fn get(&self, key: &str) -> Option<&[RawScheduleEntry]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One entry per comma-separated range in a cell, all under `label`.
/// A cell with no ranges still yields its single (empty or closed) entry.
pub(crate) fn split_cell(label: &str, text: &str) -> Vec<RawScheduleEntry> {
    let parts: Vec<RawScheduleEntry> = text
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| RawScheduleEntry::from_cell(label, part))
        .collect();
    if parts.is_empty() { vec![RawScheduleEntry::from_cell(label, text)] } else { parts }
}

/// Location-block pages carry a distinctive class marker; anything else with
/// table rows is read as the tabular grid.
pub fn detect_shape(markup: &str) -> Option<MarkupShape> {
    let lower = markup.to_ascii_lowercase();
    if lower.contains(LIBRARY_BLOCK_MARKER) {
        Some(MarkupShape::LocationBlock)
    } else if lower.contains("<tr") {
        Some(MarkupShape::Tabular)
    } else {
        None
    }
}

/// Read hours for `day` out of `markup`, whatever its shape.
pub fn extract(markup: &str, day: NaiveDate) -> Extraction {
    let Some(shape) = detect_shape(markup) else {
        logd!("no recognizable hours layout ({} bytes)", markup.len());
        return Extraction::empty(day);
    };

    let entries = match shape {
        MarkupShape::Tabular => dining::extract(markup),
        MarkupShape::LocationBlock => library::extract(markup, day),
    };
    logd!("{shape:?} page for {day}: {} keys", entries.len());

    Extraction { day, shape: Some(shape), entries }
}
