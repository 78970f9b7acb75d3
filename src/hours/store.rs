// src/hours/store.rs
//! Per-entity, per-day service windows.
//!
//! Lookup order for `(entity, day)`:
//! 1. entries extracted for that date, if any were ingested;
//! 2. the static table for that weekday;
//! 3. nothing, i.e. closed all day.
//!
//! Extracted rows labeled `"Closed"` or reading as closed add no window.
//! If every extracted row fails to parse (and none said closed) the extraction
//! is treated as unusable and the static table is consulted instead.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use super::parse;
use super::types::{DaySchedule, ParseOutcome, RawScheduleEntry, ServiceWindow};
use crate::config::StaticScheduleTable;
use crate::config::consts::CLOSED_TEXT;
use crate::normalize::{self, EntityMatcher};
use crate::specs::Extraction;

/// Anything that can answer "which windows does this entity have on this day".
pub trait WindowSource {
    fn windows_for(&self, entity_id: &str, day: NaiveDate) -> DaySchedule;
}

#[derive(Clone, Debug, Default)]
pub struct ScheduleStore {
    table: Arc<StaticScheduleTable>,
    extracted: HashMap<NaiveDate, HashMap<String, Vec<RawScheduleEntry>>>,
}

impl ScheduleStore {
    pub fn new(table: Arc<StaticScheduleTable>) -> Self {
        Self { table, extracted: HashMap::new() }
    }

    pub fn table(&self) -> &StaticScheduleTable {
        &self.table
    }

    /// Store id-keyed rows for `day`. An id already present is replaced, so a
    /// refreshed page supersedes the earlier fetch; ids not in `by_id` keep theirs.
    pub fn insert_extraction(&mut self, day: NaiveDate, by_id: HashMap<String, Vec<RawScheduleEntry>>) {
        let slot = self.extracted.entry(day).or_default();
        for (id, rows) in by_id {
            slot.insert(id, rows);
        }
    }

    /// Join a page extraction to entity ids and keep it. Returns how many
    /// entities it covered.
    pub fn ingest(&mut self, extraction: &Extraction, matcher: &dyn EntityMatcher) -> usize {
        let by_id = normalize::join(&extraction.entries, matcher);
        let n = by_id.len();
        logd!("ingest {}: {} of {} keys matched", extraction.day, n, extraction.entries.len());
        self.insert_extraction(extraction.day, by_id);
        n
    }

    pub fn extracted(&self, entity_id: &str, day: NaiveDate) -> Option<&[RawScheduleEntry]> {
        self.extracted.get(&day)?.get(entity_id).map(Vec::as_slice)
    }

    /// Entity ids seen in extractions or in the static table.
    pub fn entity_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .table
            .entity_ids()
            .map(String::from)
            .chain(self.extracted.values().flat_map(|m| m.keys().cloned()))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

/// Windows read from `rows`, or `None` when the rows are unusable (all
/// unparseable and none closed).
fn windows_from(entity_id: &str, day: NaiveDate, rows: &[RawScheduleEntry]) -> Option<Vec<ServiceWindow>> {
    let mut windows = Vec::with_capacity(rows.len());
    let mut closed = 0usize;
    let mut failed = 0usize;

    for row in rows {
        if row.label.eq_ignore_ascii_case(CLOSED_TEXT) {
            closed += 1;
            continue;
        }
        match parse::parse(&row.range_text()) {
            ParseOutcome::Range(r) => {
                let (start, end) = r.anchor(day);
                let label = (!row.label.is_empty()).then(|| row.label.clone());
                windows.push(ServiceWindow::new(start, end, label));
            }
            ParseOutcome::Closed => closed += 1,
            ParseOutcome::Failure => {
                failed += 1;
                logd!("{entity_id} {day}: unreadable hours {:?}", row.range_text());
            }
        }
    }

    if windows.is_empty() && closed == 0 && failed > 0 {
        return None;
    }
    windows.sort_by_key(|w| w.start);
    Some(windows)
}

impl WindowSource for ScheduleStore {
    fn windows_for(&self, entity_id: &str, day: NaiveDate) -> DaySchedule {
        let from_page = self
            .extracted(entity_id, day)
            .filter(|rows| !rows.is_empty())
            .and_then(|rows| {
                let w = windows_from(entity_id, day, rows);
                if w.is_none() {
                    logd!("{entity_id} {day}: extracted hours unusable, using static table");
                }
                w
            });

        let windows = from_page
            .or_else(|| {
                self.table
                    .entries_for(entity_id, day.weekday())
                    .and_then(|rows| windows_from(entity_id, day, rows))
            })
            .unwrap_or_default();

        DaySchedule { entity_id: s!(entity_id), date: day, windows }
    }
}
