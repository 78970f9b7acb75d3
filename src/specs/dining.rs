// src/specs/dining.rs
//! Reader for the tabular dining grid.
//!
//! Layout:
//! - One `<tr>` per dining location; the name is in the first cell, or the
//!   second when the row opens with an icon cell (6+ cells).
//! - The following cells are meal periods in fixed order: Breakfast, Lunch,
//!   Dinner, and Late Night on the wide layout.
//! - A cell holds `"7:00 AM - 10:00 AM"`, `"Closed"`, or nothing. Split
//!   service within one meal is comma-separated and gives one entry per range.
//!
//! Rows with fewer than four cells are navigation or captions and are skipped,
//! as are heading rows (all `<th>`, or meal names in place of hours).
//! The page shows a single day, so entries are not date-qualified here.

use std::collections::BTreeMap;

use crate::config::consts::{MEAL_COLUMNS, TABULAR_ICON_CELLS, TABULAR_MIN_CELLS};
use crate::core::html::{self, Cell};
use crate::hours::types::RawScheduleEntry;
use crate::normalize::normalize_key;

pub fn extract(markup: &str) -> BTreeMap<String, Vec<RawScheduleEntry>> {
    let mut out: BTreeMap<String, Vec<RawScheduleEntry>> = BTreeMap::new();

    for row in html::find_all_blocks(markup, "tr") {
        let cells = html::cells(row.inner);
        if cells.iter().all(|c| c.header) {
            continue;
        }
        let Some((name, meals)) = split_row(&cells) else { continue };
        if is_heading(meals) {
            continue;
        }

        let key = normalize_key(name);
        if key.is_empty() {
            continue;
        }

        let entries = meals
            .iter()
            .zip(MEAL_COLUMNS)
            .flat_map(|(cell, label)| super::split_cell(label, &cell.text));
        out.entry(key).or_default().extend(entries);
    }

    out
}

/// `(name, meal cells)`, or `None` for rows too short to be data.
fn split_row(cells: &[Cell]) -> Option<(&str, &[Cell])> {
    if cells.len() < TABULAR_MIN_CELLS {
        return None;
    }
    let (name_at, meals) = if cells.len() >= TABULAR_ICON_CELLS {
        (1, MEAL_COLUMNS.len())
    } else {
        (0, MEAL_COLUMNS.len() - 1)
    };
    let first = name_at + 1;
    let last = (first + meals).min(cells.len());
    Some((cells[name_at].text.as_str(), &cells[first..last]))
}

fn is_heading(meals: &[Cell]) -> bool {
    meals
        .first()
        .is_some_and(|c| MEAL_COLUMNS.iter().any(|m| c.text.eq_ignore_ascii_case(m)))
}
