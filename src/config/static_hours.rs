// src/config/static_hours.rs
//! Fallback hours used when live extraction yields nothing for an entity/day.
//!
//! Loaded once (builtin or JSON) and never mutated; share it behind an `Arc`.
//!
//! JSON shape, per entity either a daily list or a weekday map:
//! ```json
//! {
//!   "BruinPlate": [["Breakfast", "7:00 AM", "9:00 AM"], ["Dinner", "5:00 PM", "9:00 PM"]],
//!   "powell": { "mon": [["", "7:30 AM", "12:00 AM"]], "Saturday": [["", "9:00 AM", "6:00 PM"]] }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use chrono::Weekday;
use serde::Deserialize;

use crate::error::HoursError;
use crate::hours::types::RawScheduleEntry;

/// One `(label, start, end)` row of the table.
pub type StaticEntry = RawScheduleEntry;

#[derive(Clone, Debug, PartialEq, Eq)]
enum WeekSchedule {
    Daily(Vec<StaticEntry>),
    ByWeekday(HashMap<Weekday, Vec<StaticEntry>>),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticScheduleTable {
    entities: HashMap<String, WeekSchedule>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSchedule {
    Daily(Vec<(String, String, String)>),
    Weekly(BTreeMap<String, Vec<(String, String, String)>>),
}

// Campus defaults: same every day of the week.
const BUILTIN: &[(&str, &[(&str, &str, &str)])] = &[
    // Residential
    ("BruinCafe", &[("Breakfast", "7:00 AM", "10:00 AM"), ("Lunch", "11:00 AM", "4:00 PM"), ("Dinner", "5:00 PM", "9:00 PM")]),
    ("BruinPlate", &[("Breakfast", "7:00 AM", "9:00 AM"), ("Lunch", "11:00 AM", "2:00 PM"), ("Dinner", "5:00 PM", "9:00 PM")]),
    ("Cafe1919", &[("Lunch", "11:00 AM", "4:00 PM"), ("Dinner", "5:00 PM", "9:00 PM")]),
    ("DeNeveDining", &[("Breakfast", "7:00 AM", "10:00 AM"), ("Lunch", "11:00 AM", "2:00 PM"), ("Dinner", "5:00 PM", "9:00 PM")]),
    ("EpicuriaAtAckerman", &[("Lunch", "11:00 AM", "4:00 PM"), ("Dinner", "5:00 PM", "9:00 PM")]),
    ("EpicuriaAtCovel", &[("Lunch", "11:00 AM", "2:00 PM"), ("Dinner", "5:00 PM", "9:00 PM")]),
    ("FEASTAtRieber", &[("Lunch", "11:00 AM", "2:00 PM"), ("Dinner", "5:00 PM", "9:00 PM")]),
    ("Rendezvous", &[("Lunch", "11:00 AM", "3:00 PM"), ("Dinner", "5:00 PM", "9:00 PM")]),
    ("TheDrey", &[("Lunch", "11:00 AM", "3:00 PM"), ("Dinner", "5:00 PM", "9:00 PM")]),
    ("TheStudyAtHedrick", &[("Breakfast", "7:00 AM", "10:00 AM"), ("Lunch", "11:00 AM", "3:00 PM"), ("Dinner", "5:00 PM", "9:00 PM")]),
    // Campus retail
    ("LollicupFresh", &[("", "8:00 AM", "7:00 PM")]),
    ("WetzelsPretzels", &[("", "8:00 AM", "7:00 PM")]),
    ("Sweetspot", &[("", "8:00 AM", "6:00 PM")]),
    ("PandaExpress", &[("", "10:00 AM", "7:00 PM")]),
    ("Rubios", &[("", "10:00 AM", "7:00 PM")]),
    ("VeggieGrill", &[("", "10:00 AM", "8:00 PM")]),
    ("EpicuriaAck", &[("", "10:00 AM", "7:00 PM")]),
    ("CORE", &[("", "7:00 AM", "10:00 PM")]),
    ("JambaBlendid", &[("", "8:00 AM", "8:00 PM")]),
    ("KerckhoffCoffee", &[("", "7:00 AM", "9:00 PM")]),
    ("NorthernLights", &[("", "7:00 AM", "8:00 PM")]),
    ("Cafe451", &[("", "8:00 AM", "5:00 PM")]),
    ("LuValleCommons", &[("", "7:00 AM", "7:00 PM")]),
    ("CourtOfSciences", &[("", "7:00 AM", "7:00 PM")]),
    ("MusicCafe", &[("", "8:00 AM", "5:00 PM")]),
    ("SouthCampusFood", &[("", "7:00 AM", "3:00 PM")]),
    // Libraries
    ("powell", &[("Hours", "10:00", "16:00")]),
];

/// `mon`, `Monday`, `TUE`, … → `Weekday`.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let n = name.trim().to_ascii_lowercase();
    let day = match n.get(..3)? {
        "mon" => Weekday::Mon,
        "tue" => Weekday::Tue,
        "wed" => Weekday::Wed,
        "thu" => Weekday::Thu,
        "fri" => Weekday::Fri,
        "sat" => Weekday::Sat,
        "sun" => Weekday::Sun,
        _ => return None,
    };
    // Either the 3-letter form or the full name.
    let full = match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    };
    (n.len() == 3 || n == full).then_some(day)
}

fn to_entries(rows: Vec<(String, String, String)>) -> Vec<StaticEntry> {
    rows.into_iter()
        .map(|(label, start, end)| StaticEntry::new(label, start, end))
        .collect()
}

impl StaticScheduleTable {
    pub fn builtin() -> Self {
        let entities = BUILTIN
            .iter()
            .map(|(id, rows)| {
                let entries = rows
                    .iter()
                    .map(|&(label, start, end)| StaticEntry::new(label, start, end))
                    .collect();
                (s!(*id), WeekSchedule::Daily(entries))
            })
            .collect();
        Self { entities }
    }

    pub fn from_json(text: &str) -> Result<Self, HoursError> {
        let raw: BTreeMap<String, RawSchedule> = serde_json::from_str(text)?;
        let mut entities = HashMap::with_capacity(raw.len());

        for (entity, schedule) in raw {
            let week = match schedule {
                RawSchedule::Daily(rows) => WeekSchedule::Daily(to_entries(rows)),
                RawSchedule::Weekly(days) => {
                    let mut by_day = HashMap::with_capacity(days.len());
                    for (name, rows) in days {
                        let day = parse_weekday(&name).ok_or_else(|| HoursError::UnknownWeekday {
                            entity: entity.clone(),
                            name: name.clone(),
                        })?;
                        by_day.entry(day).or_insert_with(Vec::new).extend(to_entries(rows));
                    }
                    WeekSchedule::ByWeekday(by_day)
                }
            };
            entities.insert(entity, week);
        }

        logd!("static table loaded: {} entities", entities.len());
        Ok(Self { entities })
    }

    pub fn from_path(path: &Path) -> Result<Self, HoursError> {
        let text = fs::read_to_string(path)
            .map_err(|source| HoursError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }

    /// Rows for `entity_id` on `weekday`; `None` when the entity is unknown or
    /// has no row for that weekday.
    pub fn entries_for(&self, entity_id: &str, weekday: Weekday) -> Option<&[StaticEntry]> {
        match self.entities.get(entity_id)? {
            WeekSchedule::Daily(rows) => Some(rows.as_slice()),
            WeekSchedule::ByWeekday(days) => days.get(&weekday).map(Vec::as_slice),
        }
    }

    pub fn contains(&self, entity_id: &str) -> bool {
        self.entities.contains_key(entity_id)
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
