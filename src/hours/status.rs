// src/hours/status.rs
//! "Open now?" and "what changes next?" for one entity at one instant.
//!
//! Windows considered for `now`:
//! - yesterday's windows that run past midnight into today, then
//! - today's windows, in start order.
//!
//! The first window containing `now` is active (open until its end). With no
//! active window the next start today is the next opening; failing that the
//! following days are scanned, up to the configured horizon. An exhausted
//! horizon is a valid answer: closed, no known reopening.

use chrono::{Days, NaiveDateTime, NaiveTime};

use super::store::WindowSource;
use super::types::{ChangeType, EntityStatus, ServiceWindow};
use crate::config::EngineOptions;

pub struct StatusResolver<S> {
    source: S,
    options: EngineOptions,
}

impl<S: WindowSource> StatusResolver<S> {
    pub fn new(source: S, options: EngineOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn status_now(&self, entity_id: &str, now: NaiveDateTime) -> EntityStatus {
        let windows = self.candidates(entity_id, now);

        if let Some(i) = windows.iter().position(|w| w.contains(now)) {
            let active = &windows[i];
            let switch = self.options.synthesize_meal_switch
                && windows[i + 1..].iter().any(|w| w.start == active.end);
            return EntityStatus {
                entity_id: s!(entity_id),
                open_now: true,
                current_label: active.label.clone(),
                next_change_at: Some(active.end),
                next_change_type: Some(if switch { ChangeType::MealSwitch } else { ChangeType::Close }),
            };
        }

        if let Some(next) = windows.iter().find(|w| w.start > now) {
            return opens_at(entity_id, next.start);
        }

        match self.next_opening_after(entity_id, now) {
            Some(at) => opens_at(entity_id, at),
            None => {
                logf!("{entity_id}: no opening within {} days of {now}", self.options.horizon_days);
                EntityStatus::closed_indefinitely(entity_id)
            }
        }
    }

    /// Statuses in the order of `ids`.
    pub fn status_all<I, T>(&self, ids: I, now: NaiveDateTime) -> Vec<EntityStatus>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        ids.into_iter().map(|id| self.status_now(id.as_ref(), now)).collect()
    }

    /// Carried-over windows from yesterday followed by today's, start order.
    fn candidates(&self, entity_id: &str, now: NaiveDateTime) -> Vec<ServiceWindow> {
        let today = now.date();
        let midnight = today.and_time(NaiveTime::MIN);

        let mut windows: Vec<ServiceWindow> = today
            .checked_sub_days(Days::new(1))
            .map(|yesterday| self.source.windows_for(entity_id, yesterday).windows)
            .unwrap_or_default()
            .into_iter()
            .filter(|w| w.end > midnight)
            .collect();
        windows.extend(self.source.windows_for(entity_id, today).windows);
        windows.sort_by_key(|w| w.start);
        windows
    }

    /// First window start on the days after `now`'s, scanning day by day.
    fn next_opening_after(&self, entity_id: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let today = now.date();
        (1..=u64::from(self.options.horizon_days))
            .filter_map(|n| today.checked_add_days(Days::new(n)))
            .find_map(|day| {
                self.source
                    .windows_for(entity_id, day)
                    .windows
                    .iter()
                    .map(|w| w.start)
                    .find(|start| *start > now)
            })
    }
}

fn opens_at(entity_id: &str, at: NaiveDateTime) -> EntityStatus {
    EntityStatus {
        entity_id: s!(entity_id),
        open_now: false,
        current_label: None,
        next_change_at: Some(at),
        next_change_type: Some(ChangeType::Open),
    }
}
