// src/config/options.rs
use serde::{Deserialize, Serialize};

use super::consts::DEFAULT_HORIZON_DAYS;
use crate::error::HoursError;
use crate::hours::format::TimeFormat;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    /// Days scanned forward for the next opening once today has nothing left.
    pub horizon_days: u32,
    /// Report back-to-back windows (end == next start) as `mealSwitch`
    /// instead of `close`.
    pub synthesize_meal_switch: bool,
    pub time_format: TimeFormat,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            synthesize_meal_switch: false,
            time_format: TimeFormat::H12,
        }
    }
}

impl EngineOptions {
    pub fn validate(self) -> Result<Self, HoursError> {
        if self.horizon_days == 0 {
            return Err(HoursError::InvalidHorizon);
        }
        Ok(self)
    }

    pub fn with_horizon(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    pub fn with_meal_switch(mut self, on: bool) -> Self {
        self.synthesize_meal_switch = on;
        self
    }
}
