//! In-game calendar
//!
//! Game time runs much faster than wall time: with the default scale one real
//! second advances the calendar by one month.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Maps elapsed game milliseconds onto a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimCalendar {
    pub start: DateTime<Utc>,
    /// Calendar milliseconds per elapsed millisecond
    pub time_scale: f64,
}

impl SimCalendar {
    pub fn new(start: DateTime<Utc>, time_scale: f64) -> Self {
        Self { start, time_scale }
    }

    /// Calendar starting now
    pub fn starting_now(time_scale: f64) -> Self {
        Self::new(Utc::now(), time_scale)
    }

    /// Date reached after `elapsed_ms` of game time (saturates at chrono's range)
    pub fn date_at(&self, elapsed_ms: f64) -> DateTime<Utc> {
        let offset = elapsed_ms * self.time_scale;
        let saturated = if offset.is_sign_negative() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        };
        if !offset.is_finite() || offset.abs() >= i64::MAX as f64 {
            return saturated;
        }
        TimeDelta::try_milliseconds(offset as i64)
            .and_then(|delta| self.start.checked_add_signed(delta))
            .unwrap_or(saturated)
    }

    /// `date_at` rendered as `YYYY-MM-DD`
    pub fn label_at(&self, elapsed_ms: f64) -> String {
        format_date(self.date_at(elapsed_ms))
    }
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
