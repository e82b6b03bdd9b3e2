use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

use crate::model::{JusticeRecord, Shift, ShiftType};

/// Réglages de la planification.
///
/// Les espacements sont exprimés en nombre de créneaux intermédiaires
/// (même catégorie pour `min_space_*`, toutes catégories pour
/// `min_space_any`).
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub weekend_days: Vec<Weekday>,
    pub title_prefix: String,
    pub min_space_workday: u32,
    pub min_space_weekend: u32,
    pub min_space_holiday: u32,
    pub min_space_any: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            weekend_days: vec![Weekday::Thu, Weekday::Fri, Weekday::Sat],
            title_prefix: "[permanence]".to_string(),
            min_space_workday: 5,
            min_space_weekend: 2,
            min_space_holiday: 0,
            min_space_any: 2,
        }
    }
}

impl ScheduleConfig {
    pub fn min_space_for(&self, shift_type: ShiftType) -> u32 {
        match shift_type {
            ShiftType::Workday => self.min_space_workday,
            ShiftType::Weekend => self.min_space_weekend,
            ShiftType::Holiday => self.min_space_holiday,
        }
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days.contains(&date.weekday())
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("people pool is empty")]
    EmptyPool,
    #[error("cannot distribute {days} {shift_type} day(s): total weight is zero")]
    ZeroWeight { shift_type: ShiftType, days: i64 },
    #[error("unknown person in {context}: {name}")]
    UnknownPerson { context: &'static str, name: String },
    #[error("invalid date range: {start} to {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("no eligible candidate pair for shift '{}'", .shift.title)]
    Infeasible {
        shift: Box<Shift>,
        ledger: Vec<JusticeRecord>,
    },
}
