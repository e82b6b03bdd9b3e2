use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::DateRange;

/// Contrat abstrait : jour → nom de fête éventuel.
///
/// Le cœur de la planification ne dépend que de ce trait ; la source
/// concrète (table fixe, calendrier religieux, API) reste externe.
pub trait HolidayLookup {
    fn holiday_name(&self, date: NaiveDate) -> Option<&str>;
}

/// Entrée d'un fichier de jours fériés (intervalle inclusif).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Table de jours fériés matérialisée jour par jour.
#[derive(Debug, Clone, Default)]
pub struct HolidayTable {
    days: BTreeMap<NaiveDate, String>,
}

impl HolidayTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_day<S: Into<String>>(&mut self, date: NaiveDate, name: S) {
        self.days.insert(date, name.into());
    }

    pub fn insert_range(&mut self, dates: DateRange, name: &str) {
        let mut current = dates.start;
        while current <= dates.end {
            self.days.insert(current, name.to_owned());
            let Some(next) = current.succ_opt() else { break };
            current = next;
        }
    }

    pub fn from_entries(entries: &[HolidayEntry]) -> Result<Self> {
        let mut table = Self::new();
        for entry in entries {
            let dates = DateRange::new(entry.start, entry.end)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("holiday entry {}", entry.name))?;
            table.insert_range(dates, &entry.name);
        }
        Ok(table)
    }

    /// Charge un fichier JSON `[{name, start, end}, ...]`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let entries: Vec<HolidayEntry> = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", path.display()))?;
        Self::from_entries(&entries)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }
}

impl HolidayLookup for HolidayTable {
    fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.days.get(&date).map(String::as_str)
    }
}

/// Calendrier sans aucune fête.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHolidays;

impl HolidayLookup for NoHolidays {
    fn holiday_name(&self, _date: NaiveDate) -> Option<&str> {
        None
    }
}
