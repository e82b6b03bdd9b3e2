use chrono::NaiveDate;

use super::types::ScheduleConfig;
use crate::calendar::HolidayLookup;
use crate::model::{DateRange, Shift, ShiftType};

/// Découpe l'intervalle demandé en créneaux contigus, sans trou ni
/// chevauchement : fériés (veille comprise), week-ends fusionnés,
/// jours ouvrés à l'unité.
pub fn build_shifts(
    range: &DateRange,
    holidays: &dyn HolidayLookup,
    config: &ScheduleConfig,
) -> Vec<Shift> {
    let mut shifts = Vec::new();
    let mut current = range.start;

    loop {
        let shift = if let Some(name) = effective_holiday_name(current, holidays) {
            build_holiday_shift(current, &name, range.end, holidays, config)
        } else if config.is_weekend(current) {
            build_weekend_shift(current, range.end, config)
        } else {
            build_workday_shift(current, config)
        };

        let last_covered = shift.dates.end;
        shifts.push(shift);

        match last_covered.succ_opt() {
            Some(next) if next <= range.end => current = next,
            _ => break,
        }
    }

    shifts
}

/// Veille de fête : le jour n'est pas férié mais le lendemain l'est.
fn is_holiday_eve(date: NaiveDate, holidays: &dyn HolidayLookup) -> bool {
    if holidays.holiday_name(date).is_some() {
        return false;
    }
    date.succ_opt()
        .map(|next| holidays.holiday_name(next).is_some())
        .unwrap_or(false)
}

/// Nom de fête effectif : celui du jour, ou celui du lendemain si le
/// jour est une veille.
fn effective_holiday_name(date: NaiveDate, holidays: &dyn HolidayLookup) -> Option<String> {
    if is_holiday_eve(date, holidays) {
        return date
            .succ_opt()
            .and_then(|next| holidays.holiday_name(next))
            .map(str::to_owned);
    }
    holidays.holiday_name(date).map(str::to_owned)
}

fn build_holiday_shift(
    start: NaiveDate,
    name: &str,
    range_end: NaiveDate,
    holidays: &dyn HolidayLookup,
    config: &ScheduleConfig,
) -> Shift {
    let mut end = start;
    while let Some(next) = end.succ_opt() {
        if next > range_end
            || effective_holiday_name(next, holidays).is_none()
            || is_holiday_eve(next, holidays)
        {
            break;
        }
        end = next;
    }
    Shift::unassigned(
        DateRange { start, end },
        ShiftType::Holiday,
        format!("{} Holiday shift - {}", config.title_prefix, name),
    )
}

fn build_weekend_shift(start: NaiveDate, range_end: NaiveDate, config: &ScheduleConfig) -> Shift {
    let mut end = start;
    while let Some(next) = end.succ_opt() {
        if next > range_end || !config.is_weekend(next) {
            break;
        }
        end = next;
    }
    Shift::unassigned(
        DateRange { start, end },
        ShiftType::Weekend,
        format!("{} Weekend shift", config.title_prefix),
    )
}

fn build_workday_shift(date: NaiveDate, config: &ScheduleConfig) -> Shift {
    Shift::unassigned(
        DateRange {
            start: date,
            end: date,
        },
        ShiftType::Workday,
        format!("{} Workday shift", config.title_prefix),
    )
}
