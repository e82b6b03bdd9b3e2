mod assign;
mod ledger;
mod segment;
mod types;

pub use ledger::FairnessLedger;
pub use segment::build_shifts;
pub use types::{SchedError, ScheduleConfig};

use tracing::info;

use crate::calendar::HolidayLookup;
use crate::model::{DateRange, Person, Schedule, Shift, ShiftType, Unavailability};

/// Scheduler : encapsule une période de garde en cours de planification.
///
/// Strictement séquentiel : chaque décision dépend des créneaux déjà
/// engagés (espacements), la passe n'est pas parallélisable.
#[derive(Debug)]
pub struct Scheduler {
    config: ScheduleConfig,
    people: Vec<Person>,
    ledger: FairnessLedger,
    shifts: Vec<Shift>,
    previous_shifts: Vec<Shift>,
}

impl Scheduler {
    /// Construit la liste des créneaux pour la période et valide les
    /// entrées : pool non vide, intervalles bien formés, historique et
    /// table d'équité cohérents avec le pool.
    pub fn new(
        dates: DateRange,
        people: Vec<Person>,
        ledger: FairnessLedger,
        previous_schedule: Option<Schedule>,
        holidays: &dyn HolidayLookup,
        config: ScheduleConfig,
    ) -> Result<Self, SchedError> {
        if people.is_empty() {
            return Err(SchedError::EmptyPool);
        }
        check_range(&dates)?;

        for person in &people {
            for constraint in &person.constraints {
                if let Unavailability::Period(range) = constraint {
                    check_range(range)?;
                }
            }
        }

        let previous_shifts = previous_schedule.map(|s| s.shifts).unwrap_or_default();
        for shift in &previous_shifts {
            check_range(&shift.dates)?;
            for role in [&shift.person, &shift.backup_person] {
                if let Some(assigned) = role {
                    if !people.contains(assigned) {
                        return Err(SchedError::UnknownPerson {
                            context: "previous schedule",
                            name: assigned.full_name.clone(),
                        });
                    }
                }
            }
        }

        for record in ledger.records() {
            if !people.contains(&record.person) {
                return Err(SchedError::UnknownPerson {
                    context: "fairness ledger",
                    name: record.person.full_name.clone(),
                });
            }
        }

        let shifts = segment::build_shifts(&dates, holidays, &config);
        Ok(Self {
            config,
            people,
            ledger,
            shifts,
            previous_shifts,
        })
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn ledger(&self) -> &FairnessLedger {
        &self.ledger
    }

    fn total_days(&self, shift_type: ShiftType) -> i64 {
        self.shifts
            .iter()
            .filter(|s| s.shift_type == shift_type)
            .map(|s| s.dates.total_days())
            .sum()
    }

    /// Distribue la dette de toute la période, puis assigne les
    /// créneaux dans l'ordre chronologique.
    ///
    /// Tout échec est fatal à la période : la table d'équité rendue par
    /// l'erreur ne doit pas être persistée (mutations partielles).
    pub fn schedule(mut self) -> Result<(Schedule, FairnessLedger), SchedError> {
        let workdays = self.total_days(ShiftType::Workday);
        let weekend_days = self.total_days(ShiftType::Weekend);
        let holidays = self.total_days(ShiftType::Holiday);

        self.ledger
            .add_debts(workdays, weekend_days, holidays, &self.people)?;

        assign::assign_all(&mut self)?;

        info!(
            shifts = self.shifts.len(),
            workdays, weekend_days, holidays, "schedule complete"
        );
        Ok((Schedule::new(self.shifts), self.ledger))
    }
}

fn check_range(range: &DateRange) -> Result<(), SchedError> {
    if range.end < range.start {
        return Err(SchedError::InvalidDateRange {
            start: range.start,
            end: range.end,
        });
    }
    Ok(())
}
