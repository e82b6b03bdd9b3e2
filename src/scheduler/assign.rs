use tracing::debug;

use super::{types::SchedError, Scheduler};
use crate::model::{Person, ShiftType};

/// Parcours chronologique : pour chaque créneau, filtre les candidats
/// classés puis engage le couple titulaire/remplaçant et règle la
/// dette du titulaire.
pub(super) fn assign_all(scheduler: &mut Scheduler) -> Result<(), SchedError> {
    for index in 0..scheduler.shifts.len() {
        let shift_type = scheduler.shifts[index].shift_type;
        let ranked = scheduler.ledger.ranked_candidates(shift_type);

        let mut pair: Vec<Person> = Vec::with_capacity(2);
        for candidate in ranked {
            // Les contraintes et poids à jour viennent du pool, pas du
            // dernier instantané persisté dans la table.
            let Some(person) = scheduler.people.iter().find(|p| **p == candidate) else {
                continue;
            };
            if scheduler.is_eligible(person, index) {
                pair.push(person.clone());
                if pair.len() == 2 {
                    break;
                }
            }
        }

        let Ok([primary, backup]) = <[Person; 2]>::try_from(pair) else {
            return Err(SchedError::Infeasible {
                shift: Box::new(scheduler.shifts[index].clone()),
                ledger: scheduler.ledger.records().cloned().collect(),
            });
        };

        let days = scheduler.shifts[index].dates.total_days();
        scheduler
            .ledger
            .subtract_debt(&primary, shift_type, days as f64);

        debug!(
            shift = %scheduler.shifts[index].title,
            dates = %scheduler.shifts[index].dates,
            primary = %primary.full_name,
            backup = %backup.full_name,
            "shift committed"
        );

        let shift = &mut scheduler.shifts[index];
        shift.person = Some(primary);
        shift.backup_person = Some(backup);
    }

    Ok(())
}

impl Scheduler {
    /// Vérifie contraintes personnelles puis espacements (même
    /// catégorie, puis toutes catégories).
    pub(super) fn is_eligible(&self, person: &Person, index: usize) -> bool {
        let shift = &self.shifts[index];

        if person.is_unavailable_during(&shift.dates) {
            debug!(person = %person.full_name, dates = %shift.dates, "constraint overlaps shift");
            return false;
        }

        let min_same = self.config.min_space_for(shift.shift_type) as usize;
        if let Some(space) = self.space_from_last(person, index, Some(shift.shift_type)) {
            if space < min_same {
                debug!(
                    person = %person.full_name,
                    space,
                    shift_type = %shift.shift_type,
                    "too close to last shift of same type"
                );
                return false;
            }
        }

        if let Some(space) = self.space_from_last(person, index, None) {
            if space < self.config.min_space_any as usize {
                debug!(person = %person.full_name, space, "too close to last shift");
                return false;
            }
        }

        true
    }

    /// Nombre de créneaux (du périmètre donné) depuis la dernière
    /// apparition de la personne, en remontant l'historique précédent
    /// puis les créneaux déjà engagés de la période courante.
    /// `None` si elle n'y apparaît jamais : espace illimité.
    pub(super) fn space_from_last(
        &self,
        person: &Person,
        index: usize,
        only: Option<ShiftType>,
    ) -> Option<usize> {
        let mut space = 0usize;
        for shift in self
            .previous_shifts
            .iter()
            .chain(self.shifts[..index].iter())
            .rev()
        {
            if only.map_or(true, |t| shift.shift_type == t) {
                if shift.involves(person) {
                    return Some(space);
                }
                space += 1;
            }
        }
        None
    }
}
