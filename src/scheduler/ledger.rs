use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::types::SchedError;
use crate::model::{JusticeRecord, Person, PersonId, ShiftType};

/// Table d'équité : dette signée par personne et par catégorie.
///
/// La table possède seule les enregistrements ; toute mutation passe
/// par son API (`update_debt`, `subtract_debt`), jamais par un
/// enregistrement récupéré. Le tirage des ex æquo utilise un
/// générateur injecté, reproductible via [`FairnessLedger::with_seed`].
#[derive(Debug, Clone)]
pub struct FairnessLedger {
    records: BTreeMap<PersonId, JusticeRecord>,
    rng: SmallRng,
}

impl Default for FairnessLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl FairnessLedger {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            rng: SmallRng::from_os_rng(),
        }
    }

    pub fn from_records(records: Vec<JusticeRecord>) -> Self {
        let mut map = BTreeMap::new();
        for record in records {
            map.insert(record.person.id(), record);
        }
        Self {
            records: map,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Fixe la graine du tirage des ex æquo (tests, rejeu).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Enregistrement d'une personne, créé à zéro au premier accès.
    pub fn record(&mut self, person: &Person) -> &JusticeRecord {
        self.records
            .entry(person.id())
            .or_insert_with(|| JusticeRecord::zeroed(person.clone()))
    }

    pub fn debt(&mut self, person: &Person, shift_type: ShiftType) -> f64 {
        self.record(person).debt(shift_type)
    }

    /// Répartit les jours de la période au prorata des poids.
    ///
    /// Conservative par catégorie : la somme des dettes ajoutées vaut
    /// le nombre de jours distribué (à la tolérance flottante près).
    pub fn add_debts(
        &mut self,
        workdays: i64,
        weekend_days: i64,
        holidays: i64,
        people: &[Person],
    ) -> Result<(), SchedError> {
        let totals = [
            (ShiftType::Workday, workdays),
            (ShiftType::Weekend, weekend_days),
            (ShiftType::Holiday, holidays),
        ];
        for (shift_type, days) in totals {
            if days == 0 {
                continue;
            }
            let availability: f64 = people.iter().map(|p| p.weight(shift_type)).sum();
            if availability <= 0.0 {
                return Err(SchedError::ZeroWeight { shift_type, days });
            }
            for person in people {
                let share = (days as f64 / availability) * person.weight(shift_type);
                self.update_debt(person, shift_type, share);
            }
            debug!(%shift_type, days, availability, "debts distributed");
        }
        Ok(())
    }

    pub fn update_debt(&mut self, person: &Person, shift_type: ShiftType, delta: f64) {
        let record = self
            .records
            .entry(person.id())
            .or_insert_with(|| JusticeRecord::zeroed(person.clone()));
        *record.debt_mut(shift_type) += delta;
    }

    /// Dette réglée : la personne a assuré un créneau de la catégorie.
    pub fn subtract_debt(&mut self, person: &Person, shift_type: ShiftType, amount: f64) {
        self.update_debt(person, shift_type, -amount);
    }

    /// Candidats classés par dette décroissante pour la catégorie.
    ///
    /// Les groupes d'ex æquo sont mélangés uniformément par le
    /// générateur de la table.
    pub fn ranked_candidates(&mut self, shift_type: ShiftType) -> Vec<Person> {
        let mut sorted: Vec<(f64, Person)> = self
            .records
            .values()
            .map(|r| (r.debt(shift_type), r.person.clone()))
            .collect();
        sorted.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut i = 0;
        while i < sorted.len() {
            let mut j = i + 1;
            while j < sorted.len() && sorted[j].0 == sorted[i].0 {
                j += 1;
            }
            sorted[i..j].shuffle(&mut self.rng);
            i = j;
        }

        sorted.into_iter().map(|(_, person)| person).collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &JusticeRecord> {
        self.records.values()
    }

    pub fn into_records(self) -> Vec<JusticeRecord> {
        self.records.into_values().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
