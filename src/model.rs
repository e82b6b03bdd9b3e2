use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifiant fort pour Person (nom + adresse de contact).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Intervalle de dates inclusif [start, end].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Crée un intervalle en validant que `end >= start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if end < start {
            return Err("range end must not be before start".to_string());
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Nombre de jours, bornes comprises.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        other.contains(self.start)
            || other.contains(self.end)
            || self.contains(other.start)
            || self.contains(other.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Indisponibilité d'une personne : un jour isolé ou un intervalle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Unavailability {
    Day(NaiveDate),
    Period(DateRange),
}

impl Unavailability {
    pub fn overlaps(&self, dates: &DateRange) -> bool {
        match self {
            Unavailability::Day(day) => dates.contains(*day),
            Unavailability::Period(period) => period.overlaps(dates),
        }
    }
}

/// Catégorie de créneau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Workday,
    Weekend,
    Holiday,
}

impl ShiftType {
    pub const ALL: [ShiftType; 3] = [ShiftType::Workday, ShiftType::Weekend, ShiftType::Holiday];
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShiftType::Workday => "workday",
            ShiftType::Weekend => "weekend",
            ShiftType::Holiday => "holiday",
        };
        f.write_str(s)
    }
}

/// Personne (membre du pool de garde).
///
/// L'égalité et le hachage portent uniquement sur l'identité
/// (nom + adresse), pas sur les poids ni les indisponibilités.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub full_name: String,
    pub email: String,
    pub workday_weight: f64,
    pub weekend_weight: f64,
    pub holiday_weight: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Unavailability>,
}

impl Person {
    pub fn new<N: Into<String>, E: Into<String>>(full_name: N, email: E) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            workday_weight: 1.0,
            weekend_weight: 1.0,
            holiday_weight: 1.0,
            constraints: Vec::new(),
        }
    }

    pub fn id(&self) -> PersonId {
        PersonId::new(format!("{}.{}", self.full_name, self.email))
    }

    pub fn weight(&self, shift_type: ShiftType) -> f64 {
        match shift_type {
            ShiftType::Workday => self.workday_weight,
            ShiftType::Weekend => self.weekend_weight,
            ShiftType::Holiday => self.holiday_weight,
        }
    }

    pub fn is_unavailable_during(&self, dates: &DateRange) -> bool {
        self.constraints.iter().any(|c| c.overlaps(dates))
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name && self.email == other.email
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_name.hash(state);
        self.email.hash(state);
    }
}

/// Créneau de garde.
///
/// Créé non assigné par le découpage du calendrier, rempli une seule
/// fois par l'assignation (titulaire + remplaçant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub dates: DateRange,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    pub title: String,
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub backup_person: Option<Person>,
}

impl Shift {
    pub fn unassigned(dates: DateRange, shift_type: ShiftType, title: String) -> Self {
        Self {
            dates,
            shift_type,
            title,
            person: None,
            backup_person: None,
        }
    }

    /// Vrai si la personne y figure comme titulaire ou remplaçant.
    pub fn involves(&self, person: &Person) -> bool {
        self.person.as_ref() == Some(person) || self.backup_person.as_ref() == Some(person)
    }
}

/// Dette signée d'une personne, par catégorie de créneau.
///
/// Une dette positive signifie que la personne « doit » des gardes de
/// cette catégorie : plus la dette est haute, plus elle est prioritaire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JusticeRecord {
    pub person: Person,
    pub workday_debt: f64,
    pub weekend_debt: f64,
    pub holiday_debt: f64,
}

impl JusticeRecord {
    pub fn zeroed(person: Person) -> Self {
        Self {
            person,
            workday_debt: 0.0,
            weekend_debt: 0.0,
            holiday_debt: 0.0,
        }
    }

    pub fn debt(&self, shift_type: ShiftType) -> f64 {
        match shift_type {
            ShiftType::Workday => self.workday_debt,
            ShiftType::Weekend => self.weekend_debt,
            ShiftType::Holiday => self.holiday_debt,
        }
    }

    pub(crate) fn debt_mut(&mut self, shift_type: ShiftType) -> &mut f64 {
        match shift_type {
            ShiftType::Workday => &mut self.workday_debt,
            ShiftType::Weekend => &mut self.weekend_debt,
            ShiftType::Holiday => &mut self.holiday_debt,
        }
    }
}

/// Planning : suite ordonnée de créneaux.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    pub shifts: Vec<Shift>,
}

impl Schedule {
    pub fn new(shifts: Vec<Shift>) -> Self {
        Self { shifts }
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }
}
