use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::calendar::HolidayTable;
use crate::model::{JusticeRecord, Person, Schedule};
use crate::scheduler::FairnessLedger;

pub trait Storage {
    /// Charge le pool de personnes.
    fn load_people(&self) -> anyhow::Result<Vec<Person>>;
    /// Sauvegarde le pool de personnes.
    fn save_people(&self, people: &[Person]) -> anyhow::Result<()>;
    /// Charge la table d'équité ; table vide si le fichier n'existe pas.
    fn load_ledger(&self) -> anyhow::Result<FairnessLedger>;
    /// Sauvegarde la table, filtrée au pool courant si une liste
    /// blanche est fournie (purge des personnes parties).
    fn save_ledger(&self, ledger: &FairnessLedger, whitelist: Option<&[Person]>)
        -> anyhow::Result<()>;
    /// Charge le planning précédent s'il existe.
    fn load_previous_schedule(&self) -> anyhow::Result<Option<Schedule>>;
    /// Charge le planning courant.
    fn load_schedule(&self) -> anyhow::Result<Schedule>;
    /// Sauvegarde le planning courant de manière atomique.
    fn save_schedule(&self, schedule: &Schedule) -> anyhow::Result<()>;
    /// Charge la table des fêtes ; table vide si le fichier n'existe pas.
    fn load_holidays(&self) -> anyhow::Result<HolidayTable>;
}

/// Stockage JSON à plat dans un répertoire de données.
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    pub fn people_path(&self) -> PathBuf {
        self.dir.join("people.json")
    }
    pub fn ledger_path(&self) -> PathBuf {
        self.dir.join("ledger.json")
    }
    pub fn previous_schedule_path(&self) -> PathBuf {
        self.dir.join("previous_schedule.json")
    }
    pub fn schedule_path(&self) -> PathBuf {
        self.dir.join("schedule.json")
    }
    pub fn holidays_path(&self) -> PathBuf {
        self.dir.join("holidays.json")
    }

    fn write_atomic<T: Serialize>(&self, path: &Path, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(value)?;
        let mut tmp = NamedTempFile::new_in(path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn load_people(&self) -> anyhow::Result<Vec<Person>> {
        let path = self.people_path();
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let people: Vec<Person> =
            serde_json::from_slice(&data).with_context(|| "parsing people.json")?;
        Ok(people)
    }

    fn save_people(&self, people: &[Person]) -> anyhow::Result<()> {
        self.write_atomic(&self.people_path(), &people)
    }

    fn load_ledger(&self) -> anyhow::Result<FairnessLedger> {
        let path = self.ledger_path();
        if !path.exists() {
            return Ok(FairnessLedger::new());
        }
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let records: Vec<JusticeRecord> =
            serde_json::from_slice(&data).with_context(|| "parsing ledger.json")?;
        Ok(FairnessLedger::from_records(records))
    }

    fn save_ledger(
        &self,
        ledger: &FairnessLedger,
        whitelist: Option<&[Person]>,
    ) -> anyhow::Result<()> {
        let records: Vec<&JusticeRecord> = match whitelist {
            Some(people) => ledger
                .records()
                .filter(|r| people.contains(&r.person))
                .collect(),
            None => ledger.records().collect(),
        };
        self.write_atomic(&self.ledger_path(), &records)
    }

    fn load_previous_schedule(&self) -> anyhow::Result<Option<Schedule>> {
        let path = self.previous_schedule_path();
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let schedule: Schedule =
            serde_json::from_slice(&data).with_context(|| "parsing previous_schedule.json")?;
        Ok(Some(schedule))
    }

    fn load_schedule(&self) -> anyhow::Result<Schedule> {
        let path = self.schedule_path();
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let schedule: Schedule =
            serde_json::from_slice(&data).with_context(|| "parsing schedule.json")?;
        Ok(schedule)
    }

    fn save_schedule(&self, schedule: &Schedule) -> anyhow::Result<()> {
        self.write_atomic(&self.schedule_path(), schedule)
    }

    fn load_holidays(&self) -> anyhow::Result<HolidayTable> {
        let path = self.holidays_path();
        if !path.exists() {
            return Ok(HolidayTable::new());
        }
        HolidayTable::load_from_file(&path)
    }
}
