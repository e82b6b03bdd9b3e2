use std::path::Path;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};

use crate::model::{DateRange, Person, Schedule, Unavailability};

/// Import de personnes depuis CSV, header
/// `full_name,email,workday_weight,weekend_weight,holiday_weight[,constraints]`.
///
/// Les indisponibilités sont séparées par `;`, chacune un jour
/// (`2023-03-05`) ou un intervalle (`2023-04-01/2023-04-10`).
pub fn import_people_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Person>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let full_name = rec.get(0).context("missing full_name")?.trim();
        let email = rec.get(1).context("missing email")?.trim();
        if full_name.is_empty() || email.is_empty() {
            bail!("invalid people row (empty identity)");
        }
        let mut person = Person::new(full_name, email);
        person.workday_weight = parse_weight(rec.get(2), "workday_weight", full_name)?;
        person.weekend_weight = parse_weight(rec.get(3), "weekend_weight", full_name)?;
        person.holiday_weight = parse_weight(rec.get(4), "holiday_weight", full_name)?;
        if let Some(raw) = rec.get(5) {
            let raw = raw.trim();
            if !raw.is_empty() {
                person.constraints = parse_constraints(raw)
                    .with_context(|| format!("invalid constraints for {full_name}"))?;
            }
        }
        out.push(person);
    }
    Ok(out)
}

fn parse_weight(field: Option<&str>, column: &str, who: &str) -> anyhow::Result<f64> {
    let raw = field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .with_context(|| format!("missing {column} for {who}"))?;
    let value: f64 = raw
        .parse()
        .with_context(|| format!("invalid {column} for {who}: {raw}"))?;
    if value < 0.0 {
        bail!("negative {column} for {who}");
    }
    Ok(value)
}

fn parse_constraints(raw: &str) -> anyhow::Result<Vec<Unavailability>> {
    raw.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| parse_constraint_chunk(chunk.trim()))
        .collect()
}

fn parse_constraint_chunk(chunk: &str) -> anyhow::Result<Unavailability> {
    if let Some((start_raw, end_raw)) = chunk.split_once('/').or_else(|| chunk.split_once("..")) {
        let start = parse_date(start_raw.trim())?;
        let end = parse_date(end_raw.trim())?;
        DateRange::new(start, end)
            .map(Unavailability::Period)
            .map_err(anyhow::Error::msg)
    } else {
        Ok(Unavailability::Day(parse_date(chunk)?))
    }
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

/// Export CSV du planning, header
/// `title,type,start_date,end_date,person,backup_person`.
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "title",
        "type",
        "start_date",
        "end_date",
        "person",
        "backup_person",
    ])?;
    for shift in &schedule.shifts {
        let shift_type = shift.shift_type.to_string();
        let start = shift.dates.start.to_string();
        let end = shift.dates.end.to_string();
        let person = shift
            .person
            .as_ref()
            .map(|p| p.full_name.as_str())
            .unwrap_or("");
        let backup = shift
            .backup_person
            .as_ref()
            .map(|p| p.full_name.as_str())
            .unwrap_or("");
        w.write_record([
            shift.title.as_str(),
            shift_type.as_str(),
            start.as_str(),
            end.as_str(),
            person,
            backup,
        ])?;
    }
    w.flush()?;
    Ok(())
}
