#![forbid(unsafe_code)]
use chrono::NaiveDate;
use permanence::{
    io, notification::InviteRole, prepare_invites, DateRange, FairnessLedger, HolidayLookup,
    JsonStorage, Person, Schedule, Shift, ShiftType, Storage, TextInvite, Unavailability,
};
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, end).unwrap()
}

fn person(name: &str) -> Person {
    Person::new(name, format!("{name}@example.org"))
}

fn assigned_shift() -> Shift {
    let mut shift = Shift::unassigned(
        range(date(2023, 3, 1), date(2023, 3, 1)),
        ShiftType::Workday,
        "[permanence] Workday shift".to_string(),
    );
    shift.person = Some(Person::new("Alice Cohen", "alice@example.org"));
    shift.backup_person = Some(Person::new("Bob Levy", "bob@example.org"));
    shift
}

#[test]
fn ledger_roundtrip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path()).unwrap();

    let alice = person("alice");
    let bob = person("bob");
    let mut ledger = FairnessLedger::new().with_seed(5);
    ledger.update_debt(&alice, ShiftType::Workday, 1.5);
    ledger.update_debt(&bob, ShiftType::Holiday, -2.0);

    storage.save_ledger(&ledger, None).unwrap();
    let mut loaded = storage.load_ledger().unwrap();

    assert_eq!(loaded.len(), 2);
    assert!((loaded.debt(&alice, ShiftType::Workday) - 1.5).abs() < 1e-9);
    assert!((loaded.debt(&bob, ShiftType::Holiday) + 2.0).abs() < 1e-9);
}

#[test]
fn ledger_whitelist_drops_stale_records() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path()).unwrap();

    let alice = person("alice");
    let gone = person("gone");
    let mut ledger = FairnessLedger::new().with_seed(5);
    ledger.update_debt(&alice, ShiftType::Workday, 1.0);
    ledger.update_debt(&gone, ShiftType::Workday, 4.0);

    storage.save_ledger(&ledger, Some(&[alice.clone()])).unwrap();
    let loaded = storage.load_ledger().unwrap();

    assert_eq!(loaded.len(), 1);
    assert!(loaded.records().all(|r| r.person == alice));
}

#[test]
fn missing_ledger_file_gives_empty_table() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path()).unwrap();

    let ledger = storage.load_ledger().unwrap();
    assert!(ledger.is_empty());
}

#[test]
fn schedule_roundtrip_and_previous_schedule() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path()).unwrap();

    assert!(storage.load_previous_schedule().unwrap().is_none());

    let schedule = Schedule::new(vec![assigned_shift()]);
    storage.save_schedule(&schedule).unwrap();

    let loaded = storage.load_schedule().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.shifts[0].shift_type, ShiftType::Workday);
    assert_eq!(
        loaded.shifts[0].person.as_ref().unwrap().full_name,
        "Alice Cohen"
    );

    std::fs::copy(storage.schedule_path(), storage.previous_schedule_path()).unwrap();
    let previous = storage.load_previous_schedule().unwrap().expect("previous");
    assert_eq!(previous.len(), 1);
}

#[test]
fn people_roundtrip_keeps_constraints() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path()).unwrap();

    let mut alice = person("alice");
    alice.constraints = vec![
        Unavailability::Day(date(2023, 3, 5)),
        Unavailability::Period(range(date(2023, 4, 1), date(2023, 4, 10))),
    ];
    storage.save_people(&[alice.clone()]).unwrap();

    let loaded = storage.load_people().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].constraints, alice.constraints);
}

#[test]
fn holiday_table_loads_from_json() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path()).unwrap();

    assert!(storage.load_holidays().unwrap().is_empty());

    std::fs::write(
        storage.holidays_path(),
        r#"[{"name": "Silvester", "start": "2023-01-01", "end": "2023-01-01"}]"#,
    )
    .unwrap();
    let holidays = storage.load_holidays().unwrap();

    assert_eq!(holidays.holiday_name(date(2023, 1, 1)), Some("Silvester"));
    assert_eq!(holidays.holiday_name(date(2023, 1, 2)), None);
}

#[test]
fn import_people_csv_parses_weights_and_constraints() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("people.csv");
    std::fs::write(
        &csv_path,
        "full_name,email,workday_weight,weekend_weight,holiday_weight,constraints\n\
         Alice Cohen,alice@example.org,1.0,2.0,0.5,2023-03-05;2023-04-01/2023-04-10\n\
         Bob Levy,bob@example.org,1,1,1,\n",
    )
    .unwrap();

    let people = io::import_people_csv(&csv_path).unwrap();

    assert_eq!(people.len(), 2);
    assert_eq!(people[0].weekend_weight, 2.0);
    assert_eq!(
        people[0].constraints,
        vec![
            Unavailability::Day(date(2023, 3, 5)),
            Unavailability::Period(range(date(2023, 4, 1), date(2023, 4, 10))),
        ]
    );
    assert!(people[1].constraints.is_empty());
}

#[test]
fn export_schedule_csv_writes_one_row_per_shift() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("schedule.csv");
    let schedule = Schedule::new(vec![assigned_shift()]);

    io::export_schedule_csv(&csv_path, &schedule).unwrap();

    let mut rdr = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(1), Some("workday"));
    assert_eq!(rows[0].get(4), Some("Alice Cohen"));
    assert_eq!(rows[0].get(5), Some("Bob Levy"));
}

#[test]
fn invites_come_in_pairs_with_backup_suffix() {
    let schedule = Schedule::new(vec![assigned_shift()]);

    let invites = prepare_invites(&schedule, &TextInvite).unwrap();

    assert_eq!(invites.len(), 2);
    assert_eq!(invites[0].attendee, "alice@example.org");
    assert!(invites[1].title.ends_with("- remplaçant"));
    assert_eq!(invites[1].attendee, "bob@example.org");
}

#[test]
fn unassigned_shift_cannot_be_invited() {
    let schedule = Schedule::new(vec![Shift::unassigned(
        range(date(2023, 3, 1), date(2023, 3, 1)),
        ShiftType::Workday,
        "[permanence] Workday shift".to_string(),
    )]);

    assert!(prepare_invites(&schedule, &TextInvite).is_err());
}

#[test]
fn text_invite_renders_the_duty_message() {
    use permanence::InviteRenderer;

    let shift = assigned_shift();
    let content = TextInvite.render(shift.person.as_ref().unwrap(), &shift, InviteRole::Primary);

    insta::assert_snapshot!(content, @r#"
    Bonjour Alice Cohen,

    Tu es de garde (titulaire) pour le créneau "[permanence] Workday shift" du 2023-03-01 au 2023-03-01 (inclus).

    Merci de te préparer et de vérifier ton matériel.
    "#);
}
