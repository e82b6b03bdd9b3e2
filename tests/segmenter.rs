#![forbid(unsafe_code)]
use chrono::{NaiveDate, Weekday};
use permanence::{
    build_shifts, DateRange, HolidayTable, NoHolidays, ScheduleConfig, ShiftType,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, end).unwrap()
}

#[test]
fn covers_range_without_gaps_or_overlaps() {
    let mut holidays = HolidayTable::new();
    holidays.insert_day(date(2023, 4, 26), "Yom Haatzmaut");
    let dates = range(date(2023, 3, 1), date(2023, 5, 1));

    let shifts = build_shifts(&dates, &holidays, &ScheduleConfig::default());

    assert_eq!(shifts[0].dates.start, dates.start);
    assert_eq!(shifts.last().unwrap().dates.end, dates.end);
    for window in shifts.windows(2) {
        if let [a, b] = window {
            assert_eq!(a.dates.end.succ_opt().unwrap(), b.dates.start);
        }
    }
    let total: i64 = shifts.iter().map(|s| s.dates.total_days()).sum();
    assert_eq!(total, dates.total_days());
}

#[test]
fn workdays_are_single_days() {
    // dimanche à mercredi : que des jours ouvrés
    let dates = range(date(2023, 3, 5), date(2023, 3, 8));
    let shifts = build_shifts(&dates, &NoHolidays, &ScheduleConfig::default());

    assert_eq!(shifts.len(), 4);
    for shift in &shifts {
        assert_eq!(shift.shift_type, ShiftType::Workday);
        assert_eq!(shift.dates.total_days(), 1);
    }
}

#[test]
fn weekend_days_merge_into_one_shift() {
    // mercredi 1er, week-end jeudi-samedi, dimanche 5
    let dates = range(date(2023, 3, 1), date(2023, 3, 5));
    let shifts = build_shifts(&dates, &NoHolidays, &ScheduleConfig::default());

    assert_eq!(shifts.len(), 3);
    assert_eq!(shifts[1].shift_type, ShiftType::Weekend);
    assert_eq!(shifts[1].dates, range(date(2023, 3, 2), date(2023, 3, 4)));
}

#[test]
fn holiday_shift_includes_the_eve() {
    let mut holidays = HolidayTable::new();
    holidays.insert_day(date(2023, 4, 26), "Yom Haatzmaut");
    let dates = range(date(2023, 3, 1), date(2023, 5, 1));

    let shifts = build_shifts(&dates, &holidays, &ScheduleConfig::default());
    let holiday = shifts
        .iter()
        .find(|s| s.title.contains("Yom Haatzmaut"))
        .expect("holiday shift");

    assert_eq!(holiday.dates.start, date(2023, 4, 25));
    assert_eq!(holiday.dates.end, date(2023, 4, 26));
    assert_eq!(holiday.shift_type, ShiftType::Holiday);
}

#[test]
fn multi_day_holiday_merges_with_its_eve() {
    // fête mardi-mercredi, veille le lundi
    let mut holidays = HolidayTable::new();
    holidays.insert_range(range(date(2023, 3, 7), date(2023, 3, 8)), "Pesach");
    let dates = range(date(2023, 3, 5), date(2023, 3, 12));

    let shifts = build_shifts(&dates, &holidays, &ScheduleConfig::default());
    let holiday = shifts
        .iter()
        .find(|s| s.shift_type == ShiftType::Holiday)
        .expect("holiday shift");

    assert_eq!(holiday.dates, range(date(2023, 3, 6), date(2023, 3, 8)));
}

#[test]
fn a_holiday_day_is_never_treated_as_an_eve() {
    // deux fêtes distinctes qui se suivent : la veille est celle de la
    // première, le jour de la première n'est pas veille de la seconde
    let mut holidays = HolidayTable::new();
    holidays.insert_day(date(2023, 3, 7), "Purim");
    holidays.insert_day(date(2023, 3, 8), "Shushan Purim");
    let dates = range(date(2023, 3, 5), date(2023, 3, 12));

    let shifts = build_shifts(&dates, &holidays, &ScheduleConfig::default());
    let holiday = shifts
        .iter()
        .find(|s| s.shift_type == ShiftType::Holiday)
        .expect("holiday shift");

    assert_eq!(holiday.dates, range(date(2023, 3, 6), date(2023, 3, 8)));
    assert!(holiday.title.contains("Purim"));
}

#[test]
fn trailing_weekend_is_clamped_to_range_end() {
    // la période s'arrête le vendredi, en plein week-end
    let dates = range(date(2023, 3, 1), date(2023, 3, 3));
    let shifts = build_shifts(&dates, &NoHolidays, &ScheduleConfig::default());

    assert_eq!(shifts.last().unwrap().dates.end, date(2023, 3, 3));
}

#[test]
fn weekend_set_and_title_prefix_come_from_config() {
    let config = ScheduleConfig {
        weekend_days: vec![Weekday::Sat, Weekday::Sun],
        title_prefix: "[oncall]".to_string(),
        ..ScheduleConfig::default()
    };
    // vendredi à lundi
    let dates = range(date(2023, 3, 3), date(2023, 3, 6));
    let shifts = build_shifts(&dates, &NoHolidays, &config);

    assert_eq!(shifts.len(), 3);
    assert!(shifts[0].title.starts_with("[oncall]"));
    assert_eq!(shifts[1].shift_type, ShiftType::Weekend);
    assert_eq!(shifts[1].dates, range(date(2023, 3, 4), date(2023, 3, 5)));
}
