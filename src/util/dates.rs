use chrono::{Datelike, Local, NaiveDate};

/// Weekday labels, Monday first (index 0 = Montag … 6 = Sonntag)
pub const WEEKDAYS: [&str; 7] = [
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
];

/// Month labels, index 0 = Januar
pub const MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Canonical day key: zero-padded `YYYY-MM-DD`. Two instants on the same
/// local calendar day always yield equal keys.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Weekday index with Monday = 0 … Sunday = 6 (note: not the Sunday-first
/// convention)
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Today as a local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Localized weekday label for a date
pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAYS[weekday_index(date)]
}

/// Localized month label for a date
pub fn month_label(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// Every calendar day of the given month, 1st to last, ascending.
/// An out-of-range month yields an empty sequence.
pub fn days_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first.iter_days().take_while(|d| d.month() == month).collect()
}

/// Display label for an overdue task, always derived from its *original*
/// date: `1.Januar, Sonntag`
pub fn overdue_label(date: NaiveDate) -> String {
    format!("{}.{}, {}", date.day(), month_label(date), weekday_label(date))
}
