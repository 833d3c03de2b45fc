use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month. Stored as its first day so ordering, hashing and
/// arithmetic come for free from `NaiveDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    /// Returns `None` for an invalid year/month pair.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().0 - Days::new(1)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + Months::new(1))
    }

    pub fn prev(&self) -> Self {
        Self(self.0 - Months::new(1))
    }

    /// Moves `months` forward (or backward when negative).
    pub fn offset(&self, months: i32) -> Self {
        if months >= 0 {
            Self(self.0 + Months::new(months.unsigned_abs()))
        } else {
            Self(self.0 - Months::new(months.unsigned_abs()))
        }
    }

    /// Number of days in the month.
    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// The whole month as an inclusive day range.
    pub fn range(&self) -> DateRange {
        DateRange::new(self.0, self.last_day())
    }

    /// January to December of `year`.
    pub fn months_of_year(year: i32) -> Vec<MonthKey> {
        (1..=12).filter_map(|month| Self::new(year, month)).collect()
    }

    /// Months from `self` to `end`, both included. Empty when `end < self`.
    pub fn until(&self, end: MonthKey) -> Vec<MonthKey> {
        let mut months = Vec::new();
        let mut current = *self;
        while current <= end {
            months.push(current);
            current = current.next();
        }
        months
    }

    /// Dense integer index (`year * 12 + month - 1`), used as a DataFrame
    /// grouping key.
    pub fn index(&self) -> i32 {
        self.year() * 12 + self.month() as i32 - 1
    }

    pub fn from_index(index: i32) -> Option<Self> {
        Self::new(index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
    }

    /// Portuguese month name, e.g. `Outubro`.
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month0()]
    }

    /// Three letter month name, e.g. `Out`.
    pub fn abbrev(&self) -> String {
        self.name().chars().take(3).collect()
    }

    /// Upper-case axis label: `MAR` inside `current_year`, `MAR27` outside.
    pub fn axis_label(&self, current_year: i32) -> String {
        let label = self.abbrev().to_uppercase();
        if self.year() == current_year {
            label
        } else {
            format!("{label}{:02}", self.year().rem_euclid(100))
        }
    }

    fn month0(&self) -> usize {
        self.0.month0() as usize
    }
}

const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days` long range that ends on `end` (inclusive).
    pub fn ending_on(end: NaiveDate, days: u64) -> Self {
        Self::new(end - Days::new(days.saturating_sub(1)), end)
    }

    /// Inclusive day count, `(end - start).days + 1`. Zero for reversed ranges.
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// First day after the range, for half-open `[start, end)` queries.
    pub fn end_exclusive(&self) -> NaiveDate {
        self.end + Days::new(1)
    }

    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |day| *day <= self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
