//! Habit completion rates.
//!
//! A day counts as completed for a habit when at least one record with a
//! positive level exists for it; the level itself only colours the calendar.
//! Two policies for "no data" coexist on purpose: per-habit rates are 0 for
//! a month without records, the overall month-by-month rate is NaN so the
//! chart shows a gap.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use common::{DateRange, MonthKey};
use model::records::{HabitDefinition, HabitRecord};
use store::RecordSource;
use tracing::{debug, info, instrument};

use crate::error::{ComputeError, Result};

/// Completion rate of one habit over some range.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitRate {
    pub habit_id: i32,
    pub name: String,
    pub rate: f64,
}

/// One calendar row: the level recorded on every day of the month (0 when none).
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarRow {
    pub name: String,
    pub levels: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthStats {
    pub habit_count: usize,
    pub days: u32,
    pub completed: usize,
    pub possible: usize,
    pub rate: f64,
}

/// Per-habit rates for every month of a year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearRow {
    pub name: String,
    pub monthly: Vec<f64>,
    pub mean: f64,
}

/// Active habits and their positive-level records, indexed by habit and day.
#[derive(Debug, Clone, Default)]
pub struct HabitLog {
    habits: Vec<HabitDefinition>,
    days: BTreeMap<i32, BTreeMap<NaiveDate, i32>>,
}

impl HabitLog {
    /// Records with level 0 or below, and records of habits not in `habits`
    /// (inactive or deleted), are discarded.
    pub fn new(habits: Vec<HabitDefinition>, records: &[HabitRecord]) -> Self {
        let mut days: BTreeMap<i32, BTreeMap<NaiveDate, i32>> = habits
            .iter()
            .map(|habit| (habit.id, BTreeMap::new()))
            .collect();

        let mut discarded = 0usize;
        for record in records {
            match days.get_mut(&record.habit_id) {
                Some(calendar) if record.level > 0 => {
                    let level = calendar.entry(record.date).or_insert(0);
                    *level = (*level).max(record.level);
                }
                _ => discarded += 1,
            }
        }
        debug!(habits = habits.len(), records = records.len(), discarded, "Indexed habit records");

        Self { habits, days }
    }

    pub fn habits(&self) -> &[HabitDefinition] {
        &self.habits
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Distinct completed days of `habit_id` inside `range`.
    pub fn completed_days(&self, habit_id: i32, range: DateRange) -> usize {
        if range.start > range.end {
            return 0;
        }
        self.days
            .get(&habit_id)
            .map(|calendar| calendar.range(range.start..=range.end).count())
            .unwrap_or(0)
    }

    /// `completed_days / range.days() * 100`; 0 for an empty range.
    pub fn completion_rate(&self, habit_id: i32, range: DateRange) -> f64 {
        let total = range.days();
        if total <= 0 {
            return 0.0;
        }
        self.completed_days(habit_id, range) as f64 / total as f64 * 100.0
    }

    /// Every habit's rate over `range`, best first. Ties keep habit order.
    pub fn ranking(&self, range: DateRange) -> Vec<HabitRate> {
        let mut rates: Vec<HabitRate> = self
            .habits
            .iter()
            .map(|habit| HabitRate {
                habit_id: habit.id,
                name: habit.name.clone(),
                rate: self.completion_rate(habit.id, range),
            })
            .collect();
        rates.sort_by(|a, b| b.rate.total_cmp(&a.rate));
        rates
    }

    pub fn month_calendar(&self, month: MonthKey) -> Vec<CalendarRow> {
        self.habits
            .iter()
            .map(|habit| {
                let calendar = self.days.get(&habit.id);
                let levels = month
                    .range()
                    .iter_days()
                    .map(|day| calendar.and_then(|c| c.get(&day)).copied().unwrap_or(0))
                    .collect();
                CalendarRow {
                    name: habit.name.clone(),
                    levels,
                }
            })
            .collect()
    }

    pub fn month_stats(&self, month: MonthKey) -> MonthStats {
        let days = month.days();
        let possible = self.habits.len() * days as usize;
        let completed = self
            .habits
            .iter()
            .map(|habit| self.completed_days(habit.id, month.range()))
            .sum::<usize>();
        let rate = if possible > 0 {
            completed as f64 / possible as f64 * 100.0
        } else {
            0.0
        };

        MonthStats {
            habit_count: self.habits.len(),
            days,
            completed,
            possible,
            rate,
        }
    }

    /// Per-habit rate for each month of `year` (0 without records) and
    /// the mean over the twelve months.
    pub fn yearly_table(&self, year: i32) -> Vec<YearRow> {
        let months = MonthKey::months_of_year(year);
        self.habits
            .iter()
            .map(|habit| {
                let monthly: Vec<f64> = months
                    .iter()
                    .map(|month| self.completion_rate(habit.id, month.range()))
                    .collect();
                let mean = monthly.iter().sum::<f64>() / monthly.len().max(1) as f64;
                YearRow {
                    name: habit.name.clone(),
                    monthly,
                    mean,
                }
            })
            .collect()
    }

    /// Overall rate for each month of `year`: completed days over
    /// `habit_count * days_in_month`, NaN for months without any record.
    pub fn overall_monthly(&self, year: i32) -> Vec<(MonthKey, f64)> {
        MonthKey::months_of_year(year)
            .into_iter()
            .map(|month| {
                let stats = self.month_stats(month);
                let rate = if stats.completed == 0 { f64::NAN } else { stats.rate };
                (month, rate)
            })
            .collect()
    }
}

/// Everything the habits page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitReport {
    pub month: MonthKey,
    pub stats: MonthStats,
    pub calendar: Vec<CalendarRow>,
    pub ranking: Vec<HabitRate>,
    pub yearly: Vec<YearRow>,
    pub overall: Vec<(MonthKey, f64)>,
}

pub fn summarize(log: &HabitLog, today: NaiveDate) -> HabitReport {
    let month = MonthKey::of(today);
    HabitReport {
        month,
        stats: log.month_stats(month),
        calendar: log.month_calendar(month),
        ranking: log.ranking(month.range()),
        yearly: log.yearly_table(today.year()),
        overall: log.overall_monthly(today.year()),
    }
}

#[instrument(skip(source))]
pub async fn build_report(source: &dyn RecordSource, today: NaiveDate) -> Result<HabitReport> {
    let habits = source.habits().await?;
    if habits.is_empty() {
        return Err(ComputeError::MissingReference("no active habits".to_string()));
    }

    let months = MonthKey::months_of_year(today.year());
    let year = match (months.first(), months.last()) {
        (Some(first), Some(last)) => DateRange::new(first.first_day(), last.last_day()),
        _ => MonthKey::of(today).range(),
    };
    let records = source.habit_records(year).await?;

    let log = HabitLog::new(habits, &records);
    let report = summarize(&log, today);
    info!(
        habits = log.habits().len(),
        records = records.len(),
        month_rate = report.stats.rate,
        "Habit report computed"
    );
    Ok(report)
}
