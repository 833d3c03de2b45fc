//! Month-by-month debt and reserve series for the finance charts.

use chrono::{Datelike, NaiveDate};
use common::MonthKey;
use model::records::{DebtSnapshot, ReserveEntry};
use polars::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

use crate::error::Result;

/// Debt line and invoice bars on a shared month axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtAndInvoices {
    pub months: Vec<MonthKey>,
    /// `None` where no snapshot exists for the month.
    pub debt: Vec<Option<f64>>,
    /// Zero where nothing is due.
    pub invoices: Vec<f64>,
}

impl DebtAndInvoices {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReserveHistory {
    /// Running balance at the end of each month, forward filled up to the
    /// current month.
    pub balances: Vec<(MonthKey, f64)>,
    pub goal: Option<f64>,
}

/// Last value observed in every month, in date order. With `cumulative` the
/// values are summed first, so the result is a running balance.
fn last_per_month(points: &[(NaiveDate, f64)], cumulative: bool) -> Result<Vec<(MonthKey, f64)>> {
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let days: Vec<i32> = points.iter().map(|(day, _)| day.num_days_from_ce()).collect();
    let months: Vec<i32> = points.iter().map(|(day, _)| MonthKey::of(*day).index()).collect();
    let values: Vec<f64> = points.iter().map(|(_, value)| *value).collect();

    let df = DataFrame::new(vec![
        Series::new("day".into(), days).into(),
        Series::new("month".into(), months).into(),
        Series::new("value".into(), values).into(),
    ])?;

    let value = if cumulative {
        col("value").cum_sum(false)
    } else {
        col("value")
    };

    let monthly = df
        .lazy()
        .sort(["day"], SortMultipleOptions::default().with_maintain_order(true))
        .with_column(value.alias("value"))
        .group_by_stable([col("month")])
        .agg([col("value").last()])
        .collect()?;

    let month_column = monthly.column("month")?.i32()?;
    let value_column = monthly.column("value")?.f64()?;

    Ok(month_column
        .into_iter()
        .zip(value_column.into_iter())
        .filter_map(|(month, value)| Some((MonthKey::from_index(month?)?, value?)))
        .collect())
}

fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// Closing debt of every month with at least one snapshot.
#[instrument(skip(snapshots), fields(snapshots = snapshots.len()))]
pub fn monthly_debt(snapshots: &[DebtSnapshot]) -> Result<Vec<(MonthKey, f64)>> {
    let points: Vec<(NaiveDate, f64)> = snapshots
        .iter()
        .map(|snapshot| (snapshot.date, to_f64(snapshot.amount)))
        .collect();
    last_per_month(&points, false)
}

pub fn debt_and_invoices(debt: &[(MonthKey, f64)], invoices: &[(MonthKey, Decimal)]) -> DebtAndInvoices {
    let months: BTreeSet<MonthKey> = debt
        .iter()
        .map(|(month, _)| *month)
        .chain(invoices.iter().map(|(month, _)| *month))
        .collect();
    let months: Vec<MonthKey> = months.into_iter().collect();

    let debt_values = months
        .iter()
        .map(|month| debt.iter().find(|(m, _)| m == month).map(|(_, value)| *value))
        .collect();
    let invoice_values = months
        .iter()
        .map(|month| {
            invoices
                .iter()
                .find(|(m, _)| m == month)
                .map(|(_, total)| to_f64(*total))
                .unwrap_or(0.0)
        })
        .collect();

    DebtAndInvoices {
        months,
        debt: debt_values,
        invoices: invoice_values,
    }
}

/// Running reserve balance per month, from the first month with an entry up
/// to `current`, plus the goal to show next to it.
#[instrument(skip(entries, goals), fields(entries = entries.len()))]
pub fn reserve_history(entries: &[ReserveEntry], current: MonthKey, goals: &[Decimal]) -> Result<ReserveHistory> {
    let points: Vec<(NaiveDate, f64)> = entries
        .iter()
        .map(|entry| (entry.date, to_f64(entry.amount)))
        .collect();
    let observed = last_per_month(&points, true)?;

    let Some((first, _)) = observed.first() else {
        return Ok(ReserveHistory {
            balances: Vec::new(),
            goal: None,
        });
    };

    let mut balance = 0.0;
    let balances: Vec<(MonthKey, f64)> = first
        .until(current)
        .into_iter()
        .map(|month| {
            if let Some((_, value)) = observed.iter().find(|(m, _)| *m == month) {
                balance = *value;
            }
            (month, balance)
        })
        .collect();

    let max_balance = balances
        .iter()
        .map(|(_, value)| *value)
        .fold(0.0_f64, f64::max);
    let goal = select_goal(max_balance, goals);
    debug!(months = balances.len(), max_balance, ?goal, "Computed reserve history");

    Ok(ReserveHistory { balances, goal })
}

/// The first goal not reached yet, or the last one when all are reached.
pub fn select_goal(max_balance: f64, goals: &[Decimal]) -> Option<f64> {
    goals
        .iter()
        .map(|goal| to_f64(*goal))
        .find(|goal| max_balance < *goal)
        .or_else(|| goals.last().map(|goal| to_f64(*goal)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{brl, date};

    fn month(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    #[test]
    fn test_monthly_debt_keeps_last_snapshot_of_each_month() {
        let snapshots = vec![
            DebtSnapshot { amount: brl(1000), date: date(2025, 8, 31) },
            DebtSnapshot { amount: brl(900), date: date(2025, 9, 15) },
            DebtSnapshot { amount: brl(700), date: date(2025, 9, 1) },
            DebtSnapshot { amount: brl(950), date: date(2025, 10, 18) },
        ];

        let debt = monthly_debt(&snapshots).unwrap();
        assert_eq!(
            debt,
            vec![(month(2025, 8), 1000.0), (month(2025, 9), 900.0), (month(2025, 10), 950.0)]
        );
    }

    #[test]
    fn test_debt_and_invoice_axis_is_the_union() {
        let debt = vec![(month(2025, 9), 900.0), (month(2025, 10), 950.0)];
        let invoices = vec![(month(2025, 10), brl(200)), (month(2025, 12), brl(80))];

        let chart = debt_and_invoices(&debt, &invoices);

        assert_eq!(chart.months, vec![month(2025, 9), month(2025, 10), month(2025, 12)]);
        assert_eq!(chart.debt, vec![Some(900.0), Some(950.0), None]);
        assert_eq!(chart.invoices, vec![0.0, 200.0, 80.0]);
    }

    #[test]
    fn test_reserve_history_is_cumulative_and_forward_filled() {
        let entries = vec![
            ReserveEntry { amount: brl(3000), date: date(2025, 6, 10) },
            ReserveEntry { amount: brl(2000), date: date(2025, 6, 25) },
            ReserveEntry { amount: brl(4000), date: date(2025, 8, 5) },
            ReserveEntry { amount: brl(-1000), date: date(2025, 8, 20) },
        ];
        let goals = vec![brl(12000), brl(24000), brl(50000)];

        let history = reserve_history(&entries, month(2025, 10), &goals).unwrap();

        assert_eq!(
            history.balances,
            vec![
                (month(2025, 6), 5000.0),
                (month(2025, 7), 5000.0),
                (month(2025, 8), 8000.0),
                (month(2025, 9), 8000.0),
                (month(2025, 10), 8000.0),
            ]
        );
        assert_eq!(history.goal, Some(12000.0));
    }

    #[test]
    fn test_goal_selection() {
        let goals = vec![brl(12000), brl(24000), brl(50000)];
        assert_eq!(select_goal(0.0, &goals), Some(12000.0));
        assert_eq!(select_goal(12000.0, &goals), Some(24000.0));
        assert_eq!(select_goal(75000.0, &goals), Some(50000.0));
        assert_eq!(select_goal(100.0, &[]), None);
    }

    #[test]
    fn test_empty_reserve_has_no_history() {
        let history = reserve_history(&[], month(2025, 10), &[brl(12000)]).unwrap();
        assert!(history.balances.is_empty());
        assert_eq!(history.goal, None);
    }
}
