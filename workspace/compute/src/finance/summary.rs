use common::MonthKey;
use model::records::{Category, FinancialEntry};
use rust_decimal::Decimal;

use crate::error::{ComputeError, Result};

/// Income, expenses and balance of one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Finds the category that marks income. Its absence is fatal for the
/// finance pipeline.
pub fn income_category<'a>(categories: &'a [Category], name: &str) -> Result<&'a Category> {
    categories
        .iter()
        .find(|category| category.is_named(name))
        .ok_or_else(|| {
            ComputeError::MissingReference(format!("no entry category named '{name}'"))
        })
}

/// Splits entries into `(income, expenses)`.
pub fn split_income(
    entries: Vec<FinancialEntry>,
    income_category_id: i32,
) -> (Vec<FinancialEntry>, Vec<FinancialEntry>) {
    entries
        .into_iter()
        .partition(|entry| entry.category_id == income_category_id)
}

pub fn month_summary(
    income: &[FinancialEntry],
    expenses: &[FinancialEntry],
    month: MonthKey,
) -> MonthSummary {
    let income: Decimal = income
        .iter()
        .filter(|entry| month.contains(entry.date()))
        .map(|entry| entry.amount)
        .sum();
    let expenses: Decimal = expenses
        .iter()
        .filter(|entry| month.contains(entry.date()))
        .map(|entry| entry.amount.abs())
        .sum();

    MonthSummary {
        month,
        income,
        expenses,
        balance: income - expenses,
    }
}
