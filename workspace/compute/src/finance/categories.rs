use std::collections::{BTreeMap, BTreeSet};

use common::MonthKey;
use model::records::{Category, FinancialEntry};
use rust_decimal::Decimal;
use tracing::debug;

/// At most this many categories are compared.
pub const TOP_CATEGORIES: usize = 10;

/// Spending is still under control while it grows at most 15% month over month.
const CONTROLLED_GROWTH: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Controlled,
    Overshoot,
}

impl Trend {
    /// Without a previous value there is nothing to compare with, which
    /// counts as an overshoot.
    pub fn classify(current: Decimal, previous: Decimal) -> Self {
        if previous > Decimal::ZERO && current <= previous * CONTROLLED_GROWTH {
            Trend::Controlled
        } else {
            Trend::Overshoot
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryComparison {
    pub category_id: i32,
    pub name: String,
    pub current: Decimal,
    pub previous: Decimal,
    pub trend: Trend,
}

/// Absolute value of the per-category sum of `expenses` in `month`.
pub fn expenses_by_category(expenses: &[FinancialEntry], month: MonthKey) -> BTreeMap<i32, Decimal> {
    let mut sums: BTreeMap<i32, Decimal> = BTreeMap::new();
    for entry in expenses.iter().filter(|entry| month.contains(entry.date())) {
        *sums.entry(entry.category_id).or_insert(Decimal::ZERO) += entry.amount;
    }
    sums.into_iter().map(|(id, sum)| (id, sum.abs())).collect()
}

/// Compares `month` with the month before it, largest current spending first.
pub fn compare_months(
    expenses: &[FinancialEntry],
    categories: &[Category],
    month: MonthKey,
) -> Vec<CategoryComparison> {
    let current = expenses_by_category(expenses, month);
    let previous = expenses_by_category(expenses, month.prev());

    let ids: BTreeSet<i32> = current.keys().chain(previous.keys()).copied().collect();
    let mut rows: Vec<CategoryComparison> = ids
        .into_iter()
        .map(|id| {
            let current = current.get(&id).copied().unwrap_or(Decimal::ZERO);
            let previous = previous.get(&id).copied().unwrap_or(Decimal::ZERO);
            CategoryComparison {
                category_id: id,
                name: category_name(categories, id),
                current,
                previous,
                trend: Trend::classify(current, previous),
            }
        })
        .filter(|row| row.current > Decimal::ZERO || row.previous > Decimal::ZERO)
        .collect();

    rows.sort_by(|a, b| {
        b.current
            .cmp(&a.current)
            .then(b.previous.cmp(&a.previous))
            .then(a.category_id.cmp(&b.category_id))
    });
    rows.truncate(TOP_CATEGORIES);

    debug!(month = %month, categories = rows.len(), "Compared category spending");
    rows
}

fn category_name(categories: &[Category], id: i32) -> String {
    categories
        .iter()
        .find(|category| category.id == id)
        .map(|category| category.name.clone())
        .unwrap_or_else(|| format!("#{id}"))
}
