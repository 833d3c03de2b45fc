//! Finance pipeline: month summary, category comparison, debt and invoice
//! projection, reserve history, and the daily roll-forward.

pub mod categories;
pub mod history;
pub mod invoices;
pub mod rollforward;
pub mod summary;

use chrono::NaiveDate;
use common::{DateRange, MonthKey};
use rust_decimal::Decimal;
use store::{EntryFilter, RecordSource};
use tracing::{info, instrument};

use crate::error::Result;
use categories::CategoryComparison;
use history::{DebtAndInvoices, ReserveHistory};
use summary::MonthSummary;

pub use rollforward::{RollForward, RollForwardOutcome};

#[derive(Debug, Clone, PartialEq)]
pub struct FinanceConfig {
    /// Name of the category holding income entries (case-insensitive).
    pub income_category: String,
    pub debt_payment_category_id: i32,
    /// Entries whose label contains this (case-insensitive) are reserve deposits.
    pub reserve_label: String,
    /// Ascending reserve goals.
    pub reserve_goals: Vec<Decimal>,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            income_category: "Entradas".to_string(),
            debt_payment_category_id: 7,
            reserve_label: "reserva".to_string(),
            reserve_goals: vec![
                Decimal::new(12_000, 0),
                Decimal::new(24_000, 0),
                Decimal::new(50_000, 0),
            ],
        }
    }
}

/// Everything the finance page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceReport {
    pub month: MonthKey,
    pub summary: MonthSummary,
    pub categories: Vec<CategoryComparison>,
    pub debt: DebtAndInvoices,
    pub reserve: ReserveHistory,
}

#[instrument(skip(source, config))]
pub async fn build_report(
    source: &dyn RecordSource,
    config: &FinanceConfig,
    today: NaiveDate,
) -> Result<FinanceReport> {
    let month = MonthKey::of(today);

    let categories = source.categories().await?;
    let income_id = summary::income_category(&categories, &config.income_category)?.id;

    let window = DateRange::new(month.prev().first_day(), month.last_day());
    let entries = source.financial_entries(&EntryFilter::within(window)).await?;
    let (income, expenses) = summary::split_income(entries, income_id);

    let snapshots = source.debt_snapshots().await?;
    let installments = source.installments().await?;
    let reserve_entries = source.reserve_entries().await?;

    let summary = summary::month_summary(&income, &expenses, month);
    let comparison = categories::compare_months(&expenses, &categories, month);
    let debt = history::debt_and_invoices(
        &history::monthly_debt(&snapshots)?,
        &invoices::future_invoices(&installments, month),
    );
    let reserve = history::reserve_history(&reserve_entries, month, &config.reserve_goals)?;

    info!(
        month = %month,
        income = %summary.income,
        expenses = %summary.expenses,
        categories = comparison.len(),
        debt_months = debt.months.len(),
        reserve_months = reserve.balances.len(),
        "Finance report computed"
    );

    Ok(FinanceReport {
        month,
        summary,
        categories: comparison,
        debt,
        reserve,
    })
}
