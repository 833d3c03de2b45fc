//! Monthly debt roll-forward and reserve snapshot.
//!
//! Once a day the current month is folded into the backend: a new debt
//! snapshot (previous debt + credit purchases + debt payments) and the
//! month's reserve deposits. Re-running on the same day replaces that
//! day's rows instead of adding new ones.

use chrono::NaiveDate;
use common::MonthKey;
use model::records::{CreditPurchase, DebtSnapshot, FinancialEntry, ReserveEntry};
use rust_decimal::Decimal;
use store::{EntryFilter, RecordSource, Upsert};
use tracing::{debug, info, instrument, warn};

use super::FinanceConfig;
use crate::error::Result;

/// Payments are stored as negative deltas whatever their sign in the backend.
pub fn debt_payments_total(payments: &[FinancialEntry]) -> Decimal {
    let sum: Decimal = payments.iter().map(|entry| entry.amount).sum();
    -sum.abs()
}

pub fn credit_purchases_total(purchases: &[CreditPurchase]) -> Decimal {
    purchases.iter().map(|purchase| purchase.amount).sum()
}

/// Reserve movements count as deposits regardless of sign.
pub fn reserve_total(entries: &[FinancialEntry], label: &str) -> Decimal {
    entries
        .iter()
        .filter(|entry| entry.label_contains(label))
        .map(|entry| entry.amount.abs())
        .sum()
}

pub fn next_debt(previous: Option<Decimal>, purchases: Decimal, payments: Decimal) -> Decimal {
    previous.unwrap_or(Decimal::ZERO) + purchases + payments
}

/// What one roll-forward run computed and wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct RollForwardOutcome {
    pub previous_debt: Decimal,
    pub credit_purchases: Decimal,
    pub debt_payments: Decimal,
    pub new_debt: Decimal,
    pub reserve: Decimal,
    pub reserve_write: Upsert,
}

pub struct RollForward<'a> {
    source: &'a dyn RecordSource,
    config: &'a FinanceConfig,
}

impl<'a> RollForward<'a> {
    pub fn new(source: &'a dyn RecordSource, config: &'a FinanceConfig) -> Self {
        Self { source, config }
    }

    #[instrument(skip(self), fields(today = %today))]
    pub async fn run(&self, today: NaiveDate) -> Result<RollForwardOutcome> {
        let month = MonthKey::of(today).range();

        // A failed cleanup is not fatal: the new snapshot is still the latest one
        if let Err(err) = self.source.delete_debt_snapshots_on(today).await {
            warn!(%err, "Could not delete today's debt snapshot");
        }

        let payments = self
            .source
            .financial_entries(
                &EntryFilter::within(month).category(self.config.debt_payment_category_id),
            )
            .await?;
        let purchases = self.source.credit_purchases(month).await?;

        let debt_payments = debt_payments_total(&payments);
        let credit_purchases = credit_purchases_total(&purchases);
        debug!(%debt_payments, %credit_purchases, "Month totals");

        let previous = self
            .source
            .latest_debt_snapshot()
            .await?
            .map(|snapshot| snapshot.amount);
        let new_debt = next_debt(previous, credit_purchases, debt_payments);

        self.source
            .insert_debt_snapshot(&DebtSnapshot {
                amount: new_debt,
                date: today,
            })
            .await?;
        info!(
            previous = %previous.unwrap_or(Decimal::ZERO),
            %credit_purchases,
            %debt_payments,
            %new_debt,
            "Debt snapshot written"
        );

        let reserve_entries = self
            .source
            .financial_entries(&EntryFilter::within(month).label(self.config.reserve_label.clone()))
            .await?;
        let reserve = reserve_total(&reserve_entries, &self.config.reserve_label);
        let reserve_write = self
            .source
            .upsert_reserve_entry(&ReserveEntry {
                amount: reserve,
                date: today,
            })
            .await?;
        info!(entries = reserve_entries.len(), %reserve, ?reserve_write, "Reserve snapshot written");

        Ok(RollForwardOutcome {
            previous_debt: previous.unwrap_or(Decimal::ZERO),
            credit_purchases,
            debt_payments,
            new_debt,
            reserve,
            reserve_write,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_debt_payments_are_negative() {
        let entry = |amount: i64| FinancialEntry {
            amount: brl(amount),
            category_id: 7,
            recorded_at: date(2025, 10, 2).and_hms_opt(9, 0, 0).unwrap(),
            label: None,
        };
        assert_eq!(debt_payments_total(&[entry(120), entry(80)]), brl(-200));
        assert_eq!(debt_payments_total(&[entry(-120), entry(-80)]), brl(-200));
        assert_eq!(debt_payments_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_next_debt_without_history_starts_at_zero() {
        assert_eq!(next_debt(None, brl(150), brl(-200)), brl(-50));
        assert_eq!(next_debt(Some(brl(1000)), brl(150), brl(-200)), brl(950));
    }

    #[tokio::test]
    async fn test_roll_forward_scenario() -> Result<()> {
        let source = setup_source().await.unwrap();
        let today = date(2025, 10, 18);

        let mut categories = Vec::new();
        for name in ["Entradas", "Mercado", "Investimento", "Aluguel", "Lazer", "Saude", "Cartao"] {
            categories.push(new_category(&source, name).await.unwrap());
        }
        let card = &categories[6];
        assert_eq!(card.id, 7);

        new_debt_snapshot(&source, date(2025, 9, 30), 1000).await.unwrap();
        new_entry(&source, card, date(2025, 10, 5), -200, "Fatura").await.unwrap();
        new_entry(&source, card, date(2025, 9, 5), -500, "Fatura").await.unwrap();
        new_credit_purchase(&source, date(2025, 10, 9), 150).await.unwrap();
        new_credit_purchase(&source, date(2025, 11, 1), 999).await.unwrap();
        new_entry(&source, &categories[2], date(2025, 10, 3), -300, "Aporte reserva").await.unwrap();
        new_entry(&source, &categories[2], date(2025, 10, 10), 200, "RESERVA extra").await.unwrap();
        new_entry(&source, &categories[1], date(2025, 10, 11), -80, "Feira").await.unwrap();

        let config = FinanceConfig::default();
        let roll = RollForward::new(&source, &config);

        let first = roll.run(today).await?;
        assert_eq!(first.previous_debt, brl(1000));
        assert_eq!(first.debt_payments, brl(-200));
        assert_eq!(first.credit_purchases, brl(150));
        assert_eq!(first.new_debt, brl(950));
        assert_eq!(first.reserve, brl(500));
        assert_eq!(first.reserve_write, Upsert::Inserted);

        // same day again: today's snapshot is replaced, not compounded
        let second = roll.run(today).await?;
        assert_eq!(second.new_debt, brl(950));
        assert_eq!(second.reserve_write, Upsert::Updated);

        let snapshots = source.debt_snapshots().await?;
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1].amount, brl(950));
        assert_eq!(source.reserve_entries().await?.len(), 1);

        Ok(())
    }
}
