use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use common::DateRange;
use model::entities::{
    category, credit_purchase, debt_snapshot, exercise, financial_entry, habit, habit_record,
    installment, reserve_entry, workout_set,
};
use model::records::{
    Category, CreditPurchase, DebtSnapshot, ExerciseDefinition, FinancialEntry, HabitDefinition,
    HabitRecord, InstallmentCharge, ReserveEntry, WorkoutSet,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::{debug, instrument, trace};

use crate::error::Result;
use crate::filter::EntryFilter;
use crate::{RecordSource, Upsert};

/// Record source backed by a SQL database holding the backend schema.
pub struct DatabaseSource {
    db: DatabaseConnection,
}

impl DatabaseSource {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn records<M, R: From<M>>(models: Vec<M>) -> Vec<R> {
    models.into_iter().map(R::from).collect()
}

#[async_trait]
impl RecordSource for DatabaseSource {
    async fn categories(&self) -> Result<Vec<Category>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;
        Ok(records(models))
    }

    #[instrument(skip(self))]
    async fn financial_entries(&self, filter: &EntryFilter) -> Result<Vec<FinancialEntry>> {
        let mut condition = Condition::all();
        if let Some(category_id) = filter.category_id {
            condition = condition.add(financial_entry::Column::CategoryId.eq(category_id));
        }
        if let Some(range) = filter.range {
            condition = condition
                .add(financial_entry::Column::RecordedAt.gte(range.start.and_time(NaiveTime::MIN)))
                .add(
                    financial_entry::Column::RecordedAt
                        .lt(range.end_exclusive().and_time(NaiveTime::MIN)),
                );
        }

        let models = financial_entry::Entity::find()
            .filter(condition)
            .order_by_asc(financial_entry::Column::RecordedAt)
            .all(&self.db)
            .await?;
        trace!(rows = models.len(), "Fetched financial entries before label filter");

        // Label matching stays in Rust: SQL LIKE case folding differs per backend
        let entries: Vec<FinancialEntry> = records::<_, FinancialEntry>(models)
            .into_iter()
            .filter(|entry| {
                filter
                    .label_contains
                    .as_deref()
                    .is_none_or(|needle| entry.label_contains(needle))
            })
            .collect();
        debug!(rows = entries.len(), "Fetched financial entries");
        Ok(entries)
    }

    async fn debt_snapshots(&self) -> Result<Vec<DebtSnapshot>> {
        let models = debt_snapshot::Entity::find()
            .order_by_asc(debt_snapshot::Column::Date)
            .order_by_asc(debt_snapshot::Column::Id)
            .all(&self.db)
            .await?;
        Ok(records(models))
    }

    async fn latest_debt_snapshot(&self) -> Result<Option<DebtSnapshot>> {
        let model = debt_snapshot::Entity::find()
            .order_by_desc(debt_snapshot::Column::Date)
            .order_by_desc(debt_snapshot::Column::Id)
            .limit(1)
            .one(&self.db)
            .await?;
        Ok(model.map(DebtSnapshot::from))
    }

    async fn delete_debt_snapshots_on(&self, date: NaiveDate) -> Result<()> {
        let result = debt_snapshot::Entity::delete_many()
            .filter(debt_snapshot::Column::Date.eq(date))
            .exec(&self.db)
            .await?;
        debug!(%date, deleted = result.rows_affected, "Deleted debt snapshots");
        Ok(())
    }

    async fn insert_debt_snapshot(&self, snapshot: &DebtSnapshot) -> Result<()> {
        debt_snapshot::ActiveModel {
            amount: Set(snapshot.amount),
            date: Set(snapshot.date),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }

    async fn credit_purchases(&self, range: DateRange) -> Result<Vec<CreditPurchase>> {
        let models = credit_purchase::Entity::find()
            .filter(
                Condition::all()
                    .add(credit_purchase::Column::Date.gte(range.start))
                    .add(credit_purchase::Column::Date.lte(range.end)),
            )
            .all(&self.db)
            .await?;
        Ok(records(models))
    }

    async fn installments(&self) -> Result<Vec<InstallmentCharge>> {
        let models = installment::Entity::find()
            .order_by_asc(installment::Column::DueDate)
            .all(&self.db)
            .await?;
        Ok(records(models))
    }

    async fn reserve_entries(&self) -> Result<Vec<ReserveEntry>> {
        let models = reserve_entry::Entity::find()
            .order_by_asc(reserve_entry::Column::Date)
            .order_by_asc(reserve_entry::Column::Id)
            .all(&self.db)
            .await?;
        Ok(records(models))
    }

    async fn upsert_reserve_entry(&self, entry: &ReserveEntry) -> Result<Upsert> {
        let existing = reserve_entry::Entity::find()
            .filter(reserve_entry::Column::Date.eq(entry.date))
            .one(&self.db)
            .await?;

        match existing {
            Some(_) => {
                reserve_entry::Entity::update_many()
                    .col_expr(
                        reserve_entry::Column::Amount,
                        sea_orm::sea_query::Expr::value(entry.amount),
                    )
                    .filter(reserve_entry::Column::Date.eq(entry.date))
                    .exec(&self.db)
                    .await?;
                Ok(Upsert::Updated)
            }
            None => {
                reserve_entry::ActiveModel {
                    amount: Set(entry.amount),
                    date: Set(entry.date),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?;
                Ok(Upsert::Inserted)
            }
        }
    }

    async fn habits(&self) -> Result<Vec<HabitDefinition>> {
        let models = habit::Entity::find()
            .filter(habit::Column::Active.eq(true))
            .order_by_asc(habit::Column::Id)
            .all(&self.db)
            .await?;
        Ok(records(models))
    }

    async fn habit_records(&self, range: DateRange) -> Result<Vec<HabitRecord>> {
        let models = habit_record::Entity::find()
            .filter(
                Condition::all()
                    .add(habit_record::Column::Date.gte(range.start))
                    .add(habit_record::Column::Date.lte(range.end)),
            )
            .order_by_asc(habit_record::Column::Date)
            .all(&self.db)
            .await?;
        Ok(records(models))
    }

    async fn exercises(&self) -> Result<Vec<ExerciseDefinition>> {
        let models = exercise::Entity::find()
            .order_by_asc(exercise::Column::Id)
            .all(&self.db)
            .await?;
        Ok(records(models))
    }

    async fn workout_sets(&self, range: DateRange) -> Result<Vec<WorkoutSet>> {
        let models = workout_set::Entity::find()
            .filter(
                Condition::all()
                    .add(workout_set::Column::PerformedAt.gte(range.start.and_time(NaiveTime::MIN)))
                    .add(
                        workout_set::Column::PerformedAt
                            .lt(range.end_exclusive().and_time(NaiveTime::MIN)),
                    ),
            )
            .order_by_asc(workout_set::Column::PerformedAt)
            .all(&self.db)
            .await?;
        Ok(records(models))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{ConnectionTrait, Database};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup_source() -> DatabaseSource {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await.unwrap();
        Migrator::up(&db, None).await.expect("Migrations failed.");
        DatabaseSource::new(db)
    }

    async fn insert_entry(source: &DatabaseSource, category_id: i32, amount: i64, on: NaiveDate, label: &str) {
        financial_entry::ActiveModel {
            amount: Set(Decimal::new(amount, 0)),
            category_id: Set(category_id),
            recorded_at: Set(on.and_hms_opt(12, 0, 0).unwrap()),
            label: Set(Some(label.to_string())),
            ..Default::default()
        }
        .insert(source.connection())
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_financial_entry_filters_combine() {
        let source = setup_source().await;
        for name in ["Entradas", "Pagamento divida"] {
            category::ActiveModel {
                name: Set(name.to_string()),
                ..Default::default()
            }
            .insert(source.connection())
            .await
            .unwrap();
        }

        insert_entry(&source, 2, -200, date(2025, 10, 3), "Fatura cartao").await;
        insert_entry(&source, 2, -50, date(2025, 9, 30), "Fatura cartao").await;
        insert_entry(&source, 1, -300, date(2025, 10, 31), "Aporte Reserva").await;
        insert_entry(&source, 1, 5000, date(2025, 11, 1), "Salario").await;

        let october = DateRange::new(date(2025, 10, 1), date(2025, 10, 31));

        let payments = source
            .financial_entries(&EntryFilter::within(october).category(2))
            .await
            .unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, Decimal::new(-200, 0));

        let reserve = source
            .financial_entries(&EntryFilter::within(october).label("RESERVA"))
            .await
            .unwrap();
        assert_eq!(reserve.len(), 1);
        assert_eq!(reserve[0].date(), date(2025, 10, 31));

        let all = source.financial_entries(&EntryFilter::default()).await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_debt_snapshot_latest_and_delete() {
        let source = setup_source().await;
        assert!(source.latest_debt_snapshot().await.unwrap().is_none());

        for (amount, day) in [(1000, date(2025, 9, 30)), (1200, date(2025, 10, 18))] {
            source
                .insert_debt_snapshot(&DebtSnapshot {
                    amount: Decimal::new(amount, 0),
                    date: day,
                })
                .await
                .unwrap();
        }

        let latest = source.latest_debt_snapshot().await.unwrap().unwrap();
        assert_eq!(latest.amount, Decimal::new(1200, 0));

        source.delete_debt_snapshots_on(date(2025, 10, 18)).await.unwrap();
        let latest = source.latest_debt_snapshot().await.unwrap().unwrap();
        assert_eq!(latest.date, date(2025, 9, 30));
        assert_eq!(source.debt_snapshots().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reserve_upsert_is_per_day() {
        let source = setup_source().await;
        let entry = |amount: i64, day| ReserveEntry {
            amount: Decimal::new(amount, 0),
            date: day,
        };

        let first = source.upsert_reserve_entry(&entry(300, date(2025, 10, 18))).await.unwrap();
        let second = source.upsert_reserve_entry(&entry(450, date(2025, 10, 18))).await.unwrap();
        let third = source.upsert_reserve_entry(&entry(100, date(2025, 10, 19))).await.unwrap();

        assert_eq!(first, Upsert::Inserted);
        assert_eq!(second, Upsert::Updated);
        assert_eq!(third, Upsert::Inserted);

        let entries = source.reserve_entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].amount, Decimal::new(450, 0));
    }

    #[tokio::test]
    async fn test_only_active_habits_are_listed() {
        let source = setup_source().await;
        for (name, active) in [("Leitura", true), ("Meditar", false)] {
            habit::ActiveModel {
                name: Set(name.to_string()),
                active: Set(active),
                ..Default::default()
            }
            .insert(source.connection())
            .await
            .unwrap();
        }

        let habits = source.habits().await.unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].name, "Leitura");
    }

    #[tokio::test]
    async fn test_workout_sets_respect_whole_days() {
        let source = setup_source().await;
        let bench = exercise::ActiveModel {
            name: Set("Supino".to_string()),
            primary_muscle: Set("Peito".to_string()),
            secondary_muscles: Set(Some("Triceps".to_string())),
            ..Default::default()
        }
        .insert(source.connection())
        .await
        .unwrap();

        for (day, hour) in [(date(2025, 10, 12), 23), (date(2025, 10, 18), 21), (date(2025, 10, 19), 0)] {
            workout_set::ActiveModel {
                exercise_id: Set(bench.id),
                weight: Set(Some("60".to_string())),
                reps: Set(Some("10".to_string())),
                duration: Set(None),
                performed_at: Set(day.and_hms_opt(hour, 30, 0).unwrap()),
                ..Default::default()
            }
            .insert(source.connection())
            .await
            .unwrap();
        }

        let week = DateRange::ending_on(date(2025, 10, 18), 7);
        let sets = source.workout_sets(week).await.unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].weight, 60.0);
    }
}
