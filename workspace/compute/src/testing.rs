//! Fixtures for tests that need a backend: an in-memory SQLite database with
//! the migrations applied, wrapped in a `DatabaseSource`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DbErr, Set};

use migration::{Migrator, MigratorTrait};
use model::entities::{
    category, credit_purchase, debt_snapshot, exercise, financial_entry, habit, habit_record,
    installment, reserve_entry, workout_set,
};
use store::DatabaseSource;

type DbResult<T> = std::result::Result<T, DbErr>;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn brl(amount: i64) -> Decimal {
    Decimal::new(amount * 100, 2)
}

pub async fn setup_source() -> DbResult<DatabaseSource> {
    let db = Database::connect("sqlite::memory:").await?;
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
    Migrator::up(&db, None).await.expect("Migrations failed.");
    Ok(DatabaseSource::new(db))
}

pub async fn new_category(source: &DatabaseSource, name: &str) -> DbResult<category::Model> {
    category::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(source.connection())
    .await
}

pub async fn new_entry(
    source: &DatabaseSource,
    category: &category::Model,
    on: NaiveDate,
    amount: i64,
    label: &str,
) -> DbResult<financial_entry::Model> {
    financial_entry::ActiveModel {
        amount: Set(brl(amount)),
        category_id: Set(category.id),
        recorded_at: Set(on.and_hms_opt(10, 0, 0).unwrap()),
        label: Set(Some(label.to_string())),
        ..Default::default()
    }
    .insert(source.connection())
    .await
}

pub async fn new_debt_snapshot(
    source: &DatabaseSource,
    on: NaiveDate,
    amount: i64,
) -> DbResult<debt_snapshot::Model> {
    debt_snapshot::ActiveModel {
        amount: Set(brl(amount)),
        date: Set(on),
        ..Default::default()
    }
    .insert(source.connection())
    .await
}

pub async fn new_reserve_entry(
    source: &DatabaseSource,
    on: NaiveDate,
    amount: i64,
) -> DbResult<reserve_entry::Model> {
    reserve_entry::ActiveModel {
        amount: Set(brl(amount)),
        date: Set(on),
        ..Default::default()
    }
    .insert(source.connection())
    .await
}

pub async fn new_credit_purchase(
    source: &DatabaseSource,
    on: NaiveDate,
    amount: i64,
) -> DbResult<credit_purchase::Model> {
    credit_purchase::ActiveModel {
        amount: Set(brl(amount)),
        date: Set(on),
        ..Default::default()
    }
    .insert(source.connection())
    .await
}

pub async fn new_installment(
    source: &DatabaseSource,
    due: NaiveDate,
    amount: i64,
    paid: bool,
) -> DbResult<installment::Model> {
    installment::ActiveModel {
        amount: Set(brl(amount)),
        due_date: Set(due),
        paid: Set(paid),
        ..Default::default()
    }
    .insert(source.connection())
    .await
}

pub async fn new_habit(source: &DatabaseSource, name: &str, active: bool) -> DbResult<habit::Model> {
    habit::ActiveModel {
        name: Set(name.to_string()),
        active: Set(active),
        ..Default::default()
    }
    .insert(source.connection())
    .await
}

pub async fn new_habit_record(
    source: &DatabaseSource,
    habit: &habit::Model,
    on: NaiveDate,
    level: i32,
) -> DbResult<habit_record::Model> {
    habit_record::ActiveModel {
        habit_id: Set(habit.id),
        date: Set(on),
        level: Set(level),
        ..Default::default()
    }
    .insert(source.connection())
    .await
}

pub async fn new_exercise(
    source: &DatabaseSource,
    name: &str,
    primary: &str,
    secondary: Option<&str>,
) -> DbResult<exercise::Model> {
    exercise::ActiveModel {
        name: Set(name.to_string()),
        primary_muscle: Set(primary.to_string()),
        secondary_muscles: Set(secondary.map(str::to_string)),
        ..Default::default()
    }
    .insert(source.connection())
    .await
}

pub async fn new_workout_set(
    source: &DatabaseSource,
    exercise: &exercise::Model,
    on: NaiveDate,
    weight: &str,
    reps: &str,
) -> DbResult<workout_set::Model> {
    workout_set::ActiveModel {
        exercise_id: Set(exercise.id),
        weight: Set(Some(weight.to_string())),
        reps: Set(Some(reps.to_string())),
        duration: Set(None),
        performed_at: Set(on.and_hms_opt(19, 0, 0).unwrap()),
        ..Default::default()
    }
    .insert(source.connection())
    .await
}
