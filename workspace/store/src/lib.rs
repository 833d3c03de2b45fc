//! Access to the externally owned backend.
//!
//! Everything the pipelines read or write goes through [`RecordSource`].
//! [`RestSource`] talks to the hosted PostgREST-style API, [`DatabaseSource`]
//! to a SQL database holding the same schema.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::DateRange;
use model::records::{
    Category, CreditPurchase, DebtSnapshot, ExerciseDefinition, FinancialEntry, HabitDefinition,
    HabitRecord, InstallmentCharge, ReserveEntry, WorkoutSet,
};
use tracing::info;

mod database;
mod error;
mod filter;
mod rest;

pub use database::DatabaseSource;
pub use error::{Result, StoreError};
pub use filter::EntryFilter;
pub use rest::{RestConfig, RestSource};

/// Outcome of an insert-or-update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// Filtered table reads plus the single-row writes of the roll-forward.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn categories(&self) -> Result<Vec<Category>>;

    async fn financial_entries(&self, filter: &EntryFilter) -> Result<Vec<FinancialEntry>>;

    /// All snapshots, oldest first.
    async fn debt_snapshots(&self) -> Result<Vec<DebtSnapshot>>;

    async fn latest_debt_snapshot(&self) -> Result<Option<DebtSnapshot>>;

    async fn delete_debt_snapshots_on(&self, date: NaiveDate) -> Result<()>;

    async fn insert_debt_snapshot(&self, snapshot: &DebtSnapshot) -> Result<()>;

    async fn credit_purchases(&self, range: DateRange) -> Result<Vec<CreditPurchase>>;

    async fn installments(&self) -> Result<Vec<InstallmentCharge>>;

    /// All reserve entries, oldest first.
    async fn reserve_entries(&self) -> Result<Vec<ReserveEntry>>;

    /// Updates the entry recorded on `entry.date`, or inserts it.
    async fn upsert_reserve_entry(&self, entry: &ReserveEntry) -> Result<Upsert>;

    /// Active habits only.
    async fn habits(&self) -> Result<Vec<HabitDefinition>>;

    async fn habit_records(&self, range: DateRange) -> Result<Vec<HabitRecord>>;

    async fn exercises(&self) -> Result<Vec<ExerciseDefinition>>;

    async fn workout_sets(&self, range: DateRange) -> Result<Vec<WorkoutSet>>;
}

/// Opens the source named by `url`: an `http(s)://` URL selects the hosted
/// API, anything else is handed to sea-orm as a database URL.
pub async fn connect(url: &str, api_key: &str, timeout: Duration) -> Result<Box<dyn RecordSource>> {
    if url.starts_with("http://") || url.starts_with("https://") {
        info!(url, "Using hosted API source");
        let source = RestSource::new(RestConfig {
            url: url.to_string(),
            api_key: api_key.to_string(),
            timeout,
        })?;
        Ok(Box::new(source))
    } else {
        info!("Using direct database source");
        let db = sea_orm::Database::connect(url).await?;
        Ok(Box::new(DatabaseSource::new(db)))
    }
}
