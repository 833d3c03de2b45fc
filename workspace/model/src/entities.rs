//! SeaORM entities for the backend tables. Table and column names are the
//! backend's own (Portuguese); field names are English.

pub mod category;
pub mod credit_purchase;
pub mod debt_snapshot;
pub mod exercise;
pub mod financial_entry;
pub mod habit;
pub mod habit_record;
pub mod installment;
pub mod reserve_entry;
pub mod workout_set;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::category::Entity as Category;
    pub use super::credit_purchase::Entity as CreditPurchase;
    pub use super::debt_snapshot::Entity as DebtSnapshot;
    pub use super::exercise::Entity as Exercise;
    pub use super::financial_entry::Entity as FinancialEntry;
    pub use super::habit::Entity as Habit;
    pub use super::habit_record::Entity as HabitRecord;
    pub use super::installment::Entity as Installment;
    pub use super::reserve_entry::Entity as ReserveEntry;
    pub use super::workout_set::Entity as WorkoutSet;
}
