//! Data model of the externally owned backend.
//!
//! `entities` mirrors the backend tables for direct SQL access (and for the
//! local migrations), `records` holds the plain values the pipelines work on.
//! Both speak the backend's column names; Rust names are English.

pub mod de;
pub mod entities;
pub mod muscle;
pub mod records;

pub use muscle::{Muscle, MuscleLabel};
pub use records::{
    Category, CreditPurchase, DebtSnapshot, ExerciseDefinition, FinancialEntry, HabitDefinition,
    HabitRecord, InstallmentCharge, ReserveEntry, WorkoutSet,
};
