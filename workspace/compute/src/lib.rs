//! Report pipelines. Each pipeline reads what it needs from a
//! [`store::RecordSource`] and returns a plain report value for rendering;
//! nothing here knows about pages or PDF.

pub mod error;
pub mod finance;
pub mod habits;
pub mod window;
pub mod workout;

#[cfg(test)]
mod testing;

pub use error::{ComputeError, Result};
pub use finance::{FinanceConfig, FinanceReport, RollForward, RollForwardOutcome};
pub use habits::HabitReport;
pub use workout::{WorkoutConfig, WorkoutReport};
