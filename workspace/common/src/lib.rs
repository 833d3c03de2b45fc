//! Value types shared between the compute pipelines, the renderer and the
//! binary: calendar periods and currency formatting.

mod money;
mod period;

pub use money::{format_brl, format_brl_f64};
pub use period::{DateRange, MonthKey};
