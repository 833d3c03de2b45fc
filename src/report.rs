//! Runs the three pipelines and turns their results into report pages.
//!
//! A finance failure aborts the report. Habits and workouts degrade to a
//! placeholder page so the rest of the report is still produced.

mod finance;
mod habits;
mod workout;

use anyhow::Result;
use chrono::NaiveDate;
use compute::{ComputeError, FinanceConfig, WorkoutConfig};
use render::{OverlayProvider, Page};
use store::RecordSource;
use tracing::{error, info, instrument, warn};

#[instrument(skip_all, fields(%today))]
pub async fn build_pages(
    source: &dyn RecordSource,
    finance_config: &FinanceConfig,
    workout_config: &WorkoutConfig,
    overlays: &dyn OverlayProvider,
    today: NaiveDate,
) -> Result<Vec<Page>> {
    let finance_report = match compute::finance::build_report(source, finance_config, today).await {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "Finance section failed, aborting report");
            return Err(err.into());
        }
    };

    let habits_page = match compute::habits::build_report(source, today).await {
        Ok(report) => habits::page(&report),
        Err(err) => {
            warn!(error = %err, "Habit section degraded");
            Page::placeholder(habits::TITLE, degraded(&err))
        }
    };

    let workout_page = match compute::workout::build_report(source, workout_config, today).await {
        Ok(report) => workout::page(&report, workout_config, overlays),
        Err(err) => {
            warn!(error = %err, "Workout section degraded");
            Page::placeholder(workout::TITLE, degraded(&err))
        }
    };

    let pages = vec![habits_page, finance::page(&finance_report), workout_page];
    info!(
        degraded = pages.iter().filter(|page| page.is_placeholder()).count(),
        "Report pages built"
    );
    Ok(pages)
}

/// Placeholder text of a degraded section.
fn degraded(err: &ComputeError) -> String {
    match err {
        ComputeError::MissingReference(what) => format!("Sem dados para esta seção ({what})"),
        other => format!("Seção indisponível: {other}"),
    }
}

/// `33,3%`
fn percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}%").replace('.', ",")
    } else {
        "-".to_string()
    }
}

/// `12/10`
fn day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}
