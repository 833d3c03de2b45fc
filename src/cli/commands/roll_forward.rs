use anyhow::Result;
use chrono::{Local, NaiveDate};
use common::format_brl;
use compute::{RollForward, RollForwardOutcome};
use tracing::{info, instrument};

use crate::config::Settings;

#[instrument(skip(settings))]
pub async fn roll_forward(settings: &Settings, date: Option<NaiveDate>) -> Result<RollForwardOutcome> {
    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let finance = settings.finance_config()?;

    let source = store::connect(
        &settings.source.url,
        &settings.source.api_key,
        settings.source.timeout(),
    )
    .await?;

    let outcome = RollForward::new(source.as_ref(), &finance).run(today).await?;
    info!(
        previous = %format_brl(outcome.previous_debt),
        purchases = %format_brl(outcome.credit_purchases),
        payments = %format_brl(outcome.debt_payments),
        new_debt = %format_brl(outcome.new_debt),
        reserve = %format_brl(outcome.reserve),
        reserve_write = ?outcome.reserve_write,
        "Roll-forward completed"
    );
    Ok(outcome)
}
