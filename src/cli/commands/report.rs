use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use render::PdfRenderer;
use tracing::{info, instrument};

use crate::config::Settings;
use crate::report;

#[instrument(skip(settings, output))]
pub async fn generate_report(
    settings: &Settings,
    date: Option<NaiveDate>,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let finance = settings.finance_config()?;
    let workout = settings.workout_config()?;
    let overlays = settings.assets.overlays();

    let source = store::connect(
        &settings.source.url,
        &settings.source.api_key,
        settings.source.timeout(),
    )
    .await?;

    let pages = report::build_pages(source.as_ref(), &finance, &workout, &overlays, today).await?;

    let path = output.unwrap_or_else(|| settings.output.path.clone());
    PdfRenderer::new(settings.output.title.clone(), Local::now().naive_local()).write(&pages, &path)?;
    info!(path = %path.display(), %today, "Report generated");
    Ok(path)
}
