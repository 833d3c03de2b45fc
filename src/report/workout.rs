use compute::workout::rank::LiftMode;
use compute::{WorkoutConfig, WorkoutReport};
use model::Muscle;
use render::{Block, Chart, ImageRow, OverlayProvider, Page, Radar, Series, Table, Theme, compose_body_map};
use tracing::warn;

use super::day_month;

pub const TITLE: &str = "Treinos";

pub fn page(report: &WorkoutReport, config: &WorkoutConfig, overlays: &dyn OverlayProvider) -> Page {
    let theme = Theme::default();
    let captions: Vec<String> = report
        .weeks
        .iter()
        .map(|week| format!("{} - {}", day_month(week.range.start), day_month(week.range.end)))
        .collect();

    let body_maps = match overlays.base() {
        None => {
            warn!("Body image missing, body maps replaced by a placeholder");
            Block::Placeholder("Imagem base do corpo indisponível".to_string())
        }
        Some(base) => {
            let mut row = ImageRow::new("Intensidade semanal por músculo");
            row.height = 70.0;
            let row = report.weeks.iter().zip(&captions).fold(row, |row, (week, caption)| {
                let marks = week
                    .intensity
                    .iter()
                    .map(|(muscle, intensity)| (muscle.key(), intensity.key()));
                row.cell(
                    caption.clone(),
                    Some(compose_body_map(&base, overlays, marks)),
                    "Imagem indisponível",
                )
            });
            Block::Images(row)
        }
    };

    let mut volume = Radar::new(
        "Volume mensal por músculo (kg)",
        Muscle::ALL.iter().map(|m| m.display_name().to_string()).collect(),
        Muscle::ALL
            .iter()
            .map(|m| report.monthly_volume.get(m).copied().unwrap_or(0.0))
            .collect(),
    )
    .color(theme.series(0));
    volume.height = 75.0;

    let hrr = Chart::new("Recuperação da frequência cardíaca (média semanal)", captions)
        .series(
            Series::line(
                "HRR",
                report.weeks.iter().map(|week| Some(week.hrr_average)).collect(),
            )
            .color(theme.negative),
        )
        .height(55.0);

    let ranks = report.ranks.iter().zip(&config.lifts).fold(
        Table::new(["Exercício", "Melhor", "Relativo", "Rank"]).widths(vec![3.0, 1.5, 1.5, 1.0]),
        |table, (rank, lift)| {
            let (best, normalized) = match lift.mode {
                LiftMode::Weight => (
                    rank.best.map(|v| format!("{v:.1} kg")),
                    rank.normalized.map(|v| format!("{v:.2}x peso")),
                ),
                LiftMode::BodyweightReps => (
                    rank.best.map(|v| format!("{v:.0} reps")),
                    rank.normalized.map(|v| format!("{v:.0} reps")),
                ),
            };
            table.row([
                rank.name.clone(),
                best.unwrap_or_else(|| "-".to_string()),
                normalized.unwrap_or_else(|| "-".to_string()),
                rank.rank.clone().unwrap_or_else(|| "-".to_string()),
            ])
        },
    );

    let mut page = Page::new(TITLE);
    if let (Some(first), Some(last)) = (report.weeks.first(), report.weeks.last()) {
        page = page.subtitle(format!(
            "Últimas 4 semanas: {} a {}",
            first.range.start.format("%d/%m/%Y"),
            last.range.end.format("%d/%m/%Y")
        ));
    }
    page = page
        .block(body_maps)
        .block(Block::Radar(volume))
        .block(Block::Chart(hrr));
    if !config.lifts.is_empty() {
        page = page.block(Block::Table(ranks));
    }
    page
}
