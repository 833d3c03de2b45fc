use compute::HabitReport;
use render::{Block, Chart, Heatmap, Page, Series, Stat, Table, Theme};

use super::percent;

pub const TITLE: &str = "Hábitos";

pub fn page(report: &HabitReport) -> Page {
    let theme = Theme::default();
    let stats = &report.stats;
    let month = report.month;

    let calendar = report.calendar.iter().fold(
        Heatmap::new(
            "Calendário do mês",
            (1..=month.days()).map(|day| day.to_string()).collect(),
        ),
        |heatmap, row| {
            let levels = row.levels.iter().map(|level| (*level).clamp(0, 4) as u8).collect();
            heatmap.row(row.name.clone(), levels)
        },
    );

    let ranking = Chart::new(
        "Ranking do mês",
        report.ranking.iter().map(|rate| rate.name.clone()).collect(),
    )
    .series(
        Series::bar("Taxa (%)", report.ranking.iter().map(|rate| rate.rate).collect())
            .color(theme.level(3)),
    )
    .y_range(0.0, 100.0)
    .height(50.0);

    let months = report.overall.iter().map(|(month, _)| month.abbrev());
    let yearly = report.yearly.iter().fold(
        Table::new(
            std::iter::once("Hábito".to_string())
                .chain(months.clone())
                .chain(std::iter::once("Média".to_string())),
        )
        .widths(
            std::iter::once(3.0)
                .chain(std::iter::repeat_n(1.0, report.overall.len()))
                .chain(std::iter::once(1.3))
                .collect(),
        )
        .row_height(5.0),
        |table, row| {
            table.row(
                std::iter::once(row.name.clone())
                    .chain(row.monthly.iter().map(|rate| format!("{rate:.0}%")))
                    .chain(std::iter::once(percent(row.mean))),
            )
        },
    );

    let overall = Chart::new(format!("Taxa geral por mês ({})", month.year()), months.collect())
        .series(
            Series::line(
                "Geral",
                report
                    .overall
                    .iter()
                    .map(|(_, rate)| Some(*rate).filter(|rate| rate.is_finite()))
                    .collect(),
            )
            .color(theme.positive),
        )
        .y_range(0.0, 100.0)
        .height(55.0);

    Page::new(TITLE)
        .subtitle(format!("{} de {}", month.name(), month.year()))
        .block(Block::Stats(vec![
            Stat::new("Hábitos ativos", stats.habit_count.to_string()),
            Stat::new("Dias no mês", stats.days.to_string()),
            Stat::new("Dias cumpridos", format!("{} de {}", stats.completed, stats.possible)),
            Stat::new("Taxa do mês", percent(stats.rate)).color(theme.positive),
        ]))
        .block(Block::Heatmap(calendar))
        .block(Block::Chart(ranking))
        .block(Block::Table(yearly))
        .block(Block::Chart(overall))
}
