use common::{format_brl, format_brl_f64};
use compute::FinanceReport;
use compute::finance::categories::Trend;
use render::{Block, Chart, Page, Series, Stat, Theme};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub const TITLE: &str = "Finanças";

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

pub fn page(report: &FinanceReport) -> Page {
    let theme = Theme::default();
    let summary = &report.summary;
    let month = report.month;
    let year = month.year();

    let balance_color = if summary.balance < Decimal::ZERO {
        theme.negative
    } else {
        theme.positive
    };

    let categories = Chart::new(
        format!("Gastos por categoria: {} x {}", month.prev().abbrev(), month.abbrev()),
        report.categories.iter().map(|c| c.name.clone()).collect(),
    )
    .series(
        Series::bar(
            "Mês anterior",
            report.categories.iter().map(|c| to_f64(c.previous)).collect(),
        )
        .color(theme.muted),
    )
    .series(
        Series::bar(
            "Mês atual",
            report.categories.iter().map(|c| to_f64(c.current)).collect(),
        )
        .color(theme.negative)
        .point_colors(
            report
                .categories
                .iter()
                .map(|c| match c.trend {
                    Trend::Controlled => theme.positive,
                    Trend::Overshoot => theme.negative,
                })
                .collect(),
        ),
    );

    let debt = Chart::new(
        "Dívida do cartão e faturas futuras",
        report.debt.months.iter().map(|m| m.axis_label(year)).collect(),
    )
    .series(Series::bar("Faturas a vencer", report.debt.invoices.clone()).color(theme.series(1)))
    .series(Series::line("Dívida", report.debt.debt.clone()).color(theme.series(0)))
    .height(65.0);

    let mut reserve = Chart::new(
        "Reserva de emergência",
        report.reserve.balances.iter().map(|(m, _)| m.axis_label(year)).collect(),
    )
    .series(
        Series::line(
            "Saldo",
            report.reserve.balances.iter().map(|(_, balance)| Some(*balance)).collect(),
        )
        .color(theme.positive),
    )
    .height(65.0);
    if let Some(goal) = report.reserve.goal {
        reserve = reserve.reference(format!("Meta {}", format_brl_f64(goal)), goal);
    }

    Page::new(TITLE)
        .subtitle(format!("{} de {}", month.name(), year))
        .block(Block::Stats(vec![
            Stat::new("Entradas", format_brl(summary.income)).color(theme.positive),
            Stat::new("Saídas", format_brl(summary.expenses)).color(theme.negative),
            Stat::new("Balanço", format_brl(summary.balance)).color(balance_color),
        ]))
        .block(Block::Chart(categories))
        .block(Block::Chart(debt))
        .block(Block::Chart(reserve))
        .footer_note(format!(
            "Resumo ({:02}/{}): Entradas {} | Saídas {} | Balanço {}",
            month.month(),
            year,
            format_brl(summary.income),
            format_brl(summary.expenses),
            format_brl(summary.balance),
        ))
}
