//! Drawing of page blocks. Every function receives the frame of its block:
//! left edge, top edge, width and height in millimetres.

use image::{DynamicImage, Rgb, RgbImage};
use printpdf::{Image, ImageTransform, Mm};
use std::f32::consts::PI;

use super::canvas::{Canvas, fit_text, text_width};
use crate::page::{Block, Chart, Heatmap, ImageRow, Radar, SeriesKind, Stat, Table};
use crate::theme::Color;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    fn bottom(&self) -> f32 {
        self.top - self.height
    }
}

pub(crate) fn block(canvas: &Canvas, block: &Block, frame: Frame) {
    match block {
        Block::Heading(text) => {
            canvas.bold(text, 12.0, frame.x, frame.top - 6.0, canvas.theme.text);
        }
        Block::Paragraph(text) => {
            for (i, line) in text.lines().enumerate() {
                let y = frame.top - 4.0 - 5.0 * i as f32;
                canvas.text(&fit_text(line, 9.0, frame.width), 9.0, frame.x, y, canvas.theme.text);
            }
        }
        Block::Stats(stats) => self::stats(canvas, stats, frame),
        Block::Table(table) => self::table(canvas, table, frame),
        Block::Chart(chart) => self::chart(canvas, chart, frame),
        Block::Heatmap(heatmap) => self::heatmap(canvas, heatmap, frame),
        Block::Radar(radar) => self::radar(canvas, radar, frame),
        Block::Images(row) => self::images(canvas, row, frame),
        Block::Placeholder(message) => placeholder(canvas, message, frame),
    }
}

fn placeholder(canvas: &Canvas, message: &str, frame: Frame) {
    let theme = canvas.theme;
    canvas.fill_rect(frame.x, frame.bottom() + 2.0, frame.width, frame.height - 4.0, theme.surface);
    canvas.stroke_rect(frame.x, frame.bottom() + 2.0, frame.width, frame.height - 4.0, theme.border, 0.5);
    canvas.text_centered(
        &fit_text(message, 10.0, frame.width - 6.0),
        10.0,
        frame.x + frame.width / 2.0,
        frame.top - frame.height / 2.0 - 1.5,
        theme.muted,
    );
}

fn stats(canvas: &Canvas, stats: &[Stat], frame: Frame) {
    if stats.is_empty() {
        return;
    }
    let theme = canvas.theme;
    let gap = 3.0;
    let width = (frame.width - gap * (stats.len() - 1) as f32) / stats.len() as f32;
    for (i, stat) in stats.iter().enumerate() {
        let x = frame.x + i as f32 * (width + gap);
        canvas.fill_rect(x, frame.bottom() + 1.0, width, frame.height - 2.0, theme.surface);
        canvas.stroke_rect(x, frame.bottom() + 1.0, width, frame.height - 2.0, theme.border, 0.4);
        canvas.text(&fit_text(&stat.label, 7.0, width - 4.0), 7.0, x + 2.0, frame.top - 5.0, theme.muted);
        canvas.bold(
            &fit_text(&stat.value, 11.0, width - 4.0),
            11.0,
            x + 2.0,
            frame.top - 11.5,
            stat.color.unwrap_or(theme.text),
        );
    }
}

fn table(canvas: &Canvas, table: &Table, frame: Frame) {
    let theme = canvas.theme;
    let widths = table.column_widths(frame.width);
    let row_height = table.row_height;
    let size = (row_height * 1.3).min(8.0);

    let draw_row = |cells: &[String], top: f32, header: bool| {
        let mut x = frame.x;
        for (cell, width) in cells.iter().zip(&widths) {
            let text = fit_text(cell, size, width - 2.0);
            let y = top - row_height + (row_height - size * 0.3528) / 2.0 + 0.4;
            if header {
                canvas.bold(&text, size, x + 1.0, y, theme.text);
            } else {
                canvas.text(&text, size, x + 1.0, y, theme.text);
            }
            x += width;
        }
    };

    canvas.fill_rect(frame.x, frame.top - row_height, frame.width, row_height, theme.surface);
    draw_row(&table.headers, frame.top, true);
    for (i, row) in table.rows.iter().enumerate() {
        let top = frame.top - row_height * (i + 1) as f32;
        canvas.stroke(&[(frame.x, top), (frame.x + frame.width, top)], theme.border, 0.3, false);
        draw_row(row, top, false);
    }
}

/// Axis label for `value`: thousands as "k".
fn compact(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{:.1}k", value / 1000.0)
    } else if value.fract().abs() > f64::EPSILON && value.abs() < 10.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.0}")
    }
}

fn chart(canvas: &Canvas, chart: &Chart, frame: Frame) {
    let theme = canvas.theme;
    canvas.bold(&chart.title, 10.0, frame.x, frame.top - 5.0, theme.text);

    // Legend, right aligned on the title line.
    let mut legend_x = frame.x + frame.width;
    for (i, series) in chart.series.iter().enumerate().rev() {
        let color = series.color.unwrap_or(theme.series(i));
        legend_x -= text_width(&series.name, 7.0) + 2.0;
        canvas.text(&series.name, 7.0, legend_x, frame.top - 5.0, theme.muted);
        legend_x -= 4.0;
        canvas.fill_rect(legend_x, frame.top - 5.2, 2.5, 2.5, color);
        legend_x -= 3.0;
    }

    if chart.labels.is_empty() || chart.is_empty() {
        placeholder(
            canvas,
            "Sem dados no período",
            Frame {
                top: frame.top - 8.0,
                height: frame.height - 8.0,
                ..frame
            },
        );
        return;
    }

    let plot_x = frame.x + 14.0;
    let plot_bottom = frame.bottom() + 8.0;
    let plot_width = frame.width - 16.0;
    let plot_height = frame.height - 17.0;
    let (min, max) = chart.bounds();
    let y_of = |value: f64| plot_bottom + ((value - min) / (max - min)) as f32 * plot_height;

    for step in 0..=4 {
        let value = min + (max - min) * step as f64 / 4.0;
        let y = y_of(value);
        canvas.stroke(&[(plot_x, y), (plot_x + plot_width, y)], theme.border, 0.2, false);
        canvas.text_right(&compact(value), 6.0, plot_x - 1.5, y - 0.8, theme.muted);
    }

    let slot = plot_width / chart.labels.len() as f32;
    let center = |i: usize| plot_x + slot * (i as f32 + 0.5);
    let label_every = (chart.labels.len() as f32 * 9.0 / plot_width).ceil().max(1.0) as usize;
    for (i, label) in chart.labels.iter().enumerate().step_by(label_every) {
        canvas.text_centered(&fit_text(label, 6.0, slot * label_every as f32), 6.0, center(i), plot_bottom - 4.0, theme.muted);
    }

    let bars: Vec<usize> = (0..chart.series.len())
        .filter(|i| chart.series[*i].kind == SeriesKind::Bar)
        .collect();
    let bar_width = slot * 0.7 / bars.len().max(1) as f32;
    let zero = y_of(0.0_f64.clamp(min, max));
    for (position, index) in bars.iter().enumerate() {
        let series = &chart.series[*index];
        let color = series.color.unwrap_or(theme.series(*index));
        for (i, value) in series.points() {
            let x = center(i) - slot * 0.35 + bar_width * position as f32;
            let y = y_of(value);
            let fill = series
                .point_colors
                .as_ref()
                .and_then(|colors| colors.get(i).copied())
                .unwrap_or(color);
            canvas.fill_rect(x, zero.min(y), bar_width * 0.9, (y - zero).abs(), fill);
        }
    }

    for (index, series) in chart.series.iter().enumerate() {
        if series.kind != SeriesKind::Line {
            continue;
        }
        let color = series.color.unwrap_or(theme.series(index));
        let mut run: Vec<(f32, f32)> = Vec::new();
        let mut previous: Option<usize> = None;
        for (i, value) in series.points() {
            if previous.is_some_and(|p| p + 1 != i) {
                canvas.stroke(&run, color, 1.0, false);
                run.clear();
            }
            let point = (center(i), y_of(value));
            canvas.fill_rect(point.0 - 0.6, point.1 - 0.6, 1.2, 1.2, color);
            run.push(point);
            previous = Some(i);
        }
        canvas.stroke(&run, color, 1.0, false);
    }

    if let Some(reference) = &chart.reference {
        let y = y_of(reference.value);
        canvas.stroke(&[(plot_x, y), (plot_x + plot_width, y)], theme.negative, 0.6, false);
        canvas.text_right(&reference.label, 6.5, plot_x + plot_width, y + 1.2, theme.negative);
    }
}

fn heatmap(canvas: &Canvas, heatmap: &Heatmap, frame: Frame) {
    let theme = canvas.theme;
    canvas.bold(&heatmap.title, 10.0, frame.x, frame.top - 5.0, theme.text);

    let label_width = 34.0;
    let columns = heatmap.columns.len().max(1);
    let cell = (frame.width - label_width) / columns as f32;
    let grid_top = frame.top - 10.0;

    for (i, column) in heatmap.columns.iter().enumerate() {
        let x = frame.x + label_width + cell * (i as f32 + 0.5);
        canvas.text_centered(column, 5.0, x, grid_top + 0.8, theme.muted);
    }
    for (r, row) in heatmap.rows.iter().enumerate() {
        let top = grid_top - heatmap.cell_height * r as f32;
        canvas.text(
            &fit_text(&row.label, 7.0, label_width - 2.0),
            7.0,
            frame.x,
            top - heatmap.cell_height + 1.2,
            theme.text,
        );
        for (c, level) in row.levels.iter().enumerate() {
            let x = frame.x + label_width + cell * c as f32;
            let y = top - heatmap.cell_height;
            canvas.fill_rect(x + 0.3, y + 0.3, cell - 0.6, heatmap.cell_height - 0.6, theme.level(*level));
            canvas.stroke_rect(x + 0.3, y + 0.3, cell - 0.6, heatmap.cell_height - 0.6, theme.border, 0.2);
        }
    }
}

fn radar(canvas: &Canvas, radar: &Radar, frame: Frame) {
    let theme = canvas.theme;
    canvas.bold(&radar.title, 10.0, frame.x, frame.top - 5.0, theme.text);
    let axes = radar.axes.len();
    if axes < 3 {
        placeholder(
            canvas,
            "Dados insuficientes",
            Frame {
                top: frame.top - 8.0,
                height: frame.height - 8.0,
                ..frame
            },
        );
        return;
    }

    let cx = frame.x + frame.width / 2.0;
    let cy = frame.bottom() + (frame.height - 8.0) / 2.0;
    let radius = ((frame.height - 8.0) / 2.0 - 7.0).min(frame.width / 2.0 - 20.0);
    let at = |axis: usize, scale: f32| {
        let angle = PI / 2.0 - 2.0 * PI * axis as f32 / axes as f32;
        (cx + radius * scale * angle.cos(), cy + radius * scale * angle.sin())
    };

    for ring in 1..=4 {
        let scale = ring as f32 / 4.0;
        let points: Vec<(f32, f32)> = (0..axes).map(|a| at(a, scale)).collect();
        canvas.stroke(&points, theme.border, 0.3, true);
    }
    for (axis, name) in radar.axes.iter().enumerate() {
        canvas.stroke(&[(cx, cy), at(axis, 1.0)], theme.border, 0.3, false);
        let (x, y) = at(axis, 1.12);
        canvas.text_centered(name, 6.5, x, y - 1.0, theme.muted);
    }

    let color = radar.color.unwrap_or(theme.series(0));
    let shape: Vec<(f32, f32)> = radar
        .normalized()
        .iter()
        .enumerate()
        .map(|(axis, value)| at(axis, *value as f32))
        .collect();
    canvas.fill_shape(&shape, color);
    canvas.stroke(&shape, theme.text, 0.5, true);
}

/// Flattens transparency onto `background`; the PDF image has no alpha.
fn flatten(image: &DynamicImage, background: Color) -> RgbImage {
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as f32 / 255.0;
        let mix = |fg: u8, bg: u8| (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8;
        Rgb([mix(r, background.r), mix(g, background.g), mix(b, background.b)])
    })
}

fn images(canvas: &Canvas, row: &ImageRow, frame: Frame) {
    let theme = canvas.theme;
    canvas.bold(&row.title, 10.0, frame.x, frame.top - 5.0, theme.text);
    if row.cells.is_empty() {
        return;
    }

    let gap = 3.0;
    let cell_width = (frame.width - gap * (row.cells.len() - 1) as f32) / row.cells.len() as f32;
    let image_top = frame.top - 8.0;
    let image_height = frame.height - 15.0;

    for (i, cell) in row.cells.iter().enumerate() {
        let x = frame.x + i as f32 * (cell_width + gap);
        let caption_y = frame.bottom() + 2.0;
        canvas.text_centered(&fit_text(&cell.caption, 7.0, cell_width), 7.0, x + cell_width / 2.0, caption_y, theme.muted);

        let Some(image) = &cell.image else {
            placeholder(
                canvas,
                &cell.placeholder,
                Frame {
                    x,
                    top: image_top,
                    width: cell_width,
                    height: image_height,
                },
            );
            continue;
        };

        let (px_width, px_height) = (image.width().max(1) as f32, image.height().max(1) as f32);
        let scale = (cell_width / px_width).min(image_height / px_height);
        let (width, height) = (px_width * scale, px_height * scale);
        let pdf_image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(flatten(image, theme.background)));
        pdf_image.add_to_layer(
            canvas.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x + (cell_width - width) / 2.0)),
                translate_y: Some(Mm(image_top - height)),
                dpi: Some(px_width * 25.4 / width),
                ..Default::default()
            },
        );
    }
}
