//! Page model handed to the renderer. Builders follow the trace/layout style
//! of charting libraries: construct with data, then chain options.

use image::DynamicImage;

use crate::theme::Color;

#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub subtitle: Option<String>,
    pub blocks: Vec<Block>,
    /// Extra footer text next to the generation timestamp.
    pub footer_note: Option<String>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            blocks: Vec::new(),
            footer_note: None,
        }
    }

    /// A page standing in for a section that could not be produced.
    pub fn placeholder(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title).block(Block::Placeholder(message.into()))
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn footer_note(mut self, note: impl Into<String>) -> Self {
        self.footer_note = Some(note.into());
        self
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.blocks.as_slice(), [Block::Placeholder(_)])
    }
}

#[derive(Debug, Clone)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    Stats(Vec<Stat>),
    Table(Table),
    Chart(Chart),
    Heatmap(Heatmap),
    Radar(Radar),
    Images(ImageRow),
    Placeholder(String),
}

impl Block {
    /// Vertical space in millimetres.
    pub fn height(&self) -> f32 {
        match self {
            Block::Heading(_) => 9.0,
            Block::Paragraph(text) => 5.0 * text.lines().count().max(1) as f32 + 2.0,
            Block::Stats(_) => 16.0,
            Block::Table(table) => table.row_height * (table.rows.len() + 1) as f32 + 3.0,
            Block::Chart(chart) => chart.height,
            Block::Heatmap(heatmap) => heatmap.cell_height * heatmap.rows.len() as f32 + 10.0,
            Block::Radar(radar) => radar.height,
            Block::Images(row) => row.height,
            Block::Placeholder(_) => 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub label: String,
    pub value: String,
    pub color: Option<Color>,
}

impl Stat {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: None,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Relative column widths; equal widths when absent.
    pub widths: Option<Vec<f32>>,
    pub row_height: f32,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            widths: None,
            row_height: 6.0,
        }
    }

    pub fn row<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn widths(mut self, widths: Vec<f32>) -> Self {
        self.widths = Some(widths);
        self
    }

    pub fn row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    /// Column widths normalized to sum to `total`.
    pub fn column_widths(&self, total: f32) -> Vec<f32> {
        let columns = self.headers.len().max(1);
        match &self.widths {
            Some(widths) if widths.len() == columns && widths.iter().sum::<f32>() > 0.0 => {
                let sum: f32 = widths.iter().sum();
                widths.iter().map(|w| w / sum * total).collect()
            }
            _ => vec![total / columns as f32; columns],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Bar,
}

/// One trace of a chart. `None` values are gaps: lines break there and no
/// bar is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub values: Vec<Option<f64>>,
    pub color: Option<Color>,
    /// Per-point colors overriding `color` for bars.
    pub point_colors: Option<Vec<Color>>,
}

impl Series {
    pub fn line(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Line,
            values,
            color: None,
            point_colors: None,
        }
    }

    pub fn bar(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Bar,
            values: values.into_iter().map(Some).collect(),
            color: None,
            point_colors: None,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn point_colors(mut self, colors: Vec<Color>) -> Self {
        self.point_colors = Some(colors);
        self
    }

    /// Finite values only; NaN counts as a gap.
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.filter(|v| v.is_finite()).map(|v| (i, v)))
    }
}

/// Horizontal reference line, e.g. a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub label: String,
    pub value: f64,
}

/// Categorical chart: shared labels on the x axis, line and bar traces.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub reference: Option<Reference>,
    /// Fixed y range; derived from the data when absent.
    pub y_range: Option<(f64, f64)>,
    pub height: f32,
}

impl Chart {
    pub fn new(title: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            title: title.into(),
            labels,
            series: Vec::new(),
            reference: None,
            y_range: None,
            height: 70.0,
        }
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn reference(mut self, label: impl Into<String>, value: f64) -> Self {
        self.reference = Some(Reference {
            label: label.into(),
            value,
        });
        self
    }

    pub fn y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points().next().is_none())
    }

    /// Y range covering every value, the reference line and zero.
    pub fn bounds(&self) -> (f64, f64) {
        if let Some(range) = self.y_range {
            return range;
        }
        let values = self
            .series
            .iter()
            .flat_map(|s| s.points().map(|(_, v)| v))
            .chain(self.reference.as_ref().map(|r| r.value))
            .chain(std::iter::once(0.0));
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if max - min <= f64::EPSILON {
            (min, min + 1.0)
        } else {
            (min, max)
        }
    }
}

/// Grid of levels 0 to 4, e.g. a habit calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<HeatmapRow>,
    pub cell_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRow {
    pub label: String,
    pub levels: Vec<u8>,
}

impl Heatmap {
    pub fn new(title: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
            cell_height: 5.0,
        }
    }

    pub fn row(mut self, label: impl Into<String>, levels: Vec<u8>) -> Self {
        self.rows.push(HeatmapRow {
            label: label.into(),
            levels,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Radar {
    pub title: String,
    pub axes: Vec<String>,
    pub values: Vec<f64>,
    pub color: Option<Color>,
    pub height: f32,
}

impl Radar {
    pub fn new(title: impl Into<String>, axes: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            title: title.into(),
            axes,
            values,
            color: None,
            height: 85.0,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Values scaled to 0..=1 by the largest one.
    pub fn normalized(&self) -> Vec<f64> {
        let max = self
            .values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);
        self.values
            .iter()
            .map(|v| if max > 0.0 && v.is_finite() { (v / max).max(0.0) } else { 0.0 })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ImageCell {
    pub caption: String,
    /// `None` renders `placeholder` instead.
    pub image: Option<DynamicImage>,
    pub placeholder: String,
}

#[derive(Debug, Clone)]
pub struct ImageRow {
    pub title: String,
    pub cells: Vec<ImageCell>,
    pub height: f32,
}

impl ImageRow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            cells: Vec::new(),
            height: 75.0,
        }
    }

    pub fn cell(
        mut self,
        caption: impl Into<String>,
        image: Option<DynamicImage>,
        placeholder: impl Into<String>,
    ) -> Self {
        self.cells.push(ImageCell {
            caption: caption.into(),
            image,
            placeholder: placeholder.into(),
        });
        self
    }
}
