//! Thin drawing layer over a printpdf layer, in millimetres with the origin
//! at the bottom left of the page.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{IndirectFontRef, Line, Mm, PdfLayerReference, Point, Polygon};

use crate::theme::{Color, Theme};

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width relative to the font size.
const GLYPH_WIDTH: f32 = 0.5;

pub(crate) struct Fonts {
    pub regular: IndirectFontRef,
    pub bold: IndirectFontRef,
}

pub(crate) struct Canvas<'a> {
    pub layer: PdfLayerReference,
    pub fonts: &'a Fonts,
    pub theme: &'a Theme,
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(Mm(x), Mm(y)), false)
}

/// Estimated width of `text` at `size` points.
pub(crate) fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_WIDTH * PT_TO_MM
}

/// Cuts `text` so that it fits `width`, marking the cut with "...".
pub(crate) fn fit_text(text: &str, size: f32, width: f32) -> String {
    if text_width(text, size) <= width {
        return text.to_string();
    }
    let per_char = size * GLYPH_WIDTH * PT_TO_MM;
    let keep = ((width / per_char) as usize).saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

impl Canvas<'_> {
    pub fn fill_rect(&self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.polygon(
            vec![
                point(x, y),
                point(x + width, y),
                point(x + width, y + height),
                point(x, y + height),
            ],
            color,
            PaintMode::Fill,
        );
    }

    pub fn stroke_rect(&self, x: f32, y: f32, width: f32, height: f32, color: Color, thickness: f32) {
        self.stroke(&[(x, y), (x + width, y), (x + width, y + height), (x, y + height)], color, thickness, true);
    }

    pub fn fill_shape(&self, points: &[(f32, f32)], color: Color) {
        self.polygon(points.iter().map(|(x, y)| point(*x, *y)).collect(), color, PaintMode::Fill);
    }

    fn polygon(&self, ring: Vec<(Point, bool)>, color: Color, mode: PaintMode) {
        self.layer.set_fill_color(color.to_pdf());
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }

    pub fn stroke(&self, points: &[(f32, f32)], color: Color, thickness: f32, closed: bool) {
        if points.len() < 2 {
            return;
        }
        self.layer.set_outline_color(color.to_pdf());
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: points.iter().map(|(x, y)| point(*x, *y)).collect(),
            is_closed: closed,
        });
    }

    pub fn text(&self, text: &str, size: f32, x: f32, y: f32, color: Color) {
        self.layer.set_fill_color(color.to_pdf());
        self.layer.use_text(text, size, Mm(x), Mm(y), &self.fonts.regular);
    }

    pub fn bold(&self, text: &str, size: f32, x: f32, y: f32, color: Color) {
        self.layer.set_fill_color(color.to_pdf());
        self.layer.use_text(text, size, Mm(x), Mm(y), &self.fonts.bold);
    }

    pub fn text_centered(&self, text: &str, size: f32, center_x: f32, y: f32, color: Color) {
        self.text(text, size, center_x - text_width(text, size) / 2.0, y, color);
    }

    pub fn text_right(&self, text: &str, size: f32, right_x: f32, y: f32, color: Color) {
        self.text(text, size, right_x - text_width(text, size), y, color);
    }
}
