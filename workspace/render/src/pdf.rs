//! PDF output: one A4 portrait page per report page, dark background,
//! title at the top and a footer with the generation timestamp.

mod canvas;
mod draw;

use std::path::Path;

use chrono::NaiveDateTime;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::page::Page;
use crate::theme::Theme;
use canvas::{Canvas, Fonts, fit_text};
use draw::Frame;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 12.0;
const HEADER_HEIGHT: f32 = 20.0;
const FOOTER_HEIGHT: f32 = 10.0;
const BLOCK_GAP: f32 = 4.0;

pub struct PdfRenderer {
    title: String,
    generated_at: NaiveDateTime,
    theme: Theme,
}

impl PdfRenderer {
    pub fn new(title: impl Into<String>, generated_at: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            generated_at,
            theme: Theme::default(),
        }
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Renders `pages` into PDF bytes. An empty page list still produces a
    /// single placeholder page.
    #[instrument(skip(self, pages), fields(pages = pages.len()))]
    pub fn render(&self, pages: &[Page]) -> Result<Vec<u8>> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Camada 1");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        };

        let fallback = [Page::placeholder(self.title.clone(), "Nenhuma seção gerada")];
        let pages = if pages.is_empty() { &fallback[..] } else { pages };

        for (index, page) in pages.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Camada 1")
            };
            let canvas = Canvas {
                layer: doc.get_page(page_index).get_layer(layer_index),
                fonts: &fonts,
                theme: &self.theme,
            };
            self.draw_page(&canvas, page, index + 1, pages.len());
        }

        Ok(doc.save_to_bytes()?)
    }

    /// Renders and writes the document, creating missing parent directories.
    pub fn write(&self, pages: &[Page], path: &Path) -> Result<()> {
        let bytes = self.render(pages)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), pages = pages.len(), "Report written");
        Ok(())
    }

    fn draw_page(&self, canvas: &Canvas, page: &Page, number: usize, total: usize) {
        let theme = &self.theme;
        canvas.fill_rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT, theme.background);

        let content_width = PAGE_WIDTH - 2.0 * MARGIN;
        canvas.bold(&page.title, 16.0, MARGIN, PAGE_HEIGHT - MARGIN - 5.0, theme.text);
        if let Some(subtitle) = &page.subtitle {
            canvas.text(
                &fit_text(subtitle, 9.0, content_width),
                9.0,
                MARGIN,
                PAGE_HEIGHT - MARGIN - 11.0,
                theme.muted,
            );
        }
        let rule = PAGE_HEIGHT - MARGIN - HEADER_HEIGHT + 4.0;
        canvas.stroke(&[(MARGIN, rule), (PAGE_WIDTH - MARGIN, rule)], theme.border, 0.5, false);

        let floor = MARGIN + FOOTER_HEIGHT;
        let mut top = PAGE_HEIGHT - MARGIN - HEADER_HEIGHT;
        for (index, block) in page.blocks.iter().enumerate() {
            let height = block.height();
            if top - height < floor {
                warn!(page = %page.title, skipped = page.blocks.len() - index, "Page full, dropping remaining blocks");
                break;
            }
            draw::block(
                canvas,
                block,
                Frame {
                    x: MARGIN,
                    top,
                    width: content_width,
                    height,
                },
            );
            top -= height + BLOCK_GAP;
        }
        debug!(page = %page.title, blocks = page.blocks.len(), "Page drawn");

        self.draw_footer(canvas, page, number, total);
    }

    fn draw_footer(&self, canvas: &Canvas, page: &Page, number: usize, total: usize) {
        let theme = &self.theme;
        let y = MARGIN - 4.0;
        canvas.stroke(
            &[(MARGIN, MARGIN + 1.0), (PAGE_WIDTH - MARGIN, MARGIN + 1.0)],
            theme.border,
            0.3,
            false,
        );
        let stamp = format!("Gerado em: {}", self.generated_at.format("%d/%m/%Y %H:%M"));
        canvas.text(&stamp, 7.0, MARGIN, y, theme.muted);
        if let Some(note) = &page.footer_note {
            canvas.text_centered(&fit_text(note, 7.0, 110.0), 7.0, PAGE_WIDTH / 2.0, y, theme.muted);
        }
        canvas.text_right(&format!("{number}/{total}"), 7.0, PAGE_WIDTH - MARGIN, y, theme.muted);
    }
}
