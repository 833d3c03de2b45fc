//! Report output: the page model, the dark-theme PDF writer and the muscle
//! overlay images of the body maps.

pub mod error;
pub mod overlay;
pub mod page;
pub mod pdf;
pub mod theme;

pub use error::{RenderError, Result};
pub use overlay::{DirectoryOverlays, OverlayProvider, compose_body_map};
pub use page::{Block, Chart, Heatmap, ImageRow, Page, Radar, Series, Stat, Table};
pub use pdf::PdfRenderer;
pub use theme::{Color, Theme};
