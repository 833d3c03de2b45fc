//! Muscle overlay images. The body map of a week is the base body outline
//! with one pre-rendered overlay per classified muscle drawn on top.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use tracing::{debug, warn};

/// Source of body map images. A missing asset is `None`, never an error.
pub trait OverlayProvider {
    fn base(&self) -> Option<DynamicImage>;

    /// Overlay for `muscle` at `intensity`, both given by key.
    fn overlay(&self, muscle: &str, intensity: &str) -> Option<DynamicImage>;
}

/// Overlays stored as `{dir}/{muscle}-{intensity}.{extension}`.
#[derive(Debug, Clone)]
pub struct DirectoryOverlays {
    dir: PathBuf,
    extension: String,
    base_image: PathBuf,
}

impl DirectoryOverlays {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>, base_image: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
            base_image: base_image.into(),
        }
    }

    pub fn overlay_path(&self, muscle: &str, intensity: &str) -> PathBuf {
        self.dir.join(format!("{muscle}-{intensity}.{}", self.extension))
    }
}

fn load(path: &Path) -> Option<DynamicImage> {
    match image::open(path) {
        Ok(image) => Some(image),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Image asset unavailable");
            None
        }
    }
}

impl OverlayProvider for DirectoryOverlays {
    fn base(&self) -> Option<DynamicImage> {
        load(&self.base_image)
    }

    fn overlay(&self, muscle: &str, intensity: &str) -> Option<DynamicImage> {
        load(&self.overlay_path(muscle, intensity))
    }
}

/// Draws the overlay of every `(muscle, intensity)` key pair over `base`.
/// Missing overlays are skipped.
pub fn compose_body_map<'a>(
    base: &DynamicImage,
    provider: &dyn OverlayProvider,
    marks: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> DynamicImage {
    let mut canvas: RgbaImage = base.to_rgba8();
    let (width, height) = canvas.dimensions();

    for (muscle, intensity) in marks {
        let Some(overlay) = provider.overlay(muscle, intensity) else {
            continue;
        };
        let mut overlay = overlay.to_rgba8();
        if overlay.dimensions() != (width, height) {
            debug!(muscle, intensity, "Resizing overlay to base image");
            overlay = imageops::resize(&overlay, width, height, FilterType::Triangle);
        }
        imageops::overlay(&mut canvas, &overlay, 0, 0);
    }

    DynamicImage::ImageRgba8(canvas)
}
