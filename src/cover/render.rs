//! Rasterizing a cover title onto a background template

use crate::cover::layout::{cover_text, placement};
use crate::cover::preset::StylePreset;
use crate::error::{MatterPressError, Result};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{ImageFormat, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

/// Extra pixels between consecutive lines of a text block
pub const LINE_SPACING: f32 = 4.0;

/// Something that can turn a title into a cover image file.
///
/// The collector only depends on this trait, so runs can be exercised without
/// font and template assets.
pub trait CoverPainter {
    fn paint(&mut self, title: &str, output: &Path) -> Result<()>;
}

/// Pixel size of a laid-out text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSize {
    pub width: u32,
    pub height: u32,
    /// Distance between the tops of consecutive lines
    pub line_height: u32,
}

/// Renders covers from the templates and fonts in an assets directory
#[derive(Debug)]
pub struct CoverRenderer<R = StdRng> {
    assets_dir: PathBuf,
    rng: R,
}

impl CoverRenderer<StdRng> {
    /// Renderer with an entropy-seeded style picker
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self::with_rng(assets_dir, StdRng::from_entropy())
    }

    /// Renderer whose style sequence is reproducible
    pub fn seeded(assets_dir: impl Into<PathBuf>, seed: u64) -> Self {
        Self::with_rng(assets_dir, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CoverRenderer<R> {
    pub fn with_rng(assets_dir: impl Into<PathBuf>, rng: R) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            rng,
        }
    }

    /// Render `title` in a randomly chosen style; returns the style used.
    pub fn render(&mut self, title: &str, output: &Path) -> Result<StylePreset> {
        let preset = StylePreset::choose(&mut self.rng);
        self.render_with(preset, title, output)?;
        Ok(preset)
    }

    /// Render `title` in the given style.
    pub fn render_with(&self, preset: StylePreset, title: &str, output: &Path) -> Result<()> {
        let mut canvas = load_background(&self.assets_dir.join(preset.background()))?;
        let font = load_font(&self.assets_dir.join(preset.font()))?;
        let scale = px_scale(&font, preset.font_size());

        let text = cover_text(title);
        let block = measure_block(&font, scale, &text);
        let (x, y) = placement(preset, block.width, block.height);
        debug!(
            "Drawing {:?} cover for {:?}: block {}x{} at ({}, {})",
            preset, title, block.width, block.height, x, y
        );

        for (i, line) in text.split('\n').enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_y = y + (i as u32 * block.line_height) as i32;
            draw_text_mut(&mut canvas, preset.fill(), x, line_y, scale, &font, line);
        }

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        canvas.save_with_format(output, ImageFormat::Png)?;
        Ok(())
    }
}

impl<R: Rng> CoverPainter for CoverRenderer<R> {
    fn paint(&mut self, title: &str, output: &Path) -> Result<()> {
        self.render(title, output).map(|_| ())
    }
}

/// Load a background template as RGBA
pub fn load_background(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| MatterPressError::image_load(path, e.to_string()))
}

/// Load a TrueType/OpenType font
pub fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = fs::read(path).map_err(|e| MatterPressError::font_load(path, e.to_string()))?;
    FontVec::try_from_vec(bytes).map_err(|e| MatterPressError::font_load(path, e.to_string()))
}

/// Scale for a size given in pixels per em
pub fn px_scale(font: &impl Font, size: f32) -> PxScale {
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    PxScale::from(size * font.height_unscaled() / units_per_em)
}

/// Bounding size of a multi-line block drawn line by line from its top-left.
pub fn measure_block(font: &impl Font, scale: PxScale, text: &str) -> BlockSize {
    let scaled = font.as_scaled(scale);
    let font_height = scaled.height().ceil() as u32;
    let line_height = (scaled.height() + scaled.line_gap() + LINE_SPACING).ceil() as u32;

    let lines: Vec<&str> = text.split('\n').collect();
    let width = lines
        .iter()
        .map(|line| text_size(scale, font, line).0)
        .max()
        .unwrap_or(0);
    let height = line_height * (lines.len().saturating_sub(1) as u32) + font_height;

    BlockSize {
        width,
        height,
        line_height,
    }
}
