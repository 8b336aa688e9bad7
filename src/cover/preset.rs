//! The two cover styles

use image::Rgba;
use rand::Rng;

/// Font size before any per-style adjustment
pub const BASE_FONT_SIZE: f32 = 70.0;

/// Height of the region the text block is vertically centered in
pub const REGION_HEIGHT: i32 = 1000;

/// A fixed cover style: background, font, size, colour and text region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePreset {
    /// Light grey chalk lettering on the black/red template
    Dark,
    /// Charcoal Helvetica on the white/cyan template, text region shifted right
    Light,
}

impl StylePreset {
    /// Pick a style with equal probability
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Background template file name inside the assets directory
    pub fn background(&self) -> &'static str {
        match self {
            Self::Dark => "cover-black-red.png",
            Self::Light => "cover-white-cyan.png",
        }
    }

    /// Font file name inside the assets directory
    pub fn font(&self) -> &'static str {
        match self {
            Self::Dark => "Chalkduster.ttf",
            Self::Light => "Helvetica-Neue-LT.ttf",
        }
    }

    /// Font size in pixels per em
    pub fn font_size(&self) -> f32 {
        match self {
            Self::Dark => BASE_FONT_SIZE,
            Self::Light => BASE_FONT_SIZE + 30.0,
        }
    }

    pub fn fill(&self) -> Rgba<u8> {
        match self {
            Self::Dark => Rgba([0xD3, 0xD3, 0xD3, 0xFF]),
            Self::Light => Rgba([0x36, 0x45, 0x4F, 0xFF]),
        }
    }

    /// Width of the text region
    pub fn region_width(&self) -> i32 {
        match self {
            Self::Dark => 1450,
            Self::Light => 2000,
        }
    }

    /// Horizontal offset of the text region
    pub fn region_offset(&self) -> i32 {
        match self {
            Self::Dark => 0,
            Self::Light => 500,
        }
    }
}
