//! Capability interfaces for drawing and text measurement.
//!
//! The engine never draws on its own; widgets reach a backend through
//! [`PaintContext`]. Every method has a default that reports
//! [`Error::Unsupported`], so a backend only implements what it can do.

use crate::error::{Error, Result};
use crate::{Rect, Size, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn is_transparent(self) -> bool {
        self.3 == 0
    }
}

/// Backend handle for a loaded font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontId(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub size: Size,
    pub baseline: f32,
}

/// Row-major 3x3 affine matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform(pub [f32; 9]);

impl Default for Transform {
    fn default() -> Self {
        Transform([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }
}

pub trait Gfx {
    fn begin_frame(&mut self, _width: u32, _height: u32, _dpi_scale: f32) -> Result<()> {
        Err(Error::Unsupported)
    }
    fn end_frame(&mut self) -> Result<()> {
        Err(Error::Unsupported)
    }
    fn clear(&mut self, _color: Color) -> Result<()> {
        Err(Error::Unsupported)
    }
    fn draw_rect(&mut self, _rect: Rect, _color: Color, _corner_radius: f32) -> Result<()> {
        Err(Error::Unsupported)
    }
    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _color: Color, _thickness: f32) -> Result<()> {
        Err(Error::Unsupported)
    }
    fn push_clip(&mut self, _rect: Rect) -> Result<()> {
        Err(Error::Unsupported)
    }
    fn pop_clip(&mut self) -> Result<()> {
        Err(Error::Unsupported)
    }
    fn set_transform(&mut self, _transform: Transform) -> Result<()> {
        Err(Error::Unsupported)
    }
    /// Text sub-interface, when the backend has one.
    fn text(&mut self) -> Option<&mut dyn TextMeasure> {
        None
    }
}

pub trait TextMeasure {
    fn create_font(&mut self, _family: &str, _size: f32, _weight: u16, _italic: bool) -> Result<FontId> {
        Err(Error::Unsupported)
    }
    fn destroy_font(&mut self, _font: FontId) -> Result<()> {
        Err(Error::Unsupported)
    }
    fn measure_text(&mut self, font: FontId, text: &str) -> Result<TextMetrics>;
    fn draw_text(&mut self, _font: FontId, _text: &str, _origin: Vec2, _color: Color) -> Result<()> {
        Err(Error::Unsupported)
    }
}

/// What a widget receives in `paint`.
pub struct PaintContext<'a> {
    pub gfx: &'a mut dyn Gfx,
    pub clip: Rect,
    pub dpi_scale: f32,
}

impl<'a> PaintContext<'a> {
    pub fn new(gfx: &'a mut dyn Gfx, clip: Rect) -> Self {
        Self {
            gfx,
            clip,
            dpi_scale: 1.0,
        }
    }
}
