use crate::foundation::error::{AdframeError, AdframeResult};

pub use kurbo::{Affine, BezPath, Point, Rect};

/// Logical size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::SQUARE_1080
    }
}

impl Canvas {
    /// The 1080×1080 square used by the ad templates.
    pub const SQUARE_1080: Self = Self {
        width: 1080,
        height: 1080,
    };

    /// Width and height as `u16`, the limit of the CPU rasterizer.
    pub fn dims_u16(self) -> AdframeResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| AdframeError::validation("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| AdframeError::validation("canvas height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(AdframeError::validation("canvas width/height must be > 0"));
        }
        Ok((w, h))
    }

    /// Full-surface rectangle in surface coordinates.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Channel array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
