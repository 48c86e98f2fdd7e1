use crate::{assets::color::Color, render::composite::flatten_over_background};

/// Visual layers in back-to-front order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Background pattern stretched over the surface.
    Pattern,
    /// Mask art at the mask region.
    Mask,
    /// Uploaded photo clipped to the mask region.
    Upload,
    /// Stroke outline over the photo.
    Stroke,
    /// Word-wrapped caption.
    Caption,
    /// Call-to-action button.
    Cta,
}

impl Layer {
    /// Stable lowercase name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Mask => "mask",
            Self::Upload => "upload",
            Self::Stroke => "stroke",
            Self::Caption => "caption",
            Self::Cta => "cta",
        }
    }
}

/// Snapshot of the drawing surface after a render.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 pixels, row-major. Transparent where nothing was drawn.
    pub data: Vec<u8>,
    /// Background color property of the surface (not baked into `data`).
    pub background: Color,
    /// Layers drawn since the last clear, in draw order.
    pub layers: Vec<Layer>,
}

impl Frame {
    /// Premultiplied pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Straight-alpha pixels as seen on screen: surface content over the background color.
    pub fn to_display_rgba8(&self) -> Vec<u8> {
        flatten_over_background(&self.data, self.background.to_rgba8_premul().to_array())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
