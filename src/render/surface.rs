use crate::{
    assets::color::Color,
    foundation::core::{Canvas, Rect},
    foundation::error::{AdframeError, AdframeResult},
    render::composite::{PixelRect, over_in_place, over_in_place_clipped},
    render::frame::{Frame, Layer},
};

/// The compositor-owned drawing surface.
///
/// Pixels start transparent; the background color is a separate property, the way a canvas
/// element's CSS background sits behind its bitmap.
pub(crate) struct Surface {
    canvas: Canvas,
    pixmap: vello_cpu::Pixmap,
    background: Color,
    layers: Vec<Layer>,
}

impl Surface {
    pub(crate) fn new(canvas: Canvas) -> AdframeResult<Self> {
        let (w, h) = canvas.dims_u16()?;
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
            background: Color::transparent(),
            layers: Vec::new(),
        })
    }

    /// Reset every pixel to transparent and forget the layers drawn so far.
    pub(crate) fn clear(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.layers.clear();
    }

    pub(crate) fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Source-over `src` onto the surface, restricted to `clip` when given.
    ///
    /// The clip applies to this composite only.
    pub(crate) fn composite(
        &mut self,
        layer: Layer,
        src: &vello_cpu::Pixmap,
        clip: Option<Rect>,
    ) -> AdframeResult<()> {
        if src.width() != self.pixmap.width() || src.height() != self.pixmap.height() {
            return Err(AdframeError::render(format!(
                "{} layer size does not match the surface",
                layer.name()
            )));
        }

        let dst = self.pixmap.data_as_u8_slice_mut();
        match clip {
            Some(rect) => {
                let clip =
                    PixelRect::from_rect_clamped(rect, self.canvas.width, self.canvas.height);
                over_in_place_clipped(dst, src.data_as_u8_slice(), self.canvas.width, clip)?;
            }
            None => over_in_place(dst, src.data_as_u8_slice())?,
        }
        self.layers.push(layer);
        Ok(())
    }

    pub(crate) fn frame(&self) -> Frame {
        Frame {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            background: self.background,
            layers: self.layers.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
