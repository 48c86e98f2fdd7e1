use std::sync::Arc;

use crate::{
    assets::store::{PreparedImage, PreparedSvg},
    foundation::error::{AdframeError, AdframeResult},
};

// Avoid pathological allocations for absurd destination sizes.
const MAX_DIM: u32 = 16_384;

/// Rasterize `svg` to exactly `width`×`height` pixels, stretching its viewport.
///
/// Layers are rasterized at their destination size so scaled vector art stays crisp.
pub(crate) fn rasterize_svg(svg: &PreparedSvg, width: u32, height: u32) -> AdframeResult<PreparedImage> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(AdframeError::render(format!(
            "svg raster size out of range: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let size = svg.tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(AdframeError::render("svg has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| AdframeError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&svg.tree, xform, &mut pixmap.as_mut());
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.take()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg_raster.rs"]
mod tests;
