use std::sync::Arc;

use crate::foundation::error::{AdframeError, AdframeResult};

#[derive(Clone, Debug)]
/// Decoded raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Clone, Debug)]
/// Parsed SVG document, rasterized at its destination size when painted.
pub struct PreparedSvg {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
}

#[derive(Clone, Debug)]
/// A loaded image layer resource.
pub enum PreparedAsset {
    /// Raster image (PNG, JPEG, WebP, ...).
    Image(PreparedImage),
    /// Vector image.
    Svg(PreparedSvg),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl TextBrushRgba8 {
    pub(crate) fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Normalize and validate a layer path reference.
///
/// Template URLs are site-rooted (`/images/mask.png`), so a single leading `/` is dropped.
/// The normalized result uses `/` separators, removes `.` segments, and rejects parent
/// traversals (`..`).
pub fn normalize_rel_path(source: &str) -> AdframeResult<String> {
    let s = source.trim().replace('\\', "/");
    let s = s.strip_prefix('/').unwrap_or(&s);
    if s.is_empty() {
        return Err(AdframeError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(AdframeError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(AdframeError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Stateful helper for shaping single text lines with one registered font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and prepare fresh Parley contexts.
    pub(crate) fn new(font_bytes: Vec<u8>) -> AdframeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            AdframeError::validation("no font families registered from font bytes")
        })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AdframeError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Font handle used when filling glyph runs.
    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `text` as one unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> AdframeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AdframeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Advance width of `text` in pixels; empty text is 0.
    pub(crate) fn measure(&mut self, text: &str, size_px: f32) -> AdframeResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout_line(text, size_px, TextBrushRgba8::default())?;
        Ok(advance_width(&layout))
    }
}

/// Sum of glyph-run advances across the layout.
///
/// Unlike `Layout::full_width`, this never counts the placeholder an empty layout reserves.
pub(crate) fn advance_width(layout: &parley::Layout<TextBrushRgba8>) -> f32 {
    let mut width = 0.0;
    for line in layout.lines() {
        for item in line.items() {
            if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                width += run.advance();
            }
        }
    }
    width
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
