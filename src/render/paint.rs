use std::sync::Arc;

use crate::{
    assets::color::Color,
    assets::store::{PreparedAsset, PreparedImage, TextBrushRgba8, TextLayoutEngine, advance_width},
    foundation::core::{Affine, BezPath, Point, Rect},
    foundation::error::{AdframeError, AdframeResult},
    render::shapes::rounded_rect_path,
    render::svg_raster::rasterize_svg,
    template::model::TextAlign,
};

/// Vertical anchoring of a text line relative to its `y` coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextBaseline {
    /// `y` is the alphabetic baseline.
    Alphabetic,
    /// `y` is the middle of the em box.
    Middle,
}

/// One line of text to fill.
pub(crate) struct TextRun<'a> {
    pub(crate) text: &'a str,
    pub(crate) anchor: Point,
    pub(crate) size_px: f32,
    pub(crate) color: Color,
    pub(crate) align: TextAlign,
    pub(crate) baseline: TextBaseline,
}

/// Paints single layers into fresh transparent pixmaps of the surface size.
///
/// Every paint call starts from a reset context, so transforms, paints and clips never carry
/// over between layers.
pub(crate) struct LayerPainter {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl LayerPainter {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        }
    }

    /// Draw `asset` stretched to `dst`.
    pub(crate) fn paint_image(
        &mut self,
        asset: &PreparedAsset,
        dst: Rect,
    ) -> AdframeResult<vello_cpu::Pixmap> {
        let rasterized;
        let image = match asset {
            PreparedAsset::Image(img) => img,
            PreparedAsset::Svg(svg) => {
                let w = dst.width().abs().round().max(1.0) as u32;
                let h = dst.height().abs().round().max(1.0) as u32;
                rasterized = rasterize_svg(svg, w, h)?;
                &rasterized
            }
        };
        if image.width == 0 || image.height == 0 {
            return Err(AdframeError::render("image has zero width or height"));
        }

        let pixmap = image_premul_bytes_to_pixmap(image)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        let (iw, ih) = (f64::from(image.width), f64::from(image.height));
        let transform = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / iw, dst.height() / ih);

        self.begin();
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(paint);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        Ok(self.finish())
    }

    /// Fill each run with its own alignment and baseline.
    pub(crate) fn paint_text(
        &mut self,
        engine: &mut TextLayoutEngine,
        runs: &[TextRun<'_>],
    ) -> AdframeResult<vello_cpu::Pixmap> {
        self.begin();
        for run in runs {
            fill_text_run(&mut self.ctx, engine, run)?;
        }
        Ok(self.finish())
    }

    /// Fill a rounded rectangle, then the label runs on top of it.
    pub(crate) fn paint_button(
        &mut self,
        engine: &mut TextLayoutEngine,
        rect: Rect,
        corner_radius: f64,
        fill: Color,
        label: &TextRun<'_>,
    ) -> AdframeResult<vello_cpu::Pixmap> {
        self.begin();
        let [r, g, b, a] = fill.to_rgba8();
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx
            .fill_path(&bezpath_to_cpu(&rounded_rect_path(rect, corner_radius)));
        fill_text_run(&mut self.ctx, engine, label)?;
        Ok(self.finish())
    }

    fn begin(&mut self) {
        self.ctx.reset();
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn finish(&mut self) -> vello_cpu::Pixmap {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }
}

fn fill_text_run(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextLayoutEngine,
    run: &TextRun<'_>,
) -> AdframeResult<()> {
    if run.text.is_empty() {
        return Ok(());
    }

    let brush = TextBrushRgba8::from_rgba8(run.color.to_rgba8());
    let layout = engine.layout_line(run.text, run.size_px, brush)?;
    let Some(line) = layout.lines().next() else {
        return Ok(());
    };
    let metrics = line.metrics();

    let width = f64::from(advance_width(&layout));
    let left = run.align.left_edge(run.anchor.x, width);
    let baseline_y = match run.baseline {
        TextBaseline::Alphabetic => run.anchor.y,
        TextBaseline::Middle => {
            run.anchor.y + f64::from(metrics.ascent - metrics.descent) / 2.0
        }
    };
    let top = baseline_y - f64::from(metrics.baseline);

    ctx.set_transform(affine_to_cpu(Affine::translate((left, top))));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                continue;
            };

            let brush = glyph_run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            let glyphs = glyph_run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(engine.font())
                .font_size(glyph_run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(image: &PreparedImage) -> AdframeResult<vello_cpu::Pixmap> {
    let w: u16 = image
        .width
        .try_into()
        .map_err(|_| AdframeError::render("image width exceeds u16"))?;
    let h: u16 = image
        .height
        .try_into()
        .map_err(|_| AdframeError::render("image height exceeds u16"))?;
    if image.rgba8_premul.len() != image.width as usize * image.height as usize * 4 {
        return Err(AdframeError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(image.width as usize * image.height as usize);
    for px in image.rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
