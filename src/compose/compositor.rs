use std::cell::{Cell, RefCell};

use crate::{
    assets::loader::{ImageLoader, ImageSource},
    assets::store::{PreparedAsset, TextLayoutEngine},
    compose::inputs::RenderInputs,
    foundation::core::{Point, Rect},
    foundation::error::AdframeResult,
    layout::button::{ButtonGeometry, cta_button_geometry},
    layout::wrap::layout_text,
    render::frame::{Frame, Layer},
    render::paint::{LayerPainter, TextBaseline, TextRun},
    render::surface::Surface,
    template::model::{TemplateDescriptor, TextAlign},
};

/// Progress of one render through the layer chain.
///
/// Each loading stage awaits its image and draws it before the next stage begins, so the
/// image layers land back-to-front no matter how long individual loads take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStage {
    /// Nothing started.
    Idle,
    /// Waiting for the pattern image.
    LoadingPattern,
    /// Waiting for the mask image.
    LoadingMask,
    /// Waiting for the uploaded photo.
    LoadingUpload,
    /// Waiting for the stroke image.
    LoadingStroke,
    /// Drawing caption and CTA.
    DrawingText,
    /// Frame complete.
    Done,
}

impl RenderStage {
    /// Stage that follows `self`; the upload stage only exists when a photo was supplied.
    pub fn next(self, has_upload: bool) -> Self {
        match self {
            Self::Idle => Self::LoadingPattern,
            Self::LoadingPattern => Self::LoadingMask,
            Self::LoadingMask if has_upload => Self::LoadingUpload,
            Self::LoadingMask | Self::LoadingUpload => Self::LoadingStroke,
            Self::LoadingStroke => Self::DrawingText,
            Self::DrawingText | Self::Done => Self::Done,
        }
    }

    /// Image layer produced by a loading stage.
    pub fn image_layer(self) -> Option<Layer> {
        match self {
            Self::LoadingPattern => Some(Layer::Pattern),
            Self::LoadingMask => Some(Layer::Mask),
            Self::LoadingUpload => Some(Layer::Upload),
            Self::LoadingStroke => Some(Layer::Stroke),
            Self::Idle | Self::DrawingText | Self::Done => None,
        }
    }
}

/// How a render ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every stage ran; omitted layers are listed in the report.
    Completed,
    /// A newer render started; this one stopped at `stage` without drawing further.
    Superseded {
        /// Stage that observed the newer generation.
        stage: RenderStage,
    },
}

/// A layer left out of the frame and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OmittedLayer {
    /// The missing layer.
    pub layer: Layer,
    /// Load or paint error message.
    pub reason: String,
}

/// Summary of one [`Compositor::render`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderReport {
    /// Generation id assigned to the call.
    pub generation: u64,
    /// Completion state.
    pub outcome: RenderOutcome,
    /// Layers this call drew, in draw order.
    pub drawn: Vec<Layer>,
    /// Layers this call had to leave out.
    pub omitted: Vec<OmittedLayer>,
}

impl RenderReport {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            outcome: RenderOutcome::Completed,
            drawn: Vec::new(),
            omitted: Vec::new(),
        }
    }

    /// `true` when the render ran to the end.
    pub fn is_completed(&self) -> bool {
        self.outcome == RenderOutcome::Completed
    }
}

struct TemplateSources {
    pattern: ImageSource,
    mask: ImageSource,
    stroke: ImageSource,
}

struct LayerPlan<'a> {
    layer: Layer,
    source: &'a ImageSource,
    dst: Rect,
    clip: Option<Rect>,
}

/// Renders ad frames from a template onto an owned surface.
///
/// Single-threaded: overlapping [`Compositor::render`] futures may be polled on one executor.
/// Every call takes a new generation id and a call that has been overtaken stops drawing at its
/// next continuation, so the surface always ends up showing the newest call's frame.
pub struct Compositor<L> {
    template: TemplateDescriptor,
    sources: TemplateSources,
    loader: L,
    surface: RefCell<Surface>,
    painter: RefCell<LayerPainter>,
    text: RefCell<TextLayoutEngine>,
    generation: Cell<u64>,
    last_inputs: RefCell<Option<RenderInputs>>,
}

impl<L: ImageLoader> Compositor<L> {
    /// Validate `template`, register the text font, and allocate the surface.
    pub fn new(template: TemplateDescriptor, font_bytes: Vec<u8>, loader: L) -> AdframeResult<Self> {
        template.validate()?;
        let sources = TemplateSources {
            pattern: ImageSource::parse(&template.layer_urls.pattern)?,
            mask: ImageSource::parse(&template.layer_urls.mask)?,
            stroke: ImageSource::parse(&template.layer_urls.stroke)?,
        };
        let surface = Surface::new(template.canvas)?;
        let (w, h) = template.canvas.dims_u16()?;
        let text = TextLayoutEngine::new(font_bytes)?;

        Ok(Self {
            template,
            sources,
            loader,
            surface: RefCell::new(surface),
            painter: RefCell::new(LayerPainter::new(w, h)),
            text: RefCell::new(text),
            generation: Cell::new(0),
            last_inputs: RefCell::new(None),
        })
    }

    /// The template this compositor draws.
    pub fn template(&self) -> &TemplateDescriptor {
        &self.template
    }

    /// The image loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Generation id of the most recent render call (0 before the first).
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Snapshot of the surface.
    pub fn frame(&self) -> Frame {
        self.surface.borrow().frame()
    }

    /// Caption lines for `text` under the template's character limit.
    pub fn layout_caption(&self, text: &str) -> Vec<String> {
        layout_text(text, self.template.caption.max_characters_per_line)
    }

    /// Advance width of `text` at `size_px` with the compositor font.
    pub fn measure_text(&self, text: &str, size_px: f32) -> AdframeResult<f64> {
        let width = self.text.borrow_mut().measure(text, size_px)?;
        Ok(f64::from(width))
    }

    /// Button geometry the CTA layer uses for `text`.
    pub fn cta_geometry(&self, text: &str) -> AdframeResult<ButtonGeometry> {
        let width = self.measure_text(text, self.template.cta_font_size())?;
        Ok(cta_button_geometry(self.template.cta.position, width))
    }

    /// Clear the surface and redraw every layer from `inputs`.
    ///
    /// Never fails: layers whose image cannot be loaded or painted are left out and listed in
    /// the report, and text is still drawn.
    #[tracing::instrument(skip_all, fields(generation = tracing::field::Empty))]
    pub async fn render(&self, inputs: RenderInputs) -> RenderReport {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        tracing::Span::current().record("generation", generation);

        *self.last_inputs.borrow_mut() = Some(inputs.clone());
        {
            let mut surface = self.surface.borrow_mut();
            surface.clear();
            surface.set_background(inputs.background_color);
        }

        let mut report = RenderReport::new(generation);
        let has_upload = inputs.uploaded_image.is_some();
        let mut stage = RenderStage::Idle.next(has_upload);

        while stage != RenderStage::Done {
            if let Some(plan) = self.layer_plan(stage, &inputs) {
                let loaded = self.loader.load(plan.source).await;
                if !self.is_current(generation) {
                    tracing::debug!(stage = ?stage, "render superseded, dropping late layer");
                    report.outcome = RenderOutcome::Superseded { stage };
                    return report;
                }
                self.draw_image_layer(&plan, loaded, &mut report);
            } else if stage == RenderStage::DrawingText {
                self.draw_caption(&inputs.caption_text, &mut report);
                self.draw_cta(&inputs.cta_text, &mut report);
            }
            stage = stage.next(has_upload);
        }

        tracing::debug!(
            drawn = report.drawn.len(),
            omitted = report.omitted.len(),
            "render complete"
        );
        report
    }

    /// Re-render the most recent inputs, e.g. after the surface became visible again.
    pub async fn refresh(&self) -> Option<RenderReport> {
        let inputs = self.last_inputs.borrow().clone()?;
        Some(self.render(inputs).await)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    fn layer_plan<'a>(
        &'a self,
        stage: RenderStage,
        inputs: &'a RenderInputs,
    ) -> Option<LayerPlan<'a>> {
        let mask = self.template.mask_region;
        let plan = match stage.image_layer()? {
            Layer::Pattern => LayerPlan {
                layer: Layer::Pattern,
                source: &self.sources.pattern,
                dst: self.template.canvas.bounds(),
                clip: None,
            },
            Layer::Mask => LayerPlan {
                layer: Layer::Mask,
                source: &self.sources.mask,
                dst: mask.rect(),
                clip: None,
            },
            Layer::Upload => LayerPlan {
                layer: Layer::Upload,
                source: inputs.uploaded_image.as_ref()?,
                dst: mask.rect(),
                clip: Some(mask.rect()),
            },
            Layer::Stroke => LayerPlan {
                layer: Layer::Stroke,
                source: &self.sources.stroke,
                dst: mask.stroke_rect(),
                clip: None,
            },
            Layer::Caption | Layer::Cta => return None,
        };
        Some(plan)
    }

    fn draw_image_layer(
        &self,
        plan: &LayerPlan<'_>,
        loaded: AdframeResult<PreparedAsset>,
        report: &mut RenderReport,
    ) {
        let result = loaded.and_then(|asset| {
            let pixmap = self.painter.borrow_mut().paint_image(&asset, plan.dst)?;
            self.surface
                .borrow_mut()
                .composite(plan.layer, &pixmap, plan.clip)
        });
        record(report, plan.layer, result, || plan.source.describe());
    }

    fn draw_caption(&self, text: &str, report: &mut RenderReport) {
        let style = &self.template.caption;
        let lines = self.layout_caption(text);
        let runs: Vec<TextRun<'_>> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| TextRun {
                text: line.as_str(),
                anchor: Point::new(
                    style.position.x,
                    style.position.y + i as f64 * f64::from(style.font_size),
                ),
                size_px: style.font_size,
                color: style.text_color,
                align: style.alignment,
                baseline: TextBaseline::Alphabetic,
            })
            .collect();

        let result = self
            .painter
            .borrow_mut()
            .paint_text(&mut self.text.borrow_mut(), &runs)
            .and_then(|pixmap| {
                self.surface
                    .borrow_mut()
                    .composite(Layer::Caption, &pixmap, None)
            });
        record(report, Layer::Caption, result, || format!("{} lines", lines.len()));
    }

    fn draw_cta(&self, text: &str, report: &mut RenderReport) {
        let style = &self.template.cta;
        let result = self.cta_geometry(text).and_then(|geometry| {
            let label = TextRun {
                text,
                anchor: geometry.label_center,
                size_px: self.template.cta_font_size(),
                color: style.text_color,
                align: TextAlign::Center,
                baseline: TextBaseline::Middle,
            };
            let pixmap = self.painter.borrow_mut().paint_button(
                &mut self.text.borrow_mut(),
                geometry.rect,
                geometry.corner_radius,
                style.background_color,
                &label,
            )?;
            self.surface
                .borrow_mut()
                .composite(Layer::Cta, &pixmap, None)
        });
        record(report, Layer::Cta, result, || format!("{} chars", text.chars().count()));
    }
}

fn record(
    report: &mut RenderReport,
    layer: Layer,
    result: AdframeResult<()>,
    describe: impl FnOnce() -> String,
) {
    match result {
        Ok(()) => {
            tracing::debug!(layer = layer.name(), source = %describe(), "layer drawn");
            report.drawn.push(layer);
        }
        Err(err) => {
            tracing::warn!(layer = layer.name(), error = %err, "layer omitted");
            report.omitted.push(OmittedLayer {
                layer,
                reason: err.to_string(),
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
