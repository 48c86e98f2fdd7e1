use super::*;
use crate::assets::color::Color;
use crate::assets::loader::FsImageLoader;
use crate::foundation::error::AdframeError;

fn font() -> Vec<u8> {
    std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/fonts/DejaVuSans.ttf"
    ))
    .unwrap()
}

fn template_json() -> serde_json::Value {
    serde_json::json!({
        "canvas": { "width": 200, "height": 200 },
        "caption": {
            "text": "Hi there",
            "position": { "x": 120, "y": 30 },
            "max_characters_per_line": 31,
            "font_size": 20,
            "alignment": "left",
            "text_color": "#FFFFFF"
        },
        "cta": {
            "text": "Go",
            "position": { "x": 10, "y": 160 },
            "text_color": "#FFFFFF",
            "background_color": "#000000"
        },
        "image_mask": { "x": 20, "y": 100, "width": 100, "height": 50 },
        "urls": { "mask": "mask.png", "stroke": "stroke.png", "design_pattern": "pattern.png" }
    })
}

fn template() -> TemplateDescriptor {
    TemplateDescriptor::from_json_str(&template_json().to_string()).unwrap()
}

fn missing_dir_compositor() -> Compositor<FsImageLoader> {
    Compositor::new(
        template(),
        font(),
        FsImageLoader::new("definitely/not/a/real/dir"),
    )
    .unwrap()
}

#[test]
fn stage_chain_without_upload_skips_upload_but_keeps_stroke() {
    let mut stage = RenderStage::Idle;
    let mut seen = Vec::new();
    while stage != RenderStage::Done {
        stage = stage.next(false);
        seen.push(stage);
    }
    assert_eq!(
        seen,
        vec![
            RenderStage::LoadingPattern,
            RenderStage::LoadingMask,
            RenderStage::LoadingStroke,
            RenderStage::DrawingText,
            RenderStage::Done,
        ]
    );
}

#[test]
fn stage_chain_with_upload() {
    let mut stage = RenderStage::Idle;
    let mut layers = Vec::new();
    while stage != RenderStage::Done {
        stage = stage.next(true);
        layers.extend(stage.image_layer());
    }
    assert_eq!(
        layers,
        vec![Layer::Pattern, Layer::Mask, Layer::Upload, Layer::Stroke]
    );
    assert_eq!(RenderStage::Done.next(true), RenderStage::Done);
}

#[test]
fn construction_rejects_bad_configuration() {
    let mut bad = template();
    bad.mask_region.width = 0.0;
    let err = Compositor::new(bad, font(), FsImageLoader::new(".")).err().unwrap();
    assert!(matches!(err, AdframeError::Validation(_)));

    let mut bad = template();
    bad.layer_urls.mask = "data:image/png;base64,%%%".to_string();
    assert!(Compositor::new(bad, font(), FsImageLoader::new(".")).is_err());

    assert!(Compositor::new(template(), b"nope".to_vec(), FsImageLoader::new(".")).is_err());
}

#[test]
fn caption_layout_uses_template_limit() {
    let mut t = template();
    t.caption.max_characters_per_line = 7;
    let c = Compositor::new(t, font(), FsImageLoader::new(".")).unwrap();
    assert_eq!(
        c.layout_caption("one two three four"),
        vec!["one two", "three", "four"]
    );
    assert!(c.layout_caption("").is_empty());
}

#[test]
fn cta_geometry_is_measured_width_plus_padding() {
    let c = missing_dir_compositor();
    for label in ["Go", "Shop Now", "Book your visit today", ""] {
        let w = c.measure_text(label, 20.0).unwrap();
        let g = c.cta_geometry(label).unwrap();
        assert!((g.rect.width() - (w + 100.0)).abs() < 1e-9, "{label}");
        assert_eq!(g.rect.height(), 100.0);
        assert_eq!(g.corner_radius, 30.0);
        assert_eq!(g.rect.origin(), Point::new(10.0, 160.0));
    }
}

#[test]
fn empty_cta_label_gives_bare_padding() {
    let c = missing_dir_compositor();
    assert_eq!(c.measure_text("", 20.0).unwrap(), 0.0);
    let g = c.cta_geometry("").unwrap();
    assert_eq!(g.rect.width(), 100.0);
    assert_eq!(g.label_center, Point::new(60.0, 210.0));
}

/// Row spans `[top, bottom]` of ink in columns `x0..x1`, rows `y0..y1`.
fn ink_bands(frame: &Frame, x0: u32, x1: u32, y0: u32, y1: u32) -> Vec<(u32, u32)> {
    let mut bands: Vec<(u32, u32)> = Vec::new();
    for y in y0..y1 {
        let inked = (x0..x1).any(|x| frame.pixel(x, y).unwrap()[3] > 64);
        if !inked {
            continue;
        }
        match bands.last_mut() {
            Some((_, bottom)) if *bottom + 1 == y => *bottom = y,
            _ => bands.push((y, y)),
        }
    }
    bands
}

fn leftmost_ink(frame: &Frame, (top, bottom): (u32, u32)) -> u32 {
    (0..frame.width)
        .find(|&x| (top..=bottom).any(|y| frame.pixel(x, y).unwrap()[3] > 64))
        .unwrap()
}

#[test]
fn caption_lines_step_down_by_font_size() {
    let mut t = template();
    t.caption.max_characters_per_line = 2;
    let c = Compositor::new(t, font(), FsImageLoader::new("definitely/not/a/real/dir")).unwrap();
    let inputs = RenderInputs::from_template(c.template()).with_caption("Hi there");
    assert_eq!(c.layout_caption("Hi there"), vec!["Hi", "there"]);
    pollster::block_on(c.render(inputs));

    // Neither line has descenders, so each band ends on its baseline.
    let frame = c.frame();
    let bands = ink_bands(&frame, 100, 200, 0, 100);
    assert_eq!(bands.len(), 2, "{bands:?}");
    let step = bands[1].1 - bands[0].1;
    assert!((19..=21).contains(&step), "{bands:?}");
    assert!(bands[0].1.abs_diff(30) <= 1, "{bands:?}");

    for band in bands {
        let left = leftmost_ink(&frame, band);
        assert!((120..=124).contains(&left), "line starts at {left}");
    }
}

#[test]
fn missing_images_are_omitted_and_text_still_draws() {
    let c = missing_dir_compositor();
    let inputs = RenderInputs::from_template(c.template())
        .with_upload(Some(ImageSource::path("photo.png")));
    let report = pollster::block_on(c.render(inputs));

    assert!(report.is_completed());
    assert_eq!(report.drawn, vec![Layer::Caption, Layer::Cta]);
    let omitted: Vec<_> = report.omitted.iter().map(|o| o.layer).collect();
    assert_eq!(
        omitted,
        vec![Layer::Pattern, Layer::Mask, Layer::Upload, Layer::Stroke]
    );
    assert!(report.omitted[0].reason.contains("pattern.png"));

    let frame = c.frame();
    assert_eq!(frame.layers, vec![Layer::Caption, Layer::Cta]);
    // CTA body near its left edge.
    assert_eq!(frame.pixel(25, 185), Some([0, 0, 0, 255]));
    // Untouched area stays transparent.
    assert_eq!(frame.pixel(190, 90), Some([0, 0, 0, 0]));
}

#[test]
fn refresh_replays_last_inputs() {
    let c = missing_dir_compositor();
    assert!(pollster::block_on(c.refresh()).is_none());
    assert_eq!(c.generation(), 0);

    let inputs =
        RenderInputs::from_template(c.template()).with_background(Color::rgb8(10, 20, 30));
    let first = pollster::block_on(c.render(inputs));
    let again = pollster::block_on(c.refresh()).unwrap();
    assert_eq!(first.generation, 1);
    assert_eq!(again.generation, 2);
    assert_eq!(again.drawn, first.drawn);
    assert_eq!(c.frame().background, Color::rgb8(10, 20, 30));
}
