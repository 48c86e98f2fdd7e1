use super::*;
use crate::assets::color::Color;

fn template() -> TemplateDescriptor {
    TemplateDescriptor::from_json_str(
        r##"{
            "caption": {
                "text": "Fresh deals",
                "position": { "x": 50, "y": 50 },
                "max_characters_per_line": 31,
                "font_size": 44,
                "alignment": "left",
                "text_color": "#FFFFFF"
            },
            "cta": {
                "text": "Shop Now",
                "position": { "x": 190, "y": 320 },
                "text_color": "#FFFFFF",
                "background_color": "#000000"
            },
            "image_mask": { "x": 56, "y": 442, "width": 970, "height": 600 },
            "urls": { "mask": "m.png", "stroke": "s.png", "design_pattern": "p.png" }
        }"##,
    )
    .unwrap()
}

#[test]
fn defaults_come_from_the_template() {
    let inputs = RenderInputs::from_template(&template());
    assert_eq!(inputs.caption_text, "Fresh deals");
    assert_eq!(inputs.cta_text, "Shop Now");
    assert_eq!(inputs.background_color.to_rgba8(), [0x03, 0x69, 0xA1, 0xFF]);
    assert_eq!(
        inputs.background_color,
        "#0369A1".parse::<Color>().unwrap()
    );
    assert!(inputs.uploaded_image.is_none());
}

#[test]
fn builders_replace_single_fields() {
    let inputs = RenderInputs::from_template(&template())
        .with_caption("New caption")
        .with_cta("Buy")
        .with_background(Color::rgb8(1, 2, 3))
        .with_upload(Some(ImageSource::path("photo.png")));
    assert_eq!(inputs.caption_text, "New caption");
    assert_eq!(inputs.cta_text, "Buy");
    assert_eq!(inputs.background_color, Color::rgb8(1, 2, 3));
    assert_eq!(inputs.uploaded_image, Some(ImageSource::path("photo.png")));
}
