use std::path::Path;

use anyhow::Context as _;

use crate::{
    assets::color::Color,
    foundation::core::{Canvas, Point, Rect},
    foundation::error::{AdframeError, AdframeResult},
};

/// Horizontal padding added to the mask width to size the stroke art.
pub const STROKE_PAD_X: f64 = 110.0;
/// Vertical padding added to the mask height to size the stroke art.
pub const STROKE_PAD_Y: f64 = 490.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Immutable geometry and styling contract for one ad layout.
///
/// The JSON shape matches the template files shipped with the ad editor (`urls`, `image_mask`,
/// snake_case style fields); camelCase aliases are accepted as well. Call
/// [`TemplateDescriptor::validate`] (or use [`TemplateDescriptor::from_json_str`]) before
/// handing a descriptor to the compositor.
pub struct TemplateDescriptor {
    /// Drawing surface size; defaults to 1080×1080.
    #[serde(default)]
    pub canvas: Canvas,
    /// Pattern, mask and stroke image references.
    #[serde(rename = "urls", alias = "layerURLs", alias = "layer_urls")]
    pub layer_urls: LayerUrls,
    /// Where the mask and the uploaded photo are drawn.
    #[serde(rename = "image_mask", alias = "maskRegion", alias = "mask_region")]
    pub mask_region: MaskRegion,
    /// Caption text style.
    pub caption: CaptionStyle,
    /// Call-to-action button style.
    pub cta: CtaStyle,
    /// Optional font file path, relative to the template file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Image references for the three template-owned layers.
pub struct LayerUrls {
    /// Background pattern, stretched over the whole surface.
    #[serde(rename = "design_pattern", alias = "pattern")]
    pub pattern: String,
    /// Mask art drawn at the mask region.
    pub mask: String,
    /// Stroke outline drawn over the photo.
    pub stroke: String,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Axis-aligned rectangle in surface coordinates.
pub struct MaskRegion {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, must be > 0.
    pub width: f64,
    /// Height, must be > 0.
    pub height: f64,
}

impl MaskRegion {
    /// The region as a rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Destination of the stroke art: anchored at the origin, padded from the mask size.
    pub fn stroke_rect(self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.width + STROKE_PAD_X,
            self.height + STROKE_PAD_Y,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Horizontal text anchoring relative to the text position.
pub enum TextAlign {
    /// Text starts at the anchor.
    #[default]
    #[serde(alias = "left")]
    Start,
    /// Text is centered on the anchor.
    Center,
    /// Text ends at the anchor.
    #[serde(alias = "right")]
    End,
}

impl TextAlign {
    /// Left edge of a run of `width` pixels anchored at `x`.
    pub fn left_edge(self, x: f64, width: f64) -> f64 {
        match self {
            Self::Start => x,
            Self::Center => x - width / 2.0,
            Self::End => x - width,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Caption text style.
pub struct CaptionStyle {
    /// Caption used when the caller has not edited it.
    #[serde(rename = "text", alias = "defaultText", alias = "default_text")]
    pub default_text: String,
    /// Anchor of the first line's baseline.
    pub position: Point,
    /// Font size in pixels, also the line height.
    #[serde(alias = "fontSize")]
    pub font_size: f32,
    /// Fill color.
    #[serde(alias = "textColor")]
    pub text_color: Color,
    /// Horizontal alignment around `position.x`.
    #[serde(default)]
    pub alignment: TextAlign,
    /// Word-wrap limit in characters.
    #[serde(alias = "maxCharactersPerLine")]
    pub max_characters_per_line: usize,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Call-to-action button style.
pub struct CtaStyle {
    /// Label used when the caller has not edited it.
    #[serde(rename = "text", alias = "defaultText", alias = "default_text")]
    pub default_text: String,
    /// Top-left corner of the button.
    pub position: Point,
    /// Label color.
    #[serde(alias = "textColor")]
    pub text_color: Color,
    /// Button fill color.
    #[serde(alias = "backgroundColor")]
    pub background_color: Color,
    /// Label font size; the caption size is used when unset.
    #[serde(default, alias = "fontSize", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

impl TemplateDescriptor {
    /// Parse and validate a JSON template.
    pub fn from_json_str(json: &str) -> AdframeResult<Self> {
        let template: Self =
            serde_json::from_str(json).map_err(|e| AdframeError::serde(e.to_string()))?;
        template.validate()?;
        Ok(template)
    }

    /// Read, parse and validate a JSON template file.
    pub fn from_path(path: impl AsRef<Path>) -> AdframeResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read template '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Font size used for the CTA label.
    pub fn cta_font_size(&self) -> f32 {
        self.cta.font_size.unwrap_or(self.caption.font_size)
    }

    /// Validate geometry and styling invariants.
    pub fn validate(&self) -> AdframeResult<()> {
        self.canvas.dims_u16()?;

        for (field, reference) in [
            ("urls.design_pattern", &self.layer_urls.pattern),
            ("urls.mask", &self.layer_urls.mask),
            ("urls.stroke", &self.layer_urls.stroke),
        ] {
            if reference.trim().is_empty() {
                return Err(AdframeError::validation(format!(
                    "{field} must be non-empty"
                )));
            }
        }

        let m = self.mask_region;
        if !m.x.is_finite() || !m.y.is_finite() {
            return Err(AdframeError::validation(
                "image_mask x/y must be finite",
            ));
        }
        if !m.width.is_finite() || m.width <= 0.0 || !m.height.is_finite() || m.height <= 0.0 {
            return Err(AdframeError::validation(
                "image_mask width/height must be finite and > 0",
            ));
        }

        validate_position(self.caption.position, "caption.position")?;
        validate_font_size(self.caption.font_size, "caption.font_size")?;
        if self.caption.max_characters_per_line == 0 {
            return Err(AdframeError::validation(
                "caption.max_characters_per_line must be >= 1",
            ));
        }

        validate_position(self.cta.position, "cta.position")?;
        if let Some(size) = self.cta.font_size {
            validate_font_size(size, "cta.font_size")?;
        }

        if let Some(font) = &self.font
            && font.trim().is_empty()
        {
            return Err(AdframeError::validation("font must be non-empty when set"));
        }

        Ok(())
    }
}

fn validate_position(p: Point, field: &str) -> AdframeResult<()> {
    if !p.x.is_finite() || !p.y.is_finite() {
        return Err(AdframeError::validation(format!(
            "{field} must be finite"
        )));
    }
    Ok(())
}

fn validate_font_size(size: f32, field: &str) -> AdframeResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(AdframeError::validation(format!(
            "{field} must be finite and > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;
