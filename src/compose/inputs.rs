use crate::{assets::color::Color, assets::loader::ImageSource, template::model::TemplateDescriptor};

/// Background color the editor starts with (`#0369A1`).
pub const DEFAULT_BACKGROUND: Color = Color {
    r: 3.0 / 255.0,
    g: 105.0 / 255.0,
    b: 161.0 / 255.0,
    a: 1.0,
};

/// Caller-editable values consumed by one render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderInputs {
    /// Caption text, word-wrapped by the template's character limit.
    pub caption_text: String,
    /// Call-to-action label.
    pub cta_text: String,
    /// Surface background color.
    pub background_color: Color,
    /// Optional photo drawn inside the mask region.
    pub uploaded_image: Option<ImageSource>,
}

impl RenderInputs {
    /// Initial editor state for `template`: its default texts, the default background, no photo.
    pub fn from_template(template: &TemplateDescriptor) -> Self {
        Self {
            caption_text: template.caption.default_text.clone(),
            cta_text: template.cta.default_text.clone(),
            background_color: DEFAULT_BACKGROUND,
            uploaded_image: None,
        }
    }

    /// Replace the caption text.
    pub fn with_caption(mut self, text: impl Into<String>) -> Self {
        self.caption_text = text.into();
        self
    }

    /// Replace the CTA label.
    pub fn with_cta(mut self, text: impl Into<String>) -> Self {
        self.cta_text = text.into();
        self
    }

    /// Replace the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set or clear the uploaded photo.
    pub fn with_upload(mut self, image: Option<ImageSource>) -> Self {
        self.uploaded_image = image;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/inputs.rs"]
mod tests;
