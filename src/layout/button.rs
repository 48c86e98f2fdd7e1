use crate::foundation::core::{Point, Rect};

/// Horizontal padding added to the measured label width.
pub const CTA_PADDING_X: f64 = 100.0;
/// Fixed button height.
pub const CTA_HEIGHT: f64 = 100.0;
/// Corner radius of the button outline.
pub const CTA_CORNER_RADIUS: f64 = 30.0;

/// Resolved geometry of a call-to-action button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonGeometry {
    /// Button outline bounds; top-left is the template position.
    pub rect: Rect,
    /// Corner radius.
    pub corner_radius: f64,
    /// Center point of the label (middle baseline, centered alignment).
    pub label_center: Point,
}

/// Size a CTA button around a label measuring `text_width` pixels.
///
/// Width grows with the label, height is fixed.
pub fn cta_button_geometry(position: Point, text_width: f64) -> ButtonGeometry {
    let width = text_width + CTA_PADDING_X;
    ButtonGeometry {
        rect: Rect::new(
            position.x,
            position.y,
            position.x + width,
            position.y + CTA_HEIGHT,
        ),
        corner_radius: CTA_CORNER_RADIUS,
        label_center: Point::new(
            position.x + text_width / 2.0 + CTA_PADDING_X / 2.0,
            position.y + CTA_HEIGHT / 2.0,
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/button.rs"]
mod tests;
