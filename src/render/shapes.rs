use crate::foundation::core::{BezPath, Point, Rect};

// Cubic Bézier control distance for a quarter circle of radius 1.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Closed rounded-rectangle outline built from four edges and four cubic quarter arcs.
///
/// The radius is clamped to half the shorter side. A zero radius degenerates to a plain
/// rectangle.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    let rect = rect.abs();
    let r = radius.max(0.0).min(rect.width() / 2.0).min(rect.height() / 2.0);
    let k = r * KAPPA;
    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);

    let mut path = BezPath::new();
    path.move_to(Point::new(x0 + r, y0));
    path.line_to(Point::new(x1 - r, y0));
    if r > 0.0 {
        path.curve_to(
            Point::new(x1 - r + k, y0),
            Point::new(x1, y0 + r - k),
            Point::new(x1, y0 + r),
        );
    }
    path.line_to(Point::new(x1, y1 - r));
    if r > 0.0 {
        path.curve_to(
            Point::new(x1, y1 - r + k),
            Point::new(x1 - r + k, y1),
            Point::new(x1 - r, y1),
        );
    }
    path.line_to(Point::new(x0 + r, y1));
    if r > 0.0 {
        path.curve_to(
            Point::new(x0 + r - k, y1),
            Point::new(x0, y1 - r + k),
            Point::new(x0, y1 - r),
        );
    }
    path.line_to(Point::new(x0, y0 + r));
    if r > 0.0 {
        path.curve_to(
            Point::new(x0, y0 + r - k),
            Point::new(x0 + r - k, y0),
            Point::new(x0 + r, y0),
        );
    }
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
