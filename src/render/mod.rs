//! CPU layer painting and surface compositing.

pub(crate) mod composite;
pub(crate) mod frame;
pub(crate) mod paint;
pub(crate) mod shapes;
pub(crate) mod surface;
pub(crate) mod svg_raster;
