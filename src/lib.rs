//! Adframe renders square social-media ad frames from a template.
//!
//! A [`TemplateDescriptor`] names three image layers (pattern, mask, stroke), a mask region for
//! the user's photo, and caption / call-to-action styling. A [`Compositor`] draws a frame from
//! [`RenderInputs`] in a fixed order:
//!
//! 1. pattern over the whole canvas
//! 2. mask art at the mask region
//! 3. uploaded photo, clipped to the mask region
//! 4. stroke art
//! 5. wrapped caption lines
//! 6. rounded CTA button with its centered label
//!
//! Image loading is asynchronous through an [`ImageLoader`]; layer order holds regardless of
//! load timing, and a newer render always wins over one still in flight.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod foundation;
mod layout;
mod render;
mod template;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{AdframeError, AdframeResult};

pub use crate::assets::color::Color;
pub use crate::assets::decode::{decode_asset, decode_data_url, decode_image, parse_svg};
pub use crate::assets::loader::{FsImageLoader, ImageLoader, ImageSource, MemoryImageLoader};
pub use crate::assets::store::{PreparedAsset, PreparedImage, PreparedSvg, normalize_rel_path};

pub use crate::template::model::{
    CaptionStyle, CtaStyle, LayerUrls, MaskRegion, STROKE_PAD_X, STROKE_PAD_Y,
    TemplateDescriptor, TextAlign,
};

pub use crate::layout::button::{
    ButtonGeometry, CTA_CORNER_RADIUS, CTA_HEIGHT, CTA_PADDING_X, cta_button_geometry,
};
pub use crate::layout::wrap::layout_text;

pub use crate::render::frame::{Frame, Layer};
pub use crate::render::shapes::rounded_rect_path;

pub use crate::compose::compositor::{
    Compositor, OmittedLayer, RenderOutcome, RenderReport, RenderStage,
};
pub use crate::compose::inputs::{DEFAULT_BACKGROUND, RenderInputs};
