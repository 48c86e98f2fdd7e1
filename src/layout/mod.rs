//! Pure layout rules: caption wrapping and CTA button geometry.

pub(crate) mod button;
pub(crate) mod wrap;
