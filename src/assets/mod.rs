//! Image references, decoding, and the text font.

pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod loader;
pub(crate) mod store;
