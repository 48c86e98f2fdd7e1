use std::sync::Arc;

use anyhow::Context;
use base64::Engine as _;

use crate::{
    AdframeError, AdframeResult,
    assets::store::{PreparedAsset, PreparedImage, PreparedSvg},
};

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> AdframeResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG bytes into a prepared `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> AdframeResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

/// Decode any supported layer resource, sniffing SVG documents by content.
pub fn decode_asset(bytes: &[u8]) -> AdframeResult<PreparedAsset> {
    if looks_like_svg(bytes) {
        return parse_svg(bytes).map(PreparedAsset::Svg);
    }
    decode_image(bytes).map(PreparedAsset::Image)
}

/// Extract the payload of a `data:` URL, as produced by browser file uploads.
///
/// Both `;base64` and plain payloads are accepted.
pub fn decode_data_url(url: &str) -> AdframeResult<Vec<u8>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| AdframeError::decode("data url must start with 'data:'"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| AdframeError::decode("data url is missing ',' separator"))?;

    if meta.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .context("decode base64 data url payload")?;
        return Ok(bytes);
    }
    Ok(payload.as_bytes().to_vec())
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
