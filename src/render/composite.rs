use crate::foundation::core::Rect;
use crate::foundation::error::{AdframeError, AdframeResult};

pub(crate) type PremulRgba8 = [u8; 4];

/// Integer pixel rectangle `[x0, x1) × [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub(crate) x0: u32,
    pub(crate) y0: u32,
    pub(crate) x1: u32,
    pub(crate) y1: u32,
}

impl PixelRect {
    /// Snap `rect` to whole pixels and intersect it with a `width`×`height` surface.
    pub(crate) fn from_rect_clamped(rect: Rect, width: u32, height: u32) -> Self {
        fn snap(v: f64, max: u32) -> u32 {
            if v.is_nan() {
                return 0;
            }
            v.round().clamp(0.0, f64::from(max)) as u32
        }

        let x0 = snap(rect.x0, width);
        let y0 = snap(rect.y0, height);
        Self {
            x0,
            y0,
            x1: snap(rect.x1, width).max(x0),
            y1: snap(rect.y1, height).max(y0),
        }
    }

    pub(crate) fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over composite of `src` onto `dst`, both tightly packed premultiplied RGBA8.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> AdframeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(AdframeError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Like [`over_in_place`], but pixels outside `clip` are left untouched.
pub(crate) fn over_in_place_clipped(
    dst: &mut [u8],
    src: &[u8],
    width: u32,
    clip: PixelRect,
) -> AdframeResult<()> {
    if dst.len() != src.len() || width == 0 || !dst.len().is_multiple_of(4 * width as usize) {
        return Err(AdframeError::render(
            "over_in_place_clipped expects equal-length rgba8 buffers of the given width",
        ));
    }
    let height = (dst.len() / (4 * width as usize)) as u32;
    if clip.x1 > width || clip.y1 > height {
        return Err(AdframeError::render("clip rectangle exceeds surface bounds"));
    }
    if clip.is_empty() {
        return Ok(());
    }

    let stride = 4 * width as usize;
    let (cx0, cx1) = (4 * clip.x0 as usize, 4 * clip.x1 as usize);
    for y in clip.y0 as usize..clip.y1 as usize {
        let row = y * stride;
        over_in_place(
            &mut dst[row + cx0..row + cx1],
            &src[row + cx0..row + cx1],
        )?;
    }
    Ok(())
}

/// Flatten premultiplied pixels over an opaque-or-not background, returning straight RGBA8.
pub(crate) fn flatten_over_background(src: &[u8], background: PremulRgba8) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    for s in src.chunks_exact(4) {
        let px = over(background, [s[0], s[1], s[2], s[3]]);
        out.extend_from_slice(&unpremultiply(px));
    }
    out
}

fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = px[3];
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let un = |c: u8| -> u8 {
                ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8
            };
            [un(px[0]), un(px[1]), un(px[2]), a]
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
