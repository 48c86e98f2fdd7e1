use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_half_alpha_blends() {
    let dst = [0, 0, 200, 255];
    let src = [128, 0, 0, 128];
    assert_eq!(over(dst, src), [128, 0, 100, 255]);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn clipped_composite_leaves_outside_pixels() {
    // 3x2 surface, clip to the middle column.
    let mut dst = vec![0u8; 3 * 2 * 4];
    let src = [9u8, 9, 9, 255].repeat(6);
    let clip = PixelRect {
        x0: 1,
        y0: 0,
        x1: 2,
        y1: 2,
    };
    over_in_place_clipped(&mut dst, &src, 3, clip).unwrap();

    for y in 0..2 {
        for x in 0..3 {
            let i = (y * 3 + x) * 4;
            let expected = if x == 1 { [9, 9, 9, 255] } else { [0, 0, 0, 0] };
            assert_eq!(&dst[i..i + 4], &expected, "pixel ({x},{y})");
        }
    }
}

#[test]
fn clipped_composite_rejects_out_of_bounds_clip() {
    let mut dst = vec![0u8; 2 * 2 * 4];
    let src = vec![0u8; 2 * 2 * 4];
    let clip = PixelRect {
        x0: 0,
        y0: 0,
        x1: 3,
        y1: 1,
    };
    assert!(over_in_place_clipped(&mut dst, &src, 2, clip).is_err());
}

#[test]
fn pixel_rect_snaps_and_clamps() {
    let r = PixelRect::from_rect_clamped(Rect::new(-5.0, 10.4, 50.6, 2000.0), 40, 100);
    assert_eq!(
        r,
        PixelRect {
            x0: 0,
            y0: 10,
            x1: 40,
            y1: 100
        }
    );
    let empty = PixelRect::from_rect_clamped(Rect::new(60.0, 0.0, 70.0, 10.0), 40, 100);
    assert!(empty.is_empty());
}

#[test]
fn flatten_puts_pixels_over_background() {
    let src = [0u8, 0, 0, 0, 255, 0, 0, 255];
    let out = flatten_over_background(&src, [3, 105, 161, 255]);
    assert_eq!(out, vec![3, 105, 161, 255, 255, 0, 0, 255]);

    let out = flatten_over_background(&[64, 0, 0, 128], [0, 0, 0, 0]);
    assert_eq!(out, vec![128, 0, 0, 128]);
}
