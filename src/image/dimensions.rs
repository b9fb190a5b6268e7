//! Aspect-fit target dimensions.

use crate::config::SizeSpec;

/// Largest scale that fits `src` inside `box`, capped at 1.0 (never enlarge).
fn fit_scale(src_w: u32, src_h: u32, box_w: u32, box_h: u32) -> f64 {
    let scale_w = f64::from(box_w) / f64::from(src_w);
    let scale_h = f64::from(box_h) / f64::from(src_h);
    scale_w.min(scale_h).min(1.0)
}

/// Apply `scale`, rounding and keeping at least 1px per side.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn apply_scale(src_w: u32, src_h: u32, scale: f64) -> (u32, u32) {
    let w = (f64::from(src_w) * scale).round() as u32;
    let h = (f64::from(src_h) * scale).round() as u32;
    (w.max(1), h.max(1))
}

/// Dimensions of `src_w × src_h` scaled to fit inside `size`.
///
/// Aspect ratio is preserved and the image is never enlarged.
pub fn fit_within(src_w: u32, src_h: u32, size: SizeSpec) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (src_w, src_h);
    }
    let scale = fit_scale(src_w, src_h, size.width, size.height);
    apply_scale(src_w, src_h, scale)
}
