//! Dominant color extraction from decoded artwork pixels.

use aura_animation::{Palette, Rgb};
use rustc_hash::FxHashMap;

/// Sample every tenth pixel by default.
pub const DEFAULT_QUALITY: usize = 10;

/// Accent used when artwork yields no usable pixel.
pub const FALLBACK_ACCENT: Rgb = Rgb::new(0xbc, 0x77, 0xff);

/// Channels above this on all of r, g and b count as white.
const NEAR_WHITE: u8 = 240;

/// Most frequent color in an RGBA8 buffer.
///
/// Every `quality`-th pixel is sampled (`0` samples all of them). Near-white
/// and fully transparent pixels are skipped; a trailing partial pixel is
/// ignored. Ties go to the color seen first. Returns [`FALLBACK_ACCENT`] when
/// nothing is left to count.
pub fn dominant_color(rgba: &[u8], quality: usize) -> Rgb {
    let mut counts: FxHashMap<Rgb, (usize, usize)> = FxHashMap::default();

    for (seen, px) in rgba.chunks_exact(4).step_by(quality.max(1)).enumerate() {
        let (r, g, b, a) = (px[0], px[1], px[2], px[3]);
        if a == 0 || (r > NEAR_WHITE && g > NEAR_WHITE && b > NEAR_WHITE) {
            continue;
        }
        counts.entry(Rgb::new(r, g, b)).or_insert((0, seen)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(color, _)| color)
        .unwrap_or(FALLBACK_ACCENT)
}

/// `base` with its accent replaced by the artwork's dominant color.
pub fn palette_from_pixels(base: Palette, rgba: &[u8], quality: usize) -> Palette {
    Palette::new(base.primary, base.secondary, dominant_color(rgba, quality))
}
