use image::{Rgba, RgbaImage};

use crate::draw::{self, Rect};
use crate::glyphs;

pub const MASTER_SIZE: u32 = 1024;

pub const BACKGROUND: Rgba<u8> = Rgba([28, 28, 28, 255]);
pub const TEXT_COLOR: Rgba<u8> = Rgba([235, 230, 210, 255]);

/// Warm retro gradient, top to bottom.
pub const STRIPE_COLORS: [[u8; 3]; 6] = [
    [210, 60, 50],
    [230, 130, 50],
    [240, 195, 55],
    [160, 200, 80],
    [60, 175, 160],
    [50, 130, 170],
];

/// Render the master icon: rounded dark background, six stripes, and the
/// "WALL" / "CRAFT" block text, clipped to rounded corners. Pure function of
/// the constants above, so output is bit-identical across runs.
pub fn generate_icon(size: u32) -> RgbaImage {
    let s = size as i64;
    // all geometry is proportional to the master size, truncated to pixels
    let frac = |f: f32| (size as f32 * f) as i64;

    let mut img = RgbaImage::new(size, size);

    let margin = frac(0.02);
    let corner_r = frac(0.18);
    let bounds = Rect::new(margin, margin, s - margin, s - margin);

    draw::fill_rounded_rect(&mut img, bounds, corner_r, BACKGROUND);

    let stripe_left = margin + frac(0.08);
    let stripe_right = s - margin - frac(0.08);
    let stripe_top = margin + frac(0.08);
    let zone_h = frac(0.38);
    let n = STRIPE_COLORS.len() as i64;
    let gap = frac(0.018);
    let stripe_h = (zone_h - (n - 1) * gap) / n;
    let stripe_r = frac(0.012);

    for (i, c) in STRIPE_COLORS.iter().enumerate() {
        let sy = stripe_top + i as i64 * (stripe_h + gap);
        let stripe = Rect::new(stripe_left, sy, stripe_right, sy + stripe_h);
        draw::fill_rounded_rect(&mut img, stripe, stripe_r, Rgba([c[0], c[1], c[2], 255]));
    }

    // Both text lines span exactly the stripe width: "CRAFT" fixes the letter
    // width, "WALL" reuses it with wider spacing filling the remainder.
    let text_top = stripe_top + zone_h + frac(0.05);
    let span = stripe_right - stripe_left;
    let char_h = frac(0.17);

    let craft_char_w = (span as f32 / (5.0 + 4.0 * 0.35)) as i64;
    let craft_spacing = (span - 5 * craft_char_w) / 4;
    let wall_char_w = craft_char_w;
    let wall_spacing = (span - 4 * wall_char_w) / 3;

    let wall_y = text_top;
    let craft_y = text_top + char_h + frac(0.03);

    glyphs::draw_text_left(
        &mut img, "WALL", stripe_left, wall_y, wall_char_w, char_h, wall_spacing, TEXT_COLOR,
    );
    glyphs::draw_text_left(
        &mut img, "CRAFT", stripe_left, craft_y, craft_char_w, char_h, craft_spacing, TEXT_COLOR,
    );

    let mask = draw::rounded_rect_mask(size, size, bounds, corner_r);
    draw::apply_alpha_mask(&mut img, &mask);

    img
}
