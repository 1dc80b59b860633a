use std::collections::HashMap;

use image::{Rgba, RgbaImage};
use once_cell::sync::Lazy;

use crate::draw::{fill_rect, Rect};

/// Target box for one block letter.
#[derive(Debug, Clone, Copy)]
pub struct GlyphBox {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

/// A recipe turns a glyph box and stroke thickness into the ordered list of
/// rectangles that make up the letter.
type Recipe = fn(GlyphBox, i64) -> Vec<Rect>;

static RECIPES: Lazy<HashMap<char, Recipe>> = Lazy::new(|| {
    let mut m: HashMap<char, Recipe> = HashMap::new();
    m.insert('W', glyph_w);
    m.insert('A', glyph_a);
    m.insert('L', glyph_l);
    m.insert('C', glyph_c);
    m.insert('R', glyph_r);
    m.insert('F', glyph_f);
    m.insert('T', glyph_t);
    m
});

/// Stroke thickness as a fraction of the letter width, never thinner than 2px.
pub fn stroke_thickness(w: i64) -> i64 {
    ((w as f32 * 0.24) as i64).max(2)
}

/// Draw commands for a single letter, or `None` for letters outside the
/// supported set (W, A, L, C, R, F, T).
pub fn glyph_commands(letter: char, b: GlyphBox) -> Option<Vec<Rect>> {
    let recipe = RECIPES.get(&letter.to_ascii_uppercase())?;
    Some(recipe(b, stroke_thickness(b.w)))
}

/// Draw one block letter into the image. Letters without a recipe draw
/// nothing; the icon text is a closed set and unknown input stays silent.
pub fn draw_block_letter(img: &mut RgbaImage, letter: char, b: GlyphBox, color: Rgba<u8>) {
    if let Some(cmds) = glyph_commands(letter, b) {
        for r in cmds {
            fill_rect(img, r, color);
        }
    }
}

fn glyph_w(b: GlyphBox, t: i64) -> Vec<Rect> {
    let GlyphBox { x, y, w, h } = b;
    // side bars plus two inner legs, joined at the bottom and the middle
    let leg = w / 5;
    let ix1 = x + leg + t / 2;
    let ix2 = x + w - leg - t - t / 2;
    vec![
        Rect::new(x, y, x + t, y + h),
        Rect::new(x + w - t, y, x + w, y + h),
        Rect::new(ix1, y + h / 3, ix1 + t, y + h),
        Rect::new(ix2, y + h / 3, ix2 + t, y + h),
        Rect::new(x, y + h - t, x + w, y + h),
        Rect::new(ix1, y + h / 2, ix2 + t, y + h / 2 + t),
    ]
}

fn glyph_a(b: GlyphBox, t: i64) -> Vec<Rect> {
    let GlyphBox { x, y, w, h } = b;
    let mid_y = y + h / 2;
    vec![
        Rect::new(x, y, x + t, y + h),
        Rect::new(x + w - t, y, x + w, y + h),
        Rect::new(x, y, x + w, y + t),
        Rect::new(x, mid_y, x + w, mid_y + t),
    ]
}

fn glyph_l(b: GlyphBox, t: i64) -> Vec<Rect> {
    let GlyphBox { x, y, w, h } = b;
    vec![
        Rect::new(x, y, x + t, y + h),
        Rect::new(x, y + h - t, x + w, y + h),
    ]
}

fn glyph_c(b: GlyphBox, t: i64) -> Vec<Rect> {
    let GlyphBox { x, y, w, h } = b;
    vec![
        Rect::new(x, y, x + t, y + h),
        Rect::new(x, y, x + w, y + t),
        Rect::new(x, y + h - t, x + w, y + h),
    ]
}

fn glyph_r(b: GlyphBox, t: i64) -> Vec<Rect> {
    let GlyphBox { x, y, w, h } = b;
    let mut cmds = vec![
        Rect::new(x, y, x + t, y + h),
        Rect::new(x, y, x + w, y + t),
        Rect::new(x + w - t, y, x + w, y + h / 2 + t),
        Rect::new(x, y + h / 2, x + w, y + h / 2 + t),
    ];
    // diagonal leg approximated by a run of short rectangles
    let steps = h / 2;
    for i in 0..steps {
        let frac = i as f32 / (steps - 1).max(1) as f32;
        let lx = x + (w as f32 * 0.3 + frac * (w as f32 * 0.7 - t as f32)) as i64;
        let ly = y + h / 2 + t + i;
        if ly + t > y + h {
            break;
        }
        cmds.push(Rect::new(lx, ly, lx + t, ly + 1));
    }
    cmds
}

fn glyph_f(b: GlyphBox, t: i64) -> Vec<Rect> {
    let GlyphBox { x, y, w, h } = b;
    vec![
        Rect::new(x, y, x + t, y + h),
        Rect::new(x, y, x + w, y + t),
        Rect::new(x, y + h / 2, x + (w as f32 * 0.75) as i64, y + h / 2 + t),
    ]
}

fn glyph_t(b: GlyphBox, t: i64) -> Vec<Rect> {
    let GlyphBox { x, y, w, h } = b;
    let cx = x + w / 2 - t / 2;
    vec![
        Rect::new(x, y, x + w, y + t),
        Rect::new(cx, y, cx + t, y + h),
    ]
}

/// Total rendered width for a run of block letters.
pub fn measure_text(text: &str, char_w: i64, spacing: i64) -> i64 {
    let n = text.chars().count() as i64;
    if n == 0 {
        return 0;
    }
    n * char_w + (n - 1) * spacing
}

/// Draw block text centered about `cx`.
pub fn draw_text_centered(
    img: &mut RgbaImage,
    text: &str,
    cx: i64,
    y: i64,
    char_w: i64,
    char_h: i64,
    spacing: i64,
    color: Rgba<u8>,
) {
    let total = measure_text(text, char_w, spacing);
    let start = cx - total / 2;
    place_letters(img, text, start, y, char_w, char_h, spacing, color);
}

/// Draw block text left-aligned from `x`.
pub fn draw_text_left(
    img: &mut RgbaImage,
    text: &str,
    x: i64,
    y: i64,
    char_w: i64,
    char_h: i64,
    spacing: i64,
    color: Rgba<u8>,
) {
    place_letters(img, text, x, y, char_w, char_h, spacing, color);
}

fn place_letters(
    img: &mut RgbaImage,
    text: &str,
    start: i64,
    y: i64,
    char_w: i64,
    char_h: i64,
    spacing: i64,
    color: Rgba<u8>,
) {
    for (i, ch) in text.chars().enumerate() {
        let lx = start + i as i64 * (char_w + spacing);
        let b = GlyphBox { x: lx, y, w: char_w, h: char_h };
        draw_block_letter(img, ch, b, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn painted_span(img: &RgbaImage) -> Option<(i64, i64)> {
        let mut min_x = None;
        let mut max_x = None;
        for (x, _, px) in img.enumerate_pixels() {
            if px.0[3] != 0 {
                let x = x as i64;
                min_x = Some(min_x.map_or(x, |m: i64| m.min(x)));
                max_x = Some(max_x.map_or(x, |m: i64| m.max(x)));
            }
        }
        Some((min_x?, max_x?))
    }

    #[test]
    fn measure_text_law() {
        assert_eq!(measure_text("", 40, 10), 0);
        assert_eq!(measure_text("W", 40, 10), 40);
        assert_eq!(measure_text("WALL", 40, 10), 4 * 40 + 3 * 10);
        assert_eq!(measure_text("CRAFT", 33, 7), 5 * 33 + 4 * 7);
    }

    #[test]
    fn every_supported_letter_paints() {
        for ch in ['W', 'A', 'L', 'C', 'R', 'F', 'T'] {
            let mut img = RgbaImage::new(64, 96);
            let b = GlyphBox { x: 4, y: 4, w: 48, h: 80 };
            draw_block_letter(&mut img, ch, b, INK);
            assert!(painted_span(&img).is_some(), "{ch} drew nothing");
        }
    }

    #[test]
    fn lowercase_maps_to_same_recipe() {
        let b = GlyphBox { x: 0, y: 0, w: 40, h: 60 };
        assert_eq!(glyph_commands('w', b), glyph_commands('W', b));
    }

    #[test]
    fn unsupported_letter_is_silent_noop() {
        let mut img = RgbaImage::new(64, 96);
        let b = GlyphBox { x: 4, y: 4, w: 48, h: 80 };
        for ch in ['B', 'X', 'Z', '9', '!'] {
            assert!(glyph_commands(ch, b).is_none());
            draw_block_letter(&mut img, ch, b, INK);
        }
        assert!(painted_span(&img).is_none());
    }

    #[test]
    fn letters_span_their_box() {
        // every supported letter touches both the left and right box edges
        for ch in ['W', 'A', 'L', 'C', 'R', 'F', 'T'] {
            let mut img = RgbaImage::new(128, 128);
            let b = GlyphBox { x: 20, y: 10, w: 60, h: 90 };
            draw_block_letter(&mut img, ch, b, INK);
            let (min_x, max_x) = painted_span(&img).unwrap();
            assert_eq!(min_x, 20, "{ch} left edge");
            assert_eq!(max_x, 80, "{ch} right edge");
        }
    }

    #[test]
    fn centered_text_midpoint_matches_cx() {
        let mut img = RgbaImage::new(512, 128);
        let cx = 256;
        draw_text_centered(&mut img, "WALL", cx, 10, 40, 60, 10, INK);
        let (min_x, max_x) = painted_span(&img).unwrap();
        let mid = (min_x + max_x) as f64 / 2.0;
        assert!((mid - cx as f64).abs() <= 1.0, "midpoint {mid} vs {cx}");
    }

    #[test]
    fn left_aligned_text_starts_at_x() {
        let mut img = RgbaImage::new(512, 128);
        draw_text_left(&mut img, "CRAFT", 30, 10, 40, 60, 8, INK);
        let (min_x, max_x) = painted_span(&img).unwrap();
        assert_eq!(min_x, 30);
        assert_eq!(max_x, 30 + measure_text("CRAFT", 40, 8));
    }
}
