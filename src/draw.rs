use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Axis-aligned rectangle with inclusive pixel bounds on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl Rect {
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Rect { x0, y0, x1, y1 }
    }
}

/// Fill a rectangle, clamped to the image bounds. Coordinates may lie outside
/// the image or be negative; only the overlapping pixels are painted.
pub fn fill_rect(img: &mut RgbaImage, r: Rect, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    let x_lo = r.x0.max(0);
    let y_lo = r.y0.max(0);
    let x_hi = r.x1.min(w as i64 - 1);
    let y_hi = r.y1.min(h as i64 - 1);
    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

fn clamp_radius(r: Rect, radius: i64) -> i64 {
    radius.min((r.x1 - r.x0) / 2).min((r.y1 - r.y0) / 2)
}

/// True when (x, y) lies inside the rectangle with its four corners replaced
/// by quarter-circle arcs of radius `rad`. `rad` must already be clamped.
fn rounded_contains(r: Rect, rad: i64, x: i64, y: i64) -> bool {
    if x < r.x0 || x > r.x1 || y < r.y0 || y > r.y1 {
        return false;
    }
    let cx = if x < r.x0 + rad {
        r.x0 + rad
    } else if x > r.x1 - rad {
        r.x1 - rad
    } else {
        return true;
    };
    let cy = if y < r.y0 + rad {
        r.y0 + rad
    } else if y > r.y1 - rad {
        r.y1 - rad
    } else {
        return true;
    };
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= rad * rad
}

/// Fill a rounded rectangle. A non-positive radius (after clamping to half the
/// shorter side) degenerates to a plain filled rectangle.
pub fn fill_rounded_rect(img: &mut RgbaImage, r: Rect, radius: i64, color: Rgba<u8>) {
    let rad = clamp_radius(r, radius);
    if rad <= 0 {
        fill_rect(img, r, color);
        return;
    }
    let (w, h) = img.dimensions();
    let x_lo = r.x0.max(0);
    let y_lo = r.y0.max(0);
    let x_hi = r.x1.min(w as i64 - 1);
    let y_hi = r.y1.min(h as i64 - 1);
    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            if rounded_contains(r, rad, x, y) {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Single-channel mask for the same rounded-rectangle geometry: 255 inside,
/// 0 outside.
pub fn rounded_rect_mask(width: u32, height: u32, r: Rect, radius: i64) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    let rad = clamp_radius(r, radius);
    for (x, y, px) in mask.enumerate_pixels_mut() {
        let inside = if rad <= 0 {
            let (x, y) = (x as i64, y as i64);
            x >= r.x0 && x <= r.x1 && y >= r.y0 && y <= r.y1
        } else {
            rounded_contains(r, rad, x as i64, y as i64)
        };
        if inside {
            *px = Luma([255]);
        }
    }
    mask
}

/// Replace the image's alpha channel with the mask wholesale. Both buffers
/// must have the same dimensions.
pub fn apply_alpha_mask(img: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(img.dimensions(), mask.dimensions());
    for (x, y, px) in img.enumerate_pixels_mut() {
        px.0[3] = mask.get_pixel(x, y).0[0];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn painted(img: &RgbaImage, x: i64, y: i64) -> bool {
        img.get_pixel(x as u32, y as u32).0[3] != 0
    }

    #[test]
    fn zero_radius_is_plain_rect() {
        let mut img = RgbaImage::new(64, 64);
        fill_rounded_rect(&mut img, Rect::new(10, 10, 50, 40), 0, WHITE);
        let mut reference = RgbaImage::new(64, 64);
        fill_rect(&mut reference, Rect::new(10, 10, 50, 40), WHITE);
        assert_eq!(img.as_raw(), reference.as_raw());
    }

    #[test]
    fn corners_are_cut_out() {
        let mut img = RgbaImage::new(64, 64);
        fill_rounded_rect(&mut img, Rect::new(10, 10, 50, 50), 10, WHITE);
        // bbox corners fall outside the quarter-circle arcs
        assert!(!painted(&img, 10, 10));
        assert!(!painted(&img, 50, 10));
        assert!(!painted(&img, 10, 50));
        assert!(!painted(&img, 50, 50));
        // arc centers and the middle are inside
        assert!(painted(&img, 20, 20));
        assert!(painted(&img, 30, 30));
        // edge midpoints are flat sections
        assert!(painted(&img, 30, 10));
        assert!(painted(&img, 10, 30));
    }

    #[test]
    fn radius_clamped_to_half_shorter_side() {
        let mut large = RgbaImage::new(64, 64);
        fill_rounded_rect(&mut large, Rect::new(10, 10, 50, 30), 100, WHITE);
        let mut clamped = RgbaImage::new(64, 64);
        fill_rounded_rect(&mut clamped, Rect::new(10, 10, 50, 30), 10, WHITE);
        assert_eq!(large.as_raw(), clamped.as_raw());
    }

    #[test]
    fn fill_rect_clamps_to_image() {
        let mut img = RgbaImage::new(16, 16);
        fill_rect(&mut img, Rect::new(-5, -5, 20, 20), WHITE);
        for px in img.pixels() {
            assert_eq!(*px, WHITE);
        }
    }

    #[test]
    fn mask_matches_fill_geometry() {
        let bounds = Rect::new(4, 4, 59, 59);
        let mut img = RgbaImage::new(64, 64);
        fill_rounded_rect(&mut img, bounds, 12, WHITE);
        let mask = rounded_rect_mask(64, 64, bounds, 12);
        for (x, y, px) in img.enumerate_pixels() {
            let expected = if px.0[3] != 0 { 255 } else { 0 };
            assert_eq!(mask.get_pixel(x, y).0[0], expected, "mismatch at {x},{y}");
        }
    }

    #[test]
    fn alpha_mask_replaces_alpha() {
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
        let mask = rounded_rect_mask(8, 8, Rect::new(2, 2, 5, 5), 0);
        apply_alpha_mask(&mut img, &mask);
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(3, 3).0[3], 255);
        // color channels untouched
        assert_eq!(&img.get_pixel(0, 0).0[..3], &[10, 20, 30]);
    }
}
