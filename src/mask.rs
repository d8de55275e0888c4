//! Paint-and-crop masking of a capture against a window silhouette.
//!
//! The complement of the window's region within its bounding box is
//! painted with a caller-supplied fill color, then the result is cropped
//! to that bounding box. Partial complement coverage blends fill and
//! capture, preserving an anti-aliased boundary.

use image::{Rgba, RgbaImage};

use crate::geometry::{Point, Rect};
use crate::region::Region;

/// Masks everything outside `region` with `fill` and returns a new buffer
/// tightly cropped to the region's bounding box. Pixels fully inside the
/// region are copied untouched. A zero-area bounding box yields a
/// zero-size buffer.
pub fn mask_and_crop(capture: &RgbaImage, region: &Region, fill: Rgba<u8>) -> RgbaImage {
    let capture_rect = Rect::from_xywh(0, 0, capture.width(), capture.height());
    let bounds = region.bounding_box().intersect(&capture_rect);
    if bounds.is_empty() {
        return RgbaImage::new(0, 0);
    }

    let complement = region.complement(bounds);
    let mut out = RgbaImage::new(bounds.width(), bounds.height());
    for (x, y, px) in out.enumerate_pixels_mut() {
        let world = Point::new(bounds.left + x as i32, bounds.top + y as i32);
        let src = *capture.get_pixel(world.x as u32, world.y as u32);
        let w = complement.coverage_at(world) as u16;
        *px = match w {
            0 => src,
            255 => fill,
            _ => {
                let inv = 255 - w;
                let mut blended = [0u8; 4];
                for c in 0..4 {
                    blended[c] =
                        ((fill.0[c] as u16 * w + src.0[c] as u16 * inv + 127) / 255) as u8;
                }
                Rgba(blended)
            }
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: Rgba<u8> = Rgba([255, 0, 255, 255]);

    fn checker(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([200, 200, 200, 255])
            } else {
                Rgba([50, 50, 50, 255])
            }
        })
    }

    #[test]
    fn test_full_rect_region_yields_identical_copy() {
        let capture = checker(16, 12);
        let region = Region::rect(Rect::from_xywh(0, 0, 16, 12));
        let out = mask_and_crop(&capture, &region, FILL);
        assert_eq!(out.dimensions(), (16, 12));
        assert_eq!(out.as_raw(), capture.as_raw());
    }

    #[test]
    fn test_rounded_region_fills_corners_only() {
        let capture = RgbaImage::from_pixel(40, 40, Rgba([10, 20, 30, 255]));
        let region = Region::rounded_rect(Rect::from_xywh(0, 0, 40, 40), 9);
        let out = mask_and_crop(&capture, &region, FILL);
        assert_eq!(out.dimensions(), (40, 40));
        // Outermost corner pixels are pure fill.
        assert_eq!(*out.get_pixel(0, 0), FILL);
        assert_eq!(*out.get_pixel(39, 0), FILL);
        assert_eq!(*out.get_pixel(0, 39), FILL);
        assert_eq!(*out.get_pixel(39, 39), FILL);
        // Center and edge midpoints carry the capture untouched.
        assert_eq!(out.get_pixel(20, 20).0, [10, 20, 30, 255]);
        assert_eq!(out.get_pixel(20, 0).0, [10, 20, 30, 255]);
        assert_eq!(out.get_pixel(0, 20).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_rounded_region_boundary_is_antialiased() {
        let capture = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]));
        let region = Region::rounded_rect(Rect::from_xywh(0, 0, 40, 40), 9);
        let out = mask_and_crop(&capture, &region, Rgba([255, 255, 255, 255]));
        let blended = (0..5)
            .flat_map(|y| (0..5).map(move |x| (x, y)))
            .any(|(x, y)| {
                let v = out.get_pixel(x, y).0[0];
                v > 0 && v < 255
            });
        assert!(blended, "corner boundary should blend fill and capture");
    }

    #[test]
    fn test_crops_to_region_bounding_box() {
        let capture = checker(20, 20);
        let region = Region::rect(Rect::from_xywh(4, 6, 8, 5));
        let out = mask_and_crop(&capture, &region, FILL);
        assert_eq!(out.dimensions(), (8, 5));
        for y in 0..5 {
            for x in 0..8 {
                assert_eq!(out.get_pixel(x, y), capture.get_pixel(x + 4, y + 6));
            }
        }
    }

    #[test]
    fn test_empty_region_yields_zero_size_buffer() {
        let capture = checker(10, 10);
        let region = Region::from_rects(&[]);
        let out = mask_and_crop(&capture, &region, FILL);
        assert_eq!(out.dimensions(), (0, 0));
    }

    #[test]
    fn test_region_outside_capture_yields_zero_size_buffer() {
        let capture = checker(10, 10);
        let region = Region::rect(Rect::from_xywh(50, 50, 5, 5));
        let out = mask_and_crop(&capture, &region, FILL);
        assert_eq!(out.dimensions(), (0, 0));
    }

    #[test]
    fn test_masking_is_deterministic() {
        let capture = checker(32, 32);
        let region = Region::rounded_rect(Rect::from_xywh(0, 0, 32, 32), 9);
        let a = mask_and_crop(&capture, &region, FILL);
        let b = mask_and_crop(&capture, &region, FILL);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_scanline_region_masks_the_gap() {
        let capture = RgbaImage::from_pixel(10, 4, Rgba([1, 1, 1, 255]));
        let region = Region::from_rects(&[
            Rect::from_xywh(0, 0, 4, 4),
            Rect::from_xywh(6, 0, 4, 4),
        ]);
        let out = mask_and_crop(&capture, &region, FILL);
        assert_eq!(out.dimensions(), (10, 4));
        assert_eq!(out.get_pixel(1, 1).0, [1, 1, 1, 255]);
        assert_eq!(*out.get_pixel(5, 1), FILL);
        assert_eq!(out.get_pixel(7, 1).0, [1, 1, 1, 255]);
    }
}
