//! Alpha compositing of cursor icons onto captured buffers.

use image::RgbaImage;

use crate::geometry::Point;

/// Where the icon's top-left corner lands inside the destination buffer so
/// that its hotspot sits exactly on the cursor's reported screen position.
pub fn draw_position(screen_pos: Point, destination_origin: Point, hotspot: Point) -> Point {
    Point::new(
        screen_pos.x - destination_origin.x - hotspot.x,
        screen_pos.y - destination_origin.y - hotspot.y,
    )
}

/// Composites `src` over `dest` with straight-alpha blending, top-left at
/// `at`. Source pixels falling outside the destination are clipped.
pub fn blit_rgba(dest: &mut RgbaImage, src: &RgbaImage, at: Point) {
    for (sx, sy, px) in src.enumerate_pixels() {
        let dx = at.x + sx as i32;
        let dy = at.y + sy as i32;
        if dx < 0 || dy < 0 || dx >= dest.width() as i32 || dy >= dest.height() as i32 {
            continue;
        }
        let a = px.0[3] as u16;
        if a == 0 {
            continue;
        }
        let under = dest.get_pixel_mut(dx as u32, dy as u32);
        if a == 255 {
            *under = *px;
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            under.0[c] = ((px.0[c] as u16 * a + under.0[c] as u16 * inv + 127) / 255) as u8;
        }
        under.0[3] = (a + (under.0[3] as u16 * inv + 127) / 255).min(255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(px))
    }

    #[test]
    fn test_hotspot_lands_on_cursor_position() {
        // Cursor at desktop (500,500), capture origin (480,480), hotspot (0,0)
        // => icon top-left at local (20,20).
        let at = draw_position(Point::new(500, 500), Point::new(480, 480), Point::new(0, 0));
        assert_eq!(at, Point::new(20, 20));
    }

    #[test]
    fn test_hotspot_offsets_draw_position() {
        let at = draw_position(Point::new(100, 100), Point::new(90, 90), Point::new(3, 7));
        assert_eq!(at, Point::new(7, 3));
    }

    #[test]
    fn test_opaque_blit_replaces_pixels() {
        let mut dest = solid(8, 8, [0, 0, 0, 255]);
        let icon = solid(2, 2, [255, 0, 0, 255]);
        blit_rgba(&mut dest, &icon, Point::new(3, 3));
        assert_eq!(dest.get_pixel(3, 3).0, [255, 0, 0, 255]);
        assert_eq!(dest.get_pixel(4, 4).0, [255, 0, 0, 255]);
        assert_eq!(dest.get_pixel(5, 5).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_transparent_pixels_leave_destination_alone() {
        let mut dest = solid(4, 4, [9, 9, 9, 255]);
        let icon = solid(4, 4, [255, 255, 255, 0]);
        blit_rgba(&mut dest, &icon, Point::new(0, 0));
        assert_eq!(dest.get_pixel(2, 2).0, [9, 9, 9, 255]);
    }

    #[test]
    fn test_half_alpha_blends() {
        let mut dest = solid(1, 1, [0, 0, 0, 255]);
        let icon = solid(1, 1, [255, 255, 255, 128]);
        blit_rgba(&mut dest, &icon, Point::new(0, 0));
        let px = dest.get_pixel(0, 0).0;
        assert!(px[0] >= 127 && px[0] <= 129);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_blit_clips_at_every_edge() {
        let icon = solid(4, 4, [1, 2, 3, 255]);
        for at in [
            Point::new(-2, -2),
            Point::new(6, -2),
            Point::new(-2, 6),
            Point::new(6, 6),
        ] {
            let mut dest = solid(8, 8, [0, 0, 0, 255]);
            blit_rgba(&mut dest, &icon, at);
            // No panic, and only the overlapping quadrant changed.
            let changed = dest.pixels().filter(|p| p.0 == [1, 2, 3, 255]).count();
            assert_eq!(changed, 4);
        }
    }

    #[test]
    fn test_blit_fully_outside_is_a_no_op() {
        let mut dest = solid(4, 4, [7, 7, 7, 255]);
        let icon = solid(2, 2, [0, 0, 0, 255]);
        blit_rgba(&mut dest, &icon, Point::new(100, 100));
        assert!(dest.pixels().all(|p| p.0 == [7, 7, 7, 255]));
    }
}
