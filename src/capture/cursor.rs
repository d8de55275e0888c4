//! Best-effort mouse-cursor overlay.
//!
//! The cursor is queried fresh on every request: position, active icon,
//! and hotspot. The system-owned icon is duplicated with `CopyIcon`
//! before use (the original may be invalidated concurrently) and the
//! duplicate plus both ICONINFO bitmaps are destroyed before the query
//! returns, success or failure.

use std::ffi::c_void;
use std::mem::size_of;

use anyhow::{Context, ensure};
use image::RgbaImage;
use log::debug;
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAP, BITMAPINFO, BITMAPINFOHEADER, DIB_RGB_COLORS, DeleteObject, GetDIBits,
    GetObjectW, HBITMAP, HDC,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CURSOR_SHOWING, CURSORINFO, CopyIcon, DestroyIcon, GetCursorInfo, GetIconInfo, HICON,
    ICONINFO,
};

use super::surface::ScreenDc;
use crate::compose;
use crate::geometry::Point;

/// A transient view of the live cursor.
pub struct CursorSnapshot {
    pub screen_pos: Point,
    pub hotspot: Point,
    pub image: RgbaImage,
}

/// Icon duplicate owned by this module, destroyed on drop.
struct OwnedIcon(HICON);

impl Drop for OwnedIcon {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyIcon(self.0);
        }
    }
}

/// The mask/color bitmaps GetIconInfo hands back; the caller must delete
/// them when no longer needed.
struct IconBitmaps {
    color: HBITMAP,
    mask: HBITMAP,
}

impl Drop for IconBitmaps {
    fn drop(&mut self) {
        unsafe {
            if !self.color.is_invalid() {
                let _ = DeleteObject(self.color);
            }
            if !self.mask.is_invalid() {
                let _ = DeleteObject(self.mask);
            }
        }
    }
}

/// Draws the live cursor onto `destination` so its hotspot lands exactly
/// on the cursor's reported screen position, translated into the
/// destination's local frame. Hidden cursor or any query failure is a
/// silent no-op; cursor inclusion is cosmetic and never fails a capture.
pub fn overlay(destination: &mut RgbaImage, destination_origin: Point) {
    match snapshot() {
        Ok(Some(cursor)) => {
            let at = compose::draw_position(cursor.screen_pos, destination_origin, cursor.hotspot);
            compose::blit_rgba(destination, &cursor.image, at);
        }
        Ok(None) => {}
        Err(err) => debug!("cursor overlay skipped: {err:#}"),
    }
}

/// Queries the live cursor. `None` when the cursor is hidden.
pub fn snapshot() -> anyhow::Result<Option<CursorSnapshot>> {
    let mut info = CURSORINFO {
        cbSize: size_of::<CURSORINFO>() as u32,
        ..Default::default()
    };
    unsafe { GetCursorInfo(&mut info) }.context("GetCursorInfo failed")?;
    if info.flags.0 & CURSOR_SHOWING.0 == 0 {
        return Ok(None);
    }

    let icon = OwnedIcon(unsafe { CopyIcon(info.hCursor) }.context("CopyIcon failed")?);
    let mut icon_info = ICONINFO::default();
    unsafe { GetIconInfo(icon.0, &mut icon_info) }.context("GetIconInfo failed")?;
    let bitmaps = IconBitmaps {
        color: icon_info.hbmColor,
        mask: icon_info.hbmMask,
    };

    let image = decode_icon(&bitmaps)?;
    Ok(Some(CursorSnapshot {
        screen_pos: info.ptScreenPos.into(),
        hotspot: Point::new(icon_info.xHotspot as i32, icon_info.yHotspot as i32),
        image,
    }))
}

fn decode_icon(bitmaps: &IconBitmaps) -> anyhow::Result<RgbaImage> {
    let screen = ScreenDc::acquire().context("no screen DC for cursor decode")?;
    if bitmaps.color.is_invalid() {
        decode_monochrome(screen.handle(), bitmaps.mask)
    } else {
        decode_color(screen.handle(), bitmaps)
    }
}

fn decode_color(dc: HDC, bitmaps: &IconBitmaps) -> anyhow::Result<RgbaImage> {
    let (w, h) = bitmap_size(bitmaps.color)?;
    let color = read_bitmap_bgra(dc, bitmaps.color, w, h)?;
    let mask = read_bitmap_bgra(dc, bitmaps.mask, w, h)?;

    // Old-style color cursors carry no alpha channel; derive opacity from
    // the AND mask instead (black = opaque).
    let has_alpha = color.chunks_exact(4).any(|px| px[3] != 0);
    let mut image = RgbaImage::new(w, h);
    for (i, dst) in image.chunks_exact_mut(4).enumerate() {
        let src = &color[i * 4..i * 4 + 4];
        dst[0] = src[2];
        dst[1] = src[1];
        dst[2] = src[0];
        dst[3] = if has_alpha {
            src[3]
        } else if mask[i * 4] == 0 {
            255
        } else {
            0
        };
    }
    Ok(image)
}

/// Monochrome cursors pack the AND mask in the top half of `hbmMask` and
/// the XOR mask in the bottom half. Inverting (XOR) pixels are rendered
/// white so they stay visible on typical content.
fn decode_monochrome(dc: HDC, mask: HBITMAP) -> anyhow::Result<RgbaImage> {
    let (w, full_h) = bitmap_size(mask)?;
    let h = full_h / 2;
    ensure!(h > 0, "cursor mask bitmap has zero height");
    let bits = read_bitmap_bgra(dc, mask, w, full_h)?;

    let mut image = RgbaImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let and = bits[((y * w + x) * 4) as usize];
            let xor = bits[(((y + h) * w + x) * 4) as usize];
            let px = image.get_pixel_mut(x, y);
            if and == 0 {
                let v = if xor != 0 { 255 } else { 0 };
                px.0 = [v, v, v, 255];
            } else if xor != 0 {
                px.0 = [255, 255, 255, 255];
            }
        }
    }
    Ok(image)
}

fn bitmap_size(bitmap: HBITMAP) -> anyhow::Result<(u32, u32)> {
    let mut bmp = BITMAP::default();
    let got = unsafe {
        GetObjectW(
            bitmap,
            size_of::<BITMAP>() as i32,
            Some(&mut bmp as *mut _ as *mut c_void),
        )
    };
    ensure!(got != 0, "GetObjectW failed for cursor bitmap");
    ensure!(
        bmp.bmWidth > 0 && bmp.bmHeight > 0,
        "cursor bitmap has zero dimensions"
    );
    Ok((bmp.bmWidth as u32, bmp.bmHeight as u32))
}

fn read_bitmap_bgra(dc: HDC, bitmap: HBITMAP, w: u32, h: u32) -> anyhow::Result<Vec<u8>> {
    let mut info = BITMAPINFO::default();
    info.bmiHeader.biSize = size_of::<BITMAPINFOHEADER>() as u32;
    info.bmiHeader.biWidth = w as i32;
    info.bmiHeader.biHeight = -(h as i32);
    info.bmiHeader.biPlanes = 1;
    info.bmiHeader.biBitCount = 32;
    info.bmiHeader.biCompression = BI_RGB.0;

    let mut buf = vec![0u8; w as usize * h as usize * 4];
    let lines = unsafe {
        GetDIBits(
            dc,
            bitmap,
            0,
            h,
            Some(buf.as_mut_ptr().cast()),
            &mut info,
            DIB_RGB_COLORS,
        )
    };
    ensure!(lines != 0, "GetDIBits failed for cursor bitmap");
    Ok(buf)
}
