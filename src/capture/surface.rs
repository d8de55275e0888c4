//! GDI surface grabber: block-copies a desktop rectangle into an RGBA buffer.
//!
//! All GDI handles are held in guards so they are released on every exit
//! path, including early error returns mid-transfer.

use std::ffi::c_void;
use std::mem::size_of;
use std::ptr::null_mut;

use anyhow::{Context, anyhow};
use image::RgbaImage;
use log::debug;
use windows::Win32::Foundation::{HANDLE, HWND};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BitBlt, CAPTUREBLT, CreateCompatibleDC,
    CreateDIBSection, DIB_RGB_COLORS, DeleteDC, DeleteObject, GdiFlush, GetDC, HBITMAP, HDC,
    HGDIOBJ, ROP_CODE, ReleaseDC, SRCCOPY, SelectObject,
};

use crate::error::{CaptureError, CaptureResult};
use crate::geometry::Rect;

/// The desktop screen DC, released on drop.
pub(super) struct ScreenDc(HDC);

impl ScreenDc {
    pub(super) fn acquire() -> CaptureResult<Self> {
        let dc = unsafe { GetDC(HWND(null_mut())) };
        if dc.0.is_null() {
            return Err(CaptureError::CaptureUnavailable(anyhow!(
                "GetDC(NULL) returned null"
            )));
        }
        Ok(Self(dc))
    }

    pub(super) fn handle(&self) -> HDC {
        self.0
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(HWND(null_mut()), self.0);
        }
    }
}

/// A memory DC compatible with the screen DC, deleted on drop.
struct MemDc(HDC);

impl MemDc {
    fn create(screen: &ScreenDc) -> CaptureResult<Self> {
        let dc = unsafe { CreateCompatibleDC(screen.handle()) };
        if dc.0.is_null() {
            return Err(CaptureError::CaptureUnavailable(anyhow!(
                "CreateCompatibleDC failed"
            )));
        }
        Ok(Self(dc))
    }
}

impl Drop for MemDc {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteDC(self.0);
        }
    }
}

/// A 32bpp top-down DIB section selected into a memory DC. Restores the
/// previously selected bitmap and deletes the DIB on drop.
struct DibSelection {
    dc: HDC,
    bitmap: HBITMAP,
    previous: HGDIOBJ,
    bits: *mut u8,
}

impl DibSelection {
    fn create(dc: HDC, width: i32, height: i32) -> CaptureResult<Self> {
        let mut info = BITMAPINFO::default();
        info.bmiHeader.biSize = size_of::<BITMAPINFOHEADER>() as u32;
        info.bmiHeader.biWidth = width;
        // Negative height selects top-down row order.
        info.bmiHeader.biHeight = -height;
        info.bmiHeader.biPlanes = 1;
        info.bmiHeader.biBitCount = 32;
        info.bmiHeader.biCompression = BI_RGB.0;

        let mut bits: *mut c_void = null_mut();
        let bitmap = unsafe {
            CreateDIBSection(dc, &info, DIB_RGB_COLORS, &mut bits, HANDLE::default(), 0)
        }
        .context("CreateDIBSection failed")
        .map_err(CaptureError::CaptureUnavailable)?;
        if bits.is_null() {
            unsafe {
                let _ = DeleteObject(bitmap);
            }
            return Err(CaptureError::CaptureUnavailable(anyhow!(
                "CreateDIBSection returned a null pixel buffer"
            )));
        }

        let previous = unsafe { SelectObject(dc, bitmap) };
        if previous.0.is_null() {
            unsafe {
                let _ = DeleteObject(bitmap);
            }
            return Err(CaptureError::CaptureUnavailable(anyhow!(
                "SelectObject failed for capture bitmap"
            )));
        }

        Ok(Self {
            dc,
            bitmap,
            previous,
            bits: bits.cast(),
        })
    }
}

impl Drop for DibSelection {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.dc, self.previous);
            let _ = DeleteObject(self.bitmap);
        }
    }
}

/// Copies `rect` from the live display into a freshly allocated buffer.
///
/// `include_obscured` adds CAPTUREBLT to the raster operation so layered
/// and obscured content is transferred instead of only the visible
/// composited surface. A zero-area rect yields a zero-size buffer without
/// touching the display. The source display is never mutated.
pub(crate) fn grab(rect: Rect, include_obscured: bool) -> CaptureResult<RgbaImage> {
    let width = rect.width();
    let height = rect.height();
    if width == 0 || height == 0 {
        return Ok(RgbaImage::new(width, height));
    }
    debug!(
        "grabbing {}x{} at ({}, {})",
        width, height, rect.left, rect.top
    );

    let screen = ScreenDc::acquire()?;
    let mem = MemDc::create(&screen)?;
    let dib = DibSelection::create(mem.0, width as i32, height as i32)?;

    let mut rop = SRCCOPY;
    if include_obscured {
        rop = ROP_CODE(rop.0 | CAPTUREBLT.0);
    }
    unsafe {
        BitBlt(
            mem.0,
            0,
            0,
            width as i32,
            height as i32,
            screen.handle(),
            rect.left,
            rect.top,
            rop,
        )
        .context("BitBlt failed")
        .map_err(CaptureError::CaptureUnavailable)?;
        // Make sure the blit has landed in the DIB before we read it back.
        let _ = GdiFlush();
    }

    let byte_len = width as usize * height as usize * 4;
    let src = unsafe { std::slice::from_raw_parts(dib.bits.cast_const(), byte_len) };
    let mut image = RgbaImage::new(width, height);
    for (dst, src) in image.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        // BGRA -> RGBA; BitBlt leaves no meaningful alpha, force opaque.
        dst[0] = src[2];
        dst[1] = src[1];
        dst[2] = src[0];
        dst[3] = 255;
    }
    Ok(image)
}
