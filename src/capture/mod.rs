//! Capture entry points.
//!
//! Control flow is fixed: the surface grabber always runs first, the
//! cursor overlay runs next when requested, and window-shape masking runs
//! last and only on the window path. Calls are synchronous and
//! non-reentrant; callers needing concurrent captures must serialize
//! externally.

pub mod cursor;
pub(crate) mod surface;
pub mod window;

use image::{Rgba, RgbaImage};

use crate::error::{CaptureError, CaptureResult};
use crate::geometry::Rect;
use crate::mask;
use crate::options::CaptureOptions;

pub use window::{
    WindowHandle, desktop_window, foreground_window, virtual_screen_rect, window_from_point,
};

/// Captures a rectangular area of the desktop. The buffer is exactly
/// `rect.width() × rect.height()`; a zero-area rect yields a zero-size
/// buffer without error. Ownership of the buffer transfers to the caller.
pub fn capture_area(rect: Rect, options: &CaptureOptions) -> CaptureResult<RgbaImage> {
    let mut capture = surface::grab(rect, options.include_obscured)?;
    if options.include_cursor {
        cursor::overlay(&mut capture, rect.top_left());
    }
    Ok(capture)
}

/// Captures a window's bounding rectangle, then (when `shape_fill` is set)
/// masks everything outside the window's silhouette and crops tightly.
pub fn capture_window(hwnd: WindowHandle, options: &CaptureOptions) -> CaptureResult<RgbaImage> {
    let rect = window::window_rect(hwnd)?;
    let capture = capture_area(rect, options)?;
    match options.shape_fill {
        Some(fill) => mask_to_window_shape(hwnd, capture, Rgba(fill), options.corner_diameter),
        None => Ok(capture),
    }
}

/// Captures the entire virtual screen.
pub fn capture_desktop(options: &CaptureOptions) -> CaptureResult<RgbaImage> {
    capture_area(window::virtual_screen_rect(), options)
}

/// Re-shapes `raw` (a capture of the window's bounding rectangle) to the
/// window's silhouette: the region's complement is painted with `fill`
/// and the result is cropped to the region's bounding box. The raw
/// capture is consumed; a new tightly-sized buffer is returned.
pub fn mask_to_window_shape(
    hwnd: WindowHandle,
    raw: RgbaImage,
    fill: Rgba<u8>,
    corner_diameter: u32,
) -> CaptureResult<RgbaImage> {
    if !window::is_live(hwnd) {
        return Err(CaptureError::WindowUnavailable);
    }
    let region = window::window_region(hwnd, corner_diameter)?;
    Ok(mask::mask_and_crop(&raw, &region, fill))
}
