//! Window geometry, style bits, and native-region queries.
//!
//! Window handles are opaque and not owned by this crate; every operation
//! treats a handle that no longer resolves as a recoverable
//! `WindowUnavailable` failure.

use anyhow::anyhow;
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    CreateRectRgn, DeleteObject, GetRegionData, HRGN, NULLREGION, RGN_ERROR, RGNDATA,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_STYLE, GetDesktopWindow, GetForegroundWindow, GetSystemMetrics, GetWindowLongW,
    GetWindowRect, GetWindowRgn, IsWindow, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN,
    SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN, WS_BORDER, WS_VISIBLE, WindowFromPoint,
};

use crate::error::{CaptureError, CaptureResult};
use crate::geometry::{Point, Rect};
use crate::region::Region;

/// Opaque reference to a live on-screen window.
pub type WindowHandle = HWND;

/// A scratch GDI region, deleted on drop.
struct OwnedRegion(HRGN);

impl OwnedRegion {
    fn empty() -> CaptureResult<Self> {
        let rgn = unsafe { CreateRectRgn(0, 0, 0, 0) };
        if rgn.0.is_null() {
            return Err(CaptureError::CaptureUnavailable(anyhow!(
                "CreateRectRgn failed"
            )));
        }
        Ok(Self(rgn))
    }
}

impl Drop for OwnedRegion {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(self.0);
        }
    }
}

/// True while the handle still resolves to a live window.
pub fn is_live(hwnd: WindowHandle) -> bool {
    unsafe { IsWindow(hwnd) }.as_bool()
}

/// The window's bounding rectangle in desktop coordinates.
pub fn window_rect(hwnd: WindowHandle) -> CaptureResult<Rect> {
    if !is_live(hwnd) {
        return Err(CaptureError::WindowUnavailable);
    }
    let mut rect = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rect) }.map_err(|_| CaptureError::WindowUnavailable)?;
    Ok(rect.into())
}

/// The window's occupied region in window-local coordinates.
///
/// Prefers the OS-reported shape; when the window has none, falls back to
/// a synthesized shape driven by its style bits: bordered visible windows
/// get rounded corners of `corner_diameter`, everything else is the plain
/// bounding rectangle (whose complement is empty).
pub(crate) fn window_region(hwnd: WindowHandle, corner_diameter: u32) -> CaptureResult<Region> {
    let rect = window_rect(hwnd)?;
    let local = Rect::from_xywh(0, 0, rect.width(), rect.height());

    let scratch = OwnedRegion::empty()?;
    let kind = unsafe { GetWindowRgn(hwnd, scratch.0) };
    if kind != RGN_ERROR.0 && kind != NULLREGION.0 {
        return region_from_hrgn(&scratch);
    }

    let style = unsafe { GetWindowLongW(hwnd, GWL_STYLE) } as u32;
    let target = WS_BORDER.0 | WS_VISIBLE.0;
    if style & target == target {
        Ok(Region::rounded_rect(local, corner_diameter))
    } else {
        Ok(Region::rect(local))
    }
}

/// Reads a GDI region's scanline rectangles into a coverage `Region`.
fn region_from_hrgn(rgn: &OwnedRegion) -> CaptureResult<Region> {
    let size = unsafe { GetRegionData(rgn.0, 0, None) };
    if size == 0 {
        return Err(CaptureError::CaptureUnavailable(anyhow!(
            "GetRegionData size query failed"
        )));
    }

    // u32 backing keeps the RGNDATA header and RECT array aligned.
    let mut buf = vec![0u32; (size as usize).div_ceil(4)];
    let written = unsafe { GetRegionData(rgn.0, size, Some(buf.as_mut_ptr().cast())) };
    if written == 0 {
        return Err(CaptureError::CaptureUnavailable(anyhow!(
            "GetRegionData failed"
        )));
    }

    let data = unsafe { &*(buf.as_ptr() as *const RGNDATA) };
    let count = data.rdh.nCount as usize;
    let raw = unsafe { std::slice::from_raw_parts(data.Buffer.as_ptr() as *const RECT, count) };
    let rects: Vec<Rect> = raw.iter().map(|r| Rect::from(*r)).collect();
    Ok(Region::from_rects(&rects))
}

/// The window under the given desktop coordinate, if any.
pub fn window_from_point(p: Point) -> Option<WindowHandle> {
    let hwnd = unsafe { WindowFromPoint(p.into()) };
    (!hwnd.0.is_null()).then_some(hwnd)
}

/// The window the user is currently working in, if any.
pub fn foreground_window() -> Option<WindowHandle> {
    let hwnd = unsafe { GetForegroundWindow() };
    (!hwnd.0.is_null()).then_some(hwnd)
}

/// The root desktop window.
pub fn desktop_window() -> WindowHandle {
    unsafe { GetDesktopWindow() }
}

/// The full virtual-screen bounds spanning all monitors.
pub fn virtual_screen_rect() -> Rect {
    unsafe {
        let x = GetSystemMetrics(SM_XVIRTUALSCREEN);
        let y = GetSystemMetrics(SM_YVIRTUALSCREEN);
        let w = GetSystemMetrics(SM_CXVIRTUALSCREEN).max(0) as u32;
        let h = GetSystemMetrics(SM_CYVIRTUALSCREEN).max(0) as u32;
        Rect::from_xywh(x, y, w, h)
    }
}
