//! cropshot — a screen-region capture engine.
//!
//! Given a rectangular area of the visible display, produces an RGBA pixel
//! buffer of that area, optionally overlaying the live mouse cursor, and
//! optionally re-shaping the result to a target window's actual silhouette
//! (masking everything outside the window's outline with a solid fill,
//! then cropping tightly).
//!
//! Three components compose top-down:
//! - the surface grabber block-copies pixels from the live display
//!   ([`capture::capture_area`]),
//! - the cursor overlay composites the current cursor icon hotspot-aligned
//!   ([`capture::cursor::overlay`]),
//! - the region masker computes a window's occupied region, paints the
//!   complement within its bounds, and crops
//!   ([`capture::mask_to_window_shape`]).
//!
//! Every call runs to completion or fails before returning; there is no
//! cancellation and no timeout. The engine is not safe for concurrent
//! invocation from multiple threads — serialize capture requests
//! externally. The live display and cursor are read-only shared state;
//! all transiently acquired OS handles are released before each call
//! returns, on every exit path.
//!
//! The geometric core (regions, complement, masking, compositing) is
//! platform-independent; the OS capture layer is Windows-only.

pub mod compose;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod options;
pub mod region;

#[cfg(windows)]
pub mod capture;

pub use error::{CaptureError, CaptureResult};
pub use geometry::{Point, Rect};
pub use options::CaptureOptions;
pub use region::Region;

#[cfg(windows)]
pub use capture::{
    WindowHandle, capture_area, capture_desktop, capture_window, mask_to_window_shape,
};
