//! Window-silhouette regions as 8-bit coverage rasters.
//!
//! A `Region` is the set of pixels a window occupies: either the true
//! OS-reported shape (a list of scanline rectangles) or a synthesized
//! rounded rectangle. Coverage is 255 inside the shape, 0 outside, and
//! intermediate along anti-aliased synthesized edges.

use crate::geometry::{Point, Rect};

/// An arbitrary (possibly non-rectangular) pixel shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    bounds: Rect,
    coverage: Vec<u8>,
}

impl Region {
    /// A fully-covered rectangular region.
    pub fn rect(bounds: Rect) -> Self {
        let len = bounds.width() as usize * bounds.height() as usize;
        Self {
            bounds,
            coverage: vec![255; len],
        }
    }

    /// A rounded rectangle over `bounds`. `corner_diameter` is the ellipse
    /// size in the GDI `CreateRoundRectRgn` sense; 0 degenerates to a plain
    /// rectangle. Corner arcs are anti-aliased.
    pub fn rounded_rect(bounds: Rect, corner_diameter: u32) -> Self {
        let w = bounds.width();
        let h = bounds.height();
        if corner_diameter == 0 || w == 0 || h == 0 {
            return Self::rect(bounds);
        }

        let radius = corner_diameter.min(w).min(h) as f32 / 2.0;
        let (wf, hf) = (w as f32, h as f32);
        let mut coverage = vec![255u8; w as usize * h as usize];

        for y in 0..h {
            let cy = y as f32 + 0.5;
            // Corner arcs only affect the first and last `radius` rows.
            if cy >= radius && cy <= hf - radius {
                continue;
            }
            let center_y = if cy < radius { radius } else { hf - radius };
            for x in 0..w {
                let cx = x as f32 + 0.5;
                if cx >= radius && cx <= wf - radius {
                    continue;
                }
                let center_x = if cx < radius { radius } else { wf - radius };
                let dist = ((cx - center_x).powi(2) + (cy - center_y).powi(2)).sqrt();
                let cov = (radius - dist + 0.5).clamp(0.0, 1.0);
                coverage[(y * w + x) as usize] = (cov * 255.0).round() as u8;
            }
        }

        Self { bounds, coverage }
    }

    /// Assembles a region from scanline rectangles (the shape `RGNDATA`
    /// reports). Bounds are the union of the rectangles.
    pub fn from_rects(rects: &[Rect]) -> Self {
        let mut bounds: Option<Rect> = None;
        for r in rects.iter().filter(|r| !r.is_empty()) {
            bounds = Some(match bounds {
                None => *r,
                Some(b) => Rect {
                    left: b.left.min(r.left),
                    top: b.top.min(r.top),
                    right: b.right.max(r.right),
                    bottom: b.bottom.max(r.bottom),
                },
            });
        }
        let Some(bounds) = bounds else {
            return Self {
                bounds: Rect::default(),
                coverage: Vec::new(),
            };
        };

        let w = bounds.width() as usize;
        let mut coverage = vec![0u8; w * bounds.height() as usize];
        for r in rects.iter().filter(|r| !r.is_empty()) {
            for y in r.top..r.bottom {
                let row = (y - bounds.top) as usize * w;
                let start = row + (r.left - bounds.left) as usize;
                let end = row + (r.right - bounds.left) as usize;
                coverage[start..end].fill(255);
            }
        }
        Self { bounds, coverage }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// True when no pixel has any coverage.
    pub fn is_empty(&self) -> bool {
        self.coverage.iter().all(|&c| c == 0)
    }

    /// Coverage at a desktop-space coordinate; 0 outside the bounds.
    pub fn coverage_at(&self, p: Point) -> u8 {
        if !self.bounds.contains(p) {
            return 0;
        }
        let x = (p.x - self.bounds.left) as usize;
        let y = (p.y - self.bounds.top) as usize;
        self.coverage[y * self.bounds.width() as usize + x]
    }

    /// The tight bounding box of all pixels with non-zero coverage.
    /// Zero-sized for an empty region.
    pub fn bounding_box(&self) -> Rect {
        let w = self.bounds.width() as usize;
        let mut min_x = usize::MAX;
        let mut min_y = usize::MAX;
        let mut max_x = 0usize;
        let mut max_y = 0usize;
        let mut any = false;

        for (i, &c) in self.coverage.iter().enumerate() {
            if c == 0 {
                continue;
            }
            let (x, y) = (i % w, i / w);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            any = true;
        }

        if !any {
            return Rect::from_xywh(self.bounds.left, self.bounds.top, 0, 0);
        }
        Rect::new(
            self.bounds.left + min_x as i32,
            self.bounds.top + min_y as i32,
            self.bounds.left + max_x as i32 + 1,
            self.bounds.top + max_y as i32 + 1,
        )
    }

    /// Geometric subtraction of this region from `bounds`: the area inside
    /// the rectangle but outside the shape. Pixels partially covered by the
    /// shape are partially covered by the complement.
    pub fn complement(&self, bounds: Rect) -> Region {
        let w = bounds.width();
        let h = bounds.height();
        let mut coverage = vec![0u8; w as usize * h as usize];
        for y in 0..h {
            for x in 0..w {
                let p = Point::new(bounds.left + x as i32, bounds.top + y as i32);
                coverage[(y * w + x) as usize] = 255 - self.coverage_at(p);
            }
        }
        Region { bounds, coverage }
    }
}
