//! Rasterization primitives: line, filled rectangle, filled ellipse, filled
//! triangle.
//!
//! Every primitive takes two candidate indices and a mix fraction and
//! forwards each plotted pixel to the compositor — nothing here writes the
//! buffer directly, so color-table policy applies to shapes exactly as it
//! does to single pixels.
//!
//! Shared-pixel plots are deliberate: the ellipse mirrors onto the same
//! pixel at its axes, and abutting triangles both plot their shared edge.
//! Under the default table repeat writes are idempotent; under a blend
//! table they apply twice. Callers installing non-idempotent tables get the
//! same output the table state implies, repeat plots included.

use crate::vdp::Vdp;

impl Vdp {
    /// 1-pixel Bresenham line from (x0, y0) to (x1, y1), both endpoints
    /// inclusive. Symmetric doubled-error accumulation; both axis steps may
    /// fire in one iteration, producing diagonal connectivity.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, c1: i32, c2: i32, mix: f32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.pset_mix(x, y, c1, c2, mix);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = err * 2;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fill the inclusive axis-aligned box spanned by the two corners,
    /// row-major. Corner order does not matter.
    pub fn rect_fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, c1: i32, c2: i32, mix: f32) {
        let (x0, x1) = if x1 < x0 { (x1, x0) } else { (x0, x1) };
        let (y0, y1) = if y1 < y0 { (y1, y0) } else { (y0, y1) };

        for yy in y0..=y1 {
            for xx in x0..=x1 {
                self.pset_mix(xx, yy, c1, c2, mix);
            }
        }
    }

    /// Fill the ellipse inscribed in the box spanned by the two corners.
    /// Corner order does not matter.
    ///
    /// Center and semi-axes derive from the bounding box and may be
    /// fractional when a span is odd. One quadrant is scanned against the
    /// implicit inequality `b²x² + a²y² - a²b² <= 0`; hits plot all four
    /// mirrored points, so pixels on the axes are plotted more than once
    /// per scan step.
    pub fn ellipse_fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, c1: i32, c2: i32, mix: f32) {
        let (x0, x1) = if x1 < x0 { (x1, x0) } else { (x0, x1) };
        let (y0, y1) = if y1 < y0 { (y1, y0) } else { (y0, y1) };

        let a = f64::from(x1 - x0) / 2.0;
        let b = f64::from(y1 - y0) / 2.0;
        let cx = f64::from(x0) + a;
        let cy = f64::from(y0) + b;
        let a2 = a * a;
        let b2 = b * b;

        for y in 0..=(b as i32) {
            for x in 0..=(a as i32) {
                let (fx, fy) = (f64::from(x), f64::from(y));
                let d = b2 * fx * fx + a2 * fy * fy - a2 * b2;
                if d <= 0.0 {
                    let px = (cx + fx) as i32;
                    let py = (cy + fy) as i32;
                    let nx = (cx - fx) as i32;
                    let ny = (cy - fy) as i32;
                    self.pset_mix(px, py, c1, c2, mix);
                    self.pset_mix(nx, py, c1, c2, mix);
                    self.pset_mix(px, ny, c1, c2, mix);
                    self.pset_mix(nx, ny, c1, c2, mix);
                }
            }
        }
    }

    /// Fill the triangle with vertices `p1`, `p2`, `p3` (either winding).
    ///
    /// The bounding box is clipped to the buffer; a pixel fills when all
    /// three sign-corrected edge functions are >= 0. Every edge is
    /// inclusive, so abutting triangles plot their shared edge twice.
    /// Degenerate (zero-area) triangles plot nothing.
    pub fn tri_fill(
        &mut self,
        p1: (i32, i32),
        p2: (i32, i32),
        p3: (i32, i32),
        c1: i32,
        c2: i32,
        mix: f32,
    ) {
        let (x0, y0) = p1;
        let (x1, y1) = p2;
        let (x2, y2) = p3;

        let min_x = x0.min(x1).min(x2).max(0);
        let max_x = x0.max(x1).max(x2).min(self.width() as i32 - 1);
        let min_y = y0.min(y1).min(y2).max(0);
        let max_y = y0.max(y1).max(y2).min(self.height() as i32 - 1);

        let area = (x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0);
        if area == 0 {
            return;
        }
        let sign = if area < 0 { -1 } else { 1 };

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let w0 = sign * ((x1 - x0) * (y - y0) - (y1 - y0) * (x - x0));
                let w1 = sign * ((x2 - x1) * (y - y1) - (y2 - y1) * (x - x1));
                let w2 = sign * ((x0 - x2) * (y - y2) - (y0 - y2) * (x - x2));
                if w0 >= 0 && w1 >= 0 && w2 >= 0 {
                    self.pset_mix(x, y, c1, c2, mix);
                }
            }
        }
    }
}
