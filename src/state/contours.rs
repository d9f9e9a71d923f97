use kurbo::Point;

use crate::foundation::math::Fnv1a64;

/// An ordered sequence of vertices forming an open or closed loop.
///
/// A closed loop implicitly connects its last vertex back to its first.
/// Holes are always closed loops; outer boundaries may be either.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VertexLoop {
    /// Loop vertices in drawing order.
    pub points: Vec<Point>,
    /// Whether the loop wraps from its last vertex back to its first.
    pub closed: bool,
}

impl VertexLoop {
    /// Build a closed loop.
    pub fn closed(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    /// Build an open loop.
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the loop has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Geometric center of the loop.
    ///
    /// Closed loops use the signed-area formula; open or degenerate loops
    /// fall back to the vertex mean.
    pub fn centroid(&self) -> Point {
        if self.points.is_empty() {
            return Point::ORIGIN;
        }

        let mean = || {
            let n = self.points.len() as f64;
            let (sx, sy) = self
                .points
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            Point::new(sx / n, sy / n)
        };

        if !self.closed || self.points.len() < 3 {
            return mean();
        }

        let n = self.points.len();
        let mut area = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let cross = a.x * b.y - b.x * a.y;
            area += cross;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        if area.abs() < 1e-10 {
            return mean();
        }
        area *= 0.5;
        Point::new(cx / (6.0 * area), cy / (6.0 * area))
    }

    /// Copy of this loop rotated about the origin by `degrees`.
    pub fn rotated(&self, degrees: f64) -> Self {
        if degrees == 0.0 {
            return self.clone();
        }
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        Self {
            points: self
                .points
                .iter()
                .map(|p| Point::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos))
                .collect(),
            closed: self.closed,
        }
    }

    /// Copy of this loop with its start index shifted by `offset` vertices.
    pub fn with_start_offset(&self, offset: usize) -> Self {
        if self.points.is_empty() {
            return self.clone();
        }
        let offset = offset % self.points.len();
        if offset == 0 {
            return self.clone();
        }
        let mut points = Vec::with_capacity(self.points.len());
        points.extend_from_slice(&self.points[offset..]);
        points.extend_from_slice(&self.points[..offset]);
        Self {
            points,
            closed: self.closed,
        }
    }

    /// Copy of this loop with vertex order reversed.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            closed: self.closed,
        }
    }

    /// Zero-sized closed loop with every vertex at this loop's centroid.
    ///
    /// Used as the degenerate end of grow-from-nothing / shrink-to-nothing
    /// hole transitions.
    pub fn zero_at_centroid(&self) -> Self {
        let c = self.centroid();
        Self {
            points: vec![c; self.points.len().max(1)],
            closed: true,
        }
    }

    /// Resample the loop to exactly `count` vertices by linear
    /// interpolation along its perimeter.
    ///
    /// Closed loops distribute samples over the full perimeter including
    /// the implicit closing edge; open loops keep both endpoints exact.
    /// Loops with fewer than 2 distinct vertices repeat their first vertex.
    pub fn resample(&self, count: usize) -> Self {
        if count == 0 {
            return Self {
                points: Vec::new(),
                closed: self.closed,
            };
        }
        if self.points.len() < 2 || count == 1 {
            let p = self.points.first().copied().unwrap_or(Point::ORIGIN);
            return Self {
                points: vec![p; count],
                closed: self.closed,
            };
        }

        let segs = self.segments();
        let total: f64 = segs.iter().map(|(_, _, len)| len).sum();
        if total <= 0.0 {
            return Self {
                points: vec![self.points[0]; count],
                closed: self.closed,
            };
        }

        let step = if self.closed {
            total / count as f64
        } else {
            total / (count - 1) as f64
        };

        let mut out = Vec::with_capacity(count);
        let mut seg_idx = 0;
        let mut seg_start_dist = 0.0;
        for i in 0..count {
            let target = (i as f64 * step).min(total);
            while seg_idx + 1 < segs.len() && seg_start_dist + segs[seg_idx].2 < target {
                seg_start_dist += segs[seg_idx].2;
                seg_idx += 1;
            }
            let (a, b, len) = segs[seg_idx];
            let local = if len > 0.0 {
                ((target - seg_start_dist) / len).clamp(0.0, 1.0)
            } else {
                0.0
            };
            out.push(Point::new(
                a.x + (b.x - a.x) * local,
                a.y + (b.y - a.y) * local,
            ));
        }

        Self {
            points: out,
            closed: self.closed,
        }
    }

    fn segments(&self) -> Vec<(Point, Point, f64)> {
        let n = self.points.len();
        let seg_count = if self.closed { n } else { n - 1 };
        (0..seg_count)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                (a, b, a.distance(b))
            })
            .collect()
    }

    pub(crate) fn hash_into(&self, h: &mut Fnv1a64) {
        h.write_u8(u8::from(self.closed));
        h.write_u64(self.points.len() as u64);
        for p in &self.points {
            h.write_f64(p.x);
            h.write_f64(p.y);
        }
    }
}

/// An outer boundary loop plus zero or more interior hole loops.
///
/// Holes are anonymous; they are distinguished only by geometry and their
/// position in the list carries no meaning beyond pairing order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContourSet {
    /// Outer boundary.
    pub outer: VertexLoop,
    /// Interior holes, all closed.
    pub holes: Vec<VertexLoop>,
}

impl ContourSet {
    /// Build a contour set from an outer boundary and holes.
    pub fn new(outer: VertexLoop, holes: Vec<VertexLoop>) -> Self {
        Self { outer, holes }
    }

    /// Contour set with just an outer boundary.
    pub fn solid(outer: VertexLoop) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    pub(crate) fn hash_into(&self, h: &mut Fnv1a64) {
        self.outer.hash_into(h);
        h.write_u64(self.holes.len() as u64);
        for hole in &self.holes {
            hole.hash_into(h);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/contours.rs"]
mod tests;
