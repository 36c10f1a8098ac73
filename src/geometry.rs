//! Symmetry geometry: rotation about the center and the containment wedge.
//!
//! The wedge is the triangle spanned by three lines:
//!
//! - **A**: through the origin and the center
//! - **B**: through the center and the reference point
//! - **C**: through the origin and the reference point
//!
//! where the reference point is the surface origin rotated once by the
//! rotation step about the center. Which of A/B bounds the wedge from above
//! depends on which side of the center the reference point lands on; that
//! choice is made once in [`WedgeBounds::new`] and stored as a [`WedgeLayout`].

use glam::Vec2;
use std::f32::consts::TAU;

/// Rotate `point` about `center` by `angle` radians.
#[inline]
pub fn rotate(point: Vec2, center: Vec2, angle: f32) -> Vec2 {
    center + Vec2::from_angle(angle).rotate(point - center)
}

/// Rotational symmetry derived from the surface size and corner count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetryConfig {
    /// Rotation center (middle of the surface).
    pub center: Vec2,
    /// Angle between successive symmetry positions, `TAU / corner_count`.
    pub rotation_step: f32,
    /// Rotational symmetry order.
    pub corner_count: u32,
}

impl SymmetryConfig {
    /// Derive the symmetry for a `width` x `height` surface.
    ///
    /// `corner_count` must be non-zero; callers validate this first.
    pub fn new(width: f32, height: f32, corner_count: u32) -> Self {
        Self {
            center: Vec2::new(width / 2.0, height / 2.0),
            rotation_step: TAU / corner_count as f32,
            corner_count,
        }
    }

    /// The surface origin rotated once by the step about the center.
    pub fn reference_point(&self) -> Vec2 {
        rotate(Vec2::ZERO, self.center, self.rotation_step)
    }

    /// Angles of every symmetry position: `0, step, 2*step, ...`.
    pub fn angles(&self) -> impl Iterator<Item = f32> {
        let step = self.rotation_step;
        (0..self.corner_count).map(move |i| step * i as f32)
    }

    /// Containment wedge for this symmetry.
    pub fn wedge(&self) -> WedgeBounds {
        WedgeBounds::new(self)
    }
}

/// A non-vertical line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f32,
    pub intercept: f32,
}

impl Line {
    /// Line through two points. Returns `None` when the points share an x.
    pub fn through(p: Vec2, q: Vec2) -> Option<Self> {
        let dx = q.x - p.x;
        if dx.abs() <= f32::EPSILON * p.x.abs().max(q.x.abs()).max(1.0) * 16.0 {
            return None;
        }
        let slope = (q.y - p.y) / dx;
        Some(Self {
            slope,
            intercept: p.y - slope * p.x,
        })
    }

    #[inline]
    pub fn at(&self, x: f32) -> f32 {
        self.slope * x + self.intercept
    }
}

/// Which side of the center the reference point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WedgeLayout {
    /// Reference x > center x: upper bound is `min(A, B)`, lower bound is `C`.
    RotatedRight,
    /// Otherwise: upper bound is `A`, lower bound is `max(B, C)`.
    RotatedLeft,
}

/// The region a particle may occupy, resolved once from a [`SymmetryConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeBounds {
    /// Slope of line A (origin to center).
    pub slope_a: f32,
    /// Slope of line B (center to reference point).
    pub slope_b: f32,
    /// Intercept of line B.
    pub intercept_b: f32,
    /// Slope of line C (origin to reference point).
    pub slope_c: f32,
    layout: WedgeLayout,
    // B is vertical at x = center.x and puts no bound on the x < center.x half.
    b_vertical: bool,
    center_x: f32,
}

impl WedgeBounds {
    pub fn new(symmetry: &SymmetryConfig) -> Self {
        let center = symmetry.center;
        let p = symmetry.reference_point();

        let slope_a = center.y / center.x;
        let slope_c = p.y / p.x;
        let b = Line::through(center, p);

        let layout = if p.x > center.x {
            WedgeLayout::RotatedRight
        } else {
            WedgeLayout::RotatedLeft
        };

        let (slope_b, intercept_b) = match b {
            Some(line) => (line.slope, line.intercept),
            None => (f32::INFINITY, f32::NAN),
        };

        log::debug!(
            "wedge: corner={} reference=({:.3}, {:.3}) layout={:?} a={:.4} b={:.4}/{:.4} c={:.4}",
            symmetry.corner_count,
            p.x,
            p.y,
            layout,
            slope_a,
            slope_b,
            intercept_b,
            slope_c
        );

        Self {
            slope_a,
            slope_b,
            intercept_b,
            slope_c,
            layout,
            b_vertical: b.is_none(),
            center_x: center.x,
        }
    }

    pub fn layout(&self) -> WedgeLayout {
        self.layout
    }

    /// Horizontal extent spawn positions are drawn from: `[0, center.x)`.
    pub fn spawn_width(&self) -> f32 {
        self.center_x
    }

    #[inline]
    fn line_b(&self, x: f32) -> Option<f32> {
        (!self.b_vertical).then(|| self.slope_b * x + self.intercept_b)
    }

    /// Lower and upper y bound of the wedge at `x`.
    #[inline]
    pub fn y_range(&self, x: f32) -> (f32, f32) {
        let a = self.slope_a * x;
        let c = self.slope_c * x;
        match (self.layout, self.line_b(x)) {
            (WedgeLayout::RotatedRight, Some(b)) => (c, a.min(b)),
            (WedgeLayout::RotatedLeft, Some(b)) => (b.max(c), a),
            (_, None) => (c, a),
        }
    }

    /// Strict containment test; points on a boundary line are outside.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = self.y_range(point.x);
        min < point.y && point.y < max
    }

    /// Whether any x across the spawn range leaves room between the bounds.
    pub fn has_area(&self) -> bool {
        const SAMPLES: u32 = 64;
        (1..SAMPLES).any(|i| {
            let x = self.center_x * i as f32 / SAMPLES as f32;
            let (min, max) = self.y_range(x);
            max - min > 1e-3
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-2
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let p = rotate(Vec2::ZERO, Vec2::new(50.0, 50.0), FRAC_PI_2);
        assert!(approx(p, Vec2::new(100.0, 0.0)), "got {:?}", p);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let p = Vec2::new(12.0, 34.0);
        assert!(approx(rotate(p, Vec2::new(250.0, 250.0), 0.0), p));
    }

    #[test]
    fn test_rotation_closure() {
        for corner in 3..=12 {
            let sym = SymmetryConfig::new(500.0, 400.0, corner);
            let start = Vec2::new(37.0, 81.0);
            let mut p = start;
            for _ in 0..corner {
                p = rotate(p, sym.center, sym.rotation_step);
            }
            assert!(approx(p, start), "corner {} drifted to {:?}", corner, p);
        }
    }

    #[test]
    fn test_symmetry_derivation() {
        let sym = SymmetryConfig::new(500.0, 300.0, 6);
        assert_eq!(sym.center, Vec2::new(250.0, 150.0));
        assert!((sym.rotation_step - TAU / 6.0).abs() < 1e-6);
        assert_eq!(sym.angles().count(), 6);
        assert_eq!(sym.angles().next(), Some(0.0));
    }

    #[test]
    fn test_wedge_corner_four() {
        let wedge = SymmetryConfig::new(100.0, 100.0, 4).wedge();
        assert_eq!(wedge.layout(), WedgeLayout::RotatedRight);
        assert!((wedge.slope_a - 1.0).abs() < 1e-4);
        assert!((wedge.slope_b + 1.0).abs() < 1e-3);
        assert!((wedge.intercept_b - 100.0).abs() < 1e-2);
        assert!(wedge.slope_c.abs() < 1e-4);

        let (min, max) = wedge.y_range(20.0);
        assert!(min.abs() < 1e-2);
        assert!((max - 20.0).abs() < 1e-2);
    }

    #[test]
    fn test_wedge_left_layout() {
        // 30 degree step puts the reference point left of center.
        let wedge = SymmetryConfig::new(500.0, 500.0, 12).wedge();
        assert_eq!(wedge.layout(), WedgeLayout::RotatedLeft);
        assert!(wedge.has_area());
        assert!(wedge.contains(Vec2::new(200.0, 100.0)));
        assert!(!wedge.contains(Vec2::new(200.0, 50.0)));
        assert!(!wedge.contains(Vec2::new(200.0, 250.0)));
    }

    #[test]
    fn test_wedge_vertical_b_line() {
        // 45 degree step on a square lands the reference point on x = center.x.
        let wedge = SymmetryConfig::new(500.0, 500.0, 8).wedge();
        assert!(wedge.has_area());
        let (min, max) = wedge.y_range(100.0);
        assert!(min < max);
        assert!(wedge.contains(Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_contains_is_strict() {
        let wedge = SymmetryConfig::new(100.0, 100.0, 4).wedge();
        let (min, max) = wedge.y_range(30.0);
        assert!(!wedge.contains(Vec2::new(30.0, min)));
        assert!(!wedge.contains(Vec2::new(30.0, max)));
        assert!(wedge.contains(Vec2::new(30.0, (min + max) / 2.0)));
    }

    #[test]
    fn test_wedge_has_area_for_valid_corners() {
        for corner in 3..=24 {
            for (w, h) in [(500.0, 500.0), (800.0, 450.0), (300.0, 900.0)] {
                let wedge = SymmetryConfig::new(w, h, corner).wedge();
                assert!(wedge.has_area(), "corner {} on {}x{}", corner, w, h);
            }
        }
    }

    #[test]
    fn test_wedge_degenerate_for_two_corners() {
        let wedge = SymmetryConfig::new(500.0, 500.0, 2).wedge();
        assert!(!wedge.has_area());
    }

    #[test]
    fn test_line_through_vertical() {
        assert!(Line::through(Vec2::new(5.0, 0.0), Vec2::new(5.0, 10.0)).is_none());
        let l = Line::through(Vec2::ZERO, Vec2::new(2.0, 4.0)).unwrap();
        assert_eq!(l.at(3.0), 6.0);
    }
}
