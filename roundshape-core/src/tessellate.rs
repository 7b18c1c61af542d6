/// Rounded-polygon tessellation
///
/// Turns anchors, per-anchor fillet radii and per-anchor smoothness into a
/// closed outline and a fan triangulation of its interior. The function is
/// pure: identical inputs give bit-identical output.
///
/// The fan from vertex 0 is only correct when the filleted outline is
/// star-shaped from that vertex (convex and mildly concave shapes).
/// Other outlines still tessellate but may produce overlapping triangles;
/// [`fan_is_consistent`] reports that case.

use std::f32::consts::{PI, TAU};

use log::{debug, trace};
use nalgebra::{Point2, Vector2};

use crate::error::InvalidInputError;
use crate::geometry::{Bounds, OutlineVertex, TessellationResult};

/// Edges shorter than this are treated as zero length
const EDGE_EPSILON: f32 = 1e-6;

/// Interior angles within this many radians of 0 or PI are not filleted
const ANGLE_EPSILON: f32 = 1e-4;

/// Most outline vertices reserved up front; larger outlines grow on demand
const MAX_RESERVED_VERTICES: usize = 1 << 16;

/// Tessellate a polygon with rounded corners.
///
/// `radii[i]` and `smoothness[i]` apply to `anchors[i]`. A corner with a
/// non-positive or non-finite radius or a smoothness of at most 1 stays
/// sharp; otherwise it
/// is replaced by `smoothness[i]` vertices along a circular arc.
pub fn tessellate(
    anchors: &[Point2<f32>],
    radii: &[f32],
    smoothness: &[u32],
) -> Result<TessellationResult, InvalidInputError> {
    validate_input(anchors.len(), radii.len(), smoothness.len())?;

    let n = anchors.len();
    let mut positions = Vec::with_capacity(vertex_budget(radii, smoothness));

    for i in 0..n {
        let prev = anchors[(i + n - 1) % n];
        let corner = anchors[i];
        let next = anchors[(i + 1) % n];

        if smoothness[i] <= 1 {
            positions.push(corner);
            continue;
        }

        match Fillet::fit(prev, corner, next, radii[i]) {
            Some(fillet) => fillet.sample(smoothness[i], &mut positions),
            None => positions.push(corner),
        }
    }

    let bounds = Bounds::from_points(&positions);
    let mut result = TessellationResult::with_capacity(positions.len());
    for p in &positions {
        let uv = match &bounds {
            Some(b) => b.normalize(p),
            None => Point2::new(0.5, 0.5),
        };
        result.vertices.push(OutlineVertex { position: *p, uv });
    }
    result.triangles = fan_triangles(result.vertices.len());

    if !fan_is_consistent(&result) {
        debug!(
            "fan triangulation of {} vertices overlaps itself; outline is not star-shaped from vertex 0",
            result.vertices.len()
        );
    }

    Ok(result)
}

fn validate_input(anchors: usize, radii: usize, smoothness: usize) -> Result<(), InvalidInputError> {
    if anchors < 3 {
        return Err(InvalidInputError::TooFewAnchors { count: anchors });
    }
    if radii != anchors || smoothness != anchors {
        return Err(InvalidInputError::LengthMismatch {
            anchors,
            radii,
            smoothness,
        });
    }
    Ok(())
}

/// Upper bound on the number of outline vertices, capped at [`MAX_RESERVED_VERTICES`]
fn vertex_budget(radii: &[f32], smoothness: &[u32]) -> usize {
    radii
        .iter()
        .zip(smoothness)
        .map(|(&r, &s)| if r > 0.0 && r.is_finite() && s > 1 { s as usize } else { 1 })
        .fold(0usize, usize::saturating_add)
        .min(MAX_RESERVED_VERTICES)
}

/// Triangle fan from vertex 0: `(0, k + 1, k + 2)`
pub fn fan_triangles(vertex_count: usize) -> Vec<[u32; 3]> {
    (0..vertex_count.saturating_sub(2))
        .map(|k| [0, k as u32 + 1, k as u32 + 2])
        .collect()
}

/// True when no fan triangle is wound against the outline.
///
/// Degenerate (zero-area) triangles are ignored.
pub fn fan_is_consistent(result: &TessellationResult) -> bool {
    let orientation = result.signed_area().signum();
    result.triangles.iter().all(|[a, b, c]| {
        let p0 = result.vertices[*a as usize].position;
        let p1 = result.vertices[*b as usize].position;
        let p2 = result.vertices[*c as usize].position;
        let cross = (p1 - p0).perp(&(p2 - p0));
        cross.abs() <= EDGE_EPSILON || cross.signum() == orientation
    })
}

/// Circular arc replacing one corner
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fillet {
    center: Point2<f32>,
    radius: f32,
    start: Point2<f32>,
    end: Point2<f32>,
    start_angle: f32,
    sweep: f32,
}

impl Fillet {
    /// Fit an arc tangent to both edges meeting at `corner`.
    ///
    /// Returns `None` when the corner has to stay sharp: no usable radius
    /// (non-positive, NaN or infinite), a zero-length edge, or neighbours
    /// that are collinear with the corner.
    fn fit(prev: Point2<f32>, corner: Point2<f32>, next: Point2<f32>, radius: f32) -> Option<Self> {
        if !(radius > 0.0) || !radius.is_finite() {
            return None;
        }

        let to_prev = prev - corner;
        let to_next = next - corner;
        let len_prev = to_prev.norm();
        let len_next = to_next.norm();
        if len_prev <= EDGE_EPSILON || len_next <= EDGE_EPSILON {
            trace!("corner at ({}, {}) has a zero-length edge, kept sharp", corner.x, corner.y);
            return None;
        }

        let dir_prev = to_prev / len_prev;
        let dir_next = to_next / len_next;
        let angle = dir_prev.dot(&dir_next).clamp(-1.0, 1.0).acos();
        if angle <= ANGLE_EPSILON || angle >= PI - ANGLE_EPSILON {
            trace!("corner at ({}, {}) is degenerate ({} rad), kept sharp", corner.x, corner.y, angle);
            return None;
        }

        let half_angle = angle * 0.5;
        let half_edge = len_prev.min(len_next) * 0.5;

        let mut radius = radius.min(half_edge);
        let mut tangent_distance = radius / half_angle.tan();
        if tangent_distance > half_edge {
            tangent_distance = half_edge;
            radius = half_edge * half_angle.tan();
        }

        let bisector: Vector2<f32> = (dir_prev + dir_next).normalize();
        let center = corner + bisector * (radius / half_angle.sin());
        let start = corner + dir_prev * tangent_distance;
        let end = corner + dir_next * tangent_distance;

        let start_angle = angle_of(start - center);
        let sweep = wrap_angle(angle_of(end - center) - start_angle);

        Some(Self {
            center,
            radius,
            start,
            end,
            start_angle,
            sweep,
        })
    }

    /// Push `count` arc vertices, both tangent points included
    fn sample(&self, count: u32, out: &mut Vec<Point2<f32>>) {
        let steps = (count - 1) as f32;
        out.push(self.start);
        for k in 1..count - 1 {
            let theta = self.start_angle + self.sweep * (k as f32 / steps);
            out.push(self.center + Vector2::new(theta.cos(), theta.sin()) * self.radius);
        }
        out.push(self.end);
    }
}

fn angle_of(v: Vector2<f32>) -> f32 {
    v.y.atan2(v.x)
}

/// Wrap an angle difference into `(-PI, PI]`, the short way round
fn wrap_angle(delta: f32) -> f32 {
    if delta > PI {
        delta - TAU
    } else if delta <= -PI {
        delta + TAU
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point2<f32>> {
        vec![
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
            Point2::new(-1.0, -1.0),
        ]
    }

    #[test]
    fn test_sharp_square() {
        let anchors = unit_square();
        let result = tessellate(&anchors, &[0.0; 4], &[1; 4]).unwrap();

        assert_eq!(result.outline(), anchors);
        assert_eq!(result.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_single_rounded_corner() {
        let anchors = unit_square();
        let result = tessellate(&anchors, &[0.5, 0.0, 0.0, 0.0], &[4, 1, 1, 1]).unwrap();

        assert_eq!(result.vertices.len(), 7);
        assert_eq!(result.triangles.len(), 5);
        // Arc runs from the tangent point on the incoming edge to the one on the outgoing edge
        assert!((result.vertices[0].position - Point2::new(0.5, -1.0)).norm() < 1e-5);
        assert!((result.vertices[3].position - Point2::new(1.0, -0.5)).norm() < 1e-5);
        for v in &result.vertices[..4] {
            let d = (v.position - Point2::new(0.5, -0.5)).norm();
            assert!((d - 0.5).abs() < 1e-5);
        }
        assert_eq!(result.vertices[4].position, anchors[1]);
    }

    #[test]
    fn test_too_few_anchors() {
        let anchors = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        let err = tessellate(&anchors, &[0.0; 2], &[1; 2]).unwrap_err();
        assert_eq!(err, InvalidInputError::TooFewAnchors { count: 2 });
    }

    #[test]
    fn test_length_mismatch() {
        let err = tessellate(&unit_square(), &[0.0; 3], &[1; 4]).unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::LengthMismatch {
                anchors: 4,
                radii: 3,
                smoothness: 4
            }
        );
    }

    #[test]
    fn test_duplicate_anchor_stays_sharp() {
        let anchors = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ];
        let result = tessellate(&anchors, &[0.5; 4], &[1, 6, 6, 1]).unwrap();
        // Both copies of the duplicated anchor see a zero-length edge
        assert_eq!(result.vertices.len(), 4);
        assert_eq!(result.vertices[1].position, anchors[1]);
        assert_eq!(result.vertices[2].position, anchors[2]);
    }

    #[test]
    fn test_collinear_anchor_stays_sharp() {
        let anchors = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 2.0),
        ];
        let result = tessellate(&anchors, &[0.0, 0.3, 0.0, 0.0], &[1, 8, 1, 1]).unwrap();
        assert_eq!(result.vertices.len(), 4);
        assert_eq!(result.vertices[1].position, anchors[1]);
    }

    #[test]
    fn test_spike_stays_sharp() {
        let anchors = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 1e-7),
            Point2::new(-1.0, 1.0),
        ];
        let result = tessellate(&anchors, &[0.0, 0.5, 0.0, 0.0], &[1, 8, 1, 1]).unwrap();
        assert_eq!(result.vertices.len(), 4);
        assert_eq!(result.vertices[1].position, Point2::new(4.0, 0.0));
    }

    #[test]
    fn test_nan_radius_stays_sharp() {
        let anchors = unit_square();
        let result = tessellate(&anchors, &[f32::NAN, 0.0, 0.0, 0.0], &[5, 1, 1, 1]).unwrap();
        assert_eq!(result.outline(), anchors);
    }

    #[test]
    fn test_infinite_radius_stays_sharp() {
        let anchors = unit_square();
        for radius in [f32::INFINITY, f32::NEG_INFINITY] {
            let result = tessellate(&anchors, &[radius, 0.0, 0.0, 0.0], &[5, 1, 1, 1]).unwrap();
            assert_eq!(result.outline(), anchors);
        }
    }

    #[test]
    fn test_huge_smoothness_on_sharp_corner() {
        let anchors = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 2.0),
        ];
        let result = tessellate(&anchors, &[0.0, 0.3, 0.0, f32::INFINITY], &[1, u32::MAX, 1, u32::MAX]).unwrap();
        assert_eq!(result.vertices.len(), 4);
        assert_eq!(vertex_budget(&[1.0; 3], &[u32::MAX; 3]), MAX_RESERVED_VERTICES);
    }

    #[test]
    fn test_radius_clamped_to_half_edge() {
        let anchors = unit_square();
        let result = tessellate(&anchors, &[100.0, 0.0, 0.0, 0.0], &[5, 1, 1, 1]).unwrap();
        let corner = anchors[0];
        let first = result.vertices[0].position;
        let last = result.vertices[4].position;
        assert!((first - corner).norm() <= 1.0 + 1e-5);
        assert!((last - corner).norm() <= 1.0 + 1e-5);
    }

    #[test]
    fn test_clockwise_arc_bulges_inward() {
        let mut anchors = unit_square();
        anchors.reverse();
        let result = tessellate(&anchors, &[0.5; 4], &[6; 4]).unwrap();
        assert_eq!(result.vertices.len(), 24);
        assert!(result.signed_area() < 0.0);
        for v in &result.vertices {
            assert!(v.position.x.abs() <= 1.0 + 1e-5);
            assert!(v.position.y.abs() <= 1.0 + 1e-5);
        }
        assert!(fan_is_consistent(&result));
    }

    #[test]
    fn test_fan_triangles() {
        assert!(fan_triangles(2).is_empty());
        assert_eq!(fan_triangles(3), vec![[0, 1, 2]]);
        assert_eq!(fan_triangles(5).len(), 3);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(1.5 * PI) + 0.5 * PI).abs() < 1e-6);
        assert!((wrap_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-6);
        assert_eq!(wrap_angle(0.25), 0.25);
    }
}
