/// Geometry primitives for rounded 2D shapes
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::tessellate::tessellate;

/// A user-specified polygon vertex before corner rounding
pub type Anchor = Point2<f32>;

/// Rounding applied at a single anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerSpec {
    /// Fillet radius in shape units. Clamped to what the adjacent edges allow.
    pub radius: f32,
    /// Number of outline vertices used for the arc.
    pub smoothness: u32,
}

impl CornerSpec {
    pub fn new(radius: f32, smoothness: u32) -> Self {
        Self { radius, smoothness }
    }

    pub fn sharp() -> Self {
        Self {
            radius: 0.0,
            smoothness: 1,
        }
    }

    /// True when this corner produces a single vertex at the anchor
    pub fn is_sharp(&self) -> bool {
        !(self.radius > 0.0) || !self.radius.is_finite() || self.smoothness <= 1
    }
}

impl Default for CornerSpec {
    fn default() -> Self {
        Self::sharp()
    }
}

/// A boundary point of the tessellated outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineVertex {
    pub position: Point2<f32>,
    pub uv: Point2<f32>,
}

impl OutlineVertex {
    pub fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            uv: Point2::new(u, v),
        }
    }
}

/// Axis-aligned bounding box in shape units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2<f32>,
    pub max: Point2<f32>,
}

impl Bounds {
    /// Bounding box of a point set, `None` when empty
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2<f32>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Position relative to the box, each axis in `[0, 1]`.
    /// An axis with zero extent maps to 0.5.
    pub fn normalize(&self, p: &Point2<f32>) -> Point2<f32> {
        let w = self.width();
        let h = self.height();
        let u = if w > 0.0 { ((p.x - self.min.x) / w).clamp(0.0, 1.0) } else { 0.5 };
        let v = if h > 0.0 { ((p.y - self.min.y) / h).clamp(0.0, 1.0) } else { 0.5 };
        Point2::new(u, v)
    }
}

/// Output of the tessellator: closed outline plus a fill triangulation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TessellationResult {
    pub vertices: Vec<OutlineVertex>,
    pub triangles: Vec<[u32; 3]>,
}

impl TessellationResult {
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(vertex_count.saturating_sub(2)),
        }
    }

    /// Vertex positions as a closed loop, for stroke rendering
    pub fn outline(&self) -> Vec<Point2<f32>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Interleaved `x, y` positions for a vertex buffer
    pub fn flat_positions(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.position.x, v.position.y])
            .collect()
    }

    /// Interleaved `u, v` coordinates
    pub fn flat_uvs(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| [v.uv.x, v.uv.y]).collect()
    }

    /// Triangle list flattened into an index buffer
    pub fn flat_indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Signed area of the outline (positive for counter-clockwise winding)
    pub fn signed_area(&self) -> f32 {
        let n = self.vertices.len();
        let mut twice_area = 0.0;
        for i in 0..n {
            let a = self.vertices[i].position;
            let b = self.vertices[(i + 1) % n].position;
            twice_area += a.x * b.y - b.x * a.y;
        }
        twice_area * 0.5
    }
}

/// Anchors and per-anchor corners describing one shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShapeSpec {
    pub anchors: Vec<Anchor>,
    pub corners: Vec<CornerSpec>,
}

impl ShapeSpec {
    pub fn new(anchors: Vec<Anchor>, corners: Vec<CornerSpec>) -> Self {
        Self { anchors, corners }
    }

    /// All corners share the same radius and smoothness
    pub fn uniform(anchors: Vec<Anchor>, radius: f32, smoothness: u32) -> Self {
        let corners = vec![CornerSpec::new(radius, smoothness); anchors.len()];
        Self { anchors, corners }
    }

    pub fn radii(&self) -> Vec<f32> {
        self.corners.iter().map(|c| c.radius).collect()
    }

    pub fn smoothness(&self) -> Vec<u32> {
        self.corners.iter().map(|c| c.smoothness).collect()
    }

    pub fn tessellate(&self) -> Result<TessellationResult, InvalidInputError> {
        tessellate(&self.anchors, &self.radii(), &self.smoothness())
    }
}
