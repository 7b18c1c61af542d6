/// Named shape recipes
///
/// Each preset is a pure function from its parameters to a [`ShapeSpec`]
/// with counter-clockwise anchors. [`Preset`] wraps the parameter structs
/// so a front end can hold "the current shape" as one value.

use std::f32::consts::{FRAC_PI_2, TAU};

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::geometry::ShapeSpec;
use crate::transform::rotate_points;

pub const DEFAULT_SMOOTHNESS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KiteParams {
    pub width: f32,
    pub height: f32,
    /// Vertical offset of the two side anchors
    pub shift: f32,
    pub corner_radius: f32,
    pub corner_smoothness: u32,
}

impl Default for KiteParams {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 200.0,
            shift: 50.0,
            corner_radius: 0.0,
            corner_smoothness: DEFAULT_SMOOTHNESS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleParams {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub corner_smoothness: u32,
}

impl Default for RectangleParams {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 200.0,
            corner_radius: 0.0,
            corner_smoothness: DEFAULT_SMOOTHNESS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonParams {
    /// Clamped to at least 3
    pub sides: u32,
    /// Circumradius
    pub radius: f32,
    pub rotation_degrees: f32,
    pub corner_radius: f32,
    pub corner_smoothness: u32,
}

impl Default for PolygonParams {
    fn default() -> Self {
        Self {
            sides: 6,
            radius: 100.0,
            rotation_degrees: 0.0,
            corner_radius: 0.0,
            corner_smoothness: DEFAULT_SMOOTHNESS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarParams {
    /// Clamped to at least 2
    pub points: u32,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub rotation_degrees: f32,
    pub corner_radius: f32,
    pub corner_smoothness: u32,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            points: 5,
            outer_radius: 100.0,
            inner_radius: 40.0,
            rotation_degrees: 0.0,
            corner_radius: 0.0,
            corner_smoothness: DEFAULT_SMOOTHNESS,
        }
    }
}

/// Four anchors: right, top, left, bottom
pub fn kite(params: &KiteParams) -> ShapeSpec {
    let half_w = params.width * 0.5;
    let half_h = params.height * 0.5;
    let anchors = vec![
        Point2::new(half_w, params.shift),
        Point2::new(0.0, half_h),
        Point2::new(-half_w, params.shift),
        Point2::new(0.0, -half_h),
    ];
    ShapeSpec::uniform(anchors, params.corner_radius, params.corner_smoothness)
}

/// Centered rectangle starting at the bottom-right corner
pub fn rectangle(params: &RectangleParams) -> ShapeSpec {
    let hw = params.width * 0.5;
    let hh = params.height * 0.5;
    let anchors = vec![
        Point2::new(hw, -hh),
        Point2::new(hw, hh),
        Point2::new(-hw, hh),
        Point2::new(-hw, -hh),
    ];
    ShapeSpec::uniform(anchors, params.corner_radius, params.corner_smoothness)
}

/// Regular polygon with its first anchor straight up before rotation
pub fn regular_polygon(params: &PolygonParams) -> ShapeSpec {
    let sides = params.sides.max(3);
    let mut anchors: Vec<Point2<f32>> = (0..sides)
        .map(|i| {
            let angle = FRAC_PI_2 + TAU * i as f32 / sides as f32;
            Point2::new(angle.cos(), angle.sin()) * params.radius
        })
        .collect();
    rotate_points(&mut anchors, params.rotation_degrees);
    ShapeSpec::uniform(anchors, params.corner_radius, params.corner_smoothness)
}

/// Star alternating outer tips and inner notches
pub fn star(params: &StarParams) -> ShapeSpec {
    let points = params.points.max(2);
    let count = points * 2;
    let mut anchors: Vec<Point2<f32>> = (0..count)
        .map(|i| {
            let angle = FRAC_PI_2 + TAU * i as f32 / count as f32;
            let r = if i % 2 == 0 {
                params.outer_radius
            } else {
                params.inner_radius
            };
            Point2::new(angle.cos(), angle.sin()) * r
        })
        .collect();
    rotate_points(&mut anchors, params.rotation_degrees);
    ShapeSpec::uniform(anchors, params.corner_radius, params.corner_smoothness)
}

/// A preset together with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preset {
    Kite(KiteParams),
    Rectangle(RectangleParams),
    RegularPolygon(PolygonParams),
    Star(StarParams),
}

impl Preset {
    pub const NAMES: [&'static str; 4] = ["kite", "rectangle", "regular_polygon", "star"];

    /// Preset with default parameters by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "kite" => Some(Self::Kite(KiteParams::default())),
            "rectangle" => Some(Self::Rectangle(RectangleParams::default())),
            "regular_polygon" | "polygon" => Some(Self::RegularPolygon(PolygonParams::default())),
            "star" => Some(Self::Star(StarParams::default())),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Kite(_) => "kite",
            Self::Rectangle(_) => "rectangle",
            Self::RegularPolygon(_) => "regular_polygon",
            Self::Star(_) => "star",
        }
    }

    pub fn build(&self) -> ShapeSpec {
        match self {
            Self::Kite(p) => kite(p),
            Self::Rectangle(p) => rectangle(p),
            Self::RegularPolygon(p) => regular_polygon(p),
            Self::Star(p) => star(p),
        }
    }

    pub fn corner_radius(&self) -> f32 {
        match self {
            Self::Kite(p) => p.corner_radius,
            Self::Rectangle(p) => p.corner_radius,
            Self::RegularPolygon(p) => p.corner_radius,
            Self::Star(p) => p.corner_radius,
        }
    }

    pub fn corner_smoothness(&self) -> u32 {
        match self {
            Self::Kite(p) => p.corner_smoothness,
            Self::Rectangle(p) => p.corner_smoothness,
            Self::RegularPolygon(p) => p.corner_smoothness,
            Self::Star(p) => p.corner_smoothness,
        }
    }

    /// Same preset with a different corner radius (negative clamps to 0)
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        let radius = radius.max(0.0);
        match &mut self {
            Self::Kite(p) => p.corner_radius = radius,
            Self::Rectangle(p) => p.corner_radius = radius,
            Self::RegularPolygon(p) => p.corner_radius = radius,
            Self::Star(p) => p.corner_radius = radius,
        }
        self
    }

    /// Same preset with a different corner smoothness
    pub fn with_corner_smoothness(mut self, smoothness: u32) -> Self {
        match &mut self {
            Self::Kite(p) => p.corner_smoothness = smoothness,
            Self::Rectangle(p) => p.corner_smoothness = smoothness,
            Self::RegularPolygon(p) => p.corner_smoothness = smoothness,
            Self::Star(p) => p.corner_smoothness = smoothness,
        }
        self
    }

    /// The next preset in [`Preset::NAMES`] order, with default parameters
    pub fn next(&self) -> Self {
        let index = Self::NAMES.iter().position(|n| *n == self.name()).unwrap_or(0);
        let next = Self::NAMES[(index + 1) % Self::NAMES.len()];
        Self::from_name(next).unwrap_or_default()
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Rectangle(RectangleParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kite_anchors() {
        let spec = kite(&KiteParams::default());
        assert_eq!(
            spec.anchors,
            vec![
                Point2::new(100.0, 50.0),
                Point2::new(0.0, 100.0),
                Point2::new(-100.0, 50.0),
                Point2::new(0.0, -100.0),
            ]
        );
        assert_eq!(spec.corners.len(), 4);
    }

    #[test]
    fn test_presets_are_counter_clockwise() {
        for name in Preset::NAMES {
            let preset = Preset::from_name(name).unwrap();
            let result = preset.build().tessellate().unwrap();
            assert!(result.signed_area() > 0.0, "{name} is not counter-clockwise");
        }
    }

    #[test]
    fn test_polygon_sides_clamped() {
        let spec = regular_polygon(&PolygonParams {
            sides: 1,
            ..Default::default()
        });
        assert_eq!(spec.anchors.len(), 3);
        assert!((spec.anchors[0] - Point2::new(0.0, 100.0)).norm() < 1e-4);
    }

    #[test]
    fn test_star_alternates_radii() {
        let spec = star(&StarParams::default());
        assert_eq!(spec.anchors.len(), 10);
        assert!((spec.anchors[0].coords.norm() - 100.0).abs() < 1e-3);
        assert!((spec.anchors[1].coords.norm() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_rounded_rectangle_vertex_count() {
        let preset = Preset::Rectangle(RectangleParams::default())
            .with_corner_radius(20.0)
            .with_corner_smoothness(8);
        let result = preset.build().tessellate().unwrap();
        assert_eq!(result.vertices.len(), 32);
        assert_eq!(result.triangles.len(), 30);
    }

    #[test]
    fn test_next_cycles_through_all() {
        let mut preset = Preset::default();
        let mut seen = Vec::new();
        for _ in 0..Preset::NAMES.len() {
            preset = preset.next();
            seen.push(preset.name());
        }
        seen.sort();
        let mut names = Preset::NAMES.to_vec();
        names.sort();
        assert_eq!(seen, names);
    }
}
