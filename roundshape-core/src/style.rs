/// Fill and stroke settings handed to a renderer
use serde::{Deserialize, Serialize};

/// How the fill is shaded across the shape's UV space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillType {
    #[default]
    Solid,
    LinearGradient,
    RadialGradient,
}

impl FillType {
    pub fn next(self) -> Self {
        match self {
            Self::Solid => Self::LinearGradient,
            Self::LinearGradient => Self::RadialGradient,
            Self::RadialGradient => Self::Solid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fill: bool,
    pub fill_type: FillType,
    /// Linear gradient direction in degrees, `[0, 360)`
    pub fill_angle: f32,
    pub stroke: bool,
    /// Stroke width in shape units, never negative
    pub stroke_width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: true,
            fill_type: FillType::Solid,
            fill_angle: 0.0,
            stroke: false,
            stroke_width: 10.0,
        }
    }
}

/// Fold an angle in degrees into `[0, 360)`
pub fn normalize_angle(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Gradient parameter in `[0, 1]` for a UV coordinate
pub fn gradient_at(fill_type: FillType, fill_angle: f32, u: f32, v: f32) -> f32 {
    match fill_type {
        FillType::Solid => 1.0,
        FillType::LinearGradient => {
            let (sin, cos) = fill_angle.to_radians().sin_cos();
            // Project onto the gradient axis through the UV center; the
            // half-extent of the unit square along that axis is (|cos| + |sin|) / 2
            let half_extent = (cos.abs() + sin.abs()) * 0.5;
            let t = ((u - 0.5) * cos + (v - 0.5) * sin) / half_extent.max(f32::EPSILON);
            ((t + 1.0) * 0.5).clamp(0.0, 1.0)
        }
        FillType::RadialGradient => {
            let d = ((u - 0.5).powi(2) + (v - 0.5).powi(2)).sqrt() / std::f32::consts::FRAC_1_SQRT_2;
            (1.0 - d).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(370.0), 10.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(360.0), 0.0);
    }

    #[test]
    fn test_linear_gradient_endpoints() {
        assert!((gradient_at(FillType::LinearGradient, 0.0, 0.0, 0.5) - 0.0).abs() < 1e-6);
        assert!((gradient_at(FillType::LinearGradient, 0.0, 1.0, 0.5) - 1.0).abs() < 1e-6);
        assert!((gradient_at(FillType::LinearGradient, 90.0, 0.5, 1.0) - 1.0).abs() < 1e-6);
        assert!((gradient_at(FillType::LinearGradient, 45.0, 1.0, 1.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_radial_gradient_center_is_brightest() {
        assert_eq!(gradient_at(FillType::RadialGradient, 0.0, 0.5, 0.5), 1.0);
        assert!(gradient_at(FillType::RadialGradient, 0.0, 0.0, 0.0) < 1e-6);
        assert_eq!(gradient_at(FillType::Solid, 0.0, 0.1, 0.9), 1.0);
    }
}
