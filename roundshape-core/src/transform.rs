/// 2D transformation matrices for shape anchors
use nalgebra::{Matrix3, Point2, Rotation2, Vector2};

/// Transform builder for homogeneous 2D transformations
pub struct Transform2;

impl Transform2 {
    /// Counter-clockwise rotation about the origin
    pub fn rotation_matrix(degrees: f32) -> Matrix3<f32> {
        Rotation2::new(degrees.to_radians()).to_homogeneous()
    }

    pub fn translation_matrix(x: f32, y: f32) -> Matrix3<f32> {
        Matrix3::new_translation(&Vector2::new(x, y))
    }

    pub fn scale_matrix(sx: f32, sy: f32) -> Matrix3<f32> {
        Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy))
    }

    pub fn apply(matrix: &Matrix3<f32>, point: &Point2<f32>) -> Point2<f32> {
        matrix.transform_point(point)
    }

    pub fn apply_all(matrix: &Matrix3<f32>, points: &[Point2<f32>]) -> Vec<Point2<f32>> {
        points.iter().map(|p| matrix.transform_point(p)).collect()
    }
}

/// Rotate a point about the origin by `degrees`
pub fn rotate_point(point: Point2<f32>, degrees: f32) -> Point2<f32> {
    Rotation2::new(degrees.to_radians()) * point
}

/// Rotate every point in place about the origin
pub fn rotate_points(points: &mut [Point2<f32>], degrees: f32) {
    let rotation = Rotation2::new(degrees.to_radians());
    for p in points.iter_mut() {
        *p = rotation * *p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_point() {
        let p = rotate_point(Point2::new(1.0, 0.0), 90.0);
        assert!((p - Point2::new(0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_rotate_points_in_place() {
        let mut points = [Point2::new(1.0, 0.0), Point2::new(0.0, 2.0)];
        rotate_points(&mut points, 180.0);
        assert!((points[0] - Point2::new(-1.0, 0.0)).norm() < 1e-6);
        assert!((points[1] - Point2::new(0.0, -2.0)).norm() < 1e-6);
    }

    #[test]
    fn test_compose_scale_then_translate() {
        let m = Transform2::translation_matrix(1.0, 2.0) * Transform2::scale_matrix(2.0, 3.0);
        let p = Transform2::apply(&m, &Point2::new(1.0, 1.0));
        assert!((p - Point2::new(3.0, 5.0)).norm() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform2::rotation_matrix(0.0);
        assert!((matrix - Matrix3::identity()).norm() < 1e-6);
    }
}
