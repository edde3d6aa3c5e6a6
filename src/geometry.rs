// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Geometry helpers for poses.

use crate::keypoints::{BoundingBox, Keypoint, Vector2D};

/// Angle at vertex `b` subtended by segments `b`-`a` and `b`-`c`, in radians.
///
/// Uses the law of cosines. The cosine is clamped to `[-1, 1]` so rounding on
/// nearly collinear points cannot push it out of `acos`'s domain, but
/// coincident points still divide by zero and yield `NaN`. Callers must
/// tolerate `NaN`; no error is raised.
///
/// # Arguments
///
/// * `a` - First arm endpoint.
/// * `b` - Vertex.
/// * `c` - Second arm endpoint.
///
/// # Returns
///
/// * The angle in `[0, π]`, or `NaN` for degenerate input.
#[must_use]
pub fn compute_angle(a: Vector2D, b: Vector2D, c: Vector2D) -> f32 {
    let ab = a.distance(b);
    let bc = b.distance(c);
    let ac = a.distance(c);
    let cos = (bc * bc + ab * ab - ac * ac) / (2.0 * bc * ab);
    cos.clamp(-1.0, 1.0).acos()
}

/// Smallest axis-aligned box containing every keypoint position.
///
/// Scores are ignored, matching what the pose model reports. Returns `None`
/// for an empty slice.
#[must_use]
pub fn bounding_box(keypoints: &[Keypoint]) -> Option<BoundingBox> {
    if keypoints.is_empty() {
        return None;
    }

    let init = BoundingBox {
        min_x: f32::INFINITY,
        min_y: f32::INFINITY,
        max_x: f32::NEG_INFINITY,
        max_y: f32::NEG_INFINITY,
    };

    Some(keypoints.iter().fold(init, |bbox, kp| {
        let Vector2D { x, y } = kp.position;
        BoundingBox {
            min_x: bbox.min_x.min(x),
            min_y: bbox.min_y.min(y),
            max_x: bbox.max_x.max(x),
            max_y: bbox.max_y.max(y),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypoints::BodyPart;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_right_angle() {
        let angle = compute_angle(
            Vector2D::new(0.0, 1.0),
            Vector2D::new(0.0, 0.0),
            Vector2D::new(1.0, 0.0),
        );
        assert!((angle - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_straight_angle() {
        let angle = compute_angle(
            Vector2D::new(-2.0, 0.0),
            Vector2D::new(0.0, 0.0),
            Vector2D::new(3.0, 0.0),
        );
        assert!((angle - PI).abs() < 1e-6);
    }

    #[test]
    fn test_nearly_collinear_is_not_nan() {
        let angle = compute_angle(
            Vector2D::new(0.0, 0.0),
            Vector2D::new(1.5, 0.3),
            Vector2D::new(3.0, 0.6),
        );
        assert!((angle - PI).abs() < 1e-3);
    }

    #[test]
    fn test_coincident_points_yield_nan() {
        let p = Vector2D::new(4.0, 4.0);
        assert!(compute_angle(p, p, Vector2D::new(1.0, 0.0)).is_nan());
    }

    #[test]
    fn test_bounding_box_extents() {
        let keypoints = vec![
            Keypoint::new(BodyPart::Nose, 50.0, 10.0, 0.9),
            Keypoint::new(BodyPart::LeftAnkle, 20.0, 200.0, 0.01),
            Keypoint::new(BodyPart::RightWrist, 90.0, 120.0, 0.5),
        ];
        let bbox = bounding_box(&keypoints).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                min_x: 20.0,
                min_y: 10.0,
                max_x: 90.0,
                max_y: 200.0
            }
        );
        assert!((bbox.width() - 70.0).abs() < f32::EPSILON);
        assert!((bbox.height() - 190.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bounding_box_empty() {
        assert!(bounding_box(&[]).is_none());
    }
}
