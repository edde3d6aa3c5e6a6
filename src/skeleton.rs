// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use crate::geometry::compute_angle;
use crate::keypoints::BodyPart::{
    LeftAnkle, LeftElbow, LeftHip, LeftKnee, LeftShoulder, LeftWrist, RightAnkle, RightElbow,
    RightHip, RightKnee, RightShoulder, RightWrist,
};
use crate::keypoints::{BodyPart, Keypoint, PartIndex};

/// PoseNet skeleton structure (pairs of connected body parts)
/// Defines which keypoints connect to form the drawn skeleton
pub const CONNECTED_PARTS: [(BodyPart, BodyPart); 12] = [
    (LeftHip, LeftShoulder),
    (LeftElbow, LeftShoulder),
    (LeftElbow, LeftWrist),
    (LeftHip, LeftKnee),
    (LeftKnee, LeftAnkle),
    (RightHip, RightShoulder),
    (RightElbow, RightShoulder),
    (RightElbow, RightWrist),
    (RightHip, RightKnee),
    (RightKnee, RightAnkle),
    (LeftShoulder, RightShoulder),
    (LeftHip, RightHip),
];

/// A joint whose angle is measured while drawing the skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joint {
    /// Arm endpoints and vertex, `(a, vertex, c)`.
    pub triple: (BodyPart, BodyPart, BodyPart),
    /// Parts whose scores must all exceed the threshold.
    pub gate: [BodyPart; 3],
}

impl Joint {
    /// The body part the angle is measured at.
    #[must_use]
    pub const fn vertex(&self) -> BodyPart {
        self.triple.1
    }
}

/// Shoulder and elbow joints.
///
/// Elbow joints are gated on the hip rather than the shoulder even though the
/// shoulder is an arm of the angle.
pub const JOINTS: [Joint; 4] = [
    Joint {
        triple: (RightElbow, RightShoulder, RightHip),
        gate: [RightShoulder, RightHip, RightElbow],
    },
    Joint {
        triple: (LeftElbow, LeftShoulder, LeftHip),
        gate: [LeftShoulder, LeftHip, LeftElbow],
    },
    Joint {
        triple: (LeftShoulder, LeftElbow, LeftWrist),
        gate: [LeftElbow, LeftWrist, LeftHip],
    },
    Joint {
        triple: (RightShoulder, RightElbow, RightWrist),
        gate: [RightElbow, RightWrist, RightHip],
    },
];

/// Keypoint pairs forming skeleton edges.
///
/// A pair is returned when both parts are present and neither score is below
/// `min_confidence`.
#[must_use]
pub fn adjacent_keypoints(
    keypoints: &[Keypoint],
    min_confidence: f32,
) -> Vec<(Keypoint, Keypoint)> {
    let index = PartIndex::new(keypoints);
    CONNECTED_PARTS
        .iter()
        .filter_map(|&(a, b)| {
            let kp_a = index.lookup(keypoints, a)?;
            let kp_b = index.lookup(keypoints, b)?;
            if kp_a.score < min_confidence || kp_b.score < min_confidence {
                return None;
            }
            Some((kp_a.clone(), kp_b.clone()))
        })
        .collect()
}

/// Angles of the joints in [`JOINTS`] that pass their confidence gate.
///
/// A joint is skipped when any of its parts is missing or any gate score is
/// not strictly greater than `min_confidence`.
#[must_use]
pub fn joint_angles(keypoints: &[Keypoint], min_confidence: f32) -> Vec<(BodyPart, f32)> {
    let index = PartIndex::new(keypoints);
    let lookup = |part: BodyPart| index.lookup(keypoints, part);

    JOINTS
        .iter()
        .filter_map(|joint| {
            let gated = joint
                .gate
                .iter()
                .map(|&part| lookup(part).map(|kp| kp.score > min_confidence))
                .collect::<Option<Vec<_>>>()?;
            if !gated.iter().all(|&ok| ok) {
                return None;
            }
            let (a, b, c) = joint.triple;
            let angle = compute_angle(lookup(a)?.position, lookup(b)?.position, lookup(c)?.position);
            Some((joint.vertex(), angle))
        })
        .collect()
}

/// Store each passing joint's angle on its vertex keypoint.
///
/// Keypoints of joints that do not pass keep their previous `angle`.
pub fn attach_joint_angles(keypoints: &mut [Keypoint], min_confidence: f32) {
    let angles = joint_angles(keypoints, min_confidence);
    let index = PartIndex::new(keypoints);
    for (part, angle) in angles {
        if let Some(i) = index.get(part) {
            keypoints[i].angle = Some(angle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    /// Upright figure with arms straight out to the side.
    fn t_pose(score: f32) -> Vec<Keypoint> {
        vec![
            Keypoint::new(BodyPart::Nose, 50.0, 10.0, score),
            Keypoint::new(LeftShoulder, 60.0, 30.0, score),
            Keypoint::new(RightShoulder, 40.0, 30.0, score),
            Keypoint::new(LeftElbow, 80.0, 30.0, score),
            Keypoint::new(RightElbow, 20.0, 30.0, score),
            Keypoint::new(LeftWrist, 100.0, 30.0, score),
            Keypoint::new(RightWrist, 0.0, 30.0, score),
            Keypoint::new(LeftHip, 60.0, 80.0, score),
            Keypoint::new(RightHip, 40.0, 80.0, score),
            Keypoint::new(LeftKnee, 60.0, 120.0, score),
            Keypoint::new(RightKnee, 40.0, 120.0, score),
            Keypoint::new(LeftAnkle, 60.0, 160.0, score),
            Keypoint::new(RightAnkle, 40.0, 160.0, score),
        ]
    }

    #[test]
    fn test_adjacent_keypoints_all_edges() {
        let pairs = adjacent_keypoints(&t_pose(0.9), 0.5);
        assert_eq!(pairs.len(), CONNECTED_PARTS.len());
        assert_eq!(pairs[0].0.part, LeftHip);
        assert_eq!(pairs[0].1.part, LeftShoulder);
    }

    #[test]
    fn test_adjacent_keypoints_threshold_is_inclusive() {
        let mut keypoints = t_pose(0.9);
        for kp in &mut keypoints {
            if kp.part == LeftKnee {
                kp.score = 0.5;
            }
            if kp.part == RightKnee {
                kp.score = 0.49;
            }
        }
        let pairs = adjacent_keypoints(&keypoints, 0.5);
        // Both right-knee edges drop out, left-knee edges stay.
        assert_eq!(pairs.len(), CONNECTED_PARTS.len() - 2);
        assert!(pairs.iter().all(|(a, b)| a.part != RightKnee && b.part != RightKnee));
    }

    #[test]
    fn test_adjacent_keypoints_missing_part() {
        let keypoints: Vec<_> = t_pose(0.9)
            .into_iter()
            .filter(|kp| kp.part != LeftHip)
            .collect();
        // leftHip sits on three edges.
        assert_eq!(adjacent_keypoints(&keypoints, 0.1).len(), CONNECTED_PARTS.len() - 3);
    }

    #[test]
    fn test_joint_angles_t_pose() {
        let angles = joint_angles(&t_pose(0.9), 0.5);
        assert_eq!(angles.len(), 4);
        let shoulder = angles.iter().find(|(p, _)| *p == RightShoulder).unwrap().1;
        assert!((shoulder - FRAC_PI_2).abs() < 1e-5);
        let elbow = angles.iter().find(|(p, _)| *p == LeftElbow).unwrap().1;
        assert!((elbow - std::f32::consts::PI).abs() < 1e-3);
    }

    #[test]
    fn test_joint_angles_gate_is_strict() {
        assert!(joint_angles(&t_pose(0.5), 0.5).is_empty());
    }

    #[test]
    fn test_elbow_gated_on_hip_not_shoulder() {
        let mut keypoints = t_pose(0.9);
        for kp in &mut keypoints {
            if kp.part == LeftShoulder {
                kp.score = 0.0;
            }
        }
        let parts: Vec<_> = joint_angles(&keypoints, 0.5).into_iter().map(|(p, _)| p).collect();
        assert!(parts.contains(&LeftElbow));
        assert!(!parts.contains(&LeftShoulder));
    }

    #[test]
    fn test_attach_joint_angles() {
        let mut keypoints: Vec<_> = t_pose(0.9)
            .into_iter()
            .filter(|kp| kp.part != RightWrist)
            .collect();
        attach_joint_angles(&mut keypoints, 0.5);

        let angle_of = |part| keypoints.iter().find(|kp| kp.part == part).unwrap().angle;
        assert!(angle_of(LeftShoulder).is_some());
        assert!(angle_of(RightShoulder).is_some());
        assert!(angle_of(LeftElbow).is_some());
        assert_eq!(angle_of(RightElbow), None);
        assert_eq!(angle_of(BodyPart::Nose), None);
    }
}
