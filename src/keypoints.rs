// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose data model.
//!
//! Mirrors the structures a PoseNet model hands back: a [`Pose`] holds one
//! [`Keypoint`] per detected [`BodyPart`], with pixel-space positions and a
//! confidence score. Everything here deserializes from PoseNet's JSON shape:
//!
//! ```json
//! {"score": 0.92, "keypoints": [{"part": "nose", "position": {"x": 301.4, "y": 88.0}, "score": 0.99}]}
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};

/// The seventeen body parts a PoseNet model detects, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyPart {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl BodyPart {
    /// Number of body parts.
    pub const COUNT: usize = 17;

    /// All parts, indexed by [`BodyPart::id`].
    pub const ALL: [Self; Self::COUNT] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Position of this part in the model's keypoint channel order.
    #[must_use]
    pub const fn id(self) -> usize {
        self as usize
    }

    /// Look up a part by its channel index.
    #[must_use]
    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    /// The camelCase label PoseNet uses for this part.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "leftEye",
            Self::RightEye => "rightEye",
            Self::LeftEar => "leftEar",
            Self::RightEar => "rightEar",
            Self::LeftShoulder => "leftShoulder",
            Self::RightShoulder => "rightShoulder",
            Self::LeftElbow => "leftElbow",
            Self::RightElbow => "rightElbow",
            Self::LeftWrist => "leftWrist",
            Self::RightWrist => "rightWrist",
            Self::LeftHip => "leftHip",
            Self::RightHip => "rightHip",
            Self::LeftKnee => "leftKnee",
            Self::RightKnee => "rightKnee",
            Self::LeftAnkle => "leftAnkle",
            Self::RightAnkle => "rightAnkle",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyPart {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|part| part.as_str() == s)
            .ok_or_else(|| OverlayError::ParseError(format!("unknown body part '{s}'")))
    }
}

/// A 2D point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Multiply both coordinates by `factor`.
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A detected body-part location with a confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Which body part this is.
    pub part: BodyPart,
    /// Pixel-space position.
    pub position: Vector2D,
    /// Confidence in `[0, 1]`.
    pub score: f32,
    /// Joint angle in radians, set while drawing the skeleton.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
}

impl Keypoint {
    #[must_use]
    pub const fn new(part: BodyPart, x: f32, y: f32, score: f32) -> Self {
        Self {
            part,
            position: Vector2D::new(x, y),
            score,
            angle: None,
        }
    }
}

/// All keypoints of one detected person.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Overall pose confidence.
    #[serde(default)]
    pub score: f32,
    pub keypoints: Vec<Keypoint>,
}

impl Pose {
    #[must_use]
    pub const fn new(score: f32, keypoints: Vec<Keypoint>) -> Self {
        Self { score, keypoints }
    }

    /// Keypoint for `part`, if the pose has one.
    #[must_use]
    pub fn part(&self, part: BodyPart) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.part == part)
    }

    /// Mutable keypoint for `part`, if the pose has one.
    pub fn part_mut(&mut self, part: BodyPart) -> Option<&mut Keypoint> {
        self.keypoints.iter_mut().find(|kp| kp.part == part)
    }

    /// Parse a JSON array of poses.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::ParseError`] on malformed JSON or unknown parts.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON array of poses from disk.
    ///
    /// A file holding a single pose object is accepted as a one-element list.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_all<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        let text = std::fs::read_to_string(path)?;
        if text.trim_start().starts_with('{') {
            let pose: Self = serde_json::from_str(&text)?;
            return Ok(vec![pose]);
        }
        Self::list_from_json(&text)
    }
}

/// Explicit part-name → slice-index map over a keypoint slice.
///
/// When a part occurs more than once the first occurrence wins. Parts that
/// are absent map to `None`, so callers decide what a missing joint means
/// instead of faulting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartIndex([Option<usize>; BodyPart::COUNT]);

impl PartIndex {
    #[must_use]
    pub fn new(keypoints: &[Keypoint]) -> Self {
        let mut slots = [None; BodyPart::COUNT];
        for (i, kp) in keypoints.iter().enumerate() {
            let slot = &mut slots[kp.part.id()];
            if slot.is_none() {
                *slot = Some(i);
            }
        }
        Self(slots)
    }

    /// Slice index of `part`.
    #[must_use]
    pub const fn get(&self, part: BodyPart) -> Option<usize> {
        self.0[part.id()]
    }

    /// Resolve `part` against the slice this index was built from.
    #[must_use]
    pub fn lookup<'a>(&self, keypoints: &'a [Keypoint], part: BodyPart) -> Option<&'a Keypoint> {
        self.get(part).and_then(|i| keypoints.get(i))
    }
}

/// Axis-aligned box around a pose, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}
