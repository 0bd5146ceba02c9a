//! Landmark frame - one pose estimate in pixel space
//!
//! Built once per detection cycle from MoveNet output (17 keypoints,
//! pixel coordinates, per-point score) and never mutated afterwards.

use nalgebra::Point2;
use serde::Deserialize;

use crate::error::FrameError;

// ============================================================================
// KEYPOINTS (MoveNet / COCO order - 17 total)
// ============================================================================

/// Number of keypoints in a frame
pub const KEYPOINT_COUNT: usize = 17;

/// Values per keypoint in the flat buffer (x, y, score)
pub const VALUES_PER_KEYPOINT: usize = 3;

/// Named body keypoint, discriminant is the MoveNet output index
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keypoint {
    Nose = 0,
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

impl Keypoint {
    pub const ALL: [Keypoint; KEYPOINT_COUNT] = [
        Keypoint::Nose,
        Keypoint::LeftEye,
        Keypoint::RightEye,
        Keypoint::LeftEar,
        Keypoint::RightEar,
        Keypoint::LeftShoulder,
        Keypoint::RightShoulder,
        Keypoint::LeftElbow,
        Keypoint::RightElbow,
        Keypoint::LeftWrist,
        Keypoint::RightWrist,
        Keypoint::LeftHip,
        Keypoint::RightHip,
        Keypoint::LeftKnee,
        Keypoint::RightKnee,
        Keypoint::LeftAnkle,
        Keypoint::RightAnkle,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// MoveNet name (snake_case)
    pub fn as_str(self) -> &'static str {
        match self {
            Keypoint::Nose => "nose",
            Keypoint::LeftEye => "left_eye",
            Keypoint::RightEye => "right_eye",
            Keypoint::LeftEar => "left_ear",
            Keypoint::RightEar => "right_ear",
            Keypoint::LeftShoulder => "left_shoulder",
            Keypoint::RightShoulder => "right_shoulder",
            Keypoint::LeftElbow => "left_elbow",
            Keypoint::RightElbow => "right_elbow",
            Keypoint::LeftWrist => "left_wrist",
            Keypoint::RightWrist => "right_wrist",
            Keypoint::LeftHip => "left_hip",
            Keypoint::RightHip => "right_hip",
            Keypoint::LeftKnee => "left_knee",
            Keypoint::RightKnee => "right_knee",
            Keypoint::LeftAnkle => "left_ankle",
            Keypoint::RightAnkle => "right_ankle",
        }
    }

    /// PoseNet camelCase alias
    pub fn camel_name(self) -> &'static str {
        match self {
            Keypoint::Nose => "nose",
            Keypoint::LeftEye => "leftEye",
            Keypoint::RightEye => "rightEye",
            Keypoint::LeftEar => "leftEar",
            Keypoint::RightEar => "rightEar",
            Keypoint::LeftShoulder => "leftShoulder",
            Keypoint::RightShoulder => "rightShoulder",
            Keypoint::LeftElbow => "leftElbow",
            Keypoint::RightElbow => "rightElbow",
            Keypoint::LeftWrist => "leftWrist",
            Keypoint::RightWrist => "rightWrist",
            Keypoint::LeftHip => "leftHip",
            Keypoint::RightHip => "rightHip",
            Keypoint::LeftKnee => "leftKnee",
            Keypoint::RightKnee => "rightKnee",
            Keypoint::LeftAnkle => "leftAnkle",
            Keypoint::RightAnkle => "rightAnkle",
        }
    }

    /// Look up a keypoint by MoveNet name or PoseNet camelCase alias
    pub fn from_name(name: &str) -> Option<Keypoint> {
        Keypoint::ALL
            .iter()
            .copied()
            .find(|kp| kp.as_str() == name || kp.camel_name() == name)
    }
}

// ============================================================================
// FRAME DATA
// ============================================================================

/// Which arm a classification stream belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Limb {
    Left,
    Right,
}

impl Limb {
    /// Evaluation order within a frame
    pub const BOTH: [Limb; 2] = [Limb::Left, Limb::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Limb::Left => "left",
            Limb::Right => "right",
        }
    }

    fn joints(self) -> (Keypoint, Keypoint, Keypoint) {
        match self {
            Limb::Left => (Keypoint::LeftWrist, Keypoint::LeftElbow, Keypoint::LeftShoulder),
            Limb::Right => (Keypoint::RightWrist, Keypoint::RightElbow, Keypoint::RightShoulder),
        }
    }
}

/// A single detected keypoint in pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub position: Point2<f32>,
    /// Estimator score, nominally 0-1 but not calibrated
    pub confidence: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            confidence,
        }
    }
}

/// Pixel dimensions of the frame the landmarks were detected in
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

impl FrameSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite dimensions can't normalize anything
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }

    /// Inclusive bounds check against the frame shrunk by `margin` on every side
    pub fn contains_with_margin(&self, point: &Point2<f32>, margin: f32) -> bool {
        point.x >= self.width * margin
            && point.x <= self.width * (1.0 - margin)
            && point.y >= self.height * margin
            && point.y <= self.height * (1.0 - margin)
    }
}

/// Wrist, elbow and shoulder of one arm as seen in a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmPose {
    pub wrist: Option<Landmark>,
    pub elbow: Option<Landmark>,
    pub shoulder: Option<Landmark>,
}

/// Immutable snapshot of one pose estimate
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkFrame {
    landmarks: [Option<Landmark>; KEYPOINT_COUNT],
    size: FrameSize,
    timestamp_ms: f64,
}

/// Keypoint object as produced by tfjs pose-detection
#[derive(Deserialize)]
struct RawKeypoint {
    name: String,
    x: f32,
    y: f32,
    #[serde(default)]
    score: f32,
}

impl LandmarkFrame {
    pub fn new(size: FrameSize, timestamp_ms: f64) -> Self {
        Self {
            landmarks: [None; KEYPOINT_COUNT],
            size,
            timestamp_ms,
        }
    }

    /// Builder-style setter, used while assembling a frame
    pub fn with(mut self, keypoint: Keypoint, landmark: Landmark) -> Self {
        self.landmarks[keypoint.index()] = Some(landmark);
        self
    }

    /// Parse a flat buffer of 17 × (x, y, score) in MoveNet order
    ///
    /// A non-finite value anywhere in a triple marks that keypoint as missing.
    pub fn from_flat(data: &[f32], size: FrameSize, timestamp_ms: f64) -> Result<Self, FrameError> {
        let expected = KEYPOINT_COUNT * VALUES_PER_KEYPOINT;
        if data.len() != expected {
            return Err(FrameError::KeypointBuffer {
                len: data.len(),
                expected,
            });
        }

        let mut frame = Self::new(size, timestamp_ms);
        for (slot, values) in frame.landmarks.iter_mut().zip(data.chunks_exact(VALUES_PER_KEYPOINT)) {
            if values.iter().all(|v| v.is_finite()) {
                *slot = Some(Landmark::new(values[0], values[1], values[2]));
            }
        }
        Ok(frame)
    }

    /// Parse the `pose.keypoints` JSON array from tfjs pose-detection
    pub fn from_keypoints_json(json: &str, size: FrameSize, timestamp_ms: f64) -> Result<Self, FrameError> {
        let raw: Vec<RawKeypoint> = serde_json::from_str(json)?;

        let mut frame = Self::new(size, timestamp_ms);
        for kp in raw {
            match Keypoint::from_name(&kp.name) {
                Some(keypoint) => {
                    frame.landmarks[keypoint.index()] = Some(Landmark::new(kp.x, kp.y, kp.score));
                }
                None => log::debug!("skipping unknown keypoint '{}'", kp.name),
            }
        }
        Ok(frame)
    }

    pub fn get(&self, keypoint: Keypoint) -> Option<&Landmark> {
        self.landmarks[keypoint.index()].as_ref()
    }

    pub fn arm(&self, limb: Limb) -> ArmPose {
        let (wrist, elbow, shoulder) = limb.joints();
        ArmPose {
            wrist: self.landmarks[wrist.index()],
            elbow: self.landmarks[elbow.index()],
            shoulder: self.landmarks[shoulder.index()],
        }
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    pub fn timestamp_ms(&self) -> f64 {
        self.timestamp_ms
    }
}
