//! Arm snapshots and frame-to-frame arm measurements
//!
//! The forward-motion evidence all compares the same handful of distances
//! between two consecutive frames; they are computed once here.

use nalgebra::{distance, Point2};

use crate::physics::ArmPose;

/// Joint positions of one arm kept from the last classified frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArmSnapshot {
    pub wrist: Option<Point2<f32>>,
    pub elbow: Option<Point2<f32>>,
    pub shoulder: Option<Point2<f32>>,
}

impl ArmSnapshot {
    pub fn from_pose(pose: &ArmPose) -> Self {
        Self {
            wrist: pose.wrist.map(|l| l.position),
            elbow: pose.elbow.map(|l| l.position),
            shoulder: pose.shoulder.map(|l| l.position),
        }
    }

    pub fn new(wrist: Point2<f32>, elbow: Point2<f32>, shoulder: Point2<f32>) -> Self {
        Self {
            wrist: Some(wrist),
            elbow: Some(elbow),
            shoulder: Some(shoulder),
        }
    }

    fn complete(&self) -> Option<(Point2<f32>, Point2<f32>, Point2<f32>)> {
        Some((self.wrist?, self.elbow?, self.shoulder?))
    }
}

/// One arm across two consecutive frames, all joints present
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmMotion {
    pub wrist: Point2<f32>,
    pub elbow: Point2<f32>,
    pub shoulder: Point2<f32>,
    pub prev_wrist: Point2<f32>,
    pub prev_elbow: Point2<f32>,
    pub prev_shoulder: Point2<f32>,
    /// Frame width in pixels, for the lateral alignment check
    pub frame_width: f32,
}

impl ArmMotion {
    /// None unless all six joint positions are known
    pub fn between(current: &ArmSnapshot, previous: &ArmSnapshot, frame_width: f32) -> Option<Self> {
        let (wrist, elbow, shoulder) = current.complete()?;
        let (prev_wrist, prev_elbow, prev_shoulder) = previous.complete()?;
        Some(Self {
            wrist,
            elbow,
            shoulder,
            prev_wrist,
            prev_elbow,
            prev_shoulder,
            frame_width,
        })
    }

    /// Vertical wrist change (canvas y grows downward)
    pub fn wrist_dy(&self) -> f32 {
        self.wrist.y - self.prev_wrist.y
    }

    pub fn elbow_dy(&self) -> f32 {
        self.elbow.y - self.prev_elbow.y
    }

    /// Apparent forearm length now and one frame ago
    pub fn forearm_lengths(&self) -> (f32, f32) {
        (
            distance(&self.wrist, &self.elbow),
            distance(&self.prev_wrist, &self.prev_elbow),
        )
    }

    pub fn wrist_displacement(&self) -> f32 {
        distance(&self.wrist, &self.prev_wrist)
    }

    pub fn elbow_displacement(&self) -> f32 {
        distance(&self.elbow, &self.prev_elbow)
    }

    /// Wrist-shoulder distance now and one frame ago
    pub fn reach(&self) -> (f32, f32) {
        (
            distance(&self.wrist, &self.shoulder),
            distance(&self.prev_wrist, &self.prev_shoulder),
        )
    }

    /// Horizontal offset of the wrist from the shoulder
    pub fn lateral_offset(&self) -> f32 {
        (self.wrist.x - self.shoulder.x).abs()
    }
}
