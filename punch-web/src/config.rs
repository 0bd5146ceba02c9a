//! Tunable thresholds for punch detection
//!
//! Every constant here was calibrated by hand against webcam footage at
//! 640x480. None of them is derived from first principles, so all of them can
//! be overridden from JavaScript with a partial JSON object.

use serde::Deserialize;

use crate::error::ConfigError;

/// Thresholds for the per-limb punch state machine
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PunchConfig {
    /// Minimum wrist speed in pixels per frame
    pub velocity_threshold: f32,
    /// Minimum wrist-to-shoulder distance as a fraction of the frame diagonal
    pub extension_threshold: f32,
    /// Minimum wrist confidence score (exclusive)
    pub confidence_threshold: f32,
    /// Consecutive usable-wrist frames required before a punch can fire
    pub min_frames_in_frame: u32,
    /// Extension below which the arm counts as pulled back
    pub arm_retraction_threshold: f32,
    /// Frames to wait after a punch before the same limb can fire again
    pub cooldown_period: u32,
    /// Fraction of the frame trimmed from every edge of the usable region
    pub frame_margin: f32,
    /// Forward-motion voting
    pub forward_motion: ForwardMotionConfig,
}

impl Default for PunchConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: 35.0,
            extension_threshold: 0.12,
            confidence_threshold: 0.4,
            min_frames_in_frame: 4,
            arm_retraction_threshold: 0.08,
            cooldown_period: 12,
            frame_margin: 0.1,
            forward_motion: ForwardMotionConfig::default(),
        }
    }
}

/// Factors for the five forward-motion evidence predicates
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForwardMotionConfig {
    /// How many predicates must agree
    pub quorum: usize,
    /// Max horizontal wrist-shoulder offset as a fraction of frame width
    pub alignment_fraction: f32,
    /// Pixels the wrist must drop beyond the elbow
    pub toward_camera_margin_px: f32,
    /// Required growth of the forearm's apparent length
    pub arm_growth_ratio: f32,
    /// Required ratio of wrist displacement to elbow displacement
    pub differential_ratio: f32,
    /// Required growth of the wrist-shoulder distance
    pub shoulder_growth_ratio: f32,
}

impl Default for ForwardMotionConfig {
    fn default() -> Self {
        Self {
            quorum: 2,
            alignment_fraction: 0.15,
            toward_camera_margin_px: 3.0,
            arm_growth_ratio: 1.05,
            differential_ratio: 1.2,
            shoulder_growth_ratio: 1.03,
        }
    }
}

impl PunchConfig {
    /// Parse a (possibly partial) JSON object and validate the result
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the state machine meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("velocity_threshold", self.velocity_threshold)?;
        positive("extension_threshold", self.extension_threshold)?;
        positive("arm_retraction_threshold", self.arm_retraction_threshold)?;
        unit_range("confidence_threshold", self.confidence_threshold)?;

        if !(0.0..0.5).contains(&self.frame_margin) {
            return Err(ConfigError::FrameMargin(self.frame_margin));
        }
        if self.arm_retraction_threshold >= self.extension_threshold {
            return Err(ConfigError::RetractionAboveExtension {
                retraction: self.arm_retraction_threshold,
                extension: self.extension_threshold,
            });
        }
        if self.cooldown_period == 0 {
            return Err(ConfigError::ZeroCooldown);
        }
        if self.min_frames_in_frame == 0 {
            return Err(ConfigError::ZeroVisibleFrames);
        }

        self.forward_motion.validate()
    }
}

impl ForwardMotionConfig {
    /// Quorum upper bound depends on the evidence list, checked by the classifier
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quorum == 0 {
            return Err(ConfigError::Quorum { quorum: 0, available: crate::classifier::DEFAULT_EVIDENCE.len() });
        }
        positive("alignment_fraction", self.alignment_fraction)?;
        positive("arm_growth_ratio", self.arm_growth_ratio)?;
        positive("differential_ratio", self.differential_ratio)?;
        positive("shoulder_growth_ratio", self.shoulder_growth_ratio)?;

        // A zero margin is allowed: any wrist drop beyond the elbow's counts
        if !self.toward_camera_margin_px.is_finite() || self.toward_camera_margin_px < 0.0 {
            return Err(ConfigError::NotPositive {
                name: "toward_camera_margin_px",
                value: self.toward_camera_margin_px,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn unit_range(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}
