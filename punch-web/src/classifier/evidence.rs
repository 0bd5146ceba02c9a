//! Forward-motion evidence predicates
//!
//! A 2D camera can't see the arm travelling toward it, so each predicate is
//! one indirect hint that the wrist is being thrown forward rather than waved
//! sideways. None is reliable alone; the quorum in `quorum.rs` combines them.

use std::fmt;

use super::features::ArmMotion;
use crate::config::ForwardMotionConfig;

/// Boolean test over a (current, previous) arm pair
pub type EvidenceTest = fn(&ArmMotion, &ForwardMotionConfig) -> bool;

/// A named piece of evidence, the name shows up in debug logs
#[derive(Clone, Copy)]
pub struct Evidence {
    pub name: &'static str,
    pub test: EvidenceTest,
}

impl fmt::Debug for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Evidence").field(&self.name).finish()
    }
}

impl Evidence {
    pub const fn new(name: &'static str, test: EvidenceTest) -> Self {
        Self { name, test }
    }

    pub fn holds(&self, motion: &ArmMotion, params: &ForwardMotionConfig) -> bool {
        (self.test)(motion, params)
    }
}

/// The five hand-tuned predicates, in evaluation order
pub const DEFAULT_EVIDENCE: [Evidence; 5] = [
    Evidence::new("toward_camera", toward_camera),
    Evidence::new("arm_length_growth", arm_length_growth),
    Evidence::new("differential_movement", differential_movement),
    Evidence::new("lateral_alignment", lateral_alignment),
    Evidence::new("shoulder_distance_growth", shoulder_distance_growth),
];

/// Wrist drops faster than the elbow (foreshortening toward the camera)
pub fn toward_camera(motion: &ArmMotion, params: &ForwardMotionConfig) -> bool {
    motion.wrist_dy() > motion.elbow_dy() + params.toward_camera_margin_px
}

/// Forearm looks longer than a frame ago
pub fn arm_length_growth(motion: &ArmMotion, params: &ForwardMotionConfig) -> bool {
    let (now, before) = motion.forearm_lengths();
    now > before * params.arm_growth_ratio
}

/// Wrist travels clearly further than the elbow it pivots on
pub fn differential_movement(motion: &ArmMotion, params: &ForwardMotionConfig) -> bool {
    motion.wrist_displacement() > motion.elbow_displacement() * params.differential_ratio
}

/// Wrist stays roughly in front of the shoulder
pub fn lateral_alignment(motion: &ArmMotion, params: &ForwardMotionConfig) -> bool {
    motion.lateral_offset() < motion.frame_width * params.alignment_fraction
}

/// Wrist moves away from the shoulder
///
/// Starting from zero reach, any distance at all counts as growth.
pub fn shoulder_distance_growth(motion: &ArmMotion, params: &ForwardMotionConfig) -> bool {
    let (now, before) = motion.reach();
    if before == 0.0 {
        return now > 0.0;
    }
    now / before > params.shoulder_growth_ratio
}
