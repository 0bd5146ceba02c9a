//! Classifier module - forward-motion voting
//!
//! Re-exports only. Measurements in features, predicates in evidence,
//! the vote itself in quorum.

mod evidence;
mod features;
mod quorum;

pub use evidence::{
    Evidence, EvidenceTest, DEFAULT_EVIDENCE,
    toward_camera, arm_length_growth, differential_movement,
    lateral_alignment, shoulder_distance_growth,
};
pub use features::{ArmMotion, ArmSnapshot};
pub use quorum::{ForwardMotionClassifier, ForwardVerdict};
