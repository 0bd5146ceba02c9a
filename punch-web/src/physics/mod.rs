//! Physics module - landmark geometry and per-limb trackers
//!
//! Re-exports only. All logic in submodules.

mod landmark;
mod visibility;
mod extension;
mod velocity;

pub use landmark::{
    ArmPose, FrameSize, Keypoint, Landmark, LandmarkFrame, Limb,
    KEYPOINT_COUNT, VALUES_PER_KEYPOINT,
};
pub use visibility::{VisibilityTracker, WristGate};
pub use extension::{arm_extension, RetractionLatch};
pub use velocity::Velocity;
