//! Arm extension and the retraction latch
//!
//! Extension is the 2D wrist-shoulder distance divided by the frame diagonal,
//! so it reads the same at any resolution (roughly 0 to 0.7).
//! The latch makes sure a punch is only counted once per retract-extend cycle.

use nalgebra::distance;

use super::landmark::{FrameSize, Landmark};

/// Normalized wrist-shoulder distance, None if it can't be measured
pub fn arm_extension(wrist: Option<&Landmark>, shoulder: Option<&Landmark>, size: FrameSize) -> Option<f32> {
    if !size.is_valid() {
        return None;
    }
    let (wrist, shoulder) = (wrist?, shoulder?);
    Some(distance(&wrist.position, &shoulder.position) / size.diagonal())
}

/// Arms after the arm comes back near the body, disarms when a punch fires
#[derive(Clone, Debug, PartialEq)]
pub struct RetractionLatch {
    retracted: bool,
}

impl RetractionLatch {
    /// Starts armed: the first punch needs no prior retraction
    pub fn new() -> Self {
        Self { retracted: true }
    }

    /// Feed this frame's extension; only ever sets the latch
    pub fn observe(&mut self, extension: f32, threshold: f32) {
        if extension < threshold {
            self.retracted = true;
        }
    }

    /// Called by the state machine on the frame a punch fires
    pub fn disarm(&mut self) {
        self.retracted = false;
    }

    pub fn is_retracted(&self) -> bool {
        self.retracted
    }
}

impl Default for RetractionLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_normalized() {
        let size = FrameSize::new(640.0, 480.0);
        let wrist = Landmark::new(240.0, 260.0, 0.9);
        let shoulder = Landmark::new(240.0, 380.0, 0.9);
        let ext = arm_extension(Some(&wrist), Some(&shoulder), size).unwrap();
        assert!((ext - 0.15).abs() < 1e-5);

        // Same pose at double resolution
        let size = FrameSize::new(1280.0, 960.0);
        let wrist = Landmark::new(480.0, 520.0, 0.9);
        let shoulder = Landmark::new(480.0, 760.0, 0.9);
        let ext = arm_extension(Some(&wrist), Some(&shoulder), size).unwrap();
        assert!((ext - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_extension_undefined() {
        let size = FrameSize::new(640.0, 480.0);
        let wrist = Landmark::new(240.0, 260.0, 0.9);
        assert_eq!(arm_extension(Some(&wrist), None, size), None);
        assert_eq!(arm_extension(Some(&wrist), Some(&wrist), FrameSize::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_latch_only_rearms_below_threshold() {
        let mut latch = RetractionLatch::new();
        assert!(latch.is_retracted());

        latch.disarm();
        latch.observe(0.3, 0.08);
        latch.observe(0.08, 0.08);
        assert!(!latch.is_retracted());

        latch.observe(0.05, 0.08);
        assert!(latch.is_retracted());

        // Never unset by observation
        latch.observe(0.5, 0.08);
        assert!(latch.is_retracted());
    }
}
