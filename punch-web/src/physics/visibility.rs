//! Wrist visibility gate and consecutive-frame tracker
//!
//! A wrist only counts once it has been confidently inside the frame for a
//! few frames in a row. Detections hugging the frame edge are unreliable, so
//! the usable region is the frame shrunk by a margin on every side.

use super::landmark::{FrameSize, Landmark};

/// Single usability test shared by visibility tracking and punch gating
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WristGate {
    /// Minimum confidence to accept a wrist (exclusive)
    confidence_threshold: f32,
    /// Fraction of width/height excluded at each edge
    margin: f32,
}

impl WristGate {
    pub fn new(confidence_threshold: f32, margin: f32) -> Self {
        Self {
            confidence_threshold,
            margin,
        }
    }

    /// Is this wrist confidently located inside the usable region?
    pub fn admits(&self, wrist: Option<&Landmark>, size: FrameSize) -> bool {
        let Some(wrist) = wrist else {
            return false;
        };
        size.is_valid()
            && wrist.confidence > self.confidence_threshold
            && size.contains_with_margin(&wrist.position, self.margin)
    }
}

/// Counts consecutive frames with a usable wrist
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityTracker {
    frames_visible: u32,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame, returns the updated streak
    pub fn update(&mut self, usable: bool) -> u32 {
        if usable {
            self.frames_visible = self.frames_visible.saturating_add(1);
        } else {
            self.frames_visible = 0;
        }
        self.frames_visible
    }

    pub fn frames_visible(&self) -> u32 {
        self.frames_visible
    }

    pub fn reset(&mut self) {
        self.frames_visible = 0;
    }
}
