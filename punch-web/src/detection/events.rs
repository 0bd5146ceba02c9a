//! Punch events and where they go
//!
//! The engine has no opinion on presentation. It hands each event to a sink;
//! counting, flashing the canvas or calling back into JS is the sink's job.

use crate::physics::Limb;

/// One completed punch
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PunchEvent {
    pub limb: Limb,
    /// Timestamp of the frame that fired it
    pub timestamp_ms: f64,
}

/// Receives punch events, in firing order
pub trait PunchSink {
    fn on_punch(&mut self, event: PunchEvent);
}

impl PunchSink for Vec<PunchEvent> {
    fn on_punch(&mut self, event: PunchEvent) {
        self.push(event);
    }
}

/// Running punch counter, per limb and total
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PunchTally {
    left: u32,
    right: u32,
}

impl PunchTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, limb: Limb) -> u32 {
        match limb {
            Limb::Left => self.left,
            Limb::Right => self.right,
        }
    }

    pub fn total(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl PunchSink for PunchTally {
    fn on_punch(&mut self, event: PunchEvent) {
        match event.limb {
            Limb::Left => self.left = self.left.saturating_add(1),
            Limb::Right => self.right = self.right.saturating_add(1),
        }
    }
}
