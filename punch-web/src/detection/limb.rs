//! Per-limb punch state machine
//!
//! Ready -> Cooldown -> Ready. Every frame updates visibility and the
//! retraction latch; only a Ready limb runs classification. A limb fires at
//! most once per retract-extend cycle and then sits out `cooldown_period`
//! frames.

use crate::classifier::{ArmMotion, ArmSnapshot, ForwardMotionClassifier};
use crate::config::PunchConfig;
use crate::physics::{arm_extension, ArmPose, FrameSize, RetractionLatch, Velocity, VisibilityTracker, WristGate};

/// State machine phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Cooldown,
}

/// First precondition that blocked a punch this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rejection {
    /// Wrist missing, low confidence or near the frame edge
    WristNotUsable,
    TooFewFrames { seen: u32, required: u32 },
    TooSlow { speed: f32 },
    NotExtended { extension: f32 },
    /// Elbow or shoulder missing now or in the previous snapshot
    MissingJoints,
    /// Forward-motion vote failed
    Sideways { agreeing: usize, quorum: usize },
    /// Arm hasn't come back since the last punch
    NotRetracted,
}

impl Rejection {
    pub fn describe(&self) -> &'static str {
        match self {
            Rejection::WristNotUsable => "wrist not visible",
            Rejection::TooFewFrames { .. } => "wrist just appeared",
            Rejection::TooSlow { .. } => "too slow",
            Rejection::NotExtended { .. } => "arm not extended",
            Rejection::MissingJoints => "arm joints missing",
            Rejection::Sideways { .. } => "sideways",
            Rejection::NotRetracted => "not retracted",
        }
    }
}

/// What happened to a limb on its last frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LimbStatus {
    /// No frame seen since construction or reset
    Idle,
    Fired,
    CoolingDown { remaining: u32 },
    Rejected(Rejection),
    /// Upstream had no pose for this frame
    NoPose,
}

/// Shared, read-only inputs for stepping either limb
#[derive(Clone, Debug)]
pub(crate) struct Rules {
    pub config: PunchConfig,
    pub gate: WristGate,
    pub classifier: ForwardMotionClassifier,
}

/// Everything one arm remembers between frames
#[derive(Clone, Debug, PartialEq)]
pub struct LimbContext {
    phase: Phase,
    cooldown_remaining: u32,
    latch: RetractionLatch,
    visibility: VisibilityTracker,
    /// Arm points of the last classified frame
    previous: Option<ArmSnapshot>,
    last_status: LimbStatus,
}

impl LimbContext {
    pub fn new() -> Self {
        Self {
            phase: Phase::Ready,
            cooldown_remaining: 0,
            latch: RetractionLatch::new(),
            visibility: VisibilityTracker::new(),
            previous: None,
            last_status: LimbStatus::Idle,
        }
    }

    /// Advance one frame
    pub(crate) fn step(&mut self, pose: &ArmPose, size: FrameSize, rules: &Rules) -> LimbStatus {
        // Tracking runs in every phase so edge flicker can't bank visible frames
        let usable = rules.gate.admits(pose.wrist.as_ref(), size);
        let frames_visible = self.visibility.update(usable);
        let extension = arm_extension(pose.wrist.as_ref(), pose.shoulder.as_ref(), size);
        if let Some(extension) = extension {
            self.latch.observe(extension, rules.config.arm_retraction_threshold);
        }

        let status = match self.phase {
            Phase::Cooldown => self.tick_cooldown(),
            Phase::Ready => {
                let current = ArmSnapshot::from_pose(pose);
                let status = self.evaluate(&current, usable, frames_visible, extension, size, rules);
                if status == LimbStatus::Fired {
                    // The snapshot keeps the frame before the punch
                    self.enter_cooldown(rules.config.cooldown_period);
                } else {
                    self.previous = Some(current);
                }
                status
            }
        };

        self.last_status = status;
        status
    }

    /// Upstream produced no landmarks at all
    pub(crate) fn observe_no_pose(&mut self) {
        self.visibility.reset();
        self.last_status = LimbStatus::NoPose;
    }

    fn evaluate(
        &self,
        current: &ArmSnapshot,
        usable: bool,
        frames_visible: u32,
        extension: Option<f32>,
        size: FrameSize,
        rules: &Rules,
    ) -> LimbStatus {
        let config = &rules.config;

        if !usable {
            return LimbStatus::Rejected(Rejection::WristNotUsable);
        }
        if frames_visible < config.min_frames_in_frame {
            return LimbStatus::Rejected(Rejection::TooFewFrames {
                seen: frames_visible,
                required: config.min_frames_in_frame,
            });
        }

        let previous_wrist = self.previous.and_then(|p| p.wrist);
        let velocity = Velocity::between(current.wrist.as_ref(), previous_wrist.as_ref());
        if velocity.magnitude < config.velocity_threshold {
            return LimbStatus::Rejected(Rejection::TooSlow { speed: velocity.magnitude });
        }

        let extension = extension.unwrap_or(0.0);
        if extension < config.extension_threshold {
            return LimbStatus::Rejected(Rejection::NotExtended { extension });
        }

        let motion = self
            .previous
            .as_ref()
            .and_then(|previous| ArmMotion::between(current, previous, size.width));
        let Some(motion) = motion else {
            return LimbStatus::Rejected(Rejection::MissingJoints);
        };

        let verdict = rules.classifier.classify(&motion);
        log::debug!(
            "forward vote {}/{}: {:?}",
            verdict.agreeing,
            verdict.quorum,
            verdict.votes
        );
        if !verdict.is_forward() {
            return LimbStatus::Rejected(Rejection::Sideways {
                agreeing: verdict.agreeing,
                quorum: verdict.quorum,
            });
        }

        if !self.latch.is_retracted() {
            return LimbStatus::Rejected(Rejection::NotRetracted);
        }

        LimbStatus::Fired
    }

    fn enter_cooldown(&mut self, period: u32) {
        self.phase = Phase::Cooldown;
        self.cooldown_remaining = period;
        self.latch.disarm();
    }

    fn tick_cooldown(&mut self) -> LimbStatus {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
        if self.cooldown_remaining == 0 {
            self.phase = Phase::Ready;
        }
        LimbStatus::CoolingDown {
            remaining: self.cooldown_remaining,
        }
    }

    /// Back to the state of a freshly constructed context
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    pub fn is_retracted(&self) -> bool {
        self.latch.is_retracted()
    }

    pub fn frames_visible(&self) -> u32 {
        self.visibility.frames_visible()
    }

    pub fn previous(&self) -> Option<&ArmSnapshot> {
        self.previous.as_ref()
    }

    pub fn last_status(&self) -> LimbStatus {
        self.last_status
    }
}

impl Default for LimbContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Landmark;
    use nalgebra::Point2;

    const SIZE: FrameSize = FrameSize { width: 640.0, height: 480.0 };
    const ELBOW: (f32, f32) = (240.0, 220.0);
    const SHOULDER: (f32, f32) = (240.0, 380.0);

    fn rules() -> Rules {
        let config = PunchConfig::default();
        Rules {
            gate: WristGate::new(config.confidence_threshold, config.frame_margin),
            classifier: ForwardMotionClassifier::new(config.forward_motion.clone()).unwrap(),
            config,
        }
    }

    fn arm(wrist: (f32, f32)) -> ArmPose {
        ArmPose {
            wrist: Some(Landmark::new(wrist.0, wrist.1, 0.9)),
            elbow: Some(Landmark::new(ELBOW.0, ELBOW.1, 0.9)),
            shoulder: Some(Landmark::new(SHOULDER.0, SHOULDER.1, 0.9)),
        }
    }

    /// Hold the wrist still for `frames`, then throw it to (240, 260)
    fn throw_after(limb: &mut LimbContext, rules: &Rules, frames: usize) -> LimbStatus {
        for _ in 0..frames {
            limb.step(&arm((200.0, 300.0)), SIZE, rules);
        }
        limb.step(&arm((240.0, 260.0)), SIZE, rules)
    }

    #[test]
    fn test_fires_and_enters_cooldown() {
        let rules = rules();
        let mut limb = LimbContext::new();

        assert_eq!(throw_after(&mut limb, &rules, 5), LimbStatus::Fired);
        assert_eq!(limb.phase(), Phase::Cooldown);
        assert_eq!(limb.cooldown_remaining(), 12);
        assert!(!limb.is_retracted());
        // The firing frame is not kept as the snapshot
        assert_eq!(limb.previous().and_then(|p| p.wrist), Some(Point2::new(200.0, 300.0)));
    }

    #[test]
    fn test_visibility_floor() {
        let rules = rules();

        // 2 still frames + the throw = 3 visible frames
        let mut limb = LimbContext::new();
        assert_eq!(
            throw_after(&mut limb, &rules, 2),
            LimbStatus::Rejected(Rejection::TooFewFrames { seen: 3, required: 4 })
        );

        let mut limb = LimbContext::new();
        assert_eq!(throw_after(&mut limb, &rules, 3), LimbStatus::Fired);
    }

    #[test]
    fn test_cooldown_counts_down_without_classifying() {
        let rules = rules();
        let mut limb = LimbContext::new();
        throw_after(&mut limb, &rules, 5);

        for expected in (0..12).rev() {
            // Alternate far-apart wrist positions so each frame looks fast
            let wrist = if expected % 2 == 0 { (200.0, 300.0) } else { (240.0, 260.0) };
            assert_eq!(
                limb.step(&arm(wrist), SIZE, &rules),
                LimbStatus::CoolingDown { remaining: expected }
            );
        }
        assert_eq!(limb.phase(), Phase::Ready);
        assert_eq!(limb.cooldown_remaining(), 0);
    }

    #[test]
    fn test_retraction_gates_next_punch() {
        let rules = rules();
        let mut limb = LimbContext::new();
        throw_after(&mut limb, &rules, 5);
        for _ in 0..12 {
            limb.step(&arm((240.0, 260.0)), SIZE, &rules);
        }

        // Same throw against the stale pre-punch snapshot: blocked by the latch
        assert_eq!(
            limb.step(&arm((240.0, 260.0)), SIZE, &rules),
            LimbStatus::Rejected(Rejection::NotRetracted)
        );

        // Pull back near the shoulder (extension 50/800 < 0.08)
        let status = limb.step(&arm((240.0, 330.0)), SIZE, &rules);
        assert!(matches!(status, LimbStatus::Rejected(Rejection::NotExtended { .. })));
        assert!(limb.is_retracted());

        assert_eq!(limb.step(&arm((240.0, 260.0)), SIZE, &rules), LimbStatus::Fired);
    }

    #[test]
    fn test_missing_wrist_resets_visibility() {
        let rules = rules();
        let mut limb = LimbContext::new();
        for _ in 0..5 {
            limb.step(&arm((200.0, 300.0)), SIZE, &rules);
        }
        assert_eq!(limb.frames_visible(), 5);

        let pose = ArmPose { wrist: None, ..arm((0.0, 0.0)) };
        assert_eq!(
            limb.step(&pose, SIZE, &rules),
            LimbStatus::Rejected(Rejection::WristNotUsable)
        );
        assert_eq!(limb.frames_visible(), 0);
    }

    #[test]
    fn test_reset_mid_cooldown() {
        let rules = rules();
        let mut limb = LimbContext::new();
        throw_after(&mut limb, &rules, 5);
        limb.step(&arm((240.0, 260.0)), SIZE, &rules);
        assert_eq!(limb.phase(), Phase::Cooldown);

        limb.reset();
        assert_eq!(limb, LimbContext::new());
    }
}
