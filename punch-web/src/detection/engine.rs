//! Punch engine - the single ingestion point for landmark frames
//!
//! Owns both limb contexts and the shared rules. Frames must arrive in
//! capture order: velocity and the retraction latch both assume that the
//! previous frame really came before this one, so a duplicate or
//! out-of-order timestamp is refused before any state is touched.

use super::events::{PunchEvent, PunchSink};
use super::limb::{LimbContext, LimbStatus, Rules};
use crate::classifier::ForwardMotionClassifier;
use crate::config::PunchConfig;
use crate::error::{ConfigError, FrameError};
use crate::physics::{LandmarkFrame, Limb, WristGate};

/// Per-limb outcome of one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub timestamp_ms: f64,
    pub left: LimbStatus,
    pub right: LimbStatus,
}

impl FrameReport {
    pub fn status(&self, limb: Limb) -> LimbStatus {
        match limb {
            Limb::Left => self.left,
            Limb::Right => self.right,
        }
    }

    /// Limbs that fired this frame, left first
    pub fn fired(&self) -> impl Iterator<Item = Limb> + '_ {
        Limb::BOTH
            .into_iter()
            .filter(move |limb| self.status(*limb) == LimbStatus::Fired)
    }

    pub fn punches(&self) -> usize {
        self.fired().count()
    }
}

/// Two independent limb state machines fed from one frame stream
#[derive(Clone, Debug)]
pub struct PunchEngine {
    rules: Rules,
    left: LimbContext,
    right: LimbContext,
    last_timestamp_ms: Option<f64>,
}

impl PunchEngine {
    /// Engine with the default five-predicate forward-motion vote
    pub fn new(config: PunchConfig) -> Result<Self, ConfigError> {
        let classifier = ForwardMotionClassifier::new(config.forward_motion.clone())?;
        Self::with_classifier(config, classifier)
    }

    /// Engine with a custom forward-motion classifier; its parameters must
    /// match `config.forward_motion` so `config()` reports what is in use
    pub fn with_classifier(config: PunchConfig, classifier: ForwardMotionClassifier) -> Result<Self, ConfigError> {
        config.validate()?;
        if classifier.params() != &config.forward_motion {
            return Err(ConfigError::ClassifierMismatch);
        }
        let gate = WristGate::new(config.confidence_threshold, config.frame_margin);
        Ok(Self {
            rules: Rules {
                config,
                gate,
                classifier,
            },
            left: LimbContext::new(),
            right: LimbContext::new(),
            last_timestamp_ms: None,
        })
    }

    /// Classify one frame, left limb first, emitting punches into `sink`
    pub fn process<S: PunchSink + ?Sized>(
        &mut self,
        frame: &LandmarkFrame,
        sink: &mut S,
    ) -> Result<FrameReport, FrameError> {
        let timestamp_ms = frame.timestamp_ms();
        self.accept_timestamp(timestamp_ms)?;

        let size = frame.size();
        let mut statuses = [LimbStatus::Idle; 2];
        for (slot, limb) in statuses.iter_mut().zip(Limb::BOTH) {
            let context = match limb {
                Limb::Left => &mut self.left,
                Limb::Right => &mut self.right,
            };
            *slot = context.step(&frame.arm(limb), size, &self.rules);

            match *slot {
                LimbStatus::Fired => {
                    log::info!("{} punch at {:.0}ms", limb.as_str(), timestamp_ms);
                    sink.on_punch(PunchEvent { limb, timestamp_ms });
                }
                LimbStatus::Rejected(rejection) => {
                    log::debug!("{}: {}", limb.as_str(), rejection.describe());
                }
                _ => {}
            }
        }

        Ok(FrameReport {
            timestamp_ms,
            left: statuses[0],
            right: statuses[1],
        })
    }

    /// Upstream produced no pose this frame: no classification, visibility lost
    pub fn process_missing(&mut self, timestamp_ms: f64) -> Result<FrameReport, FrameError> {
        self.accept_timestamp(timestamp_ms)?;
        self.left.observe_no_pose();
        self.right.observe_no_pose();
        Ok(FrameReport {
            timestamp_ms,
            left: LimbStatus::NoPose,
            right: LimbStatus::NoPose,
        })
    }

    fn accept_timestamp(&mut self, timestamp_ms: f64) -> Result<(), FrameError> {
        if !timestamp_ms.is_finite() {
            return Err(FrameError::InvalidTimestamp(timestamp_ms));
        }
        if let Some(previous) = self.last_timestamp_ms {
            if timestamp_ms <= previous {
                return Err(FrameError::OutOfOrder {
                    previous,
                    current: timestamp_ms,
                });
            }
        }
        self.last_timestamp_ms = Some(timestamp_ms);
        Ok(())
    }

    /// Both limbs back to their initial state; the frame clock restarts too
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.last_timestamp_ms = None;
        log::info!("punch engine reset");
    }

    pub fn limb(&self, limb: Limb) -> &LimbContext {
        match limb {
            Limb::Left => &self.left,
            Limb::Right => &self.right,
        }
    }

    pub fn config(&self) -> &PunchConfig {
        &self.rules.config
    }
}

impl Default for PunchEngine {
    fn default() -> Self {
        let config = PunchConfig::default();
        Self {
            rules: Rules {
                gate: WristGate::new(config.confidence_threshold, config.frame_margin),
                classifier: ForwardMotionClassifier::default(),
                config,
            },
            left: LimbContext::new(),
            right: LimbContext::new(),
            last_timestamp_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForwardMotionConfig;
    use crate::detection::PunchTally;
    use crate::physics::{FrameSize, Keypoint, Landmark};

    fn frame(timestamp_ms: f64) -> LandmarkFrame {
        LandmarkFrame::new(FrameSize::new(640.0, 480.0), timestamp_ms)
            .with(Keypoint::LeftWrist, Landmark::new(200.0, 300.0, 0.9))
            .with(Keypoint::LeftElbow, Landmark::new(240.0, 220.0, 0.9))
            .with(Keypoint::LeftShoulder, Landmark::new(240.0, 380.0, 0.9))
    }

    #[test]
    fn test_out_of_order_frame_leaves_state_alone() {
        let mut engine = PunchEngine::new(PunchConfig::default()).unwrap();
        let mut events: Vec<PunchEvent> = Vec::new();
        engine.process(&frame(33.0), &mut events).unwrap();
        let before = engine.limb(Limb::Left).clone();

        assert!(matches!(
            engine.process(&frame(33.0), &mut events),
            Err(FrameError::OutOfOrder { .. })
        ));
        assert!(matches!(
            engine.process(&frame(10.0), &mut events),
            Err(FrameError::OutOfOrder { .. })
        ));
        assert!(matches!(
            engine.process(&frame(f64::NAN), &mut events),
            Err(FrameError::InvalidTimestamp(_))
        ));
        assert_eq!(engine.limb(Limb::Left), &before);
        assert_eq!(engine.limb(Limb::Left).frames_visible(), 1);
    }

    #[test]
    fn test_missing_pose_resets_visibility() {
        let mut engine = PunchEngine::new(PunchConfig::default()).unwrap();
        let mut events: Vec<PunchEvent> = Vec::new();
        for t in 0..3 {
            engine.process(&frame(t as f64 * 33.0), &mut events).unwrap();
        }
        assert_eq!(engine.limb(Limb::Left).frames_visible(), 3);

        let report = engine.process_missing(100.0).unwrap();
        assert_eq!(report.left, LimbStatus::NoPose);
        assert_eq!(engine.limb(Limb::Left).frames_visible(), 0);
        assert_eq!(engine.limb(Limb::Right).frames_visible(), 0);
    }

    #[test]
    fn test_right_limb_without_landmarks_never_usable() {
        let mut engine = PunchEngine::new(PunchConfig::default()).unwrap();
        let report = engine.process(&frame(0.0), &mut PunchTally::new()).unwrap();
        assert_eq!(
            report.right,
            LimbStatus::Rejected(crate::detection::Rejection::WristNotUsable)
        );
        assert_eq!(report.punches(), 0);
    }

    #[test]
    fn test_default_matches_validated_defaults() {
        let engine = PunchEngine::default();
        assert_eq!(engine.config(), &PunchConfig::default());
        assert!(PunchEngine::new(PunchConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PunchConfig {
            cooldown_period: 0,
            ..PunchConfig::default()
        };
        assert!(matches!(PunchEngine::new(config), Err(ConfigError::ZeroCooldown)));
    }

    #[test]
    fn test_classifier_must_match_config() {
        let config = PunchConfig::default();
        let stricter = ForwardMotionConfig {
            quorum: 3,
            ..ForwardMotionConfig::default()
        };
        let classifier = ForwardMotionClassifier::new(stricter.clone()).unwrap();
        assert!(matches!(
            PunchEngine::with_classifier(config.clone(), classifier.clone()),
            Err(ConfigError::ClassifierMismatch)
        ));

        let config = PunchConfig {
            forward_motion: stricter,
            ..config
        };
        let engine = PunchEngine::with_classifier(config, classifier).unwrap();
        assert_eq!(engine.config().forward_motion.quorum, 3);
    }

    #[test]
    fn test_reset_restarts_clock() {
        let mut engine = PunchEngine::new(PunchConfig::default()).unwrap();
        let mut tally = PunchTally::new();
        engine.process(&frame(500.0), &mut tally).unwrap();
        engine.reset();
        assert!(engine.process(&frame(0.0), &mut tally).is_ok());
    }
}
