//! Forward-motion vote
//!
//! Runs an ordered list of evidence predicates over one arm and accepts the
//! motion as a forward strike when enough of them agree. The predicate list
//! and quorum can be swapped without touching the punch state machine.

use super::evidence::{Evidence, DEFAULT_EVIDENCE};
use super::features::ArmMotion;
use crate::config::ForwardMotionConfig;
use crate::error::ConfigError;

/// Outcome of one vote
#[derive(Clone, Debug, PartialEq)]
pub struct ForwardVerdict {
    /// (predicate name, result) in evaluation order
    pub votes: Vec<(&'static str, bool)>,
    pub agreeing: usize,
    pub quorum: usize,
}

impl ForwardVerdict {
    pub fn is_forward(&self) -> bool {
        self.agreeing >= self.quorum
    }
}

/// Evidence list + quorum
#[derive(Clone, Debug)]
pub struct ForwardMotionClassifier {
    evidence: Vec<Evidence>,
    params: ForwardMotionConfig,
}

impl ForwardMotionClassifier {
    /// Default five predicates
    pub fn new(params: ForwardMotionConfig) -> Result<Self, ConfigError> {
        Self::with_evidence(params, DEFAULT_EVIDENCE.to_vec())
    }

    /// Custom predicate list; the quorum must be reachable
    pub fn with_evidence(params: ForwardMotionConfig, evidence: Vec<Evidence>) -> Result<Self, ConfigError> {
        if params.quorum == 0 || params.quorum > evidence.len() {
            return Err(ConfigError::Quorum {
                quorum: params.quorum,
                available: evidence.len(),
            });
        }
        params.validate()?;
        Ok(Self { evidence, params })
    }

    pub fn classify(&self, motion: &ArmMotion) -> ForwardVerdict {
        let votes: Vec<(&'static str, bool)> = self
            .evidence
            .iter()
            .map(|e| (e.name, e.holds(motion, &self.params)))
            .collect();
        let agreeing = votes.iter().filter(|(_, v)| *v).count();

        ForwardVerdict {
            votes,
            agreeing,
            quorum: self.params.quorum,
        }
    }

    pub fn quorum(&self) -> usize {
        self.params.quorum
    }

    pub fn params(&self) -> &ForwardMotionConfig {
        &self.params
    }

    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }
}

impl Default for ForwardMotionClassifier {
    fn default() -> Self {
        Self {
            evidence: DEFAULT_EVIDENCE.to_vec(),
            params: ForwardMotionConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ArmSnapshot;
    use nalgebra::Point2;

    fn still_arm() -> ArmSnapshot {
        ArmSnapshot::new(Point2::new(300.0, 200.0), Point2::new(300.0, 150.0), Point2::new(300.0, 100.0))
    }

    #[test]
    fn test_one_vote_is_not_enough() {
        // Nothing moved: only lateral alignment holds
        let motion = ArmMotion::between(&still_arm(), &still_arm(), 640.0).unwrap();
        let verdict = ForwardMotionClassifier::new(ForwardMotionConfig::default())
            .unwrap()
            .classify(&motion);

        assert_eq!(verdict.agreeing, 1);
        assert_eq!(verdict.votes[3], ("lateral_alignment", true));
        assert!(!verdict.is_forward());
    }

    #[test]
    fn test_two_votes_reach_quorum() {
        // Small sideways wrist shift: differential movement + alignment
        let current = ArmSnapshot {
            wrist: Some(Point2::new(310.0, 200.0)),
            ..still_arm()
        };
        let motion = ArmMotion::between(&current, &still_arm(), 640.0).unwrap();
        let verdict = ForwardMotionClassifier::new(ForwardMotionConfig::default())
            .unwrap()
            .classify(&motion);

        let agreeing: Vec<&str> = verdict.votes.iter().filter(|(_, v)| *v).map(|(n, _)| *n).collect();
        assert_eq!(agreeing, vec!["differential_movement", "lateral_alignment"]);
        assert!(verdict.is_forward());
    }

    #[test]
    fn test_quorum_must_be_reachable() {
        let params = ForwardMotionConfig {
            quorum: 6,
            ..ForwardMotionConfig::default()
        };
        assert!(matches!(
            ForwardMotionClassifier::new(params),
            Err(ConfigError::Quorum { quorum: 6, available: 5 })
        ));
    }

    #[test]
    fn test_bad_ratios_rejected() {
        let params = ForwardMotionConfig {
            arm_growth_ratio: f32::NAN,
            ..ForwardMotionConfig::default()
        };
        assert!(matches!(
            ForwardMotionClassifier::new(params),
            Err(ConfigError::NotPositive { name: "arm_growth_ratio", .. })
        ));

        let params = ForwardMotionConfig {
            differential_ratio: -5.0,
            ..ForwardMotionConfig::default()
        };
        assert!(ForwardMotionClassifier::with_evidence(params, DEFAULT_EVIDENCE.to_vec()).is_err());
    }

    #[test]
    fn test_custom_evidence_list() {
        fn always(_: &ArmMotion, _: &ForwardMotionConfig) -> bool {
            true
        }
        let params = ForwardMotionConfig {
            quorum: 1,
            ..ForwardMotionConfig::default()
        };
        let classifier = ForwardMotionClassifier::with_evidence(params, vec![Evidence::new("always", always)]).unwrap();
        let motion = ArmMotion::between(&still_arm(), &still_arm(), 640.0).unwrap();
        assert!(classifier.classify(&motion).is_forward());
        assert_eq!(classifier.evidence().len(), 1);
    }
}
