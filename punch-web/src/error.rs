//! Error types for configuration and frame ingestion
//!
//! Classification itself never fails: a frame that cannot confirm a punch is
//! simply a frame without a punch. These errors cover the two places where a
//! caller can hand us something unusable.

/// Rejected configuration (caught at construction time, never per frame)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must lie within [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("frame margin must lie within [0, 0.5), got {0}")]
    FrameMargin(f32),
    #[error("retraction threshold {retraction} must be below extension threshold {extension}")]
    RetractionAboveExtension { retraction: f32, extension: f32 },
    #[error("cooldown period must be at least one frame")]
    ZeroCooldown,
    #[error("minimum visible frames must be at least one")]
    ZeroVisibleFrames,
    #[error("forward-motion quorum {quorum} must be between 1 and {available}")]
    Quorum { quorum: usize, available: usize },
    #[error("classifier forward-motion parameters differ from the engine configuration")]
    ClassifierMismatch,
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A frame that was refused at the ingestion point
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame timestamp {current}ms does not follow previous frame at {previous}ms")]
    OutOfOrder { previous: f64, current: f64 },
    #[error("frame timestamp must be finite, got {0}")]
    InvalidTimestamp(f64),
    #[error("invalid keypoint buffer length: {len} (expected {expected})")]
    KeypointBuffer { len: usize, expected: usize },
    #[error("invalid keypoint JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = ConfigError::Quorum { quorum: 7, available: 5 };
        assert_eq!(err.to_string(), "forward-motion quorum 7 must be between 1 and 5");

        let err = FrameError::OutOfOrder { previous: 40.0, current: 33.0 };
        assert!(err.to_string().contains("33ms"));
    }
}
