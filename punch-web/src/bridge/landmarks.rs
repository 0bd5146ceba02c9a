//! Landmark ingestion from JavaScript
//!
//! Receives MoveNet keypoints once per detection cycle and feeds them to the
//! session engine. Frames that can't be used are logged and skipped; they
//! never stop the stream.

use wasm_bindgen::prelude::*;

use super::session;
use crate::error::FrameError;
use crate::physics::{FrameSize, LandmarkFrame};

/// Called from JavaScript with a flat Float32Array of 51 values
/// (17 keypoints × x, y, score in pixel space). NaN marks a missing keypoint.
///
/// Returns the number of punches recognized in this frame.
#[wasm_bindgen]
pub fn process_pose(data: &[f32], width: f32, height: f32, timestamp_ms: f64) -> Result<u32, JsValue> {
    let frame = LandmarkFrame::from_flat(data, FrameSize::new(width, height), timestamp_ms)
        .map_err(skip_frame)?;
    session::ingest(&frame).map_err(skip_frame)
}

/// Same as `process_pose`, taking `JSON.stringify(pose.keypoints)`
#[wasm_bindgen]
pub fn process_pose_json(json: &str, width: f32, height: f32, timestamp_ms: f64) -> Result<u32, JsValue> {
    let frame = LandmarkFrame::from_keypoints_json(json, FrameSize::new(width, height), timestamp_ms)
        .map_err(skip_frame)?;
    session::ingest(&frame).map_err(skip_frame)
}

/// The detector returned no pose for this video frame
#[wasm_bindgen]
pub fn process_no_pose(timestamp_ms: f64) -> Result<(), JsValue> {
    session::with_session(|session| session.ingest_missing(timestamp_ms)).map_err(skip_frame)
}

fn skip_frame(err: FrameError) -> JsValue {
    log::warn!("frame skipped: {}", err);
    JsValue::from_str(&err.to_string())
}
