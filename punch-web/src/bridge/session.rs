//! Punch session - the engine instance driven from JavaScript
//!
//! Holds the engine, the punch tally and the JS callback. The core has no
//! globals; this thread-local is the one place the page's state lives
//! (WASM is single-threaded).

use wasm_bindgen::prelude::*;
use std::cell::RefCell;

use crate::config::PunchConfig;
use crate::detection::{PunchEngine, PunchEvent, PunchSink, PunchTally};
use crate::error::FrameError;
use crate::physics::{LandmarkFrame, Limb};

/// Engine + consumer-side state for one subject
#[derive(Default)]
pub(crate) struct Session {
    pub engine: PunchEngine,
    pub tally: PunchTally,
    /// Called with "left" / "right" for every punch
    pub callback: Option<js_sys::Function>,
}

impl Session {
    /// Classify one frame, returns the punches it produced
    pub fn ingest(&mut self, frame: &LandmarkFrame) -> Result<Vec<PunchEvent>, FrameError> {
        let mut events: Vec<PunchEvent> = Vec::new();
        self.engine.process(frame, &mut events)?;
        for event in &events {
            self.tally.on_punch(*event);
        }
        Ok(events)
    }

    pub fn ingest_missing(&mut self, timestamp_ms: f64) -> Result<(), FrameError> {
        self.engine.process_missing(timestamp_ms).map(|_| ())
    }
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::default());
}

pub(crate) fn with_session<R>(f: impl FnOnce(&mut Session) -> R) -> R {
    SESSION.with(|session_cell| f(&mut session_cell.borrow_mut()))
}

/// Run a frame and notify JS once the session borrow is released,
/// so the callback may read counters back
pub(crate) fn ingest(frame: &LandmarkFrame) -> Result<u32, FrameError> {
    let (events, callback) = with_session(|session| {
        session
            .ingest(frame)
            .map(|events| (events, session.callback.clone()))
    })?;

    if let Some(callback) = callback {
        for event in &events {
            let limb = JsValue::from_str(event.limb.as_str());
            if let Err(err) = callback.call1(&JsValue::NULL, &limb) {
                log::warn!("punch callback threw: {:?}", err);
            }
        }
    }
    Ok(events.len() as u32)
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Replace the thresholds with a (partial) JSON config; restarts detection
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let engine = PunchConfig::from_json(json)
        .and_then(PunchEngine::new)
        .map_err(|err| {
            log::warn!("config rejected: {}", err);
            JsValue::from_str(&err.to_string())
        })?;
    with_session(|session| session.engine = engine);
    log::info!("punch detection configured");
    Ok(())
}

/// Register the JS function called on every punch
#[wasm_bindgen]
pub fn set_punch_callback(callback: js_sys::Function) {
    with_session(|session| session.callback = Some(callback));
}

#[wasm_bindgen]
pub fn clear_punch_callback() {
    with_session(|session| session.callback = None);
}

/// Zero the counter and re-arm both arms
#[wasm_bindgen]
pub fn reset_counter() {
    with_session(|session| {
        session.engine.reset();
        session.tally.reset();
    });
    log::info!("counter reset to 0");
}

/// Camera stopped: forget tracking state but keep the count
#[wasm_bindgen]
pub fn stop_session() {
    with_session(|session| session.engine.reset());
}

#[wasm_bindgen]
pub fn get_punch_count() -> u32 {
    with_session(|session| session.tally.total())
}

#[wasm_bindgen]
pub fn get_left_count() -> u32 {
    with_session(|session| session.tally.count(Limb::Left))
}

#[wasm_bindgen]
pub fn get_right_count() -> u32 {
    with_session(|session| session.tally.count(Limb::Right))
}
