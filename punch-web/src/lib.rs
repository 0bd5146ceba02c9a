//! Punch Web - pose-landmark punch counter
//! 
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! The classification core (`physics`, `classifier`, `detection`) is plain
//! Rust with no JS dependency and can be driven directly through
//! [`PunchEngine`].

pub mod classifier;
pub mod config;
pub mod detection;
pub mod error;
pub mod physics;

mod bridge;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    process_pose, process_pose_json, process_no_pose,
    configure, set_punch_callback, clear_punch_callback,
    reset_counter, stop_session,
    get_punch_count, get_left_count, get_right_count,
    get_debug_overlay_text, set_verbose_logging,
};

pub use config::{ForwardMotionConfig, PunchConfig};
pub use detection::{FrameReport, LimbContext, LimbStatus, Phase, PunchEngine, PunchEvent, PunchSink, PunchTally, Rejection};
pub use error::{ConfigError, FrameError};
pub use physics::{FrameSize, Keypoint, Landmark, LandmarkFrame, Limb};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    bridge::install_console_logger(log::LevelFilter::Info);
}
