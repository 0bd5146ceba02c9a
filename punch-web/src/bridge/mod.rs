//! Bridge module - JS ↔ Rust communication
//! 
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod debug_ui;
mod landmarks;
mod logging;
mod session;

pub use landmarks::{process_pose, process_pose_json, process_no_pose};

pub use session::{
    configure,
    set_punch_callback,
    clear_punch_callback,
    reset_counter,
    stop_session,
    get_punch_count,
    get_left_count,
    get_right_count,
};

pub use debug_ui::get_debug_overlay_text;

pub use logging::{install_console_logger, set_verbose_logging};
