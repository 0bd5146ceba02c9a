//! Per-arm status for the debug overlay
//!
//! Shows why each arm did or didn't register a punch on its last frame.

use wasm_bindgen::prelude::*;

use super::session::{self, Session};
use crate::detection::{LimbContext, LimbStatus, Rejection};
use crate::physics::Limb;

/// Get formatted overlay text (called from JS to update HTML)
#[wasm_bindgen]
pub fn get_debug_overlay_text() -> String {
    session::with_session(|session| overlay_text(session))
}

pub(crate) fn overlay_text(session: &Session) -> String {
    format!(
        "Punches: {} (L {} / R {})\n{}\n{}",
        session.tally.total(),
        session.tally.count(Limb::Left),
        session.tally.count(Limb::Right),
        limb_line("L", session.engine.limb(Limb::Left)),
        limb_line("R", session.engine.limb(Limb::Right)),
    )
}

fn limb_line(label: &str, limb: &LimbContext) -> String {
    format!(
        "{}: {} | vis {} | {}",
        label,
        describe(limb.last_status()),
        limb.frames_visible(),
        if limb.is_retracted() { "armed ✓" } else { "retract ✗" },
    )
}

fn describe(status: LimbStatus) -> String {
    match status {
        LimbStatus::Idle => "waiting".to_string(),
        LimbStatus::Fired => "PUNCH".to_string(),
        LimbStatus::CoolingDown { remaining } => format!("cooldown {}", remaining),
        LimbStatus::NoPose => "no pose".to_string(),
        LimbStatus::Rejected(Rejection::TooSlow { speed }) => format!("too slow ({:.0}px)", speed),
        LimbStatus::Rejected(Rejection::NotExtended { extension }) => {
            format!("arm not extended ({:.2})", extension)
        }
        LimbStatus::Rejected(Rejection::Sideways { agreeing, quorum }) => {
            format!("sideways ({}/{})", agreeing, quorum)
        }
        LimbStatus::Rejected(rejection) => rejection.describe().to_string(),
    }
}
