//! Detection module - per-limb punch state machines
//!
//! Re-exports only. Limb state machine in limb, frame ingestion in engine,
//! event plumbing in events.

mod engine;
mod events;
mod limb;

pub use engine::{FrameReport, PunchEngine};
pub use events::{PunchEvent, PunchSink, PunchTally};
pub use limb::{LimbContext, LimbStatus, Phase, Rejection};
