//! Summit Reflex - Wasm Core
//!
//! Game core for a two-button climbing reflex game: hold sequence, round timer,
//! a 2D climber rig driven by two-bone IK, and fixed-rate clip playback.
//! Drawing, audio and input capture belong to the host page.

pub mod animation;
pub mod bone;
pub mod config;
pub mod error;
pub mod holds;
pub mod ik;
mod math;
pub mod round;
pub mod skeleton;
mod skeleton_constants;
pub mod state;
pub mod synth;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{
    best_score, boot, drain_events, frame, pose_strokes, queue_side, render_state,
    set_best_score, start_round, stroke_floats,
};

pub use animation::{AnimationPlayer, Completion};
pub use bone::{ClipId, ClipTable, FrameSheet, Pose, Side};
pub use config::GameConfig;
pub use error::BootError;
pub use holds::{Hold, HoldSequence};
pub use math::Vec2;
pub use round::{Choice, FailReason, Phase, Round, RoundEvent};
pub use synth::{ClipVariation, PoseSynthesizer};

/// Install the panic hook and console logger. Safe to call more than once.
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            console_log::init_with_level(log::Level::Info).ok();
        } else {
            // Native builds (tests, tools) bring their own logger, if any
        }
    }
}
