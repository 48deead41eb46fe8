//! Shared climber rig constants used by both build.rs and runtime code.
//!
//! This module is included by both the build script and the pose synthesizer
//! so compile-time validation and runtime layout agree on the same proportions.
//!
//! Rig space is 2D, y-up, origin at the hip center of the resting climber,
//! units are roughly meters.

// Some constants are only used by build.rs for validation
#![allow(dead_code)]

use glam::Vec2;

/// Hip center → shoulder line
pub const TORSO_LENGTH: f32 = 0.52;
/// Shoulder line → base of the head
pub const NECK_LENGTH: f32 = 0.08;
/// Helmet/head circle radius
pub const HEAD_RADIUS: f32 = 0.12;

pub const SHOULDER_HALF_WIDTH: f32 = 0.18;
pub const HIP_HALF_WIDTH: f32 = 0.10;

pub const UPPER_ARM: f32 = 0.30;
pub const FOREARM: f32 = 0.28;
pub const THIGH: f32 = 0.42;
pub const SHIN: f32 = 0.40;
pub const FOOT: f32 = 0.14;

/// Right-hand grip in the resting pose. The left grip mirrors it on x.
pub const REST_GRIP: Vec2 = Vec2::new(0.30, 0.98);
/// Right toe placement in the resting pose. The left foothold mirrors it on x.
pub const REST_FOOTHOLD: Vec2 = Vec2::new(0.26, -0.68);

/// Vertical drop of the body over a full slip clip
pub const SLIP_DROP: f32 = 0.28;

/// Frames per clip in generated frame sheets
pub const FRAMES_PER_CLIP: u32 = 24;
/// Fixed clip playback rate
pub const CLIP_FPS: f32 = 24.0;

/// Every clip name an external clip table may use.
pub const CLIP_NAMES: [&str; 8] = [
    "idle",
    "idle-hang",
    "reach-left",
    "reach-right",
    "reach",
    "pull-up",
    "slip",
    "fall",
];

/// Maximum reach of each limb, derived from the segment constants.
pub struct LimbReach {
    pub arm: f32,
    pub leg: f32,
}

impl LimbReach {
    pub fn from_default() -> Self {
        Self {
            arm: UPPER_ARM + FOREARM,
            leg: THIGH + SHIN + FOOT,
        }
    }
}

/// Right shoulder anchor of the resting pose
pub fn rest_shoulder() -> Vec2 {
    Vec2::new(SHOULDER_HALF_WIDTH, TORSO_LENGTH)
}

/// Right hip anchor of the resting pose
pub fn rest_hip() -> Vec2 {
    Vec2::new(HIP_HALF_WIDTH, 0.0)
}
