//! Procedural pose synthesis for the climber.
//!
//! Each clip is a handful of curves over normalized time: a body offset, a torso
//! lean/stretch, and a target point per hand and foot. Limbs are resolved onto
//! their targets with the two-bone solver, so bone lengths always hold.
//!
//! Output depends only on (clip, t) and the [`ClipVariation`] the synthesizer was
//! built with. Random choices (fall direction, slip jitter phase) are sampled once
//! per clip instance and never per call, which keeps baked frame sheets free of
//! popping between frames.

use crate::bone::{ArmJoints, ClipId, LegJoints, Pose, Side, TorsoTransform};
use crate::ik::{solve_two_bone, JointLimits};
use crate::math::{arc, ease_in_back, ease_in_out_sine, ease_in_quad, rotate, Vec2};
use crate::skeleton_constants::*;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Knees never hyper-extend and never fold flat
const KNEE_LIMITS: JointLimits = JointLimits { min: 0.35, max: PI };

/// Slip jitter cycles over the clip
const SLIP_JITTER_CYCLES: f32 = 14.0;
const SLIP_JITTER_AMPLITUDE: f32 = 0.035;
const FALL_DISTANCE: f32 = 2.4;

/// Random choices held fixed for one clip instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipVariation {
    /// -1 falls to the left, +1 to the right
    pub fall_dir: f32,
    /// Phase offset of the slip jitter (radians)
    pub jitter_phase: f32,
}

impl Default for ClipVariation {
    fn default() -> Self {
        Self {
            fall_dir: 1.0,
            jitter_phase: 0.0,
        }
    }
}

impl ClipVariation {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            fall_dir: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            jitter_phase: rng.random::<f32>() * TAU,
        }
    }
}

/// Targets a clip curve produces for one instant
#[derive(Debug, Clone, Copy)]
struct PoseKeys {
    offset: Vec2,
    rotation: f32,
    stretch: f32,
    hands: [Vec2; 2],
    feet: [Vec2; 2],
}

impl PoseKeys {
    fn rest() -> Self {
        Self {
            offset: Vec2::ZERO,
            rotation: 0.0,
            stretch: 1.0,
            hands: Side::BOTH.map(grip),
            feet: Side::BOTH.map(foothold),
        }
    }
}

fn grip(side: Side) -> Vec2 {
    Vec2::new(side.sign() * REST_GRIP.x, REST_GRIP.y)
}

fn foothold(side: Side) -> Vec2 {
    Vec2::new(side.sign() * REST_FOOTHOLD.x, REST_FOOTHOLD.y)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PoseSynthesizer {
    variation: ClipVariation,
}

impl PoseSynthesizer {
    pub fn new(variation: ClipVariation) -> Self {
        Self { variation }
    }

    pub fn variation(&self) -> ClipVariation {
        self.variation
    }

    /// Compose the full pose for `clip` at normalized time `t` (clamped to [0, 1]).
    pub fn synthesize(&self, clip: ClipId, t: f32) -> Pose {
        let t = t.clamp(0.0, 1.0);
        let keys = match clip {
            ClipId::Idle => idle_keys(t),
            ClipId::ReachLeft => reach_keys(Side::Left, t),
            ClipId::ReachRight => reach_keys(Side::Right, t),
            ClipId::PullUp => pull_up_keys(t),
            ClipId::Slip => slip_keys(t, self.variation),
            ClipId::Fall => fall_keys(t, self.variation),
        };
        compose(&keys)
    }
}

fn idle_keys(t: f32) -> PoseKeys {
    // Whole cycles only, so the loop seam is invisible
    let phase = TAU * t;
    PoseKeys {
        offset: Vec2::new(0.025 * phase.sin(), 0.015 * (2.0 * phase).sin()),
        rotation: 0.02 * phase.sin(),
        stretch: 1.0 + 0.012 * phase.sin(),
        ..PoseKeys::rest()
    }
}

fn reach_keys(side: Side, t: f32) -> PoseKeys {
    let w = arc(ease_in_out_sine(t));
    let s = side.sign();
    let mut keys = PoseKeys {
        offset: Vec2::new(s * 0.10 * w, 0.12 * w),
        rotation: -s * 0.14 * w,
        stretch: 1.0 + 0.05 * w,
        ..PoseKeys::rest()
    };
    keys.hands[side.index()] += Vec2::new(s * 0.12, 0.34) * w;
    keys.feet[side.index()] += Vec2::new(0.0, 0.12) * w;
    keys
}

fn pull_up_keys(t: f32) -> PoseKeys {
    let w = arc(ease_in_out_sine(t));
    let mut keys = PoseKeys {
        offset: Vec2::new(0.0, 0.22 * w),
        stretch: 1.0 - 0.06 * w,
        ..PoseKeys::rest()
    };
    for foot in &mut keys.feet {
        *foot += Vec2::new(0.0, 0.10 * w);
    }
    keys
}

fn slip_keys(t: f32, variation: ClipVariation) -> PoseKeys {
    // Envelope is zero at both ends: starts from rest, hands over cleanly to the fall
    let envelope = (t * 6.0).min(1.0) * (1.0 - t);
    let jitter = (t * SLIP_JITTER_CYCLES * TAU + variation.jitter_phase).sin()
        * SLIP_JITTER_AMPLITUDE
        * envelope;
    let drop = ease_in_quad(t) * SLIP_DROP;

    let mut keys = PoseKeys {
        offset: Vec2::new(jitter, -drop),
        rotation: jitter * 1.5,
        ..PoseKeys::rest()
    };
    for hand in &mut keys.hands {
        *hand += Vec2::new(jitter * 0.5, -drop * 0.8);
    }
    for side in Side::BOTH {
        let scrabble = (t * SLIP_JITTER_CYCLES * PI + side.index() as f32).sin().abs() * envelope;
        keys.feet[side.index()] += Vec2::new(side.sign() * jitter, 0.05 * scrabble);
    }
    keys
}

fn fall_keys(t: f32, variation: ClipVariation) -> PoseKeys {
    let e = ease_in_back(t);
    let dir = variation.fall_dir;
    // Body motion, starting from where the slip left off
    let motion = Vec2::new(dir * 0.5 * e, -FALL_DISTANCE * e);

    let mut keys = PoseKeys {
        offset: Vec2::new(0.0, -SLIP_DROP) + motion,
        rotation: dir * 1.3 * e,
        ..PoseKeys::rest()
    };
    for side in Side::BOTH {
        let i = side.index();
        // Arms flail up and out, legs dangle
        keys.hands[i] += Vec2::new(0.0, -0.8 * SLIP_DROP) + motion + Vec2::new(side.sign() * 0.15, 0.35) * e;
        keys.feet[i] += motion + Vec2::new(side.sign() * 0.10, -0.10) * e;
    }
    keys
}

/// Place the torso, then resolve every limb onto its target
fn compose(keys: &PoseKeys) -> Pose {
    let root = keys.offset;
    let up = rotate(Vec2::Y, keys.rotation);
    let right = rotate(Vec2::X, keys.rotation);

    let neck = root + up * TORSO_LENGTH * keys.stretch;
    let head = neck + up * (NECK_LENGTH + HEAD_RADIUS);
    let shoulders = Side::BOTH.map(|side| neck + right * side.sign() * SHOULDER_HALF_WIDTH);
    let hips = Side::BOTH.map(|side| root + right * side.sign() * HIP_HALF_WIDTH);

    let arms = Side::BOTH.map(|side| {
        let shoulder = shoulders[side.index()];
        // Elbows bend outwards
        let (elbow, hand) = solve_two_bone(shoulder, keys.hands[side.index()], UPPER_ARM, FOREARM, side.sign())
            .joints(shoulder, UPPER_ARM, FOREARM);
        ArmJoints { elbow, hand }
    });

    let legs = Side::BOTH.map(|side| {
        let hip = hips[side.index()];
        let toe_target = keys.feet[side.index()];
        let ankle_target = toe_target + Vec2::new(0.0, FOOT);
        // Knees bend outwards, which is the opposite rotation sense from the elbows
        let bend = -side.sign();

        let (knee, _) = solve_two_bone(hip, ankle_target, THIGH, SHIN, bend)
            .with_limits(KNEE_LIMITS)
            .joints(hip, THIGH, SHIN);
        let (ankle, toe) = solve_two_bone(knee, toe_target, SHIN, FOOT, bend).joints(knee, SHIN, FOOT);
        LegJoints { knee, ankle, toe }
    });

    Pose {
        torso: TorsoTransform {
            position: root,
            rotation: keys.rotation,
            stretch: keys.stretch,
        },
        head,
        shoulders,
        hips,
        arms,
        legs,
    }
}
