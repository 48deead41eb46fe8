//! Vector rasterizer for the climber
//!
//! Used when no sprite sheet is available: a pose becomes a flat list of round-capped
//! strokes the host draws with its 2D canvas. Strokes are `Pod` so the whole list can
//! be handed to JS as one `f32` buffer.

use crate::bone::{ClipId, Pose, Side};
use crate::math::Vec2;
use crate::skeleton_constants::HEAD_RADIUS;
use crate::synth::{ClipVariation, PoseSynthesizer};

/// Limb thickness in rig units
pub const LIMB_WIDTH: f32 = 0.07;
/// Torso thickness in rig units
pub const TORSO_WIDTH: f32 = 0.16;

/// What a stroke depicts, so the host can pick a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum StrokeKind {
    Torso = 0,
    Head = 1,
    NearLimb = 2,
    FarLimb = 3,
}

/// One round-capped line segment in canvas space.
///
/// A stroke with `from == to` is a filled circle of diameter `width` (the helmet).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Stroke {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub width: f32,
    /// [`StrokeKind`] discriminant, stored as f32 so the buffer is homogeneous
    pub kind: f32,
}

static_assertions::assert_eq_size!(Stroke, [f32; 6]);

/// Floats per stroke in a flattened buffer
pub const STROKE_FLOATS: usize = std::mem::size_of::<Stroke>() / std::mem::size_of::<f32>();

/// Maps rig space (y-up) onto canvas space (y-down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawTransform {
    /// Canvas position of the rig origin (resting hip center)
    pub origin: Vec2,
    /// Canvas pixels per rig unit
    pub scale: f32,
}

impl DrawTransform {
    pub fn apply(&self, p: Vec2) -> [f32; 2] {
        [self.origin.x + p.x * self.scale, self.origin.y - p.y * self.scale]
    }
}

impl Default for DrawTransform {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

/// Rasterize a pose into strokes, back-to-front.
///
/// The right side is drawn first as the far side so the left limbs overlap it.
pub fn rasterize(pose: &Pose, transform: &DrawTransform) -> Vec<Stroke> {
    let mut strokes = Vec::with_capacity(16);
    let mut segment = |a: Vec2, b: Vec2, width: f32, kind: StrokeKind| {
        strokes.push(Stroke {
            from: transform.apply(a),
            to: transform.apply(b),
            width: width * transform.scale,
            kind: kind as u32 as f32,
        });
    };

    for side in [Side::Right, Side::Left] {
        let kind = if side == Side::Left {
            StrokeKind::NearLimb
        } else {
            StrokeKind::FarLimb
        };
        let leg = pose.leg(side);
        segment(pose.hips[side.index()], leg.knee, LIMB_WIDTH, kind);
        segment(leg.knee, leg.ankle, LIMB_WIDTH, kind);
        segment(leg.ankle, leg.toe, LIMB_WIDTH * 0.8, kind);
        if side == Side::Right {
            // Torso sits between the far and near limbs
            segment(pose.torso.position, pose.neck(), TORSO_WIDTH, StrokeKind::Torso);
            segment(pose.shoulders[0], pose.shoulders[1], LIMB_WIDTH, StrokeKind::Torso);
            segment(pose.hips[0], pose.hips[1], LIMB_WIDTH, StrokeKind::Torso);
        }
        let arm = pose.arm(side);
        segment(pose.shoulders[side.index()], arm.elbow, LIMB_WIDTH, kind);
        segment(arm.elbow, arm.hand, LIMB_WIDTH, kind);
    }

    segment(pose.head, pose.head, HEAD_RADIUS * 2.0, StrokeKind::Head);
    strokes
}

/// Flatten strokes into the `f32` buffer layout the host reads
pub fn flatten(strokes: &[Stroke]) -> Vec<f32> {
    bytemuck::cast_slice::<Stroke, f32>(strokes).to_vec()
}

/// Bounds covering every pose any clip can produce, for either fall direction.
///
/// Drawing every frame through one transform fitted to this box keeps the body
/// motion (reach lift, slip drop, the fall) visible on the canvas.
pub fn rig_bounds() -> (Vec2, Vec2) {
    let mut lo = Vec2::splat(f32::MAX);
    let mut hi = Vec2::splat(f32::MIN);
    for fall_dir in [-1.0, 1.0] {
        let synth = PoseSynthesizer::new(ClipVariation {
            fall_dir,
            jitter_phase: 0.0,
        });
        for clip in ClipId::ALL {
            for i in 0..=RIG_SAMPLES {
                let (a, b) = synth.synthesize(clip, i as f32 / RIG_SAMPLES as f32).bounds();
                lo = lo.min(a);
                hi = hi.max(b);
            }
        }
    }
    (lo, hi)
}

/// Samples per clip when measuring [`rig_bounds`]
const RIG_SAMPLES: usize = 24;

/// Draw transform that fits `bounds` into a `width` x `height` box.
pub fn fit_transform(bounds: (Vec2, Vec2), width: f32, height: f32, margin: f32) -> DrawTransform {
    let (lo, hi) = bounds;
    let pad = HEAD_RADIUS + TORSO_WIDTH;
    let size = (hi - lo + Vec2::splat(pad * 2.0)).max(Vec2::splat(1e-3));
    let scale = ((width - 2.0 * margin) / size.x)
        .min((height - 2.0 * margin) / size.y)
        .max(0.0);
    let center = (lo + hi) * 0.5;
    DrawTransform {
        origin: Vec2::new(width * 0.5 - center.x * scale, height * 0.5 + center.y * scale),
        scale,
    }
}
