use super::id::Side;
use crate::math::Vec2;

/// Torso placement: hip center, lean angle and spine stretch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsoTransform {
    /// Hip center in rig space
    pub position: Vec2,
    /// Counter-clockwise lean in radians (0 = upright)
    pub rotation: f32,
    /// Spine length multiplier
    pub stretch: f32,
}

impl Default for TorsoTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            stretch: 1.0,
        }
    }
}

/// Resolved arm joints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmJoints {
    pub elbow: Vec2,
    pub hand: Vec2,
}

/// Resolved leg joints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegJoints {
    pub knee: Vec2,
    pub ankle: Vec2,
    pub toe: Vec2,
}

/// Fully resolved skeleton snapshot.
///
/// Built fresh for every (clip, normalized time) sample and never mutated afterwards.
/// Per-side arrays are indexed by [`Side::index`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub torso: TorsoTransform,
    /// Center of the helmet/head circle
    pub head: Vec2,
    pub shoulders: [Vec2; 2],
    pub hips: [Vec2; 2],
    pub arms: [ArmJoints; 2],
    pub legs: [LegJoints; 2],
}

impl Pose {
    /// Top of the spine (midpoint of the shoulder line)
    pub fn neck(&self) -> Vec2 {
        (self.shoulders[0] + self.shoulders[1]) * 0.5
    }

    pub fn arm(&self, side: Side) -> &ArmJoints {
        &self.arms[side.index()]
    }

    pub fn leg(&self, side: Side) -> &LegJoints {
        &self.legs[side.index()]
    }

    /// Every joint position, anchors first
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        let anchors = [self.torso.position, self.head]
            .into_iter()
            .chain(self.shoulders)
            .chain(self.hips);
        let arms = self.arms.iter().flat_map(|a| [a.elbow, a.hand]);
        let legs = self.legs.iter().flat_map(|l| [l.knee, l.ankle, l.toe]);
        anchors.chain(arms).chain(legs)
    }

    /// Axis-aligned bounds of all joints: (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        self.points().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), p| (lo.min(p), hi.max(p)),
        )
    }
}
