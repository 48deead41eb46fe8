use crate::math::{Vec2, EPSILON};
use std::f32::consts::PI;

/// Interior angle range for the middle joint of a limb (radians).
///
/// `PI` is a straight limb, `0` fully folded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimits {
    pub min: f32,
    pub max: f32,
}

impl JointLimits {
    pub const FREE: JointLimits = JointLimits { min: 0.0, max: PI };

    pub fn clamp(&self, interior: f32) -> f32 {
        interior.clamp(self.min, self.max)
    }
}

/// Result of a two-bone solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBoneSolution {
    /// Absolute angle of the first segment (root → middle joint)
    pub angle1: f32,
    /// Interior angle at the middle joint
    pub angle2: f32,
    /// Bend direction the solve was made with (±1)
    pub bend: f32,
}

impl TwoBoneSolution {
    /// Absolute angle of the second segment (middle joint → end effector)
    pub fn angle_out(&self) -> f32 {
        self.angle1 + self.bend * (PI - self.angle2)
    }

    /// Resolve joint positions for the chain: (middle joint, end effector)
    pub fn joints(&self, root: Vec2, len1: f32, len2: f32) -> (Vec2, Vec2) {
        let mid = root + Vec2::from_angle(self.angle1) * len1;
        let end = mid + Vec2::from_angle(self.angle_out()) * len2;
        (mid, end)
    }

    /// Clamp the middle-joint bend, keeping the first segment's bearing.
    pub fn with_limits(self, limits: JointLimits) -> Self {
        Self {
            angle2: limits.clamp(self.angle2),
            ..self
        }
    }
}

/// Solve two-bone IK analytically (law of cosines).
///
/// # Arguments
/// * `root` - Fixed start of the chain
/// * `target` - Desired end effector position
/// * `len1`, `len2` - Segment lengths
/// * `bend` - +1 bends the middle joint clockwise of the root→target line, -1 counter-clockwise
///
/// Targets out of reach are not an error: the cosine ratios are clamped to [-1, 1],
/// which yields a fully extended (or fully folded) limb pointing at the target.
pub fn solve_two_bone(root: Vec2, target: Vec2, len1: f32, len2: f32, bend: f32) -> TwoBoneSolution {
    let to_target = target - root;
    let dist = to_target.length().max(EPSILON);
    let bearing = to_target.y.atan2(to_target.x);
    let bend = if bend < 0.0 { -1.0 } else { 1.0 };

    // Angle at the root between root→target and root→middle joint
    let cos_root = ((len1 * len1 + dist * dist - len2 * len2) / (2.0 * len1 * dist)).clamp(-1.0, 1.0);
    // Interior angle at the middle joint
    let cos_mid = ((len1 * len1 + len2 * len2 - dist * dist) / (2.0 * len1 * len2)).clamp(-1.0, 1.0);

    TwoBoneSolution {
        angle1: bearing - bend * cos_root.acos(),
        angle2: cos_mid.acos(),
        bend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_bone_reachable_target() {
        let root = Vec2::ZERO;
        let target = Vec2::new(1.0, 1.0);
        let solution = solve_two_bone(root, target, 1.0, 1.0, 1.0);
        let (mid, end) = solution.joints(root, 1.0, 1.0);

        assert!(end.distance(target) < 1e-4, "end effector missed: {:?}", end);
        assert!((root.distance(mid) - 1.0).abs() < 1e-4);
        assert!((mid.distance(end) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_two_bone_unreachable_target_extends() {
        let root = Vec2::ZERO;
        let target = Vec2::new(5.0, 0.0);
        let solution = solve_two_bone(root, target, 1.0, 1.0, 1.0);
        let (mid, end) = solution.joints(root, 1.0, 1.0);

        assert!(solution.angle2.is_finite());
        assert!((solution.angle2 - PI).abs() < 1e-3, "limb should be straight");
        assert!(mid.distance(Vec2::new(1.0, 0.0)) < 1e-3);
        assert!(end.distance(Vec2::new(2.0, 0.0)) < 1e-3);
    }

    #[test]
    fn test_two_bone_too_close_folds() {
        let root = Vec2::ZERO;
        let solution = solve_two_bone(root, Vec2::new(0.1, 0.0), 1.0, 0.5, 1.0);
        let (_, end) = solution.joints(root, 1.0, 0.5);

        assert!(solution.angle2.abs() < 1e-3, "limb should be folded");
        assert!((root.distance(end) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_two_bone_coincident_target_is_finite() {
        let solution = solve_two_bone(Vec2::ONE, Vec2::ONE, 0.3, 0.3, -1.0);
        assert!(solution.angle1.is_finite());
        assert!(solution.angle2.is_finite());
    }

    #[test]
    fn test_bend_sign_mirrors_middle_joint() {
        let root = Vec2::ZERO;
        let target = Vec2::new(0.0, 1.2);
        let (mid_pos, _) = solve_two_bone(root, target, 1.0, 1.0, 1.0).joints(root, 1.0, 1.0);
        let (mid_neg, _) = solve_two_bone(root, target, 1.0, 1.0, -1.0).joints(root, 1.0, 1.0);

        // Target straight up: bend +1 rotates the elbow clockwise (towards +x)
        assert!(mid_pos.x > 0.0);
        assert!(mid_neg.x < 0.0);
        assert!((mid_pos.x + mid_neg.x).abs() < 1e-4);
    }

    #[test]
    fn test_limits_clamp_bend() {
        let limits = JointLimits { min: 0.5, max: 2.5 };
        let solution = solve_two_bone(Vec2::ZERO, Vec2::new(3.0, 0.0), 1.0, 1.0, 1.0).with_limits(limits);
        assert!((solution.angle2 - 2.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_reachable_targets_are_hit(
            len1 in 0.2f32..2.0,
            len2 in 0.2f32..2.0,
            bearing in -PI..PI,
            frac in 0.1f32..0.9,
            bend in prop::bool::ANY,
        ) {
            let min_reach = (len1 - len2).abs();
            let max_reach = len1 + len2;
            let dist = min_reach + (max_reach - min_reach) * frac;
            let root = Vec2::new(0.5, -0.25);
            let target = root + Vec2::from_angle(bearing) * dist;

            let solution = solve_two_bone(root, target, len1, len2, if bend { 1.0 } else { -1.0 });
            let (_, end) = solution.joints(root, len1, len2);

            // Law of cosines distance agrees with the resolved geometry
            let expected = (len1 * len1 + len2 * len2 - 2.0 * len1 * len2 * solution.angle2.cos()).sqrt();
            prop_assert!((root.distance(end) - expected).abs() < 2e-3);
            prop_assert!(end.distance(target) < 2e-3);
        }
    }
}
