use serde::Serialize;

/// Which side of the climber a hold (or a limb) is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// -1 for left, +1 for right (rig x axis)
    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Decode a host-side code (0 = left, 1 = right). Anything else is not a side.
    pub fn from_code(code: u8) -> Option<Side> {
        match code {
            0 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }
}

/// Which set of clip names a table uses.
///
/// `Procedural` is the generated frame sheet (idle, reach-left, reach-right, slip, fall).
/// `Sprite` is the hand-drawn sheet (idle-hang, mirrored reach, pull-up, slip, fall).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipNaming {
    #[default]
    Procedural,
    Sprite,
}

/// Identifier for each animation clip the climber can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ClipId {
    Idle = 0,
    ReachLeft = 1,
    ReachRight = 2,
    PullUp = 3,
    Slip = 4,
    Fall = 5,
}

impl ClipId {
    pub const COUNT: usize = 6;

    pub const ALL: [ClipId; Self::COUNT] = [
        ClipId::Idle,
        ClipId::ReachLeft,
        ClipId::ReachRight,
        ClipId::PullUp,
        ClipId::Slip,
        ClipId::Fall,
    ];

    /// Clips every table must provide for a round to be playable
    pub const REQUIRED: [ClipId; 5] = [
        ClipId::Idle,
        ClipId::ReachLeft,
        ClipId::ReachRight,
        ClipId::Slip,
        ClipId::Fall,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn reach(side: Side) -> ClipId {
        match side {
            Side::Left => ClipId::ReachLeft,
            Side::Right => ClipId::ReachRight,
        }
    }

    /// Clip that automatically follows this one when it ends with nothing queued
    pub const fn follow_up(self) -> Option<ClipId> {
        match self {
            ClipId::Slip => Some(ClipId::Fall),
            _ => None,
        }
    }

    pub const fn name(self, naming: ClipNaming) -> &'static str {
        match (self, naming) {
            (ClipId::Idle, ClipNaming::Procedural) => "idle",
            (ClipId::Idle, ClipNaming::Sprite) => "idle-hang",
            (ClipId::ReachLeft, ClipNaming::Procedural) => "reach-left",
            (ClipId::ReachRight, ClipNaming::Procedural) => "reach-right",
            (ClipId::ReachLeft | ClipId::ReachRight, ClipNaming::Sprite) => "reach",
            (ClipId::PullUp, _) => "pull-up",
            (ClipId::Slip, _) => "slip",
            (ClipId::Fall, _) => "fall",
        }
    }

    /// Clips a table entry name stands for. `reach` covers both sides.
    pub fn from_name(name: &str) -> &'static [ClipId] {
        match name {
            "idle" | "idle-hang" => &[ClipId::Idle],
            "reach-left" => &[ClipId::ReachLeft],
            "reach-right" => &[ClipId::ReachRight],
            "reach" => &[ClipId::ReachLeft, ClipId::ReachRight],
            "pull-up" => &[ClipId::PullUp],
            "slip" => &[ClipId::Slip],
            "fall" => &[ClipId::Fall],
            _ => &[],
        }
    }
}
