use super::id::{ClipId, ClipNaming};
use crate::error::{BootError, Result};
use crate::skeleton_constants::FRAMES_PER_CLIP;
use serde::Deserialize;

// ============================================================================
// Clip table
// ============================================================================

/// Frame count and playback mode of one clip, plus where its frames live in a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipSpec {
    pub frames: u32,
    pub looping: bool,
    /// Sprite sheet row holding this clip's frames
    pub row: u32,
    /// Frames are drawn flipped horizontally (shared `reach` row used for the right side)
    pub mirrored: bool,
}

impl ClipSpec {
    /// Normalized time sampled for a frame.
    ///
    /// Looping clips use `i / n` so the wrap back to frame 0 is not a duplicate;
    /// one-shots use `i / (n - 1)` so the last frame is the end pose.
    pub fn sample_time(&self, frame: usize) -> f32 {
        let n = self.frames as usize;
        if n <= 1 {
            return 0.0;
        }
        if self.looping {
            frame as f32 / n as f32
        } else {
            (frame.min(n - 1)) as f32 / (n - 1) as f32
        }
    }
}

/// Source rectangle of one frame in a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SpriteRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub mirrored: bool,
}

/// Clip table - loaded once, shared read-only during playback
///
/// Fixed size array indexed by ClipId, same as the sprite sheet rows.
#[derive(Debug, Clone)]
pub struct ClipTable {
    clips: [Option<ClipSpec>; ClipId::COUNT],
    naming: ClipNaming,
    frame_width: u32,
    frame_height: u32,
}

/// JSON format for an external clip table
#[derive(Debug, Clone, Deserialize)]
pub struct ClipTableJson {
    #[serde(default = "default_frame_size")]
    pub frame_width: u32,
    #[serde(default = "default_frame_size")]
    pub frame_height: u32,
    pub clips: Vec<ClipEntryJson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClipEntryJson {
    pub name: String,
    pub frames: u32,
    #[serde(default, rename = "loop")]
    pub looping: bool,
}

fn default_frame_size() -> u32 {
    128
}

impl ClipTable {
    /// Create an empty table
    pub fn new(naming: ClipNaming, frame_width: u32, frame_height: u32) -> Self {
        Self {
            clips: [None; ClipId::COUNT],
            naming,
            frame_width,
            frame_height,
        }
    }

    /// Table used when no art is supplied: the five generated clips, idle looping.
    pub fn procedural(frames: u32) -> Self {
        let mut table = Self::new(ClipNaming::Procedural, default_frame_size(), default_frame_size());
        for (row, id) in ClipId::REQUIRED.into_iter().enumerate() {
            table.add_clip(
                id,
                ClipSpec {
                    frames,
                    looping: id == ClipId::Idle,
                    row: row as u32,
                    mirrored: false,
                },
            );
        }
        table
    }

    /// Parse an external table. Entries are sprite rows in file order.
    ///
    /// Unknown names are skipped with a warning; a missing required clip is fatal.
    pub fn from_json(json: &str) -> Result<Self> {
        let table_json: ClipTableJson = serde_json::from_str(json).map_err(BootError::ClipTable)?;
        Self::from_entries(table_json)
    }

    pub fn from_entries(table_json: ClipTableJson) -> Result<Self> {
        let naming = if table_json.clips.iter().any(|c| c.name == "reach" || c.name == "idle-hang") {
            ClipNaming::Sprite
        } else {
            ClipNaming::Procedural
        };
        let mut table = Self::new(naming, table_json.frame_width, table_json.frame_height);

        for (row, entry) in table_json.clips.iter().enumerate() {
            let ids = ClipId::from_name(&entry.name);
            if ids.is_empty() {
                log::warn!("Ignoring unknown clip '{}' in clip table", entry.name);
                continue;
            }
            if entry.frames == 0 {
                log::warn!("Clip '{}' has no frames; it will not animate", entry.name);
            }
            for &id in ids {
                table.add_clip(
                    id,
                    ClipSpec {
                        frames: entry.frames,
                        looping: entry.looping,
                        row: row as u32,
                        mirrored: entry.name == "reach" && id == ClipId::ReachRight,
                    },
                );
            }
        }

        for id in ClipId::REQUIRED {
            if !table.has_clip(id) {
                return Err(BootError::MissingClip(id));
            }
        }
        Ok(table)
    }

    pub fn add_clip(&mut self, id: ClipId, spec: ClipSpec) {
        self.clips[id.index()] = Some(spec);
    }

    pub fn get(&self, id: ClipId) -> Option<&ClipSpec> {
        self.clips[id.index()].as_ref()
    }

    pub fn has_clip(&self, id: ClipId) -> bool {
        self.clips[id.index()].is_some()
    }

    /// Frame count, 0 when the clip is absent
    pub fn frames(&self, id: ClipId) -> usize {
        self.get(id).map_or(0, |spec| spec.frames as usize)
    }

    pub fn is_looping(&self, id: ClipId) -> bool {
        self.get(id).is_some_and(|spec| spec.looping)
    }

    pub fn naming(&self) -> ClipNaming {
        self.naming
    }

    pub fn name(&self, id: ClipId) -> &'static str {
        id.name(self.naming)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClipId, &ClipSpec)> {
        ClipId::ALL
            .into_iter()
            .filter_map(move |id| self.get(id).map(|spec| (id, spec)))
    }

    /// Sprite sheet rectangle for a frame. Out-of-range frames clamp to the last one.
    pub fn region(&self, id: ClipId, frame: usize) -> Option<SpriteRegion> {
        let spec = self.get(id)?;
        if spec.frames == 0 {
            return None;
        }
        let column = frame.min(spec.frames as usize - 1) as u32;
        Some(SpriteRegion {
            x: column * self.frame_width,
            y: spec.row * self.frame_height,
            width: self.frame_width,
            height: self.frame_height,
            mirrored: spec.mirrored,
        })
    }
}

impl Default for ClipTable {
    fn default() -> Self {
        Self::procedural(FRAMES_PER_CLIP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPRITE_TABLE: &str = include_str!("../../assets/clips/climber-sprite.json");

    #[test]
    fn test_procedural_table_has_five_clips() {
        let table = ClipTable::procedural(24);
        assert_eq!(table.iter().count(), 5);
        assert!(table.is_looping(ClipId::Idle));
        for id in [ClipId::ReachLeft, ClipId::ReachRight, ClipId::Slip, ClipId::Fall] {
            assert_eq!(table.frames(id), 24);
            assert!(!table.is_looping(id));
        }
        assert!(!table.has_clip(ClipId::PullUp));
        assert_eq!(table.name(ClipId::ReachLeft), "reach-left");
    }

    #[test]
    fn test_sprite_table_shares_mirrored_reach_row() {
        let table = ClipTable::from_json(SPRITE_TABLE).unwrap();
        assert_eq!(table.naming(), ClipNaming::Sprite);
        assert!(table.has_clip(ClipId::PullUp));

        let left = table.get(ClipId::ReachLeft).unwrap();
        let right = table.get(ClipId::ReachRight).unwrap();
        assert_eq!(left.row, right.row);
        assert!(!left.mirrored);
        assert!(right.mirrored);
        assert_eq!(table.name(ClipId::Idle), "idle-hang");
    }

    #[test]
    fn test_missing_required_clip_is_fatal() {
        let json = r#"{ "clips": [ { "name": "idle", "frames": 4, "loop": true } ] }"#;
        let err = ClipTable::from_json(json).unwrap_err();
        assert!(matches!(err, BootError::MissingClip(ClipId::ReachLeft)));
    }

    #[test]
    fn test_unknown_names_are_skipped() {
        let json = r#"{ "clips": [
            { "name": "idle", "frames": 4, "loop": true },
            { "name": "wave", "frames": 4 },
            { "name": "reach-left", "frames": 4 },
            { "name": "reach-right", "frames": 4 },
            { "name": "slip", "frames": 4 },
            { "name": "fall", "frames": 4 }
        ] }"#;
        let table = ClipTable::from_json(json).unwrap();
        assert_eq!(table.iter().count(), 5);
        // Rows follow file order, including the skipped entry
        assert_eq!(table.get(ClipId::ReachLeft).unwrap().row, 2);
    }

    #[test]
    fn test_region_clamps_frame() {
        let table = ClipTable::procedural(24);
        let region = table.region(ClipId::Slip, 99).unwrap();
        assert_eq!(region.x, 23 * 128);
        assert_eq!(region.y, 3 * 128);
    }

    #[test]
    fn test_sample_time_spacing() {
        let looping = ClipSpec { frames: 4, looping: true, row: 0, mirrored: false };
        let one_shot = ClipSpec { looping: false, ..looping };
        assert_eq!(looping.sample_time(3), 0.75);
        assert_eq!(one_shot.sample_time(3), 1.0);
        assert_eq!(one_shot.sample_time(0), 0.0);
    }
}
