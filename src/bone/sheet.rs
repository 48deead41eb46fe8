use super::clip::ClipTable;
use super::id::ClipId;
use super::pose::Pose;
use crate::synth::PoseSynthesizer;

/// Pre-rendered poses for every frame of every clip in a table.
///
/// Baked once at boot when no sprite art is supplied; frame `i` of a clip is the
/// synthesizer sampled at [`ClipSpec::sample_time`](super::ClipSpec::sample_time).
#[derive(Debug, Clone)]
pub struct FrameSheet {
    frames: [Vec<Pose>; ClipId::COUNT],
}

impl FrameSheet {
    pub fn bake(table: &ClipTable, synth: &PoseSynthesizer) -> Self {
        let mut frames: [Vec<Pose>; ClipId::COUNT] = Default::default();
        for (id, spec) in table.iter() {
            frames[id.index()] = (0..spec.frames as usize)
                .map(|i| synth.synthesize(id, spec.sample_time(i)))
                .collect();
        }
        log::debug!(
            "Baked frame sheet: {} poses",
            frames.iter().map(Vec::len).sum::<usize>()
        );
        Self { frames }
    }

    pub fn pose(&self, id: ClipId, frame: usize) -> Option<&Pose> {
        self.frames[id.index()].get(frame)
    }

    pub fn frame_count(&self, id: ClipId) -> usize {
        self.frames[id.index()].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::ClipVariation;

    #[test]
    fn test_bake_matches_table() {
        let table = ClipTable::procedural(12);
        let sheet = FrameSheet::bake(&table, &PoseSynthesizer::default());
        for (id, spec) in table.iter() {
            assert_eq!(sheet.frame_count(id), spec.frames as usize);
        }
        assert_eq!(sheet.frame_count(ClipId::PullUp), 0);
        assert!(sheet.pose(ClipId::Fall, 12).is_none());
    }

    #[test]
    fn test_one_shot_last_frame_is_end_pose() {
        let table = ClipTable::procedural(24);
        let synth = PoseSynthesizer::new(ClipVariation { fall_dir: -1.0, jitter_phase: 0.5 });
        let sheet = FrameSheet::bake(&table, &synth);
        assert_eq!(sheet.pose(ClipId::Fall, 23), Some(&synth.synthesize(ClipId::Fall, 1.0)));
        assert_eq!(sheet.pose(ClipId::Fall, 0), Some(&synth.synthesize(ClipId::Fall, 0.0)));
    }

    #[test]
    fn test_baking_twice_is_identical() {
        let table = ClipTable::procedural(24);
        let synth = PoseSynthesizer::new(ClipVariation { fall_dir: 1.0, jitter_phase: 4.0 });
        let a = FrameSheet::bake(&table, &synth);
        let b = FrameSheet::bake(&table, &synth);
        for (id, spec) in table.iter() {
            for i in 0..spec.frames as usize {
                assert_eq!(a.pose(id, i), b.pose(id, i));
            }
        }
    }
}
