use crate::bone::{ClipId, ClipTable};
use crate::skeleton_constants::CLIP_FPS;
use std::collections::VecDeque;

/// Seconds per animation frame
pub const FRAME_DURATION: f32 = 1.0 / CLIP_FPS;

/// Notification handed back once a queued clip chain has played out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Success chain settled back into a looping clip
    Settled,
    /// Failure chain finished falling
    Fell,
}

/// Playback state - current clip, frame and the chain still to play
///
/// Only `clip()` and `frame()` are meant for the renderer; everything else is
/// bookkeeping for the fixed-rate frame advance.
#[derive(Clone, Debug)]
pub struct AnimationPlayer {
    clip: ClipId,
    frame: usize,
    /// Seconds not yet converted into whole frames
    accumulator: f32,
    /// Current clip plays once instead of looping
    one_shot: bool,
    /// One-shot reached its end and is holding the last frame
    holding: bool,
    queue: VecDeque<ClipId>,
    completion: Option<Completion>,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self {
            clip: ClipId::Idle,
            frame: 0,
            accumulator: 0.0,
            one_shot: false,
            holding: false,
            queue: VecDeque::new(),
            completion: None,
        }
    }
}

impl AnimationPlayer {
    pub fn new(clip: ClipId, table: &ClipTable) -> Self {
        let mut player = Self::default();
        player.enter(clip, table);
        player
    }

    pub fn clip(&self) -> ClipId {
        self.clip
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// A one-shot clip or queued chain is still playing
    pub fn in_flight(&self) -> bool {
        self.completion.is_some() || !self.queue.is_empty() || (self.one_shot && !self.holding)
    }

    /// Normalized time of the current frame, matching how frame sheets are sampled
    pub fn normalized_time(&self, table: &ClipTable) -> f32 {
        table.get(self.clip).map_or(0.0, |spec| spec.sample_time(self.frame))
    }

    /// Switch clips directly, dropping any queued chain. Same clip is a no-op.
    pub fn set_clip(&mut self, clip: ClipId, table: &ClipTable) {
        if clip == self.clip {
            return;
        }
        self.queue.clear();
        self.completion = None;
        self.accumulator = 0.0;
        self.enter(clip, table);
    }

    /// Play `chain` back-to-back, then hand out `completion` once it drains.
    ///
    /// The first clip always restarts, even if it is already playing.
    pub fn play_chain(&mut self, chain: &[ClipId], completion: Option<Completion>, table: &ClipTable) {
        let Some((&first, rest)) = chain.split_first() else {
            return;
        };
        self.queue = rest.iter().copied().collect();
        self.completion = completion;
        self.accumulator = 0.0;
        self.enter(first, table);
        log::debug!("Playing chain {:?} -> {:?}", chain, completion);
    }

    /// Advance by `dt` seconds at the fixed frame rate.
    ///
    /// Every whole frame in `dt` is processed in order, so a long tick can cross
    /// several clip boundaries. Returns the chain completion if it fired this tick.
    pub fn tick(&mut self, dt: f32, table: &ClipTable) -> Option<Completion> {
        if let Some(done) = self.take_if_settled(table) {
            return Some(done);
        }
        if self.holding || table.frames(self.clip) == 0 {
            return None;
        }

        self.accumulator += dt.max(0.0);
        let mut fired = None;
        while self.accumulator >= FRAME_DURATION {
            self.accumulator -= FRAME_DURATION;
            let len = table.frames(self.clip);
            if len == 0 {
                self.accumulator = 0.0;
                break;
            }
            self.frame += 1;
            if self.frame < len {
                continue;
            }
            if !self.one_shot {
                self.frame = 0;
                continue;
            }

            match self.queue.pop_front().or_else(|| self.clip.follow_up()) {
                Some(next) => {
                    self.enter(next, table);
                    if let Some(done) = self.take_if_settled(table) {
                        fired = Some(done);
                    }
                }
                None => {
                    self.frame = len - 1;
                    self.holding = true;
                    self.accumulator = 0.0;
                    fired = self.completion.take();
                    break;
                }
            }
        }
        fired
    }

    /// Fire the pending completion once the chain has reached a looping clip
    fn take_if_settled(&mut self, table: &ClipTable) -> Option<Completion> {
        if self.queue.is_empty() && !self.one_shot && table.frames(self.clip) > 0 {
            self.completion.take()
        } else {
            None
        }
    }

    /// Start `clip` at frame 0. The accumulator is left alone so leftover time carries over.
    fn enter(&mut self, clip: ClipId, table: &ClipTable) {
        self.clip = clip;
        self.frame = 0;
        self.holding = false;
        self.one_shot = !table.is_looping(clip);
        if table.frames(clip) == 0 {
            log::warn!("Clip '{}' has no frames; playback paused", table.name(clip));
        }
        log::debug!("Clip -> {}", table.name(clip));
    }
}
