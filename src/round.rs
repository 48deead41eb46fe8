//! Round coordinator: timer, score, hold window and climber animation for one round.
//!
//! All round state lives here and is only mutated through `start`, `tick` and
//! `choose_side`. The renderer reads it through the accessors.

use crate::animation::{AnimationPlayer, Completion};
use crate::bone::{ClipId, ClipTable, Pose, Side};
use crate::config::GameConfig;
use crate::holds::HoldSequence;
use crate::synth::{ClipVariation, PoseSynthesizer};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Ready,
    Running,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailReason {
    WrongSide,
    Timeout,
}

/// Things that happened during a tick, for audio and effects collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RoundEvent {
    Started,
    Climbed { score: u32, side: Side },
    Failed { reason: FailReason },
    Ended { score: u32 },
}

/// What `choose_side` did with an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Correct,
    Wrong,
    /// Not running, or an animation chain is still in flight
    Ignored,
}

pub struct Round {
    config: GameConfig,
    clips: ClipTable,
    holds: HoldSequence,
    player: AnimationPlayer,
    synth: PoseSynthesizer,
    rng: SmallRng,
    phase: Phase,
    score: u32,
    time_left: f32,
    failing: Option<FailReason>,
    /// Transient scroll/feedback burst, 1 right after a correct move, decays to 0
    feedback: f32,
    events: Vec<RoundEvent>,
}

impl Round {
    /// Create a round in the Ready phase. `seed` drives hold sides and clip variation.
    pub fn new(config: GameConfig, clips: ClipTable, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let holds = HoldSequence::new(
            config.window_size,
            config.max_run,
            SmallRng::from_rng(&mut rng),
        );
        let player = AnimationPlayer::new(ClipId::Idle, &clips);
        Self {
            time_left: config.max_time,
            config,
            clips,
            holds,
            player,
            synth: PoseSynthesizer::default(),
            rng,
            phase: Phase::Ready,
            score: 0,
            failing: None,
            feedback: 0.0,
            events: Vec::new(),
        }
    }

    /// Ready/Ended → Running with a fresh window, full timer and zero score
    pub fn start(&mut self) {
        if self.phase == Phase::Running {
            return;
        }
        self.phase = Phase::Running;
        self.score = 0;
        self.time_left = self.config.max_time;
        self.failing = None;
        self.feedback = 0.0;
        self.holds.rebuild();
        self.player = AnimationPlayer::new(ClipId::Idle, &self.clips);
        self.events.push(RoundEvent::Started);
        log::info!("Round started");
    }

    /// Advance the timer, then the animation. `dt` is clamped to [0, max_tick].
    pub fn tick(&mut self, dt: f32) {
        let dt = self.config.clamp_dt(dt);

        if self.phase == Phase::Running && self.failing.is_none() {
            self.time_left -= dt * self.config.drain_rate(self.score);
            if self.time_left <= 0.0 {
                self.time_left = 0.0;
                self.fail(FailReason::Timeout);
            }
        }
        self.feedback = (self.feedback - dt * self.config.feedback_decay).max(0.0);

        if let Some(Completion::Fell) = self.player.tick(dt, &self.clips) {
            self.end();
        }
    }

    /// Apply a side choice against the due hold
    pub fn choose_side(&mut self, side: Side) -> Choice {
        if self.phase != Phase::Running || self.failing.is_some() || self.player.in_flight() {
            return Choice::Ignored;
        }
        let Some(due) = self.holds.peek_due() else {
            return Choice::Ignored;
        };

        if side != due {
            self.time_left = 0.0;
            self.fail(FailReason::WrongSide);
            return Choice::Wrong;
        }

        self.score += 1;
        self.holds.consume_due();
        self.holds.top_up();
        self.time_left = (self.time_left + self.config.time_bonus).min(self.config.max_time);
        self.feedback = 1.0;

        let chain = self.success_chain(side);
        self.player.play_chain(&chain, Some(Completion::Settled), &self.clips);
        self.events.push(RoundEvent::Climbed {
            score: self.score,
            side,
        });
        Choice::Correct
    }

    /// reach → pull-up (when the table has one) → idle
    fn success_chain(&self, side: Side) -> Vec<ClipId> {
        let mut chain = vec![ClipId::reach(side)];
        if self.clips.has_clip(ClipId::PullUp) {
            chain.push(ClipId::PullUp);
        }
        chain.push(ClipId::Idle);
        chain
    }

    fn fail(&mut self, reason: FailReason) {
        self.failing = Some(reason);
        // New fall instance, new random choices
        self.synth = PoseSynthesizer::new(ClipVariation::sample(&mut self.rng));
        self.player.play_chain(&[ClipId::Slip], Some(Completion::Fell), &self.clips);
        self.events.push(RoundEvent::Failed { reason });
        log::debug!("Round failing: {:?}", reason);
    }

    fn end(&mut self) {
        if self.phase == Phase::Ended {
            return;
        }
        self.phase = Phase::Ended;
        self.events.push(RoundEvent::Ended { score: self.score });
        log::info!("Round ended with score {}", self.score);
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pose for the current clip and frame, from the live synthesizer
    pub fn live_pose(&self) -> Pose {
        self.synth
            .synthesize(self.player.clip(), self.player.normalized_time(&self.clips))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    /// Remaining time as a fraction of the full timer
    pub fn time_fraction(&self) -> f32 {
        (self.time_left / self.config.max_time).clamp(0.0, 1.0)
    }

    pub fn failing(&self) -> Option<FailReason> {
        self.failing
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    pub fn due_side(&self) -> Option<Side> {
        self.holds.peek_due()
    }

    pub fn holds(&self) -> &HoldSequence {
        &self.holds
    }

    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    pub fn clips(&self) -> &ClipTable {
        &self.clips
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
