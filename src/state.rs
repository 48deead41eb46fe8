//! Centralized application state with context passing pattern
//!
//! `AppState` owns the running round plus everything the host needs between
//! frames. Core logic (`Round`, `HoldSequence`, `AnimationPlayer`) takes explicit
//! references and never touches the global; only the wasm bindings in `web`
//! go through `with_app_state*`.

use std::cell::RefCell;

use crate::bone::{ClipId, FrameSheet, Pose, Side, SpriteRegion};
use crate::holds::Hold;
use crate::math::Vec2;
use crate::round::{Choice, FailReason, Phase, Round, RoundEvent};
use crate::skeleton::{self, Stroke};
use serde::Serialize;

/// Persistence seam for the best score. The host supplies storage.
pub trait Scoreboard {
    fn best(&self) -> u32;
    /// Record a finished round. Returns true if it set a new best.
    fn submit(&mut self, score: u32) -> bool;
}

/// In-memory scoreboard, seeded from whatever the host loaded
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreboard {
    best: u32,
}

impl MemoryScoreboard {
    pub fn with_best(best: u32) -> Self {
        Self { best }
    }
}

impl Scoreboard for MemoryScoreboard {
    fn best(&self) -> u32 {
        self.best
    }

    fn submit(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}

/// Everything the renderer reads for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderState {
    pub phase: Phase,
    pub score: u32,
    pub best: u32,
    pub time_fraction: f32,
    pub feedback: f32,
    pub failing: Option<FailReason>,
    pub clip: &'static str,
    pub frame: usize,
    pub sprite: Option<SpriteRegion>,
    /// Window from the due hold upwards
    pub holds: Vec<HoldView>,
}

/// A hold as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoldView {
    #[serde(flatten)]
    pub hold: Hold,
    /// The one hold a correct move must match right now
    pub due: bool,
}

pub struct AppState {
    pub round: Round,
    /// Side pressed since the last frame, applied after the tick
    pending: Option<Side>,
    pub scoreboard: Box<dyn Scoreboard>,
    /// Pre-sampled poses for vector drawing; `None` when sprite art is used
    pub sheet: Option<FrameSheet>,
    /// Round end already reported to the scoreboard
    recorded: bool,
    /// Box every clip frame fits in; one draw transform for the whole round
    rig: (Vec2, Vec2),
}

impl AppState {
    pub fn new(round: Round, scoreboard: Box<dyn Scoreboard>, sheet: Option<FrameSheet>) -> Self {
        Self {
            round,
            pending: None,
            scoreboard,
            sheet,
            recorded: false,
            rig: skeleton::rig_bounds(),
        }
    }

    /// Remember a side press. A later press in the same frame wins.
    pub fn queue_side(&mut self, side: Side) {
        self.pending = Some(side);
    }

    pub fn start_round(&mut self) {
        self.pending = None;
        self.recorded = false;
        self.round.start();
    }

    /// One host frame: tick the round, apply buffered input, record the end.
    pub fn frame(&mut self, dt: f32) -> Option<Choice> {
        self.round.tick(dt);
        let choice = self.pending.take().map(|side| self.round.choose_side(side));

        if self.round.phase() == Phase::Ended && !self.recorded {
            self.recorded = true;
            if self.scoreboard.submit(self.round.score()) {
                log::info!("New best: {}", self.round.score());
            }
        }
        choice
    }

    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        self.round.drain_events()
    }

    /// Pose to draw this frame: baked sheet when present, live synthesis otherwise.
    ///
    /// Failure clips always come from the live synthesizer so the per-fall
    /// variation shows.
    pub fn current_pose(&self) -> Pose {
        let player = self.round.player();
        let baked = match player.clip() {
            ClipId::Slip | ClipId::Fall => None,
            clip => self
                .sheet
                .as_ref()
                .and_then(|sheet| sheet.pose(clip, player.frame()).copied()),
        };
        baked.unwrap_or_else(|| self.round.live_pose())
    }

    /// Current pose as strokes on a `width` x `height` canvas.
    ///
    /// The transform depends only on the canvas size, so body motion between
    /// frames shows up as motion on screen.
    pub fn pose_strokes(&self, width: f32, height: f32) -> Vec<Stroke> {
        let pose = self.current_pose();
        let transform = skeleton::fit_transform(self.rig, width, height, 4.0);
        skeleton::rasterize(&pose, &transform)
    }

    pub fn render_state(&self) -> RenderState {
        let round = &self.round;
        let player = round.player();
        RenderState {
            phase: round.phase(),
            score: round.score(),
            best: self.scoreboard.best(),
            time_fraction: round.time_fraction(),
            feedback: round.feedback(),
            failing: round.failing(),
            clip: round.clips().name(player.clip()),
            frame: player.frame(),
            sprite: round.clips().region(player.clip(), player.frame()),
            holds: round
                .holds()
                .iter()
                .enumerate()
                .map(|(i, &hold)| HoldView { hold, due: i == 0 })
                .collect(),
        }
    }
}

// Global state access, thin wrapper for WASM bindings only
thread_local! {
    static APP_STATE: RefCell<Option<AppState>> = const { RefCell::new(None) };
}

/// Execute a closure with immutable access to AppState
///
/// Returns None if AppState is not initialized
pub fn with_app_state<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&AppState) -> R,
{
    APP_STATE.with(|state| {
        let borrowed = state.borrow();
        borrowed.as_ref().map(f)
    })
}

/// Execute a closure with mutable access to AppState
///
/// Returns None if AppState is not initialized
pub fn with_app_state_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut AppState) -> R,
{
    APP_STATE.with(|state| {
        let mut borrowed = state.borrow_mut();
        borrowed.as_mut().map(f)
    })
}

/// Install the global AppState. Called once at boot.
pub fn initialize_app_state(app: AppState) {
    APP_STATE.with(|state| {
        *state.borrow_mut() = Some(app);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::FRAME_DURATION;
    use crate::bone::ClipTable;
    use crate::config::GameConfig;
    use crate::synth::PoseSynthesizer;

    fn app(seed: u64) -> AppState {
        let round = Round::new(GameConfig::default(), ClipTable::default(), seed);
        AppState::new(round, Box::new(MemoryScoreboard::default()), None)
    }

    #[test]
    fn test_input_applies_after_tick() {
        let mut app = app(1);
        app.start_round();
        let due = app.round.due_side().unwrap();

        app.queue_side(due.opposite());
        app.queue_side(due);
        assert_eq!(app.frame(0.016), Some(Choice::Correct));
        assert_eq!(app.round.score(), 1);
        // Buffer is single-use
        assert_eq!(app.frame(0.016), None);
    }

    #[test]
    fn test_round_end_submits_once() {
        let mut app = app(2);
        app.start_round();
        let due = app.round.due_side().unwrap();
        app.queue_side(due);
        app.frame(0.0);
        for _ in 0..48 {
            app.frame(FRAME_DURATION);
        }
        let wrong = app.round.due_side().unwrap().opposite();
        app.queue_side(wrong);
        assert_eq!(app.frame(0.0), Some(Choice::Wrong));
        for _ in 0..100 {
            app.frame(FRAME_DURATION);
        }
        assert_eq!(app.round.phase(), Phase::Ended);
        assert_eq!(app.scoreboard.best(), 1);

        // A worse second round leaves the best alone
        app.start_round();
        let wrong = app.round.due_side().unwrap().opposite();
        app.queue_side(wrong);
        for _ in 0..100 {
            app.frame(FRAME_DURATION);
        }
        assert_eq!(app.round.phase(), Phase::Ended);
        assert_eq!(app.scoreboard.best(), 1);
    }

    #[test]
    fn test_memory_scoreboard() {
        let mut board = MemoryScoreboard::with_best(5);
        assert!(!board.submit(3));
        assert!(!board.submit(5));
        assert!(board.submit(6));
        assert_eq!(board.best(), 6);
    }

    #[test]
    fn test_baked_sheet_matches_live_pose_for_idle() {
        let round = Round::new(GameConfig::default(), ClipTable::default(), 3);
        let sheet = FrameSheet::bake(round.clips(), &PoseSynthesizer::default());
        let app = AppState::new(round, Box::new(MemoryScoreboard::default()), Some(sheet));
        assert_eq!(app.round.player().clip(), ClipId::Idle);
        assert_eq!(app.current_pose(), app.round.live_pose());
    }

    #[test]
    fn test_render_state_snapshot() {
        let mut app = app(4);
        app.start_round();
        let state = app.render_state();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.clip, "idle");
        assert_eq!(state.holds.len(), GameConfig::default().window_size);
        assert_eq!(state.time_fraction, 1.0);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["phase"], "running");
    }

    #[test]
    fn test_render_state_flags_due_hold() {
        let mut app = app(7);
        app.start_round();
        let state = app.render_state();
        assert!(state.holds[0].due);
        assert_eq!(Some(state.holds[0].hold.side), app.round.due_side());
        assert!(state.holds[1..].iter().all(|h| !h.due));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["holds"][0]["due"], true);
        assert!(json["holds"][0]["side"].is_string());
    }

    #[test]
    fn test_pose_strokes_keep_one_transform_through_fall() {
        let mut app = app(8);
        app.start_round();
        let wrong = app.round.due_side().unwrap().opposite();
        app.queue_side(wrong);
        app.frame(0.0);
        for _ in 0..24 {
            app.frame(FRAME_DURATION);
        }
        assert_eq!(app.round.player().clip(), ClipId::Fall);
        let start = app.pose_strokes(200.0, 300.0);
        for _ in 0..23 {
            app.frame(FRAME_DURATION);
        }
        assert_eq!(app.round.player().frame(), 23);
        let end = app.pose_strokes(200.0, 300.0);

        // Same scale: the helmet keeps its size
        let head_width = |strokes: &[Stroke]| strokes.last().map(|s| s.width);
        assert_eq!(head_width(&start), head_width(&end));
        // The climber drops down the canvas
        let head_y = |strokes: &[Stroke]| strokes.last().map_or(0.0, |s| s.from[1]);
        assert!(head_y(&end) > head_y(&start));
    }

    #[test]
    fn test_pose_strokes_fit_canvas() {
        let app = app(5);
        let strokes = app.pose_strokes(200.0, 300.0);
        assert!(!strokes.is_empty());
        for s in &strokes {
            assert!((0.0..=200.0).contains(&s.from[0]));
            assert!((0.0..=300.0).contains(&s.from[1]));
        }
    }

    #[test]
    fn test_global_state_roundtrip() {
        assert!(with_app_state(|s| s.round.score()).is_none());
        initialize_app_state(app(6));
        with_app_state_mut(|s| s.start_round());
        assert_eq!(with_app_state(|s| s.round.phase()), Some(Phase::Running));
    }
}
