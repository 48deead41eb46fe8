//! Tunable game parameters.
//!
//! Every field has a default, so a host may pass a partial JSON object (or none).

use crate::error::{BootError, Result};
use crate::skeleton_constants::{CLIP_FPS, FRAMES_PER_CLIP};
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

pub const DEFAULT_MAX_TIME: f32 = 5.0;
pub const DEFAULT_TIME_BONUS: f32 = 1.2;
pub const DEFAULT_WINDOW_SIZE: usize = 12;
pub const DEFAULT_MAX_RUN: usize = 3;
/// Largest dt a single tick may apply (seconds)
pub const DEFAULT_MAX_TICK: f32 = 0.05;

// A correct move must never refill the whole timer
const_assert!(DEFAULT_TIME_BONUS < DEFAULT_MAX_TIME);
const_assert!(DEFAULT_MAX_RUN >= 2);
const_assert!(DEFAULT_WINDOW_SIZE >= DEFAULT_MAX_RUN);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Full timer (seconds)
    pub max_time: f32,
    /// Seconds added per correct move, capped at `max_time`
    pub time_bonus: f32,
    /// Extra drain per point scored: drain = 1 + score * drain_ramp.
    /// 0 (the default) drains exactly one second per second.
    pub drain_ramp: f32,
    /// Upper bound on the drain multiplier
    pub max_drain: f32,
    /// Holds kept in the window, counted from the due one
    pub window_size: usize,
    /// A run of this many same-side holds never forms
    pub max_run: usize,
    /// Frames per generated clip
    pub frames_per_clip: u32,
    /// Clamp for a single tick's dt (seconds)
    pub max_tick: f32,
    /// How fast the feedback burst fades (per second)
    pub feedback_decay: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_time: DEFAULT_MAX_TIME,
            time_bonus: DEFAULT_TIME_BONUS,
            drain_ramp: 0.0,
            max_drain: 2.0,
            window_size: DEFAULT_WINDOW_SIZE,
            max_run: DEFAULT_MAX_RUN,
            frames_per_clip: FRAMES_PER_CLIP,
            max_tick: DEFAULT_MAX_TICK,
            feedback_decay: 4.0,
        }
    }
}

impl GameConfig {
    /// Parse from a JSON string and validate
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json).map_err(BootError::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(BootError::InvalidConfig(msg));

        if !(self.max_time > 0.0) {
            return fail(format!("max_time must be positive, got {}", self.max_time));
        }
        if !(self.time_bonus > 0.0 && self.time_bonus < self.max_time) {
            return fail(format!(
                "time_bonus must be in (0, max_time={}), got {}",
                self.max_time, self.time_bonus
            ));
        }
        if self.drain_ramp < 0.0 || self.max_drain < 1.0 {
            return fail(format!(
                "drain_ramp must be >= 0 and max_drain >= 1, got {} / {}",
                self.drain_ramp, self.max_drain
            ));
        }
        if self.max_run < 2 {
            return fail(format!("max_run must be at least 2, got {}", self.max_run));
        }
        // After a consume the window must still hold the last max_run - 1 sides
        if self.window_size < self.max_run {
            return fail(format!(
                "window_size must be at least max_run={}, got {}",
                self.max_run, self.window_size
            ));
        }
        if self.frames_per_clip == 0 {
            return fail("frames_per_clip must be at least 1".to_string());
        }
        if !(self.max_tick > 0.0) || !(self.feedback_decay >= 0.0) {
            return fail(format!(
                "max_tick must be positive and feedback_decay non-negative, got {} / {}",
                self.max_tick, self.feedback_decay
            ));
        }
        if self.max_tick > 1.0 / CLIP_FPS * 4.0 {
            log::warn!(
                "max_tick {}s lets one tick skip several animation frames",
                self.max_tick
            );
        }
        Ok(())
    }

    /// Timer drain multiplier at a given score
    pub fn drain_rate(&self, score: u32) -> f32 {
        (1.0 + score as f32 * self.drain_ramp).min(self.max_drain)
    }

    /// Clamp a raw frame delta to [0, max_tick]
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_nan() {
            return 0.0;
        }
        dt.clamp(0.0, self.max_tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "max_time": 8.0 }"#).unwrap();
        assert_eq!(config.max_time, 8.0);
        assert_eq!(config.time_bonus, DEFAULT_TIME_BONUS);
        assert_eq!(config.max_run, 3);
    }

    #[test]
    fn test_bonus_must_be_below_max() {
        let err = GameConfig::from_json(r#"{ "max_time": 2.0, "time_bonus": 2.0 }"#).unwrap_err();
        assert!(matches!(err, BootError::InvalidConfig(_)));
    }

    #[test]
    fn test_run_of_one_rejected() {
        let err = GameConfig::from_json(r#"{ "max_run": 1 }"#).unwrap_err();
        assert!(matches!(err, BootError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = GameConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, BootError::Config(_)));
    }

    #[test]
    fn test_clamp_dt() {
        let config = GameConfig::default();
        assert_eq!(config.clamp_dt(-0.3), 0.0);
        assert_eq!(config.clamp_dt(10.0), DEFAULT_MAX_TICK);
        assert_eq!(config.clamp_dt(f32::NAN), 0.0);
        assert_eq!(config.clamp_dt(0.01), 0.01);
    }

    #[test]
    fn test_window_shorter_than_run_rejected() {
        let err = GameConfig::from_json(r#"{ "window_size": 2, "max_run": 3 }"#).unwrap_err();
        assert!(matches!(err, BootError::InvalidConfig(_)));
        assert!(GameConfig::from_json(r#"{ "window_size": 3, "max_run": 3 }"#).is_ok());
    }

    #[test]
    fn test_default_drain_is_real_time() {
        let config = GameConfig::default();
        for score in [0, 5, 50, 10_000] {
            assert_eq!(config.drain_rate(score), 1.0);
        }
    }

    #[test]
    fn test_drain_ramps_and_caps() {
        let config = GameConfig {
            drain_ramp: 0.02,
            ..GameConfig::default()
        };
        assert_eq!(config.drain_rate(0), 1.0);
        assert!(config.drain_rate(10) > 1.0);
        assert_eq!(config.drain_rate(10_000), config.max_drain);
    }
}
