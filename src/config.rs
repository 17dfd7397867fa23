//! Game tuning constants.
//!
//! Every value has a fixed default matching the shipped game; `GameConfig` only
//! exists so tests and embedders can pick the alternate tempo or toggle the
//! decoy / idle-beat variants without recompiling.

use thiserror::Error;

pub const GRID_WIDTH: u8 = 10;
pub const GRID_HEIGHT: u8 = 9;
pub const BEATS_PER_CYCLE: u8 = 8;
pub const DEFAULT_BPM: f64 = 128.0;
/// Faster tempo used by the alternate build of the game.
pub const FAST_BPM: f64 = 140.0;
pub const PERFECT_WINDOW_MS: f64 = 100.0;
pub const GOOD_WINDOW_MS: f64 = 200.0;
pub const COMBO_MILESTONE: u32 = 5;
pub const ACTION_RESET_MS: f64 = 300.0;
pub const FEEDBACK_MS: f64 = 300.0;
pub const START_POSITION: (u8, u8) = (1, 4);
pub const DECOY_OFFSET_RANGE: (i32, i32) = (1, 10);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u8, height: u8 },

    #[error("a cycle needs at least 2 beats, got {0}")]
    TooFewBeats(u8),

    #[error("tempo must be a positive finite BPM, got {0}")]
    InvalidTempo(f64),

    #[error("timing windows must satisfy 0 <= perfect ({perfect}) <= good ({good})")]
    InvalidWindows { perfect: f64, good: f64 },

    #[error("decoy offsets must satisfy 0 <= min ({min}) <= max ({max})")]
    InvalidDecoyOffsets { min: i32, max: i32 },

    #[error("{name} must be a finite non-negative delay, got {value}")]
    InvalidDelay { name: &'static str, value: f64 },

    #[error("combo milestone must be non-zero")]
    ZeroMilestone,

    #[error("start position ({x},{y}) lies outside the {width}x{height} grid")]
    StartOutOfBounds { x: u8, y: u8, width: u8, height: u8 },

    #[cfg(feature = "serde_json")]
    #[error("config JSON error: {0}")]
    Json(String),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub grid_width: u8,
    pub grid_height: u8,
    pub beats_per_cycle: u8,
    pub bpm: f64,
    pub perfect_window_ms: f64,
    pub good_window_ms: f64,
    pub combo_milestone: u32,
    /// Delay before the character drops back to idle after an action.
    pub action_reset_ms: f64,
    /// How long a judged result stays on the state for the UI to pick up.
    pub feedback_ms: f64,
    pub start_x: u8,
    pub start_y: u8,
    pub decoy_offset_min: i32,
    pub decoy_offset_max: i32,
    /// Move a decoy that lands on the correct answer (only possible with a zero
    /// minimum offset).
    pub avoid_decoy_collision: bool,
    /// Break the combo when the action beat passes without any attempt.
    pub penalize_idle_action_beat: bool,
    /// Only the first action on an action beat is judged; later ones miss.
    pub one_action_per_beat: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            beats_per_cycle: BEATS_PER_CYCLE,
            bpm: DEFAULT_BPM,
            perfect_window_ms: PERFECT_WINDOW_MS,
            good_window_ms: GOOD_WINDOW_MS,
            combo_milestone: COMBO_MILESTONE,
            action_reset_ms: ACTION_RESET_MS,
            feedback_ms: FEEDBACK_MS,
            start_x: START_POSITION.0,
            start_y: START_POSITION.1,
            decoy_offset_min: DECOY_OFFSET_RANGE.0,
            decoy_offset_max: DECOY_OFFSET_RANGE.1,
            avoid_decoy_collision: false,
            penalize_idle_action_beat: false,
            one_action_per_beat: false,
        }
    }
}

impl GameConfig {
    pub fn with_bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    /// Period between two beats in milliseconds.
    pub fn beat_period_ms(&self) -> f64 {
        60_000.0 / self.bpm
    }

    /// Index of the beat on which actions are judged (the last one of a cycle).
    pub fn action_beat(&self) -> u8 {
        self.beats_per_cycle - 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.beats_per_cycle < 2 {
            return Err(ConfigError::TooFewBeats(self.beats_per_cycle));
        }
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(ConfigError::InvalidTempo(self.bpm));
        }
        let windows_ok = self.perfect_window_ms.is_finite()
            && self.good_window_ms.is_finite()
            && self.perfect_window_ms >= 0.0
            && self.perfect_window_ms <= self.good_window_ms;
        if !windows_ok {
            return Err(ConfigError::InvalidWindows {
                perfect: self.perfect_window_ms,
                good: self.good_window_ms,
            });
        }
        if self.decoy_offset_min < 0 || self.decoy_offset_min > self.decoy_offset_max {
            return Err(ConfigError::InvalidDecoyOffsets {
                min: self.decoy_offset_min,
                max: self.decoy_offset_max,
            });
        }
        for (name, value) in [
            ("action_reset_ms", self.action_reset_ms),
            ("feedback_ms", self.feedback_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDelay { name, value });
            }
        }
        if self.combo_milestone == 0 {
            return Err(ConfigError::ZeroMilestone);
        }
        if self.start_x >= self.grid_width || self.start_y >= self.grid_height {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start_x,
                y: self.start_y,
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON config; missing keys keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
