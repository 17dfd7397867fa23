// Timing judgement: distance from an action to the nearest beat boundary.

use crate::config::{GOOD_WINDOW_MS, GameConfig, PERFECT_WINDOW_MS};

/// Outcome of the most recent action. `None` means nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActionResult {
    #[default]
    None,
    Perfect,
    Good,
    Miss,
}

impl ActionResult {
    pub fn points(self) -> u32 {
        match self {
            ActionResult::Perfect => 20,
            ActionResult::Good => 10,
            ActionResult::Miss | ActionResult::None => 0,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, ActionResult::Perfect | ActionResult::Good)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionResult::None => "none",
            ActionResult::Perfect => "perfect",
            ActionResult::Good => "good",
            ActionResult::Miss => "miss",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingJudge {
    pub perfect_window_ms: f64,
    pub good_window_ms: f64,
}

impl Default for TimingJudge {
    fn default() -> Self {
        Self {
            perfect_window_ms: PERFECT_WINDOW_MS,
            good_window_ms: GOOD_WINDOW_MS,
        }
    }
}

impl TimingJudge {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            perfect_window_ms: cfg.perfect_window_ms,
            good_window_ms: cfg.good_window_ms,
        }
    }

    /// Distance in ms from `action_ms` to the closest beat boundary, given the
    /// last boundary and the beat period. Wraps, so an early press for the next
    /// beat is as close as a late press for the previous one.
    pub fn offset_ms(action_ms: f64, last_beat_ms: f64, period_ms: f64) -> f64 {
        let elapsed = (action_ms - last_beat_ms).rem_euclid(period_ms);
        elapsed.min(period_ms - elapsed)
    }

    pub fn classify(&self, offset_ms: f64) -> ActionResult {
        if offset_ms <= self.perfect_window_ms {
            ActionResult::Perfect
        } else if offset_ms <= self.good_window_ms {
            ActionResult::Good
        } else {
            ActionResult::Miss
        }
    }

    pub fn judge(&self, action_ms: f64, last_beat_ms: f64, period_ms: f64) -> ActionResult {
        if !period_ms.is_finite() || period_ms <= 0.0 {
            return ActionResult::Miss;
        }
        let offset = Self::offset_ms(action_ms, last_beat_ms, period_ms);
        if offset.is_nan() {
            return ActionResult::Miss;
        }
        self.classify(offset)
    }
}
