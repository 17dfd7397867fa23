// Player character on the grid.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Actions the player can submit on the action beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Action {
    Jump,
    Forward,
    Crouch,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Jump, Action::Forward, Action::Crouch];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Jump => "jump",
            Action::Forward => "forward",
            Action::Crouch => "crouch",
        }
    }

    /// Grid step applied when the action succeeds (y grows downward).
    pub fn step(self) -> (i8, i8) {
        match self {
            Action::Jump => (0, -1),
            Action::Forward => (1, 0),
            Action::Crouch => (0, 1),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown action '{0}', expected jump, forward or crouch")]
pub struct ParseActionError(pub String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jump" => Ok(Action::Jump),
            "forward" => Ok(Action::Forward),
            "crouch" => Ok(Action::Crouch),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}

/// Animation tag shown by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Pose {
    #[default]
    Idle,
    Jump,
    Forward,
    Crouch,
}

impl From<Action> for Pose {
    fn from(action: Action) -> Self {
        match action {
            Action::Jump => Pose::Jump,
            Action::Forward => Pose::Forward,
            Action::Crouch => Pose::Crouch,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterState {
    pub x: u8,
    pub y: u8,
    pub pose: Pose,
    pub is_moving: bool,
}

impl CharacterState {
    pub fn new(x: u8, y: u8) -> Self {
        Self {
            x,
            y,
            pose: Pose::Idle,
            is_moving: false,
        }
    }

    /// Move by one grid step, clamped to a `width` x `height` grid.
    pub fn step(&mut self, (dx, dy): (i8, i8), width: u8, height: u8) {
        self.x = clamp_axis(self.x, dx, width);
        self.y = clamp_axis(self.y, dy, height);
    }

    pub fn start_pose(&mut self, action: Action) {
        self.pose = action.into();
        self.is_moving = true;
    }

    pub fn settle(&mut self) {
        self.pose = Pose::Idle;
        self.is_moving = false;
    }
}

fn clamp_axis(pos: u8, delta: i8, len: u8) -> u8 {
    let max = len.saturating_sub(1) as i16;
    (pos as i16 + delta as i16).clamp(0, max) as u8
}
