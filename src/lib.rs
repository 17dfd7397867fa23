//! Beat Quiz core crate.
//!
//! A rhythm/quiz mini-game: a beat clock drives an 8-beat cycle, each cycle
//! asks an arithmetic question, and on the last beat the player submits an
//! action that is judged on both the answer and its timing against the beat.
//!
//! The game logic (`config`, `clock`, `game`, `session`) is plain Rust and runs
//! natively; `web` wraps it in the `BeatQuiz` class exported to JavaScript.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod clock;
pub mod config;
pub mod game;
pub mod logger;
pub mod session;
mod web;

pub use audio::{Cue, SilentSink, SoundSink, ToneSynth};
pub use clock::{BeatClock, ClockError, ManualScheduler, ManualTime, Scheduler, TimeSource};
pub use config::{ConfigError, GameConfig};
pub use game::{Action, ActionResult, Game, GameEvent, GameSnapshot, GameState};
pub use session::Session;
pub use web::BeatQuiz;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(logger::default_level());
}
