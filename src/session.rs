//! One playable session: a `Game`, the scheduler that ticks it and the sink
//! that voices its events.
//!
//! The game lives in an `Rc<RefCell<_>>` because the scheduler's tick callback
//! and the player's intents both reach it; everything runs on one thread and a
//! tick never overlaps an intent, so the borrow is never contended.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::Rng;
use rand::rngs::StdRng;

use crate::audio::{Cue, SoundSink};
use crate::clock::{ClockError, Scheduler, TimeSource};
use crate::config::{ConfigError, GameConfig};
use crate::game::{Action, ActionResult, Game, GameEvent, GameSnapshot, GameState, Toast};

pub struct Session<S, K, T, R = StdRng>
where
    S: Scheduler,
    K: SoundSink + 'static,
    T: TimeSource,
    R: Rng + 'static,
{
    game: Rc<RefCell<Game<R>>>,
    scheduler: S,
    sound: Rc<K>,
    time: T,
}

impl<S, K, T> Session<S, K, T, StdRng>
where
    S: Scheduler,
    K: SoundSink + 'static,
    T: TimeSource,
{
    pub fn new(config: GameConfig, scheduler: S, sound: K, time: T) -> Result<Self, ConfigError> {
        Ok(Self::from_game(Game::new(config)?, scheduler, sound, time))
    }
}

impl<S, K, T, R> Session<S, K, T, R>
where
    S: Scheduler,
    K: SoundSink + 'static,
    T: TimeSource,
    R: Rng + 'static,
{
    pub fn from_game(game: Game<R>, scheduler: S, sound: K, time: T) -> Self {
        Self {
            game: Rc::new(RefCell::new(game)),
            scheduler,
            sound: Rc::new(sound),
            time,
        }
    }

    /// Start the game and its beat clock. Idempotent while running.
    pub fn start_game(&mut self) -> Result<(), ClockError> {
        if self.game.borrow().is_playing() && self.scheduler.is_running() {
            return Ok(());
        }
        let now = self.time.now_ms();
        let bpm = self.game.borrow().config().bpm;

        let game: Weak<RefCell<Game<R>>> = Rc::downgrade(&self.game);
        let sound = self.sound.clone();
        self.scheduler.start(
            now,
            bpm,
            Box::new(move |beat_ms| {
                let Some(game) = game.upgrade() else {
                    return;
                };
                let events = {
                    let mut g = game.borrow_mut();
                    g.tick(beat_ms);
                    g.drain_events()
                };
                voice_events(sound.as_ref(), &events);
            }),
        )?;

        self.game.borrow_mut().start(now);
        self.flush_events();
        Ok(())
    }

    /// Stop the clock first so no tick can land after the game is idle.
    pub fn stop_game(&mut self) {
        self.scheduler.stop();
        self.game.borrow_mut().stop();
        self.flush_events();
    }

    pub fn reset(&mut self) {
        self.scheduler.stop();
        self.game.borrow_mut().reset();
        self.flush_events();
    }

    pub fn select_answer(&mut self, index: usize) {
        self.game.borrow_mut().select_answer(index);
        self.flush_events();
    }

    pub fn execute_action(&mut self, action: Action) -> ActionResult {
        let now = self.time.now_ms();
        let result = self.game.borrow_mut().execute_action(action, now);
        self.flush_events();
        result
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let now = self.time.now_ms();
        self.game.borrow_mut().snapshot(now)
    }

    /// Read the current state in place, after resolving expired deadlines.
    pub fn with_state<U>(&self, f: impl FnOnce(&GameState) -> U) -> U {
        let now = self.time.now_ms();
        let mut game = self.game.borrow_mut();
        game.update(now);
        f(game.state())
    }

    pub fn toast(&self) -> Option<Toast> {
        self.game.borrow().toast().cloned()
    }

    pub fn clear_toast(&mut self) {
        self.game.borrow_mut().clear_toast();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    fn flush_events(&self) {
        let events = self.game.borrow_mut().drain_events();
        voice_events(self.sound.as_ref(), &events);
    }
}

impl<S, K, T, R> Drop for Session<S, K, T, R>
where
    S: Scheduler,
    K: SoundSink + 'static,
    T: TimeSource,
    R: Rng + 'static,
{
    fn drop(&mut self) {
        self.scheduler.stop();
    }
}

fn voice_events<K: SoundSink + ?Sized>(sound: &K, events: &[GameEvent]) {
    for cue in events.iter().filter_map(Cue::for_event) {
        sound.play(cue);
    }
}
