//! Beat clock and tick scheduling.
//!
//! `BeatClock` is pure period math: it knows where beat boundaries fall and which
//! whole beats have been crossed since it was last polled. A `Scheduler` turns
//! that into tick deliveries. Two schedulers exist:
//!
//! - [`ManualScheduler`]: host driven (`advance_to(now)`), used natively and in tests.
//! - [`FrameScheduler`]: browser driven by `requestAnimationFrame` timestamps.
//!
//! Both share the same stop contract: `stop()` cancels the run's [`CancelToken`]
//! and every delivery checks the token first, so no tick reaches the callback
//! once `stop()` has returned.

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::Rc;

use thiserror::Error;

mod frame;

pub use frame::{FrameScheduler, PerformanceClock};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClockError {
    #[error("tempo must be a positive finite BPM, got {0}")]
    InvalidTempo(f64),

    #[error("no browser window available")]
    NoWindow,

    #[error("animation frame request failed: {0}")]
    Frame(String),
}

// --- Core Time / Beat Model -------------------------------------------------

/// BeatClock tracks timing relative to BPM for scheduling ticks.
#[derive(Debug, Clone)]
pub struct BeatClock {
    bpm: f64,           // beats per minute
    start_ms: f64,      // timestamp of beat 0
    last_beat_idx: i64, // index of last delivered whole beat
}

impl BeatClock {
    pub fn new(bpm: f64, now: f64) -> Result<Self, ClockError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(ClockError::InvalidTempo(bpm));
        }
        // Beat 0 is the start itself; the first tick is beat 1.
        Ok(Self {
            bpm,
            start_ms: now,
            last_beat_idx: 0,
        })
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn beat_duration_ms(&self) -> f64 {
        60_000.0 / self.bpm
    }

    pub fn current_beat(&self, now: f64) -> f64 {
        (now - self.start_ms) / self.beat_duration_ms()
    }

    /// Timestamp of the boundary of beat `idx`.
    pub fn beat_time(&self, idx: i64) -> f64 {
        self.start_ms + idx as f64 * self.beat_duration_ms()
    }

    /// Whole beats crossed since the previous poll, oldest first.
    pub fn due_beats(&mut self, now: f64) -> Range<i64> {
        let whole = self.current_beat(now).floor() as i64;
        if whole <= self.last_beat_idx {
            return self.last_beat_idx + 1..self.last_beat_idx + 1;
        }
        let due = self.last_beat_idx + 1..whole + 1;
        self.last_beat_idx = whole;
        due
    }
}

// --- Cancellation ----------------------------------------------------------

/// Shared stop flag for one scheduler run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

// --- Scheduler / time source seams -----------------------------------------

/// Beat callback; receives the timestamp of the beat boundary.
pub type TickFn = Box<dyn FnMut(f64)>;

pub trait Scheduler {
    /// Begin delivering ticks every `60000 / bpm` ms, counting from `now`.
    /// Starting while already running restarts the clock.
    fn start(&mut self, now: f64, bpm: f64, on_tick: TickFn) -> Result<(), ClockError>;

    /// Stop delivering ticks. No tick is delivered after this returns.
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Settable time, shared between clones. Used natively and in tests.
#[derive(Debug, Clone, Default)]
pub struct ManualTime(Rc<Cell<f64>>);

impl ManualTime {
    pub fn new(start_ms: f64) -> Self {
        Self(Rc::new(Cell::new(start_ms)))
    }

    pub fn set(&self, now_ms: f64) {
        self.0.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.0.set(self.0.get() + delta_ms);
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

// --- Manual scheduler --------------------------------------------------------

#[derive(Default)]
struct ManualRun {
    clock: Option<BeatClock>,
    token: CancelToken,
    on_tick: Option<TickFn>,
}

/// Scheduler driven explicitly by the host. Clones share the same run, so a test
/// can keep a handle while a `Session` owns another.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    run: Rc<RefCell<ManualRun>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver every beat whose boundary lies at or before `now`.
    /// Returns how many ticks were delivered.
    pub fn advance_to(&self, now: f64) -> usize {
        let (beats, token, mut on_tick) = {
            let mut run = self.run.borrow_mut();
            let Some(clock) = run.clock.as_mut() else {
                return 0;
            };
            let due = clock.due_beats(now);
            let beats: Vec<f64> = due.map(|b| clock.beat_time(b)).collect();
            if beats.is_empty() {
                return 0;
            }
            let Some(cb) = run.on_tick.take() else {
                return 0;
            };
            (beats, run.token.clone(), cb)
        };

        // The run is not borrowed while the callback executes, so the callback
        // may stop or restart this scheduler.
        let mut delivered = 0;
        for at in beats {
            if token.is_cancelled() {
                break;
            }
            on_tick(at);
            delivered += 1;
        }

        let mut run = self.run.borrow_mut();
        if !token.is_cancelled() && run.on_tick.is_none() {
            run.on_tick = Some(on_tick);
        }
        delivered
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, now: f64, bpm: f64, on_tick: TickFn) -> Result<(), ClockError> {
        let clock = BeatClock::new(bpm, now)?;
        let mut run = self.run.borrow_mut();
        run.token.cancel();
        *run = ManualRun {
            clock: Some(clock),
            token: CancelToken::new(),
            on_tick: Some(on_tick),
        };
        Ok(())
    }

    fn stop(&mut self) {
        let mut run = self.run.borrow_mut();
        run.token.cancel();
        run.clock = None;
        run.on_tick = None;
    }

    fn is_running(&self) -> bool {
        let run = self.run.borrow();
        run.clock.is_some() && !run.token.is_cancelled()
    }
}
