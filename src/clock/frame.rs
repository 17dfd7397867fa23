// Browser scheduler driven by requestAnimationFrame timestamps.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use super::{BeatClock, CancelToken, ClockError, Scheduler, TickFn, TimeSource};

/// `performance.now()`, or 0 outside a browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceClock;

impl TimeSource for PerformanceClock {
    fn now_ms(&self) -> f64 {
        window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct FrameLoop {
    token: CancelToken,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        // The closure holds a clone of `callback`; taking it breaks the cycle.
        self.callback.borrow_mut().take();
    }
}

/// Ticks on the first animation frame at or past each beat boundary.
///
/// A stalled page (background tab) resumes with a single tick stamped at the
/// latest boundary instead of a burst of catch-up beats.
#[derive(Default)]
pub struct FrameScheduler {
    active: Option<FrameLoop>,
    // Stopped loop kept alive until the next start so `stop()` is safe to call
    // from inside its own frame callback.
    retired: Option<FrameLoop>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Result<i32, ClockError> {
    let win = window().ok_or(ClockError::NoWindow)?;
    win.request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(|e| ClockError::Frame(format!("{e:?}")))
}

impl Scheduler for FrameScheduler {
    fn start(&mut self, now: f64, bpm: f64, on_tick: TickFn) -> Result<(), ClockError> {
        let mut clock = BeatClock::new(bpm, now)?;
        self.stop();
        self.retired = None;

        let token = CancelToken::new();
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();

        let frame_token = token.clone();
        let frame_pending = pending.clone();
        let mut on_tick = on_tick;
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            frame_pending.set(None);
            if frame_token.is_cancelled() {
                return;
            }
            let due = clock.due_beats(ts);
            if due.end - due.start > 1 {
                log::debug!("frame stall: skipped {} beats", due.end - due.start - 1);
            }
            if let Some(beat) = due.last() {
                on_tick(clock.beat_time(beat));
            }
            if frame_token.is_cancelled() {
                return;
            }
            if let Some(cb) = f.borrow().as_ref() {
                match request_frame(cb) {
                    Ok(handle) => frame_pending.set(Some(handle)),
                    Err(e) => log::warn!("beat loop halted: {e}"),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let requested = match g.borrow().as_ref() {
            Some(cb) => request_frame(cb),
            None => Err(ClockError::Frame("frame callback missing".into())),
        };
        match requested {
            Ok(handle) => pending.set(Some(handle)),
            Err(e) => {
                g.borrow_mut().take();
                return Err(e);
            }
        }

        self.active = Some(FrameLoop {
            token,
            pending,
            callback: g,
        });
        log::debug!("frame scheduler started at {bpm} BPM");
        Ok(())
    }

    fn stop(&mut self) {
        let Some(run) = self.active.take() else {
            return;
        };
        run.token.cancel();
        if let Some(handle) = run.pending.take() {
            if let Some(win) = window() {
                if let Err(e) = win.cancel_animation_frame(handle) {
                    log::warn!("cancelAnimationFrame failed: {e:?}");
                }
            }
        }
        self.retired = Some(run);
    }

    fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|run| !run.token.is_cancelled())
    }
}
