//! Beat-driven quiz state machine.
//!
//! A `Game` owns everything that changes while playing: beat and cycle counters,
//! score, combo, the character, the current question and the last judged result.
//! It is mutated only through its own operations:
//!
//! - `start` / `stop` / `reset`: top-level lifecycle (`idle` <-> `running`).
//! - `tick`: one beat from the clock.
//! - `select_answer` / `execute_action`: player intents.
//! - `update`: resolves the cosmetic deadlines (idle pose, result display).
//!
//! Time is always passed in as milliseconds on the same timeline the clock uses
//! (`performance.now()` in the browser). Side effects such as sounds are not
//! performed here; operations queue [`GameEvent`]s that the owner drains.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, GameConfig};

mod character;
mod judge;
mod question;
mod toast;

pub use character::{Action, CharacterState, ParseActionError, Pose};
pub use judge::{ActionResult, TimingJudge};
pub use question::{Operator, Question, QuestionGenerator};
pub use toast::{Toast, ToastKind, ToastSlot};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub current_beat: u8,
    pub current_cycle: u64,
    pub score: u32,
    pub combo: u32,
    pub is_playing: bool,
    pub character: CharacterState,
    pub current_question: Option<Question>,
    pub selected_answer: Option<usize>,
    pub last_action_time: f64,
    pub last_beat_time: f64,
    pub action_result: ActionResult,
}

impl GameState {
    fn initial(cfg: &GameConfig) -> Self {
        Self {
            current_beat: 0,
            current_cycle: 0,
            score: 0,
            combo: 0,
            is_playing: false,
            character: CharacterState::new(cfg.start_x, cfg.start_y),
            current_question: None,
            selected_answer: None,
            last_action_time: 0.0,
            last_beat_time: 0.0,
            action_result: ActionResult::None,
        }
    }
}

/// Read-only copy handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameSnapshot {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub state: GameState,
    pub toast: Option<Toast>,
}

/// Things that happened, for side-effect consumers (sound, logging, UI cues).
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Stopped,
    BeatTicked { beat: u8, cycle: u64, at_ms: f64 },
    QuestionChanged,
    AnswerSelected { index: usize },
    ActionJudged { action: Action, result: ActionResult },
    ComboIncreased { combo: u32 },
    ComboMilestone { combo: u32 },
    ComboBroken { previous: u32 },
}

pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    judge: TimingJudge,
    questions: QuestionGenerator<R>,
    state: GameState,
    toast: ToastSlot,
    events: Vec<GameEvent>,
    // Cosmetic deadlines; only the latest action's deadline matters.
    idle_at: Option<f64>,
    result_clear_at: Option<f64>,
    // Any action attempted while on the action beat of the current cycle.
    acted_on_action_beat: bool,
}

impl Game<StdRng> {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let questions = QuestionGenerator::new(rng)
            .with_decoy_offsets(config.decoy_offset_min, config.decoy_offset_max)
            .avoid_collision(config.avoid_decoy_collision);
        Ok(Self {
            judge: TimingJudge::from_config(&config),
            questions,
            state: GameState::initial(&config),
            toast: ToastSlot::default(),
            events: Vec::new(),
            idle_at: None,
            result_clear_at: None,
            acted_on_action_beat: false,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.peek()
    }

    pub fn clear_toast(&mut self) {
        self.toast.clear();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&mut self, now: f64) -> GameSnapshot {
        self.update(now);
        GameSnapshot {
            state: self.state.clone(),
            toast: self.toast.peek().cloned(),
        }
    }

    // --- Lifecycle ---------------------------------------------------------

    /// `idle -> running`: new cycle from beat 0 with a fresh question.
    /// Score, combo and position carry over. No-op while already running.
    pub fn start(&mut self, now: f64) {
        if self.state.is_playing {
            log::debug!("start ignored: already running");
            return;
        }
        self.state.is_playing = true;
        self.state.current_beat = 0;
        self.state.current_cycle = 0;
        self.state.last_beat_time = now;
        self.acted_on_action_beat = false;
        self.new_question(now);
        self.events.push(GameEvent::Started);
        log::info!(
            "game started at {} BPM (score {}, combo {})",
            self.config.bpm,
            self.state.score,
            self.state.combo
        );
    }

    /// `running -> idle`: counters freeze where they are. No-op while idle.
    pub fn stop(&mut self) {
        if !self.state.is_playing {
            return;
        }
        self.state.is_playing = false;
        self.events.push(GameEvent::Stopped);
        log::info!(
            "game stopped at cycle {} beat {} (score {})",
            self.state.current_cycle,
            self.state.current_beat,
            self.state.score
        );
    }

    /// Stop and return to the initial state.
    pub fn reset(&mut self) {
        self.stop();
        self.state = GameState::initial(&self.config);
        self.toast.clear();
        self.idle_at = None;
        self.result_clear_at = None;
        self.acted_on_action_beat = false;
        log::info!("game reset");
    }

    // --- Clock -------------------------------------------------------------

    /// Advance one beat. Wrapping to beat 0 opens a new cycle: new question,
    /// cleared answer, and a free step forward while a combo is alive.
    pub fn tick(&mut self, now: f64) {
        self.update(now);
        if !self.state.is_playing {
            log::debug!("tick ignored while idle");
            return;
        }

        let action_beat = self.config.action_beat();
        if self.config.penalize_idle_action_beat
            && self.state.current_beat == action_beat
            && !self.acted_on_action_beat
        {
            log::debug!("action beat passed without an attempt");
            self.break_combo();
            self.toast.push(Toast::missed_beat(now));
        }

        self.state.current_beat = (self.state.current_beat + 1) % self.config.beats_per_cycle;
        self.state.last_beat_time = now;

        if self.state.current_beat == 0 {
            self.state.current_cycle += 1;
            self.acted_on_action_beat = false;
            self.new_question(now);
            if self.state.combo > 0 {
                self.state.character.step(
                    Action::Forward.step(),
                    self.config.grid_width,
                    self.config.grid_height,
                );
            }
        }

        self.events.push(GameEvent::BeatTicked {
            beat: self.state.current_beat,
            cycle: self.state.current_cycle,
            at_ms: now,
        });
        log::debug!(
            "beat {} of cycle {}",
            self.state.current_beat,
            self.state.current_cycle
        );
    }

    // --- Player intents ----------------------------------------------------

    /// Record the chosen option. The UI only offers this before the action beat,
    /// but any beat is accepted. Indices other than 0 and 1 are ignored.
    pub fn select_answer(&mut self, index: usize) {
        if !self.state.is_playing {
            log::debug!("answer {index} ignored while idle");
            return;
        }
        if index > 1 {
            log::warn!("answer index {index} out of range, ignored");
            return;
        }
        self.state.selected_answer = Some(index);
        self.events.push(GameEvent::AnswerSelected { index });
    }

    /// Judge an action. It scores only on the action beat, with the correct
    /// answer selected, inside the good window; anything else is a miss that
    /// breaks the combo. The pose always changes, the position only on a hit.
    pub fn execute_action(&mut self, action: Action, now: f64) -> ActionResult {
        self.update(now);
        if !self.state.is_playing {
            log::debug!("{action} ignored while idle");
            return ActionResult::None;
        }

        let result = self.judge_action(now);

        self.state.character.start_pose(action);
        self.idle_at = Some(now + self.config.action_reset_ms);
        self.state.last_action_time = now;

        if result.is_hit() {
            self.state.character.step(
                action.step(),
                self.config.grid_width,
                self.config.grid_height,
            );
            self.state.score += result.points();
            let previous = self.state.combo;
            self.state.combo += 1;
            self.events.push(GameEvent::ComboIncreased {
                combo: self.state.combo,
            });
            let milestone = self.config.combo_milestone;
            if previous + 1 == milestone {
                self.events.push(GameEvent::ComboMilestone { combo: milestone });
                self.toast.push(Toast::celebration(milestone, now));
            } else if result == ActionResult::Perfect {
                self.toast.push(Toast::perfect(now));
            }
        } else {
            self.break_combo();
            self.toast.push(Toast::miss(now));
        }

        self.state.action_result = result;
        self.result_clear_at = Some(now + self.config.feedback_ms);
        self.events.push(GameEvent::ActionJudged { action, result });
        log::info!(
            "{action} judged {} (score {}, combo {})",
            result.as_str(),
            self.state.score,
            self.state.combo
        );
        result
    }

    /// Resolve cosmetic deadlines that have passed by `now`.
    pub fn update(&mut self, now: f64) {
        if self.idle_at.is_some_and(|at| now >= at) {
            self.state.character.settle();
            self.idle_at = None;
        }
        if self.result_clear_at.is_some_and(|at| now >= at) {
            self.state.action_result = ActionResult::None;
            self.result_clear_at = None;
        }
    }

    // --- Internals ---------------------------------------------------------

    fn judge_action(&mut self, now: f64) -> ActionResult {
        if self.state.current_beat != self.config.action_beat() {
            log::debug!("miss: beat {} is not the action beat", self.state.current_beat);
            return ActionResult::Miss;
        }
        if self.config.one_action_per_beat && self.acted_on_action_beat {
            log::debug!("miss: action beat already used");
            return ActionResult::Miss;
        }
        self.acted_on_action_beat = true;

        let Some(index) = self.state.selected_answer else {
            log::debug!("miss: no answer selected");
            return ActionResult::Miss;
        };
        let correct = self
            .state
            .current_question
            .as_ref()
            .is_some_and(|q| q.is_correct(index));
        if !correct {
            log::debug!("miss: wrong answer");
            return ActionResult::Miss;
        }
        self.judge.judge(
            now,
            self.state.last_beat_time,
            self.config.beat_period_ms(),
        )
    }

    fn break_combo(&mut self) {
        let previous = self.state.combo;
        self.state.combo = 0;
        if previous > 0 {
            self.events.push(GameEvent::ComboBroken { previous });
        }
    }

    fn new_question(&mut self, now: f64) {
        let question = self.questions.generate(now);
        log::debug!("new question: {}", question.prompt);
        self.state.current_question = Some(question);
        self.state.selected_answer = None;
        self.events.push(GameEvent::QuestionChanged);
    }

    #[cfg(test)]
    fn set_question(&mut self, question: Question) {
        self.state.current_question = Some(question);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: f64 = 468.75;

    fn game() -> Game<StdRng> {
        Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(42)).unwrap()
    }

    /// Start at t=0 and tick up to the action beat; returns the beat-7 timestamp.
    fn to_action_beat(g: &mut Game<StdRng>) -> f64 {
        g.start(0.0);
        for i in 1..=7 {
            g.tick(i as f64 * PERIOD);
        }
        assert_eq!(g.state().current_beat, 7);
        7.0 * PERIOD
    }

    fn fixed_question() -> Question {
        Question::new(12, Operator::Add, 7, 23, true, 0.0)
    }

    #[test]
    fn new_game_is_idle() {
        let g = game();
        let s = g.state();
        assert!(!s.is_playing);
        assert_eq!((s.character.x, s.character.y), (1, 4));
        assert!(s.current_question.is_none());
        assert_eq!(s.action_result, ActionResult::None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = GameConfig::default().with_bpm(-1.0);
        assert!(Game::with_rng(cfg, StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn start_generates_question_and_is_idempotent() {
        let mut g = game();
        g.start(100.0);
        let q = g.state().current_question.clone();
        assert!(q.is_some());
        assert_eq!(g.state().last_beat_time, 100.0);
        g.start(200.0);
        assert_eq!(g.state().current_question, q);
        assert_eq!(g.state().last_beat_time, 100.0);
        let events = g.drain_events();
        assert_eq!(events, vec![GameEvent::QuestionChanged, GameEvent::Started]);
    }

    #[test]
    fn beats_wrap_and_cycles_count() {
        let mut g = game();
        g.start(0.0);
        g.drain_events();
        for i in 1..=24u32 {
            g.tick(i as f64 * PERIOD);
            assert_eq!(g.state().current_beat as u32, i % 8);
            assert_eq!(g.state().current_cycle, (i / 8) as u64);
        }
        let questions = g
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::QuestionChanged)
            .count();
        assert_eq!(questions, 3);
    }

    #[test]
    fn wrap_clears_selected_answer() {
        let mut g = game();
        g.start(0.0);
        g.select_answer(1);
        for i in 1..=7 {
            g.tick(i as f64 * PERIOD);
            assert_eq!(g.state().selected_answer, Some(1));
        }
        g.tick(8.0 * PERIOD);
        assert_eq!(g.state().selected_answer, None);
    }

    #[test]
    fn perfect_hit_on_action_beat() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        let result = g.execute_action(Action::Forward, beat7 + 50.0);
        assert_eq!(result, ActionResult::Perfect);
        let s = g.state();
        assert_eq!(s.score, 20);
        assert_eq!(s.combo, 1);
        assert_eq!(s.character.x, 2);
        assert_eq!(s.action_result, ActionResult::Perfect);
        assert_eq!(s.character.pose, Pose::Forward);
        assert_eq!(g.toast().unwrap().kind, ToastKind::Perfect);
    }

    #[test]
    fn good_hit_scores_ten() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        assert_eq!(g.execute_action(Action::Jump, beat7 + 150.0), ActionResult::Good);
        assert_eq!(g.state().score, 10);
        assert_eq!(g.state().combo, 1);
        assert_eq!(g.state().character.y, 3);
    }

    #[test]
    fn late_press_misses() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        assert_eq!(g.execute_action(Action::Crouch, beat7 + 230.0), ActionResult::Miss);
        assert_eq!(g.state().score, 0);
        assert_eq!(g.state().character.y, 4);
    }

    #[test]
    fn off_beat_action_is_cosmetic_miss() {
        let mut g = game();
        g.start(0.0);
        for i in 1..=3 {
            g.tick(i as f64 * PERIOD);
        }
        g.set_question(fixed_question());
        g.select_answer(0);
        let before = g.state().character.clone();
        assert_eq!(g.execute_action(Action::Jump, 3.0 * PERIOD), ActionResult::Miss);
        let s = g.state();
        assert_eq!(s.combo, 0);
        assert_eq!((s.character.x, s.character.y), (before.x, before.y));
        assert_eq!(s.character.pose, Pose::Jump);
        assert!(s.character.is_moving);
        assert_eq!(g.toast().unwrap().kind, ToastKind::Miss);
    }

    #[test]
    fn wrong_or_missing_answer_misses() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        assert_eq!(g.execute_action(Action::Forward, beat7), ActionResult::Miss);
        g.select_answer(1);
        assert_eq!(g.execute_action(Action::Forward, beat7 + 10.0), ActionResult::Miss);
        assert_eq!(g.state().score, 0);
    }

    #[test]
    fn miss_breaks_combo_and_reports_previous() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        g.execute_action(Action::Forward, beat7);
        g.drain_events();
        g.select_answer(1);
        g.execute_action(Action::Forward, beat7 + 20.0);
        assert_eq!(g.state().combo, 0);
        assert_eq!(g.state().score, 20);
        assert!(g.drain_events().contains(&GameEvent::ComboBroken { previous: 1 }));
    }

    #[test]
    fn cosmetic_state_clears_after_deadline() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        g.execute_action(Action::Forward, beat7);
        g.update(beat7 + 299.0);
        assert_eq!(g.state().character.pose, Pose::Forward);
        assert_eq!(g.state().action_result, ActionResult::Perfect);
        let snap = g.snapshot(beat7 + 300.0);
        assert_eq!(snap.state.character.pose, Pose::Idle);
        assert!(!snap.state.character.is_moving);
        assert_eq!(snap.state.action_result, ActionResult::None);
    }

    #[test]
    fn later_action_restarts_idle_deadline() {
        let mut g = game();
        g.start(0.0);
        g.execute_action(Action::Jump, 100.0);
        g.execute_action(Action::Crouch, 350.0);
        g.update(420.0);
        assert_eq!(g.state().character.pose, Pose::Crouch);
        g.update(650.0);
        assert_eq!(g.state().character.pose, Pose::Idle);
    }

    #[test]
    fn combo_auto_advances_on_new_cycle() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        g.execute_action(Action::Jump, beat7);
        let x = g.state().character.x;
        g.tick(8.0 * PERIOD);
        assert_eq!(g.state().character.x, x + 1);
    }

    #[test]
    fn no_auto_advance_without_combo() {
        let mut g = game();
        g.start(0.0);
        for i in 1..=8 {
            g.tick(i as f64 * PERIOD);
        }
        assert_eq!(g.state().character.x, 1);
    }

    #[test]
    fn stop_freezes_and_ignores_intents() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.stop();
        g.tick(beat7 + PERIOD);
        assert_eq!(g.state().current_beat, 7);
        g.select_answer(0);
        assert_eq!(g.state().selected_answer, None);
        assert_eq!(g.execute_action(Action::Jump, beat7 + 10.0), ActionResult::None);
        assert_eq!(g.state().character.pose, Pose::Idle);
    }

    #[test]
    fn restart_keeps_score_and_combo() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        g.execute_action(Action::Forward, beat7);
        g.stop();
        g.start(10_000.0);
        let s = g.state();
        assert_eq!((s.current_beat, s.current_cycle), (0, 0));
        assert_eq!((s.score, s.combo), (20, 1));
        assert_eq!(s.last_beat_time, 10_000.0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        g.execute_action(Action::Forward, beat7);
        g.reset();
        assert_eq!(*g.state(), GameState::initial(g.config()));
        assert!(g.toast().is_none());
    }

    #[test]
    fn out_of_range_answer_ignored() {
        let mut g = game();
        g.start(0.0);
        g.select_answer(2);
        assert_eq!(g.state().selected_answer, None);
    }

    #[test]
    fn idle_action_beat_penalty_when_enabled() {
        let cfg = GameConfig {
            penalize_idle_action_beat: true,
            ..GameConfig::default()
        };
        let mut g = Game::with_rng(cfg, StdRng::seed_from_u64(9)).unwrap();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        g.execute_action(Action::Forward, beat7);
        assert_eq!(g.state().combo, 1);

        // Cycle 1: hit again, combo survives the wrap.
        for i in 8..=15 {
            g.tick(i as f64 * PERIOD);
        }
        assert_eq!(g.state().combo, 1);
        g.set_question(fixed_question());
        g.select_answer(0);
        g.execute_action(Action::Forward, 15.0 * PERIOD);
        assert_eq!(g.state().combo, 2);

        // Cycle 2: nothing on the action beat.
        for i in 16..=24 {
            g.tick(i as f64 * PERIOD);
        }
        assert_eq!(g.state().combo, 0);
        assert_eq!(g.toast().unwrap().message, Toast::missed_beat(0.0).message);
    }

    /// Land a correct hit on the action beat of `cycle` (cycle 0 starts at t=0),
    /// ticking the clock there first.
    fn hit_in_cycle(g: &mut Game<StdRng>, cycle: u32) -> ActionResult {
        let beat7 = (cycle * 8 + 7) as f64 * PERIOD;
        while g.state().current_cycle < cycle as u64 || g.state().current_beat != 7 {
            let s = g.state();
            let next = s.current_cycle as f64 * 8.0 + s.current_beat as f64 + 1.0;
            g.tick(next * PERIOD);
        }
        g.set_question(fixed_question());
        g.select_answer(0);
        g.clear_toast();
        g.execute_action(Action::Forward, beat7 + 20.0)
    }

    #[test]
    fn celebration_only_on_reaching_milestone() {
        let mut g = game();
        g.start(0.0);
        let mut kinds = Vec::new();
        for cycle in 0..7 {
            assert_eq!(hit_in_cycle(&mut g, cycle), ActionResult::Perfect);
            kinds.push((g.state().combo, g.toast().unwrap().kind));
        }
        assert_eq!(kinds[4], (5, ToastKind::Celebration));
        assert_eq!(kinds[5], (6, ToastKind::Perfect));
        assert_eq!(kinds[6], (7, ToastKind::Perfect));
        let milestones = g
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ComboMilestone { .. }))
            .count();
        assert_eq!(milestones, 1);

        // Break the combo, then rebuild it: the celebration comes back at 5.
        g.select_answer(1);
        let miss_at = 55.0 * PERIOD + 30.0;
        assert_eq!(g.execute_action(Action::Forward, miss_at), ActionResult::Miss);
        assert_eq!(g.state().combo, 0);
        for cycle in 7..12 {
            assert_eq!(hit_in_cycle(&mut g, cycle), ActionResult::Perfect);
        }
        assert_eq!(g.state().combo, 5);
        assert_eq!(g.toast().unwrap().kind, ToastKind::Celebration);
    }

    #[test]
    fn repeated_presses_on_one_beat_score_by_default() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        for i in 0..3 {
            assert_eq!(g.execute_action(Action::Forward, beat7 + i as f64), ActionResult::Perfect);
        }
        assert_eq!((g.state().score, g.state().combo), (60, 3));
    }

    #[test]
    fn one_action_per_beat_misses_repeats() {
        let cfg = GameConfig {
            one_action_per_beat: true,
            ..GameConfig::default()
        };
        let mut g = Game::with_rng(cfg, StdRng::seed_from_u64(3)).unwrap();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        assert_eq!(g.execute_action(Action::Forward, beat7), ActionResult::Perfect);
        assert_eq!(g.execute_action(Action::Forward, beat7 + 10.0), ActionResult::Miss);
        assert_eq!((g.state().score, g.state().combo), (20, 0));

        // The next cycle's action beat is judged again.
        for i in 8..=15 {
            g.tick(i as f64 * PERIOD);
        }
        g.set_question(fixed_question());
        g.select_answer(0);
        assert_eq!(g.execute_action(Action::Forward, 15.0 * PERIOD), ActionResult::Perfect);
    }

    #[test]
    fn idle_action_beat_not_penalized_by_default() {
        let mut g = game();
        let beat7 = to_action_beat(&mut g);
        g.set_question(fixed_question());
        g.select_answer(0);
        g.execute_action(Action::Forward, beat7);
        for i in 8..=24 {
            g.tick(i as f64 * PERIOD);
        }
        assert_eq!(g.state().combo, 1);
    }
}
