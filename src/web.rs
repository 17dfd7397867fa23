// JS-facing game handle.

use wasm_bindgen::prelude::*;

use crate::audio::ToneSynth;
use crate::clock::{FrameScheduler, PerformanceClock};
use crate::config::GameConfig;
use crate::game::Action;
use crate::session::Session;

type BrowserSession = Session<FrameScheduler, ToneSynth, PerformanceClock>;

/// One game, ticked by animation frames and voiced through Web Audio.
///
/// ```js
/// const quiz = new BeatQuiz();
/// quiz.startGame();
/// quiz.selectAnswer(1);
/// const result = quiz.executeAction("forward"); // "perfect" | "good" | "miss" | "none"
/// ```
#[wasm_bindgen]
pub struct BeatQuiz {
    session: BrowserSession,
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

impl BeatQuiz {
    fn from_config(config: GameConfig) -> Result<BeatQuiz, JsValue> {
        let session = Session::new(
            config,
            FrameScheduler::new(),
            ToneSynth::new(),
            PerformanceClock,
        )
        .map_err(to_js)?;
        Ok(BeatQuiz { session })
    }
}

#[wasm_bindgen]
impl BeatQuiz {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BeatQuiz, JsValue> {
        Self::from_config(GameConfig::default())
    }

    /// Build from a partial JSON config; missing keys keep their defaults.
    #[cfg(feature = "serde_json")]
    #[wasm_bindgen(js_name = withConfigJson)]
    pub fn with_config_json(json: &str) -> Result<BeatQuiz, JsValue> {
        Self::from_config(GameConfig::from_json(json).map_err(to_js)?)
    }

    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&mut self) -> Result<(), JsValue> {
        self.session.start_game().map_err(to_js)
    }

    #[wasm_bindgen(js_name = stopGame)]
    pub fn stop_game(&mut self) {
        self.session.stop_game();
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    #[wasm_bindgen(js_name = selectAnswer)]
    pub fn select_answer(&mut self, index: u32) {
        self.session.select_answer(index as usize);
    }

    /// Judge `"jump"`, `"forward"` or `"crouch"`; returns the result name.
    #[wasm_bindgen(js_name = executeAction)]
    pub fn execute_action(&mut self, action: &str) -> Result<String, JsValue> {
        let action: Action = action.parse().map_err(to_js)?;
        Ok(self.session.execute_action(action).as_str().to_string())
    }

    #[wasm_bindgen(getter = currentBeat)]
    pub fn current_beat(&self) -> u8 {
        self.session.with_state(|s| s.current_beat)
    }

    // Cycles past 2^53 are not reachable at any playable tempo.
    #[wasm_bindgen(getter = currentCycle)]
    pub fn current_cycle(&self) -> f64 {
        self.session.with_state(|s| s.current_cycle as f64)
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.session.with_state(|s| s.score)
    }

    #[wasm_bindgen(getter)]
    pub fn combo(&self) -> u32 {
        self.session.with_state(|s| s.combo)
    }

    #[wasm_bindgen(getter = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.session.with_state(|s| s.is_playing)
    }

    #[wasm_bindgen(getter = characterX)]
    pub fn character_x(&self) -> u8 {
        self.session.with_state(|s| s.character.x)
    }

    #[wasm_bindgen(getter = characterY)]
    pub fn character_y(&self) -> u8 {
        self.session.with_state(|s| s.character.y)
    }

    /// Full state plus the pending toast, as JSON.
    #[cfg(feature = "serde_json")]
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = toastMessage)]
    pub fn toast_message(&self) -> Option<String> {
        self.session.toast().map(|t| t.message)
    }

    #[wasm_bindgen(js_name = toastKind)]
    pub fn toast_kind(&self) -> Option<String> {
        self.session.toast().map(|t| t.kind.as_str().to_string())
    }

    #[wasm_bindgen(js_name = clearToast)]
    pub fn clear_toast(&mut self) {
        self.session.clear_toast();
    }
}
