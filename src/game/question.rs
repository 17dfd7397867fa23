// Arithmetic prompts with one correct option and one decoy.

use rand::Rng;

pub const OPERAND_MIN: i32 = 1;
pub const OPERAND_MAX: i32 = 50;
pub const DECOY_OFFSET_MIN: i32 = 1;
pub const DECOY_OFFSET_MAX: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    Add,
    Sub,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Question {
    pub prompt: String,
    /// Display order; the correct answer may sit at either index.
    pub options: [i32; 2],
    pub correct_answer: i32,
    pub created_at_ms: f64,
}

impl Question {
    /// Build a question from already chosen operands. Subtraction puts the larger
    /// operand first so the answer is never negative.
    pub fn new(lhs: i32, op: Operator, rhs: i32, decoy: i32, correct_first: bool, now: f64) -> Self {
        let (a, b) = match op {
            Operator::Add => (lhs, rhs),
            Operator::Sub => (lhs.max(rhs), lhs.min(rhs)),
        };
        let correct_answer = match op {
            Operator::Add => a + b,
            Operator::Sub => a - b,
        };
        let options = if correct_first {
            [correct_answer, decoy]
        } else {
            [decoy, correct_answer]
        };
        Self {
            prompt: format!("{} {} {} = ?", a, op.symbol(), b),
            options,
            correct_answer,
            created_at_ms: now,
        }
    }

    pub fn option(&self, index: usize) -> Option<i32> {
        self.options.get(index).copied()
    }

    pub fn is_correct(&self, index: usize) -> bool {
        self.option(index) == Some(self.correct_answer)
    }

    pub fn correct_index(&self) -> usize {
        if self.options[0] == self.correct_answer { 0 } else { 1 }
    }
}

/// Produces a fresh `Question` per call from any RNG.
///
/// The decoy is the correct answer shifted up or down by an offset drawn from
/// `[offset_min, offset_max]`. With the default range it can never coincide
/// with the correct answer; a zero lower bound allows it, and `avoid_collision`
/// then pushes a colliding decoy above the answer.
#[derive(Debug, Clone)]
pub struct QuestionGenerator<R: Rng> {
    rng: R,
    offset_min: i32,
    offset_max: i32,
    avoid_collision: bool,
}

impl<R: Rng> QuestionGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            offset_min: DECOY_OFFSET_MIN,
            offset_max: DECOY_OFFSET_MAX,
            avoid_collision: false,
        }
    }

    /// Offsets are clamped to be non-negative and ordered.
    pub fn with_decoy_offsets(mut self, min: i32, max: i32) -> Self {
        self.offset_min = min.max(0);
        self.offset_max = max.max(self.offset_min);
        self
    }

    pub fn avoid_collision(mut self, avoid: bool) -> Self {
        self.avoid_collision = avoid;
        self
    }

    pub fn generate(&mut self, now: f64) -> Question {
        let lhs = self.rng.gen_range(OPERAND_MIN..=OPERAND_MAX);
        let rhs = self.rng.gen_range(OPERAND_MIN..=OPERAND_MAX);
        let op = if self.rng.gen_bool(0.5) { Operator::Add } else { Operator::Sub };
        let correct = match op {
            Operator::Add => lhs + rhs,
            Operator::Sub => (lhs - rhs).abs(),
        };
        let offset = self.rng.gen_range(self.offset_min..=self.offset_max);
        let mut decoy = if self.rng.gen_bool(0.5) { correct + offset } else { correct - offset };
        if self.avoid_collision && decoy == correct {
            decoy = correct + self.offset_max.max(1);
        }
        let correct_first = self.rng.gen_bool(0.5);
        Question::new(lhs, op, rhs, decoy, correct_first, now)
    }
}
