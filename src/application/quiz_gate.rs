// src/application/quiz_gate.rs
use crate::constants::{QUIZ_DRAW_SIZE, QUIZ_PASS_THRESHOLD};
use crate::domain::{question_bank, Question};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Asking(usize),
    Answered { index: usize, correct: bool },
    Passed,
}

/// What `advance` did after an answered question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next(usize),
    Passed { correct: usize },
    /// Threshold missed; a new set was drawn and counters zeroed
    Reset { correct: usize },
}

/// Trivia gate: enough correct answers in one pass unlock navigation.
///
/// A pass draws `QUIZ_DRAW_SIZE` questions without replacement from the bank.
/// Missing `QUIZ_PASS_THRESHOLD` correct answers redraws and starts over.
pub struct QuizGate {
    bank: Vec<Question>,
    questions: Vec<Question>,
    phase: QuizPhase,
    correct_count: usize,
    pass_number: usize,
    rng: StdRng,
}

impl QuizGate {
    pub fn new() -> Self {
        Self::with_rng(question_bank(), StdRng::from_entropy())
    }

    /// Reproducible draws for tests and `--seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(question_bank(), StdRng::seed_from_u64(seed))
    }

    pub fn with_bank(bank: Vec<Question>, seed: u64) -> Self {
        Self::with_rng(bank, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bank: Vec<Question>, rng: StdRng) -> Self {
        let mut gate = Self {
            bank,
            questions: Vec::new(),
            phase: QuizPhase::Asking(0),
            correct_count: 0,
            pass_number: 0,
            rng,
        };
        gate.start_pass();
        gate
    }

    fn start_pass(&mut self) {
        let size = QUIZ_DRAW_SIZE.min(self.bank.len());
        self.questions = self
            .bank
            .choose_multiple(&mut self.rng, size)
            .cloned()
            .collect();
        self.phase = QuizPhase::Asking(0);
        self.correct_count = 0;
        self.pass_number += 1;
        debug!(pass = self.pass_number, size, "Drew quiz questions");
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// 1 for the first draw, incremented on every reset
    pub fn pass_number(&self) -> usize {
        self.pass_number
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_passed(&self) -> bool {
        self.phase == QuizPhase::Passed
    }

    /// Question waiting for an answer, if any
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::Asking(index) => self.questions.get(index),
            _ => None,
        }
    }

    /// Grade an answer. `None` when no question is being asked.
    pub fn submit(&mut self, answer: &str) -> Option<bool> {
        let QuizPhase::Asking(index) = self.phase else {
            return None;
        };
        let correct = self.questions.get(index)?.is_correct(answer);
        if correct {
            self.correct_count += 1;
        }
        self.phase = QuizPhase::Answered { index, correct };
        debug!(index, correct, "Answer graded");
        Some(correct)
    }

    /// Move past an answered question. `None` unless in `Answered`.
    pub fn advance(&mut self) -> Option<Advance> {
        let QuizPhase::Answered { index, .. } = self.phase else {
            return None;
        };

        if index + 1 < self.questions.len() {
            self.phase = QuizPhase::Asking(index + 1);
            return Some(Advance::Next(index + 1));
        }

        let correct = self.correct_count;
        if correct >= QUIZ_PASS_THRESHOLD {
            self.phase = QuizPhase::Passed;
            info!(correct, "Quiz passed");
            Some(Advance::Passed { correct })
        } else {
            info!(correct, needed = QUIZ_PASS_THRESHOLD, "Quiz failed, drawing again");
            self.start_pass();
            Some(Advance::Reset { correct })
        }
    }
}

impl Default for QuizGate {
    fn default() -> Self {
        Self::new()
    }
}
