// src/ports/quiz_console.rs
use crate::application::{Advance, QuizGate};
use crate::constants::{QUIZ_DRAW_SIZE, QUIZ_PASS_THRESHOLD};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::Duration;

/// Line-based front end for the quiz gate
pub struct QuizConsole<R: BufRead, W: Write> {
    input: R,
    output: W,
    delay: Duration,
}

impl<R: BufRead, W: Write> QuizConsole<R, W> {
    pub fn new(input: R, output: W, delay: Duration) -> Self {
        Self {
            input,
            output,
            delay,
        }
    }

    /// Ask until the gate is passed. Returns `false` if input ends first.
    pub async fn run(&mut self, gate: &mut QuizGate) -> Result<bool> {
        writeln!(
            self.output,
            "Who's that Pokémon? Answer {} of {} correctly to continue.\n",
            QUIZ_PASS_THRESHOLD, QUIZ_DRAW_SIZE
        )?;

        while !gate.is_passed() {
            let Some(question) = gate.current_question() else {
                break;
            };
            let prompt = question.prompt.clone();
            let expected = question.answer.clone();
            write!(self.output, "{} ", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read answer")?;
            if read == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }

            if gate.submit(&line) == Some(true) {
                writeln!(self.output, "Correct!")?;
            } else {
                writeln!(self.output, "Wrong! It was {}.", expected)?;
            }

            tokio::time::sleep(self.delay).await;

            match gate.advance() {
                Some(Advance::Passed { correct }) => {
                    writeln!(self.output, "\n{} correct. You may continue, trainer!", correct)?
                }
                Some(Advance::Reset { correct }) => writeln!(
                    self.output,
                    "\nOnly {} correct. New questions, try again!\n",
                    correct
                )?,
                Some(Advance::Next(_)) | None => {}
            }
        }
        Ok(gate.is_passed())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
