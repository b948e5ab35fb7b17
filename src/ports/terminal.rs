// src/ports/terminal.rs
use crate::application::{NotePreview, Route};
use crate::domain::{DomainError, Note};
use crate::util::text::strip_html;
use std::fmt::Write;
use tracing::instrument;

/// Renders screens as plain terminal text
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    fn status(completed: bool) -> &'static str {
        if completed {
            "✓ Completed"
        } else {
            "○ Pending"
        }
    }

    /// The notes list ("Pokédex") screen
    #[instrument(level = "trace", skip(self, notes), fields(count = notes.len()))]
    pub fn render_notes(&self, notes: &[NotePreview]) -> String {
        let mut out = String::from("Your Pokédex\n\n");
        if notes.is_empty() {
            out.push_str("Your Pokédex is empty!\n");
            return out;
        }

        for note in notes {
            let _ = writeln!(out, "#{:<5} {}  [{}]", note.id, note.title, Self::status(note.completed));
            if !note.text.is_empty() {
                let _ = writeln!(out, "       {}", note.text);
            }
            out.push('\n');
        }
        out
    }

    /// Single note with its full description
    pub fn render_note(&self, note: &Note) -> String {
        format!(
            "#{} {}\n{}\n\n{}\n",
            note.id,
            note.title,
            Self::status(note.completed),
            strip_html(&note.description)
        )
    }

    /// Modal-style message for an error surfaced to the user
    pub fn render_error(&self, error: &DomainError) -> String {
        let mut out = format!("[{}] {}", error.title(), error);
        if *error == DomainError::QuizRequired {
            out.push_str("\nRun `pokenotes quiz` to unlock login.");
        }
        out
    }

    /// Shown after a rejected login armed the retry lock
    pub fn render_quiz_hint(&self) -> &'static str {
        "Run `pokenotes quiz` before trying to log in again."
    }

    pub fn render_welcome(&self) -> String {
        "Welcome to the Pokémon Center\n\n  pokenotes login     Log in to Bill's PC\n  pokenotes register  Join the Trainers' Club\n".to_string()
    }

    /// One-line notice for a redirect, e.g. when a protected screen needs login
    pub fn render_redirect(&self, requested: Route, shown: Route) -> Option<String> {
        (requested != shown).then(|| format!("{} needs a trainer session, go to {}", requested, shown))
    }
}
