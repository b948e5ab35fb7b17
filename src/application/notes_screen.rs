// src/application/notes_screen.rs
use crate::application::{KeyValueStore, NoteRepository, NoteStore};
use crate::constants::NOTE_PREVIEW_CHARS;
use crate::domain::{DomainError, Note};
use crate::util::text::preview;
use tracing::{info, warn};

/// One row of the notes list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePreview {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub text: String,
}

/// State behind the notes list ("Pokédex") screen.
///
/// Holds only the result of the last fetch; every focus refetches.
pub struct NotesScreen<R: NoteRepository, S: KeyValueStore> {
    store: NoteStore<R, S>,
    notes: Vec<Note>,
}

impl<R: NoteRepository, S: KeyValueStore> NotesScreen<R, S> {
    pub fn new(store: NoteStore<R, S>) -> Self {
        Self {
            store,
            notes: Vec::new(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub async fn on_focus(&mut self) -> Result<&[Note], DomainError> {
        self.notes = self.store.list().await?;
        Ok(&self.notes)
    }

    pub fn previews(&self) -> Vec<NotePreview> {
        self.notes
            .iter()
            .map(|n| NotePreview {
                id: n.id,
                title: n.title.clone(),
                completed: n.completed,
                text: preview(&n.description, NOTE_PREVIEW_CHARS),
            })
            .collect()
    }

    /// Drops the note from the visible list once the server confirmed it
    pub async fn delete(&mut self, id: i64) -> Result<(), DomainError> {
        if let Err(e) = self.store.remove(id).await {
            warn!(note_id = id, error = %e, "Could not delete note");
            return Err(e);
        }
        self.notes.retain(|n| n.id != id);
        info!(note_id = id, "Note released");
        Ok(())
    }
}
