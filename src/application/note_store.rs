// src/application/note_store.rs
use crate::application::{KeyValueStore, SessionGate};
use crate::domain::{DomainError, Note, NoteDraft, NotePatch, Token};
use async_trait::async_trait;
use tracing::debug;

/// Remote note resource. Every call carries the bearer token.
#[async_trait]
pub trait NoteRepository {
    async fn list_notes(&self, token: &Token) -> Result<Vec<Note>, DomainError>;

    async fn get_note(&self, token: &Token, id: i64) -> Result<Note, DomainError>;

    async fn create_note(&self, token: &Token, draft: &NoteDraft) -> Result<Note, DomainError>;

    async fn update_note(
        &self,
        token: &Token,
        id: i64,
        patch: &NotePatch,
    ) -> Result<Note, DomainError>;

    async fn delete_note(&self, token: &Token, id: i64) -> Result<(), DomainError>;
}

/// CRUD on notes using the token of the current session.
///
/// Without a session every operation fails with `Auth` before reaching the
/// repository. Nothing is cached here.
pub struct NoteStore<R: NoteRepository, S: KeyValueStore> {
    repository: R,
    session: SessionGate<S>,
}

impl<R: NoteRepository, S: KeyValueStore> NoteStore<R, S> {
    pub fn new(repository: R, session: SessionGate<S>) -> Self {
        Self {
            repository,
            session,
        }
    }

    pub async fn list(&self) -> Result<Vec<Note>, DomainError> {
        let token = self.session.require()?;
        let notes = self.repository.list_notes(&token).await?;
        debug!(count = notes.len(), "Fetched notes");
        Ok(notes)
    }

    pub async fn get(&self, id: i64) -> Result<Note, DomainError> {
        let token = self.session.require()?;
        self.repository.get_note(&token, id).await
    }

    pub async fn create(&self, draft: &NoteDraft) -> Result<Note, DomainError> {
        let token = self.session.require()?;
        self.repository.create_note(&token, draft).await
    }

    pub async fn update(&self, id: i64, patch: &NotePatch) -> Result<Note, DomainError> {
        let token = self.session.require()?;
        self.repository.update_note(&token, id, patch).await
    }

    pub async fn remove(&self, id: i64) -> Result<(), DomainError> {
        let token = self.session.require()?;
        self.repository.delete_note(&token, id).await
    }
}
