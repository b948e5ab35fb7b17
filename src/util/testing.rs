// src/util/testing.rs

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{AudioBackend, AuthApi, KeyValueStore, NoteRepository};
use crate::domain::{Credentials, DomainError, Note, NoteDraft, NotePatch, Token};

/// In-memory stand-in for the secure session store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.lock().expect("store lock").get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries
            .lock()
            .expect("store lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.entries.lock().expect("store lock").remove(key);
        Ok(())
    }
}

/// Shared log of strings recorded by a mock, readable after the mock moved
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    fn push(&self, entry: impl Into<String>) {
        self.0.lock().expect("recorder lock").push(entry.into());
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().expect("recorder lock").clone()
    }
}

/// Shared call counter
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Mock note resource keeping notes in memory.
///
/// Records the token of every call so tests can check what was attached.
///
/// # Examples
///
/// ```
/// use pokenotes::util::testing::MockNoteRepository;
/// use pokenotes::domain::Note;
///
/// let mock = MockNoteRepository::builder()
///     .with_note(Note {
///         id: 1,
///         title: "Pikachu".to_string(),
///         description: "Electric mouse".to_string(),
///         completed: false,
///     })
///     .build();
/// ```
pub struct MockNoteRepository {
    notes: Mutex<BTreeMap<i64, Note>>,
    next_id: AtomicUsize,
    seen_tokens: Recorder,
    failure: Option<DomainError>,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    pub fn seen_tokens(&self) -> Recorder {
        self.seen_tokens.clone()
    }

    fn enter(&self, token: &Token) -> Result<(), DomainError> {
        self.seen_tokens.push(token.as_str());
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn list_notes(&self, token: &Token) -> Result<Vec<Note>, DomainError> {
        self.enter(token)?;
        Ok(self.notes.lock().expect("notes lock").values().cloned().collect())
    }

    async fn get_note(&self, token: &Token, id: i64) -> Result<Note, DomainError> {
        self.enter(token)?;
        self.notes
            .lock()
            .expect("notes lock")
            .get(&id)
            .cloned()
            .ok_or(DomainError::NoteNotFound(id))
    }

    async fn create_note(&self, token: &Token, draft: &NoteDraft) -> Result<Note, DomainError> {
        self.enter(token)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        let note = Note {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            completed: draft.completed,
        };
        self.notes.lock().expect("notes lock").insert(id, note.clone());
        Ok(note)
    }

    async fn update_note(
        &self,
        token: &Token,
        id: i64,
        patch: &NotePatch,
    ) -> Result<Note, DomainError> {
        self.enter(token)?;
        let mut notes = self.notes.lock().expect("notes lock");
        let note = notes.get_mut(&id).ok_or(DomainError::NoteNotFound(id))?;
        if let Some(title) = &patch.title {
            note.title = title.clone();
        }
        if let Some(description) = &patch.description {
            note.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            note.completed = completed;
        }
        Ok(note.clone())
    }

    async fn delete_note(&self, token: &Token, id: i64) -> Result<(), DomainError> {
        self.enter(token)?;
        self.notes
            .lock()
            .expect("notes lock")
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NoteNotFound(id))
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    notes: BTreeMap<i64, Note>,
    failure: Option<DomainError>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
            failure: None,
        }
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.insert(note.id, note);
        self
    }

    /// Every call fails with the given error after recording its token
    pub fn with_failure(mut self, error: DomainError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn build(self) -> MockNoteRepository {
        let next_id = self.notes.keys().max().map_or(1, |max| max + 1) as usize;
        MockNoteRepository {
            notes: Mutex::new(self.notes),
            next_id: AtomicUsize::new(next_id),
            seen_tokens: Recorder::default(),
            failure: self.failure,
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock of the auth endpoints with scripted outcomes
pub struct MockAuthApi {
    login: Result<Token, DomainError>,
    register: Result<(), DomainError>,
    calls: CallCounter,
}

impl MockAuthApi {
    pub fn builder() -> MockAuthApiBuilder {
        MockAuthApiBuilder::new()
    }

    /// Counter of requests that reached the "server"
    pub fn calls(&self) -> CallCounter {
        self.calls.clone()
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, _credentials: &Credentials) -> Result<Token, DomainError> {
        self.calls.hit();
        self.login.clone()
    }

    async fn register(&self, _credentials: &Credentials) -> Result<(), DomainError> {
        self.calls.hit();
        self.register.clone()
    }
}

pub struct MockAuthApiBuilder {
    login: Result<Token, DomainError>,
    register: Result<(), DomainError>,
}

impl MockAuthApiBuilder {
    pub fn new() -> Self {
        Self {
            login: Err(DomainError::CredentialsRejected("Invalid credentials".to_string())),
            register: Ok(()),
        }
    }

    pub fn with_login_token(mut self, token: &str) -> Self {
        self.login = Ok(Token::new(token));
        self
    }

    pub fn with_login_rejected(mut self, message: &str) -> Self {
        self.login = Err(DomainError::CredentialsRejected(message.to_string()));
        self
    }

    /// Non-2xx login answer that is not a credential rejection, e.g. a 503
    pub fn with_login_server_error(mut self, message: &str) -> Self {
        self.login = Err(DomainError::Auth(message.to_string()));
        self
    }

    pub fn with_network_failure(mut self) -> Self {
        let error = DomainError::Network("connection refused".to_string());
        self.login = Err(error.clone());
        self.register = Err(error);
        self
    }

    pub fn with_register_rejected(mut self, message: &str) -> Self {
        self.register = Err(DomainError::Validation(message.to_string()));
        self
    }

    pub fn build(self) -> MockAuthApi {
        MockAuthApi {
            login: self.login,
            register: self.register,
            calls: CallCounter::default(),
        }
    }
}

impl Default for MockAuthApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Audio backend recording `start <clip>` / `release <clip>` events
#[derive(Debug, Default)]
pub struct RecordingAudioBackend {
    events: Recorder,
    fail: bool,
}

impl RecordingAudioBackend {
    pub fn failing() -> Self {
        Self {
            events: Recorder::default(),
            fail: true,
        }
    }

    pub fn events(&self) -> Recorder {
        self.events.clone()
    }
}

impl AudioBackend for RecordingAudioBackend {
    type Handle = String;

    fn start(&mut self, clip: &str, _volume: f32) -> Result<String> {
        if self.fail {
            bail!("no audio device");
        }
        self.events.push(format!("start {}", clip));
        Ok(clip.to_string())
    }

    fn release(&mut self, handle: String) {
        self.events.push(format!("release {}", handle));
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "actix_server", "rusqlite"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
