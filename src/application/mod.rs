// src/application/mod.rs
pub mod audio;
pub mod authenticator;
pub mod navigation;
pub mod note_store;
pub mod notes_screen;
pub mod quiz_gate;
pub mod session_gate;

pub use audio::{AudioBackend, AudioSession, PlaybackGuard};
pub use authenticator::{AuthApi, Authenticator};
pub use navigation::{Route, RouteGuard, Theme};
pub use note_store::{NoteRepository, NoteStore};
pub use notes_screen::{NotePreview, NotesScreen};
pub use quiz_gate::{Advance, QuizGate, QuizPhase};
pub use session_gate::{KeyValueStore, SessionGate};
