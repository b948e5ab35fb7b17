// src/application/navigation.rs
use crate::application::{KeyValueStore, SessionGate};
use crate::domain::DomainError;
use std::fmt;
use tracing::{debug, info};

/// Background theme of a screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub clip: &'static str,
    pub volume: f32,
}

/// Screens of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Login,
    Signup,
    Notes,
    /// Create a note, or edit the one with the given id
    NoteEditor(Option<i64>),
    /// Trivia screen shown after rejected credentials
    Quiz,
}

impl Route {
    /// Screens that need a present session
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Notes | Route::NoteEditor(_))
    }

    pub fn theme(&self) -> Option<Theme> {
        let (clip, volume) = match self {
            Route::Index => ("index.mp3", 0.3),
            Route::Login => ("login.mp3", 0.2),
            Route::Signup => ("register.mp3", 0.2),
            Route::Notes => ("logged.mp3", 0.2),
            Route::NoteEditor(_) | Route::Quiz => return None,
        };
        Some(Theme { clip, volume })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Index => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Signup => write!(f, "/signup"),
            Route::Notes => write!(f, "/notes"),
            Route::NoteEditor(None) => write!(f, "/create-note"),
            Route::NoteEditor(Some(id)) => write!(f, "/create-note?id={}", id),
            Route::Quiz => write!(f, "/wrong-data"),
        }
    }
}

/// Redirects protected routes to the login screen when logged out
pub struct RouteGuard<S: KeyValueStore> {
    session: SessionGate<S>,
}

impl<S: KeyValueStore> RouteGuard<S> {
    pub fn new(session: SessionGate<S>) -> Self {
        Self { session }
    }

    /// Returns the route that is actually shown
    pub fn enter(&self, route: Route) -> Result<Route, DomainError> {
        if route.is_protected() && !self.session.is_authenticated()? {
            info!(requested = %route, "No session, redirecting to login");
            return Ok(Route::Login);
        }
        debug!(%route, "Entering route");
        Ok(route)
    }
}
