// src/constants.rs
//
// Application-wide constants shared by the session, quiz and presentation code.

/// Key under which the bearer token is persisted in the session store.
///
/// Used in: `application/session_gate.rs`
pub const SESSION_TOKEN_KEY: &str = "jwt";

/// Key marking that a rejected login must be followed by a passed quiz.
///
/// Used in: `application/session_gate.rs`
pub const QUIZ_REQUIRED_KEY: &str = "quiz_required";

/// Minimum password length accepted by the login and signup forms.
pub const MIN_SECRET_LEN: usize = 8;

/// Number of questions drawn from the bank for one quiz pass.
pub const QUIZ_DRAW_SIZE: usize = 8;

/// Correct answers needed within one pass to unlock navigation.
pub const QUIZ_PASS_THRESHOLD: usize = 5;

/// Pause between showing whether an answer was right and the next question.
///
/// Used in: `lib.rs`
pub const QUIZ_ADVANCE_DELAY_MS: u64 = 1500;

/// Characters of plain text shown for a note description in the list.
pub const NOTE_PREVIEW_CHARS: usize = 200;

/// Default REST API base URL when neither config nor CLI provide one.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Request timeout for every REST call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
