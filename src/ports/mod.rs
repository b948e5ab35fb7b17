// src/ports/mod.rs
pub mod quiz_console;
pub mod terminal;

pub use quiz_console::QuizConsole;
pub use terminal::TerminalPresenter;
