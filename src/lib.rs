// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use application::{
    AudioSession, Authenticator, NoteStore, NotesScreen, QuizGate, Route, RouteGuard, SessionGate,
};
use cli::args::{Args, Command};
use constants::QUIZ_ADVANCE_DELAY_MS;
use domain::{DomainError, NoteDraft, NotePatch};
use infrastructure::config::default_config_path;
use infrastructure::{Config, HttpApi, SqliteStore, TerminalAudio};
use ports::{QuizConsole, TerminalPresenter};
use std::io;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

type Store = Rc<SqliteStore>;

pub async fn run(args: Args) -> Result<()> {
    debug!(verbose = args.verbose, "Starting pokenotes");

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    if let Command::InitConfig = args.command {
        Config::create_default(&config_path)?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load_or_default(&config_path)?;
    debug!(?config_path, ?config, "Loaded configuration");
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }
    let store_path = match args.store {
        Some(path) => path,
        None => config.store_path()?,
    };

    let mut screens = Screens::new(&config, Rc::new(SqliteStore::open(&store_path)?))?;
    screens.handle(args.command).await
}

/// Screen controllers sharing one session, API client and audio session
struct Screens {
    session: SessionGate<Store>,
    api: HttpApi,
    audio: AudioSession<TerminalAudio>,
    presenter: TerminalPresenter,
}

impl Screens {
    fn new(config: &Config, store: Store) -> Result<Self> {
        Ok(Self {
            session: SessionGate::new(store),
            api: HttpApi::new(&config.api.base_url, config.timeout())?,
            audio: AudioSession::new(TerminalAudio::new(config.audio.enabled, config.audio.volume)),
            presenter: TerminalPresenter::new(),
        })
    }

    async fn handle(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Welcome => {
                self.enter(Route::Index)?;
                print!("{}", self.presenter.render_welcome());
            }
            Command::Login { email, password } => self.login(&email, &password).await?,
            Command::Register { email, password } => {
                self.enter(Route::Signup)?;
                let next = self.authenticator().register(&email, &password).await?;
                println!("Registration successful! You can log in now.");
                self.enter(next)?;
            }
            Command::Logout => {
                let next = self.authenticator().logout()?;
                println!("See you soon, trainer.");
                self.enter(next)?;
            }
            Command::Status => self.status()?,
            Command::List => self.show_notes().await?,
            Command::Show { note_id, json } => {
                self.enter_protected(Route::Notes)?;
                let note = self.notes().get(note_id).await?;
                if json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&note).context("Failed to serialize note")?
                    );
                } else {
                    print!("{}", self.presenter.render_note(&note));
                }
            }
            Command::Create {
                title,
                description,
                completed,
            } => {
                self.enter_protected(Route::NoteEditor(None))?;
                let draft = NoteDraft {
                    title,
                    description,
                    completed,
                };
                let note = self.notes().create(&draft).await?;
                info!(note_id = note.id, "Note created");
                println!("Created note #{}", note.id);
                self.show_notes().await?;
            }
            Command::Update {
                note_id,
                title,
                description,
                completed,
            } => {
                self.enter_protected(Route::NoteEditor(Some(note_id)))?;
                let patch = NotePatch {
                    title,
                    description,
                    completed,
                };
                if patch.is_empty() {
                    return Err(DomainError::Form("Nothing to update".to_string()).into());
                }
                let note = self.notes().update(note_id, &patch).await?;
                print!("{}", self.presenter.render_note(&note));
            }
            Command::Delete { note_id } => {
                self.enter_protected(Route::Notes)?;
                let mut screen = NotesScreen::new(self.notes());
                screen.on_focus().await?;
                screen.delete(note_id).await?;
                println!("Deleted note #{}", note_id);
                print!("{}", self.presenter.render_notes(&screen.previews()));
            }
            Command::Quiz { seed } => self.quiz(seed).await?,
            Command::InitConfig => bail!("init-config does not open a screen"),
        }
        Ok(())
    }

    /// Resolve a route through the guard and start its theme
    fn enter(&mut self, route: Route) -> Result<Route> {
        let shown = RouteGuard::new(self.session.clone()).enter(route)?;
        if let Some(notice) = self.presenter.render_redirect(route, shown) {
            eprintln!("{}", notice);
        }
        match shown.theme() {
            Some(theme) => self.audio.play(theme.clip, theme.volume),
            None => self.audio.stop(),
        }
        Ok(shown)
    }

    fn enter_protected(&mut self, route: Route) -> Result<()> {
        if self.enter(route)? != route {
            bail!("Log in first: pokenotes login <EMAIL> <PASSWORD>");
        }
        Ok(())
    }

    fn authenticator(&self) -> Authenticator<HttpApi, Store> {
        Authenticator::new(self.api.clone(), self.session.clone())
    }

    fn notes(&self) -> NoteStore<HttpApi, Store> {
        NoteStore::new(self.api.clone(), self.session.clone())
    }

    async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        self.enter(Route::Login)?;
        let next = match self.authenticator().login(email, password).await {
            Ok(next) => next,
            Err(e) => {
                if matches!(e, DomainError::Auth(_)) && self.session.retry_locked()? {
                    eprintln!("{}", self.presenter.render_quiz_hint());
                }
                return Err(e.into());
            }
        };
        println!("Welcome, {}!", email.trim());
        match next {
            Route::Notes => self.show_notes().await,
            other => self.enter(other).map(|_| ()),
        }
    }

    async fn show_notes(&mut self) -> Result<()> {
        self.enter_protected(Route::Notes)?;
        let mut screen = NotesScreen::new(self.notes());
        screen.on_focus().await?;
        print!("{}", self.presenter.render_notes(&screen.previews()));
        Ok(())
    }

    fn status(&mut self) -> Result<()> {
        if self.session.is_authenticated()? {
            println!("Logged in. Your Pokédex is waiting.");
        } else {
            println!("Not logged in.");
        }
        if self.session.retry_locked()? {
            println!("Login is locked until the trainer quiz is passed.");
        }
        Ok(())
    }

    async fn quiz(&mut self, seed: Option<u64>) -> Result<()> {
        self.enter(Route::Quiz)?;
        let mut gate = match seed {
            Some(seed) => QuizGate::with_seed(seed),
            None => QuizGate::new(),
        };

        let stdin = io::stdin();
        let mut console = QuizConsole::new(
            stdin.lock(),
            io::stdout(),
            Duration::from_millis(QUIZ_ADVANCE_DELAY_MS),
        );
        if !console.run(&mut gate).await? {
            bail!("Quiz abandoned, login stays locked");
        }

        self.session.release_retry_lock()?;
        println!("Login unlocked.");
        self.enter(Route::Login)?;
        Ok(())
    }
}
