// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// REST API base URL, overrides the config file
    #[arg(short, long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Session store file, overrides the config file
    #[arg(short, long, value_name = "STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Screen to open
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the welcome screen
    Welcome,

    /// Log in and open your Pokédex
    Login {
        /// Email address
        #[arg(value_name = "EMAIL")]
        email: String,

        /// Password (at least 8 characters)
        #[arg(value_name = "PASSWORD")]
        password: String,
    },

    /// Create a trainer account
    Register {
        /// Email address
        #[arg(value_name = "EMAIL")]
        email: String,

        /// Password (at least 8 characters)
        #[arg(value_name = "PASSWORD")]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show whether a session is stored
    Status,

    /// List all notes
    List,

    /// Show one note
    Show {
        /// Note ID to show
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// Output note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    Create {
        /// Note title
        #[arg(value_name = "TITLE")]
        title: String,

        /// Note description (may contain HTML)
        #[arg(short, long, default_value = "")]
        description: String,

        /// Mark the note as completed
        #[arg(long)]
        completed: bool,
    },

    /// Change fields of a note
    Update {
        /// Note ID to update
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// Completed flag (true/false)
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },

    /// Answer the trainer quiz to unlock login after rejected credentials
    Quiz {
        /// Seed for the question draw
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write a default config file
    InitConfig,
}
