//! CLI definition for the `taskboard` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Single-user task board backed by a local SQLite file.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(version)]
#[command(about = "Manage a three-column task board from the terminal")]
pub struct Cli {
    /// Board database file
    #[arg(long, global = true, value_name = "PATH", default_value = "taskboard.sqlite3")]
    pub db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true, value_name = "ABS_PATH")]
    pub log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error); defaults per build mode
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the board
    Show {
        /// Output the persisted JSON record shape
        #[arg(long)]
        json: bool,
    },

    /// Add a task to the end of a column
    Add {
        /// Task title
        title: String,
        /// Target column (TODO, IN_PROGRESS, DONE)
        #[arg(long, default_value = "TODO")]
        column: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a task from a column
    Delete { column: String, task_id: String },

    /// Change a task's title and/or description
    Update {
        column: String,
        task_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Drag a task onto another task or a column and commit the drop
    Move {
        task_id: String,
        /// Task id or column id to drop onto
        target: String,
    },

    /// Print the core library version
    Version,
}
