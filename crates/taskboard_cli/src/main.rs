//! Terminal front end for the task board core.
//!
//! # Responsibility
//! - Parse commands and forward them to `BoardService`.
//! - Render the committed board as text or JSON.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use log::info;
use std::error::Error;
use std::process::ExitCode;
use taskboard_core::db::open_db;
use taskboard_core::{
    core_version, default_log_level, init_logging, Board, BoardService, CommitResult,
    SqliteBoardStorage,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskboard: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    if let Commands::Version = cli.command {
        println!("taskboard_core version={}", core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db)?;
    let mut service = BoardService::new(SqliteBoardStorage::new(&conn));
    info!(
        "event=cli_command module=cli status=start db={}",
        cli.db.display()
    );

    match cli.command {
        Commands::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(service.board())?);
            } else {
                print_board(service.board());
            }
        }
        Commands::Add {
            title,
            column,
            description,
        } => {
            let task = service.add_task(&column, title, description)?;
            println!("{}", task.id);
        }
        Commands::Delete { column, task_id } => {
            service.delete_task(&column, &task_id);
        }
        Commands::Update {
            column,
            task_id,
            title,
            description,
        } => {
            service.update_task(&column, &task_id, title.as_deref(), description.as_deref())?;
        }
        Commands::Move { task_id, target } => {
            if !service.gesture_start(&task_id) {
                return Err(format!("task not found: {task_id}").into());
            }
            service.gesture_over(&target);
            let result = service.gesture_end(Some(&target));
            println!("{}", describe(result));
            print_board(service.board());
        }
        Commands::Version => {}
    }

    Ok(())
}

fn print_board(board: &Board) {
    for (column, tasks) in board.iter() {
        println!("{} ({})", column.title(), tasks.len());
        for task in tasks {
            if task.description.is_empty() {
                println!("  [{}] {}", task.id, task.title);
            } else {
                println!("  [{}] {} - {}", task.id, task.title, task.description);
            }
        }
    }
}

fn describe(result: CommitResult) -> &'static str {
    match result {
        CommitResult::Discarded => "drop discarded",
        CommitResult::Unchanged => "board unchanged",
        CommitResult::Committed => "board updated",
        CommitResult::Repaired => "board reloaded after inconsistent drop",
    }
}
