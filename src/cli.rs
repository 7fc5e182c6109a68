use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::store::{PlannerStore, StoreError};
use crate::utils::{get_current_date_string, parse_date};

#[derive(Parser)]
#[command(name = "swot")]
#[command(about = "Study planner web app - tasks, subjects, pomodoro and journal")]
#[command(version)]
pub struct Cli {
    /// Use development mode (uses separate dev config/data file)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the planner web server (default if no subcommand)
    Serve {
        /// Port to listen on, overriding the configured one
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Quickly add a new task
    AddTask {
        /// Task name
        name: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Subject id to tag the task with
        #[arg(long)]
        subject: Option<String>,
    },
    /// Quickly add a new subject
    AddSubject {
        /// Subject name
        name: String,
    },
    /// Write today's journal entry
    Journal {
        /// Entry text
        entry: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
}

/// Handle the add-task command
pub fn handle_add_task(
    name: String,
    due: Option<String>,
    subject: Option<String>,
    store: &PlannerStore,
) -> Result<(), CliError> {
    // Parse due date if provided
    let date = if let Some(due_str) = due {
        parse_date(&due_str).map_err(|e| {
            CliError::DateParseError(format!("Invalid date format '{}': {}", due_str, e))
        })?;
        due_str
    } else {
        String::new()
    };

    store.add_task(name, date, subject)?;
    println!("Task created successfully");

    Ok(())
}

/// Handle the add-subject command
pub fn handle_add_subject(name: String, store: &PlannerStore) -> Result<(), CliError> {
    store.add_subject(name)?;
    println!("Subject created successfully");

    Ok(())
}

/// Handle the journal command
pub fn handle_journal(entry: String, store: &PlannerStore) -> Result<(), CliError> {
    store.save_journal(entry)?;
    println!("Journal entry saved for {}", get_current_date_string());

    Ok(())
}
