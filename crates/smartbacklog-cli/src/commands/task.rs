//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::{ArgGroup, Subcommand};
use smartbacklog_core::{Due, NewTaskRequest, TaskId};

use super::{print_json, CommandResult, Context};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task by hand
    #[command(group(ArgGroup::new("when").required(true).args(["due", "days"])))]
    Add {
        /// Subject name
        subject: String,
        /// Number of lessons
        #[arg(long)]
        size: u32,
        /// Difficulty from 1 to 10
        #[arg(long, allow_negative_numbers = true)]
        difficulty: i64,
        /// Exam date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Days until the exam (1-365)
        #[arg(long)]
        days: Option<u32>,
    },
    /// List tasks ranked by urgency
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },
    /// Mark a task as done
    Done {
        /// Task ID
        id: TaskId,
    },
    /// Mark a done task as open again
    Undo {
        /// Task ID
        id: TaskId,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: TaskId,
    },
}

pub fn run(ctx: &Context, action: TaskAction) -> CommandResult {
    let backlog = ctx.backlog()?;
    let session = &ctx.session;
    match action {
        TaskAction::Add {
            subject,
            size,
            difficulty,
            due,
            days,
        } => {
            let due = match (due, days) {
                (Some(date), _) => Due::On(date),
                (None, Some(days)) => Due::InDays(days),
                (None, None) => return Err("either --due or --days is required".into()),
            };
            let task = backlog.create_task(
                session,
                NewTaskRequest {
                    subject,
                    size,
                    difficulty,
                    due,
                },
            )?;
            print_json(&task)?;
        }
        TaskAction::List { all } => {
            print_json(&backlog.list_tasks(session, all)?)?;
        }
        TaskAction::Done { id } => {
            print_json(&backlog.set_completed(session, id, true)?)?;
        }
        TaskAction::Undo { id } => {
            print_json(&backlog.set_completed(session, id, false)?)?;
        }
        TaskAction::Delete { id } => {
            print_json(&backlog.delete_task(session, id)?)?;
        }
    }
    Ok(())
}
