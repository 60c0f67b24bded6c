//! Admin-only maintenance commands.

use std::path::PathBuf;

use clap::Subcommand;

use super::{print_json, CommandResult, Context};

#[derive(Subcommand)]
pub enum AdminAction {
    /// Insert reproducible demo tasks for "demo-student"
    Seed {
        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Number of tasks to generate
        #[arg(long, default_value = "25")]
        count: usize,
    },
    /// Delete every task of every owner
    Clear,
    /// Import a CSV export from an earlier release
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },
}

pub fn run(ctx: &Context, action: AdminAction) -> CommandResult {
    let backlog = ctx.backlog()?;
    let session = &ctx.session;
    match action {
        AdminAction::Seed { seed, count } => {
            let tasks = backlog.seed_demo(session, seed, count)?;
            eprintln!("seeded {} demo tasks", tasks.len());
        }
        AdminAction::Clear => {
            let removed = backlog.clear_all(session)?;
            eprintln!("removed {removed} tasks");
        }
        AdminAction::Import { file } => {
            let tasks = backlog.import_legacy_file(session, &file)?;
            print_json(&tasks)?;
        }
    }
    Ok(())
}
