use chrono::NaiveDate;
use clap::Args;
use smartbacklog_core::DistributeRequest;

use super::{print_json, CommandResult, Context};

#[derive(Args)]
pub struct DistributeArgs {
    /// Subject name; parts are labelled "<subject> - part N"
    subject: String,
    /// Total lessons to spread out
    #[arg(long)]
    units: u32,
    /// Difficulty from 1 to 10
    #[arg(long, allow_negative_numbers = true)]
    difficulty: i64,
    /// Exam date (YYYY-MM-DD); the last study day is the day before
    #[arg(long)]
    deadline: NaiveDate,
    /// Print the plan without storing anything
    #[arg(long)]
    dry_run: bool,
}

pub fn run(ctx: &Context, args: DistributeArgs) -> CommandResult {
    let backlog = ctx.backlog()?;
    let request = DistributeRequest {
        subject: args.subject,
        total_units: args.units,
        difficulty: args.difficulty,
        deadline: args.deadline,
    };
    if args.dry_run {
        print_json(&backlog.plan_distribution(&ctx.session, &request)?)
    } else {
        print_json(&backlog.distribute(&ctx.session, &request)?)
    }
}
