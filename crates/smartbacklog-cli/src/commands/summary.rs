use super::{print_json, CommandResult, Context};

pub fn run(ctx: &Context) -> CommandResult {
    let summary = ctx.backlog()?.summary(&ctx.session)?;
    print_json(&summary)
}
