use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "smartbacklog", version, about = "SmartBacklog study backlog CLI")]
struct Cli {
    /// Act as this student (default: session.default_owner from config)
    #[arg(long, global = true)]
    owner: Option<String>,
    /// Act with admin rights over every owner's tasks
    #[arg(long, global = true)]
    admin: bool,
    /// Evaluate as of this date, YYYY-MM-DD (default: local today)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Split a backlog of lessons into daily tasks before a deadline
    Distribute(commands::distribute::DistributeArgs),
    /// Backlog totals and the most urgent task
    Summary,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Maintenance commands (require --admin)
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SMARTBACKLOG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn main() {
    init_tracing();
    let Cli {
        owner,
        admin,
        today,
        command,
    } = Cli::parse();
    let context = || commands::Context::load(owner, admin, today);

    let result = match command {
        Commands::Task { action } => context().and_then(|ctx| commands::task::run(&ctx, action)),
        Commands::Distribute(args) => context().and_then(|ctx| commands::distribute::run(&ctx, args)),
        Commands::Summary => context().and_then(|ctx| commands::summary::run(&ctx)),
        Commands::Config { action } => commands::config::run(action),
        Commands::Admin { action } => context().and_then(|ctx| commands::admin::run(&ctx, action)),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
