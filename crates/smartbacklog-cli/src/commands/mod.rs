pub mod admin;
pub mod config;
pub mod distribute;
pub mod summary;
pub mod task;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use smartbacklog_core::{Backlog, Config, Session, SqliteStore};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Caller session plus the loaded config, shared by every backlog command.
pub struct Context {
    pub session: Session,
    pub config: Config,
}

impl Context {
    pub fn load(
        owner: Option<String>,
        admin: bool,
        today: Option<NaiveDate>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let owner = owner
            .map(|o| o.trim().to_string())
            .unwrap_or_else(|| config.session.default_owner.clone());
        if owner.is_empty() {
            return Err("owner must not be empty".into());
        }
        let today = today.unwrap_or_else(|| Local::now().date_naive());
        let session = if admin {
            Session::admin(owner, today)
        } else {
            Session::student(owner, today)
        };
        tracing::debug!(owner = %session.owner, role = %session.role, %today, "session resolved");
        Ok(Self { session, config })
    }

    pub fn backlog(&self) -> Result<Backlog<SqliteStore>, Box<dyn std::error::Error>> {
        let store = SqliteStore::open(&self.config.storage.database_file)?;
        Ok(Backlog::new(store, self.config.distribution_options()))
    }
}

pub fn print_json<T: Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
