//! Backlog distribution: splitting one large backlog into dated unit tasks.
//!
//! Given `total_units` and a deadline, every unit becomes its own task of
//! size 1, scheduled on a day in `[today, deadline)`. The default
//! [`DistributionPolicy::FrontLoaded`] gives each day up to
//! `ceil(total_units / days_available)` units and stops once the backlog is
//! used up, so the last days may be short or empty.
//!
//! ```rust,ignore
//! let plan = distribution::plan(&request, today, &DistributionOptions::default())?;
//! assert_eq!(plan.tasks.len(), request.total_units as usize);
//! ```

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Difficulty, NewTask};
use crate::error::{CoreError, Result, ValidationError};

/// How units are spread over the available days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionPolicy {
    /// Fill each day up to the ceiling quota, earliest days first.
    #[default]
    FrontLoaded,
    /// Spread the remainder so no two days differ by more than one unit.
    Level,
}

/// Tunables for one distribution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionOptions {
    pub policy: DistributionPolicy,
    /// Largest backlog accepted in a single request
    pub max_total_units: u32,
    /// Text placed between the subject and the part number
    pub label_separator: String,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self {
            policy: DistributionPolicy::FrontLoaded,
            max_total_units: 1000,
            label_separator: " - part ".to_string(),
        }
    }
}

/// A backlog declaration. Never persisted itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRequest {
    pub owner: String,
    pub subject: String,
    pub total_units: u32,
    pub difficulty: Difficulty,
    /// Exclusive: no unit is scheduled on or after this date
    pub deadline: NaiveDate,
}

/// Units assigned to one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAllocation {
    pub date: NaiveDate,
    pub units: u32,
}

/// The computed batch, ready to hand to a task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionPlan {
    pub days_available: i64,
    /// Most units placed on any single day
    pub daily_quota: u32,
    /// Non-empty days only, in date order
    pub days: Vec<DayAllocation>,
    pub tasks: Vec<NewTask>,
}

impl DistributionPlan {
    pub fn total_units(&self) -> u64 {
        self.tasks.iter().map(|t| u64::from(t.size)).sum()
    }
}

/// Compute the sub-tasks for `request` without touching any store.
///
/// # Errors
/// - `InvalidInput` for a blank subject or owner
/// - `InvalidAmount` when `total_units` is 0 or above `options.max_total_units`
/// - `InvalidDeadline` when `deadline <= today`
pub fn plan(
    request: &DistributionRequest,
    today: NaiveDate,
    options: &DistributionOptions,
) -> Result<DistributionPlan> {
    let subject = request.subject.trim();
    if subject.is_empty() {
        return Err(ValidationError::EmptySubject.into());
    }
    if request.owner.trim().is_empty() {
        return Err(ValidationError::invalid("owner", "must not be empty").into());
    }
    if request.total_units < 1 || request.total_units > options.max_total_units {
        return Err(CoreError::InvalidAmount {
            total_units: request.total_units,
            max: options.max_total_units,
        });
    }
    if request.deadline <= today {
        return Err(CoreError::InvalidDeadline {
            deadline: request.deadline,
            today,
        });
    }

    let days_available = (request.deadline - today).num_days();
    let allocations = allocate(request.total_units, days_available, options.policy);
    let daily_quota = allocations.iter().copied().max().unwrap_or(0);

    let mut days = Vec::with_capacity(allocations.len());
    let mut tasks = Vec::with_capacity(request.total_units as usize);
    for (offset, units) in allocations.into_iter().enumerate() {
        let date = today + Duration::days(offset as i64);
        for _ in 0..units {
            let part = tasks.len() + 1;
            tasks.push(NewTask {
                owner: request.owner.clone(),
                subject: format!("{subject}{}{part}", options.label_separator),
                size: 1,
                difficulty: request.difficulty,
                due_date: date,
            });
        }
        days.push(DayAllocation { date, units });
    }

    Ok(DistributionPlan {
        days_available,
        daily_quota,
        days,
        tasks,
    })
}

/// Units per day from day 0 onwards. Trailing empty days are omitted.
fn allocate(total_units: u32, days_available: i64, policy: DistributionPolicy) -> Vec<u32> {
    let total = u64::from(total_units);
    let days = days_available.max(1) as u64;
    let mut remaining = total;
    let mut out = Vec::new();

    match policy {
        DistributionPolicy::FrontLoaded => {
            let quota = total.div_ceil(days);
            while remaining > 0 {
                let units = quota.min(remaining);
                out.push(units as u32);
                remaining -= units;
            }
        }
        DistributionPolicy::Level => {
            let base = total / days;
            let extra = total % days;
            let mut day = 0u64;
            while remaining > 0 {
                let units = base + u64::from(day < extra);
                out.push(units as u32);
                remaining -= units;
                day += 1;
            }
        }
    }
    out
}
