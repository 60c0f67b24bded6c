//! Property tests for stored distributions.
//!
//! These go through the service and read the batch back from the store, so
//! they cover labelling and persistence as well as the allocation itself.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use smartbacklog_core::{
    Backlog, DistributeRequest, DistributionOptions, DistributionPolicy, MemoryStore, Session,
    Task, TaskStore,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn stored(policy: DistributionPolicy, units: u32, days: i64) -> Vec<Task> {
    let options = DistributionOptions {
        policy,
        ..DistributionOptions::default()
    };
    let backlog = Backlog::new(MemoryStore::new(), options);
    let session = Session::student("amal", today());
    let request = DistributeRequest {
        subject: "Revision".to_string(),
        total_units: units,
        difficulty: 6,
        deadline: today() + Duration::days(days),
    };
    backlog.distribute(&session, &request).unwrap();
    backlog.store().list_all().unwrap()
}

fn policy() -> impl Strategy<Value = DistributionPolicy> {
    prop_oneof![Just(DistributionPolicy::FrontLoaded), Just(DistributionPolicy::Level)]
}

proptest! {
    #[test]
    fn prop_stored_units_match_request(policy in policy(), units in 1u32..=1000, days in 1i64..=120) {
        let tasks = stored(policy, units, days);
        let total: u64 = tasks.iter().map(|t| u64::from(t.size)).sum();
        prop_assert_eq!(total, u64::from(units));
        prop_assert!(tasks.iter().all(|t| t.size == 1));
    }

    #[test]
    fn prop_stored_dates_stay_before_deadline(policy in policy(), units in 1u32..=500, days in 1i64..=120) {
        let deadline = today() + Duration::days(days);
        for task in stored(policy, units, days) {
            prop_assert!(task.due_date >= today());
            prop_assert!(task.due_date < deadline);
        }
    }

    #[test]
    fn prop_same_inputs_same_schedule(policy in policy(), units in 1u32..=300, days in 1i64..=60) {
        let dates = |tasks: Vec<Task>| -> Vec<(NaiveDate, u32)> {
            tasks.into_iter().map(|t| (t.due_date, t.size)).collect()
        };
        prop_assert_eq!(dates(stored(policy, units, days)), dates(stored(policy, units, days)));
    }

    #[test]
    fn prop_front_loaded_days_never_exceed_quota(units in 1u32..=1000, days in 1i64..=120) {
        let quota = units.div_ceil(days as u32);
        let tasks = stored(DistributionPolicy::FrontLoaded, units, days);
        let mut per_day = std::collections::BTreeMap::new();
        for task in &tasks {
            *per_day.entry(task.due_date).or_insert(0u32) += task.size;
        }
        prop_assert!(per_day.values().all(|n| *n <= quota));
        // Only the last used day may be short.
        let counts: Vec<u32> = per_day.values().copied().collect();
        if let Some((_, full)) = counts.split_last() {
            prop_assert!(full.iter().all(|n| *n == quota));
        }
    }
}
