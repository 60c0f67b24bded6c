//! Seeded demo data for trying the ranking out.

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::task::{Difficulty, NewTask};

/// Owner assigned to generated demo tasks.
pub const DEMO_OWNER: &str = "demo-student";

const SUBJECTS: [&str; 8] = [
    "Physics",
    "Chemistry",
    "Biology",
    "Mathematics",
    "Arabic",
    "English",
    "History",
    "Geography",
];

/// Generate `count` demo tasks. The same seed always yields the same tasks.
pub fn generate(seed: u64, count: usize, today: NaiveDate) -> Vec<NewTask> {
    let mut rng = Mcg128Xsl64::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let subject = SUBJECTS.choose(&mut rng).copied().unwrap_or(SUBJECTS[0]);
            let difficulty = Difficulty::saturating(rng.gen_range(3..=10));
            NewTask {
                owner: DEMO_OWNER.to_string(),
                subject: format!("{subject} - unit {}", i + 1),
                size: rng.gen_range(1..=15),
                difficulty,
                due_date: today + Duration::days(rng.gen_range(2..=30)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn same_seed_same_tasks() {
        assert_eq!(generate(7, 25, today()), generate(7, 25, today()));
        assert_ne!(generate(7, 25, today()), generate(8, 25, today()));
    }

    #[test]
    fn generated_values_stay_in_range() {
        let tasks = generate(42, 200, today());
        assert_eq!(tasks.len(), 200);
        for task in &tasks {
            assert!(task.validate().is_ok());
            assert!((1..=15).contains(&task.size));
            assert!((3..=10).contains(&task.difficulty.get()));
            let days = (task.due_date - today()).num_days();
            assert!((2..=30).contains(&days));
            assert_eq!(task.owner, DEMO_OWNER);
        }
        assert!(tasks[4].subject.ends_with("unit 5"));
    }
}
