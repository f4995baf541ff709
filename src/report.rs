//! Rapport d'équité calculé en fin d'horizon.
//!
//! | Mesure | Définition |
//! |--------|-----------|
//! | mean | moyenne des jours travaillés |
//! | std_dev | écart-type (population) |
//! | range | max - min |
//! | fairness_score | 1 / (std_dev + ε), plus haut = plus équitable |

use crate::model::{Worker, WorkerId};
use crate::scheduler::{RotationOptions, WorkerTally};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Distribution {
    pub mean: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
    pub range: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerStats {
    pub worker: WorkerId,
    pub name: String,
    pub total_days: u32,
    pub avg_days_per_week: f64,
    /// Jours travaillés par semaine, dans l'ordre.
    pub weekly: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessReport {
    pub total_days: Distribution,
    pub fairness_score: f64,
    pub workers: Vec<WorkerStats>,
}

impl FairnessReport {
    /// Construit le rapport à partir des compteurs finaux (indexés comme `workers`).
    pub fn build(workers: &[Worker], tallies: &[WorkerTally], opts: &RotationOptions) -> Self {
        let totals: Vec<u32> = tallies.iter().map(|t| t.cumulative).collect();
        let total_days = distribution(&totals);
        let fairness_score = 1.0 / (total_days.std_dev + opts.epsilon);

        let weeks = f64::from(opts.horizon_weeks.max(1));
        let workers = workers
            .iter()
            .zip(tallies)
            .map(|(worker, tally)| WorkerStats {
                worker: worker.id.clone(),
                name: worker.name.clone(),
                total_days: tally.cumulative,
                avg_days_per_week: f64::from(tally.cumulative) / weeks,
                weekly: tally.weekly.clone(),
            })
            .collect();

        Self {
            total_days,
            fairness_score,
            workers,
        }
    }

    pub fn stats_for(&self, worker: &WorkerId) -> Option<&WorkerStats> {
        self.workers.iter().find(|s| &s.worker == worker)
    }
}

fn distribution(totals: &[u32]) -> Distribution {
    let (Some(&min), Some(&max)) = (totals.iter().min(), totals.iter().max()) else {
        return Distribution::default();
    };
    let n = totals.len() as f64;
    let mean = totals.iter().map(|&t| f64::from(t)).sum::<f64>() / n;
    let variance = totals
        .iter()
        .map(|&t| (f64::from(t) - mean).powi(2))
        .sum::<f64>()
        / n;

    Distribution {
        mean,
        std_dev: variance.sqrt(),
        min,
        max,
        range: max - min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Capability;

    #[test]
    fn population_statistics() {
        let d = distribution(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert_eq!(d.mean, 5.0);
        assert_eq!(d.std_dev, 2.0);
        assert_eq!((d.min, d.max, d.range), (2, 9, 7));
    }

    #[test]
    fn empty_roster_yields_zero_distribution() {
        let report = FairnessReport::build(&[], &[], &RotationOptions::default());
        assert_eq!(report.total_days, Distribution::default());
        assert!((report.fairness_score - 10.0).abs() < 1e-9);
        assert!(report.workers.is_empty());
    }

    #[test]
    fn keeps_weekly_series_per_worker() {
        let workers = vec![
            Worker::new("1", "Alice", [Capability::Generic]),
            Worker::new("2", "Bob", [Capability::Generic]),
        ];
        let tallies = vec![
            WorkerTally {
                this_week: 0,
                cumulative: 5,
                weekly: vec![3, 2],
            },
            WorkerTally {
                this_week: 0,
                cumulative: 5,
                weekly: vec![2, 3],
            },
        ];
        let opts = RotationOptions {
            horizon_weeks: 2,
            ..RotationOptions::default()
        };
        let report = FairnessReport::build(&workers, &tallies, &opts);
        let bob = report.stats_for(&WorkerId::new("2")).unwrap();
        assert_eq!(bob.weekly, vec![2, 3]);
        assert_eq!(bob.avg_days_per_week, 2.5);
        assert_eq!(report.total_days.std_dev, 0.0);
        assert!((report.fairness_score - 10.0).abs() < 1e-9);
    }
}
