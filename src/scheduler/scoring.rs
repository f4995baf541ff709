use super::counters::RunningCounters;
use super::RotationOptions;

/// Score d'équité d'un candidat : plus il est élevé, plus le membre est prioritaire.
pub(super) fn fairness_score(idx: usize, counters: &RunningCounters, opts: &RotationOptions) -> f64 {
    let short_term = 1.0 / (f64::from(counters.this_week(idx)) + opts.epsilon);

    let completed = counters.completed_weeks();
    let long_term = if completed == 0 {
        1.0
    } else {
        let expected = f64::from(completed) * opts.target_days_per_week;
        1.0 / ((f64::from(counters.cumulative(idx)) - expected).abs() + 1.0)
    };

    opts.score_weights.short_term * short_term + opts.score_weights.long_term * long_term
}

/// Meilleur candidat ; à score égal, le premier rencontré l'emporte.
pub(super) fn select_fair(
    candidates: &[usize],
    counters: &RunningCounters,
    opts: &RotationOptions,
) -> Option<usize> {
    match candidates {
        [] => None,
        [only] => Some(*only),
        [first, rest @ ..] => {
            let mut best = (*first, fairness_score(*first, counters, opts));
            for &idx in rest {
                let score = fairness_score(idx, counters, opts);
                if score > best.1 {
                    best = (idx, score);
                }
            }
            Some(best.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_fewer_days_this_week() {
        let opts = RotationOptions::default();
        let mut counters = RunningCounters::new(3, 6);
        counters.record(0);
        counters.record(1);
        counters.record(1);
        assert_eq!(select_fair(&[0, 1, 2], &counters, &opts), Some(2));
        assert_eq!(select_fair(&[1, 0], &counters, &opts), Some(0));
    }

    #[test]
    fn ties_go_to_first_encountered() {
        let opts = RotationOptions::default();
        let counters = RunningCounters::new(4, 6);
        assert_eq!(select_fair(&[2, 0, 3], &counters, &opts), Some(2));
        assert_eq!(select_fair(&[], &counters, &opts), None);
        assert_eq!(select_fair(&[3], &counters, &opts), Some(3));
    }

    #[test]
    fn long_term_favours_workers_near_expected_pace() {
        let opts = RotationOptions::default();
        let mut counters = RunningCounters::new(3, 6);
        // semaine 1 : 0 jour, 2 jours, 3 jours
        counters.record(1);
        counters.record(1);
        for _ in 0..3 {
            counters.record(2);
        }
        counters.close_week();

        // attendu 2.5 : idx 1 et 2 sont à 0.5, idx 0 à 2.5
        let s0 = fairness_score(0, &counters, &opts);
        let s1 = fairness_score(1, &counters, &opts);
        let s2 = fairness_score(2, &counters, &opts);
        assert!((s1 - s2).abs() < 1e-12);
        assert!(s1 > s0);
        assert_eq!(select_fair(&[0, 2, 1], &counters, &opts), Some(2));

        let expected_s0 = 0.6 * (1.0 / 0.1) + 0.4 * (1.0 / 3.5);
        assert!((s0 - expected_s0).abs() < 1e-12);
    }
}
