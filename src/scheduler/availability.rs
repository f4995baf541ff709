use super::counters::RunningCounters;
use super::RotationOptions;
use crate::calendar::LeaveCalendar;
use crate::model::{DaySchedule, Worker};

/// Indices (ordre du roster) des membres éligibles pour le prochain créneau de `today`.
pub(super) fn available_workers(
    workers: &[Worker],
    counters: &RunningCounters,
    today: &DaySchedule,
    leave: &LeaveCalendar,
    opts: &RotationOptions,
) -> Vec<usize> {
    workers
        .iter()
        .enumerate()
        .filter(|(idx, worker)| is_eligible(*idx, worker, counters, today, leave, opts))
        .map(|(idx, _)| idx)
        .collect()
}

fn is_eligible(
    idx: usize,
    worker: &Worker,
    counters: &RunningCounters,
    today: &DaySchedule,
    leave: &LeaveCalendar,
    opts: &RotationOptions,
) -> bool {
    if today.contains(&worker.id) {
        return false;
    }
    if counters.this_week(idx) >= opts.weekly_cap {
        return false;
    }
    if leave.is_on_leave(&worker.id, today.offset) {
        return false;
    }
    if !worker.works_on_weekday(today.day) {
        return false;
    }
    // garde-fou long terme, actif dès la deuxième semaine
    if let Some(avg) = counters.average_per_week(idx) {
        if avg > opts.long_term_ceiling_ratio {
            return false;
        }
    }
    true
}
