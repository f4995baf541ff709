use super::assignment::{assign_day, DayInputs};
use super::counters::RunningCounters;
use super::Scheduler;
use crate::model::{RotationPlan, WeekSchedule};
use crate::report::FairnessReport;

/// Résultat d'un run : le plan et son rapport d'équité.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationOutcome {
    pub plan: RotationPlan,
    pub report: FairnessReport,
}

pub(super) fn run_horizon(scheduler: &Scheduler) -> RotationOutcome {
    let opts = &scheduler.opts;
    let inputs = DayInputs {
        workers: &scheduler.workers,
        leave: &scheduler.leave,
        opts,
    };
    let mut counters = RunningCounters::new(scheduler.workers.len(), opts.horizon_weeks);
    let mut plan = RotationPlan {
        start_date: scheduler.leave.start_date(),
        weeks: Vec::with_capacity(usize::from(opts.horizon_weeks)),
        shortfalls: Vec::new(),
    };

    for week in 1..=opts.horizon_weeks {
        let mut schedule = WeekSchedule::new(week);
        #[cfg(feature = "logging")]
        let before = plan.shortfalls.len();

        for day in schedule.days.iter_mut() {
            assign_day(&inputs, week, day, &mut counters, &mut plan.shortfalls);
        }

        #[cfg(feature = "logging")]
        {
            for shortfall in &plan.shortfalls[before..] {
                tracing::warn!(%shortfall, "staffing shortfall");
            }
            tracing::debug!(
                week,
                assignments = schedule.days.iter().map(|d| d.len()).sum::<usize>(),
                "week scheduled"
            );
        }

        counters.close_week();
        plan.weeks.push(schedule);
    }

    let report = FairnessReport::build(&scheduler.workers, counters.tallies(), opts);
    RotationOutcome { plan, report }
}
