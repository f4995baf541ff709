use super::{Scheduler, Violation, ViolationKind};
use crate::calendar::absolute_offset;
use crate::model::{RotationPlan, WorkerId};
use std::collections::{BTreeMap, BTreeSet};

/// Semaine, jour et offset sont recalculés depuis la position dans le plan ;
/// les valeurs stockées ne servent qu'à signaler une incohérence.
pub(super) fn detect_violations(scheduler: &Scheduler, plan: &RotationPlan) -> Vec<Violation> {
    let mut out = Vec::new();

    if plan.weeks.len() != usize::from(scheduler.opts.horizon_weeks) {
        out.push(Violation {
            worker: None,
            week: u16::try_from(plan.weeks.len()).unwrap_or(u16::MAX),
            offset: None,
            kind: ViolationKind::HorizonMismatch,
        });
    }

    for (week_idx, week) in plan.weeks.iter().enumerate() {
        let Ok(week_no) = u16::try_from(week_idx + 1) else {
            break;
        };
        let mut per_week: BTreeMap<&WorkerId, u32> = BTreeMap::new();

        for (day_idx, day) in week.days.iter().enumerate() {
            // day_idx < 7
            let day_no = day_idx as u8 + 1;
            let offset = absolute_offset(week_no, day_no);
            if week.week != week_no || day.day != day_no || day.offset != offset {
                out.push(Violation {
                    worker: None,
                    week: week_no,
                    offset: Some(offset),
                    kind: ViolationKind::MisplacedDay,
                });
            }

            let mut seen: BTreeSet<&WorkerId> = BTreeSet::new();
            for assignment in &day.assignments {
                let id = &assignment.worker;
                let violation = |kind| Violation {
                    worker: Some(id.clone()),
                    week: week_no,
                    offset: Some(offset),
                    kind,
                };

                if !seen.insert(id) {
                    out.push(violation(ViolationKind::DoubleBooking));
                    continue;
                }
                *per_week.entry(id).or_default() += 1;

                let Some(worker) = scheduler.find_worker(id) else {
                    out.push(violation(ViolationKind::UnknownWorker));
                    continue;
                };
                if scheduler.leave.is_on_leave(id, offset) {
                    out.push(violation(ViolationKind::OnLeave));
                }
                if !worker.works_on_weekday(day_no) {
                    out.push(violation(ViolationKind::OutsideFixedRotation));
                }
            }
        }

        for (id, count) in per_week {
            if count > scheduler.opts.weekly_cap {
                out.push(Violation {
                    worker: Some(id.clone()),
                    week: week_no,
                    offset: None,
                    kind: ViolationKind::OverWeeklyCap,
                });
            }
        }
    }

    out
}
