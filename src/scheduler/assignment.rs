use super::availability::available_workers;
use super::counters::RunningCounters;
use super::scoring::select_fair;
use super::{RotationOptions, Shortfall, ShortfallKind};
use crate::calendar::LeaveCalendar;
use crate::model::{Capability, DaySchedule, RoleLabel, ShiftAssignment, Worker};

/// Étapes d'une journée, dans l'ordre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SlotPhase {
    Charge,
    BackupCharge,
    Specialist,
    FillGeneric,
    Complete,
}

impl SlotPhase {
    /// Compétence requise et rôle tenu pour un créneau spécialisé.
    fn special_slot(self) -> Option<(Capability, RoleLabel)> {
        match self {
            SlotPhase::Charge => Some((Capability::Charge, RoleLabel::Charge)),
            SlotPhase::BackupCharge => Some((Capability::Charge, RoleLabel::BackupCharge)),
            SlotPhase::Specialist => Some((Capability::Specialist, RoleLabel::Specialist)),
            SlotPhase::FillGeneric | SlotPhase::Complete => None,
        }
    }

    fn next(self) -> Self {
        match self {
            SlotPhase::Charge => SlotPhase::BackupCharge,
            SlotPhase::BackupCharge => SlotPhase::Specialist,
            SlotPhase::Specialist => SlotPhase::FillGeneric,
            SlotPhase::FillGeneric | SlotPhase::Complete => SlotPhase::Complete,
        }
    }
}

/// Contexte en lecture seule partagé par toutes les journées d'un run.
pub(super) struct DayInputs<'a> {
    pub workers: &'a [Worker],
    pub leave: &'a LeaveCalendar,
    pub opts: &'a RotationOptions,
}

/// Remplit `day` ; les sous-effectifs sont ajoutés à `shortfalls`.
pub(super) fn assign_day(
    inputs: &DayInputs<'_>,
    week: u16,
    day: &mut DaySchedule,
    counters: &mut RunningCounters,
    shortfalls: &mut Vec<Shortfall>,
) {
    let mut phase = SlotPhase::Charge;

    while phase != SlotPhase::Complete {
        if let Some((capability, role)) = phase.special_slot() {
            let candidates: Vec<usize> =
                available_workers(inputs.workers, counters, day, inputs.leave, inputs.opts)
                    .into_iter()
                    .filter(|&idx| inputs.workers[idx].can(capability))
                    .collect();

            match select_fair(&candidates, counters, inputs.opts) {
                Some(idx) => assign(inputs, idx, role, day, counters),
                None => shortfalls.push(Shortfall {
                    week,
                    day: day.day,
                    offset: day.offset,
                    kind: ShortfallKind::CoverageGap { role },
                }),
            }
        } else {
            fill_generic(inputs, week, day, counters, shortfalls);
        }
        phase = phase.next();
    }
}

fn fill_generic(
    inputs: &DayInputs<'_>,
    week: u16,
    day: &mut DaySchedule,
    counters: &mut RunningCounters,
    shortfalls: &mut Vec<Shortfall>,
) {
    let target = inputs.opts.slots_per_day;
    while day.len() < target {
        let candidates = available_workers(inputs.workers, counters, day, inputs.leave, inputs.opts);
        let Some(idx) = select_fair(&candidates, counters, inputs.opts) else {
            shortfalls.push(Shortfall {
                week,
                day: day.day,
                offset: day.offset,
                kind: ShortfallKind::Exhaustion {
                    filled: day.len(),
                    target,
                },
            });
            return;
        };
        assign(inputs, idx, RoleLabel::Generic, day, counters);
    }
}

fn assign(
    inputs: &DayInputs<'_>,
    idx: usize,
    role: RoleLabel,
    day: &mut DaySchedule,
    counters: &mut RunningCounters,
) {
    day.assignments.push(ShiftAssignment {
        worker: inputs.workers[idx].id.clone(),
        role,
    });
    counters.record(idx);
}
