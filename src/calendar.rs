//! Conversion dates calendaires ↔ offsets de l'horizon.
//!
//! L'offset 1 correspond à la date de départ ; le jour de semaine 1 aussi.
//! Les congés hors horizon sont ignorés sans erreur.

use crate::model::{LeaveRequest, WorkerId};
use crate::scheduler::SchedError;
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

/// Calendrier d'un run : date de départ + congés par membre.
#[derive(Debug, Clone, Default)]
pub struct LeaveCalendar {
    start: Option<NaiveDate>,
    horizon_days: u16,
    leave: BTreeMap<WorkerId, BTreeSet<u16>>,
}

impl LeaveCalendar {
    pub fn new(horizon_days: u16) -> Self {
        Self {
            start: None,
            horizon_days,
            leave: BTreeMap::new(),
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Fixe le jour 1. Les offsets de congé sont calculés à l'enregistrement,
    /// donc la date ne peut plus changer une fois un congé retenu.
    pub fn set_start_date(&mut self, start: NaiveDate) -> Result<(), SchedError> {
        let has_leave = self.leave.values().any(|offsets| !offsets.is_empty());
        if has_leave && self.start != Some(start) {
            return Err(SchedError::StartDateLocked);
        }
        self.start = Some(start);
        Ok(())
    }

    /// Enregistre un congé sur `[start, end]` (bornes incluses).
    ///
    /// Retourne le nombre de jours effectivement retenus dans l'horizon.
    pub fn add_leave(
        &mut self,
        worker: &WorkerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<usize, SchedError> {
        let origin = self.start.ok_or(SchedError::MissingStartDate)?;
        if end < start {
            return Err(SchedError::InvalidDateRange);
        }

        // seule l'intersection avec l'horizon compte
        let last = date_for_offset(origin, self.horizon_days).unwrap_or(NaiveDate::MAX);
        let (from, to) = (start.max(origin), end.min(last));
        if from > to {
            return Ok(0);
        }
        let (Some(first), Some(final_offset)) = (
            offset_in_horizon(origin, from, self.horizon_days),
            offset_in_horizon(origin, to, self.horizon_days),
        ) else {
            return Ok(0);
        };

        let offsets = self.leave.entry(worker.clone()).or_default();
        let kept = (first..=final_offset)
            .filter(|offset| offsets.insert(*offset))
            .count();
        Ok(kept)
    }

    pub fn is_on_leave(&self, worker: &WorkerId, offset: u16) -> bool {
        self.leave
            .get(worker)
            .is_some_and(|offsets| offsets.contains(&offset))
    }

    pub fn requests(&self) -> Vec<LeaveRequest> {
        self.leave
            .iter()
            .filter(|(_, offsets)| !offsets.is_empty())
            .map(|(worker, offsets)| LeaveRequest {
                worker: worker.clone(),
                offsets: offsets.clone(),
            })
            .collect()
    }
}

/// Offset absolu de `date`, ou `None` s'il tombe hors de `[1, horizon_days]`.
pub fn offset_in_horizon(start: NaiveDate, date: NaiveDate, horizon_days: u16) -> Option<u16> {
    let diff = date.signed_duration_since(start).num_days();
    if diff < 0 || diff >= i64::from(horizon_days) {
        return None;
    }
    u16::try_from(diff + 1).ok()
}

pub fn date_for_offset(start: NaiveDate, offset: u16) -> Option<NaiveDate> {
    let delta = i64::from(offset.checked_sub(1)?);
    start.checked_add_signed(Duration::days(delta))
}

/// Jour de semaine (1..=7) d'un offset absolu.
pub fn weekday_of(offset: u16) -> u8 {
    ((offset.saturating_sub(1) % 7) + 1) as u8
}

/// Offset absolu du jour `day` de la semaine `week`.
pub fn absolute_offset(week: u16, day: u8) -> u16 {
    (week - 1) * 7 + u16::from(day)
}
