mod assignment;
mod audit;
mod availability;
mod counters;
mod horizon;
mod scoring;
mod types;

pub use counters::{RunningCounters, WorkerTally};
pub use horizon::RotationOutcome;
pub use types::{
    RotationOptions, SchedError, ScoreWeights, Shortfall, ShortfallKind, Violation,
    ViolationKind, SPECIAL_SLOT_COUNT,
};

use crate::calendar::LeaveCalendar;
use crate::model::{RotationPlan, Worker, WorkerId};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Scheduler : roster, congés et options d'un run
#[derive(Debug, Clone)]
pub struct Scheduler {
    opts: RotationOptions,
    workers: Vec<Worker>,
    leave: LeaveCalendar,
}

impl Scheduler {
    /// Valide les options ; elles restent figées ensuite.
    pub fn new(opts: RotationOptions) -> Result<Self, SchedError> {
        opts.validate()?;
        Ok(Self {
            opts,
            workers: Vec::new(),
            leave: LeaveCalendar::new(opts.horizon_days()),
        })
    }

    pub fn options(&self) -> &RotationOptions {
        &self.opts
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn leave(&self) -> &LeaveCalendar {
        &self.leave
    }

    pub fn find_worker(&self, id: &WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| &w.id == id)
    }

    /// Ajoute des membres ; rien n'est ajouté si l'un d'eux est invalide.
    pub fn add_workers(&mut self, workers: Vec<Worker>) -> Result<(), SchedError> {
        let mut ids: BTreeSet<&WorkerId> = self.workers.iter().map(|w| &w.id).collect();
        for worker in &workers {
            if !ids.insert(&worker.id) {
                return Err(SchedError::DuplicateWorker(worker.id.as_str().to_string()));
            }
            if let Some(day) = worker
                .fixed_weekdays
                .iter()
                .flatten()
                .find(|d| !(1..=7).contains(*d))
            {
                return Err(SchedError::InvalidWeekday {
                    worker: worker.id.as_str().to_string(),
                    day: *day,
                });
            }
        }
        self.workers.extend(workers);
        Ok(())
    }

    /// Fixe le jour 1 ; refusé si des congés ont déjà été traduits avec une autre date.
    pub fn set_start_date(&mut self, start: NaiveDate) -> Result<(), SchedError> {
        self.leave.set_start_date(start)
    }

    /// Enregistre un congé `[start, end]` ; les jours hors horizon sont ignorés.
    pub fn add_leave(
        &mut self,
        worker: &WorkerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<usize, SchedError> {
        if self.find_worker(worker).is_none() {
            return Err(SchedError::UnknownWorker(worker.as_str().to_string()));
        }
        self.leave.add_leave(worker, start, end)
    }

    /// Calcule le plan complet ; aboutit toujours, même en sous-effectif.
    pub fn run(&self) -> RotationOutcome {
        horizon::run_horizon(self)
    }

    /// Revérifie toutes les contraintes dures d'un plan.
    pub fn detect_violations(&self, plan: &RotationPlan) -> Vec<Violation> {
        audit::detect_violations(self, plan)
    }
}
