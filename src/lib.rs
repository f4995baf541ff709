#![forbid(unsafe_code)]
//! Garde — moteur de rotation multi-semaines (sans solveur).
//!
//! - Couverture des rôles spécialisés puis remplissage générique.
//! - Plafond hebdomadaire, congés, rotations fixes.
//! - Départage déterministe par score d'équité ; rapport de dispersion en fin d'horizon.
//! - Entrées/sorties fichiers (CSV/JSON) en dehors du cœur, dans `io`.

pub mod calendar;
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;

pub use calendar::LeaveCalendar;
pub use model::{
    Capability, DaySchedule, LeaveRequest, RoleLabel, RotationPlan, ShiftAssignment,
    WeekSchedule, Worker, WorkerId,
};
pub use report::{Distribution, FairnessReport, WorkerStats};
pub use scheduler::{
    RotationOptions, RotationOutcome, SchedError, Scheduler, ScoreWeights, Shortfall,
    ShortfallKind, Violation, ViolationKind,
};
