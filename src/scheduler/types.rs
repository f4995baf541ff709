use crate::model::{RoleLabel, WorkerId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Nombre de créneaux spécialisés remplis avant le remplissage générique.
pub const SPECIAL_SLOT_COUNT: usize = 3;

/// Pondération du score d'équité (court terme / long terme).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub short_term: f64,
    pub long_term: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            short_term: 0.6,
            long_term: 0.4,
        }
    }
}

/// Options de rotation, figées pour toute la durée d'un run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationOptions {
    pub weekly_cap: u32,
    pub slots_per_day: usize,
    pub horizon_weeks: u16,
    /// Moyenne jours/semaine au-delà de laquelle un membre est écarté (dès la semaine 2).
    pub long_term_ceiling_ratio: f64,
    pub target_days_per_week: f64,
    pub score_weights: ScoreWeights,
    pub epsilon: f64,
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self {
            weekly_cap: 3,
            slots_per_day: 6,
            horizon_weeks: 6,
            long_term_ceiling_ratio: 3.2,
            target_days_per_week: 2.5,
            score_weights: ScoreWeights::default(),
            epsilon: 0.1,
        }
    }
}

impl RotationOptions {
    pub fn horizon_days(&self) -> u16 {
        self.horizon_weeks.saturating_mul(7)
    }

    pub fn validate(&self) -> Result<(), SchedError> {
        if self.horizon_weeks == 0 || self.horizon_weeks > u16::MAX / 7 {
            return Err(SchedError::InvalidHorizon(self.horizon_weeks));
        }
        if self.weekly_cap == 0 {
            return Err(SchedError::InvalidWeeklyCap);
        }
        if self.slots_per_day < SPECIAL_SLOT_COUNT {
            return Err(SchedError::InvalidSlotsPerDay(self.slots_per_day));
        }
        let weights = self.score_weights;
        if !(weights.short_term.is_finite() && weights.short_term >= 0.0)
            || !(weights.long_term.is_finite() && weights.long_term >= 0.0)
        {
            return Err(SchedError::InvalidScoring("weights must be finite and >= 0"));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SchedError::InvalidScoring("epsilon must be > 0"));
        }
        if !self.long_term_ceiling_ratio.is_finite() || !self.target_days_per_week.is_finite() {
            return Err(SchedError::InvalidScoring(
                "ceiling and target must be finite",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShortfallKind {
    /// Créneau spécialisé laissé vide.
    CoverageGap { role: RoleLabel },
    /// Remplissage générique arrêté sous la cible.
    Exhaustion { filled: usize, target: usize },
}

/// Sous-effectif constaté un jour donné (non bloquant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub week: u16,
    pub day: u8,
    pub offset: u16,
    #[serde(flatten)]
    pub kind: ShortfallKind,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {} day {} (offset {}): ", self.week, self.day, self.offset)?;
        match self.kind {
            ShortfallKind::CoverageGap { role } => write!(f, "no candidate for {role}"),
            ShortfallKind::Exhaustion { filled, target } => {
                write!(f, "understaffed, {filled}/{target} slots filled")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    DoubleBooking,
    OverWeeklyCap,
    OnLeave,
    OutsideFixedRotation,
    UnknownWorker,
    /// Semaine, jour ou offset stocké différent de la position du jour dans le plan.
    MisplacedDay,
    /// Nombre de semaines différent de l'horizon configuré.
    HorizonMismatch,
}

/// Contrainte dure non respectée dans un plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Absent pour les incohérences de structure du plan.
    pub worker: Option<WorkerId>,
    pub week: u16,
    pub offset: Option<u16>,
    pub kind: ViolationKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("start date must be set before registering leave")]
    MissingStartDate,
    #[error("start date cannot change once leave is registered")]
    StartDateLocked,
    #[error("invalid date range: end must not precede start")]
    InvalidDateRange,
    #[error("invalid horizon: {0} week(s)")]
    InvalidHorizon(u16),
    #[error("weekly cap must be > 0")]
    InvalidWeeklyCap,
    #[error("slots per day must cover the specialised slots, got {0}")]
    InvalidSlotsPerDay(usize),
    #[error("invalid scoring options: {0}")]
    InvalidScoring(&'static str),
    #[error("unknown worker: {0}")]
    UnknownWorker(String),
    #[error("duplicate worker: {0}")]
    DuplicateWorker(String),
    #[error("invalid weekday {day} for worker {worker}")]
    InvalidWeekday { worker: String, day: u8 },
}
