use crate::calendar::absolute_offset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Identifiant fort pour Worker
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compétence d'un membre (éligibilité, pas le rôle tenu).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Charge,
    Specialist,
    Generic,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Charge => "charge",
            Capability::Specialist => "specialist",
            Capability::Generic => "generic",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "charge" => Ok(Capability::Charge),
            "specialist" | "nicu" => Ok(Capability::Specialist),
            "generic" | "regular" => Ok(Capability::Generic),
            other => Err(format!("unknown capability: {other}")),
        }
    }
}

/// Rôle tenu sur un jour donné.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleLabel {
    Charge,
    BackupCharge,
    Specialist,
    Generic,
}

impl RoleLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleLabel::Charge => "charge",
            RoleLabel::BackupCharge => "backup_charge",
            RoleLabel::Specialist => "specialist",
            RoleLabel::Generic => "generic",
        }
    }
}

impl fmt::Display for RoleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membre de la rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub capabilities: BTreeSet<Capability>,
    /// Jours autorisés (1..=7) pour une rotation fixe ; `None` = tous les jours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_weekdays: Option<BTreeSet<u8>>,
}

impl Worker {
    pub fn new<I: AsRef<str>, N: Into<String>>(
        id: I,
        name: N,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        Self {
            id: WorkerId::new(id),
            name: name.into(),
            capabilities: capabilities.into_iter().collect(),
            fixed_weekdays: None,
        }
    }

    /// Restreint le membre à une rotation fixe.
    pub fn with_fixed_weekdays(mut self, days: impl IntoIterator<Item = u8>) -> Self {
        self.fixed_weekdays = Some(days.into_iter().collect());
        self
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn works_on_weekday(&self, day: u8) -> bool {
        self.fixed_weekdays
            .as_ref()
            .map_or(true, |days| days.contains(&day))
    }
}

/// Congés d'un membre, déjà traduits en offsets absolus (1..=horizon).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub worker: WorkerId,
    pub offsets: BTreeSet<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub worker: WorkerId,
    pub role: RoleLabel,
}

/// Affectations d'une journée, dans l'ordre où elles ont été faites.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Jour dans la semaine (1..=7).
    pub day: u8,
    /// Offset absolu dans l'horizon (1..=horizon).
    pub offset: u16,
    pub assignments: Vec<ShiftAssignment>,
}

impl DaySchedule {
    pub fn new(day: u8, offset: u16) -> Self {
        Self {
            day,
            offset,
            assignments: Vec::new(),
        }
    }

    pub fn contains(&self, worker: &WorkerId) -> bool {
        self.assignments.iter().any(|a| &a.worker == worker)
    }

    pub fn role_of(&self, worker: &WorkerId) -> Option<RoleLabel> {
        self.assignments
            .iter()
            .find(|a| &a.worker == worker)
            .map(|a| a.role)
    }

    pub fn holder_of(&self, role: RoleLabel) -> Option<&WorkerId> {
        self.assignments
            .iter()
            .find(|a| a.role == role)
            .map(|a| &a.worker)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub week: u16,
    pub days: [DaySchedule; 7],
}

impl WeekSchedule {
    pub fn new(week: u16) -> Self {
        Self {
            week,
            days: std::array::from_fn(|i| {
                let day = i as u8 + 1;
                DaySchedule::new(day, absolute_offset(week, day))
            }),
        }
    }

    /// Jour `day` (1..=7).
    pub fn day(&self, day: u8) -> Option<&DaySchedule> {
        self.days.get(usize::from(day).checked_sub(1)?)
    }

    /// Nombre de jours travaillés par `worker` sur la semaine.
    pub fn days_worked(&self, worker: &WorkerId) -> usize {
        self.days.iter().filter(|d| d.contains(worker)).count()
    }
}

/// Plan complet produit par un run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RotationPlan {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    pub weeks: Vec<WeekSchedule>,
    #[serde(default)]
    pub shortfalls: Vec<crate::scheduler::Shortfall>,
}

impl RotationPlan {
    pub fn days(&self) -> impl Iterator<Item = (u16, &DaySchedule)> + '_ {
        self.weeks
            .iter()
            .flat_map(|w| w.days.iter().map(move |d| (w.week, d)))
    }

    /// Journée à l'offset absolu `offset` (1..=horizon).
    pub fn day_at(&self, offset: u16) -> Option<&DaySchedule> {
        let idx = usize::from(offset).checked_sub(1)?;
        self.weeks.get(idx / 7).map(|w| &w.days[idx % 7])
    }

    /// Date calendaire d'une journée, si la date de départ est connue.
    pub fn date_of(&self, offset: u16) -> Option<NaiveDate> {
        crate::calendar::date_for_offset(self.start_date?, offset)
    }

    pub fn total_days_worked(&self, worker: &WorkerId) -> usize {
        self.days().filter(|(_, d)| d.contains(worker)).count()
    }
}
