/// Compteurs d'un membre, indexés comme le roster.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkerTally {
    /// Jours travaillés dans la semaine en cours.
    pub this_week: u32,
    /// Jours travaillés sur les semaines terminées.
    pub cumulative: u32,
    /// Détail par semaine terminée.
    pub weekly: Vec<u32>,
}

/// Compteurs courants d'un run, propriété exclusive du driver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunningCounters {
    tallies: Vec<WorkerTally>,
    completed_weeks: u16,
}

impl RunningCounters {
    pub fn new(workers: usize, horizon_weeks: u16) -> Self {
        let tally = WorkerTally {
            weekly: Vec::with_capacity(usize::from(horizon_weeks)),
            ..WorkerTally::default()
        };
        Self {
            tallies: vec![tally; workers],
            completed_weeks: 0,
        }
    }

    pub fn this_week(&self, idx: usize) -> u32 {
        self.tallies[idx].this_week
    }

    pub fn cumulative(&self, idx: usize) -> u32 {
        self.tallies[idx].cumulative
    }

    pub fn completed_weeks(&self) -> u16 {
        self.completed_weeks
    }

    /// Moyenne jours/semaine sur les semaines terminées.
    pub fn average_per_week(&self, idx: usize) -> Option<f64> {
        if self.completed_weeks == 0 {
            return None;
        }
        Some(f64::from(self.cumulative(idx)) / f64::from(self.completed_weeks))
    }

    /// Une affectation de plus pour `idx` cette semaine.
    pub fn record(&mut self, idx: usize) {
        self.tallies[idx].this_week += 1;
    }

    /// Clôture la semaine : bascule les compteurs hebdo dans le cumul.
    pub fn close_week(&mut self) {
        for tally in &mut self.tallies {
            tally.cumulative += tally.this_week;
            tally.weekly.push(tally.this_week);
            tally.this_week = 0;
        }
        self.completed_weeks += 1;
    }

    pub fn tallies(&self) -> &[WorkerTally] {
        &self.tallies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_week_resets_weekly_and_keeps_cumulative() {
        let mut counters = RunningCounters::new(2, 2);
        counters.record(0);
        counters.record(0);
        counters.record(1);
        assert_eq!(counters.average_per_week(0), None);

        counters.close_week();
        assert_eq!(counters.this_week(0), 0);
        assert_eq!(counters.cumulative(0), 2);
        assert_eq!(counters.cumulative(1), 1);
        assert_eq!(counters.average_per_week(0), Some(2.0));

        counters.record(1);
        counters.close_week();
        assert_eq!(counters.tallies()[1].weekly, vec![1, 1]);
        assert_eq!(counters.completed_weeks(), 2);
    }
}
