use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhaseKind {
    Work,
    Break,
}

impl PhaseKind {
    /// The other half of the work/break pair.
    pub fn toggled(self) -> Self {
        match self {
            PhaseKind::Work => PhaseKind::Break,
            PhaseKind::Break => PhaseKind::Work,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub kind: PhaseKind,
    /// Duration in seconds. Always positive for generated phases.
    pub duration_secs: u64,
    pub label: String,
}

impl Phase {
    pub fn new(kind: PhaseKind, duration_secs: u64, label: impl Into<String>) -> Self {
        Self {
            kind,
            duration_secs,
            label: label.into(),
        }
    }

    fn work_min(minutes: i64, label: &str) -> Self {
        Self::new(PhaseKind::Work, minutes_to_secs(minutes), label)
    }

    fn break_min(minutes: i64, label: &str) -> Self {
        Self::new(PhaseKind::Break, minutes_to_secs(minutes), label)
    }

    pub fn is_work(&self) -> bool {
        self.kind == PhaseKind::Work
    }
}

/// Saturating minutes to seconds; negative minutes map to zero.
fn minutes_to_secs(minutes: i64) -> u64 {
    u64::try_from(minutes).unwrap_or(0).saturating_mul(60)
}

/// Ordered phases for one planning request. Immutable once generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    phases: Vec<Phase>,
}

impl Schedule {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phase> {
        self.phases.iter()
    }

    pub fn total_secs(&self) -> u64 {
        self.phases.iter().map(|p| p.duration_secs).sum()
    }

    pub fn work_secs(&self) -> u64 {
        self.secs_of(PhaseKind::Work)
    }

    pub fn break_secs(&self) -> u64 {
        self.secs_of(PhaseKind::Break)
    }

    pub fn work_count(&self) -> usize {
        self.phases.iter().filter(|p| p.is_work()).count()
    }

    /// Seconds scheduled before (not including) `index`.
    pub fn cumulative_secs(&self, index: usize) -> u64 {
        self.phases
            .iter()
            .take(index)
            .map(|p| p.duration_secs)
            .sum()
    }

    fn secs_of(&self, kind: PhaseKind) -> u64 {
        self.phases
            .iter()
            .filter(|p| p.kind == kind)
            .map(|p| p.duration_secs)
            .sum()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Phase;
    type IntoIter = std::slice::Iter<'a, Phase>;

    fn into_iter(self) -> Self::IntoIter {
        self.phases.iter()
    }
}

pub const LABEL_OPENING: &str = "Opening focus 🚀";
pub const LABEL_SHORT_BREAK: &str = "Short break ☕";
pub const LABEL_DEEP_FOCUS: &str = "Deep focus 🔥";
pub const LABEL_FOCUS: &str = "Focus 🧠";
pub const LABEL_BREAK: &str = "Break 🌿";
pub const LABEL_WRAP_UP: &str = "Wrap-up 🏁";

/// Planning requests above one week are clamped to one week.
pub const MAX_PLAN_MINUTES: i64 = 7 * 24 * 60;

/// Thresholds of the fixed phase archetypes, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerRules {
    /// Below this nothing is planned.
    pub min_session: i64,
    pub opening_work: i64,
    pub opening_break: i64,
    /// Remaining budget needed to pick a peak block over a standard one.
    pub peak_threshold: i64,
    pub peak_work: i64,
    pub peak_break: i64,
    pub standard_work: i64,
    pub standard_break: i64,
    /// Leftover needed for a wrap-up phase; less is discarded.
    pub wrap_up_floor: i64,
}

impl Default for PlannerRules {
    fn default() -> Self {
        Self {
            min_session: 25,
            opening_work: 25,
            opening_break: 5,
            peak_threshold: 45,
            peak_work: 35,
            peak_break: 10,
            standard_work: 25,
            standard_break: 5,
            wrap_up_floor: 10,
        }
    }
}

impl PlannerRules {
    /// Greedily fill `total_minutes` with opening, repeating and wrap-up
    /// stages. Infeasible input yields an empty schedule.
    pub fn generate(&self, total_minutes: i64) -> Schedule {
        let mut remaining = total_minutes.min(MAX_PLAN_MINUTES);
        if remaining < self.min_session {
            return Schedule::empty();
        }

        let mut phases = Vec::new();

        phases.push(Phase::work_min(self.opening_work, LABEL_OPENING));
        remaining -= self.opening_work;
        if remaining < self.opening_break {
            return Schedule::new(phases);
        }
        phases.push(Phase::break_min(self.opening_break, LABEL_SHORT_BREAK));
        remaining -= self.opening_break;

        while remaining >= self.min_session {
            let (work_min, break_min, label) = if remaining >= self.peak_threshold {
                (self.peak_work, self.peak_break, LABEL_DEEP_FOCUS)
            } else {
                (self.standard_work, self.standard_break, LABEL_FOCUS)
            };

            phases.push(Phase::work_min(work_min, label));
            remaining -= work_min;

            // The work block stays even when its break no longer fits.
            if remaining < break_min {
                break;
            }
            phases.push(Phase::break_min(break_min, LABEL_BREAK));
            remaining -= break_min;
        }

        if remaining >= self.wrap_up_floor {
            phases.push(Phase::work_min(remaining, LABEL_WRAP_UP));
        }

        Schedule::new(phases)
    }
}

/// Plan `total_minutes` with the default archetypes.
pub fn generate(total_minutes: i64) -> Schedule {
    PlannerRules::default().generate(total_minutes)
}
