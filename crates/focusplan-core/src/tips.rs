//! Break-time suggestions.
//!
//! Hosts ask for a tip whenever they present a BREAK phase. The controller
//! never stores one.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::timer::PhaseKind;

const DEFAULT_TIPS: [&str; 8] = [
    "Do 20 push-ups! 💪",
    "15 squats! 🦵",
    "Stretch your neck 🦒",
    "Roll your shoulders 🙆",
    "Straighten your back and stretch 🧘",
    "Close your eyes and rest for a minute 👁️",
    "Drink a glass of water 💧",
    "Walk in place for a minute 🏃",
];

#[derive(Debug, Clone)]
pub struct BreakTips {
    tips: Vec<String>,
}

impl Default for BreakTips {
    fn default() -> Self {
        Self::new(DEFAULT_TIPS.iter().map(|t| t.to_string()).collect())
    }
}

impl BreakTips {
    pub fn new(tips: Vec<String>) -> Self {
        Self { tips }
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }

    pub fn all(&self) -> &[String] {
        &self.tips
    }

    /// A random tip, or `None` when the list is empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.tips.choose(rng).map(String::as_str)
    }

    /// A tip for BREAK phases only.
    pub fn tip_for<R: Rng + ?Sized>(&self, kind: PhaseKind, rng: &mut R) -> Option<&str> {
        match kind {
            PhaseKind::Break => self.pick(rng),
            PhaseKind::Work => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_has_eight_tips() {
        assert_eq!(BreakTips::default().len(), 8);
    }

    #[test]
    fn picks_come_from_the_list() {
        let tips = BreakTips::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let tip = tips.pick(&mut rng).unwrap();
            assert!(tips.all().iter().any(|t| t == tip));
        }
    }

    #[test]
    fn no_tip_during_work() {
        let tips = BreakTips::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(tips.tip_for(PhaseKind::Work, &mut rng).is_none());
        assert!(tips.tip_for(PhaseKind::Break, &mut rng).is_some());
    }

    #[test]
    fn empty_list_yields_nothing() {
        let tips = BreakTips::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(tips.pick(&mut rng).is_none());
    }
}
