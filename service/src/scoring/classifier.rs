//! Classifies each hole against par for the scoring bonus columns.

pub const PAR_POINTS: i32 = 1;
pub const BIRDIE_POINTS: i32 = 2;
pub const EAGLE_POINTS: i32 = 4;
pub const ACE_POINTS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleOutcome {
    Par,
    Birdie,
    Ace,
    Eagle,
}

/// First match wins, in this order: par, birdie, ace, eagle. A hole in one on
/// a par 2 is a par; on a par 3 it is an ace. Double eagles count as eagles.
pub fn classify_hole(strokes: i32, par: i32) -> Option<HoleOutcome> {
    if strokes == par {
        Some(HoleOutcome::Par)
    } else if strokes == par - 1 {
        Some(HoleOutcome::Birdie)
    } else if strokes == 1 {
        Some(HoleOutcome::Ace)
    } else if strokes == par - 2 || strokes == par - 3 {
        Some(HoleOutcome::Eagle)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringCounts {
    pub pars: i32,
    pub birdies: i32,
    pub eagles: i32,
    pub aces: i32,
}

/// Bonus points per column, already weighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringBonus {
    pub pars: i32,
    pub birdies: i32,
    pub eagles: i32,
    pub aces: i32,
}

impl ScoringCounts {
    fn record(&mut self, outcome: HoleOutcome) {
        match outcome {
            HoleOutcome::Par => self.pars += 1,
            HoleOutcome::Birdie => self.birdies += 1,
            HoleOutcome::Ace => self.aces += 1,
            HoleOutcome::Eagle => self.eagles += 1,
        }
    }

    pub fn bonus(&self) -> ScoringBonus {
        ScoringBonus {
            pars: self.pars * PAR_POINTS,
            birdies: self.birdies * BIRDIE_POINTS,
            eagles: self.eagles * EAGLE_POINTS,
            aces: self.aces * ACE_POINTS,
        }
    }
}

/// Unscored holes are skipped. `strokes` and `pars` are paired by position.
pub fn classify(strokes: &[Option<i32>], pars: &[i32]) -> ScoringCounts {
    let mut counts = ScoringCounts::default();
    strokes
        .iter()
        .zip(pars)
        .filter_map(|(strokes, par)| strokes.and_then(|s| classify_hole(s, *par)))
        .for_each(|outcome| counts.record(outcome));
    counts
}
