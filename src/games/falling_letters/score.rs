use serde::Serialize;

/// Score and multiplier. Only ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBoard {
    score: u64,
    multiplier: u64,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self { score: 0, multiplier: 1 }
    }
}

impl ScoreBoard {
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    /// Credits one match at the current multiplier, then bumps the multiplier.
    /// Returns the points awarded. Saturates instead of wrapping.
    pub fn record_match(&mut self, points_per_match: u64) -> u64 {
        let points = points_per_match.saturating_mul(self.multiplier);
        self.score = self.score.saturating_add(points);
        self.multiplier = self.multiplier.saturating_add(1);
        points
    }
}
