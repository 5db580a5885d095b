//! Line-clear scoring

/// Points for a single cleared line.
///
/// `bonus` counts the lines cleared so far by the current commit, this one
/// included, so every extra line in a multi-line clear is worth more.
pub fn points_for_line(bonus: u32) -> u64 {
    let extra = u64::from(bonus.saturating_sub(1));
    100 + 40 * extra * extra
}

/// Scoring accumulator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award one cleared line and return the points it earned
    pub fn add_line(&mut self, bonus: u32) -> u64 {
        let points = points_for_line(bonus);
        self.points += points;
        self.lines += 1;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_per_bonus() {
        assert_eq!(points_for_line(1), 100);
        assert_eq!(points_for_line(2), 140);
        assert_eq!(points_for_line(3), 260);
        assert_eq!(points_for_line(4), 460);
    }

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        assert_eq!(score.add_line(1), 100);
        assert_eq!(score.points, 100);
        assert_eq!(score.lines, 1);
    }

    #[test]
    fn test_tetris() {
        let mut score = Score::new();
        for bonus in 1..=4 {
            score.add_line(bonus);
        }
        assert_eq!(score.points, 960);
        assert_eq!(score.lines, 4);
    }

    #[test]
    fn test_score_only_grows() {
        let mut score = Score::new();
        let mut last = 0;
        for bonus in [1, 1, 2, 1, 2, 3, 4] {
            score.add_line(bonus);
            assert!(score.points > last);
            last = score.points;
        }
    }
}
