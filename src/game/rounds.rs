use serde::{Deserialize, Serialize};

/// Rounds on which Mr X surfaces in the standard board game.
pub const STANDARD_REVEAL_ROUNDS: [usize; 5] = [3, 8, 13, 18, 24];
pub const STANDARD_ROUND_COUNT: usize = 24;

/// Which rounds reveal Mr X's location.
///
/// Rounds are numbered from 1; entry `i` of the schedule describes round
/// `i + 1`. Round 0 means no move has been made yet and never reveals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundSchedule {
    rounds: Vec<bool>,
}

impl RoundSchedule {
    pub fn new(rounds: Vec<bool>) -> Self {
        Self { rounds }
    }

    pub fn standard() -> Self {
        let rounds = (1..=STANDARD_ROUND_COUNT)
            .map(|round| STANDARD_REVEAL_ROUNDS.contains(&round))
            .collect();
        Self { rounds }
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn is_reveal_round(&self, round: usize) -> bool {
        round
            .checked_sub(1)
            .and_then(|idx| self.rounds.get(idx))
            .copied()
            .unwrap_or(false)
    }

    /// True when `rounds_needed` more rounds fit after `current_round`.
    pub fn has_rounds_after(&self, current_round: usize, rounds_needed: usize) -> bool {
        current_round + rounds_needed <= self.rounds.len()
    }
}

impl From<Vec<bool>> for RoundSchedule {
    fn from(rounds: Vec<bool>) -> Self {
        Self::new(rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_are_one_based() {
        let schedule = RoundSchedule::new(vec![false, true]);
        assert!(!schedule.is_reveal_round(0));
        assert!(!schedule.is_reveal_round(1));
        assert!(schedule.is_reveal_round(2));
        assert!(!schedule.is_reveal_round(3));
    }

    #[test]
    fn standard_schedule_matches_board_game() {
        let schedule = RoundSchedule::standard();
        assert_eq!(schedule.len(), 24);
        let reveals: Vec<usize> = (1..=24).filter(|&r| schedule.is_reveal_round(r)).collect();
        assert_eq!(reveals, STANDARD_REVEAL_ROUNDS.to_vec());
    }

    #[test]
    fn remaining_rounds() {
        let schedule = RoundSchedule::new(vec![false; 3]);
        assert!(schedule.has_rounds_after(1, 2));
        assert!(!schedule.has_rounds_after(2, 2));
        assert!(schedule.has_rounds_after(2, 1));
    }
}
