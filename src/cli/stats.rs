use std::time::Duration;

use crate::game::Game;

#[derive(Debug, Default, Clone)]
pub struct GameStats {
    pub games: u32,
    pub mr_x_wins: u32,
    pub detective_wins: u32,
    pub total_rounds: u64,
    pub total_duration: Duration,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, game: &Game, duration: Duration) {
        self.games += 1;
        self.total_duration += duration;
        self.total_rounds += game.model.current_round() as u64;
        if game.mr_x_won() {
            self.mr_x_wins += 1;
        } else {
            self.detective_wins += 1;
        }
    }

    pub fn mr_x_win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.mr_x_wins as f64 / self.games as f64
    }

    pub fn detective_win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.detective_wins as f64 / self.games as f64
    }

    pub fn get_avg_rounds(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.games as f64
    }

    pub fn get_avg_duration(&self) -> Duration {
        if self.games == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.games
    }
}

#[derive(Debug, Default)]
pub struct StatisticsAccumulator {
    pub stats: GameStats,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(&mut self, game: &Game, duration: Duration) {
        self.stats.record_game(game, duration);
    }
}
