use std::time::{Duration, Instant};

/// Statistics for the lifetime of the process. Nothing here is persisted.
pub struct GameMetrics {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub best_score: usize,
    pub rounds_finished: u32,
    pub apples_eaten: u32,
    clock_running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            rounds_finished: 0,
            apples_eaten: 0,
            clock_running: true,
        }
    }

    /// Refresh the round clock; it stops once the round is over
    pub fn update(&mut self) {
        if self.clock_running {
            self.elapsed_time = self.round_start.elapsed();
        }
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.clock_running = true;
    }

    pub fn on_apple_eaten(&mut self) {
        self.apples_eaten += 1;
    }

    pub fn on_round_over(&mut self, final_score: usize) {
        self.update();
        self.clock_running = false;
        self.rounds_finished += 1;
        self.best_score = self.best_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_best_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_round_over(10);
        assert_eq!(metrics.best_score, 10);
        assert_eq!(metrics.rounds_finished, 1);

        metrics.on_round_over(5);
        assert_eq!(metrics.best_score, 10);
        assert_eq!(metrics.rounds_finished, 2);

        metrics.on_round_over(15);
        assert_eq!(metrics.best_score, 15);
    }

    #[test]
    fn test_clock_stops_at_round_over() {
        let mut metrics = GameMetrics::new();
        metrics.on_round_over(0);
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);

        metrics.on_round_start();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }
}
