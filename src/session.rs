//! The play session: one engine plus the round currently being played.
//!
//! Every mutation of the round goes through [`GameSession`]. Drivers that run
//! ticks and frames on separate tasks share it as a [`SharedSession`], so a
//! frame always sees a fully applied tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info};

use crate::game::{
    Direction, FieldSize, FrameResult, GameConfig, GameEngine, GameEvent, Round, RoundSnapshot,
    TickResult,
};

pub struct GameSession {
    engine: GameEngine,
    round: Round,
    rounds_started: u32,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let field = config.field;
        let mut engine = GameEngine::new(config);
        let round = engine.reset(field);
        info!(cols = round.grid().cols, rows = round.grid().rows, "Round started");

        Self {
            engine,
            round,
            rounds_started: 1,
        }
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn is_over(&self) -> bool {
        self.round.is_over()
    }

    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    /// Forward a direction request to the current round's latch
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        let accepted = self.round.set_direction(direction);
        if !accepted {
            debug!(?direction, "Ignored reversing direction");
        }
        accepted
    }

    pub fn tick(&mut self) -> TickResult {
        let result = self.engine.tick(&mut self.round);
        if let Some(cause) = result.collision_type {
            info!(
                ?cause,
                score = self.round.score(),
                ticks = self.round.ticks(),
                "Round over"
            );
        }
        result
    }

    pub fn frame(&mut self) -> FrameResult {
        let result = self.engine.frame(&mut self.round);
        for event in &result.events {
            if let GameEvent::AppleEaten { position } = event {
                debug!(
                    x = position.x,
                    y = position.y,
                    length = self.round.snake().length(),
                    "Apple eaten"
                );
            }
        }
        result
    }

    /// Apply a new field size before the next tick
    pub fn resize(&mut self, field: FieldSize) {
        if field != self.round.field() {
            debug!(width = field.width, height = field.height, "Field resized");
            self.round.resize(field);
        }
    }

    /// Throw the current round away and start over on the current field
    pub fn reset(&mut self) {
        let field = self.round.field();
        self.round = self.engine.reset(field);
        self.rounds_started += 1;
        info!(round = self.rounds_started, "Round restarted");
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.round.snapshot()
    }
}

pub type SharedSession = Arc<Mutex<GameSession>>;

pub fn shared(session: GameSession) -> SharedSession {
    Arc::new(Mutex::new(session))
}

/// Tick `session` every `period`, starting one period from now
pub fn spawn_tick_task(session: SharedSession, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = interval_at(Instant::now() + period, period);
        loop {
            timer.tick().await;
            session.lock().await.tick();
        }
    })
}

/// Evaluate a frame every `period` and hand the settled snapshot and the
/// frame's events to `on_frame`
pub fn spawn_frame_task<F>(
    session: SharedSession,
    period: Duration,
    mut on_frame: F,
) -> JoinHandle<()>
where
    F: FnMut(RoundSnapshot, FrameResult) + Send + 'static,
{
    tokio::spawn(async move {
        let mut timer = interval_at(Instant::now() + period, period);
        loop {
            timer.tick().await;
            let (snapshot, result) = {
                let mut guard = session.lock().await;
                let result = guard.frame();
                (guard.snapshot(), result)
            };
            on_frame(snapshot, result);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Position};
    use std::sync::Mutex as StdMutex;

    #[test]
    fn test_new_session() {
        let session = GameSession::new(GameConfig::small());
        assert!(!session.is_over());
        assert_eq!(session.rounds_started(), 1);
        assert_eq!(session.snapshot().apples.len(), 5);
    }

    #[test]
    fn test_run_into_wall_then_reset() {
        let mut session = GameSession::new(GameConfig::small());

        // Head starts at (5,5) heading up on a 10x10 grid
        for _ in 0..5 {
            session.tick();
        }
        assert!(!session.is_over());
        let result = session.tick();
        assert_eq!(result.collision_type, Some(CollisionType::Wall));

        let events = session.frame().events;
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
        assert!(session.frame().events.is_empty());

        session.reset();
        let snapshot = session.snapshot();
        assert!(!snapshot.is_over);
        assert_eq!(snapshot.length, 3);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.head, Position::new(5, 5));
        assert_eq!(
            snapshot.tail,
            vec![Position::new(5, 5), Position::new(5, 6), Position::new(5, 7)]
        );
        assert_eq!(snapshot.apples.len(), 5);
        assert_eq!(snapshot.direction, Some(Direction::Up));
        assert_eq!(session.rounds_started(), 2);

        // The one-shot notice is re-armed for the new round
        session.set_direction(Direction::Left);
        for _ in 0..6 {
            session.tick();
        }
        assert!(session.is_over());
        let events = session.frame().events;
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_reset_keeps_resized_field() {
        let mut session = GameSession::new(GameConfig::small());
        session.resize(FieldSize::new(500, 500));
        session.reset();
        assert_eq!(session.snapshot().field, FieldSize::new(500, 500));
        assert_eq!(session.snapshot().grid.cols, 20);
    }

    #[test]
    fn test_reverse_request_ignored() {
        let mut session = GameSession::new(GameConfig::small());
        assert!(!session.set_direction(Direction::Down));
        assert!(session.set_direction(Direction::Right));
        session.tick();
        assert_eq!(session.snapshot().head, Position::new(6, 5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_task_runs_at_fixed_rate() {
        let session = shared(GameSession::new(GameConfig::small()));
        let handle = spawn_tick_task(session.clone(), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(350)).await;
        {
            let guard = session.lock().await;
            assert_eq!(guard.round().ticks(), 3);
            assert_eq!(guard.snapshot().head, Position::new(5, 2));
        }

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_task_sees_settled_rounds() {
        let session = shared(GameSession::new(GameConfig::small()));
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = seen.clone();

        let ticks = spawn_tick_task(session.clone(), Duration::from_millis(100));
        let on_frame = move |snapshot: RoundSnapshot, _: FrameResult| {
            if let Ok(mut seen) = sink.lock() {
                seen.push(snapshot);
            }
        };
        let frames = spawn_frame_task(session.clone(), Duration::from_millis(16), on_frame);

        tokio::time::sleep(Duration::from_millis(450)).await;
        ticks.abort();
        frames.abort();

        let seen = seen.lock().unwrap();
        assert!(!seen.is_empty());
        for snapshot in seen.iter() {
            assert!(snapshot.tail.len() <= snapshot.length);
            // After the first move the newest tail entry sits right behind the head
            if snapshot.ticks > 0 {
                assert_eq!(snapshot.tail[0], snapshot.head.moved_by(0, 1));
            }
        }
    }
}
