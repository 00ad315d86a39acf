use serde::Serialize;
use tracing::info;

use crate::game::{CollisionType, GameConfig, GameEvent};
use crate::session::GameSession;

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlessSummary {
    pub score: usize,
    pub length: usize,
    pub ticks: u64,
    pub apples_eaten: u32,
    pub is_over: bool,
    pub cause: Option<CollisionType>,
}

/// Runs the simulation without a terminal, one frame after every tick,
/// keeping the initial direction until the round ends or `max_ticks` pass.
pub struct HeadlessMode {
    session: GameSession,
}

impl HeadlessMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            session: GameSession::new(config),
        }
    }

    pub fn run(&mut self, max_ticks: u64) -> HeadlessSummary {
        let mut apples_eaten = 0;

        for _ in 0..max_ticks {
            self.session.tick();
            let result = self.session.frame();
            apples_eaten += result.apples_eaten() as u32;

            if result
                .events
                .iter()
                .any(|event| matches!(event, GameEvent::GameOver { .. }))
            {
                break;
            }
        }

        let snapshot = self.session.snapshot();
        info!(ticks = snapshot.ticks, score = snapshot.score, "Headless run finished");

        HeadlessSummary {
            score: snapshot.score,
            length: snapshot.length,
            ticks: snapshot.ticks,
            apples_eaten,
            is_over: snapshot.is_over,
            cause: snapshot.cause,
        }
    }
}
