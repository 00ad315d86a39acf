//! Sound effects for game events
//!
//! Playback is best effort. A player that fails is logged and otherwise
//! ignored; the simulation never waits on or observes it.

use anyhow::{Context, Result};
use std::io::Write;
use tracing::warn;

use crate::game::GameEvent;

/// Sound effects the game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    GameOver,
}

impl From<&GameEvent> for SoundCue {
    fn from(event: &GameEvent) -> Self {
        match event {
            GameEvent::AppleEaten { .. } => SoundCue::Eat,
            GameEvent::GameOver { .. } => SoundCue::GameOver,
        }
    }
}

pub trait SoundPlayer {
    fn play(&mut self, cue: SoundCue) -> Result<()>;
}

/// Rings the terminal bell. Eating is a single bell, game over a double one.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> SoundPlayer for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) -> Result<()> {
        let bells: &[u8] = match cue {
            SoundCue::Eat => b"\x07",
            SoundCue::GameOver => b"\x07\x07",
        };
        self.out.write_all(bells).context("Failed to ring terminal bell")?;
        self.out.flush().context("Failed to flush terminal bell")?;
        Ok(())
    }
}

/// Plays nothing
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&mut self, _cue: SoundCue) -> Result<()> {
        Ok(())
    }
}

/// Maps game events to sound cues and swallows playback failures
pub struct AudioAdapter {
    player: Box<dyn SoundPlayer + Send>,
    failures: u32,
}

impl AudioAdapter {
    pub fn new(player: Box<dyn SoundPlayer + Send>) -> Self {
        Self {
            player,
            failures: 0,
        }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentPlayer))
    }

    pub fn handle(&mut self, events: &[GameEvent]) {
        for event in events {
            let cue = SoundCue::from(event);
            if let Err(e) = self.player.play(cue) {
                self.failures += 1;
                warn!(?cue, error = %e, "Sound playback failed");
            }
        }
    }

    /// Number of playback attempts that failed
    pub fn failures(&self) -> u32 {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Position};
    use anyhow::bail;
    use std::sync::{Arc, Mutex};

    struct Recording(Arc<Mutex<Vec<SoundCue>>>);

    impl SoundPlayer for Recording {
        fn play(&mut self, cue: SoundCue) -> Result<()> {
            self.0.lock().unwrap().push(cue);
            Ok(())
        }
    }

    struct Broken;

    impl SoundPlayer for Broken {
        fn play(&mut self, _cue: SoundCue) -> Result<()> {
            bail!("no audio device")
        }
    }

    fn events() -> Vec<GameEvent> {
        vec![
            GameEvent::AppleEaten {
                position: Position::new(1, 2),
            },
            GameEvent::GameOver {
                score: 1,
                cause: Some(CollisionType::Wall),
            },
        ]
    }

    #[test]
    fn test_events_map_to_cues() {
        let played = Arc::new(Mutex::new(Vec::new()));
        let mut adapter = AudioAdapter::new(Box::new(Recording(played.clone())));

        adapter.handle(&events());

        assert_eq!(*played.lock().unwrap(), vec![SoundCue::Eat, SoundCue::GameOver]);
        assert_eq!(adapter.failures(), 0);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut adapter = AudioAdapter::new(Box::new(Broken));
        adapter.handle(&events());
        assert_eq!(adapter.failures(), 2);
    }

    #[test]
    fn test_terminal_bell_output() {
        let mut out = Vec::new();
        {
            let mut bell = TerminalBell::new(&mut out);
            bell.play(SoundCue::Eat).unwrap();
            bell.play(SoundCue::GameOver).unwrap();
        }
        assert_eq!(out, b"\x07\x07\x07");
    }
}
