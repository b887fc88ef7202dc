//! Sound effects.
//!
//! Playback is fire-and-forget: the core names an [`Effect`] and never waits
//! on or inspects the result.

use std::io::{stdout, Write};

use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    Shoot,
    AlienHit,
    BarrierHit,
    AlienShoot,
    GameOver,
    BackgroundMusic,
}

impl Effect {
    pub fn name(self) -> &'static str {
        match self {
            Effect::Shoot => "shoot",
            Effect::AlienHit => "alien_hit",
            Effect::BarrierHit => "barrier_hit",
            Effect::AlienShoot => "alien_shoot",
            Effect::GameOver => "game_over",
            Effect::BackgroundMusic => "background_music",
        }
    }
}

pub trait Audio {
    fn play(&mut self, effect: Effect);
}

/// Records every effect in the trace log and plays nothing.
#[derive(Debug, Default)]
pub struct LogAudio;

impl Audio for LogAudio {
    fn play(&mut self, effect: Effect) {
        debug!(effect = effect.name(), "play");
    }
}

/// Rings the terminal bell when the game ends.
#[derive(Debug, Default)]
pub struct Bell;

impl Audio for Bell {
    fn play(&mut self, effect: Effect) {
        debug!(effect = effect.name(), "play");
        if effect == Effect::GameOver {
            let mut out = stdout();
            // Best effort; a lost terminal surfaces through the renderer.
            let _ = out.write_all(b"\x07").and_then(|_| out.flush());
        }
    }
}
