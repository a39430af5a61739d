//! Code that runs inside the game's frame.

pub mod cinema;
pub mod gfx;
pub mod host;
pub mod triggers;

use crate::hook::{self, FrameObserver};
use crate::meta::settings::Options;
use cinema::{tiles, Cinema};
use gfx::DisplayList;
use host::{PlayState, PlayerImpact, SoundPlayer};
use triggers::Triggers;

/// Connects the overlay to the game's hooks.
#[derive(Debug, Default)]
pub struct CinemaObserver {
    cinema: Cinema,
    triggers: Triggers,
}

impl CinemaObserver {
    pub fn new() -> CinemaObserver {
        CinemaObserver::default()
    }

    pub fn cinema(&self) -> &Cinema {
        &self.cinema
    }
}

impl FrameObserver for CinemaObserver {
    fn name(&self) -> &'static str {
        "absolute cinema"
    }

    fn on_init(&mut self, _play: &dyn PlayState) {
        tiles::init();
        self.cinema.set_timing(Options::get().timing);
    }

    fn on_update(&mut self, play: &dyn PlayState, sfx: &mut dyn SoundPlayer) {
        self.cinema.advance();

        self.triggers
            .on_update(&mut self.cinema, play, &Options::get(), sfx);
    }

    fn on_impact(&mut self, play: &dyn PlayState, impact: &PlayerImpact, sfx: &mut dyn SoundPlayer) {
        self.triggers
            .on_impact(&mut self.cinema, play, impact, &Options::get(), sfx);
    }

    fn on_draw(&mut self, _play: &dyn PlayState, disp: &mut DisplayList<'static>) {
        match tiles::get() {
            Some(tiles) => self.cinema.render(tiles, disp),

            // Drawing before the tiles exist would read garbage.
            None if self.cinema.should_draw() => {
                log::warn!("Cinema is visible but the tiles haven't been split yet.")
            }

            None => {}
        }
    }
}

pub fn init() {
    hook::register(Box::new(CinemaObserver::new()));
}
