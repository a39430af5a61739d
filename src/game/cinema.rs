//! The "absolute cinema" overlay: a full-screen image that fades in over the game, stays for a
//! moment and then fades out again.
//!
//! Everything here is stepped once per frame rather than by elapsed time. The game runs at a
//! fixed frame rate, so the fade speeds are simply alpha steps per frame.

pub mod draw;
pub mod tiles;

use serde::{Deserialize, Serialize};
use strum::{Display, IntoEnumIterator};

use super::gfx::DisplayList;
use super::host::{SoundCue, SoundPlayer};
use tiles::SplitTiles;

/// Frame-based timing for the overlay.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Timing {
    /// Alpha added per frame while fading in.
    pub fade_in: u8,

    /// Alpha removed per frame while fading out.
    pub fade_out: u8,

    /// Frames to hold the image at full opacity.
    pub hold_frames: u16,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            fade_in: 32,
            fade_out: 20,
            hold_frames: 20,
        }
    }
}

impl Timing {
    /// Returns a copy with zero fade speeds raised to 1 so that fades always finish.
    pub fn sanitised(self) -> Timing {
        Timing {
            fade_in: self.fade_in.max(1),
            fade_out: self.fade_out.max(1),
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum OverlayState {
    Off,
    FadingIn,
    Showing,
    FadingOut,
}

/// The overlay's state machine. There is one of these for the whole game, owned by the observer
/// that the hooks call into.
#[derive(Debug)]
pub struct Cinema {
    state: OverlayState,
    alpha: u8,
    hold_timer: i32,

    /// Set from the moment the overlay is triggered until it has completely faded out.
    visible: bool,

    timing: Timing,
}

impl Default for Cinema {
    fn default() -> Self {
        Cinema::new(Timing::default())
    }
}

impl Cinema {
    pub fn new(timing: Timing) -> Cinema {
        Cinema {
            state: OverlayState::Off,
            alpha: 0,
            hold_timer: 0,
            visible: false,
            timing: timing.sanitised(),
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn hold_timer(&self) -> i32 {
        self.hold_timer
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Changes the timing. A fade that is already running picks up the new speeds on its next
    /// step.
    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing.sanitised();
    }

    pub fn is_active(&self) -> bool {
        self.state != OverlayState::Off
    }

    /// Starts the overlay if it isn't already running. Returns `false` without changing anything
    /// if it is, so a second trigger can't restart a fade halfway through.
    pub fn trigger(&mut self, sfx: &mut dyn SoundPlayer) -> bool {
        if self.is_active() {
            log::debug!("Ignoring cinema trigger while {}.", self.state);
            return false;
        }

        self.visible = true;
        self.alpha = 0;
        self.state = OverlayState::FadingIn;

        for cue in SoundCue::iter() {
            sfx.play_sfx(cue);
        }

        true
    }

    /// Steps the state machine by one frame.
    pub fn advance(&mut self) {
        match self.state {
            OverlayState::Off => {}

            OverlayState::FadingIn => {
                let next = u16::from(self.alpha) + u16::from(self.timing.fade_in);

                if next >= 255 {
                    self.alpha = 255;
                    self.state = OverlayState::Showing;
                    self.hold_timer = i32::from(self.timing.hold_frames);
                } else {
                    self.alpha = next as u8;
                }
            }

            OverlayState::Showing => {
                self.hold_timer -= 1;

                if self.hold_timer <= 0 {
                    self.state = OverlayState::FadingOut;
                }
            }

            OverlayState::FadingOut => {
                let next = i16::from(self.alpha) - i16::from(self.timing.fade_out);

                if next <= 0 {
                    self.alpha = 0;
                    self.state = OverlayState::Off;
                    self.visible = false;
                } else {
                    self.alpha = next as u8;
                }
            }
        }
    }

    pub fn should_draw(&self) -> bool {
        self.visible && self.alpha > 0
    }

    /// Appends the overlay to `disp` if there is anything to show.
    pub fn render<'a>(&self, tiles: &'a SplitTiles, disp: &mut DisplayList<'a>) {
        if self.should_draw() {
            draw::draw_overlay(self.alpha, tiles, disp);
        }
    }
}
