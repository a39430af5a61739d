//! The points in the game's frame where the mod runs. The loader patches the game so that it calls
//! the dispatch functions here, and each dispatch function forwards to every registered observer.

use std::sync::Mutex;

use strum::Display;

use crate::game::gfx::DisplayList;
use crate::game::host::{PlayState, PlayerImpact, SoundPlayer};

/// Places in the game that we hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum HookPoint {
    /// After the player and world have been set up for a scene.
    AfterPlayInit,

    /// Once per frame, before anything is drawn.
    PlayUpdate,

    /// When the game reports that the player hit something.
    PlayerImpact,

    /// While the HUD is being drawn.
    InterfaceDraw,
}

/// Something that wants to be told about the game's frame. Every method has an empty default, so
/// observers only implement what they need.
pub trait FrameObserver: Send {
    /// A name for logging.
    fn name(&self) -> &'static str;

    fn on_init(&mut self, _play: &dyn PlayState) {}

    fn on_update(&mut self, _play: &dyn PlayState, _sfx: &mut dyn SoundPlayer) {}

    fn on_impact(
        &mut self,
        _play: &dyn PlayState,
        _impact: &PlayerImpact,
        _sfx: &mut dyn SoundPlayer,
    ) {
    }

    fn on_draw(&mut self, _play: &dyn PlayState, _disp: &mut DisplayList<'static>) {}
}

/// A list of observers, called in the order they were registered.
#[derive(Default)]
pub struct Hooks {
    observers: Vec<Box<dyn FrameObserver>>,
}

impl Hooks {
    pub fn new() -> Hooks {
        Hooks::default()
    }

    pub fn register(&mut self, observer: Box<dyn FrameObserver>) {
        log::info!("Registering observer '{}'.", observer.name());
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn after_play_init(&mut self, play: &dyn PlayState) {
        for observer in &mut self.observers {
            observer.on_init(play);
        }
    }

    pub fn play_update(&mut self, play: &dyn PlayState, sfx: &mut dyn SoundPlayer) {
        for observer in &mut self.observers {
            observer.on_update(play, sfx);
        }
    }

    pub fn player_impact(
        &mut self,
        play: &dyn PlayState,
        impact: &PlayerImpact,
        sfx: &mut dyn SoundPlayer,
    ) {
        for observer in &mut self.observers {
            observer.on_impact(play, impact, sfx);
        }
    }

    pub fn interface_draw(&mut self, play: &dyn PlayState, disp: &mut DisplayList<'static>) {
        for observer in &mut self.observers {
            observer.on_draw(play, disp);
        }
    }
}

lazy_static::lazy_static! {
    static ref HOOKS: Mutex<Hooks> = Mutex::new(Hooks::new());
}

/// Runs `f` on the global hook list. Nothing happens if the lock is poisoned, because a previous
/// observer panicked and the list can't be trusted.
fn with_hooks(point: HookPoint, f: impl FnOnce(&mut Hooks)) {
    match HOOKS.lock() {
        Ok(mut hooks) => f(&mut hooks),
        Err(err) => log::error!("Unable to run {point} hooks: {err}"),
    }
}

/// Adds an observer to the global hook list.
pub fn register(observer: Box<dyn FrameObserver>) {
    match HOOKS.lock() {
        Ok(mut hooks) => hooks.register(observer),
        Err(err) => log::error!("Unable to register observer '{}': {err}", observer.name()),
    }
}

pub fn after_play_init(play: &dyn PlayState) {
    with_hooks(HookPoint::AfterPlayInit, |hooks| hooks.after_play_init(play));
}

pub fn play_update(play: &dyn PlayState, sfx: &mut dyn SoundPlayer) {
    with_hooks(HookPoint::PlayUpdate, |hooks| hooks.play_update(play, sfx));
}

pub fn player_impact(play: &dyn PlayState, impact: &PlayerImpact, sfx: &mut dyn SoundPlayer) {
    with_hooks(HookPoint::PlayerImpact, |hooks| {
        hooks.player_impact(play, impact, sfx)
    });
}

pub fn interface_draw(play: &dyn PlayState, disp: &mut DisplayList<'static>) {
    with_hooks(HookPoint::InterfaceDraw, |hooks| {
        hooks.interface_draw(play, disp)
    });
}
