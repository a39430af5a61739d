//! Interfaces to the parts of the game we read from or call into. The loader implements these
//! on top of the real game structures; tests implement them with plain values.

use glam::Vec3;
use strum::EnumIter;

/// Queries about the player character.
pub trait Player {
    /// Whether the player is in the death state.
    fn is_dead(&self) -> bool;

    /// Whether the player is frozen solid (by an ice trap, for example).
    fn is_frozen(&self) -> bool;

    /// The player's world position.
    fn position(&self) -> Vec3;

    /// Whether there is an actor within the player's interaction range. A bonk with no such actor
    /// means the player ran into level geometry.
    fn has_interact_actor(&self) -> bool;
}

/// Actor types that we need to recognise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorId {
    /// A treasure chest. Chests give their own feedback when bonked.
    TreasureBox,

    Other(u16),
}

impl ActorId {
    const EN_BOX: u16 = 0x0006;

    /// Converts the game's raw actor ID.
    pub fn from_raw(id: u16) -> ActorId {
        match id {
            ActorId::EN_BOX => ActorId::TreasureBox,
            other => ActorId::Other(other),
        }
    }
}

/// An actor from the game's prop category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Actor {
    pub id: ActorId,
    pub position: Vec3,
}

/// The state of the current scene.
pub trait PlayState {
    fn player(&self) -> &dyn Player;

    /// Iterates over the actors in the prop category.
    fn props(&self) -> Box<dyn Iterator<Item = Actor> + '_>;
}

/// Kinds of player impact that the game reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImpactKind {
    GoronGroundPound,
    ZoraBarrier,
    Bonk,
}

/// A player impact event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerImpact {
    pub kind: ImpactKind,
    pub timer: i32,
    pub distance: f32,
    pub position: Vec3,
}

/// Sound effects played when the overlay starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum SoundCue {
    BigBombExplosion,
    BombExplosion,
    BombExplosion2,
    ExplosionLong,
}

/// Fire-and-forget sound playback on the player.
pub trait SoundPlayer {
    fn play_sfx(&mut self, cue: SoundCue);
}
