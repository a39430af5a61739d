//! Decides when the overlay should start.

use strum::{Display, EnumIter};

use super::cinema::Cinema;
use super::host::{ActorId, ImpactKind, PlayState, PlayerImpact, SoundPlayer};
use crate::meta::settings::Options;

/// Bonks within this distance of a treasure chest are left alone, because the chest gives its
/// own feedback.
pub const BREAKABLE_PROP_RADIUS: f32 = 80.0;

/// Things that can start the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
pub enum TriggerSource {
    Bonk,
    Death,
    Frozen,
}

/// Per-condition latches. A latch is set when its condition fires and cleared once the player
/// leaves that state, so each death or freeze starts the overlay at most once.
#[derive(Debug, Default)]
pub struct Triggers {
    death_latch: bool,
    frozen_latch: bool,
}

/// Fires `source` if the condition holds, it is enabled, and its latch is clear.
fn check_latched(
    latch: &mut bool,
    condition: bool,
    source: TriggerSource,
    options: &Options,
    cinema: &mut Cinema,
    sfx: &mut dyn SoundPlayer,
) {
    if !condition {
        *latch = false;
        return;
    }

    if *latch || !options.is_enabled(source) {
        return;
    }

    if cinema.trigger(sfx) {
        log::info!("Cinema triggered by {source}.");
    }

    *latch = true;
}

impl Triggers {
    pub fn new() -> Triggers {
        Triggers::default()
    }

    /// Checks the death and frozen conditions. Called once per frame.
    pub fn on_update(
        &mut self,
        cinema: &mut Cinema,
        play: &dyn PlayState,
        options: &Options,
        sfx: &mut dyn SoundPlayer,
    ) {
        let player = play.player();

        check_latched(
            &mut self.death_latch,
            player.is_dead(),
            TriggerSource::Death,
            options,
            cinema,
            sfx,
        );

        check_latched(
            &mut self.frozen_latch,
            player.is_frozen(),
            TriggerSource::Frozen,
            options,
            cinema,
            sfx,
        );
    }

    /// Checks a player impact for a bonk into level geometry. There is no latch here; the overlay
    /// ignores triggers while it is already running.
    pub fn on_impact(
        &mut self,
        cinema: &mut Cinema,
        play: &dyn PlayState,
        impact: &PlayerImpact,
        options: &Options,
        sfx: &mut dyn SoundPlayer,
    ) {
        if impact.kind != ImpactKind::Bonk || !options.is_enabled(TriggerSource::Bonk) {
            return;
        }

        let player = play.player();

        if is_near_breakable_prop(play, player.position(), BREAKABLE_PROP_RADIUS) {
            log::debug!("Bonk next to a breakable prop, not triggering.");
            return;
        }

        if !player.has_interact_actor() && cinema.trigger(sfx) {
            log::info!("Cinema triggered by {}.", TriggerSource::Bonk);
        }
    }
}

/// Whether any treasure chest is strictly closer than `radius` to `position`.
fn is_near_breakable_prop(play: &dyn PlayState, position: glam::Vec3, radius: f32) -> bool {
    play.props().any(|actor| {
        actor.id == ActorId::TreasureBox
            && actor.position.distance_squared(position) < radius * radius
    })
}
