//! The mod's own systems: settings and file locations. These don't touch the game at all.

pub mod resources;
pub mod settings;

pub fn init() {
    settings::init();
}
