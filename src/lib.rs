//! Sets up the cinema overlay when the library is loaded.
//!
//! The loader patches the game to call the dispatch functions in [`hook`] and implements the
//! traits in [`game::host`] on top of the game's own structures.

pub mod game;
pub mod hook;
mod logging;
pub mod meta;

#[cfg(not(test))]
#[ctor::ctor]
fn load() {
    // Load the logging system before everything else so we can log from constructors.
    if let Err(err) = logging::init() {
        eprintln!("cinema: unable to start logging: {err:?}");
    }

    log::info!("Cargo package version is {}", env!("CARGO_PKG_VERSION"));

    meta::init();
    game::init();
}
