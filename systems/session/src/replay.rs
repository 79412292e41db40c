//! Rebuilding sessions from persisted records.

use twin_elements_core::{ActorKind, GameState};
use twin_elements_world::{self as world, query, World, WorldConfig};

use crate::movement_command;

/// Regenerates the world from the record's seed and replays its history.
///
/// Replay stops early once the session reaches a terminal status. Characters
/// that are not movement keys are skipped. The stored positions are not
/// consulted; they are derived from the replay.
#[must_use]
pub fn replay(state: &GameState, config: WorldConfig) -> World {
    let mut world = World::generate(state.seed, config);
    let mut events = Vec::new();

    for key in state.keystroke_history.chars() {
        if query::status(&world).is_terminal() {
            break;
        }
        match movement_command(key) {
            Some(command) => {
                events.clear();
                world::apply(&mut world, command, &mut events);
            }
            None => log::debug!("skipping {key:?} in saved history"),
        }
    }

    log::debug!(
        "replayed {} keys for seed {}",
        query::total_steps(&world),
        state.seed
    );
    world
}

/// Captures the persisted record of a running session.
#[must_use]
pub fn capture(world: &World) -> GameState {
    GameState {
        seed: query::seed(world),
        fire_position: query::position(world, ActorKind::Fire),
        water_position: query::position(world, ActorKind::Water),
        keystroke_history: query::keystroke_history(world).to_owned(),
    }
}
