#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic dungeon generation system.
//!
//! A layout is a pure function of its seed and dimensions. Every phase draws
//! from its own explicitly seeded stream so the consumption order of one
//! phase never perturbs another:
//!
//! 1. room placement (rejection sampling of non-touching rooms),
//! 2. hallway carving between consecutive rooms,
//! 3. room stamping with a per-room floor flavor,
//! 4. actor spawning on random plain floor cells.

mod carving;
mod rooms;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use twin_elements_core::{
    ActorKind, Coordinate, Grid, Layout, Room, Tile, WORLD_HEIGHT, WORLD_WIDTH,
};

pub use carving::stamp_room;

const FLAVOR_DRAW: u32 = 3;

/// Configuration parameters required to generate a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    width: u32,
    height: u32,
}

impl Config {
    /// Creates a new configuration for a dungeon of the provided size,
    /// border included.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the generated grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the generated grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

/// Generates the dungeon layout for the provided seed.
///
/// Generation never fails. Room placement retries rejected candidates
/// without bound, which terminates quickly for the reference dimensions but
/// may spin on grids too small to hold the minimum room count.
#[must_use]
pub fn generate(seed: u64, config: &Config) -> Layout {
    let mut grid = Grid::bordered(config.width, config.height);

    let mut placement = ChaCha8Rng::seed_from_u64(seed);
    let rooms = rooms::place_rooms(&mut placement, grid.max_x(), grid.max_y());
    let fire_door = special_center(&rooms, 0);
    let water_door = special_center(&rooms, 1);
    let armor = special_center(&rooms, 2);

    carving::carve_hallways(&mut grid, &rooms);
    carving::unblock(&mut grid);

    let specials = [
        (fire_door, Tile::FireDoor),
        (water_door, Tile::WaterDoor),
        (armor, Tile::Armor),
    ];
    let mut flavors = ChaCha8Rng::seed_from_u64(seed);
    for room in &rooms {
        let floor = floor_flavor(flavors.gen_range(0..FLAVOR_DRAW));
        stamp_room(&mut grid, room, floor, &specials);
    }
    carving::unblock(&mut grid);

    let fire_spawn = spawn_actor(&mut grid, seed, ActorKind::Fire);
    let water_spawn = spawn_actor(&mut grid, seed, ActorKind::Water);

    log::debug!(
        "generated {} rooms for seed {seed}; fire spawn {fire_spawn:?}, water spawn {water_spawn:?}",
        rooms.len()
    );

    Layout {
        seed,
        grid,
        rooms,
        fire_door,
        water_door,
        armor,
        fire_spawn,
        water_spawn,
    }
}

fn special_center(rooms: &[Room], index: usize) -> Coordinate {
    rooms.get(index).map(Room::center).unwrap_or_default()
}

fn floor_flavor(draw: u32) -> Tile {
    match draw {
        0 => Tile::Fire,
        1 => Tile::Water,
        _ => Tile::Floor,
    }
}

/// Places an actor on a uniformly drawn plain floor cell.
///
/// Each actor's search restarts the stream from the world seed. The second
/// search still lands elsewhere because the first actor no longer stands on
/// floor.
fn spawn_actor(grid: &mut Grid, seed: u64, actor: ActorKind) -> Coordinate {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    loop {
        let cell = Coordinate::new(
            draw_below(&mut rng, grid.max_x()),
            draw_below(&mut rng, grid.max_y()),
        );
        if grid.is(cell, Tile::Floor) {
            grid.set(cell, actor.tile());
            return cell;
        }
    }
}

/// Draws a value in `[0, bound)`, collapsing empty ranges to zero.
pub(crate) fn draw_below(rng: &mut ChaCha8Rng, bound: i32) -> i32 {
    if bound <= 0 {
        0
    } else {
        rng.gen_range(0..bound)
    }
}
