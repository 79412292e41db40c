#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Twin Elements.
//!
//! The [`World`] owns the live grid, both actor positions and every session
//! counter. It is mutated exclusively through [`apply`], which runs one
//! command to completion, including any encounter entry or exit it causes,
//! before returning. Read access goes through the [`query`] module.

mod encounter;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use twin_elements_core::{
    ActorKind, Command, Coordinate, Direction, Event, Grid, Layout, Room, SessionStatus, Tile,
    ARMOR_PICKUP_STEPS, ENCOUNTER_BASE_STEPS, ENCOUNTER_GEM_COUNT, ENCOUNTER_STEP_PENALTY,
    TRAIL_STEPS_LIMIT, WORLD_HEIGHT, WORLD_WIDTH,
};
use twin_elements_system_generation as generation;

use self::encounter::Encounter;

/// Gem placement draws from a stream that is independent of the world seed.
const GEM_STREAM_SEED: u64 = 0;

const ENCOUNTER_ROOM_WIDTH: i32 = 20;
const ENCOUNTER_ROOM_HEIGHT: i32 = 10;

/// Tuning knobs for the rule set.
///
/// `Default` carries the reference values. Tests and tools may shrink them to
/// exercise a rule without playing hundreds of steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Width of generated dungeons, border included.
    pub width: u32,
    /// Height of generated dungeons, border included.
    pub height: u32,
    /// Steps that must be exceeded before actors leave elemental trails.
    pub trail_steps_limit: u32,
    /// Armor duration added by each armor pickup.
    pub armor_pickup_steps: u32,
    /// Step budget of the first encounter.
    pub encounter_base_steps: i32,
    /// Budget reduction applied after every cleared encounter.
    pub encounter_step_penalty: i32,
    /// Gems scattered into each encounter room.
    pub encounter_gems: u32,
    /// Width of the encounter room, walls included.
    pub encounter_room_width: i32,
    /// Height of the encounter room, walls included.
    pub encounter_room_height: i32,
}

impl WorldConfig {
    /// Generation parameters derived from this configuration.
    #[must_use]
    pub const fn generation(&self) -> generation::Config {
        generation::Config::new(self.width, self.height)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            trail_steps_limit: TRAIL_STEPS_LIMIT,
            armor_pickup_steps: ARMOR_PICKUP_STEPS,
            encounter_base_steps: ENCOUNTER_BASE_STEPS,
            encounter_step_penalty: ENCOUNTER_STEP_PENALTY,
            encounter_gems: ENCOUNTER_GEM_COUNT,
            encounter_room_width: ENCOUNTER_ROOM_WIDTH,
            encounter_room_height: ENCOUNTER_ROOM_HEIGHT,
        }
    }
}

/// Represents the authoritative Twin Elements world state.
#[derive(Clone, Debug)]
pub struct World {
    config: WorldConfig,
    seed: u64,
    grid: Grid,
    rooms: Vec<Room>,
    fire_door: Coordinate,
    water_door: Coordinate,
    armor: Coordinate,
    fire: Coordinate,
    water: Coordinate,
    total_steps: u32,
    armor_steps_left: u32,
    gems_collected: u32,
    encounter_budget: i32,
    encounter_steps_left: i32,
    status: SessionStatus,
    encounter: Option<Encounter>,
    gem_rng: ChaCha8Rng,
    history: String,
}

impl World {
    /// Generates a fresh dungeon from the seed and wraps it in a new world.
    #[must_use]
    pub fn generate(seed: u64, config: WorldConfig) -> Self {
        let layout = generation::generate(seed, &config.generation());
        Self::from_layout(layout, config)
    }

    /// Creates a world around an already generated layout.
    #[must_use]
    pub fn from_layout(layout: Layout, config: WorldConfig) -> Self {
        Self {
            config,
            seed: layout.seed,
            grid: layout.grid,
            rooms: layout.rooms,
            fire_door: layout.fire_door,
            water_door: layout.water_door,
            armor: layout.armor,
            fire: layout.fire_spawn,
            water: layout.water_spawn,
            total_steps: 0,
            armor_steps_left: 0,
            gems_collected: 0,
            encounter_budget: config.encounter_base_steps,
            encounter_steps_left: config.encounter_base_steps,
            status: SessionStatus::Exploring,
            encounter: None,
            gem_rng: ChaCha8Rng::seed_from_u64(GEM_STREAM_SEED),
            history: String::new(),
        }
    }

    fn position(&self, actor: ActorKind) -> Coordinate {
        match actor {
            ActorKind::Fire => self.fire,
            ActorKind::Water => self.water,
        }
    }

    fn set_position(&mut self, actor: ActorKind, cell: Coordinate) {
        match actor {
            ActorKind::Fire => self.fire = cell,
            ActorKind::Water => self.water = cell,
        }
    }

    fn is_captured(&self, actor: ActorKind) -> bool {
        self.encounter
            .as_ref()
            .is_some_and(|encounter| encounter.captured() == actor)
    }

    /// Tile left behind on a cell the actor vacates.
    ///
    /// Doors only exist on the dungeon grid, so they are restored only while
    /// exploring. Trails replace plain floor once the step counter exceeds
    /// the trail limit.
    fn ground_tile(&self, actor: ActorKind, cell: Coordinate) -> Tile {
        if self.status == SessionStatus::Exploring {
            if cell == self.fire_door {
                return Tile::FireDoor;
            }
            if cell == self.water_door {
                return Tile::WaterDoor;
            }
        }

        if self.total_steps > self.config.trail_steps_limit {
            actor.trail()
        } else {
            Tile::Floor
        }
    }

    fn step_actor(&mut self, actor: ActorKind, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.position(actor);
        let target = from.step(direction);
        let target_tile = match self.grid.get(target) {
            Some(tile) if tile.is_enterable() && !self.is_captured(actor) => tile,
            _ => {
                out_events.push(Event::MoveRejected { actor, target });
                return;
            }
        };

        if self.status == SessionStatus::Encounter {
            self.encounter_steps_left -= 1;
            if target_tile == Tile::Gem {
                self.gems_collected += 1;
                out_events.push(Event::GemCollected {
                    collected: self.gems_collected,
                });
            }
        }

        if target_tile == Tile::Armor {
            self.armor_steps_left = self
                .armor_steps_left
                .saturating_add(self.config.armor_pickup_steps);
            out_events.push(Event::ArmorCollected {
                duration: self.armor_steps_left,
            });
        }
        if self.armor_steps_left > 0 {
            self.armor_steps_left -= 1;
        }

        if self.status == SessionStatus::Exploring
            && target_tile == actor.opposing_element()
            && self.armor_steps_left == 0
        {
            self.enter_encounter(actor, out_events);
            return;
        }

        let ground = self.ground_tile(actor, from);
        self.grid.set(from, ground);
        self.grid.set(target, actor.tile());
        self.set_position(actor, target);
        out_events.push(Event::ActorMoved {
            actor,
            from,
            to: target,
        });
    }

    /// Settles status transitions after a command.
    fn resolve_status(&mut self, out_events: &mut Vec<Event>) {
        if self.status == SessionStatus::Encounter {
            let required = self
                .encounter
                .as_ref()
                .map_or(self.config.encounter_gems, Encounter::gems_required);
            if self.gems_collected >= required {
                self.clear_encounter(out_events);
            } else if self.encounter_steps_left <= 0 {
                self.finish(SessionStatus::Lost, out_events);
            }
        }

        if self.status == SessionStatus::Exploring
            && self.fire == self.fire_door
            && self.water == self.water_door
        {
            self.finish(SessionStatus::Won, out_events);
        }
    }

    fn finish(&mut self, status: SessionStatus, out_events: &mut Vec<Event>) {
        self.status = status;
        log::info!(
            "session for seed {} ended as {status:?} after {} steps",
            self.seed,
            self.total_steps
        );
        out_events.push(Event::StatusChanged { status });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Every movement command counts as a step and is appended to the keystroke
/// history, even when the move is blocked. Whether the actor moved is
/// reported through [`Event::ActorMoved`], [`Event::MoveRejected`] or
/// [`Event::EncounterStarted`]. Once the session is won or lost commands are
/// ignored entirely.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.status.is_terminal() {
        return;
    }

    match command {
        Command::MoveActor { actor, direction } => {
            world.total_steps = world.total_steps.saturating_add(1);
            world.history.push(actor.key_for(direction));
            world.step_actor(actor, direction, out_events);
        }
    }

    world.resolve_status(out_events);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use twin_elements_core::{
        ActorKind, Coordinate, Grid, HudStatus, Room, SessionStatus, Tile,
    };

    /// Live grid, which is the encounter room while an encounter runs.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Tile under the provided coordinate, if it lies inside the grid.
    #[must_use]
    pub fn tile_at(world: &World, cell: Coordinate) -> Option<Tile> {
        world.grid.get(cell)
    }

    /// Seed the dungeon was generated from.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }

    /// Current session status.
    #[must_use]
    pub fn status(world: &World) -> SessionStatus {
        world.status
    }

    /// Recorded position of the actor.
    ///
    /// During an encounter the captured actor keeps the position it held
    /// before it was caught.
    #[must_use]
    pub fn position(world: &World, actor: ActorKind) -> Coordinate {
        world.position(actor)
    }

    /// Actor removed from play by the running encounter, if any.
    #[must_use]
    pub fn captured_actor(world: &World) -> Option<ActorKind> {
        world.encounter.as_ref().map(|encounter| encounter.captured())
    }

    /// Accepted rooms in acceptance order.
    #[must_use]
    pub fn rooms(world: &World) -> &[Room] {
        &world.rooms
    }

    /// Location of the fire actor's door.
    #[must_use]
    pub fn fire_door(world: &World) -> Coordinate {
        world.fire_door
    }

    /// Location of the water actor's door.
    #[must_use]
    pub fn water_door(world: &World) -> Coordinate {
        world.water_door
    }

    /// Location where the dungeon's armor was generated.
    #[must_use]
    pub fn armor_location(world: &World) -> Coordinate {
        world.armor
    }

    /// Every movement key processed so far.
    #[must_use]
    pub fn keystroke_history(world: &World) -> &str {
        &world.history
    }

    /// Number of movement commands processed so far.
    #[must_use]
    pub fn total_steps(world: &World) -> u32 {
        world.total_steps
    }

    /// Shared armor duration.
    #[must_use]
    pub fn armor_duration(world: &World) -> u32 {
        world.armor_steps_left
    }

    /// Gems collected in the running encounter.
    #[must_use]
    pub fn gems_collected(world: &World) -> u32 {
        world.gems_collected
    }

    /// Steps left in the running or next encounter.
    #[must_use]
    pub fn encounter_steps_left(world: &World) -> i32 {
        world.encounter_steps_left
    }

    /// Step budget granted to the next encounter.
    #[must_use]
    pub fn encounter_budget(world: &World) -> i32 {
        world.encounter_budget
    }

    /// Scalar values for the heads-up display.
    #[must_use]
    pub fn hud_status(world: &World) -> HudStatus {
        HudStatus {
            status: world.status,
            steps_remaining: world.encounter_steps_left,
            gems_collected: world.gems_collected,
            armor_duration: world.armor_steps_left,
            steps_until_trails: world
                .config
                .trail_steps_limit
                .saturating_sub(world.total_steps),
        }
    }
}
