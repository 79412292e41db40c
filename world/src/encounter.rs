//! Encounter entry, gem scattering and recovery of the suspended dungeon.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use twin_elements_core::{ActorKind, Coordinate, Event, Grid, Room, SessionStatus, Tile};
use twin_elements_system_generation::stamp_room;

use crate::{World, WorldConfig};

/// Dungeon state suspended while an encounter runs.
///
/// The snapshot is the complete pre-encounter grid, actor tiles included, so
/// restoring it leaves the dungeon exactly as the triggering move found it.
#[derive(Clone, Debug)]
pub(crate) struct Encounter {
    captured: ActorKind,
    gems_required: u32,
    dungeon: Grid,
    fire: Coordinate,
    water: Coordinate,
}

impl Encounter {
    pub(crate) fn captured(&self) -> ActorKind {
        self.captured
    }

    pub(crate) fn gems_required(&self) -> u32 {
        self.gems_required
    }
}

impl World {
    /// Suspends the dungeon and drops the rescuer into a fresh encounter room.
    ///
    /// The captured actor is the one whose move triggered the encounter. It
    /// neither moves nor vacates its cell.
    pub(crate) fn enter_encounter(&mut self, captured: ActorKind, out_events: &mut Vec<Event>) {
        let room = encounter_room(&self.config, &self.grid);
        let mut arena = Grid::bordered(self.grid.width(), self.grid.height());
        stamp_room(&mut arena, &room, Tile::Floor, &[]);

        let rescuer = captured.partner();
        let center = room.center();
        arena.set(center, rescuer.tile());
        let gems_required = scatter_gems(
            &mut arena,
            &room,
            self.config.encounter_gems,
            &mut self.gem_rng,
        );

        let dungeon = std::mem::replace(&mut self.grid, arena);
        self.encounter = Some(Encounter {
            captured,
            gems_required,
            dungeon,
            fire: self.fire,
            water: self.water,
        });
        self.set_position(rescuer, center);
        self.gems_collected = 0;
        self.encounter_steps_left = self.encounter_budget;
        self.status = SessionStatus::Encounter;

        log::info!(
            "{captured:?} captured after {} steps; {rescuer:?} has {} steps to collect {gems_required} gems",
            self.total_steps,
            self.encounter_steps_left
        );
        out_events.push(Event::EncounterStarted {
            captured,
            steps_left: self.encounter_steps_left,
        });
        out_events.push(Event::StatusChanged {
            status: SessionStatus::Encounter,
        });
    }

    /// Restores the suspended dungeon and tightens the next budget.
    pub(crate) fn clear_encounter(&mut self, out_events: &mut Vec<Event>) {
        if let Some(encounter) = self.encounter.take() {
            self.grid = encounter.dungeon;
            self.fire = encounter.fire;
            self.water = encounter.water;
        }
        self.gems_collected = 0;
        self.encounter_budget -= self.config.encounter_step_penalty;
        self.encounter_steps_left = self.encounter_budget;
        self.status = SessionStatus::Exploring;

        log::info!(
            "encounter cleared; next encounter allows {} steps",
            self.encounter_budget
        );
        out_events.push(Event::EncounterCleared {
            next_budget: self.encounter_budget,
        });
        out_events.push(Event::StatusChanged {
            status: SessionStatus::Exploring,
        });
    }
}

/// Encounter room centered on the grid.
pub(crate) fn encounter_room(config: &WorldConfig, grid: &Grid) -> Room {
    let width = config.encounter_room_width;
    let height = config.encounter_room_height;
    let bottom_left = Coordinate::new(
        grid.max_x() / 2 - (width / 2 - 1),
        grid.max_y() / 2 - (height / 2 - 1),
    );
    Room::new(bottom_left, width, height)
}

/// Scatters up to `count` gems on distinct interior floor cells of the room.
///
/// Returns the number of gems placed, which is smaller than `count` only
/// when the room has fewer free cells.
fn scatter_gems(grid: &mut Grid, room: &Room, count: u32, rng: &mut ChaCha8Rng) -> u32 {
    let free = room
        .cells()
        .filter(|cell| !room.is_on_edge(*cell) && grid.is(*cell, Tile::Floor))
        .count();
    let placed = count.min(u32::try_from(free).unwrap_or(u32::MAX));

    let bottom_left = room.bottom_left();
    let top_right = room.top_right();
    let mut remaining = placed;
    while remaining > 0 {
        let cell = Coordinate::new(
            rng.gen_range(bottom_left.x() + 1..top_right.x()),
            rng.gen_range(bottom_left.y() + 1..top_right.y()),
        );
        if grid.is(cell, Tile::Floor) {
            grid.set(cell, Tile::Gem);
            remaining -= 1;
        }
    }

    placed
}
