#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Twin Elements engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate keystrokes into
//! [`Command`] values, the world executes those commands via its `apply`
//! entry point, and then reports [`Event`] values describing what changed.
//! The generator system produces a [`Layout`] that seeds a fresh world, and
//! the persisted [`GameState`] is the only value that crosses the save
//! boundary.

mod grid;

pub use grid::Grid;

use serde::{Deserialize, Serialize};

/// Width of the dungeon, including its outer wall ring.
pub const WORLD_WIDTH: u32 = 100;

/// Height of the dungeon, including its outer wall ring.
pub const WORLD_HEIGHT: u32 = 50;

/// Total steps that must elapse before actors start leaving elemental trails.
pub const TRAIL_STEPS_LIMIT: u32 = 120;

/// Armor duration granted by a single armor pickup.
pub const ARMOR_PICKUP_STEPS: u32 = 101;

/// Encounter step budget granted to the first encounter of a session.
pub const ENCOUNTER_BASE_STEPS: i32 = 40;

/// Reduction applied to the encounter budget after each cleared encounter.
pub const ENCOUNTER_STEP_PENALTY: i32 = 5;

/// Number of gems scattered into every encounter room.
pub const ENCOUNTER_GEM_COUNT: u32 = 5;

/// Integer position on the dungeon grid.
///
/// `x` grows eastward and `y` grows northward, so `(0, 0)` is the
/// bottom-left corner of the map.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    x: i32,
    y: i32,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate offset by the provided deltas.
    #[must_use]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the neighbouring coordinate in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        self.shift(dx, dy)
    }
}

/// Closed set of tile kinds that can occupy a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Uncarved rock outside of rooms and hallways.
    #[default]
    Nothing,
    /// Impassable wall.
    Wall,
    /// Plain walkable floor.
    Floor,
    /// Burning floor, deadly to the water actor.
    Fire,
    /// Flooded floor, deadly to the fire actor.
    Water,
    /// Exit reserved for the fire actor.
    FireDoor,
    /// Exit reserved for the water actor.
    WaterDoor,
    /// Armor pickup that shields both actors from elemental contact.
    Armor,
    /// Collectible gem inside an encounter room.
    Gem,
    /// The fire actor.
    FireActor,
    /// The water actor.
    WaterActor,
}

impl Tile {
    /// Human-readable description shown when inspecting a cell.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Nothing => "nothing",
            Self::Wall => "wall",
            Self::Floor => "floor",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::FireDoor => "fire door",
            Self::WaterDoor => "water door",
            Self::Armor => "armor",
            Self::Gem => "gem",
            Self::FireActor => "fire actor",
            Self::WaterActor => "water actor",
        }
    }

    /// Single character used by text renderers.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Nothing => ' ',
            Self::Wall => '#',
            Self::Floor => '.',
            Self::Fire => '^',
            Self::Water => '~',
            Self::FireDoor => 'F',
            Self::WaterDoor => 'W',
            Self::Armor => '[',
            Self::Gem => '*',
            Self::FireActor => '@',
            Self::WaterActor => '&',
        }
    }

    /// Reports whether an actor may step onto the tile.
    ///
    /// Walls, uncarved rock and the other actor block movement. Elemental
    /// tiles are enterable; what happens there is decided by the controller.
    #[must_use]
    pub const fn is_enterable(self) -> bool {
        !matches!(
            self,
            Self::Nothing | Self::Wall | Self::FireActor | Self::WaterActor
        )
    }
}

/// One of the two player-controlled actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorKind {
    /// Fire actor, driven with `W`/`A`/`S`/`D`.
    Fire,
    /// Water actor, driven with `I`/`J`/`K`/`L`.
    Water,
}

impl ActorKind {
    /// Both actors in spawn order.
    pub const ALL: [ActorKind; 2] = [ActorKind::Fire, ActorKind::Water];

    /// Tile drawn at the actor's position.
    #[must_use]
    pub const fn tile(self) -> Tile {
        match self {
            Self::Fire => Tile::FireActor,
            Self::Water => Tile::WaterActor,
        }
    }

    /// Elemental tile the actor leaves behind once trails are active.
    #[must_use]
    pub const fn trail(self) -> Tile {
        match self {
            Self::Fire => Tile::Fire,
            Self::Water => Tile::Water,
        }
    }

    /// Elemental tile that triggers an encounter when entered without armor.
    #[must_use]
    pub const fn opposing_element(self) -> Tile {
        match self {
            Self::Fire => Tile::Water,
            Self::Water => Tile::Fire,
        }
    }

    /// The other actor.
    #[must_use]
    pub const fn partner(self) -> Self {
        match self {
            Self::Fire => Self::Water,
            Self::Water => Self::Fire,
        }
    }

    /// Keyboard character that moves this actor in the provided direction.
    #[must_use]
    pub const fn key_for(self, direction: Direction) -> char {
        match (self, direction) {
            (Self::Fire, Direction::North) => 'W',
            (Self::Fire, Direction::South) => 'S',
            (Self::Fire, Direction::West) => 'A',
            (Self::Fire, Direction::East) => 'D',
            (Self::Water, Direction::North) => 'I',
            (Self::Water, Direction::South) => 'K',
            (Self::Water, Direction::West) => 'J',
            (Self::Water, Direction::East) => 'L',
        }
    }

    /// Decodes a movement key into the actor and direction it controls.
    ///
    /// Lower-case keys are accepted. Any other character yields `None`.
    #[must_use]
    pub fn from_key(key: char) -> Option<(Self, Direction)> {
        let movement = match key.to_ascii_uppercase() {
            'W' => (Self::Fire, Direction::North),
            'S' => (Self::Fire, Direction::South),
            'A' => (Self::Fire, Direction::West),
            'D' => (Self::Fire, Direction::East),
            'I' => (Self::Water, Direction::North),
            'K' => (Self::Water, Direction::South),
            'J' => (Self::Water, Direction::West),
            'L' => (Self::Water, Direction::East),
            _ => return None,
        };
        Some(movement)
    }
}

/// Cardinal movement directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward increasing `y`.
    North,
    /// Movement toward increasing `x`.
    East,
    /// Movement toward decreasing `y`.
    South,
    /// Movement toward decreasing `x`.
    West,
}

impl Direction {
    /// Unit offset applied to a coordinate when moving in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }
}

/// Axis-aligned rectangular room anchored at its bottom-left corner.
///
/// The outermost ring of the rectangle is the room's wall; everything
/// strictly inside is floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    bottom_left: Coordinate,
    width: i32,
    height: i32,
}

impl Room {
    /// Creates a room from its bottom-left corner and dimensions.
    #[must_use]
    pub const fn new(bottom_left: Coordinate, width: i32, height: i32) -> Self {
        Self {
            bottom_left,
            width,
            height,
        }
    }

    /// Bottom-left corner of the room, part of its wall.
    #[must_use]
    pub const fn bottom_left(&self) -> Coordinate {
        self.bottom_left
    }

    /// Top-right corner of the room, part of its wall.
    #[must_use]
    pub const fn top_right(&self) -> Coordinate {
        self.bottom_left.shift(self.width - 1, self.height - 1)
    }

    /// Integer midpoint between the two corners.
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        let top_right = self.top_right();
        Coordinate::new(
            (self.bottom_left.x + top_right.x) / 2,
            (self.bottom_left.y + top_right.y) / 2,
        )
    }

    /// Width of the room including its walls.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height of the room including its walls.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Reports whether the coordinate lies on the room's wall ring.
    #[must_use]
    pub const fn is_on_edge(&self, cell: Coordinate) -> bool {
        let top_right = self.top_right();
        cell.x == self.bottom_left.x
            || cell.x == top_right.x
            || cell.y == self.bottom_left.y
            || cell.y == top_right.y
    }

    /// Inclusive bounding-box test; rooms that merely touch also overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &Room) -> bool {
        let own_top_right = self.top_right();
        let other_top_right = other.top_right();
        let apart_horizontally =
            self.bottom_left.x > other_top_right.x || own_top_right.x < other.bottom_left.x;
        let apart_vertically =
            self.bottom_left.y > other_top_right.y || own_top_right.y < other.bottom_left.y;
        !apart_horizontally && !apart_vertically
    }

    /// Iterator over every cell covered by the room, walls included.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let bottom_left = self.bottom_left;
        let top_right = self.top_right();
        (bottom_left.x..=top_right.x)
            .flat_map(move |x| (bottom_left.y..=top_right.y).map(move |y| Coordinate::new(x, y)))
    }
}

/// Output of the dungeon generator, used to seed a fresh world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Seed the layout was generated from.
    pub seed: u64,
    /// Fully carved grid with both actors placed.
    pub grid: Grid,
    /// Accepted rooms in acceptance order.
    pub rooms: Vec<Room>,
    /// Center of the first accepted room.
    pub fire_door: Coordinate,
    /// Center of the second accepted room.
    pub water_door: Coordinate,
    /// Center of the third accepted room.
    pub armor: Coordinate,
    /// Spawn position of the fire actor.
    pub fire_spawn: Coordinate,
    /// Spawn position of the water actor.
    pub water_spawn: Coordinate,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests that an actor take one step in the provided direction.
    MoveActor {
        /// Actor attempting to move.
        actor: ActorKind,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Lifecycle of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Both actors roam the dungeon.
    Exploring,
    /// One actor was caught by the opposing element and the other is
    /// collecting gems to revive it.
    Encounter,
    /// Both actors stand on their doors. Terminal.
    Won,
    /// The encounter step budget ran out. Terminal.
    Lost,
}

impl SessionStatus {
    /// Reports whether no further commands will be processed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that an actor moved between two cells.
    ActorMoved {
        /// Actor that moved.
        actor: ActorKind,
        /// Cell the actor occupied before moving.
        from: Coordinate,
        /// Cell the actor occupies after moving.
        to: Coordinate,
    },
    /// Reports that a step was blocked.
    MoveRejected {
        /// Actor whose step was blocked.
        actor: ActorKind,
        /// Cell the actor attempted to enter.
        target: Coordinate,
    },
    /// Reports that an armor pickup extended the shared armor duration.
    ArmorCollected {
        /// Armor duration after the pickup.
        duration: u32,
    },
    /// Reports that a gem was collected inside an encounter room.
    GemCollected {
        /// Gems collected so far in the running encounter.
        collected: u32,
    },
    /// Announces that an actor was caught and an encounter began.
    EncounterStarted {
        /// Actor that touched the opposing element.
        captured: ActorKind,
        /// Steps available to clear the encounter.
        steps_left: i32,
    },
    /// Announces that every gem was collected and the dungeon was restored.
    EncounterCleared {
        /// Step budget granted to the next encounter.
        next_budget: i32,
    },
    /// Announces that the session entered a new status.
    StatusChanged {
        /// Status that became active.
        status: SessionStatus,
    },
}

/// Scalar values shown on the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudStatus {
    /// Current session status.
    pub status: SessionStatus,
    /// Encounter steps remaining.
    pub steps_remaining: i32,
    /// Gems collected in the running encounter.
    pub gems_collected: u32,
    /// Shared armor duration.
    pub armor_duration: u32,
    /// Steps left before trails activate, never negative.
    pub steps_until_trails: u32,
}

/// Persisted record of a session.
///
/// The seed and keystroke history are authoritative: replaying the history
/// against a world generated from the seed reproduces the session. The stored
/// positions are informational only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the dungeon was generated from.
    pub seed: u64,
    /// Fire actor position when the record was captured.
    pub fire_position: Coordinate,
    /// Water actor position when the record was captured.
    pub water_position: Coordinate,
    /// Every movement key processed since generation, in order.
    pub keystroke_history: String,
}
