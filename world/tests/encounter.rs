use twin_elements_core::{
    ActorKind, Command, Coordinate, Direction, Event, Grid, Layout, SessionStatus, Tile,
};
use twin_elements_world::{self as world, query, World, WorldConfig};

const ARENA_CENTER: Coordinate = Coordinate::new(14, 7);

/// Corridor with a water puddle right in front of the fire actor and a fire
/// puddle right in front of the water actor.
fn puddles(config: WorldConfig) -> World {
    let mut grid = Grid::bordered(30, 16);
    for x in 1..29 {
        grid.set(Coordinate::new(x, 6), Tile::Wall);
        grid.set(Coordinate::new(x, 5), Tile::Floor);
        grid.set(Coordinate::new(x, 4), Tile::Wall);
    }
    let fire = Coordinate::new(7, 5);
    let water = Coordinate::new(20, 5);
    grid.set(Coordinate::new(8, 5), Tile::Water);
    grid.set(Coordinate::new(19, 5), Tile::Fire);
    grid.set(fire, Tile::FireActor);
    grid.set(water, Tile::WaterActor);

    World::from_layout(
        Layout {
            seed: 3,
            grid,
            rooms: Vec::new(),
            fire_door: Coordinate::new(1, 5),
            water_door: Coordinate::new(28, 5),
            armor: Coordinate::new(1, 1),
            fire_spawn: fire,
            water_spawn: water,
        },
        config,
    )
}

fn generous() -> WorldConfig {
    WorldConfig {
        encounter_base_steps: 400,
        ..WorldConfig::default()
    }
}

fn step(world: &mut World, actor: ActorKind, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::MoveActor { actor, direction }, &mut events);
    events
}

/// Walks the rescuer to the nearest gem until the encounter ends.
fn collect_gems(world: &mut World, rescuer: ActorKind) -> Vec<Event> {
    let mut log = Vec::new();
    while query::status(world) == SessionStatus::Encounter {
        let here = query::position(world, rescuer);
        let gem = query::grid(world)
            .iter()
            .filter(|(_, tile)| *tile == Tile::Gem)
            .map(|(cell, _)| cell)
            .min_by_key(|cell| (cell.x() - here.x()).abs() + (cell.y() - here.y()).abs())
            .expect("a gem remains while the encounter runs");
        let direction = if gem.x() > here.x() {
            Direction::East
        } else if gem.x() < here.x() {
            Direction::West
        } else if gem.y() > here.y() {
            Direction::North
        } else {
            Direction::South
        };
        log.extend(step(world, rescuer, direction));
    }
    log
}

#[test]
fn touching_opposing_element_starts_encounter() {
    let mut world = puddles(WorldConfig::default());

    let events = step(&mut world, ActorKind::Fire, Direction::East);

    assert_eq!(
        events,
        vec![
            Event::EncounterStarted {
                captured: ActorKind::Fire,
                steps_left: 40,
            },
            Event::StatusChanged {
                status: SessionStatus::Encounter,
            },
        ]
    );
    assert_eq!(query::status(&world), SessionStatus::Encounter);
    assert_eq!(query::captured_actor(&world), Some(ActorKind::Fire));
    assert_eq!(
        query::position(&world, ActorKind::Fire),
        Coordinate::new(7, 5)
    );
    assert_eq!(query::position(&world, ActorKind::Water), ARENA_CENTER);

    let grid = query::grid(&world);
    assert_eq!(grid.get(ARENA_CENTER), Some(Tile::WaterActor));
    assert_eq!(grid.count(Tile::Gem), 5);
    assert_eq!(grid.count(Tile::WaterActor), 1);
    assert_eq!(grid.count(Tile::FireActor), 0);
    assert_eq!(grid.get(Coordinate::new(5, 3)), Some(Tile::Wall));
    assert_eq!(grid.get(Coordinate::new(24, 12)), Some(Tile::Wall));
    assert_eq!(grid.get(Coordinate::new(2, 2)), Some(Tile::Nothing));
}

#[test]
fn water_capture_sends_fire_to_the_rescue() {
    let mut world = puddles(WorldConfig::default());

    let _ = step(&mut world, ActorKind::Water, Direction::West);

    assert_eq!(query::captured_actor(&world), Some(ActorKind::Water));
    assert_eq!(query::position(&world, ActorKind::Fire), ARENA_CENTER);
    assert_eq!(
        query::position(&world, ActorKind::Water),
        Coordinate::new(20, 5)
    );
}

#[test]
fn captured_actor_cannot_move() {
    let mut world = puddles(WorldConfig::default());
    let _ = step(&mut world, ActorKind::Fire, Direction::East);

    let events = step(&mut world, ActorKind::Fire, Direction::West);

    assert!(matches!(
        events.as_slice(),
        [Event::MoveRejected {
            actor: ActorKind::Fire,
            ..
        }]
    ));
    assert_eq!(query::encounter_steps_left(&world), 40);
    assert_eq!(query::keystroke_history(&world), "DA");
}

#[test]
fn rescuer_moves_spend_encounter_steps() {
    let mut world = puddles(WorldConfig::default());
    let _ = step(&mut world, ActorKind::Fire, Direction::East);

    let _ = step(&mut world, ActorKind::Water, Direction::West);
    let _ = step(&mut world, ActorKind::Water, Direction::West);

    assert_eq!(query::encounter_steps_left(&world), 38);
    assert_eq!(query::hud_status(&world).steps_remaining, 38);
}

#[test]
fn clearing_encounter_restores_dungeon() {
    let mut world = puddles(generous());
    let before = query::grid(&world).clone();
    let _ = step(&mut world, ActorKind::Fire, Direction::East);

    let events = collect_gems(&mut world, ActorKind::Water);

    assert_eq!(query::status(&world), SessionStatus::Exploring);
    assert!(events.contains(&Event::GemCollected { collected: 5 }));
    assert!(events.contains(&Event::EncounterCleared { next_budget: 395 }));
    assert_eq!(query::grid(&world), &before);
    assert_eq!(
        query::position(&world, ActorKind::Fire),
        Coordinate::new(7, 5)
    );
    assert_eq!(
        query::position(&world, ActorKind::Water),
        Coordinate::new(20, 5)
    );
    assert_eq!(query::captured_actor(&world), None);
    assert_eq!(query::gems_collected(&world), 0);
    assert_eq!(query::encounter_steps_left(&world), 395);
}

#[test]
fn each_cleared_encounter_shrinks_the_budget() {
    let mut world = puddles(generous());

    let _ = step(&mut world, ActorKind::Fire, Direction::East);
    let _ = collect_gems(&mut world, ActorKind::Water);
    let events = step(&mut world, ActorKind::Fire, Direction::East);

    assert!(events.contains(&Event::EncounterStarted {
        captured: ActorKind::Fire,
        steps_left: 395,
    }));

    let _ = collect_gems(&mut world, ActorKind::Water);
    assert_eq!(query::encounter_budget(&world), 390);
}

#[test]
fn running_out_of_steps_loses() {
    let config = WorldConfig {
        encounter_base_steps: 3,
        ..WorldConfig::default()
    };
    let mut world = puddles(config);
    let _ = step(&mut world, ActorKind::Fire, Direction::East);

    let _ = step(&mut world, ActorKind::Water, Direction::West);
    let _ = step(&mut world, ActorKind::Water, Direction::West);
    assert_eq!(query::status(&world), SessionStatus::Encounter);
    let events = step(&mut world, ActorKind::Water, Direction::West);

    assert_eq!(
        events.last(),
        Some(&Event::StatusChanged {
            status: SessionStatus::Lost
        })
    );
    assert_eq!(query::status(&world), SessionStatus::Lost);

    let history = query::keystroke_history(&world).to_owned();
    let after = step(&mut world, ActorKind::Water, Direction::West);
    assert!(after.is_empty());
    assert_eq!(query::keystroke_history(&world), history);
}

#[test]
fn exhausted_budget_loses_on_entry() {
    let config = WorldConfig {
        encounter_base_steps: 0,
        ..WorldConfig::default()
    };
    let mut world = puddles(config);

    let events = step(&mut world, ActorKind::Fire, Direction::East);

    assert_eq!(
        events.last(),
        Some(&Event::StatusChanged {
            status: SessionStatus::Lost
        })
    );
}

#[test]
fn gem_placement_continues_across_encounters() {
    let mut first = puddles(generous());
    let _ = step(&mut first, ActorKind::Fire, Direction::East);
    let first_arena = query::grid(&first).clone();
    let _ = collect_gems(&mut first, ActorKind::Water);
    let _ = step(&mut first, ActorKind::Fire, Direction::East);

    let mut second = puddles(generous());
    let _ = step(&mut second, ActorKind::Fire, Direction::East);

    assert_eq!(query::grid(&second), &first_arena);
    assert_ne!(query::grid(&first), &first_arena);
}
