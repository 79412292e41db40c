use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use twin_elements_core::{
    ActorKind, Command, Coordinate, Direction, Event, GameState, SessionStatus, Tile,
};
use twin_elements_system_session::{capture, replay, Interpreter, SessionAction};
use twin_elements_world::{self as world, query, World, WorldConfig};

const MOVES: &str = "DDDDDDWWWWWWLLLLLLIIIIIIAAAAASSSSSJJJJJKKKKKDWDWLILIAJSK";
const MOVEMENT_KEYS: [char; 8] = ['W', 'A', 'S', 'D', 'I', 'J', 'K', 'L'];

/// Drives an interpreter and world the way an adapter would.
fn play(input: &str) -> (Option<World>, Vec<SessionAction>) {
    let mut interpreter = Interpreter::new();
    let mut world: Option<World> = None;
    let mut events: Vec<Event> = Vec::new();
    let mut requests = Vec::new();

    for key in input.chars() {
        let mut actions = Vec::new();
        interpreter.handle(&events, key, &mut actions);
        events.clear();
        for action in actions {
            match action {
                SessionAction::NewGame { seed } => {
                    world = Some(World::generate(seed, WorldConfig::default()));
                }
                SessionAction::Apply(command) => {
                    if let Some(world) = world.as_mut() {
                        world::apply(world, command, &mut events);
                    }
                }
                other => requests.push(other),
            }
        }
    }

    (world, requests)
}

fn fingerprint(world: &World) -> u64 {
    let mut hasher = DefaultHasher::new();
    query::grid(world).hash(&mut hasher);
    query::position(world, ActorKind::Fire).hash(&mut hasher);
    query::position(world, ActorKind::Water).hash(&mut hasher);
    query::status(world).hash(&mut hasher);
    query::total_steps(world).hash(&mut hasher);
    query::armor_duration(world).hash(&mut hasher);
    query::gems_collected(world).hash(&mut hasher);
    query::encounter_steps_left(world).hash(&mut hasher);
    query::encounter_budget(world).hash(&mut hasher);
    query::keystroke_history(world).hash(&mut hasher);
    query::captured_actor(world).hash(&mut hasher);
    hasher.finish()
}

fn press(world: &mut World, key: char) -> Vec<Event> {
    let mut events = Vec::new();
    if let Some((actor, direction)) = ActorKind::from_key(key) {
        world::apply(world, Command::MoveActor { actor, direction }, &mut events);
    }
    events
}

/// Random walks generated dungeons until one of the actors gets captured.
fn walk_into_encounter() -> World {
    for seed in 0..256 {
        let mut world = World::generate(seed, WorldConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..3_000 {
            let key = MOVEMENT_KEYS[rng.gen_range(0..MOVEMENT_KEYS.len())];
            let _ = press(&mut world, key);
            match query::status(&world) {
                SessionStatus::Encounter => return world,
                SessionStatus::Exploring => {}
                SessionStatus::Won | SessionStatus::Lost => break,
            }
        }
    }
    panic!("no generated dungeon led to an encounter");
}

/// Walks the rescuer onto the nearest gem left in the encounter room.
fn collect_nearest_gem(world: &mut World) -> Vec<Event> {
    let rescuer = query::captured_actor(world)
        .expect("encounter running")
        .partner();
    let mut at = query::position(world, rescuer);
    let gem = query::grid(world)
        .iter()
        .filter(|(_, tile)| *tile == Tile::Gem)
        .map(|(cell, _)| cell)
        .min_by_key(|cell| (cell.x() - at.x()).abs() + (cell.y() - at.y()).abs())
        .expect("gem left to collect");

    let mut events = Vec::new();
    while at != gem {
        let direction = if at.x() < gem.x() {
            Direction::East
        } else if at.x() > gem.x() {
            Direction::West
        } else if at.y() < gem.y() {
            Direction::North
        } else {
            Direction::South
        };
        events.extend(press(world, rescuer.key_for(direction)));
        at = at.step(direction);
    }
    events
}

#[test]
fn saved_session_replays_to_identical_state() {
    let input = format!("N42S{}", MOVES.repeat(6));
    let (world, _) = play(&input);
    let world = world.expect("session started");

    let state = capture(&world);
    let restored = replay(&state, WorldConfig::default());

    assert_eq!(fingerprint(&restored), fingerprint(&world));
    assert_eq!(capture(&restored), state);
}

#[test]
fn session_saved_mid_encounter_replays_the_arena() {
    let mut world = walk_into_encounter();
    let rescuer = query::captured_actor(&world)
        .expect("encounter running")
        .partner();
    let _ = press(&mut world, rescuer.key_for(Direction::East));
    assert_eq!(query::status(&world), SessionStatus::Encounter);

    let state = capture(&world);
    let restored = replay(&state, WorldConfig::default());

    assert_eq!(query::status(&restored), SessionStatus::Encounter);
    assert_eq!(query::captured_actor(&restored), query::captured_actor(&world));
    assert_eq!(query::grid(&restored), query::grid(&world));
    assert!(query::grid(&restored).count(Tile::Gem) > 0);
    assert_eq!(fingerprint(&restored), fingerprint(&world));
}

#[test]
fn session_saved_after_clearing_encounter_replays() {
    let mut world = walk_into_encounter();
    let budget = query::encounter_budget(&world);
    let mut events = Vec::new();
    while query::status(&world) == SessionStatus::Encounter {
        events.extend(collect_nearest_gem(&mut world));
    }

    let next_budget = budget - WorldConfig::default().encounter_step_penalty;
    assert_eq!(query::status(&world), SessionStatus::Exploring);
    assert!(events.contains(&Event::EncounterCleared { next_budget }));
    assert_eq!(query::captured_actor(&world), None);

    let state = capture(&world);
    let restored = replay(&state, WorldConfig::default());

    assert_eq!(query::encounter_budget(&restored), next_budget);
    assert_eq!(fingerprint(&restored), fingerprint(&world));
    assert_eq!(capture(&restored), state);
}

#[test]
fn quit_keys_are_not_recorded() {
    let (world, requests) = play("n7sdd:q");
    let world = world.expect("session started");

    assert_eq!(requests, vec![SessionAction::SaveAndQuit]);

    assert_eq!(query::keystroke_history(&world), "DD");
}

#[test]
fn replay_ignores_stored_positions() {
    let (world, _) = play(&format!("N5S{MOVES}"));
    let world = world.expect("session started");
    let mut state = capture(&world);
    state.fire_position = Coordinate::new(1, 1);
    state.water_position = Coordinate::new(2, 2);

    let restored = replay(&state, WorldConfig::default());

    assert_eq!(fingerprint(&restored), fingerprint(&world));
}

#[test]
fn replay_skips_unknown_characters() {
    let clean = GameState {
        seed: 9,
        fire_position: Coordinate::default(),
        water_position: Coordinate::default(),
        keystroke_history: "DDWLLI".to_owned(),
    };
    let noisy = GameState {
        keystroke_history: "D?D W:LxLi".to_owned(),
        ..clean.clone()
    };

    let expected = replay(&clean, WorldConfig::default());
    let restored = replay(&noisy, WorldConfig::default());

    assert_eq!(fingerprint(&restored), fingerprint(&expected));
}

#[test]
fn empty_history_restores_fresh_world() {
    let state = GameState {
        seed: 123,
        fire_position: Coordinate::default(),
        water_position: Coordinate::default(),
        keystroke_history: String::new(),
    };

    let restored = replay(&state, WorldConfig::default());
    let fresh = World::generate(123, WorldConfig::default());

    assert_eq!(fingerprint(&restored), fingerprint(&fresh));
}
