//! Rejection sampling of non-touching rooms.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use twin_elements_core::{Coordinate, Room};

use crate::draw_below;

const ROOM_COUNT_DRAW: usize = 20;
const MIN_ROOM_COUNT: usize = 15;
const ROOM_WIDTH_DRAW: i32 = 20;
const ROOM_HEIGHT_DRAW: i32 = 15;
const MIN_ROOM_DIMENSION: i32 = 5;

/// Draws rooms until the target count has been accepted.
///
/// A candidate that overlaps or touches an accepted room is discarded
/// without consuming the count, so accepted rooms always keep at least one
/// tile of rock between them.
pub(crate) fn place_rooms(rng: &mut ChaCha8Rng, max_x: i32, max_y: i32) -> Vec<Room> {
    let target = rng.gen_range(0..ROOM_COUNT_DRAW).max(MIN_ROOM_COUNT);
    let mut rooms: Vec<Room> = Vec::with_capacity(target);

    while rooms.len() < target {
        let width = normalize_dimension(rng.gen_range(0..ROOM_WIDTH_DRAW));
        let height = normalize_dimension(rng.gen_range(0..ROOM_HEIGHT_DRAW));
        let bottom_left = Coordinate::new(
            draw_below(rng, max_x - width - 1),
            draw_below(rng, max_y - height - 1),
        );
        let candidate = Room::new(bottom_left, width, height);

        if rooms.iter().any(|room| room.overlaps(&candidate)) {
            continue;
        }
        rooms.push(candidate);
    }

    rooms
}

/// Raises a drawn dimension to the minimum and makes it odd so the room has
/// a single center cell.
fn normalize_dimension(drawn: i32) -> i32 {
    let floored = drawn.max(MIN_ROOM_DIMENSION);
    if floored % 2 == 0 {
        floored + 1
    } else {
        floored
    }
}
