//! Grid carving: hallways, room stamping and wall cleanup.

use twin_elements_core::{Coordinate, Grid, Room, Tile};

/// Connects the centers of consecutive rooms with L-shaped hallways.
pub(crate) fn carve_hallways(grid: &mut Grid, rooms: &[Room]) {
    for pair in rooms.windows(2) {
        if let [source, destination] = pair {
            carve_hallway(grid, source.center(), destination.center());
        }
    }
}

/// Horizontal leg along the destination row, then vertical leg along the
/// source column.
fn carve_hallway(grid: &mut Grid, source: Coordinate, destination: Coordinate) {
    let (left, right) = ordered(source.x(), destination.x());
    for x in left..=right {
        carve_fragment(grid, Coordinate::new(x, destination.y()), (0, 1));
    }

    let (bottom, top) = ordered(source.y(), destination.y());
    for y in bottom..=top {
        carve_fragment(grid, Coordinate::new(source.x(), y), (1, 0));
    }
}

/// Writes one walkable hallway cell and walls it in along `flank`.
///
/// Cells outside the playable interior are never written.
fn carve_fragment(grid: &mut Grid, cell: Coordinate, flank: (i32, i32)) {
    if !grid.is_interior(cell) {
        return;
    }
    grid.set(cell, Tile::Floor);

    let (dx, dy) = flank;
    for side in [cell.shift(dx, dy), cell.shift(-dx, -dy)] {
        if grid.is_interior(side) {
            grid.set(side, Tile::Wall);
        }
    }
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Stamps a room onto the grid.
///
/// The room's edge becomes wall only where the grid is still uncarved, so
/// hallways crossing the edge stay open. Interior cells take `floor` unless
/// listed in `specials`, whose tile wins.
pub fn stamp_room(grid: &mut Grid, room: &Room, floor: Tile, specials: &[(Coordinate, Tile)]) {
    for cell in room.cells() {
        if room.is_on_edge(cell) {
            if grid.is(cell, Tile::Nothing) {
                grid.set(cell, Tile::Wall);
            }
            continue;
        }

        if !grid.is_interior(cell) {
            continue;
        }
        let tile = specials
            .iter()
            .find(|(special, _)| *special == cell)
            .map_or(floor, |(_, tile)| *tile);
        grid.set(cell, tile);
    }
}

/// Opens walls that separate two plain floor cells on opposite sides.
///
/// Sweeps repeat until one changes nothing, so afterwards no wall has floor
/// on both its east and west sides or on both its north and south sides.
pub(crate) fn unblock(grid: &mut Grid) {
    loop {
        let mut opened = 0_usize;
        for x in 1..grid.max_x() {
            for y in 1..grid.max_y() {
                let cell = Coordinate::new(x, y);
                if grid.is(cell, Tile::Wall) && separates_floor(grid, cell) {
                    grid.set(cell, Tile::Floor);
                    opened += 1;
                }
            }
        }
        if opened == 0 {
            break;
        }
    }
}

fn separates_floor(grid: &Grid, cell: Coordinate) -> bool {
    let floor = |dx: i32, dy: i32| grid.is(cell.shift(dx, dy), Tile::Floor);
    (floor(1, 0) && floor(-1, 0)) || (floor(0, 1) && floor(0, -1))
}
