//! Room placement and corridor carving into the occupancy mask.

use tracing::debug;

use crate::error::ConfigError;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    pub center: Pos,
    pub radius: i32,
}

impl Room {
    pub fn contains(&self, pos: Pos) -> bool {
        self.center.chebyshev(pos) <= self.radius.unsigned_abs()
    }

    pub fn top_left(&self) -> Pos {
        Pos { y: self.center.y - self.radius, x: self.center.x - self.radius }
    }

    pub fn bottom_right(&self) -> Pos {
        Pos { y: self.center.y + self.radius, x: self.center.x + self.radius }
    }
}

/// Draws `num_rooms` centres and stamps each square footprint into `mask`.
///
/// Centres are drawn from `[radius, extent - radius)` on each axis and returned in draw order.
/// Rooms may overlap; overlapping footprints merge. An empty draw range is an error.
pub fn place_rooms(
    mask: &mut Grid<bool>,
    num_rooms: usize,
    room_radius: usize,
    rng: &mut impl RandomSource,
) -> Result<Vec<Room>, ConfigError> {
    let (width, height) = mask.dimensions();
    if room_radius == 0 {
        return Err(ConfigError::ZeroRoomRadius);
    }
    if room_radius * 2 >= width || room_radius * 2 >= height {
        return Err(ConfigError::RoomRadiusTooLarge { room_radius, width, height });
    }

    let radius = room_radius as i32;
    let mut rooms = Vec::with_capacity(num_rooms);
    for _ in 0..num_rooms {
        let x = rng.range_i32(radius, width as i32 - radius);
        let y = rng.range_i32(radius, height as i32 - radius);
        let room = Room { center: Pos { y, x }, radius };
        carve_room(mask, &room);
        rooms.push(room);
    }
    debug!(rooms = rooms.len(), room_radius, "mapgen.rooms.placed");
    Ok(rooms)
}

pub fn carve_room(mask: &mut Grid<bool>, room: &Room) {
    mask.fill_rect(room.top_left(), room.bottom_right(), true);
}

/// Links each room to the next one in generation order with an L-shaped corridor.
///
/// `corridor_width` cells are added on both sides of each run's centre line.
/// Only consecutive pairs are joined, so the rooms form a single chain.
pub fn connect_rooms(mask: &mut Grid<bool>, rooms: &[Room], corridor_width: usize) {
    let thickness = corridor_width as i32;
    for pair in rooms.windows(2) {
        carve_l_shaped_corridor(mask, pair[0].center, pair[1].center, thickness);
    }
    debug!(corridors = rooms.len().saturating_sub(1), corridor_width, "mapgen.corridors.carved");
}

fn carve_l_shaped_corridor(mask: &mut Grid<bool>, start: Pos, end: Pos, thickness: i32) {
    carve_horizontal_run(mask, start.y, start.x, end.x, thickness);
    carve_vertical_run(mask, end.x, start.y, end.y, thickness);
}

fn carve_horizontal_run(mask: &mut Grid<bool>, y: i32, from_x: i32, to_x: i32, thickness: i32) {
    mask.fill_rect(
        Pos { y: y - thickness, x: from_x.min(to_x) },
        Pos { y: y + thickness, x: from_x.max(to_x) },
        true,
    );
}

fn carve_vertical_run(mask: &mut Grid<bool>, x: i32, from_y: i32, to_y: i32, thickness: i32) {
    mask.fill_rect(
        Pos { y: from_y.min(to_y), x: x - thickness },
        Pos { y: from_y.max(to_y), x: x + thickness },
        true,
    );
}
