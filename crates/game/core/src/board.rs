//! Board geometry: movement shapes, attack reach, and reading order.
//!
//! Everything here is a pure function of a position, a shape, and the
//! occupancy of the board. Results are always returned in reading order so
//! option lists and target lists are reproducible.

use std::collections::{BTreeSet, VecDeque};

use arrayvec::ArrayVec;

use crate::env::{AttackReach, MovementShape};
use crate::state::{GameState, Position, UnitId};

pub const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

pub const KING: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KNIGHT: [(i32, i32); 8] = [
    (-1, -2),
    (1, -2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, 2),
    (1, 2),
];

/// On-board cells reached by applying each offset once.
pub fn neighbors(origin: Position, offsets: &[(i32, i32); 8]) -> ArrayVec<Position, 8> {
    offsets
        .iter()
        .map(|&(dx, dy)| origin.offset(dx, dy))
        .filter(|cell| cell.is_on_board())
        .collect()
}

fn orthogonal_neighbors(origin: Position) -> ArrayVec<Position, 4> {
    ORTHOGONAL
        .iter()
        .map(|&(dx, dy)| origin.offset(dx, dy))
        .filter(|cell| cell.is_on_board())
        .collect()
}

/// Empty cells a unit standing on `origin` may move to.
pub fn move_options(state: &GameState, origin: Position, shape: MovementShape) -> Vec<Position> {
    let mut cells: BTreeSet<(i32, i32)> = BTreeSet::new();
    let free = |cell: Position| cell.is_on_board() && !state.is_occupied(cell);

    match shape {
        MovementShape::Step { radius, diagonal } => {
            let mut frontier = VecDeque::from([(origin, 0u32)]);
            let mut seen = BTreeSet::from([origin.reading_key()]);
            while let Some((cell, depth)) = frontier.pop_front() {
                if depth == radius {
                    continue;
                }
                let next: ArrayVec<Position, 8> = if diagonal {
                    neighbors(cell, &KING)
                } else {
                    orthogonal_neighbors(cell).into_iter().collect()
                };
                for step in next {
                    if !free(step) || !seen.insert(step.reading_key()) {
                        continue;
                    }
                    cells.insert(step.reading_key());
                    frontier.push_back((step, depth + 1));
                }
            }
        }
        MovementShape::Slide { max } => {
            for (dx, dy) in ORTHOGONAL {
                let mut cell = origin;
                for _ in 0..max {
                    cell = cell.offset(dx, dy);
                    if !free(cell) {
                        break;
                    }
                    cells.insert(cell.reading_key());
                }
            }
        }
        MovementShape::Leap => {
            for cell in neighbors(origin, &KNIGHT) {
                if free(cell) {
                    cells.insert(cell.reading_key());
                }
            }
        }
        MovementShape::Teleport { radius } => {
            let r = radius as i32;
            for dy in -r..=r {
                for dx in -r..=r {
                    let cell = origin.offset(dx, dy);
                    if cell != origin && free(cell) {
                        cells.insert(cell.reading_key());
                    }
                }
            }
        }
    }

    cells.into_iter().map(|(y, x)| Position::new(x, y)).collect()
}

/// Unit step from `from` towards `to` if both lie on one straight line.
///
/// Returns the direction and the distance in cells.
pub fn straight_line(from: Position, to: Position) -> Option<((i32, i32), u32)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if (dx, dy) == (0, 0) {
        return None;
    }
    if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
        return None;
    }
    Some(((dx.signum(), dy.signum()), from.distance(to)))
}

/// Cells strictly between two points on a straight line.
pub fn cells_between(from: Position, to: Position) -> Vec<Position> {
    let Some(((dx, dy), length)) = straight_line(from, to) else {
        return Vec::new();
    };
    (1..length as i32)
        .map(|step| from.offset(dx * step, dy * step))
        .collect()
}

/// Whether an attacker on `from` can hit a unit on `to`.
pub fn in_reach(state: &GameState, from: Position, to: Position, reach: AttackReach) -> bool {
    match reach {
        AttackReach::Adjacent => from != to && from.distance(to) == 1,
        AttackReach::Line {
            max,
            diagonal,
            clear_path,
        } => {
            let Some(((dx, dy), length)) = straight_line(from, to) else {
                return false;
            };
            if length > max || (!diagonal && dx != 0 && dy != 0) {
                return false;
            }
            !clear_path
                || cells_between(from, to)
                    .into_iter()
                    .all(|cell| !state.is_occupied(cell))
        }
    }
}

/// One straight charge: landing cell plus every unit jumped over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChargeLane {
    pub destination: Position,
    pub crossed: Vec<UnitId>,
}

/// Orthogonal charges of `min..=max` cells ending on an empty cell.
pub fn charge_lanes(state: &GameState, origin: Position, min: u32, max: u32) -> Vec<ChargeLane> {
    let mut lanes = Vec::new();
    for (dx, dy) in ORTHOGONAL {
        for distance in min..=max {
            let d = distance as i32;
            let destination = origin.offset(dx * d, dy * d);
            if !destination.is_on_board() {
                break;
            }
            if state.is_occupied(destination) {
                continue;
            }
            let crossed = cells_between(origin, destination)
                .into_iter()
                .filter_map(|cell| state.unit_at(cell).map(|unit| unit.id))
                .collect();
            lanes.push(ChargeLane {
                destination,
                crossed,
            });
        }
    }
    lanes.sort_by_key(|lane| lane.destination.reading_key());
    lanes
}

/// Sorts units by board reading order (row, column), then id.
///
/// Units without a position sort last.
pub fn sort_reading_order(state: &GameState, units: &mut [UnitId]) {
    units.sort_by_key(|id| {
        let key = state
            .unit(*id)
            .and_then(|unit| unit.position)
            .map(|position| position.reading_key())
            .unwrap_or((i32::MAX, i32::MAX));
        (key, *id)
    });
}

/// Living units within Chebyshev `radius` of `center`, in reading order.
pub fn units_within(state: &GameState, center: Position, radius: u32) -> Vec<UnitId> {
    let mut ids: Vec<UnitId> = state
        .units
        .values()
        .filter(|unit| unit.alive)
        .filter(|unit| {
            unit.position
                .is_some_and(|position| position.distance(center) <= radius)
        })
        .map(|unit| unit.id)
        .collect();
    sort_reading_order(state, &mut ids);
    ids
}
