use std::fmt;

use crate::config::GameConfig;

/// Unique identifier for a unit tracked in the state.
///
/// Units reference each other only through ids, never through borrowed
/// references, so relations such as "sheltered by" survive wholesale
/// replacement of either unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two seats at the table.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Returns the other seat.
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Rows this player may place units on during placement.
    ///
    /// Player One deploys on the low rows, Player Two on the high rows.
    pub fn deployment_rows(self, back_rows: u8) -> std::ops::RangeInclusive<i32> {
        let depth = i32::from(back_rows.max(1));
        match self {
            Player::One => 0..=depth - 1,
            Player::Two => GameConfig::BOARD_SIZE - depth..=GameConfig::BOARD_SIZE - 1,
        }
    }
}

/// Discrete grid position expressed in cell coordinates.
///
/// `y` is the row and `x` the column; row 0 is Player One's back row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true if the position lies on the 9×9 board.
    pub const fn is_on_board(self) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < GameConfig::BOARD_SIZE
            && self.y < GameConfig::BOARD_SIZE
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev (king-move) distance.
    pub fn distance(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// Key used for reading-order sorting (row, then column).
    pub const fn reading_key(self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identifier handed out for every requested roll.
///
/// A resolve call must echo the id of the roll it answers, which makes stale
/// or duplicated resolve submissions detectable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollId(pub u64);

impl fmt::Display for RollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "roll-{}", self.0)
    }
}
