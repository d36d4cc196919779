/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Dice each side draws for a contest (before tie-breaks).
    pub dice_per_roll: u8,
    /// Rows at each edge a player may place units on.
    pub back_rows: u8,
    /// Own turns a unit stays hidden after entering stealth.
    pub stealth_duration: u8,
    /// Chebyshev radius searched by `SearchStealth`.
    pub search_radius: u32,
    /// Minimum d6 face that uncovers a hidden unit.
    pub search_threshold: u8,
    /// Cap on tie-break rounds for basic and area attacks. `None` = unlimited.
    pub max_tie_break_rounds: Option<u32>,
    /// Cap on tie-break rounds for a warden's shove; the defender holds after it.
    pub shove_tie_break_rounds: u32,
    /// Distance at which a sentinel reacts to a revealed enemy.
    pub watch_radius: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Side length of the square board.
    pub const BOARD_SIZE: i32 = 9;
    /// Units each player fields.
    pub const UNITS_PER_SIDE: usize = 7;
    /// Units on the board at most.
    pub const MAX_UNITS: usize = 2 * Self::UNITS_PER_SIDE;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DICE_PER_ROLL: u8 = 2;
    pub const DEFAULT_BACK_ROWS: u8 = 2;
    pub const DEFAULT_STEALTH_DURATION: u8 = 3;
    pub const DEFAULT_SEARCH_RADIUS: u32 = 2;
    pub const DEFAULT_SEARCH_THRESHOLD: u8 = 5;
    pub const DEFAULT_SHOVE_TIE_BREAK_ROUNDS: u32 = 1;
    pub const DEFAULT_WATCH_RADIUS: u32 = 2;

    pub fn new() -> Self {
        Self {
            dice_per_roll: Self::DEFAULT_DICE_PER_ROLL,
            back_rows: Self::DEFAULT_BACK_ROWS,
            stealth_duration: Self::DEFAULT_STEALTH_DURATION,
            search_radius: Self::DEFAULT_SEARCH_RADIUS,
            search_threshold: Self::DEFAULT_SEARCH_THRESHOLD,
            max_tie_break_rounds: None,
            shove_tie_break_rounds: Self::DEFAULT_SHOVE_TIE_BREAK_ROUNDS,
            watch_radius: Self::DEFAULT_WATCH_RADIUS,
        }
    }

    #[must_use]
    pub fn with_tie_break_cap(mut self, cap: Option<u32>) -> Self {
        self.max_tie_break_rounds = cap;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
