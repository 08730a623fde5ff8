use std::time::Duration;

/// Side length of the square grid when none is given.
pub const DEFAULT_BOARD_SIZE: usize = 10;

/// Longest ship a setup may declare. Public board views count remaining ships
/// for every length in `1..=MAX_SHIP_LENGTH`.
pub const MAX_SHIP_LENGTH: usize = 5;

/// Ship lengths used when a fleet is generated instead of read from a setup.
pub const STANDARD_FLEET: [usize; 5] = [5, 4, 3, 3, 2];

/// Upper bound on a single protocol line read from an agent (1 MiB).
pub const MAX_LINE_LENGTH: usize = 1 << 20;

/// Number of random attempts made per ship before giving up on placement.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Settings shared by both seats of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of each player's board.
    pub board_size: usize,
    /// Limit on every blocking read from an agent. `None` waits forever.
    pub read_timeout: Option<Duration>,
    /// Fixed seed for the setup-order shuffle, for reproducible games.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            read_timeout: None,
            seed: None,
        }
    }
}
