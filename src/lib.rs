//! Powder Run - an endless downhill skiing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (skier state machine, obstacle field,
//!   collisions, jump sequencing, scoring)
//! - `highscores`: All-time high score persistence behind a key-value seam
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::ScoreStore;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Divisor applied to the skier's speed on diagonal headings
    pub const DIAGONAL_DIVISOR: f32 = 1.4142;

    /// Number of airborne sprite frames in a jump
    pub const JUMP_FRAME_COUNT: u8 = 5;

    /// Initial obstacle density multiplier range (inclusive)
    pub const INITIAL_DENSITY_LOW: u32 = 5;
    pub const INITIAL_DENSITY_HIGH: u32 = 7;

    /// Clearance kept between the skier's starting row and the nearest
    /// initial obstacle
    pub const INITIAL_ROW_CLEARANCE: f32 = 16.0;

    /// Upper bound on rejection-sampling attempts for one placement
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;
}
