//! Rubik - a 3x3x3 twisty puzzle simulation
//!
//! Core modules:
//! - `sim`: Puzzle state machine (lattice permutation, rotation animation, game session)
//! - `settings`: Persisted tuning and preferences

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Puzzle configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Cells along one edge of the cube
    pub const CUBE_SIZE: usize = 3;
    /// Total number of sub-cubes
    pub const CELL_COUNT: usize = CUBE_SIZE * CUBE_SIZE * CUBE_SIZE;

    /// Angle of one committed move (degrees)
    pub const QUARTER_TURN: f32 = 90.0;
    /// Default rotation speed (degrees/second)
    pub const DEFAULT_ROTATION_SPEED: f32 = 300.0;
    /// Slowest accepted rotation speed (degrees/second)
    pub const MIN_ROTATION_SPEED: f32 = 1.0;
    /// A move within this many degrees of completion snaps to the quarter turn
    pub const ANGLE_SNAP_EPSILON: f32 = 1e-4;
    /// Rotation speed while scrambling (degrees/second)
    pub const SCRAMBLE_ROTATION_SPEED: f32 = 500.0;
    /// Default number of shuffle moves for a new game
    pub const DEFAULT_SHUFFLES: u32 = 20;

    /// Shortest drag (pixels) that counts as a twist gesture
    pub const DRAG_THRESHOLD: f32 = 1.5;
    /// Scale applied to each sub-cube so gaps show between them
    pub const PART_SCALE: f32 = 0.5;
}

/// Flat index of cell `(i, j, k)`
#[inline]
pub const fn flat_index(i: usize, j: usize, k: usize) -> usize {
    i * 9 + j * 3 + k
}

/// Grid coordinates `(i, j, k)` of a flat cell index
#[inline]
pub const fn cell_coords(index: usize) -> (usize, usize, usize) {
    (index / 9, index % 9 / 3, index % 3)
}
