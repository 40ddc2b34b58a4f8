//! Deterministic puzzle simulation
//!
//! All puzzle logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame time only
//! - Seeded RNG only
//! - Stable iteration order (by cell index)
//! - No rendering or platform dependencies

pub mod animator;
pub mod entity;
pub mod lattice;
pub mod selection;
pub mod state;
pub mod tick;

pub use animator::RotationAnimator;
pub use entity::{CubePart, EntityId, VisualEntity, grid_position};
pub use lattice::{Cell, CubeLattice, LatticeError};
pub use selection::{AnimationState, Direction, Facet, Move, Selection};
pub use state::{GamePhase, GameState, Puzzle, format_game_time};
pub use tick::{TickInput, TwistInput, tick};
