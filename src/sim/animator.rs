//! Rotation animation
//!
//! A single move is animated at a time. `begin` captures the move, each
//! `advance` turns the affected entities a little further, and the quarter
//! turn is committed to the lattice exactly once when the angle reaches 90°.

use rand::Rng;

use super::entity::VisualEntity;
use super::lattice::CubeLattice;
use super::selection::{AnimationState, Direction, Move, Selection};
use crate::consts::{
    ANGLE_SNAP_EPSILON, DEFAULT_ROTATION_SPEED, MIN_ROTATION_SPEED, QUARTER_TURN,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Turning {
        mv: Move,
        /// Speed captured when the move began (degrees/second)
        speed: f32,
        /// Accumulated angle, 0..=90
        angle: f32,
    },
}

/// Floor finite speeds at the minimum; non-finite speeds fall back to the default
fn clamp_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.max(MIN_ROTATION_SPEED)
    } else {
        DEFAULT_ROTATION_SPEED
    }
}

/// Single-move animation state machine
#[derive(Debug, Clone, PartialEq)]
pub struct RotationAnimator {
    phase: Phase,
    rotation_speed: f32,
}

impl Default for RotationAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION_SPEED)
    }
}

impl RotationAnimator {
    pub fn new(rotation_speed: f32) -> Self {
        Self {
            phase: Phase::Idle,
            rotation_speed: clamp_speed(rotation_speed),
        }
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Set the speed used by the next move (a move in flight keeps its own)
    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.rotation_speed = clamp_speed(speed);
    }

    pub fn state(&self) -> AnimationState {
        match self.phase {
            Phase::Idle => AnimationState::Idle,
            Phase::Turning { mv, .. } => mv.direction.into(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Move currently in flight
    pub fn current_move(&self) -> Option<Move> {
        match self.phase {
            Phase::Idle => None,
            Phase::Turning { mv, .. } => Some(mv),
        }
    }

    /// Angle turned so far by the move in flight (0 when idle)
    pub fn angle(&self) -> f32 {
        match self.phase {
            Phase::Idle => 0.0,
            Phase::Turning { angle, .. } => angle,
        }
    }

    /// Start a move. Returns false (and changes nothing) while another move
    /// is still in flight.
    pub fn begin(&mut self, selection: Selection, direction: Direction) -> bool {
        if !self.is_idle() {
            return false;
        }

        let mv = Move::new(selection, direction);
        log::debug!("Begin {:?} {:?}", mv.direction, mv.selection);
        self.phase = Phase::Turning {
            mv,
            speed: self.rotation_speed,
            angle: 0.0,
        };
        true
    }

    /// Advance the move in flight by `dt` seconds.
    ///
    /// Returns the move if this call committed it to the lattice.
    pub fn advance<E: VisualEntity>(
        &mut self,
        dt: f32,
        lattice: &mut CubeLattice,
        entities: &mut [E],
    ) -> Option<Move> {
        let Phase::Turning { mv, speed, angle } = self.phase else {
            return None;
        };

        let remaining = QUARTER_TURN - angle;
        let travel = (speed * dt).max(0.0);
        let finished = travel >= remaining - ANGLE_SNAP_EPSILON;
        let step = if finished { remaining } else { travel };

        if step > 0.0 {
            let axis = mv.direction.axis();
            let signed = step * mv.direction.sign();
            for facet in mv.selection.facets() {
                for id in lattice.layer_entities(facet, mv.direction) {
                    if let Some(entity) = entities.get_mut(id.index()) {
                        entity.apply_incremental_rotation(axis, signed);
                    }
                }
            }
        }

        if !finished {
            self.phase = Phase::Turning {
                mv,
                speed,
                angle: angle + step,
            };
            return None;
        }

        // Whole-cube moves commit each layer as its own permutation
        for facet in mv.selection.facets() {
            lattice.rotate_facet(facet, mv.direction);
        }
        self.phase = Phase::Idle;
        log::debug!("Committed {:?} {:?}", mv.direction, mv.selection);
        Some(mv)
    }

    /// Drive the move in flight (if any) straight to completion
    pub fn finish<E: VisualEntity>(
        &mut self,
        lattice: &mut CubeLattice,
        entities: &mut [E],
    ) -> Option<Move> {
        self.advance(f32::INFINITY, lattice, entities)
    }

    /// Apply `times` random facet moves, each completed in a single step.
    ///
    /// Not guaranteed to leave the puzzle unsolved; a random walk can land
    /// back on the solution.
    pub fn shuffle<E: VisualEntity, R: Rng>(
        &mut self,
        times: u32,
        rng: &mut R,
        lattice: &mut CubeLattice,
        entities: &mut [E],
    ) -> Vec<Move> {
        self.finish(lattice, entities);

        let step = QUARTER_TURN / self.rotation_speed;
        let mut moves = Vec::with_capacity(times as usize);
        for _ in 0..times {
            let mv = Move::random(rng);
            self.begin(mv.selection, mv.direction);
            if let Some(mv) = self.advance(step, lattice, entities) {
                moves.push(mv);
            }
        }
        log::debug!("Shuffled {} moves", moves.len());
        moves
    }
}
