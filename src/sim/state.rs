//! Puzzle and game session state
//!
//! `Puzzle` bundles the lattice, the entity arena and the animator so callers
//! only ever deal with one owner. `GameState` adds the session bookkeeping
//! (phase, move counter, clock, seeded RNG).

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::animator::RotationAnimator;
use super::entity::{CubePart, EntityId, VisualEntity};
use super::lattice::{CubeLattice, LatticeError};
use super::selection::{AnimationState, Direction, Move, Selection};
use crate::Settings;
use crate::consts::{CELL_COUNT, DEFAULT_ROTATION_SPEED, SCRAMBLE_ROTATION_SPEED};

/// The 27 sub-cubes with their arrangement and animation
#[derive(Debug, Clone)]
pub struct Puzzle<E: VisualEntity = CubePart> {
    lattice: CubeLattice,
    entities: Vec<E>,
    animator: RotationAnimator,
}

impl Default for Puzzle<CubePart> {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION_SPEED)
    }
}

impl Puzzle<CubePart> {
    /// Solved cube built from standard parts
    pub fn new(rotation_speed: f32) -> Self {
        Self {
            lattice: CubeLattice::solved(),
            entities: (0..CELL_COUNT).map(CubePart::for_cell).collect(),
            animator: RotationAnimator::new(rotation_speed),
        }
    }
}

impl<E: VisualEntity> Puzzle<E> {
    /// Build from caller-supplied entities; entity `n` is attached to cell `n`
    pub fn from_entities(entities: Vec<E>, rotation_speed: f32) -> Result<Self, LatticeError> {
        if entities.len() != CELL_COUNT {
            return Err(LatticeError::EntityCount {
                expected: CELL_COUNT,
                actual: entities.len(),
            });
        }

        let mut lattice = CubeLattice::new();
        for n in 0..CELL_COUNT {
            lattice.attach(n, EntityId(n as u16))?;
        }
        Ok(Self {
            lattice,
            entities,
            animator: RotationAnimator::new(rotation_speed),
        })
    }

    pub fn lattice(&self) -> &CubeLattice {
        &self.lattice
    }

    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&E> {
        self.entities.get(id.index())
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animator.state()
    }

    pub fn is_idle(&self) -> bool {
        self.animator.is_idle()
    }

    pub fn current_move(&self) -> Option<Move> {
        self.animator.current_move()
    }

    pub fn rotation_speed(&self) -> f32 {
        self.animator.rotation_speed()
    }

    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.animator.set_rotation_speed(speed);
    }

    /// Start a move; ignored while another move is animating
    pub fn begin(&mut self, selection: Selection, direction: Direction) -> bool {
        self.animator.begin(selection, direction)
    }

    /// Per-frame entry point
    pub fn advance(&mut self, dt: f32) -> Option<Move> {
        self.animator.advance(dt, &mut self.lattice, &mut self.entities)
    }

    /// Complete the move in flight immediately
    pub fn finish(&mut self) -> Option<Move> {
        self.animator.finish(&mut self.lattice, &mut self.entities)
    }

    pub fn shuffle<R: rand::Rng>(&mut self, times: u32, rng: &mut R) -> Vec<Move> {
        self.animator.shuffle(times, rng, &mut self.lattice, &mut self.entities)
    }

    pub fn is_solved(&self) -> bool {
        self.lattice.is_solved()
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Accepting moves, clock running
    Running,
    /// Clock stopped, moves ignored
    Paused,
    /// Puzzle solved, waiting for "new game?" answer
    Finished,
    /// Waiting for "quit?" answer
    Quit,
    /// Session over
    Exited,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Player moves this game (whole-cube turns are free)
    pub moves: u32,
    /// Seconds spent solving this game
    pub game_time: f32,
    /// Random moves applied when a game starts
    pub shuffles: u32,
    /// Rotation speed while scrambling
    pub scramble_speed: f32,
    /// Moves applied by the last shuffle, oldest first
    pub shuffle_moves: Vec<Move>,
    pub puzzle: Puzzle,
    /// Speed to restore once scrambling stops
    pub(crate) resume_speed: Option<f32>,
}

impl GameState {
    /// Create a session and shuffle the puzzle for the first game
    pub fn new(seed: u64, shuffles: u32) -> Self {
        Self::with_puzzle(seed, shuffles, SCRAMBLE_ROTATION_SPEED, Puzzle::default())
    }

    pub fn from_settings(settings: &Settings, seed: u64) -> Self {
        Self::with_puzzle(
            seed,
            settings.shuffles,
            settings.scramble_speed,
            Puzzle::new(settings.rotation_speed),
        )
    }

    fn with_puzzle(seed: u64, shuffles: u32, scramble_speed: f32, puzzle: Puzzle) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            moves: 0,
            game_time: 0.0,
            shuffles,
            scramble_speed,
            shuffle_moves: Vec::new(),
            puzzle,
            resume_speed: None,
        };
        state.new_game();
        state
    }

    /// Reshuffle and reset the clock and move counter
    pub fn new_game(&mut self) {
        self.shuffle_moves = self.puzzle.shuffle(self.shuffles, &mut self.rng);
        self.moves = 0;
        self.game_time = 0.0;
        self.phase = GamePhase::Running;
        log::info!("New game ({} shuffles, seed {})", self.shuffles, self.seed);
    }

    /// Random single-facet move from the session RNG
    pub fn random_move(&mut self) -> Move {
        Move::random(&mut self.rng)
    }

    pub fn time_label(&self) -> String {
        format!("Time: {}", format_game_time(self.game_time))
    }

    pub fn moves_label(&self) -> String {
        format!("Moves: {}", self.moves)
    }

    /// Prompt shown for the current phase, if any
    pub fn prompt(&self) -> Option<&'static str> {
        match self.phase {
            GamePhase::Finished => Some("Done! New game? Y/N"),
            GamePhase::Paused => Some("Paused"),
            GamePhase::Quit => Some("Quit? Y/N"),
            GamePhase::Running | GamePhase::Exited => None,
        }
    }
}

/// Format seconds as `HH:MM:SS`
pub fn format_game_time(seconds: f32) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, total / 60 % 60, total % 60)
}
