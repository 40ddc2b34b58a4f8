//! Session tick
//!
//! Advances the game one frame: input handling, animation, clock and
//! phase transitions.

use glam::Vec2;

use super::selection::{Direction, Selection};
use super::state::{GamePhase, GameState};

/// A twist gesture: what was grabbed and how far it was dragged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwistInput {
    pub selection: Selection,
    /// Screen-space drag (pixels, Y down)
    pub drag: Vec2,
}

impl TwistInput {
    /// Gesture that maps to `direction` under [`Direction::from_drag`]
    pub fn toward(selection: Selection, direction: Direction) -> Self {
        let drag = match direction {
            Direction::Left => Vec2::new(-10.0, 0.0),
            Direction::Right => Vec2::new(10.0, 0.0),
            Direction::Up => Vec2::new(0.0, -10.0),
            Direction::Down => Vec2::new(0.0, 10.0),
        };
        Self { selection, drag }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Twist gesture released this frame
    pub twist: Option<TwistInput>,
    /// Pause toggle
    pub pause: bool,
    /// Scramble key held
    pub scramble: bool,
    /// Quit request
    pub quit: bool,
    /// Answer to a Y/N prompt
    pub answer: Option<bool>,
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                log::debug!("Resumed");
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Running => run(state, input, dt),
        GamePhase::Quit => match input.answer {
            Some(true) => {
                state.phase = GamePhase::Exited;
                log::info!("Quit");
            }
            Some(false) => state.phase = GamePhase::Running,
            None => {}
        },
        GamePhase::Finished => match input.answer {
            Some(true) => state.new_game(),
            Some(false) => {
                state.phase = GamePhase::Exited;
                log::info!("Quit");
            }
            None => {}
        },
        GamePhase::Paused | GamePhase::Exited => {}
    }
}

fn run(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.quit {
        state.phase = GamePhase::Quit;
        return;
    }

    // Scramble key: speed up and keep queueing random moves until released
    if input.scramble {
        if state.resume_speed.is_none() {
            state.resume_speed = Some(state.puzzle.rotation_speed());
            state.puzzle.set_rotation_speed(state.scramble_speed);
            log::debug!("Scrambling");
        }
        let mv = state.random_move();
        state.puzzle.begin(mv.selection, mv.direction);
    } else if let Some(speed) = state.resume_speed.take() {
        state.puzzle.set_rotation_speed(speed);
    }

    if let Some(twist) = input.twist {
        if let Some(direction) = Direction::from_drag(twist.drag) {
            let accepted = state.puzzle.begin(twist.selection, direction);
            if accepted && matches!(twist.selection, Selection::Facet(_)) {
                state.moves += 1;
            }
        }
    }

    state.puzzle.advance(dt);

    if input.scramble {
        return;
    }
    state.game_time += dt.max(0.0);

    if state.puzzle.is_idle() && state.puzzle.is_solved() {
        state.phase = GamePhase::Finished;
        log::info!(
            "Solved in {} with {} moves",
            super::state::format_game_time(state.game_time),
            state.moves
        );
    }
}
