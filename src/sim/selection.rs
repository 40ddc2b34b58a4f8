//! Move vocabulary: directions, facet selections and drag mapping
//!
//! A move is a facet (or the whole cube) plus one of four directions.
//! LEFT/RIGHT turn the layer sharing a column (Y fixed), UP/DOWN turn
//! the layer sharing a row (X fixed).

use glam::{Vec2, Vec3};
use rand::Rng;

use super::lattice::LatticeError;
use crate::consts::{CUBE_SIZE, DRAG_THRESHOLD};

/// Rotation direction of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions, in the order used for random picks
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The direction that undoes this one on the same layer
    pub fn inverse(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// True for LEFT/RIGHT, which pivot on a column
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Axis the affected layer turns around
    pub fn axis(self) -> Vec3 {
        if self.is_horizontal() { Vec3::Y } else { Vec3::X }
    }

    /// Sign applied to the visual angle (RIGHT/DOWN run backwards)
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left | Direction::Up => 1.0,
            Direction::Right | Direction::Down => -1.0,
        }
    }

    /// Map a screen-space drag to a direction.
    ///
    /// Horizontal dominance picks LEFT/RIGHT, otherwise UP/DOWN. Screen Y grows
    /// downward, so a positive `dy` is DOWN. Drags shorter than
    /// [`DRAG_THRESHOLD`] are ignored.
    pub fn from_drag(drag: Vec2) -> Option<Self> {
        if drag.length() < DRAG_THRESHOLD {
            return None;
        }

        let dir = if drag.x.abs() > drag.y.abs() {
            if drag.x > 0.0 { Direction::Right } else { Direction::Left }
        } else if drag.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(dir)
    }
}

/// Animation state exposed to the outside world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Left,
    Right,
    Up,
    Down,
}

impl From<Direction> for AnimationState {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Left => AnimationState::Left,
            Direction::Right => AnimationState::Right,
            Direction::Up => AnimationState::Up,
            Direction::Down => AnimationState::Down,
        }
    }
}

/// A validated `(row, column)` pair addressing one facet per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Facet {
    row: u8,
    column: u8,
}

impl Facet {
    pub fn new(row: usize, column: usize) -> Result<Self, LatticeError> {
        if row >= CUBE_SIZE || column >= CUBE_SIZE {
            return Err(LatticeError::FacetOutOfRange { row, column });
        }
        Ok(Self {
            row: row as u8,
            column: column as u8,
        })
    }

    /// Facet `(n, n)`, used to address layer `n` on either axis
    pub(crate) fn diagonal(n: usize) -> Self {
        debug_assert!(n < CUBE_SIZE);
        Self {
            row: n as u8,
            column: n as u8,
        }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn column(self) -> usize {
        self.column as usize
    }

    /// Layer index the direction pivots on
    pub fn layer(self, direction: Direction) -> usize {
        if direction.is_horizontal() {
            self.column()
        } else {
            self.row()
        }
    }
}

/// What a move acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    /// A single layer
    Facet(Facet),
    /// Every layer along the move's axis (rigid rotation)
    WholeCube,
}

impl Selection {
    /// Validated single-facet selection
    pub fn facet(row: usize, column: usize) -> Result<Self, LatticeError> {
        Facet::new(row, column).map(Selection::Facet)
    }

    /// Facets turned by this selection; three independent layers for the whole cube
    pub fn facets(self) -> impl Iterator<Item = Facet> {
        let (single, layers) = match self {
            Selection::Facet(facet) => (Some(facet), 0..0),
            Selection::WholeCube => (None, 0..CUBE_SIZE),
        };
        single.into_iter().chain(layers.map(Facet::diagonal))
    }
}

/// A selection plus direction, captured when a move begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub selection: Selection,
    pub direction: Direction,
}

impl Move {
    pub fn new(selection: Selection, direction: Direction) -> Self {
        Self {
            selection,
            direction,
        }
    }

    /// Uniformly random single-facet move
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let facet = Facet {
            row: rng.random_range(0..CUBE_SIZE) as u8,
            column: rng.random_range(0..CUBE_SIZE) as u8,
        };
        let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        Self::new(Selection::Facet(facet), direction)
    }

    /// The move that undoes this one
    pub fn inverse(self) -> Self {
        Self {
            selection: self.selection,
            direction: self.direction.inverse(),
        }
    }

    /// Number of lattice layers this move commits
    pub fn layer_count(self) -> usize {
        match self.selection {
            Selection::Facet(_) => 1,
            Selection::WholeCube => CUBE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_bounds() {
        assert!(Facet::new(2, 2).is_ok());
        assert_eq!(
            Facet::new(3, 0),
            Err(LatticeError::FacetOutOfRange { row: 3, column: 0 })
        );
        assert!(Selection::facet(0, 5).is_err());
    }

    #[test]
    fn test_layer_pivot() {
        let facet = Facet::new(0, 2).unwrap();
        assert_eq!(facet.layer(Direction::Left), 2);
        assert_eq!(facet.layer(Direction::Right), 2);
        assert_eq!(facet.layer(Direction::Up), 0);
        assert_eq!(facet.layer(Direction::Down), 0);
    }

    #[test]
    fn test_from_drag() {
        assert_eq!(Direction::from_drag(Vec2::new(5.0, 1.0)), Some(Direction::Right));
        assert_eq!(Direction::from_drag(Vec2::new(-5.0, 1.0)), Some(Direction::Left));
        assert_eq!(Direction::from_drag(Vec2::new(1.0, 5.0)), Some(Direction::Down));
        assert_eq!(Direction::from_drag(Vec2::new(1.0, -5.0)), Some(Direction::Up));
        // Ties go vertical
        assert_eq!(Direction::from_drag(Vec2::new(3.0, 3.0)), Some(Direction::Down));
        // Too short
        assert_eq!(Direction::from_drag(Vec2::new(1.0, 0.5)), None);
    }

    #[test]
    fn test_whole_cube_facets() {
        let facets: Vec<Facet> = Selection::WholeCube.facets().collect();
        assert_eq!(facets.len(), 3);
        for (n, facet) in facets.iter().enumerate() {
            assert_eq!(facet.layer(Direction::Left), n);
            assert_eq!(facet.layer(Direction::Up), n);
        }
        assert_eq!(Move::new(Selection::WholeCube, Direction::Up).layer_count(), 3);

        let single = Facet::new(2, 1).unwrap();
        let facets: Vec<Facet> = Selection::Facet(single).facets().collect();
        assert_eq!(facets, vec![single]);
    }

    #[test]
    fn test_inverse() {
        for dir in Direction::ALL {
            assert_eq!(dir.inverse().inverse(), dir);
            assert_eq!(dir.sign(), -dir.inverse().sign());
            assert_eq!(dir.axis(), dir.inverse().axis());
        }
    }
}
