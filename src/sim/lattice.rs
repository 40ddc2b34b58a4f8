//! The 3x3x3 cell lattice
//!
//! Cells are addressed by `(i, j, k)` or by flat index `i*9 + j*3 + k`.
//! Each cell holds a handle to a visual entity and the identity (original
//! flat index) of the sub-cube it currently contains. Facet rotations only
//! reorder cells; the visual transform is the animator's job.

use thiserror::Error;

use super::entity::EntityId;
use super::selection::{Direction, Facet};
use crate::consts::{CELL_COUNT, CUBE_SIZE};
use crate::flat_index;

/// Precondition failures when building or addressing the lattice
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LatticeError {
    #[error("cell id {0} is out of range (expected 0..27)")]
    CellOutOfRange(usize),
    #[error("cell {0} already has an entity attached")]
    CellAlreadyAttached(usize),
    #[error("facet ({row}, {column}) is out of range")]
    FacetOutOfRange { row: usize, column: usize },
    #[error("expected {expected} entities, got {actual}")]
    EntityCount { expected: usize, actual: usize },
}

/// Contents of one lattice slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Original flat index of the sub-cube, never reassigned
    pub identity: u8,
    /// Visual entity drawn for this sub-cube
    pub entity: EntityId,
}

type Cells = [Option<Cell>; CELL_COUNT];

/// Boundary rings of a layer in layer-local `(u, v)` coordinates: corners
/// first, then edges. Each ring is listed in LEFT/DOWN cycle order.
const RINGS: [[(usize, usize); 4]; 2] = [
    [(0, 0), (2, 0), (2, 2), (0, 2)],
    [(1, 0), (2, 1), (1, 2), (0, 1)],
];

/// Flat index of layer-local `(u, v)` within a layer.
///
/// Horizontal layers fix `j` and span `(i, k)`; vertical layers fix `i` and
/// span `(j, k)`.
fn layer_slot(layer: usize, horizontal: bool, u: usize, v: usize) -> usize {
    if horizontal {
        flat_index(u, layer, v)
    } else {
        flat_index(layer, u, v)
    }
}

/// Shift four slots by one position. Forward means `ring[0]` receives the
/// contents of `ring[1]`, `ring[1]` of `ring[2]`, and so on.
fn cycle4(cells: &mut Cells, ring: [usize; 4], forward: bool) {
    let mut values = ring.map(|slot| cells[slot]);
    if forward {
        values.rotate_left(1);
    } else {
        values.rotate_right(1);
    }
    for (slot, value) in ring.into_iter().zip(values) {
        cells[slot] = value;
    }
}

/// Quarter-turn permutation of one layer; the center slot is a fixed point
fn turn_layer(cells: &mut Cells, layer: usize, direction: Direction) {
    let horizontal = direction.is_horizontal();
    let forward = matches!(direction, Direction::Left | Direction::Down);
    for ring in RINGS {
        let slots = ring.map(|(u, v)| layer_slot(layer, horizontal, u, v));
        cycle4(cells, slots, forward);
    }
}

fn is_ordered(cells: &Cells) -> bool {
    cells
        .iter()
        .enumerate()
        .all(|(index, cell)| cell.is_some_and(|c| c.identity as usize == index))
}

/// The 3x3x3 arrangement of sub-cubes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeLattice {
    cells: Cells,
    /// Committed single-layer quarter turns since construction
    quarter_turns: u64,
}

impl Default for CubeLattice {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeLattice {
    /// Empty lattice; every cell must be attached before use
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
            quarter_turns: 0,
        }
    }

    /// Lattice with entity `n` attached to cell `n` for every cell
    pub fn solved() -> Self {
        let mut lattice = Self::new();
        for (index, cell) in lattice.cells.iter_mut().enumerate() {
            *cell = Some(Cell {
                identity: index as u8,
                entity: EntityId(index as u16),
            });
        }
        lattice
    }

    /// Bind an entity to cell `cell_id`, which also becomes its identity
    pub fn attach(&mut self, cell_id: usize, entity: EntityId) -> Result<(), LatticeError> {
        let slot = self
            .cells
            .get_mut(cell_id)
            .ok_or(LatticeError::CellOutOfRange(cell_id))?;
        if slot.is_some() {
            return Err(LatticeError::CellAlreadyAttached(cell_id));
        }
        *slot = Some(Cell {
            identity: cell_id as u8,
            entity,
        });
        Ok(())
    }

    /// True once all 27 cells have an entity
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied().flatten()
    }

    /// Identity held by each cell, in flat order
    pub fn identities(&self) -> impl Iterator<Item = Option<u8>> + '_ {
        self.cells.iter().map(|cell| cell.map(|c| c.identity))
    }

    /// Entities in the layer a direction pivots on, center included
    pub fn layer_entities(
        &self,
        facet: Facet,
        direction: Direction,
    ) -> impl Iterator<Item = EntityId> + '_ {
        let layer = facet.layer(direction);
        let horizontal = direction.is_horizontal();
        (0..CUBE_SIZE)
            .flat_map(move |u| (0..CUBE_SIZE).map(move |v| layer_slot(layer, horizontal, u, v)))
            .filter_map(move |slot| self.cells[slot].map(|c| c.entity))
    }

    /// Number of single-layer quarter turns committed so far
    pub fn quarter_turns(&self) -> u64 {
        self.quarter_turns
    }

    /// Permute the layer addressed by `facet` by a quarter turn.
    ///
    /// Only handles move; no visual transform is applied here.
    pub fn rotate_facet(&mut self, facet: Facet, direction: Direction) {
        turn_layer(&mut self.cells, facet.layer(direction), direction);
        self.quarter_turns += 1;
    }

    /// Every cell holds the sub-cube it started with
    pub fn is_ordered(&self) -> bool {
        is_ordered(&self.cells)
    }

    /// Solved in some rigid orientation of the whole cube.
    ///
    /// Walks the orbit of whole-cube rotations (at most 24 arrangements) on a
    /// copy of the cells, so `self` is never touched.
    pub fn is_solved(&self) -> bool {
        let mut seen = vec![self.cells];
        let mut next_index = 0;
        while let Some(&cells) = seen.get(next_index) {
            if is_ordered(&cells) {
                return true;
            }
            for direction in [Direction::Right, Direction::Up] {
                let mut turned = cells;
                for layer in 0..CUBE_SIZE {
                    turn_layer(&mut turned, layer, direction);
                }
                if !seen.contains(&turned) {
                    seen.push(turned);
                }
            }
            next_index += 1;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::selection::Selection;
    use proptest::prelude::*;

    fn facet(row: usize, column: usize) -> Facet {
        Facet::new(row, column).unwrap()
    }

    fn identities(lattice: &CubeLattice) -> Vec<u8> {
        lattice.identities().map(|id| id.unwrap()).collect()
    }

    fn is_permutation(lattice: &CubeLattice) -> bool {
        let mut ids = identities(lattice);
        ids.sort_unstable();
        ids.iter().enumerate().all(|(n, &id)| id as usize == n)
    }

    #[test]
    fn test_fresh_lattice_is_solved() {
        let lattice = CubeLattice::solved();
        assert!(lattice.is_complete());
        assert!(lattice.is_ordered());
        assert!(lattice.is_solved());
        assert_eq!(lattice.quarter_turns(), 0);
    }

    #[test]
    fn test_attach() {
        let mut lattice = CubeLattice::new();
        assert!(!lattice.is_complete());
        assert!(!lattice.is_solved());

        assert_eq!(lattice.attach(27, EntityId(0)), Err(LatticeError::CellOutOfRange(27)));
        lattice.attach(4, EntityId(4)).unwrap();
        assert_eq!(
            lattice.attach(4, EntityId(5)),
            Err(LatticeError::CellAlreadyAttached(4))
        );

        for n in (0..CELL_COUNT).filter(|&n| n != 4) {
            lattice.attach(n, EntityId(n as u16)).unwrap();
        }
        assert!(lattice.is_complete());
        assert_eq!(lattice, CubeLattice::solved());
    }

    #[test]
    fn test_column_zero_left_then_right() {
        let mut lattice = CubeLattice::solved();
        lattice.rotate_facet(facet(0, 0), Direction::Left);

        let ids = identities(&lattice);
        // Layer j == 0 in (i, k): corners and edges advance one quarter turn
        let expected = [
            (flat_index(0, 0, 0), 18),
            (flat_index(2, 0, 0), 20),
            (flat_index(2, 0, 2), 2),
            (flat_index(0, 0, 2), 0),
            (flat_index(1, 0, 0), 19),
            (flat_index(2, 0, 1), 11),
            (flat_index(1, 0, 2), 1),
            (flat_index(0, 0, 1), 9),
        ];
        for (slot, id) in expected {
            assert_eq!(ids[slot], id, "slot {slot}");
        }
        // Center of the layer is fixed
        assert_eq!(ids[flat_index(1, 0, 1)], 10);
        // Everything outside the layer is untouched
        for (slot, &id) in ids.iter().enumerate() {
            if crate::cell_coords(slot).1 != 0 {
                assert_eq!(id as usize, slot);
            }
        }
        assert!(!lattice.is_solved());

        lattice.rotate_facet(facet(0, 0), Direction::Right);
        assert!(lattice.is_ordered());
        assert_eq!(lattice.quarter_turns(), 2);
    }

    #[test]
    fn test_single_turn_breaks_solved() {
        for layer in 0..CUBE_SIZE {
            for dir in Direction::ALL {
                let mut lattice = CubeLattice::solved();
                lattice.rotate_facet(facet(layer, layer), dir);
                assert!(!lattice.is_ordered());
                assert!(!lattice.is_solved(), "layer {layer} {dir:?}");
            }
        }
    }

    #[test]
    fn test_whole_cube_rotation_still_solved() {
        let mut lattice = CubeLattice::solved();
        for f in Selection::WholeCube.facets() {
            lattice.rotate_facet(f, Direction::Right);
        }
        for f in Selection::WholeCube.facets() {
            lattice.rotate_facet(f, Direction::Down);
        }
        assert!(!lattice.is_ordered());
        assert!(lattice.is_solved());
    }

    #[test]
    fn test_is_solved_leaves_lattice_untouched() {
        let mut lattice = CubeLattice::solved();
        lattice.rotate_facet(facet(1, 2), Direction::Up);
        lattice.rotate_facet(facet(0, 1), Direction::Left);
        let before = lattice.clone();
        assert!(!lattice.is_solved());
        assert_eq!(lattice, before);
    }

    #[test]
    fn test_layer_entities() {
        let lattice = CubeLattice::solved();
        let mut ids: Vec<u16> = lattice
            .layer_entities(facet(2, 1), Direction::Up)
            .map(|e| e.0)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (18..27).collect::<Vec<u16>>());

        let ids: Vec<u16> = lattice
            .layer_entities(facet(2, 1), Direction::Left)
            .map(|e| e.0)
            .collect();
        assert_eq!(ids, vec![3, 4, 5, 12, 13, 14, 21, 22, 23]);
    }

    fn arb_turn() -> impl Strategy<Value = (Facet, Direction)> {
        (0..3usize, 0..3usize, 0..4usize)
            .prop_map(|(row, column, dir)| (facet(row, column), Direction::ALL[dir]))
    }

    proptest! {
        #[test]
        fn prop_turns_keep_permutation(turns in prop::collection::vec(arb_turn(), 0..64)) {
            let mut lattice = CubeLattice::solved();
            for (f, dir) in turns {
                lattice.rotate_facet(f, dir);
                prop_assert!(is_permutation(&lattice));
            }
        }

        #[test]
        fn prop_quarter_turn_has_order_four(
            prefix in prop::collection::vec(arb_turn(), 0..16),
            (f, dir) in arb_turn(),
        ) {
            let mut lattice = CubeLattice::solved();
            for (pf, pd) in prefix {
                lattice.rotate_facet(pf, pd);
            }
            let before = identities(&lattice);
            for _ in 0..4 {
                lattice.rotate_facet(f, dir);
            }
            prop_assert_eq!(identities(&lattice), before);
        }

        #[test]
        fn prop_inverse_pairing(
            prefix in prop::collection::vec(arb_turn(), 0..16),
            (f, dir) in arb_turn(),
        ) {
            let mut lattice = CubeLattice::solved();
            for (pf, pd) in prefix {
                lattice.rotate_facet(pf, pd);
            }
            let before = identities(&lattice);
            lattice.rotate_facet(f, dir);
            lattice.rotate_facet(f, dir.inverse());
            prop_assert_eq!(identities(&lattice), before);
        }
    }
}
