//! A single automaton unit and its neighbor links

use crate::error::GridError;
use crate::frontend::{CellRenderer, VisualHandle};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary state of a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    /// The other state
    pub fn flipped(self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }

    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Dead => write!(f, "dead"),
            CellState::Alive => write!(f, "alive"),
        }
    }
}

/// Position of a neighbor relative to a cell. The y axis points up, as rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeighborPos {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl NeighborPos {
    /// All positions in slot order
    pub const ALL: [NeighborPos; 8] = [
        NeighborPos::TopLeft,
        NeighborPos::Top,
        NeighborPos::TopRight,
        NeighborPos::Left,
        NeighborPos::Right,
        NeighborPos::BottomLeft,
        NeighborPos::Bottom,
        NeighborPos::BottomRight,
    ];

    /// Slot index in a cell's neighbor array
    #[inline]
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Column and row offset of this neighbor
    pub fn offset(self) -> (isize, isize) {
        match self {
            NeighborPos::TopLeft => (-1, 1),
            NeighborPos::Top => (0, 1),
            NeighborPos::TopRight => (1, 1),
            NeighborPos::Left => (-1, 0),
            NeighborPos::Right => (1, 0),
            NeighborPos::BottomLeft => (-1, -1),
            NeighborPos::Bottom => (0, -1),
            NeighborPos::BottomRight => (1, -1),
        }
    }

    /// The position that points back from the neighbor to this cell
    pub fn opposite(self) -> Self {
        match self {
            NeighborPos::TopLeft => NeighborPos::BottomRight,
            NeighborPos::Top => NeighborPos::Bottom,
            NeighborPos::TopRight => NeighborPos::BottomLeft,
            NeighborPos::Left => NeighborPos::Right,
            NeighborPos::Right => NeighborPos::Left,
            NeighborPos::BottomLeft => NeighborPos::TopRight,
            NeighborPos::Bottom => NeighborPos::Top,
            NeighborPos::BottomRight => NeighborPos::TopLeft,
        }
    }
}

/// One cell of the grid.
///
/// Neighbor slots hold indices into the owning grid's cell sequence, so
/// lookups that need the neighbor's state take the cell slice as an argument.
#[derive(Debug, Clone)]
pub struct Cell {
    index: usize,
    state: CellState,
    visual: VisualHandle,
    neighbors: [Option<usize>; 8],
}

impl Cell {
    /// Create a dead cell with no neighbors
    pub fn new(index: usize, visual: VisualHandle) -> Self {
        Self {
            index,
            state: CellState::Dead,
            visual,
            neighbors: [None; 8],
        }
    }

    /// Position of this cell in the grid's sequence
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn visual(&self) -> VisualHandle {
        self.visual
    }

    /// Set the state and sync the visual
    pub fn set_state(&mut self, state: CellState, renderer: &mut dyn CellRenderer) {
        self.state = state;
        renderer.apply_cell_visual(self.visual, state);
    }

    /// Flip between alive and dead and sync the visual
    pub fn toggle_state(&mut self, renderer: &mut dyn CellRenderer) {
        self.set_state(self.state.flipped(), renderer);
    }

    /// Link a neighbor into an empty slot. An occupied slot is left untouched.
    pub fn add_neighbor(&mut self, position: NeighborPos, index: usize) -> Result<(), GridError> {
        let slot = position.slot();
        if self.neighbors[slot].is_some() {
            return Err(GridError::DuplicateNeighbor { cell: self.index, position });
        }
        self.neighbors[slot] = Some(index);
        Ok(())
    }

    #[inline]
    pub fn neighbor(&self, position: NeighborPos) -> Option<usize> {
        self.neighbors[position.slot()]
    }

    /// State of a neighbor; unset slots (grid edges) read as dead
    pub fn neighbor_state(&self, position: NeighborPos, cells: &[Cell]) -> CellState {
        self.neighbor(position)
            .and_then(|idx| cells.get(idx))
            .map_or(CellState::Dead, Cell::state)
    }

    /// Number of alive neighbors
    pub fn live_neighbors(&self, cells: &[Cell]) -> u8 {
        NeighborPos::ALL
            .iter()
            .filter(|&&pos| self.neighbor_state(pos, cells).is_alive())
            .count() as u8
    }

    /// Number of populated neighbor slots
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.iter().flatten().count()
    }
}
