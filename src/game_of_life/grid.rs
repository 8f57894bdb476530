//! Grid representation: incremental construction, neighbor resolution and
//! generation stepping

use super::{Cell, CellState, GameOfLifeRules, NeighborPos, Verdict};
use crate::error::GridError;
use crate::frontend::{CellRenderer, VisualFactory, VisualPosition};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Progress of incremental construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildProgress {
    pub done: usize,
    pub total: usize,
}

impl BuildProgress {
    pub fn is_complete(&self) -> bool {
        self.done == self.total
    }

    pub fn remaining(&self) -> usize {
        self.total - self.done
    }
}

/// Summary of one generation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub generation: u64,
    pub died: usize,
    pub born: usize,
    pub alive: usize,
}

/// A fixed N x N Game of Life grid. Cell `(x, y)` lives at index `x + N * y`,
/// with `y` growing upward.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    total: usize,
    spacing: f32,
    cells: Vec<Cell>,
    ready: bool,
    generation: u64,
}

impl Grid {
    /// Create an empty grid; cells are added by [`Grid::build_batch`]
    pub fn new(size: usize, spacing: f32) -> Result<Self, GridError> {
        let total = match size.checked_mul(size) {
            Some(total) if total > 0 => total,
            _ => return Err(GridError::InvalidSize(size)),
        };
        if !(spacing > 0.0) {
            return Err(GridError::InvalidSpacing(spacing));
        }

        Ok(Self {
            size,
            total,
            spacing,
            cells: Vec::new(),
            ready: false,
            generation: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Number of cells created so far
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells once construction finishes
    pub fn total_cells(&self) -> usize {
        self.total
    }

    pub fn is_built(&self) -> bool {
        self.cells.len() == self.total_cells()
    }

    /// True once neighbors are resolved
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn progress(&self) -> BuildProgress {
        BuildProgress {
            done: self.cells.len(),
            total: self.total_cells(),
        }
    }

    /// Create up to `batch_size` cells in row-major order
    pub fn build_batch(
        &mut self,
        batch_size: usize,
        factory: &mut dyn VisualFactory,
    ) -> BuildProgress {
        let start = self.cells.len();
        let end = start.saturating_add(batch_size.max(1)).min(self.total);
        self.cells.reserve(end - start);

        for index in start..end {
            let (col, row) = self.coords_of(index);
            let position =
                VisualPosition::new(col as f32 * self.spacing, row as f32 * self.spacing);
            let visual = factory.create_visual(position);
            self.cells.push(Cell::new(index, visual));
        }

        let progress = self.progress();
        debug!(done = progress.done, total = progress.total, "built grid batch");
        progress
    }

    /// Lazily build the grid, yielding progress after every batch.
    ///
    /// The sequence ends once every cell exists and cannot be restarted.
    pub fn build<'a>(
        &'a mut self,
        batch_size: usize,
        factory: &'a mut dyn VisualFactory,
    ) -> Build<'a> {
        Build {
            grid: self,
            factory,
            batch_size,
        }
    }

    /// Link every cell to its up to eight neighbors. Runs once, after construction.
    pub fn resolve_neighbors(&mut self) -> Result<(), GridError> {
        if self.ready {
            return Err(GridError::AlreadyResolved);
        }
        if !self.is_built() {
            let progress = self.progress();
            return Err(GridError::NotBuilt {
                done: progress.done,
                total: progress.total,
            });
        }

        for (y, x) in iproduct!(0..self.size, 0..self.size) {
            let cidx = x + self.size * y;
            for position in NeighborPos::ALL {
                let Some(nidx) = self.neighbor_index(x, y, position) else {
                    continue;
                };
                // Only outgoing links; the reverse link comes from the neighbor's own iteration
                if let Err(e) = self.cells[cidx].add_neighbor(position, nidx) {
                    warn!(error = %e, "ignoring duplicate neighbor assignment");
                }
            }
        }

        self.ready = true;
        debug!(size = self.size, "resolved neighbors");
        Ok(())
    }

    /// Index of the neighbor at `position`, or `None` across a grid edge
    fn neighbor_index(&self, x: usize, y: usize, position: NeighborPos) -> Option<usize> {
        let n = self.size;
        let (dx, dy) = position.offset();

        let has_col = match dx {
            -1 => x > 0,
            1 => x + 1 < n,
            _ => true,
        };
        let has_row = match dy {
            1 => y + 1 < n,
            -1 => y > 0,
            _ => true,
        };

        if !(has_col && has_row) {
            return None;
        }
        let cidx = (x + n * y) as isize;
        Some((cidx + dx + dy * n as isize) as usize)
    }

    /// Advance one generation.
    ///
    /// Every cell is classified against the same snapshot before any state
    /// changes; all deaths are then applied, followed by all births.
    pub fn step(&mut self, renderer: &mut dyn CellRenderer) -> Result<StepOutcome, GridError> {
        if !self.ready {
            return Err(GridError::NotReady);
        }

        let mut to_kill = Vec::new();
        let mut to_make = Vec::new();

        for cell in &self.cells {
            let active = cell.live_neighbors(&self.cells);
            match GameOfLifeRules::classify(cell.state(), active) {
                Verdict::Kill => to_kill.push(cell.index()),
                Verdict::Revive => to_make.push(cell.index()),
                Verdict::Keep => {}
            }
        }

        let mut died = 0;
        for &idx in &to_kill {
            let cell = &mut self.cells[idx];
            if cell.state().is_alive() {
                died += 1;
            }
            cell.set_state(CellState::Dead, renderer);
        }

        let mut born = 0;
        for &idx in &to_make {
            let cell = &mut self.cells[idx];
            if !cell.state().is_alive() {
                born += 1;
            }
            cell.set_state(CellState::Alive, renderer);
        }

        self.generation += 1;
        let outcome = StepOutcome {
            generation: self.generation,
            died,
            born,
            alive: self.alive_count(),
        };
        debug!(?outcome, "advanced generation");
        Ok(outcome)
    }

    /// Flip a single cell. Rejected until neighbors are resolved.
    pub fn toggle_cell(
        &mut self,
        index: usize,
        renderer: &mut dyn CellRenderer,
    ) -> Result<CellState, GridError> {
        if !self.ready {
            return Err(GridError::NotReady);
        }
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(GridError::CellOutOfRange { index, len })?;
        cell.toggle_state(renderer);
        Ok(cell.state())
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert column and row to an index
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then(|| x + self.size * y)
    }

    /// Convert an index to column and row
    #[inline]
    pub fn coords_of(&self, index: usize) -> (usize, usize) {
        (index % self.size, index / self.size)
    }

    /// State of the cell at `(x, y)`; out of bounds or unbuilt cells are dead
    pub fn state_at(&self, x: usize, y: usize) -> CellState {
        self.index_of(x, y)
            .and_then(|idx| self.cells.get(idx))
            .map_or(CellState::Dead, Cell::state)
    }

    /// Find the cell whose visual sits at `position`, within half a cell spacing
    pub fn find_by_position(&self, position: VisualPosition) -> Option<usize> {
        if !position.x.is_finite() || !position.y.is_finite() {
            return None;
        }

        let col = (position.x / self.spacing).round();
        let row = (position.y / self.spacing).round();
        if col < 0.0 || row < 0.0 {
            return None;
        }

        let tolerance = self.spacing / 2.0;
        let off_x = (position.x - col * self.spacing).abs();
        let off_y = (position.y - row * self.spacing).abs();
        if off_x > tolerance || off_y > tolerance {
            return None;
        }

        self.index_of(col as usize, row as usize)
            .filter(|&idx| idx < self.cells.len())
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.state().is_alive()).count()
    }

    /// Coordinates of all living cells, in index order
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .filter(|c| c.state().is_alive())
            .map(|c| self.coords_of(c.index()))
            .collect()
    }

    /// Snapshot of every cell's state
    pub fn states(&self) -> Vec<CellState> {
        self.cells.iter().map(Cell::state).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Top row first, since y grows upward
        for y in (0..self.size).rev() {
            for x in 0..self.size {
                let symbol = if self.state_at(x, y).is_alive() { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator returned by [`Grid::build`]
pub struct Build<'a> {
    grid: &'a mut Grid,
    factory: &'a mut dyn VisualFactory,
    batch_size: usize,
}

impl Iterator for Build<'_> {
    type Item = BuildProgress;

    fn next(&mut self) -> Option<BuildProgress> {
        if self.grid.is_built() {
            return None;
        }
        Some(self.grid.build_batch(self.batch_size, self.factory))
    }
}
