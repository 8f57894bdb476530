//! Game of Life birth and death rules

use super::CellState;

/// What a generation step does to a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Underpopulation or overpopulation
    Kill,
    /// Exactly three live neighbors
    Revive,
    Keep,
}

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Classify a cell from its current state and live neighbor count.
    ///
    /// A live cell with fewer than two or more than three live neighbors is
    /// killed. Any cell with exactly three is marked for revival, including
    /// cells that are already alive; applying that mark is a no-op.
    pub fn classify(state: CellState, live_neighbors: u8) -> Verdict {
        match (state, live_neighbors) {
            (CellState::Alive, n) if n < 2 || n > 3 => Verdict::Kill,
            (_, 3) => Verdict::Revive,
            _ => Verdict::Keep,
        }
    }

    /// State of the cell after applying its verdict
    pub fn next_state(state: CellState, live_neighbors: u8) -> CellState {
        match Self::classify(state, live_neighbors) {
            Verdict::Kill => CellState::Dead,
            Verdict::Revive => CellState::Alive,
            Verdict::Keep => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_logic() {
        use CellState::{Alive, Dead};

        assert_eq!(GameOfLifeRules::next_state(Alive, 2), Alive); // survival
        assert_eq!(GameOfLifeRules::next_state(Alive, 3), Alive);
        assert_eq!(GameOfLifeRules::next_state(Dead, 3), Alive); // birth
        assert_eq!(GameOfLifeRules::next_state(Alive, 1), Dead); // underpopulation
        assert_eq!(GameOfLifeRules::next_state(Alive, 4), Dead); // overpopulation
        assert_eq!(GameOfLifeRules::next_state(Dead, 2), Dead);
        assert_eq!(GameOfLifeRules::next_state(Dead, 8), Dead);
    }

    #[test]
    fn test_live_cell_with_three_is_marked_for_revival() {
        assert_eq!(GameOfLifeRules::classify(CellState::Alive, 3), Verdict::Revive);
        assert_eq!(GameOfLifeRules::classify(CellState::Alive, 2), Verdict::Keep);
    }

    #[test]
    fn test_dead_cells_are_never_killed() {
        for n in 0..=8 {
            assert_ne!(GameOfLifeRules::classify(CellState::Dead, n), Verdict::Kill);
        }
    }
}
