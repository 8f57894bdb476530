//! Built-in seed patterns

/// A named pattern of live cells, as `(x, y)` offsets from its bottom-left corner
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Width and height of the pattern's bounding box
    pub fn extent(&self) -> (usize, usize) {
        let width = self.cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let height = self.cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
        (width, height)
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 0), (1, 0), (2, 0), (1, 1), (2, 1), (3, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 2), (1, 2), (0, 3), (1, 3), (2, 0), (3, 0), (2, 1), (3, 1)],
    },
    Pattern {
        name: "glider",
        cells: &[(1, 2), (2, 1), (0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (0, 1), (1, 1), (1, 2), (2, 2)],
    },
];

/// Look up a pattern by name, ignoring case
pub fn find_pattern(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
