//! `grid` — the puzzle structure: fillable cells, slots, and how slots cross.
//!
//! A structure string is a rectangular character grid where `_` marks a
//! fillable cell and any other character marks a blocked cell. Scanning rows
//! left-to-right yields the Across variables, scanning columns top-to-bottom
//! yields the Down variables; a run of a single cell is not a slot (a
//! crossword entry needs at least two letters).
//!
//! Everything derived here — variables, overlaps, neighbor lists — is computed
//! once at construction and never mutated afterward. The mutable state of a
//! solving session (candidate domains, the partial assignment) lives in
//! [`crate::consistency`] and [`crate::search`].

use crate::errors::StructureError;
use rustc_hash::FxHashMap;
use std::fmt;

/// The reserved structure character marking a fillable cell.
pub const FILLABLE: char = '_';

/// Reading direction of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Across,
    Down,
}

/// A slot in the puzzle: a maximal run of fillable cells in one direction.
///
/// Identity is value-based — two variables with the same direction, start
/// cell, and length are the same variable. Immutable once derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
    pub direction: Direction,
    pub row: usize,
    pub col: usize,
    pub length: usize,
}

impl Variable {
    /// The grid cell holding this variable's `k`-th letter.
    #[must_use]
    pub fn cell(&self, k: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {} [{}]", self.row, self.col, direction, self.length)
    }
}

/// The static problem structure: grid shape, slots, and their crossings.
#[derive(Debug, Clone)]
pub struct Crossword {
    height: usize,
    width: usize,
    fillable: Vec<Vec<bool>>,
    variables: Vec<Variable>,
    overlaps: FxHashMap<(Variable, Variable), (usize, usize)>,
    neighbors: FxHashMap<Variable, Vec<Variable>>,
}

impl Crossword {
    /// Parse a structure string into a crossword grid and derive its slots.
    ///
    /// Leading and trailing newlines are ignored so that indented test
    /// literals stay readable.
    ///
    /// # Errors
    ///
    /// Returns a [`StructureError`] if the structure has no rows, rows of
    /// differing widths, or no fillable cell at all.
    pub fn new(structure: &str) -> Result<Crossword, StructureError> {
        let trimmed = structure.trim_matches('\n');
        if trimmed.is_empty() {
            return Err(StructureError::EmptyStructure);
        }

        let mut fillable: Vec<Vec<bool>> = Vec::new();
        let mut width = 0;
        for (row, line) in trimmed.lines().enumerate() {
            let cells: Vec<bool> = line.chars().map(|c| c == FILLABLE).collect();
            if row == 0 {
                width = cells.len();
            } else if cells.len() != width {
                return Err(StructureError::NotRectangular {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            fillable.push(cells);
        }
        let height = fillable.len();

        if !fillable.iter().flatten().any(|&open| open) {
            return Err(StructureError::NoFillableCells);
        }

        let variables = derive_variables(&fillable, height, width);
        let (overlaps, neighbors) = derive_overlaps(&variables);

        Ok(Crossword {
            height,
            width,
            fillable,
            variables,
            overlaps,
            neighbors,
        })
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at `(row, col)` is fillable. Out-of-bounds cells are
    /// treated as blocked.
    #[must_use]
    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        self.fillable
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// All slots of the puzzle, Across slots first, in scan order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Offsets `(pos_in_x, pos_in_y)` of the single cell shared by `x` and
    /// `y`, or `None` when the pair shares no cell (always the case for two
    /// slots with the same direction).
    #[must_use]
    pub fn overlap(&self, x: &Variable, y: &Variable) -> Option<(usize, usize)> {
        self.overlaps.get(&(*x, *y)).copied()
    }

    /// All slots crossing `v`.
    #[must_use]
    pub fn neighbors(&self, v: &Variable) -> &[Variable] {
        self.neighbors.get(v).map_or(&[], Vec::as_slice)
    }
}

/// Scan rows then columns for maximal runs of fillable cells of length >= 2.
fn derive_variables(fillable: &[Vec<bool>], height: usize, width: usize) -> Vec<Variable> {
    let mut variables = Vec::new();

    for row in 0..height {
        let mut run_start = None;
        // One past the end so the final run of each row gets flushed.
        for col in 0..=width {
            if col < width && fillable[row][col] {
                run_start.get_or_insert(col);
            } else if let Some(start) = run_start.take() {
                let length = col - start;
                if length >= 2 {
                    variables.push(Variable {
                        direction: Direction::Across,
                        row,
                        col: start,
                        length,
                    });
                }
            }
        }
    }

    for col in 0..width {
        let mut run_start = None;
        for row in 0..=height {
            if row < height && fillable[row][col] {
                run_start.get_or_insert(row);
            } else if let Some(start) = run_start.take() {
                let length = row - start;
                if length >= 2 {
                    variables.push(Variable {
                        direction: Direction::Down,
                        row: start,
                        col,
                        length,
                    });
                }
            }
        }
    }

    variables
}

type OverlapMap = FxHashMap<(Variable, Variable), (usize, usize)>;
type NeighborMap = FxHashMap<Variable, Vec<Variable>>;

/// Record both orderings of every crossing pair, plus per-variable neighbor
/// lists in derivation order.
fn derive_overlaps(variables: &[Variable]) -> (OverlapMap, NeighborMap) {
    let mut overlaps = OverlapMap::default();
    let mut neighbors = NeighborMap::default();

    for (i, x) in variables.iter().enumerate() {
        for y in &variables[i + 1..] {
            if let Some((pos_in_x, pos_in_y)) = crossing(x, y) {
                overlaps.insert((*x, *y), (pos_in_x, pos_in_y));
                overlaps.insert((*y, *x), (pos_in_y, pos_in_x));
                neighbors.entry(*x).or_default().push(*y);
                neighbors.entry(*y).or_default().push(*x);
            }
        }
    }

    (overlaps, neighbors)
}

/// Offsets of the shared cell if `x` and `y` cross. An Across/Down pair can
/// share at most one cell; maximal same-direction runs never share any.
fn crossing(x: &Variable, y: &Variable) -> Option<(usize, usize)> {
    let (across, down, flipped) = match (x.direction, y.direction) {
        (Direction::Across, Direction::Down) => (x, y, false),
        (Direction::Down, Direction::Across) => (y, x, true),
        _ => return None,
    };

    let col_hit = (across.col..across.col + across.length).contains(&down.col);
    let row_hit = (down.row..down.row + down.length).contains(&across.row);
    if !col_hit || !row_hit {
        return None;
    }

    let in_across = down.col - across.col;
    let in_down = across.row - down.row;
    Some(if flipped {
        (in_down, in_across)
    } else {
        (in_across, in_down)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(direction: Direction, row: usize, col: usize, length: usize) -> Variable {
        Variable {
            direction,
            row,
            col,
            length,
        }
    }

    #[test]
    fn test_open_grid_derives_all_slots() {
        let c = Crossword::new("___\n___\n___").unwrap();
        assert_eq!(c.height(), 3);
        assert_eq!(c.width(), 3);
        assert_eq!(c.variables().len(), 6);
        assert_eq!(c.variables()[0], var(Direction::Across, 0, 0, 3));
        assert_eq!(c.variables()[3], var(Direction::Down, 0, 0, 3));
    }

    #[test]
    fn test_leading_and_trailing_newlines_ignored() {
        let c = Crossword::new("\n__\n__\n").unwrap();
        assert_eq!(c.height(), 2);
        assert_eq!(c.width(), 2);
        assert_eq!(c.variables().len(), 4);
    }

    #[test]
    fn test_single_cell_runs_are_not_variables() {
        // Row 1 and column 0 each contain a lone fillable cell.
        let c = Crossword::new("__\n#_").unwrap();
        assert_eq!(
            c.variables(),
            &[var(Direction::Across, 0, 0, 2), var(Direction::Down, 0, 1, 2)]
        );
    }

    #[test]
    fn test_grid_with_cells_but_no_slots_is_valid() {
        let c = Crossword::new("_#\n#_").unwrap();
        assert!(c.variables().is_empty());
    }

    #[test]
    fn test_empty_structure_rejected() {
        assert!(matches!(
            Crossword::new(""),
            Err(StructureError::EmptyStructure)
        ));
        assert!(matches!(
            Crossword::new("\n\n"),
            Err(StructureError::EmptyStructure)
        ));
    }

    #[test]
    fn test_ragged_structure_rejected() {
        match Crossword::new("___\n__") {
            Err(StructureError::NotRectangular {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 1);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected NotRectangular, got {other:?}"),
        }
    }

    #[test]
    fn test_fully_blocked_structure_rejected() {
        assert!(matches!(
            Crossword::new("###\n###"),
            Err(StructureError::NoFillableCells)
        ));
    }

    #[test]
    fn test_overlap_offsets_are_symmetric() {
        // Down slot in column 0, Across slot in row 1, crossing at (1, 0).
        let c = Crossword::new("_##\n___\n_##").unwrap();
        let across = var(Direction::Across, 1, 0, 3);
        let down = var(Direction::Down, 0, 0, 3);
        assert_eq!(c.overlap(&across, &down), Some((0, 1)));
        assert_eq!(c.overlap(&down, &across), Some((1, 0)));
        assert_eq!(c.neighbors(&across), &[down]);
        assert_eq!(c.neighbors(&down), &[across]);
    }

    #[test]
    fn test_parallel_slots_do_not_overlap() {
        let c = Crossword::new("__\n##\n__").unwrap();
        let top = var(Direction::Across, 0, 0, 2);
        let bottom = var(Direction::Across, 2, 0, 2);
        assert_eq!(c.variables(), &[top, bottom]);
        assert_eq!(c.overlap(&top, &bottom), None);
        assert!(c.neighbors(&top).is_empty());
    }

    #[test]
    fn test_cell_positions() {
        let across = var(Direction::Across, 2, 1, 3);
        assert_eq!(across.cell(0), (2, 1));
        assert_eq!(across.cell(2), (2, 3));

        let down = var(Direction::Down, 2, 1, 3);
        assert_eq!(down.cell(2), (4, 1));
    }

    #[test]
    fn test_blocked_cells_and_bounds() {
        let c = Crossword::new("_#\n__").unwrap();
        assert!(c.is_fillable(0, 0));
        assert!(!c.is_fillable(0, 1));
        assert!(!c.is_fillable(7, 7));
    }
}
