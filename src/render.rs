//! `render` — map a solved assignment back onto the grid as text.
//!
//! Blocked cells render as `█`; fillable cells not covered by any assigned
//! word render as a blank.

use crate::grid::Crossword;
use crate::search::Assignment;

/// Glyph for a blocked cell.
pub const BLOCK: char = '█';

/// The 2-D letter grid implied by `assignment`: `Some(letter)` for each cell
/// covered by an assigned word, `None` elsewhere.
#[must_use]
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; crossword.width()]; crossword.height()];
    for (variable, word) in assignment {
        for (k, letter) in word.chars().enumerate() {
            let (row, col) = variable.cell(k);
            if row < crossword.height() && col < crossword.width() {
                letters[row][col] = Some(letter);
            }
        }
    }
    letters
}

/// Render the assignment as one text row per grid row.
#[must_use]
pub fn render(crossword: &Crossword, assignment: &Assignment) -> String {
    let letters = letter_grid(crossword, assignment);
    let mut out = String::with_capacity((crossword.width() + 1) * crossword.height());
    for row in 0..crossword.height() {
        for col in 0..crossword.width() {
            if crossword.is_fillable(row, col) {
                out.push(letters[row][col].unwrap_or(' '));
            } else {
                out.push(BLOCK);
            }
        }
        out.push('\n');
    }
    out
}
