//! `solver` — a solving session: propagate once, then search.
//!
//! A [`Generator`] owns the problem structure and the mutable candidate
//! domains for one solve. [`Generator::solve`] runs node consistency, then
//! AC-3, then backtracking search over the pruned domains. Unsatisfiability —
//! whether proven by propagation or by exhausting the search — is a normal
//! outcome reported as `None`, never an error.
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//! use crossgen::grid::Crossword;
//! use crossgen::solver::Generator;
//!
//! let crossword = Crossword::new("__")?;
//! let words: Vec<Rc<str>> = vec![Rc::from("AB"), Rc::from("CD")];
//!
//! let mut generator = Generator::new(crossword, &words);
//! let assignment = generator.solve().expect("a two-letter word fits");
//! assert_eq!(assignment.len(), 1);
//! # Ok::<(), crossgen::errors::StructureError>(())
//! ```

use crate::consistency::{self, Domains};
use crate::grid::Crossword;
use crate::search::{self, Assignment};
use log::{debug, info};
use std::collections::HashSet;
use std::rc::Rc;

/// One crossword-generation session over a fixed structure and word list.
pub struct Generator {
    crossword: Crossword,
    domains: Domains,
}

impl Generator {
    /// Start a session with every variable's domain set to the full word
    /// list. Words are expected uppercase (see [`crate::word_list`]).
    #[must_use]
    pub fn new(crossword: Crossword, words: &[Rc<str>]) -> Generator {
        let full: HashSet<Rc<str>> = words.iter().map(Rc::clone).collect();
        let domains: Domains = crossword
            .variables()
            .iter()
            .map(|v| (*v, full.clone()))
            .collect();

        debug!(
            "session: {} variables, {} candidate words",
            crossword.variables().len(),
            full.len()
        );
        Generator { crossword, domains }
    }

    /// The problem structure this session is solving.
    #[must_use]
    pub fn crossword(&self) -> &Crossword {
        &self.crossword
    }

    /// Enforce node and arc consistency, then search.
    ///
    /// Returns a complete assignment, or `None` if the puzzle is
    /// unsatisfiable. A propagation failure skips the search entirely; both
    /// failure causes look the same to the caller.
    pub fn solve(&mut self) -> Option<Assignment> {
        consistency::enforce_node_consistency(&self.crossword, &mut self.domains);

        if !consistency::ac3(&self.crossword, &mut self.domains, None) {
            info!("propagation proved the puzzle unsatisfiable; skipping search");
            return None;
        }

        let mut assignment = Assignment::default();
        let result = search::backtrack(&self.crossword, &self.domains, &mut assignment);
        match &result {
            Some(solved) => info!("search assigned {} variables", solved.len()),
            None => info!("search exhausted all candidates; no solution"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Direction, Variable};
    use crate::search::consistent;

    fn words(list: &[&str]) -> Vec<Rc<str>> {
        list.iter().map(|w| Rc::from(*w)).collect()
    }

    fn solve(structure: &str, list: &[&str]) -> Option<Assignment> {
        let crossword = Crossword::new(structure).unwrap();
        Generator::new(crossword, &words(list)).solve()
    }

    fn find(assignment: &Assignment, direction: Direction, row: usize, col: usize) -> &str {
        assignment
            .iter()
            .find(|(v, _)| v.direction == direction && v.row == row && v.col == col)
            .map(|(_, w)| w.as_ref())
            .expect("variable not assigned")
    }

    #[test]
    fn test_single_slot_takes_either_word() {
        let assignment = solve("__", &["AB", "CD"]).unwrap();
        assert_eq!(assignment.len(), 1);
        let word = assignment.values().next().unwrap();
        assert!(["AB", "CD"].contains(&word.as_ref()));
    }

    #[test]
    fn test_crossing_slots_agree_on_shared_letter() {
        // Across length 3 at row 0, Down length 3 at col 0, crossing at
        // their first cells. CAT/CAR share a first letter; DOG pairs with
        // nothing.
        let assignment = solve("___\n_##\n_##", &["CAT", "CAR", "DOG"]).unwrap();

        let across = find(&assignment, Direction::Across, 0, 0);
        let down = find(&assignment, Direction::Down, 0, 0);
        assert_eq!(across.as_bytes()[0], down.as_bytes()[0]);
        assert_ne!(across, down);
        assert!(["CAT", "CAR"].contains(&across));
        assert!(["CAT", "CAR"].contains(&down));
    }

    #[test]
    fn test_no_word_of_matching_length_is_unsatisfiable() {
        // Node consistency empties the domain; ac3 fails fast and search
        // never runs.
        assert!(solve("___", &["AB", "WXYZ"]).is_none());
    }

    #[test]
    fn test_fewer_distinct_words_than_variables_is_unsatisfiable() {
        assert!(solve("__\n##\n__", &["AB"]).is_none());
    }

    #[test]
    fn test_overlap_free_puzzle_assigns_distinct_words() {
        let assignment = solve("__\n##\n__", &["AB", "CD", "EF"]).unwrap();
        assert_eq!(assignment.len(), 2);
        let mut assigned: Vec<&str> = assignment.values().map(AsRef::as_ref).collect();
        assigned.sort_unstable();
        assigned.dedup();
        assert_eq!(assigned.len(), 2);
    }

    #[test]
    fn test_structure_without_slots_yields_empty_assignment() {
        // A lone fillable cell is not a slot; the empty assignment is
        // trivially complete.
        let assignment = solve("_#\n#_", &["AB"]).unwrap();
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_solution_is_globally_consistent() {
        let structure = "____\n_##_\n_##_\n____";
        let crossword = Crossword::new(structure).unwrap();
        let list = words(&["ABCD", "AEFG", "GHIJ", "DKLJ", "MMMM", "NNNN"]);

        let assignment = Generator::new(crossword.clone(), &list).solve().unwrap();
        assert_eq!(assignment.len(), crossword.variables().len());
        assert!(consistent(&crossword, &assignment));
    }

    #[test]
    fn test_variables_are_value_identified() {
        let a = Variable {
            direction: Direction::Across,
            row: 0,
            col: 0,
            length: 2,
        };
        let b = Variable {
            direction: Direction::Across,
            row: 0,
            col: 0,
            length: 2,
        };
        assert_eq!(a, b);
    }
}
