//! `search` — heuristic backtracking over partial assignments.
//!
//! The pruned domains are the candidate universe and are read-only here;
//! propagation runs once before search, not after each tentative assignment
//! (no maintaining-arc-consistency). Only the assignment owned by the active
//! search path is mutated, and every tentative assign is undone before the
//! next candidate is tried, so the assignment invariant holds across every
//! recursive return.
//!
//! Variable order: minimum remaining values, ties broken by highest degree,
//! remaining ties by derivation order. Value order: least constraining value,
//! ties broken alphabetically so runs are reproducible.

use crate::consistency::{letters_agree, Domains};
use crate::grid::{Crossword, Variable};
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::rc::Rc;

/// Partial mapping from variable to its assigned word. Complete when its size
/// equals the number of variables.
pub type Assignment = FxHashMap<Variable, Rc<str>>;

/// Is the (partial) assignment internally consistent?
///
/// True iff every assigned word fits its slot's length, every assigned
/// crossing pair agrees at the shared cell, and no word is used twice.
#[must_use]
pub fn consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    for (variable, word) in assignment {
        if word.len() != variable.length {
            return false;
        }
    }

    for (variable, word) in assignment {
        for neighbor in crossword.neighbors(variable) {
            let Some(other) = assignment.get(neighbor) else {
                continue;
            };
            let Some((i, j)) = crossword.overlap(variable, neighbor) else {
                continue;
            };
            if !letters_agree(word, i, other, j) {
                return false;
            }
        }
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(assignment.len());
    assignment.values().all(|word| seen.insert(word))
}

/// Pick the unassigned variable with the fewest remaining candidates,
/// breaking ties by neighbor count. `None` only when everything is assigned.
#[must_use]
pub fn select_unassigned_variable(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<Variable> {
    crossword
        .variables()
        .iter()
        .filter(|v| !assignment.contains_key(*v))
        .min_by_key(|v| {
            let remaining = domains.get(*v).map_or(0, HashSet::len);
            (remaining, Reverse(crossword.neighbors(v).len()))
        })
        .copied()
}

/// Order `variable`'s candidates by how many words each would eliminate from
/// the domains of its *unassigned* neighbors, fewest first.
#[must_use]
pub fn order_domain_values(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &Assignment,
    variable: &Variable,
) -> Vec<Rc<str>> {
    let Some(domain) = domains.get(variable) else {
        return Vec::new();
    };

    let unassigned: Vec<&Variable> = crossword
        .neighbors(variable)
        .iter()
        .filter(|n| !assignment.contains_key(*n))
        .collect();

    let mut ordered: Vec<(usize, Rc<str>)> = domain
        .iter()
        .map(|word| {
            let eliminated: usize = unassigned
                .iter()
                .map(|neighbor| {
                    let Some((i, j)) = crossword.overlap(variable, neighbor) else {
                        return 0;
                    };
                    domains.get(*neighbor).map_or(0, |dn| {
                        dn.iter()
                            .filter(|other| !letters_agree(word, i, other, j))
                            .count()
                    })
                })
                .sum();
            (eliminated, Rc::clone(word))
        })
        .collect();

    ordered.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    ordered.into_iter().map(|(_, word)| word).collect()
}

/// Depth-first backtracking search. Returns a complete, consistent assignment
/// extending `assignment`, or `None` if none exists — the root call returning
/// `None` means the puzzle is unsatisfiable.
///
/// Recursion depth is bounded by the number of variables.
pub fn backtrack(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &mut Assignment,
) -> Option<Assignment> {
    if assignment.len() == crossword.variables().len() {
        return Some(assignment.clone());
    }

    let variable = select_unassigned_variable(crossword, domains, assignment)?;
    for word in order_domain_values(crossword, domains, assignment, &variable) {
        assignment.insert(variable, Rc::clone(&word));
        if consistent(crossword, assignment) {
            if let Some(solved) = backtrack(crossword, domains, assignment) {
                return Some(solved);
            }
        }
        // Undo the tentative assignment before trying the next candidate.
        assignment.remove(&variable);
    }
    None
}
