//! `consistency` — constraint propagation over candidate domains.
//!
//! Two pruning passes run before any search:
//!
//! - node consistency: drop every word whose length does not fit its slot;
//! - arc consistency (AC-3): drop every word with no supporting word in a
//!   crossing slot's domain, repeating until a fixed point.
//!
//! Both passes mutate the session-owned [`Domains`] in place. An empty domain
//! discovered during propagation is a final proof of unsatisfiability, so
//! [`ac3`] returns `false` immediately and the search phase can be skipped.

use crate::grid::{Crossword, Variable};
use log::debug;
use rustc_hash::FxHashMap;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

/// Candidate words remaining for each variable.
///
/// Owned exclusively by the solving session: mutated here during propagation,
/// then treated as read-only by [`crate::search`]. Never grows after
/// initialization.
pub type Domains = FxHashMap<Variable, HashSet<Rc<str>>>;

/// Do `a[i]` and `b[j]` hold the same letter? Out-of-range offsets never
/// agree. Words are ASCII, so byte comparison is letter comparison.
pub(crate) fn letters_agree(a: &str, i: usize, b: &str, j: usize) -> bool {
    match (a.as_bytes().get(i), b.as_bytes().get(j)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Enforce the unary length constraint: after this, every word left in a
/// variable's domain has exactly the variable's length.
///
/// May leave a domain empty; that is detected by [`ac3`], not here.
pub fn enforce_node_consistency(crossword: &Crossword, domains: &mut Domains) {
    for variable in crossword.variables() {
        if let Some(domain) = domains.get_mut(variable) {
            let before = domain.len();
            domain.retain(|word| word.len() == variable.length);
            if domain.len() < before {
                debug!(
                    "node consistency pruned {} of {} words for {variable}",
                    before - domain.len(),
                    before
                );
            }
        }
    }
}

/// Make `x` arc-consistent with `y`: remove from `x`'s domain every word with
/// no word in `y`'s domain agreeing at the shared cell.
///
/// Returns whether anything was removed. If `x` and `y` do not cross, this is
/// a no-op returning `false` — not an error.
pub fn revise(crossword: &Crossword, domains: &mut Domains, x: &Variable, y: &Variable) -> bool {
    let Some((i, j)) = crossword.overlap(x, y) else {
        return false;
    };

    let unsupported: Vec<Rc<str>> = match (domains.get(x), domains.get(y)) {
        (Some(dx), Some(dy)) => dx
            .iter()
            .filter(|wx| !dy.iter().any(|wy| letters_agree(wx, i, wy, j)))
            .cloned()
            .collect(),
        _ => return false,
    };

    if unsupported.is_empty() {
        return false;
    }

    if let Some(dx) = domains.get_mut(x) {
        for word in &unsupported {
            dx.remove(word);
        }
        debug!("revise removed {} words from {x} against {y}", unsupported.len());
    }
    true
}

/// Worklist AC-3 over all crossing pairs (or a caller-supplied subset).
///
/// Returns `false` as soon as any domain is empty — including on entry, where
/// node consistency may already have emptied one — since that proves the
/// puzzle unsatisfiable. Returns `true` once the worklist drains with every
/// domain non-empty. Running it again on an already-consistent model prunes
/// nothing and still returns `true`.
pub fn ac3(
    crossword: &Crossword,
    domains: &mut Domains,
    arcs: Option<Vec<(Variable, Variable)>>,
) -> bool {
    if let Some(empty) = domains
        .iter()
        .find_map(|(v, d)| d.is_empty().then_some(v))
    {
        debug!("ac3: domain of {empty} already empty, unsatisfiable");
        return false;
    }

    let mut worklist: VecDeque<(Variable, Variable)> = match arcs {
        Some(arcs) => arcs.into(),
        None => initial_arcs(crossword).into(),
    };

    while let Some((x, y)) = worklist.pop_front() {
        if revise(crossword, domains, &x, &y) {
            if domains.get(&x).map_or(true, HashSet::is_empty) {
                debug!("ac3: domain of {x} emptied, unsatisfiable");
                return false;
            }
            // x's domain shrank, so arcs into x need another look.
            for z in crossword.neighbors(&x) {
                if *z != y {
                    worklist.push_back((*z, x));
                }
            }
        }
    }
    true
}

/// Both directions of every crossing pair. Seeding both directions (rather
/// than one per unordered pair) is what makes a single ac3 run reach full
/// symmetric arc consistency.
fn initial_arcs(crossword: &Crossword) -> Vec<(Variable, Variable)> {
    let mut arcs = Vec::new();
    for x in crossword.variables() {
        for y in crossword.neighbors(x) {
            arcs.push((*x, *y));
        }
    }
    arcs
}
