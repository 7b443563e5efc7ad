use crate::fa::dfa::DFA;
use crate::input_symbol::{symbols_to_string, InputSymbol};
use hashbrown::HashSet;
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Outcome of comparing the languages of two DFAs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Equivalence {
    Equivalent,
    /// The DFAs declare different alphabets
    AlphabetMismatch,
    /// After reading `witness`, exactly one of the DFAs is in an accepting state
    DifferentAcceptance { witness: Vec<InputSymbol> },
    /// At least one DFA has no transition on the last symbol of `witness`.
    /// Undefined transitions count as distinguishing.
    UndefinedTransition { witness: Vec<InputSymbol> },
}

impl Equivalence {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Equivalence::Equivalent)
    }

    pub fn witness(&self) -> Option<&[InputSymbol]> {
        match self {
            Equivalence::DifferentAcceptance { witness }
            | Equivalence::UndefinedTransition { witness } => Some(witness),
            _ => None,
        }
    }
}

/// Whether both DFAs accept exactly the same language
pub fn equivalent(dfa1: &DFA, dfa2: &DFA) -> bool {
    check_equivalence(dfa1, dfa2).is_equivalent()
}

/// Breadth-first traversal of the state pairs reachable from the two start
/// states. The first pair whose finality differs, or that lacks a transition
/// on some symbol, decides inequivalence; the reported witness is a shortest
/// word leading there.
pub fn check_equivalence(dfa1: &DFA, dfa2: &DFA) -> Equivalence {
    let alphabet1: HashSet<&InputSymbol> = dfa1.alphabet.iter().collect();
    let alphabet2: HashSet<&InputSymbol> = dfa2.alphabet.iter().collect();
    if alphabet1 != alphabet2 {
        debug!("Alphabets differ, DFAs are not equivalent");
        return Equivalence::AlphabetMismatch;
    }

    // (symbol index in dfa1, symbol index in dfa2) in sorted symbol order
    let symbols: Vec<(usize, usize)> = dfa1
        .sorted_symbols()
        .into_iter()
        .map(|symbol| (symbol, dfa2.alphabet_index_map[&dfa1.alphabet[symbol]]))
        .collect();

    let start = (dfa1.start_state, dfa2.start_state);
    let mut parents: FxHashMap<(usize, usize), ((usize, usize), usize)> = FxHashMap::default();
    let mut visited: FxHashSet<(usize, usize)> = FxHashSet::default();
    let mut queue = VecDeque::from([start]);

    while let Some(pair) = queue.pop_front() {
        if !visited.insert(pair) {
            continue;
        }
        let (state1, state2) = pair;
        trace!(
            "Visiting ({}, {})",
            dfa1.states[state1],
            dfa2.states[state2]
        );

        if dfa1.accept_states.contains(&state1) != dfa2.accept_states.contains(&state2) {
            let witness = reconstruct_word(dfa1, &parents, pair);
            debug!(
                "Acceptance differs after '{}'",
                symbols_to_string(&witness)
            );
            return Equivalence::DifferentAcceptance { witness };
        }

        for &(symbol1, symbol2) in &symbols {
            match (
                dfa1._next_state(state1, symbol1),
                dfa2._next_state(state2, symbol2),
            ) {
                (Some(next1), Some(next2)) => {
                    let next = (next1, next2);
                    if !visited.contains(&next) && !parents.contains_key(&next) && next != start
                    {
                        parents.insert(next, (pair, symbol1));
                        queue.push_back(next);
                    }
                }
                _ => {
                    let mut witness = reconstruct_word(dfa1, &parents, pair);
                    witness.push(dfa1.alphabet[symbol1].clone());
                    debug!(
                        "Transition undefined after '{}'",
                        symbols_to_string(&witness)
                    );
                    return Equivalence::UndefinedTransition { witness };
                }
            }
        }
    }

    debug!("DFAs are equivalent ({} state pairs visited)", visited.len());
    Equivalence::Equivalent
}

/// Follows the parent links back to the start pair
fn reconstruct_word(
    dfa1: &DFA,
    parents: &FxHashMap<(usize, usize), ((usize, usize), usize)>,
    pair: (usize, usize),
) -> Vec<InputSymbol> {
    let mut word = vec![];
    let mut current = pair;
    while let Some(&(previous, symbol)) = parents.get(&current) {
        word.push(dfa1.alphabet[symbol].clone());
        current = previous;
    }
    word.reverse();
    word
}
