//! Plain-data shapes exchanged with a hosting application: DFA descriptions
//! to build automata from, and projections of built automata for display.

use crate::error::{Error, Result};
use crate::fa::dfa::DFA;
use crate::fa::nfa::NFA;
use crate::fa::state::State;
use crate::input_symbol::EPSILON;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A DFA as supplied by a caller. Transitions are keyed `"state,symbol"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaDescription {
    pub states: Vec<String>,
    pub alphabet: Vec<String>,
    pub start_state: String,
    pub final_states: Vec<String>,
    pub transitions: BTreeMap<String, String>,
}

impl DfaDescription {
    /// Tokenizes raw text fields.
    ///
    /// `states`, `alphabet` and `final_states` are lists separated by commas
    /// and/or whitespace. `transitions` is a comma separated list of
    /// `from symbol to` triples, e.g. `"q0 a q1, q1 b q0"`.
    pub fn from_text(
        states: &str,
        alphabet: &str,
        start_state: &str,
        final_states: &str,
        transitions: &str,
    ) -> Result<Self> {
        let mut transition_map = BTreeMap::new();
        for triple in transitions.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let parts: Vec<&str> = triple.split_whitespace().collect();
            let &[from, symbol, to] = parts.as_slice() else {
                return Err(Error::invalid(format!(
                    "transition '{}' is not of the form 'from symbol to'",
                    triple
                )));
            };
            let key = transition_key(from, symbol);
            if let Some(previous) = transition_map.insert(key, to.to_string()) {
                if previous != to {
                    return Err(Error::invalid(format!(
                        "state '{}' has more than one transition on '{}' ({} and {})",
                        from, symbol, previous, to
                    )));
                }
            }
        }

        Ok(DfaDescription {
            states: parse_list(states),
            alphabet: parse_list(alphabet),
            start_state: start_state.trim().to_string(),
            final_states: parse_list(final_states),
            transitions: transition_map,
        })
    }

    /// Validates the description and builds the DFA. Surrounding whitespace is
    /// ignored in every name.
    pub fn to_dfa(&self) -> Result<DFA> {
        let mut triples: Vec<(&str, &str, &str)> = Vec::with_capacity(self.transitions.len());
        for (key, to) in &self.transitions {
            let Some((from, symbol)) = key.split_once(',') else {
                return Err(Error::invalid(format!(
                    "transition key '{}' is not of the form 'state,symbol'",
                    key
                )));
            };
            triples.push((from.trim(), symbol.trim(), to.trim()));
        }
        let states: Vec<&str> = self.states.iter().map(|s| s.trim()).collect();
        let alphabet: Vec<&str> = self.alphabet.iter().map(|s| s.trim()).collect();
        let final_states: Vec<&str> = self.final_states.iter().map(|s| s.trim()).collect();
        DFA::from_parts(
            &states,
            &alphabet,
            self.start_state.trim(),
            &final_states,
            &triples,
        )
    }
}

impl TryFrom<&DfaDescription> for DFA {
    type Error = Error;

    fn try_from(description: &DfaDescription) -> Result<DFA> {
        description.to_dfa()
    }
}

/// Splits on commas and whitespace, dropping empty items
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn transition_key(state: &str, symbol: &str) -> String {
    format!("{},{}", state, symbol)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry {
    pub from_state: String,
    pub symbol: String,
    pub to_state: String,
    pub display: String,
}

/// A DFA laid out for display, with transitions both as a list and as the
/// flattened `"state,symbol" -> target` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaProjection {
    pub states: Vec<String>,
    pub alphabet: Vec<String>,
    pub start_state: String,
    pub final_states: Vec<String>,
    pub transitions: Vec<TransitionEntry>,
    pub transitions_raw: BTreeMap<String, String>,
}

impl From<&DFA> for DfaProjection {
    fn from(dfa: &DFA) -> Self {
        let mut transitions = Vec::new();
        let mut transitions_raw = BTreeMap::new();
        for (from, symbol, to) in dfa.get_transitions() {
            transitions_raw.insert(transition_key(&from.name, &symbol.name), to.name.clone());
            transitions.push(TransitionEntry {
                display: format!("(\"{}\", \"{}\") → {}", from, symbol, to),
                from_state: from.name,
                symbol: symbol.name,
                to_state: to.name,
            });
        }

        let mut final_states: Vec<usize> = dfa.accept_states.iter().cloned().collect();
        final_states.sort_unstable();

        DfaProjection {
            states: dfa.states.iter().map(|s| s.name.clone()).collect(),
            alphabet: dfa
                .sorted_symbols()
                .into_iter()
                .map(|s| dfa.alphabet[s].name.clone())
                .collect(),
            start_state: dfa.get_start_state().name.clone(),
            final_states: final_states
                .into_iter()
                .map(|s| dfa.states[s].name.clone())
                .collect(),
            transitions,
            transitions_raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimizationReport {
    pub original: DfaProjection,
    pub minimized: DfaProjection,
}

/// Builds the described DFA, minimizes it and projects both automata
pub fn minimize_description(description: &DfaDescription) -> Result<MinimizationReport> {
    let dfa = description.to_dfa()?;
    let minimized = dfa.minimize();
    debug!(
        "Minimization report: {} -> {} states",
        dfa.num_states(),
        minimized.num_states()
    );
    Ok(MinimizationReport {
        original: DfaProjection::from(&dfa),
        minimized: DfaProjection::from(&minimized),
    })
}

/// An NFA laid out for display. Transitions map each state to its targets per
/// symbol; epsilon transitions are listed under `ε`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfaDescription {
    pub states: Vec<String>,
    pub alphabet: Vec<String>,
    pub start_state: String,
    pub final_states: Vec<String>,
    pub transitions: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl NFA {
    pub fn describe(&self) -> NfaDescription {
        let names = |states: Vec<State>| -> Vec<String> {
            states.into_iter().map(|s| s.name).collect()
        };

        let mut transitions = BTreeMap::new();
        for (from_index, state) in self.states.iter().enumerate() {
            let mut by_symbol: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for (&symbol, targets) in self.transitions[from_index].iter() {
                by_symbol.insert(
                    self.alphabet[symbol].name.clone(),
                    names(self.ordered_states(targets)),
                );
            }
            if !self.epsilon_transitions[from_index].is_empty() {
                by_symbol.insert(
                    EPSILON.to_string(),
                    names(self.ordered_states(&self.epsilon_transitions[from_index])),
                );
            }
            transitions.insert(state.name.clone(), by_symbol);
        }

        NfaDescription {
            states: self.states.iter().map(|s| s.name.clone()).collect(),
            alphabet: self
                .sorted_symbols()
                .into_iter()
                .map(|s| self.alphabet[s].name.clone())
                .collect(),
            start_state: self.get_start_state().name.clone(),
            final_states: names(self.ordered_states(&self.accept_states)),
            transitions,
        }
    }
}
