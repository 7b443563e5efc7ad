use crate::fa::dfa::DFA;
use crate::fa::nfa::NFA;
use crate::fa::state::State;
use crate::input_symbol::{string_to_symbols, InputSymbol};
use hashbrown::HashSet;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// One entry of an NFA run: the active states after consuming `symbol`.
/// The first entry of every trace has no symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub states: Vec<State>,
    pub symbol: Option<InputSymbol>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    pub accepted: bool,
    pub trace: Vec<TraceStep>,
}

/// One step of a DFA run. `to` is `None` when the DFA has no transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaStep {
    pub symbol: InputSymbol,
    pub from: State,
    pub to: Option<State>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaRun {
    pub accepted: bool,
    pub steps: Vec<DfaStep>,
}

impl NFA {
    /// Runs the automaton on `input`, recording the active state set after
    /// every consumed symbol.
    ///
    /// A symbol outside the alphabet or an empty active set rejects at once;
    /// the trace then ends at the last successful step.
    pub fn simulate(&self, input: &[InputSymbol]) -> Simulation {
        let mut current_states = self._epsilon_closure(HashSet::from([self.start_state]));
        let mut trace = vec![TraceStep {
            states: self.ordered_states(&current_states),
            symbol: None,
        }];

        for symbol in input {
            let Some(&symbol_index) = self.alphabet_index_map.get(symbol) else {
                debug!("Symbol '{}' is not in the alphabet, rejecting", symbol);
                return Simulation {
                    accepted: false,
                    trace,
                };
            };
            let next_states = self._epsilon_closure(self._next_states(&current_states, symbol_index));
            if next_states.is_empty() {
                debug!("No live path after '{}', rejecting", symbol);
                return Simulation {
                    accepted: false,
                    trace,
                };
            }
            current_states = next_states;
            let step = TraceStep {
                states: self.ordered_states(&current_states),
                symbol: Some(symbol.clone()),
            };
            trace!("{} -> {:?}", symbol, step.states);
            trace.push(step);
        }

        Simulation {
            accepted: !current_states.is_disjoint(&self.accept_states),
            trace,
        }
    }

    pub fn simulate_string(&self, input: &str) -> Simulation {
        self.simulate(&string_to_symbols(input))
    }
}

impl DFA {
    /// Runs the automaton on `input` and records `(symbol, from, to)` for
    /// every step. A missing transition or unknown symbol is recorded with
    /// `to = None` and ends the run with rejection.
    pub fn run(&self, input: &[InputSymbol]) -> DfaRun {
        let mut steps = Vec::with_capacity(input.len());
        let mut current_state = self.start_state;

        for symbol in input {
            let next_state = self
                .alphabet_index_map
                .get(symbol)
                .and_then(|&symbol_index| self._next_state(current_state, symbol_index));
            steps.push(DfaStep {
                symbol: symbol.clone(),
                from: self.states[current_state].clone(),
                to: next_state.map(|s| self.states[s].clone()),
            });
            match next_state {
                Some(next_state) => current_state = next_state,
                None => {
                    return DfaRun {
                        accepted: false,
                        steps,
                    }
                }
            }
        }

        DfaRun {
            accepted: self.accept_states.contains(&current_state),
            steps,
        }
    }

    pub fn run_string(&self, input: &str) -> DfaRun {
        self.run(&string_to_symbols(input))
    }
}
