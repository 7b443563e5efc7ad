use crate::error::{Error, Result};
use crate::fa::state::State;
use crate::input_symbol::InputSymbol;
use crate::language::Language;
use hashbrown::{HashMap, HashSet};
use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct DFA {
    pub state_index_map: HashMap<State, usize>, // Map of state names to State indices
    pub alphabet_index_map: HashMap<InputSymbol, usize>, // Map of input symbols to indices

    pub states: Vec<State>,         // List of states
    pub alphabet: Vec<InputSymbol>, // Input symbols (alphabet)

    pub transitions: Vec<HashMap<usize, usize>>, // Transitions (state -> input_symbol -> next state)
    pub start_state: usize,                      // Start state
    pub accept_states: HashSet<usize>,           // Accept states
}

impl DFA {
    /// Creates a DFA with a single, non-accepting start state and no transitions
    pub fn new(start_state: State) -> Self {
        DFA {
            state_index_map: HashMap::from([(start_state.clone(), 0)]),
            alphabet_index_map: HashMap::new(),
            states: vec![start_state],
            alphabet: vec![],
            transitions: vec![HashMap::new()],
            start_state: 0,
            accept_states: HashSet::new(),
        }
    }

    /// Builds a DFA from declared states, alphabet, start, finals and
    /// `(from, symbol, to)` triples.
    ///
    /// Every referenced state and symbol must be declared, the alphabet must not
    /// contain an epsilon spelling, and each `(from, symbol)` pair may have at
    /// most one target. Nothing is inferred: a missing declaration is an error.
    pub fn from_parts<S: AsRef<str>>(
        states: &[S],
        alphabet: &[S],
        start_state: &str,
        accept_states: &[S],
        transitions: &[(S, S, S)],
    ) -> Result<DFA> {
        let mut state_index_map: HashMap<State, usize> = HashMap::new();
        let mut dfa_states: Vec<State> = Vec::new();
        for name in states {
            let name: &str = name.as_ref();
            if name.is_empty() {
                return Err(Error::invalid("state names must not be empty"));
            }
            let state = State::new(name);
            if !state_index_map.contains_key(&state) {
                state_index_map.insert(state.clone(), dfa_states.len());
                dfa_states.push(state);
            }
        }

        let mut alphabet_index_map: HashMap<InputSymbol, usize> = HashMap::new();
        let mut dfa_alphabet: Vec<InputSymbol> = Vec::new();
        for name in alphabet {
            let symbol = InputSymbol::new(name.as_ref());
            if symbol.name.is_empty() {
                return Err(Error::invalid("alphabet symbols must not be empty"));
            }
            if symbol.is_epsilon() {
                return Err(Error::invalid(format!(
                    "'{}' is reserved for epsilon and cannot be an alphabet symbol",
                    symbol
                )));
            }
            if !alphabet_index_map.contains_key(&symbol) {
                alphabet_index_map.insert(symbol.clone(), dfa_alphabet.len());
                dfa_alphabet.push(symbol);
            }
        }

        let lookup_state = |name: &str, role: &str| -> Result<usize> {
            state_index_map
                .get(&State::new(name))
                .copied()
                .ok_or_else(|| Error::invalid(format!("{} '{}' is not a declared state", role, name)))
        };

        let start_index = lookup_state(start_state, "start state")?;
        let mut accept_indices = HashSet::new();
        for name in accept_states {
            accept_indices.insert(lookup_state(name.as_ref(), "final state")?);
        }

        let mut dfa_transitions: Vec<HashMap<usize, usize>> = vec![HashMap::new(); dfa_states.len()];
        for (from, symbol, to) in transitions {
            let (from, symbol, to): (&str, &str, &str) = (from.as_ref(), symbol.as_ref(), to.as_ref());
            let from_index = lookup_state(from, "transition source")?;
            let to_index = lookup_state(to, "transition target")?;
            let symbol_index = *alphabet_index_map
                .get(&InputSymbol::new(symbol))
                .ok_or_else(|| {
                    Error::invalid(format!("transition symbol '{}' is not in the alphabet", symbol))
                })?;
            match dfa_transitions[from_index].insert(symbol_index, to_index) {
                Some(previous) if previous != to_index => {
                    return Err(Error::invalid(format!(
                        "state '{}' has more than one transition on '{}' ({} and {})",
                        from,
                        symbol,
                        dfa_states[previous],
                        dfa_states[to_index]
                    )));
                }
                _ => {}
            }
        }

        Ok(DFA {
            state_index_map,
            alphabet_index_map,
            states: dfa_states,
            alphabet: dfa_alphabet,
            transitions: dfa_transitions,
            start_state: start_index,
            accept_states: accept_indices,
        })
    }

    pub fn get_start_state(&self) -> &State {
        &self.states[self.start_state]
    }

    pub fn get_accept_states(&self) -> HashSet<State> {
        HashSet::from_iter(self.accept_states.iter().map(|&s| &self.states[s]).cloned())
    }

    pub fn is_accepting(&self, state: &State) -> bool {
        self.state_index_map
            .get(state)
            .is_some_and(|index| self.accept_states.contains(index))
    }

    /// All transitions, ordered by source state and then by symbol
    pub fn get_transitions(&self) -> Vec<(State, InputSymbol, State)> {
        let mut transitions = Vec::new();
        for (from_state, transitions_map) in self.transitions.iter().enumerate() {
            for symbol_index in self.sorted_symbols() {
                if let Some(&to_state) = transitions_map.get(&symbol_index) {
                    transitions.push((
                        self.states[from_state].clone(),
                        self.alphabet[symbol_index].clone(),
                        self.states[to_state].clone(),
                    ));
                }
            }
        }
        transitions
    }

    /// Sets the start state
    pub fn set_start_state(&mut self, start_state: State) {
        self.start_state = self.ensure_state(start_state);
    }

    /// Adds a new accept state
    pub fn add_accept_state(&mut self, accept_state: State) {
        let accept_index = self.ensure_state(accept_state);
        self.accept_states.insert(accept_index);
    }

    /// Adds a transition from state `from` to state `to` on input `symbol`.
    ///
    /// Fails without modifying the DFA if `symbol` is an epsilon spelling or
    /// if `from` already moves to a different state on `symbol`.
    pub fn add_transition(
        &mut self,
        from: &State,
        symbol: &InputSymbol,
        to: &State,
    ) -> Result<()> {
        if symbol.name.is_empty() {
            return Err(Error::invalid("alphabet symbols must not be empty"));
        }
        if symbol.is_epsilon() {
            return Err(Error::invalid(format!(
                "'{}' is reserved for epsilon and cannot be an alphabet symbol",
                symbol
            )));
        }
        if let Some(previous) = self.transition(from, symbol) {
            if previous != to {
                return Err(Error::invalid(format!(
                    "state '{}' has more than one transition on '{}' ({} and {})",
                    from, symbol, previous, to
                )));
            }
        }

        let from_index = self.ensure_state(from.clone());
        let to_index = self.ensure_state(to.clone());
        let symbol_index = *self
            .alphabet_index_map
            .entry(symbol.clone())
            .or_insert_with(|| {
                let index = self.alphabet.len();
                self.alphabet.push(symbol.clone());
                index
            });
        self.transitions[from_index].insert(symbol_index, to_index);
        Ok(())
    }

    fn ensure_state(&mut self, state: State) -> usize {
        *self.state_index_map.entry(state.clone()).or_insert_with(|| {
            let index = self.states.len();
            self.states.push(state);
            self.transitions.push(HashMap::new());
            index
        })
    }

    /// Returns the next state given the current state and input symbol
    pub(crate) fn _next_state(&self, state: usize, symbol: usize) -> Option<usize> {
        self.transitions[state].get(&symbol).cloned()
    }

    /// Looks up the target of `state` on `symbol`; `None` means the DFA rejects
    pub fn transition(&self, state: &State, symbol: &InputSymbol) -> Option<&State> {
        let state_index = *self.state_index_map.get(state)?;
        let symbol_index = *self.alphabet_index_map.get(symbol)?;
        self._next_state(state_index, symbol_index)
            .map(|next| &self.states[next])
    }

    /// Symbol indices ordered by symbol, the fixed order used by the algorithms
    pub(crate) fn sorted_symbols(&self) -> Vec<usize> {
        let mut symbols: Vec<usize> = (0..self.alphabet.len()).collect();
        symbols.sort_by(|&a, &b| self.alphabet[a].cmp(&self.alphabet[b]));
        symbols
    }

    /// Returns the set of reachable states from the start state
    pub fn reachable_states(&self) -> HashSet<State> {
        let mut reachable: HashSet<usize> = HashSet::from([self.start_state]);
        let mut stack = vec![self.start_state];

        while let Some(current_state) = stack.pop() {
            for (_, &next_state) in self.transitions[current_state].iter() {
                if reachable.insert(next_state) {
                    stack.push(next_state);
                }
            }
        }

        reachable.into_iter().map(|s| self.states[s].clone()).collect()
    }

    /// Fails with the first `(state, symbol)` pair that has no transition
    pub fn check_total(&self) -> Result<()> {
        for (state, transitions_map) in self.transitions.iter().enumerate() {
            for symbol in self.sorted_symbols() {
                if !transitions_map.contains_key(&symbol) {
                    return Err(Error::invalid(format!(
                        "no transition from '{}' on '{}'",
                        self.states[state], self.alphabet[symbol]
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn is_total(&self) -> bool {
        self.check_total().is_ok()
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }
}

impl Language for DFA {
    /// Follows the single path through the DFA; an unknown symbol or a missing
    /// transition rejects.
    fn accepts(&self, input: &[InputSymbol]) -> bool {
        let mut current_state = self.start_state;
        for symbol in input {
            match self.alphabet_index_map.get(symbol) {
                Some(&symbol_index) => match self._next_state(current_state, symbol_index) {
                    Some(next_state) => {
                        current_state = next_state;
                    }
                    None => return false,
                },
                None => return false,
            }
        }
        self.accept_states.contains(&current_state)
    }
}

impl Display for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DFA {{")?;
        writeln!(f, "  Start State: {}", self.get_start_state())?;
        let mut accept_states: Vec<&State> =
            self.accept_states.iter().map(|&s| &self.states[s]).collect();
        accept_states.sort();
        writeln!(f, "  Accept States: {:?}", accept_states)?;
        writeln!(f, "  States: {:?}", self.states)?;
        writeln!(f, "  Alphabet: {:?}", self.alphabet)?;
        writeln!(f, "  Transitions:")?;
        for (from, symbol, to) in self.get_transitions() {
            writeln!(f, "    {} -- {} --> {}", from, symbol, to)?;
        }
        writeln!(f, "}}")
    }
}
