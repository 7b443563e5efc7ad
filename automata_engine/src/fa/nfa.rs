use crate::fa::state::State;
use crate::input_symbol::{InputSymbol, EPSILON};
use crate::language::Language;
use hashbrown::{HashMap, HashSet};
use std::fmt::Display;

/// A nondeterministic finite automaton with epsilon transitions.
///
/// Epsilon edges are kept in their own table and never appear in `alphabet`.
#[derive(Debug, Clone)]
pub struct NFA {
    pub state_index_map: HashMap<State, usize>, // Map of state names to State indices
    pub alphabet_index_map: HashMap<InputSymbol, usize>, // Map of input symbols to indices

    pub states: Vec<State>,         // List of states
    pub alphabet: Vec<InputSymbol>, // Input symbols (alphabet), never contains epsilon

    pub transitions: Vec<HashMap<usize, HashSet<usize>>>, // Transitions state -> input_symbol -> set of next states
    pub epsilon_transitions: Vec<HashSet<usize>>,         // Epsilon transitions state -> set of next states
    pub start_state: usize,                               // Start state
    pub accept_states: HashSet<usize>,                    // Accept states
}

impl NFA {
    /// Creates an NFA with a single, non-accepting start state
    pub fn new(start_state: State) -> Self {
        NFA {
            state_index_map: HashMap::from([(start_state.clone(), 0)]),
            alphabet_index_map: HashMap::new(),
            states: vec![start_state],
            alphabet: vec![],
            transitions: vec![HashMap::new()],
            epsilon_transitions: vec![HashSet::new()],
            start_state: 0,
            accept_states: HashSet::new(),
        }
    }

    /// Adds a state if it is not known yet and returns its index
    pub fn add_state(&mut self, state: State) -> usize {
        *self.state_index_map.entry(state.clone()).or_insert_with(|| {
            let index = self.states.len();
            self.states.push(state);
            self.transitions.push(HashMap::new());
            self.epsilon_transitions.push(HashSet::new());
            index
        })
    }

    /// Sets the start state
    pub fn set_start_state(&mut self, start_state: State) {
        self.start_state = self.add_state(start_state);
    }

    /// Adds a new accept state
    pub fn add_accept_state(&mut self, accept_state: State) {
        let accept_index = self.add_state(accept_state);
        self.accept_states.insert(accept_index);
    }

    /// Adds a transition from state `from` to state `to` on input `symbol`.
    /// An epsilon spelling adds an epsilon transition instead.
    pub fn add_transition(&mut self, from: &State, symbol: &InputSymbol, to: &State) {
        if symbol.is_epsilon() {
            self.add_epsilon_transition(from, to);
            return;
        }
        let from_index = self.add_state(from.clone());
        let to_index = self.add_state(to.clone());
        let symbol_index = self.add_symbol(symbol);
        self.transitions[from_index]
            .entry(symbol_index)
            .or_insert_with(HashSet::new)
            .insert(to_index);
    }

    /// Adds an epsilon transition from state `from` to state `to`
    pub fn add_epsilon_transition(&mut self, from: &State, to: &State) {
        let from_index = self.add_state(from.clone());
        let to_index = self.add_state(to.clone());
        self.epsilon_transitions[from_index].insert(to_index);
    }

    pub(crate) fn add_epsilon_index(&mut self, from: usize, to: usize) {
        self.epsilon_transitions[from].insert(to);
    }

    fn add_symbol(&mut self, symbol: &InputSymbol) -> usize {
        *self
            .alphabet_index_map
            .entry(symbol.clone())
            .or_insert_with(|| {
                let index = self.alphabet.len();
                self.alphabet.push(symbol.clone());
                index
            })
    }

    /// Moves every state, symbol and transition of `other` into this automaton.
    ///
    /// Returns the index of `other`'s start state and of its accept states
    /// after re-indexing. The accept states are not added to this automaton's
    /// accept set; callers link them explicitly.
    pub(crate) fn absorb(&mut self, other: NFA) -> (usize, Vec<usize>) {
        let offset = self.states.len();

        // map the other alphabet onto ours
        let symbol_map: Vec<usize> = other
            .alphabet
            .iter()
            .map(|symbol| self.add_symbol(symbol))
            .collect();

        for (index, state) in other.states.into_iter().enumerate() {
            self.state_index_map.insert(state.clone(), index + offset);
            self.states.push(state);
        }
        for transition_map in other.transitions {
            self.transitions.push(
                transition_map
                    .into_iter()
                    .map(|(symbol, targets)| {
                        (
                            symbol_map[symbol],
                            targets.into_iter().map(|t| t + offset).collect(),
                        )
                    })
                    .collect(),
            );
        }
        for targets in other.epsilon_transitions {
            self.epsilon_transitions
                .push(targets.into_iter().map(|t| t + offset).collect());
        }

        let mut accept_states: Vec<usize> =
            other.accept_states.into_iter().map(|s| s + offset).collect();
        accept_states.sort_unstable();
        (other.start_state + offset, accept_states)
    }

    /// Epsilon-closure: computes all reachable states from a given set of states using ε-transitions
    pub(crate) fn _epsilon_closure(&self, states: HashSet<usize>) -> HashSet<usize> {
        let mut stack: Vec<usize> = Vec::from_iter(states.iter().cloned());
        let mut closure = states;

        while let Some(state) = stack.pop() {
            for &next_state in self.epsilon_transitions[state].iter() {
                if closure.insert(next_state) {
                    stack.push(next_state);
                }
            }
        }

        closure
    }

    /// Computes the epsilon-closure of a set of states. Unknown states are ignored.
    pub fn epsilon_closure(&self, states: &HashSet<State>) -> HashSet<State> {
        self._epsilon_closure(
            states
                .iter()
                .filter_map(|s| self.state_index_map.get(s).copied())
                .collect(),
        )
        .iter()
        .map(|&s| self.states[s].clone())
        .collect()
    }

    /// Computes the next states based on the current states and input symbol
    pub(crate) fn _next_states(&self, states: &HashSet<usize>, symbol: usize) -> HashSet<usize> {
        let mut next_states = HashSet::new();

        for state in states {
            if let Some(next_states_set) = self.transitions[*state].get(&symbol) {
                next_states.extend(next_states_set);
            }
        }

        next_states
    }

    /// Targets of `state` on `symbol`, without following epsilon transitions
    pub fn transition(&self, state: &State, symbol: &InputSymbol) -> HashSet<State> {
        let (Some(&state_index), Some(&symbol_index)) = (
            self.state_index_map.get(state),
            self.alphabet_index_map.get(symbol),
        ) else {
            return HashSet::new();
        };
        self.transitions[state_index]
            .get(&symbol_index)
            .map(|targets| targets.iter().map(|&t| self.states[t].clone()).collect())
            .unwrap_or_default()
    }

    /// Targets of the epsilon transitions leaving `state`
    pub fn epsilon_transition(&self, state: &State) -> HashSet<State> {
        self.state_index_map
            .get(state)
            .map(|&index| {
                self.epsilon_transitions[index]
                    .iter()
                    .map(|&t| self.states[t].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get_start_state(&self) -> &State {
        &self.states[self.start_state]
    }

    pub fn get_accept_states(&self) -> HashSet<State> {
        HashSet::from_iter(self.accept_states.iter().map(|&s| &self.states[s]).cloned())
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Symbol indices ordered by symbol
    pub(crate) fn sorted_symbols(&self) -> Vec<usize> {
        let mut symbols: Vec<usize> = (0..self.alphabet.len()).collect();
        symbols.sort_by(|&a, &b| self.alphabet[a].cmp(&self.alphabet[b]));
        symbols
    }

    /// Maps a set of state indices to their states in ascending index order
    pub(crate) fn ordered_states(&self, states: &HashSet<usize>) -> Vec<State> {
        let mut indices: Vec<usize> = states.iter().cloned().collect();
        indices.sort_unstable();
        indices.into_iter().map(|s| self.states[s].clone()).collect()
    }
}

impl Language for NFA {
    fn accepts(&self, input: &[InputSymbol]) -> bool {
        self.simulate(input).accepted
    }
}

impl Display for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "NFA {{")?;
        writeln!(f, "  Start State: {}", self.get_start_state())?;
        writeln!(
            f,
            "  Accept States: {:?}",
            self.ordered_states(&self.accept_states)
        )?;
        writeln!(f, "  States: {:?}", self.states)?;
        writeln!(f, "  Alphabet: {:?}", self.alphabet)?;
        writeln!(f, "  Transitions:")?;
        for (from_index, transitions) in self.transitions.iter().enumerate() {
            for symbol_index in self.sorted_symbols() {
                if let Some(targets) = transitions.get(&symbol_index) {
                    for to in self.ordered_states(targets) {
                        writeln!(
                            f,
                            "    {} -- {} --> {}",
                            self.states[from_index], self.alphabet[symbol_index], to
                        )?;
                    }
                }
            }
            for to in self.ordered_states(&self.epsilon_transitions[from_index]) {
                writeln!(f, "    {} -- {} --> {}", self.states[from_index], EPSILON, to)?;
            }
        }
        writeln!(f, "}}")
    }
}
