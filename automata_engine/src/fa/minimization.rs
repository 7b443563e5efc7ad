//! Moore-style partition refinement.
//!
//! Every round computes, for each state, the block indices its transitions
//! lead to and splits blocks whose members disagree. Signatures are always
//! computed against the partition from the start of the round, through a
//! lookup table that is rebuilt once per round.

use crate::fa::dfa::DFA;
use crate::fa::state::State;
use hashbrown::{HashMap, HashSet};
use log::{debug, trace};
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet};

pub(crate) type Block = BTreeSet<usize>;
pub(crate) type Partition = Vec<Block>;

/// Block index of each transition target, per symbol in sorted symbol order.
/// `None` marks a missing transition.
type Signature = SmallVec<[Option<usize>; 8]>;

/// Prefix of the state names of a minimized DFA
pub const MINIMIZED_STATE_PREFIX: &str = "Q";

impl DFA {
    /// Returns a new DFA with the fewest states that accepts the same language.
    ///
    /// Unreachable states are not removed beforehand; they are merged into
    /// whatever block their signature places them in.
    pub fn minimize(&self) -> DFA {
        let symbols = self.sorted_symbols();
        let mut partition = self.initial_partition();
        trace_partition("initial", &partition);

        loop {
            let block_of = block_index_table(&partition, self.states.len());
            let refined = self.refine(&partition, &block_of, &symbols);
            trace_partition("refined", &refined);
            // blocks only ever split, so an equal count means an equal partition
            if refined.len() == partition.len() {
                break;
            }
            partition = refined;
        }

        let minimized = self.quotient(partition);
        debug!(
            "Minimized DFA from {} to {} states",
            self.states.len(),
            minimized.states.len()
        );
        minimized
    }

    /// `{finals, non-finals}` without empty blocks
    fn initial_partition(&self) -> Partition {
        let (accepting, rejecting): (Block, Block) =
            (0..self.states.len()).partition(|state| self.accept_states.contains(state));
        [accepting, rejecting]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect()
    }

    fn signature(&self, state: usize, block_of: &[usize], symbols: &[usize]) -> Signature {
        symbols
            .iter()
            .map(|&symbol| self._next_state(state, symbol).map(|next| block_of[next]))
            .collect()
    }

    fn refine(&self, partition: &[Block], block_of: &[usize], symbols: &[usize]) -> Partition {
        let mut refined = Partition::with_capacity(partition.len());
        for (index, block) in partition.iter().enumerate() {
            if block.len() == 1 {
                refined.push(block.clone());
                continue;
            }
            let mut groups: BTreeMap<Signature, Block> = BTreeMap::new();
            for &state in block {
                groups
                    .entry(self.signature(state, block_of, symbols))
                    .or_default()
                    .insert(state);
            }
            if groups.len() > 1 {
                trace!("Split block {} into {} blocks", index, groups.len());
            }
            refined.extend(groups.into_values());
        }
        refined
    }

    /// Builds the quotient DFA. Blocks are ordered by their smallest member,
    /// which is also the representative whose transitions the block takes.
    fn quotient(&self, mut partition: Partition) -> DFA {
        partition.sort_by_key(|block| block.first().copied());
        let block_of = block_index_table(&partition, self.states.len());

        let states: Vec<State> = (0..partition.len())
            .map(|i| State::from_string(format!("{}{}", MINIMIZED_STATE_PREFIX, i)))
            .collect();
        let state_index_map: HashMap<State, usize> = HashMap::from_iter(
            states
                .iter()
                .enumerate()
                .map(|(i, state)| (state.clone(), i)),
        );

        let accept_states: HashSet<usize> = partition
            .iter()
            .enumerate()
            .filter(|(_, block)| block.iter().any(|s| self.accept_states.contains(s)))
            .map(|(i, _)| i)
            .collect();

        // blocks are never empty, so every block has a representative
        let transitions: Vec<HashMap<usize, usize>> = partition
            .iter()
            .filter_map(|block| block.first())
            .map(|&representative| -> HashMap<usize, usize> {
                self.transitions[representative]
                    .iter()
                    .map(|(&symbol, &target)| (symbol, block_of[target]))
                    .collect()
            })
            .collect();

        DFA {
            state_index_map,
            alphabet_index_map: self.alphabet_index_map.clone(),
            states,
            alphabet: self.alphabet.clone(),
            transitions,
            start_state: block_of[self.start_state],
            accept_states,
        }
    }
}

/// Lookup table from state index to the index of the block containing it
fn block_index_table(partition: &[Block], num_states: usize) -> Vec<usize> {
    let mut block_of = vec![0; num_states];
    for (index, block) in partition.iter().enumerate() {
        for &state in block {
            block_of[state] = index;
        }
    }
    block_of
}

fn trace_partition(context: &str, partition: &[Block]) {
    trace!("Partition {}:", context);
    for (i, block) in partition.iter().enumerate() {
        trace!("Block {}: {:?}", i, block);
    }
}
