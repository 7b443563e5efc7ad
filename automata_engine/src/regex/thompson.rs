use crate::error::{Error, Result};
use crate::fa::nfa::NFA;
use crate::fa::state::State;
use crate::input_symbol::InputSymbol;
use crate::regex::parser::Token;
use log::trace;

/// Thompson construction over a postfix token stream.
///
/// The builder owns the state counter of one compilation, so names
/// (`q0`, `q1`, ...) never collide between the sub-automata it produces.
/// Every construction consumes its operands and returns a new NFA; a final
/// state is demoted by leaving it out of the new accept set.
#[derive(Debug, Default)]
pub struct ThompsonBuilder {
    next_state: usize,
}

impl ThompsonBuilder {
    pub fn new() -> Self {
        ThompsonBuilder { next_state: 0 }
    }

    fn fresh_state(&mut self) -> State {
        let state = State::from_string(format!("q{}", self.next_state));
        self.next_state += 1;
        state
    }

    /// `start --symbol--> end`
    pub fn literal(&mut self, symbol: InputSymbol) -> NFA {
        let start = self.fresh_state();
        let end = self.fresh_state();
        let mut nfa = NFA::new(start.clone());
        nfa.add_accept_state(end.clone());
        nfa.add_transition(&start, &symbol, &end);
        nfa
    }

    /// `start --ε--> end`
    pub fn epsilon(&mut self) -> NFA {
        let start = self.fresh_state();
        let end = self.fresh_state();
        let mut nfa = NFA::new(start.clone());
        nfa.add_accept_state(end.clone());
        nfa.add_epsilon_transition(&start, &end);
        nfa
    }

    /// Keeps both state sets and links every final state of `first` to the
    /// start of `second`. Only the finals of `second` stay accepting.
    pub fn concatenate(&mut self, first: NFA, second: NFA) -> NFA {
        let mut nfa = first;
        let mut first_finals: Vec<usize> = nfa.accept_states.drain().collect();
        first_finals.sort_unstable();
        let (second_start, second_finals) = nfa.absorb(second);
        for final_state in first_finals {
            nfa.add_epsilon_index(final_state, second_start);
        }
        nfa.accept_states.extend(second_finals);
        nfa
    }

    /// New start and end states around both operands
    pub fn union(&mut self, left: NFA, right: NFA) -> NFA {
        let start = self.fresh_state();
        let end = self.fresh_state();
        let mut nfa = NFA::new(start);
        let end_index = nfa.add_state(end);
        nfa.accept_states.insert(end_index);

        for operand in [left, right] {
            let (operand_start, operand_finals) = nfa.absorb(operand);
            nfa.add_epsilon_index(nfa.start_state, operand_start);
            for final_state in operand_finals {
                nfa.add_epsilon_index(final_state, end_index);
            }
        }
        nfa
    }

    /// New start and end states; the start may skip straight to the end and
    /// every old final state loops back to the old start.
    pub fn kleene_star(&mut self, inner: NFA) -> NFA {
        let start = self.fresh_state();
        let end = self.fresh_state();
        let mut nfa = NFA::new(start);
        let end_index = nfa.add_state(end);
        nfa.accept_states.insert(end_index);

        let (inner_start, inner_finals) = nfa.absorb(inner);
        nfa.add_epsilon_index(nfa.start_state, end_index);
        nfa.add_epsilon_index(nfa.start_state, inner_start);
        for final_state in inner_finals {
            nfa.add_epsilon_index(final_state, inner_start);
            nfa.add_epsilon_index(final_state, end_index);
        }
        nfa
    }

    /// Evaluates a postfix token stream with an automaton stack
    pub fn evaluate(&mut self, postfix: &[Token]) -> Result<NFA> {
        let mut stack: Vec<NFA> = Vec::new();

        for &token in postfix {
            let nfa = match token {
                Token::Symbol(c) => self.literal(InputSymbol::from_char(c)),
                Token::Epsilon => self.epsilon(),
                Token::Star => {
                    let inner = pop_operand(&mut stack, token)?;
                    self.kleene_star(inner)
                }
                Token::Union | Token::Concat => {
                    let right = pop_operand(&mut stack, token)?;
                    let left = pop_operand(&mut stack, token)?;
                    if token == Token::Union {
                        self.union(left, right)
                    } else {
                        self.concatenate(left, right)
                    }
                }
                Token::Open | Token::Close => {
                    return Err(Error::malformed("parenthesis in postfix expression"));
                }
            };
            trace!("Applied '{}', stack depth {}", token, stack.len() + 1);
            stack.push(nfa);
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(nfa), true) => Ok(nfa),
            (None, _) => Err(Error::malformed("expression has no operands")),
            (Some(_), false) => Err(Error::malformed(format!(
                "{} operands left without an operator",
                stack.len() + 1
            ))),
        }
    }
}

fn pop_operand(stack: &mut Vec<NFA>, operator: Token) -> Result<NFA> {
    stack.pop().ok_or_else(|| {
        Error::malformed(format!("operator '{}' is missing an operand", operator))
    })
}
