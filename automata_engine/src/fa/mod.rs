pub mod dfa;
pub mod equivalence;
pub mod minimization;
pub mod nfa;
pub mod simulation;
pub mod state;
