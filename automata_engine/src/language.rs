use crate::input_symbol::{string_to_symbols, InputSymbol};

pub trait Language {
    fn accepts(&self, input: &[InputSymbol]) -> bool;

    /// Splits the string into one symbol per character and checks whether the
    /// automaton accepts the resulting word.
    fn accepts_string(&self, input: &str) -> bool {
        self.accepts(&string_to_symbols(input))
    }
}
