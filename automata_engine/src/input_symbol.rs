use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSymbol {
    pub name: String, // Textual representation of the symbol
}

/// Spellings reserved for the empty-string transition. None of them may be
/// declared as an alphabet symbol.
pub const EPSILON_SYMBOLS: [&str; 3] = ["ε", "&", "epsilon"];
pub const EPSILON: &str = EPSILON_SYMBOLS[0];

impl InputSymbol {
    /// Create a new InputSymbol
    pub fn new(name: &str) -> Self {
        InputSymbol {
            name: name.to_string(),
        }
    }

    /// Create a new InputSymbol from a String
    pub fn from_string(name: String) -> Self {
        InputSymbol { name }
    }

    pub fn from_char(c: char) -> Self {
        InputSymbol {
            name: c.to_string(),
        }
    }

    /// Get the name of the symbol
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Whether this symbol is one of the reserved epsilon spellings
    pub fn is_epsilon(&self) -> bool {
        is_epsilon_name(&self.name)
    }
}

impl Display for InputSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

pub fn is_epsilon_name(name: &str) -> bool {
    EPSILON_SYMBOLS.contains(&name)
}

pub fn epsilon() -> InputSymbol {
    InputSymbol::new(EPSILON)
}

/// Splits a string into one symbol per character
pub fn string_to_symbols(input: &str) -> Vec<InputSymbol> {
    input.chars().map(InputSymbol::from_char).collect()
}

/// Joins symbols back into a word, e.g. for witnesses and log output
pub fn symbols_to_string(symbols: &[InputSymbol]) -> String {
    symbols.iter().map(|s| s.name.as_str()).collect()
}
