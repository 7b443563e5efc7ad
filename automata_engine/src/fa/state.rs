use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    pub name: String, // Name of the state, unique within one automaton (e.g., "q0", "Q1")
}

impl State {
    /// Create a new State
    pub fn new(name: &str) -> Self {
        State {
            name: name.to_string(),
        }
    }

    /// Create a new State from a String
    pub fn from_string(name: String) -> Self {
        State { name }
    }

    /// Get the name of the state
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        State::new(name)
    }
}
